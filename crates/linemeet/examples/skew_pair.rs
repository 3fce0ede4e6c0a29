//! Two skew lines at distance 1: each moves by 0.5 toward the other.
//!
//! Run: `cargo run -p linemeet --example skew_pair`

use linemeet::prelude::*;

fn main() -> Result<(), SolveError> {
    let lines = [
        Line3::new(Vec3::zeros(), Vec3::unit_x())?,
        Line3::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.0, 0.0, -1.0))?,
    ];
    let out = solve(&lines)?;
    println!("intersection point: {:?}", out.point);
    println!("movement vectors:");
    for (k, m) in out.movements.iter().enumerate() {
        println!("  line {k}: {m:?} (|m| = {:.6})", m.length());
    }
    println!("objective={:.9} max_residual={:.3e}", out.objective, out.max_residual);
    Ok(())
}
