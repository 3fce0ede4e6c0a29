//! Public-API smoke tests: errors propagate, outputs keep input order.

use linemeet::prelude::*;

#[test]
fn zero_direction_is_rejected_before_solving() {
    assert_eq!(
        Line3::new(Vec3::new(1.0, 2.0, 3.0), Vec3::zeros()),
        Err(GeomError::ZeroLength)
    );
    let err: SolveError = GeomError::ZeroLength.into();
    assert_eq!(err, SolveError::Geometry(GeomError::ZeroLength));
    assert_eq!(err.to_string(), "cannot normalize a zero-length vector");
}

#[test]
fn movements_follow_input_order() {
    let a = Line3::new(Vec3::zeros(), Vec3::unit_x()).unwrap();
    let b = Line3::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
    let ab = solve(&[a, b]).unwrap();
    let ba = solve(&[b, a]).unwrap();
    assert!((ab.movements[0] - ba.movements[1]).length() < 1e-9);
    assert!((ab.movements[1] - ba.movements[0]).length() < 1e-9);
    assert!((ab.point - ba.point).length() < 1e-9);
}

#[test]
fn three_coordinate_axes_offset() {
    // x-axis, y-axis shifted by z=1, z-axis shifted by x=1
    let lines = [
        Line3::new(Vec3::zeros(), Vec3::unit_x()).unwrap(),
        Line3::new(Vec3::new(0.0, 0.0, 1.0), Vec3::unit_y()).unwrap(),
        Line3::new(Vec3::new(1.0, 0.0, 0.0), Vec3::unit_z()).unwrap(),
    ];
    let out = solve(&lines).unwrap();
    for p in out.landing_points(&lines) {
        assert!((p - out.point).length() < 1e-8);
    }
    // cost(p) = (y²+z²) + (x²+(z-1)²) + ((x-1)²+y²) is minimized at (0.5, 0, 0.5)
    assert!((out.point - Vec3::new(0.5, 0.0, 0.5)).length() < 1e-8);
    assert!((out.objective - 1.0).abs() < 1e-8);
}

#[test]
fn bundle_solve_with_custom_cfg() {
    let bundle = draw_bundle(
        BundleCfg {
            lines: 12,
            noise: 1.0,
            ..BundleCfg::default()
        },
        ReplayToken::new(77, 1),
    )
    .unwrap();
    let cfg = MeetCfg {
        eps_residual: 1e-10,
        ..MeetCfg::default()
    };
    let out = solve_with_cfg(&bundle.lines, cfg).unwrap();
    assert_eq!(out.movements.len(), 12);
    let scale = bundle
        .lines
        .iter()
        .flat_map(|l| l.start().to_array())
        .fold(0.0_f64, |acc, c| acc.max(c.abs()));
    assert!(out.max_residual <= cfg.eps_residual * (1.0 + scale));
    let total: f64 = out.params.iter().map(LineParams::cost).sum();
    assert!((total - out.objective).abs() < 1e-12);
}
