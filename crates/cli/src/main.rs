use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use linemeet::rand3::{draw_bundle, BundleCfg, ReplayToken};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod figure;
mod io;
mod provenance;

use io::{LineRecord, MeetingRecord};
use provenance::Payload;

#[derive(Parser)]
#[command(name = "linemeet-cli")]
#[command(about = "Minimal-displacement line meeting: solve, plot data, random inputs")]
struct Cmd {
    /// Optional run label; propagated to logs and provenance sidecars
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve for the common point; input is .json, .csv or .parquet
    Solve {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Export polylines and movement arrows for an external plotter
    Figure {
        #[arg(long)]
        from: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Half-length of each drawn line
        #[arg(long, default_value_t = 100.0)]
        line_length: f64,
        /// Samples per half-line
        #[arg(long, default_value_t = 100)]
        samples: usize,
    },
    /// Write a random line bundle as JSON
    Gen {
        #[arg(long, default_value_t = 4)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        /// Maximum perpendicular offset of each line from the bundle center
        #[arg(long, default_value_t = 0.5)]
        noise: f64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve { input, out } => solve(input, out, cmd.tag),
        Action::Figure {
            from,
            out,
            line_length,
            samples,
        } => figure(from, out, line_length, samples, cmd.tag),
        Action::Gen {
            count,
            seed,
            index,
            noise,
            out,
        } => generate(count, seed, index, noise, out, cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn solve(input: PathBuf, out: PathBuf, tag: Option<String>) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), tag = ?tag, "solve");
    let lines = io::read_lines(&input)?;
    tracing::info!(lines = lines.len(), "input_lines");
    let meeting = linemeet::solve(&lines)
        .with_context(|| format!("solving {} lines from {}", lines.len(), input.display()))?;
    tracing::info!(
        objective = meeting.objective,
        max_residual = meeting.max_residual,
        point = ?meeting.point.to_array(),
        "solved"
    );
    io::write_json(&out, &MeetingRecord::new(&lines, &meeting))?;
    let payload = Payload::new(
        "solve",
        json!({
            "input": input.to_string_lossy(),
            "lines": lines.len(),
            "objective": meeting.objective
        }),
        tag,
    );
    provenance::write_sidecar(&out, payload)?;
    Ok(())
}

fn figure(
    from: PathBuf,
    out: PathBuf,
    line_length: f64,
    samples: usize,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(from = %from.display(), out = %out.display(), line_length, samples, "figure");
    let rec = io::read_meeting(&from)?;
    let fig = figure::build_figure(&rec, line_length, samples);
    io::write_json(&out, &fig)?;
    let payload = Payload::new(
        "figure",
        json!({
            "from": from.to_string_lossy(),
            "line_length": line_length,
            "samples": samples
        }),
        tag,
    );
    provenance::write_sidecar(&out, payload)?;
    Ok(())
}

fn generate(
    count: usize,
    seed: u64,
    index: u64,
    noise: f64,
    out: PathBuf,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(count, seed, index, noise, out = %out.display(), "gen");
    let cfg = BundleCfg {
        lines: count,
        noise,
        ..BundleCfg::default()
    };
    let bundle = draw_bundle(cfg, ReplayToken::new(seed, index))?;
    let records: Vec<LineRecord> = bundle.lines.iter().map(LineRecord::from).collect();
    io::write_json(&out, &records)?;
    let payload = Payload::new(
        "gen",
        json!({
            "count": count,
            "seed": seed,
            "index": index,
            "noise": noise,
            "center": bundle.center.to_array()
        }),
        tag,
    );
    provenance::write_sidecar(&out, payload)?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let doc = Payload::new("report", json!({}), tag).to_json(&[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
