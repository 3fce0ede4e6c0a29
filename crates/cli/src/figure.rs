//! Plot-ready data for a solved meeting.
//!
//! The plotting tool itself lives outside this repo; we only emit polylines
//! and arrows. Each input line is drawn through `point - movement` (its
//! original position), each displaced line through `point`, and each arrow
//! runs from `point - movement` to `point`.

use linemeet::Vec3;
use serde::Serialize;

use crate::io::MeetingRecord;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Arrow {
    pub tail: [f64; 3],
    pub tip: [f64; 3],
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Figure {
    pub intersection_point: [f64; 3],
    pub original_lines: Vec<Vec<[f64; 3]>>,
    pub displaced_lines: Vec<Vec<[f64; 3]>>,
    pub movement_arrows: Vec<Arrow>,
}

/// `2 · samples + 1` points `anchor + direction · t`, t from `-length` to `length`.
pub fn sample_line(anchor: Vec3, direction: Vec3, length: f64, samples: usize) -> Vec<[f64; 3]> {
    let samples = samples.max(1);
    let step = length / samples as f64;
    let n = samples as i64;
    (-n..=n)
        .map(|i| (anchor + direction * (step * i as f64)).to_array())
        .collect()
}

pub fn build_figure(rec: &MeetingRecord, line_length: f64, samples: usize) -> Figure {
    let point = rec.point();
    let mut original_lines = Vec::with_capacity(rec.lines.len());
    let mut displaced_lines = Vec::with_capacity(rec.lines.len());
    let mut movement_arrows = Vec::with_capacity(rec.lines.len());
    for (line, movement) in rec.lines.iter().zip(&rec.movement_vectors) {
        let direction = Vec3::from(line.direction);
        let tail = point - Vec3::from(*movement);
        original_lines.push(sample_line(tail, direction, line_length, samples));
        displaced_lines.push(sample_line(point, direction, line_length, samples));
        movement_arrows.push(Arrow {
            tail: tail.to_array(),
            tip: point.to_array(),
        });
    }
    Figure {
        intersection_point: rec.intersection_point,
        original_lines,
        displaced_lines,
        movement_arrows,
    }
}
