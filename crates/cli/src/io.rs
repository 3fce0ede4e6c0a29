//! Line input (JSON, CSV, Parquet) and result records (JSON).

use anyhow::{anyhow, bail, Context, Result};
use linemeet::{Line3, Meeting, Vec3};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CSV/Parquet column names, in `Line3` order.
pub const COLUMNS: [&str; 6] = ["sx", "sy", "sz", "dx", "dy", "dz"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LineRecord {
    pub start: [f64; 3],
    pub direction: [f64; 3],
}

impl LineRecord {
    pub fn to_line(&self) -> Result<Line3> {
        Line3::new(self.start.into(), self.direction.into())
            .map_err(|e| anyhow!("line {:?} + t·{:?}: {e}", self.start, self.direction))
    }
}

impl From<&Line3> for LineRecord {
    fn from(l: &Line3) -> Self {
        Self {
            start: l.start().to_array(),
            direction: l.direction().to_array(),
        }
    }
}

/// Solve output as written by `solve` and read back by `figure`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MeetingRecord {
    pub lines: Vec<LineRecord>,
    pub intersection_point: [f64; 3],
    pub movement_vectors: Vec<[f64; 3]>,
    pub extensions: Vec<f64>,
    pub objective: f64,
    pub max_residual: f64,
}

impl MeetingRecord {
    pub fn new(lines: &[Line3], meeting: &Meeting) -> Self {
        Self {
            lines: lines.iter().map(LineRecord::from).collect(),
            intersection_point: meeting.point.to_array(),
            movement_vectors: meeting.movements.iter().map(|m| m.to_array()).collect(),
            extensions: meeting.params.iter().map(|p| p.extension).collect(),
            objective: meeting.objective,
            max_residual: meeting.max_residual,
        }
    }

    pub fn point(&self) -> Vec3 {
        self.intersection_point.into()
    }

    /// Per-line fields must all have one entry per line.
    pub fn check_lengths(&self) -> Result<()> {
        let n = self.lines.len();
        if self.movement_vectors.len() != n || self.extensions.len() != n {
            bail!(
                "{n} lines but {} movement vectors and {} extensions",
                self.movement_vectors.len(),
                self.extensions.len()
            );
        }
        Ok(())
    }
}

/// Read lines; format chosen by extension (`.json`, `.csv`, `.parquet`).
pub fn read_lines(path: &Path) -> Result<Vec<Line3>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let records = match ext.as_deref() {
        Some("json") => {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_slice::<Vec<LineRecord>>(&bytes)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        Some("csv") => {
            let lf = LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(100))
                .finish()?;
            records_from_frame(lf)?
        }
        Some("parquet") => {
            let lf = LazyFrame::scan_parquet(path, ScanArgsParquet::default())?;
            records_from_frame(lf)?
        }
        _ => bail!("unsupported input format: {}", path.display()),
    };
    records.iter().map(LineRecord::to_line).collect()
}

fn records_from_frame(lf: LazyFrame) -> Result<Vec<LineRecord>> {
    let df = lf
        .select(
            COLUMNS
                .iter()
                .map(|&c| col(c).cast(DataType::Float64))
                .collect::<Vec<_>>(),
        )
        .collect()?;
    let mut cols = Vec::with_capacity(COLUMNS.len());
    for name in COLUMNS {
        let values = df
            .column(name)?
            .f64()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| v.ok_or_else(|| anyhow!("missing {name} in row {row}")))
            .collect::<Result<Vec<f64>>>()?;
        cols.push(values);
    }
    Ok((0..df.height())
        .map(|i| LineRecord {
            start: [cols[0][i], cols[1][i], cols[2][i]],
            direction: [cols[3][i], cols[4][i], cols[5][i]],
        })
        .collect())
}

/// Write pretty JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

pub fn read_meeting(path: &Path) -> Result<MeetingRecord> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let rec: MeetingRecord =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    rec.check_lengths()
        .with_context(|| format!("inconsistent result {}", path.display()))?;
    Ok(rec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn json_lines_are_normalized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lines.json");
        fs::write(
            &path,
            r#"[{"start":[0,0,0],"direction":[2,0,0]},{"start":[1,1,1],"direction":[0,0,-3]}]"#,
        )
        .unwrap();
        let lines = read_lines(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].direction(), Vec3::unit_x());
        assert_eq!(lines[1].direction(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn csv_lines_with_integer_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lines.csv");
        fs::write(&path, "sx,sy,sz,dx,dy,dz\n0,0,0,1,0,0\n1,1,1,0,0,-1\n").unwrap();
        let lines = read_lines(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].start(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn parquet_lines_are_normalized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lines.parquet");
        let mut df = df!(
            "sx" => [0.0, 1.0],
            "sy" => [0.0, 1.0],
            "sz" => [0.0, 1.0],
            "dx" => [2.0, 0.0],
            "dy" => [0.0, 0.0],
            "dz" => [0.0, -3.0]
        )
        .unwrap();
        let mut file = fs::File::create(&path).unwrap();
        ParquetWriter::new(&mut file).finish(&mut df).unwrap();
        let lines = read_lines(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].start(), Vec3::zeros());
        assert_eq!(lines[0].direction(), Vec3::unit_x());
        assert_eq!(lines[1].start(), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(lines[1].direction(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn zero_direction_and_unknown_format_fail() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"[{"start":[0,0,0],"direction":[0,0,0]}]"#).unwrap();
        let err = read_lines(&bad).unwrap_err().to_string();
        assert!(err.contains("zero-length"), "{err}");
        assert!(read_lines(&dir.path().join("lines.txt")).is_err());
    }

    #[test]
    fn meeting_record_roundtrip_through_file() {
        let dir = tempdir().unwrap();
        let lines = [
            Line3::new(Vec3::zeros(), Vec3::unit_x()).unwrap(),
            Line3::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.0, 0.0, -1.0)).unwrap(),
        ];
        let meeting = linemeet::solve(&lines).unwrap();
        let rec = MeetingRecord::new(&lines, &meeting);
        let path = dir.path().join("nested/out.json");
        write_json(&path, &rec).unwrap();
        let back = read_meeting(&path).unwrap();
        assert_eq!(back.lines, rec.lines);
        assert_eq!(back.movement_vectors.len(), 2);
        assert!((back.point() - rec.point()).length() < 1e-12);
        assert!((back.objective - 0.5).abs() < 1e-9);
    }

    #[test]
    fn result_with_missing_movements_is_rejected() {
        let dir = tempdir().unwrap();
        let lines = [
            Line3::new(Vec3::zeros(), Vec3::unit_x()).unwrap(),
            Line3::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.0, 0.0, -1.0)).unwrap(),
        ];
        let meeting = linemeet::solve(&lines).unwrap();
        let mut rec = MeetingRecord::new(&lines, &meeting);
        rec.movement_vectors.pop();
        let path = dir.path().join("short.json");
        write_json(&path, &rec).unwrap();
        let err = format!("{:#}", read_meeting(&path).unwrap_err());
        assert!(err.contains("2 lines but 1 movement vectors"), "{err}");
    }
}
