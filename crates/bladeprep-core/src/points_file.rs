//! Delimited x/y/z point files, one point per row.

use crate::geom::Point3;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PointFileError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path:?} line {line}: expected 3 columns, found {found}")]
    MissingColumns {
        path: PathBuf,
        line: u64,
        found: usize,
    },

    #[error("{path:?} line {line}: {value:?} is not a finite number")]
    BadNumber {
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ReadConfig {
    pub delimiter: u8,
    /// Number of physical lines at the top of the file to skip, blank and comment lines included.
    pub first_line: usize,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            first_line: 0,
        }
    }
}

/// Reads the first three columns of every row as a point, in file order.
pub fn read_points(path: &Path, cfg: &ReadConfig) -> Result<Vec<Point3>, PointFileError> {
    let file = File::open(path).map_err(|source| PointFileError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .delimiter(cfg.delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(BufReader::new(file));

    let mut points = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|source| PointFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map_or(row as u64 + 1, |p| p.line());
        if line <= cfg.first_line as u64 {
            continue;
        }

        // Whitespace-padded files can leave empty fields between delimiters.
        let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).take(3).collect();
        if fields.len() < 3 {
            return Err(PointFileError::MissingColumns {
                path: path.to_path_buf(),
                line,
                found: fields.len(),
            });
        }

        let mut xyz = [0.0f64; 3];
        for (slot, raw) in xyz.iter_mut().zip(&fields) {
            *slot = parse_coord(raw).ok_or_else(|| PointFileError::BadNumber {
                path: path.to_path_buf(),
                line,
                value: raw.to_string(),
            })?;
        }
        points.push(Point3::from(xyz));
    }
    Ok(points)
}

pub(crate) fn parse_coord(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Writes points as `x<delim>y<delim>z` rows, truncating any existing file.
pub fn write_points(path: &Path, points: &[Point3], delimiter: char) -> Result<(), PointFileError> {
    let write_err = |source| PointFileError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    for p in points {
        writeln!(out, "{}{delimiter}{}{delimiter}{}", p.x, p.y, p.z).map_err(write_err)?;
    }
    out.flush().map_err(write_err)
}
