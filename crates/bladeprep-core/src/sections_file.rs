//! The section artifact: a `<id>,,` header line per section followed by `x,y,z` lines.

use crate::geom::Point3;
use crate::model::{Section, SectionId, SectionSet};
use crate::points_file::parse_coord;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SectionsFileError {
    #[error("failed to remove existing {path:?}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

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

    #[error("{path:?} line {line}: point before any section header")]
    PointBeforeHeader { path: PathBuf, line: u64 },

    #[error("{path:?} line {line}: expected `x,y,z` or a section header, got {text:?}")]
    BadRow {
        path: PathBuf,
        line: u64,
        text: String,
    },

    #[error("{path:?} line {line}: section {id} declared twice")]
    DuplicateHeader {
        path: PathBuf,
        line: u64,
        id: SectionId,
    },
}

/// Renders the artifact text. Coordinates use shortest round-trip formatting.
pub fn render_sections(sections: &SectionSet) -> String {
    let mut out = String::new();
    for section in sections {
        let _ = writeln!(out, "{},,", section.id);
        for p in &section.points {
            let _ = writeln!(out, "{},{},{}", p.x, p.y, p.z);
        }
    }
    out
}

/// Deletes any existing artifact at `path`, then writes `sections` in set order.
pub fn write_sections(path: &Path, sections: &SectionSet) -> Result<(), SectionsFileError> {
    if path.is_file() {
        fs::remove_file(path).map_err(|source| SectionsFileError::Remove {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let write_err = |source| SectionsFileError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    out.write_all(render_sections(sections).as_bytes())
        .map_err(write_err)?;
    out.flush().map_err(write_err)
}

pub fn read_sections(path: &Path) -> Result<SectionSet, SectionsFileError> {
    let file = File::open(path).map_err(|source| SectionsFileError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let mut sections: Vec<Section> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| SectionsFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map_or(0, |p| p.line());

        if let Some(id) = header_id(&record) {
            if sections.iter().any(|s| s.id == id) {
                return Err(SectionsFileError::DuplicateHeader {
                    path: path.to_path_buf(),
                    line,
                    id,
                });
            }
            sections.push(Section {
                id,
                points: Vec::new(),
            });
            continue;
        }

        let point = point_row(&record).ok_or_else(|| SectionsFileError::BadRow {
            path: path.to_path_buf(),
            line,
            text: record.iter().collect::<Vec<_>>().join(","),
        })?;
        let current = sections
            .last_mut()
            .ok_or_else(|| SectionsFileError::PointBeforeHeader {
                path: path.to_path_buf(),
                line,
            })?;
        current.points.push(point);
    }

    Ok(SectionSet::from_unique(sections))
}

fn header_id(record: &StringRecord) -> Option<SectionId> {
    let mut fields = record.iter();
    let id = SectionId::parse_label(fields.next()?).ok()?;
    fields.all(str::is_empty).then_some(id)
}

fn point_row(record: &StringRecord) -> Option<Point3> {
    if record.len() != 3 {
        return None;
    }
    Some(Point3::new(
        parse_coord(&record[0])?,
        parse_coord(&record[1])?,
        parse_coord(&record[2])?,
    ))
}
