//! Directory listing, cleanup and naming helpers used around the pipeline.

use chrono::{Local, NaiveDateTime};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("directory {0:?} does not exist")]
    NotFound(PathBuf),

    #[error("{0:?} is not a directory")]
    NotADirectory(PathBuf),

    #[error("access denied to {0:?}")]
    PermissionDenied(PathBuf),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    fn from_io(path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    Created,
    AlreadyExists,
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|want| want.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// Regular files directly inside `dir` whose extension is in `extensions`, sorted by name.
pub fn list_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, FsError> {
    if dir.exists() && !dir.is_dir() {
        return Err(FsError::NotADirectory(dir.to_path_buf()));
    }
    let entries = fs::read_dir(dir).map_err(|e| FsError::from_io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| FsError::from_io(dir, e))?.path();
        if path.is_file() && has_extension(&path, extensions) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    log::debug!("listed {} file(s) in {}", files.len(), dir.display());
    Ok(files)
}

/// Removes matching files directly inside `dir`; returns how many were removed.
pub fn delete_files(dir: &Path, extensions: &[&str]) -> Result<usize, FsError> {
    let files = list_files(dir, extensions)?;
    for file in &files {
        fs::remove_file(file).map_err(|e| FsError::from_io(file, e))?;
    }
    if !files.is_empty() {
        log::info!("removed {} stale file(s) from {}", files.len(), dir.display());
    }
    Ok(files.len())
}

pub fn create_dir(path: &Path) -> Result<DirStatus, FsError> {
    if path.is_dir() {
        return Ok(DirStatus::AlreadyExists);
    }
    if path.exists() {
        return Err(FsError::NotADirectory(path.to_path_buf()));
    }
    fs::create_dir_all(path).map_err(|e| FsError::from_io(path, e))?;
    log::info!("created directory {}", path.display());
    Ok(DirStatus::Created)
}

/// Sibling of `path` named `<stem>_<ddmmYYYY>_<HHMMSS>.<ext>` for the current local time.
pub fn timestamped_file_name(path: &Path) -> PathBuf {
    timestamped_file_name_at(path, Local::now().naive_local())
}

pub fn timestamped_file_name_at(path: &Path, at: NaiveDateTime) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stamp = at.format("%d%m%Y_%H%M%S");
    let name = match path.extension() {
        Some(ext) => format!("{stem}_{stamp}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{stamp}"),
    };
    path.with_file_name(name)
}
