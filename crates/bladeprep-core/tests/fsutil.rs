use bladeprep_core::fsutil::{
    create_dir, delete_files, list_files, timestamped_file_name_at, DirStatus, FsError,
};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

#[test]
fn lists_matching_files_sorted_by_name() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["b.dat", "a.DAT", "c.txt", "noext"] {
        fs::write(dir.path().join(name), "").unwrap();
    }
    fs::create_dir(dir.path().join("sub.dat")).unwrap();

    let files = list_files(dir.path(), &["dat"]).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(vec!["a.DAT", "b.dat"], names);

    let files = list_files(dir.path(), &[".txt", "dat"]).unwrap();
    assert_eq!(3, files.len());
}

#[test]
fn missing_or_non_directory_paths_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    assert!(matches!(list_files(&missing, &["dat"]), Err(FsError::NotFound(_))));

    let file = dir.path().join("plain.dat");
    fs::write(&file, "").unwrap();
    assert!(matches!(list_files(&file, &["dat"]), Err(FsError::NotADirectory(_))));
    assert!(matches!(create_dir(&file), Err(FsError::NotADirectory(_))));
}

#[test]
fn delete_files_only_touches_matching_extensions() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.dat", "b.dat", "keep.prt"] {
        fs::write(dir.path().join(name), "").unwrap();
    }
    assert_eq!(2, delete_files(dir.path(), &["dat"]).unwrap());
    assert!(dir.path().join("keep.prt").is_file());
    assert_eq!(0, delete_files(dir.path(), &["dat"]).unwrap());
}

#[test]
fn create_dir_reports_existing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("prt").join("nested");
    assert_eq!(DirStatus::Created, create_dir(&target).unwrap());
    assert_eq!(DirStatus::AlreadyExists, create_dir(&target).unwrap());
}

#[test]
fn timestamped_name_keeps_directory_and_extension() {
    let at = NaiveDate::from_ymd_opt(2024, 3, 7)
        .unwrap()
        .and_hms_opt(9, 5, 1)
        .unwrap();
    assert_eq!(
        Path::new("out/assembly_07032024_090501.json"),
        timestamped_file_name_at(Path::new("out/assembly.json"), at)
    );
    assert_eq!(
        Path::new("log_07032024_090501"),
        timestamped_file_name_at(Path::new("log"), at)
    );
}
