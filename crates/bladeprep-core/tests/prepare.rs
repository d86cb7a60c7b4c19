use bladeprep_core::geom::Point3;
use bladeprep_core::model::{SectionId, Side};
use bladeprep_core::prepare::{PrepareConfig, PrepareError, Preparer};
use bladeprep_core::sections_file::read_sections;
use std::fs;
use std::path::Path;

fn write_side(dir: &Path, name: &str, rows: &[[f64; 3]]) {
    let text: String = rows
        .iter()
        .map(|r| format!("{}\t{}\t{}\n", r[0], r[1], r[2]))
        .collect();
    fs::write(dir.join(name), text).unwrap();
}

fn side_dirs(root: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let ps = root.join("ps_airfoils");
    let ss = root.join("ss_airfoils");
    fs::create_dir_all(&ps).unwrap();
    fs::create_dir_all(&ss).unwrap();
    (ps, ss)
}

#[test]
fn merges_sides_into_deduplicated_remapped_sections() {
    let root = tempfile::tempdir().unwrap();
    let (ps, ss) = side_dirs(root.path());
    write_side(&ps, "ps_section1.dat", &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    write_side(&ss, "ss_section1.dat", &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

    let out = root.path().join("b1").join("airfoil.dat");
    let prepared = Preparer::new(PrepareConfig::default())
        .run(&ps, &ss, &out, None)
        .unwrap();

    // (0,0,0) (1,0,0) | reversed SS: (0,1,0) (1,0,0), then remapped (a,b,c) -> (b,c,a).
    let expected = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 0.0),
    ];
    let id = SectionId::new(1).unwrap();
    assert_eq!(expected, prepared.sections.get(id).unwrap().points);
    assert_eq!("section1,,\n0,0,0\n0,0,1\n1,0,0\n", fs::read_to_string(&out).unwrap());
    assert_eq!(prepared.sections, read_sections(&out).unwrap());

    let report = &prepared.report;
    assert_eq!(2, report.files_read);
    assert_eq!(Side::Suction, report.reversed_side);
    assert_eq!(4, report.sections[0].raw_points);
    assert_eq!(3, report.sections[0].unique_points);
    assert_eq!(1, report.sections[0].removed_duplicates);
    assert_eq!(2, report.sections[0].curves);
    assert!(report.warnings.iter().any(|w| w.code == "guide_range_short"));
}

#[test]
fn orders_sections_numerically_with_pressure_side_first() {
    let root = tempfile::tempdir().unwrap();
    let (ps, ss) = side_dirs(root.path());
    for n in [10u32, 2, 1] {
        let z = n as f64;
        write_side(&ps, &format!("ps_section{n}.dat"), &[[0.0, 0.0, z], [1.0, 0.0, z]]);
        write_side(&ss, &format!("ss_section{n}.dat"), &[[1.0, 1.0, z], [0.5, 1.0, z]]);
    }

    let prepared = Preparer::new(PrepareConfig::default())
        .prepare(&ps, &ss, None)
        .unwrap();
    let ids: Vec<u32> = prepared.sections.iter().map(|s| s.id.number()).collect();
    assert_eq!(vec![1, 2, 10], ids);

    // Remapped x is the original y: PS (0, 0) then reversed SS (1, 1).
    let section10 = prepared.sections.get(SectionId::new(10).unwrap()).unwrap();
    let ys: Vec<f64> = section10.points.iter().map(|p| p.x).collect();
    assert_eq!(vec![0.0, 0.0, 1.0, 1.0], ys);
    assert_eq!(Point3::new(1.0, 10.0, 0.5), section10.points[2]);
}

#[test]
fn unmatched_file_name_fails_unless_skipping() {
    let root = tempfile::tempdir().unwrap();
    let (ps, ss) = side_dirs(root.path());
    write_side(&ps, "ps_section1.dat", &[[0.0, 0.0, 0.0]]);
    write_side(&ss, "ss_tip.dat", &[[1.0, 0.0, 0.0]]);

    let err = Preparer::new(PrepareConfig::default())
        .prepare(&ps, &ss, None)
        .unwrap_err();
    assert!(matches!(err, PrepareError::SectionId { .. }));

    let cfg = PrepareConfig {
        skip_unmatched: true,
        ..PrepareConfig::default()
    };
    let prepared = Preparer::new(cfg).prepare(&ps, &ss, None).unwrap();
    assert_eq!(1, prepared.report.files_read);
    assert_eq!(1, prepared.report.files_skipped);
    assert!(prepared
        .report
        .warnings
        .iter()
        .any(|w| w.code == "degenerate_section"));
}

#[test]
fn malformed_input_leaves_existing_artifact_untouched() {
    let root = tempfile::tempdir().unwrap();
    let (ps, ss) = side_dirs(root.path());
    write_side(&ps, "ps_section1.dat", &[[0.0, 0.0, 0.0]]);
    fs::write(ss.join("ss_section1.dat"), "1\tx\t3\n").unwrap();
    let out = root.path().join("airfoil.dat");
    fs::write(&out, "previous\n").unwrap();

    let err = Preparer::new(PrepareConfig::default())
        .run(&ps, &ss, &out, None)
        .unwrap_err();
    assert!(matches!(err, PrepareError::PointFile(_)));
    assert_eq!("previous\n", fs::read_to_string(&out).unwrap());
}

#[test]
fn missing_input_directory_is_reported() {
    let root = tempfile::tempdir().unwrap();
    let err = Preparer::new(PrepareConfig::default())
        .prepare(&root.path().join("ps"), &root.path().join("ss"), None)
        .unwrap_err();
    assert!(matches!(err, PrepareError::Fs(_)));
}

#[test]
fn dumps_reversed_side_before_remap() {
    let root = tempfile::tempdir().unwrap();
    let (ps, ss) = side_dirs(root.path());
    write_side(&ps, "ps_section1.dat", &[[0.0, 0.0, 0.0]]);
    write_side(&ss, "ss_section1.dat", &[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let dump = root.path().join("reverted");
    fs::create_dir_all(&dump).unwrap();
    fs::write(dump.join("stale.dat"), "").unwrap();

    Preparer::new(PrepareConfig::default())
        .prepare(&ps, &ss, Some(dump.as_path()))
        .unwrap();

    assert!(!dump.join("stale.dat").exists());
    assert!(!dump.join("revert_ps_section1.dat").exists());
    assert_eq!(
        "4\t5\t6\n1\t2\t3\n",
        fs::read_to_string(dump.join("revert_ss_section1.dat")).unwrap()
    );

    let err = Preparer::new(PrepareConfig::default())
        .prepare(&ps, &ss, Some(ss.as_path()))
        .unwrap_err();
    assert!(matches!(err, PrepareError::DumpDirIsInput(_)));
}
