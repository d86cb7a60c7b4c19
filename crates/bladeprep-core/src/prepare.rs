use crate::aggregate::build_sections;
use crate::fsutil::{self, FsError};
use crate::geom::BBox3;
use crate::guide::{min_guide_points, GuideConfig};
use crate::model::{SectionId, SectionIdError, SectionSet, Side, SideCurve};
use crate::normalize::{dedup_in_place, remap_axes, reverse_curve};
use crate::points_file::{read_points, write_points, PointFileError, ReadConfig};
use crate::report::{PrepareReport, SectionReport, Warning};
use crate::sections_file::{write_sections, SectionsFileError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fewer unique points than this cannot make a closed spline.
pub const MIN_SECTION_POINTS: usize = 3;

#[derive(Debug, Error)]
pub enum PrepareError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("cannot assign {path:?} to a section: {source}")]
    SectionId {
        path: PathBuf,
        #[source]
        source: SectionIdError,
    },

    #[error(transparent)]
    PointFile(#[from] PointFileError),

    #[error(transparent)]
    SectionsFile(#[from] SectionsFileError),

    #[error("dump directory {0:?} holds input files; refusing to clear it")]
    DumpDirIsInput(PathBuf),

    #[error("no side-curve files found in {ps_dir:?} or {ss_dir:?}")]
    NoInput { ps_dir: PathBuf, ss_dir: PathBuf },
}

#[derive(Debug, Clone)]
pub struct PrepareConfig {
    pub extensions: Vec<String>,
    /// The side captured against the common traversal direction.
    pub reversed_side: Side,
    /// Skip (with a warning) files without a `sectionN` tag instead of failing.
    pub skip_unmatched: bool,
    pub read: ReadConfig,
    pub guide: GuideConfig,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["dat".to_string()],
            reversed_side: Side::Suction,
            skip_unmatched: false,
            read: ReadConfig::default(),
            guide: GuideConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub section: SectionId,
    pub side: Side,
}

#[derive(Debug, Clone)]
pub struct Prepared {
    pub sections: SectionSet,
    pub report: PrepareReport,
}

/// Reverses the curve if it belongs to `reversed_side`, then remaps its axes.
pub fn orient_curve(mut curve: SideCurve, reversed_side: Side) -> SideCurve {
    if curve.side == reversed_side {
        curve.points = reverse_curve(&curve.points);
    }
    curve.points = remap_axes(&curve.points);
    curve
}

/// Aggregates oriented curves, deduplicates each section and collects per-section diagnostics.
pub fn assemble_sections(
    curves: &[SideCurve],
    guide: &GuideConfig,
) -> (SectionSet, Vec<SectionReport>, Vec<Warning>) {
    let raw = build_sections(curves);
    let min_guide = min_guide_points(guide);

    let mut reports = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();
    let sections = raw.map_points(|mut points| {
        let stats = dedup_in_place(&mut points);
        reports.push((stats, points.len(), BBox3::of_points(&points)));
        points
    });

    let reports: Vec<SectionReport> = sections
        .iter()
        .zip(reports)
        .map(|(section, (stats, unique, extents))| {
            if unique < MIN_SECTION_POINTS {
                warnings.push(Warning::new(
                    "degenerate_section",
                    format!("{} has only {unique} distinct point(s).", section.id),
                ));
            } else if unique < min_guide {
                warnings.push(Warning::new(
                    "guide_range_short",
                    format!(
                        "{} has {unique} points; guide extraction needs at least {min_guide}.",
                        section.id
                    ),
                ));
            }
            SectionReport {
                id: section.id,
                curves: curves.iter().filter(|c| c.section == section.id).count(),
                raw_points: stats.input_points,
                unique_points: unique,
                removed_duplicates: stats.removed_duplicates,
                extents,
            }
        })
        .collect();

    (sections, reports, warnings)
}

pub struct Preparer {
    cfg: PrepareConfig,
}

impl Preparer {
    pub fn new(cfg: PrepareConfig) -> Self {
        Self { cfg }
    }

    /// Lists both side directories. Pressure-side files come first; each side is
    /// ordered by section number, then file name.
    pub fn discover(
        &self,
        ps_dir: &Path,
        ss_dir: &Path,
    ) -> Result<(Vec<SourceFile>, Vec<Warning>), PrepareError> {
        let extensions: Vec<&str> = self.cfg.extensions.iter().map(String::as_str).collect();
        let mut sources = Vec::new();
        let mut warnings = Vec::new();

        for (dir, side) in [(ps_dir, Side::Pressure), (ss_dir, Side::Suction)] {
            let mut side_sources = Vec::new();
            for path in fsutil::list_files(dir, &extensions)? {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                match SectionId::from_file_name(&name) {
                    Ok(section) => side_sources.push(SourceFile {
                        path,
                        section,
                        side,
                    }),
                    Err(source) if self.cfg.skip_unmatched => {
                        warnings.push(Warning::new(
                            "unmatched_file_name",
                            format!("Skipped {}: {source}.", path.display()),
                        ));
                    }
                    Err(source) => return Err(PrepareError::SectionId { path, source }),
                }
            }
            side_sources.sort_by(|a, b| {
                a.section
                    .cmp(&b.section)
                    .then_with(|| a.path.file_name().cmp(&b.path.file_name()))
            });
            sources.extend(side_sources);
        }

        if sources.is_empty() {
            return Err(PrepareError::NoInput {
                ps_dir: ps_dir.to_path_buf(),
                ss_dir: ss_dir.to_path_buf(),
            });
        }
        Ok((sources, warnings))
    }

    /// Reads every source file. Reversed-side curves are optionally dumped as
    /// `revert_<name>` into `dump_dir` before the axis remap.
    pub fn load_curves(
        &self,
        sources: &[SourceFile],
        dump_dir: Option<&Path>,
    ) -> Result<Vec<SideCurve>, PrepareError> {
        if let Some(dir) = dump_dir {
            if sources
                .iter()
                .any(|src| src.path.parent().is_some_and(|p| same_dir(p, dir)))
            {
                return Err(PrepareError::DumpDirIsInput(dir.to_path_buf()));
            }
            fsutil::create_dir(dir)?;
            let extensions: Vec<&str> = self.cfg.extensions.iter().map(String::as_str).collect();
            fsutil::delete_files(dir, &extensions)?;
        }

        let mut curves = Vec::with_capacity(sources.len());
        for src in sources {
            let points = read_points(&src.path, &self.cfg.read)?;
            log::debug!(
                "read {} point(s) for {} {} from {}",
                points.len(),
                src.section,
                src.side,
                src.path.display()
            );
            let curve = SideCurve {
                section: src.section,
                side: src.side,
                source: src.path.clone(),
                points,
            };

            if let (Some(dir), true) = (dump_dir, src.side == self.cfg.reversed_side) {
                let name = src
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                write_points(
                    &dir.join(format!("revert_{name}")),
                    &reverse_curve(&curve.points),
                    '\t',
                )?;
            }

            curves.push(orient_curve(curve, self.cfg.reversed_side));
        }
        Ok(curves)
    }

    /// Runs discovery, reading and assembly without touching the output artifact.
    pub fn prepare(
        &self,
        ps_dir: &Path,
        ss_dir: &Path,
        dump_dir: Option<&Path>,
    ) -> Result<Prepared, PrepareError> {
        let (sources, mut warnings) = self.discover(ps_dir, ss_dir)?;
        let curves = self.load_curves(&sources, dump_dir)?;
        let (sections, section_reports, section_warnings) =
            assemble_sections(&curves, &self.cfg.guide);
        warnings.extend(section_warnings);

        let files_skipped = warnings
            .iter()
            .filter(|w| w.code == "unmatched_file_name")
            .count();
        Ok(Prepared {
            sections,
            report: PrepareReport {
                reversed_side: self.cfg.reversed_side,
                files_read: sources.len(),
                files_skipped,
                sections: section_reports,
                warnings,
            },
        })
    }

    /// Full run: prepare, then replace the artifact at `output`.
    pub fn run(
        &self,
        ps_dir: &Path,
        ss_dir: &Path,
        output: &Path,
        dump_dir: Option<&Path>,
    ) -> Result<Prepared, PrepareError> {
        let prepared = self.prepare(ps_dir, ss_dir, dump_dir)?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fsutil::create_dir(parent)?;
        }
        write_sections(output, &prepared.sections)?;
        log::info!(
            "wrote {} section(s) to {}",
            prepared.sections.len(),
            output.display()
        );
        Ok(prepared)
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
