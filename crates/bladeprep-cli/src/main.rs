use anyhow::{bail, Context, Result};
use bladeprep_core::fsutil::timestamped_file_name;
use bladeprep_core::guide::{extract_guides, GuideConfig};
use bladeprep_core::loft::{build_loft_request, LoftConfig};
use bladeprep_core::model::Side;
use bladeprep_core::points_file::ReadConfig;
use bladeprep_core::prepare::{PrepareConfig, Preparer};
use bladeprep_core::sections_file::read_sections;
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "bladeprep")]
#[command(about = "Merge pressure/suction side airfoil points into section curves and guide curves.")]
struct Cli {
    /// Log progress as well as warnings.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SideArg {
    Ps,
    Ss,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Ps => Side::Pressure,
            SideArg::Ss => Side::Suction,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the section artifact from side-curve directories.
    Prepare {
        #[arg(long)]
        ps_dir: PathBuf,
        #[arg(long)]
        ss_dir: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        report: Option<PathBuf>,
        #[arg(long)]
        dump_reoriented: Option<PathBuf>,
        #[arg(long = "extension", default_values_t = vec!["dat".to_string()])]
        extensions: Vec<String>,
        #[arg(long, value_enum, default_value_t = SideArg::Ss)]
        reverse: SideArg,
        #[arg(long)]
        skip_unmatched: bool,
        #[arg(long, default_value_t = 0)]
        first_line: usize,
    },
    /// Print the three guide curves sampled from a section artifact.
    Guides {
        input: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = 10)]
        leading_edge_offset: usize,
        #[arg(long, default_value_t = 10)]
        trailing_edge_offset: usize,
    },
    /// Write the spline/sweep hand-off document for the CAD step.
    Loft {
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = 2)]
        degree: u32,
        #[arg(long, default_value_t = 1000.0)]
        unit_scale: f64,
        #[arg(long, default_value_t = 10)]
        leading_edge_offset: usize,
        #[arg(long, default_value_t = 10)]
        trailing_edge_offset: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.cmd {
        Command::Prepare {
            ps_dir,
            ss_dir,
            output,
            report,
            dump_reoriented,
            extensions,
            reverse,
            skip_unmatched,
            first_line,
        } => {
            let cfg = PrepareConfig {
                extensions,
                reversed_side: reverse.into(),
                skip_unmatched,
                read: ReadConfig {
                    first_line,
                    ..ReadConfig::default()
                },
                ..PrepareConfig::default()
            };
            prepare(&ps_dir, &ss_dir, &output, report.as_deref(), dump_reoriented.as_deref(), cfg)
        }
        Command::Guides {
            input,
            output,
            leading_edge_offset,
            trailing_edge_offset,
        } => guides(
            &input,
            output.as_deref(),
            &GuideConfig {
                leading_edge_offset,
                trailing_edge_offset,
            },
        ),
        Command::Loft {
            input,
            output,
            degree,
            unit_scale,
            leading_edge_offset,
            trailing_edge_offset,
        } => loft(
            &input,
            &output,
            &LoftConfig { degree, unit_scale },
            &GuideConfig {
                leading_edge_offset,
                trailing_edge_offset,
            },
        ),
    }
}

fn prepare(
    ps_dir: &Path,
    ss_dir: &Path,
    output: &Path,
    report: Option<&Path>,
    dump_dir: Option<&Path>,
    cfg: PrepareConfig,
) -> Result<()> {
    ensure_input_dir(ps_dir)?;
    ensure_input_dir(ss_dir)?;

    let prepared = Preparer::new(cfg)
        .run(ps_dir, ss_dir, output, dump_dir)
        .with_context(|| format!("prepare sections: {output:?}"))?;
    for w in &prepared.report.warnings {
        warn!("[{}] {}", w.code, w.message);
    }
    info!(
        "{} file(s) -> {} section(s) in {output:?}",
        prepared.report.files_read,
        prepared.sections.len()
    );

    let json = serde_json::to_string_pretty(&prepared.report).context("serialize report")?;
    match report {
        Some(path) => write_output(path, &json).with_context(|| format!("write report: {path:?}"))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn guides(input: &Path, output: Option<&Path>, cfg: &GuideConfig) -> Result<()> {
    ensure_input_file(input)?;
    let sections = read_sections(input)?;
    let guides = extract_guides(&sections, cfg).context("extract guide curves")?;

    let json = to_json(&guides)?;
    match output {
        Some(path) => write_output(path, &json).with_context(|| format!("write guides: {path:?}"))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn loft(input: &Path, output: &Path, cfg: &LoftConfig, guide_cfg: &GuideConfig) -> Result<()> {
    ensure_input_file(input)?;
    let sections = read_sections(input)?;
    if sections.is_empty() {
        bail!("no sections in {input:?}");
    }
    let guides = extract_guides(&sections, guide_cfg).context("extract guide curves")?;
    let request = build_loft_request(&sections, &guides, cfg);

    let mut target = output.to_path_buf();
    if target.exists() {
        warn!("File {target:?} exists");
        target = timestamped_file_name(&target);
        warn!("New loft file name is {target:?}");
    }
    write_output(&target, &to_json(&request)?).with_context(|| format!("write loft: {target:?}"))?;
    info!("wrote loft request for {} section(s) to {target:?}", sections.len());
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize json")
}

fn write_output(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    std::fs::write(path, contents)
}

fn ensure_input_file(input: &Path) -> Result<()> {
    match std::fs::metadata(input) {
        Ok(meta) => {
            if meta.is_file() {
                Ok(())
            } else {
                bail!("input is not a file: {input:?}");
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            bail!("input not found: {input:?} (cwd: {cwd:?}).");
        }
        Err(err) => Err(err).with_context(|| format!("stat input: {input:?}")),
    }
}

fn ensure_input_dir(input: &Path) -> Result<()> {
    match std::fs::metadata(input) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => bail!("input is not a directory: {input:?}"),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            bail!("input directory not found: {input:?} (cwd: {cwd:?}).");
        }
        Err(err) => Err(err).with_context(|| format!("stat input: {input:?}")),
    }
}
