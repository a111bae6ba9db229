mod display;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use schedulex_core::config::{load_config, AnalyzerConfig};
use schedulex_core::pipeline::{analyze_bytes, parse_schedule_bytes};
use schedulex_core::FormatError;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_FILE: &str = ".schedulex.toml";

#[derive(Parser)]
#[command(
    name = "schedulex",
    version,
    about = "ScheduleX — Programme milestone extractor & contract compliance checker",
    long_about = "Read an XML programme export, extract its milestones and check them against \
        contractual schedule obligations (key dates, delays, completion date impact)."
)]
struct Cli {
    /// Emit logs as JSON (filter with RUST_LOG)
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract milestones and report compliance issues
    Analyze {
        /// Path to a programme XML file or a directory of them
        path: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Configuration file (defaults to .schedulex.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Assess the programme as of this date (YYYY-MM-DD) instead of now
        #[arg(long)]
        as_of: Option<String>,
    },

    /// List the milestones extracted from a programme
    Milestones {
        /// Path to a programme XML file or a directory of them
        path: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Configuration file (defaults to .schedulex.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Assess the programme as of this date (YYYY-MM-DD) instead of now
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    match cli.command {
        Commands::Analyze { path, format, config, as_of } => {
            cmd_analyze(&path, &format, config.as_deref(), as_of.as_deref())
        }
        Commands::Milestones { path, format, config, as_of } => {
            cmd_milestones(&path, &format, config.as_deref(), as_of.as_deref())
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "schedulex", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                load_config(default)
            } else {
                Ok(AnalyzerConfig::default())
            }
        }
    }
}

fn resolve_now(as_of: Option<&str>) -> Result<DateTime<Utc>> {
    match as_of {
        Some(text) => {
            let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .with_context(|| format!("Invalid --as-of date '{}', expected YYYY-MM-DD", text))?;
            date.and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc())
                .context("Invalid --as-of date")
        }
        None => Ok(Utc::now()),
    }
}

fn discover_schedule_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if path.is_dir() {
        let pattern = format!("{}/**/*.xml", path.display());
        let mut files: Vec<PathBuf> = glob::glob(&pattern)
            .context("Failed to read glob pattern")?
            .filter_map(|r| r.ok())
            .collect();
        files.sort();
        return Ok(files);
    }

    anyhow::bail!("Path '{}' does not exist", path.display());
}

fn read_schedule(file: &Path) -> Result<Vec<u8>> {
    std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn cmd_analyze(path: &Path, format: &str, config: Option<&Path>, as_of: Option<&str>) -> Result<()> {
    let config = resolve_config(config)?;
    let now = resolve_now(as_of)?;
    let files = discover_schedule_files(path)?;

    if files.is_empty() {
        anyhow::bail!(
            "No programme files found at '{}'. \
            Make sure the path points to an XML programme export or a directory of them.",
            path.display()
        );
    }

    for file in &files {
        let bytes = read_schedule(file)?;
        let report = match analyze_bytes(&bytes, &config, now) {
            Ok(report) => report,
            Err(err) => {
                report_format_error(file, &err, files.len())?;
                continue;
            }
        };

        match format {
            "json" => println!("{}", serde_json::to_string_pretty(&report)?),
            _ => display::print_schedule_report(file, &report),
        }
    }

    Ok(())
}

fn cmd_milestones(path: &Path, format: &str, config: Option<&Path>, as_of: Option<&str>) -> Result<()> {
    let config = resolve_config(config)?;
    let now = resolve_now(as_of)?;
    let files = discover_schedule_files(path)?;

    if files.is_empty() {
        anyhow::bail!("No programme files found at '{}'", path.display());
    }

    for file in &files {
        let bytes = read_schedule(file)?;
        let milestones = match parse_schedule_bytes(&bytes, &config, now) {
            Ok(milestones) => milestones,
            Err(err) => {
                report_format_error(file, &err, files.len())?;
                continue;
            }
        };

        match format {
            "json" => println!("{}", serde_json::to_string_pretty(&milestones)?),
            _ => display::print_milestones(file, &milestones),
        }
    }

    Ok(())
}

/// A single unreadable file fails the command; in a directory scan it is
/// reported and skipped.
fn report_format_error(file: &Path, err: &FormatError, file_count: usize) -> Result<()> {
    if file_count == 1 {
        return Err(err.clone())
            .with_context(|| format!("{} is not a recognized schedule document", file.display()));
    }
    display::print_format_error(file, err);
    Ok(())
}
