//! Command-line interface for smartmetrics.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::analyze::{analyze_batch, SourceFile};
use crate::config::{self, Config};
use crate::language;
use crate::report::{self, BatchSummary, SkippedFile};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Source metrics for Java, PHP and Python files.
///
/// Reports structural counts, cyclomatic complexity, a quality score and an
/// approximate program flow for every file.
#[derive(Parser)]
#[command(name = "smartmetrics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug output to stderr (overrides SMARTMETRICS_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze files or directories
    Analyze(AnalyzeArgs),
    /// Create a smartmetrics.yaml config from the template
    Init(InitArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Files or directories to analyze
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long)]
    pub format: Option<String>,

    /// Worker threads for parallel analysis
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "smartmetrics.yaml")]
    pub output: PathBuf,
}

/// Files gathered for one run.
#[derive(Debug, Default)]
pub struct Collected {
    pub files: Vec<SourceFile>,
    pub skipped: Vec<SkippedFile>,
}

/// Walk `root` for files of a supported dialect.
///
/// Entries the walk cannot read (a symlink loop, an unreadable directory)
/// come back as skipped instead of ending the walk.
pub fn collect_dir(
    root: &Path,
    config: &Config,
) -> anyhow::Result<(Vec<PathBuf>, Vec<SkippedFile>)> {
    let excluded = config.exclusion_matcher()?;
    let skip_hidden = config.should_skip_hidden();

    let mut files = Vec::new();
    let mut skipped = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(config.should_follow_links())
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            let rel = e.path().strip_prefix(root).unwrap_or(e.path());
            if excluded.is_match(rel) {
                return false;
            }
            let name = e.file_name().to_string_lossy();
            !(skip_hidden && e.file_type().is_dir() && name.starts_with('.'))
        })
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root);
                let name = display_name(path.strip_prefix(root).unwrap_or(path));
                warn!(path = %name, "walk error: {}", e);
                skipped.push(SkippedFile {
                    file_name: name,
                    reason: format!("walk error: {}", e),
                });
                continue;
            }
        };
        if entry.file_type().is_file() {
            let name = entry.file_name().to_string_lossy();
            if language::is_supported(&name) {
                files.push(entry.path().to_path_buf());
            }
        }
    }

    Ok((files, skipped))
}

fn display_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Read every input path into memory.
///
/// Directories contribute their supported files, named relative to the
/// directory. Plain files are always read, whatever their extension, so the
/// analyzer can report unsupported ones.
pub fn collect_inputs(paths: &[PathBuf], config: &Config) -> anyhow::Result<Collected> {
    let mut collected = Collected::default();

    for path in paths {
        let metadata = std::fs::metadata(path)
            .map_err(|e| anyhow::anyhow!("cannot access path {}: {}", path.display(), e))?;

        if metadata.is_dir() {
            let (files, skipped) = collect_dir(path, config)?;
            for file in files {
                let name = display_name(file.strip_prefix(path).unwrap_or(&file));
                read_input(&file, name, config, &mut collected);
            }
            collected.skipped.extend(skipped);
        } else {
            let name = path.to_string_lossy().to_string();
            read_input(path, name, config, &mut collected);
        }
    }

    debug!(
        files = collected.files.len(),
        skipped = collected.skipped.len(),
        "collected inputs"
    );
    Ok(collected)
}

fn read_input(path: &Path, name: String, config: &Config, collected: &mut Collected) {
    if let Some(limit) = config.max_file_bytes {
        if let Ok(metadata) = std::fs::metadata(path) {
            if metadata.len() > limit {
                collected.skipped.push(SkippedFile {
                    file_name: name,
                    reason: format!("larger than {} bytes", limit),
                });
                return;
            }
        }
    }

    match std::fs::read(path) {
        Ok(bytes) => collected.files.push(SourceFile::new(name, bytes)),
        Err(e) => collected.skipped.push(SkippedFile {
            file_name: name,
            reason: format!("read error: {}", e),
        }),
    }
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir()?;
    let mut config = match config::load(args.config.as_deref(), &cwd) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    // Flags take precedence over the config file
    if let Some(format) = &args.format {
        config.format = Some(format.clone());
    }
    if args.threads.is_some() {
        config.threads = args.threads;
    }

    if let Err(e) = config::validate(&config) {
        eprintln!("Error: invalid config: {}", e);
        return Ok(EXIT_ERROR);
    }

    let collected = match collect_inputs(&args.paths, &config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if collected.files.is_empty() && collected.skipped.is_empty() {
        eprintln!("Warning: no files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    info!(files = collected.files.len(), "analyzing");
    let outcomes = match config.threads {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()?
            .install(|| analyze_batch(&collected.files)),
        None => analyze_batch(&collected.files),
    };

    let summary = BatchSummary::from_outcomes(outcomes, collected.skipped);
    let path_str = args
        .paths
        .iter()
        .map(|p| p.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");

    match config.get_format() {
        "json" => report::write_json(&path_str, &summary)?,
        _ => report::write_pretty(&path_str, &summary),
    }

    if summary.has_failures() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, config::TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to adjust exclusions and output", args.output.display());
    println!("  2. Run: smartmetrics analyze . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
