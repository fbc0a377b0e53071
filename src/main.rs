//! Reqmatrix: Requirements Quality Analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use reqmatrix::analyzer::{AnalysisEngine, MatchMode};
use reqmatrix::config::{build_ignore_set, is_ignored, load_config, Config, CONFIG_FILENAME};
use reqmatrix::reporter::{ConsoleReporter, HtmlReporter, JsonReporter};
use reqmatrix::watcher::{is_requirement_file, RequirementWatcher};
use reqmatrix::{AnalysisResult, Verdict};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Reqmatrix: Requirements Quality Analyzer
#[derive(Parser, Debug)]
#[command(name = "reqmatrix")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Requirements file, directory, or "-" for stdin (omit when using a subcommand)
    #[arg(required = true)]
    path: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Write a self-contained HTML report to FILE
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,

    /// Quiet mode (one line per input)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (debug logging, finding suggestions)
    #[arg(long, short)]
    verbose: bool,

    /// Exit 1 when any matrix cell is below this verdict (Poor, Fair, Sufficient, Good, Excellent)
    #[arg(long, value_name = "VERDICT")]
    fail_below: Option<Verdict>,

    /// Term matching: substring (default) or word
    #[arg(long, value_name = "MODE")]
    matching: Option<MatchMode>,

    /// Accept "- [Functional] ..." style bullet lines
    #[arg(long)]
    list_markers: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Path to config file (default: search .reqmatrixrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Watch for file changes and re-analyze
    #[arg(long)]
    watch: bool,

    /// Run analysis in parallel (default for directories with many files)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .reqmatrixrc.json with sensible defaults
    Init {
        /// Verdict floor written to failBelow (default: Fair)
        #[arg(long, value_name = "VERDICT")]
        fail_below: Option<Verdict>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("REQMATRIX_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if args.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
    init_tracing(args.verbose);

    if let Some(ref cmd) = args.command {
        match cmd {
            Commands::Init { fail_below, dir } => {
                return run_init(*fail_below, dir.as_deref());
            }
        }
    }

    let Some(path) = args.path.clone() else {
        anyhow::bail!("a path is required when not using a subcommand");
    };
    let from_stdin = path.as_os_str() == "-";

    if args.watch {
        if from_stdin {
            anyhow::bail!("--watch cannot be combined with stdin input");
        }
        return run_watch(&args, &path);
    }

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let work_dir = if from_stdin {
        cwd.clone()
    } else {
        resolve_work_dir(&path).to_path_buf()
    };

    // Load config (CLI flags override config file)
    let config = load_config(&work_dir, args.config.as_deref())?.merge_with_cli(
        args.fail_below,
        args.matching,
        args.list_markers,
    );
    let engine = AnalysisEngine::from_config(&config)?;

    let (results, had_errors) = if from_stdin {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read requirements from stdin")?;
        (vec![engine.analyze_text(&text, Path::new("-"), Some(&config))], false)
    } else {
        let ignore_set = if config.ignore.is_empty() {
            None
        } else {
            Some(build_ignore_set(&config.ignore)?)
        };
        let input_files = collect_input_files(
            &path,
            ignore_set.as_ref(),
            &config.get_input_patterns(),
        )?;

        if input_files.is_empty() {
            eprintln!("{}: No requirement files found", "Warning".yellow());
            return Ok(ExitCode::from(2));
        }

        if let Some(jobs) = args.jobs {
            rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
                .ok();
        }

        let use_parallel = args.parallel || input_files.len() > 10;
        tracing::debug!(files = input_files.len(), parallel = use_parallel, "analyzing");
        if use_parallel {
            analyze_files_parallel(&engine, &input_files, &config, args.quiet)
        } else {
            analyze_files_sequential(&engine, &input_files, &config, args.quiet)
        }
    };

    if results.is_empty() {
        eprintln!("{}: All files failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    let stats = AnalysisEngine::aggregate_stats(&results);

    if args.json {
        let reporter = JsonReporter::new().pretty();
        if results.len() == 1 {
            println!("{}", reporter.report(&results[0]));
        } else {
            println!("{}", reporter.report_with_summary(&results, &stats));
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.no_color || !std::io::stdout().is_terminal() {
            reporter = reporter.without_colors();
        }
        if args.verbose {
            reporter = reporter.verbose();
        }

        if args.quiet {
            for result in &results {
                reporter.report_quiet(result);
            }
        } else if results.len() == 1 {
            reporter.report(&results[0]);
        } else {
            reporter.report_many(&results, &stats);
        }
    }

    if let Some(ref html_path) = args.html {
        let html = HtmlReporter::new().report(&results, &stats);
        std::fs::write(html_path, html)
            .with_context(|| format!("Failed to write HTML report to {}", html_path.display()))?;
        if !args.quiet {
            eprintln!("{}: HTML report written to {}", "Info".blue(), html_path.display());
        }
    }

    // Check verdict floor (config or CLI)
    if let Some(floor) = config.fail_below {
        let failing = cells_below_floor(&results, floor);
        if !failing.is_empty() {
            if !args.quiet && !args.json {
                eprintln!(
                    "\n{}: {} cell(s) below {}",
                    "Failed".red().bold(),
                    failing.len(),
                    floor
                );
                for line in &failing {
                    eprintln!("   {}", line);
                }
            }
            return Ok(ExitCode::from(1));
        }
    }

    if had_errors {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Directory used as the start of the config search
fn resolve_work_dir(path: &Path) -> &Path {
    if path.is_file() {
        match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    } else {
        path
    }
}

/// Human-readable description of every cell under the floor, across all results
fn cells_below_floor(results: &[AnalysisResult], floor: Verdict) -> Vec<String> {
    results
        .iter()
        .flat_map(|result| {
            result
                .matrix
                .cells_below(floor)
                .into_iter()
                .map(move |(criterion, category, verdict)| {
                    format!(
                        "{}: {} / {} is {}",
                        result.source.display(),
                        criterion,
                        category.short_name(),
                        verdict
                    )
                })
        })
        .collect()
}

fn run_init(fail_below: Option<Verdict>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let floor = fail_below.unwrap_or(Verdict::Fair);

    let json = format!(
        r#"{{
  "failBelow": "{}",
  "matching": "substring",
  "stripListMarkers": false,
  "vocabulary": {{
    "mode": "extend",
    "ambiguousTerms": []
  }},
  "clarity": {{
    "minWords": 6
  }},
  "findings": {{
    "missing-action-verb": "warning",
    "missing-measurable-value": "warning",
    "ambiguous-term": "warning",
    "too-few-words": "info"
  }},
  "ignore": [
    "**/drafts/**",
    "**/archive/**"
  ]
}}
"#,
        floor
    );

    std::fs::write(&config_path, json)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {} with failBelow={}",
        "Done".green().bold(),
        config_path.display(),
        floor
    );
    Ok(ExitCode::SUCCESS)
}

fn run_watch(args: &Args, path: &Path) -> Result<ExitCode> {
    let work_dir = resolve_work_dir(path);

    let config = load_config(work_dir, args.config.as_deref())?.merge_with_cli(
        args.fail_below,
        args.matching,
        args.list_markers,
    );
    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };
    let engine = AnalysisEngine::from_config(&config)?;

    let mut reporter = ConsoleReporter::new();
    if args.no_color {
        reporter = reporter.without_colors();
    }
    if args.verbose {
        reporter = reporter.verbose();
    }

    let watcher = RequirementWatcher::watch(path, &config.get_input_patterns())
        .context("Failed to create file watcher")?;
    eprintln!("{}: Watching for changes... (Ctrl+C to stop)", "Info".blue());

    loop {
        let paths = watcher.next_changes();
        if paths.is_empty() {
            continue;
        }
        let filtered = paths.into_iter().filter(|p| {
            ignore_set
                .as_ref()
                .map(|set| !is_ignored(p, set))
                .unwrap_or(true)
        });
        for path in filtered {
            match engine.analyze(&path, Some(&config)) {
                Ok(result) => {
                    if args.quiet {
                        reporter.report_quiet(&result);
                    } else {
                        reporter.report(&result);
                    }
                }
                Err(e) => {
                    eprintln!("{}: {}: {:#}", "Error".red(), path.display(), e);
                }
            }
        }
    }
}

fn collect_input_files(
    path: &Path,
    ignore_set: Option<&globset::GlobSet>,
    input_patterns: &[&str],
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        // An explicitly named file is analyzed whatever its extension
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if entry.file_type().is_file() && is_requirement_file(file_path, input_patterns) {
            if let Some(set) = ignore_set {
                if is_ignored(file_path, set) {
                    continue;
                }
            }
            files.push(file_path.to_path_buf());
        }
    }

    // Sort for consistent output
    files.sort();

    Ok(files)
}

fn analyze_files_sequential(
    engine: &AnalysisEngine,
    files: &[PathBuf],
    config: &Config,
    quiet: bool,
) -> (Vec<AnalysisResult>, bool) {
    let mut had_errors = false;
    let mut results = Vec::with_capacity(files.len());

    for file in files {
        match engine.analyze(file, Some(config)) {
            Ok(result) => results.push(result),
            Err(e) => {
                had_errors = true;
                if !quiet {
                    eprintln!("{}: {:#}", "Error".red(), e);
                }
            }
        }
    }

    (results, had_errors)
}

fn analyze_files_parallel(
    engine: &AnalysisEngine,
    files: &[PathBuf],
    config: &Config,
    quiet: bool,
) -> (Vec<AnalysisResult>, bool) {
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    let had_errors = AtomicBool::new(false);

    // par_iter + collect keeps input order
    let results: Vec<_> = files
        .par_iter()
        .filter_map(|file| match engine.analyze(file, Some(config)) {
            Ok(result) => Some(result),
            Err(e) => {
                had_errors.store(true, Ordering::Relaxed);
                if !quiet {
                    eprintln!("{}: {:#}", "Error".red(), e);
                }
                None
            }
        })
        .collect();

    (results, had_errors.load(Ordering::Relaxed))
}
