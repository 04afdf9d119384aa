mod formatter;

use anyhow::{bail, Result};
use aspire::decode::matches_predicate;
use aspire::{Solver, SolverConfig};
use clap::{Args, Parser, Subcommand};
use formatter::{Formatter, GroundReport};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "aspire")]
#[command(about = "Run answer-set programs through clingo and read the answers.")]
#[command(
    long_about = "Aspire loads .lp programs, runs them through an external stable-model solver (clingo by default, or $ASPIRE_SOLVER)\nand prints the answer sets, grounded atoms or diagnostics."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the program text comes from
#[derive(Args)]
struct Sources {
    /// Program files to load, in order
    files: Vec<PathBuf>,
    /// Also load every .lp file under this directory
    #[arg(short = 'd', long = "dir")]
    workdir: Option<PathBuf>,
}

#[derive(Args)]
struct SolverArgs {
    /// Solver executable (default: $ASPIRE_SOLVER, then clingo on PATH)
    #[arg(long)]
    solver: Option<PathBuf>,
}

impl SolverArgs {
    fn solver(&self) -> Solver {
        let mut config = SolverConfig::default();
        if let Some(executable) = &self.solver {
            config = config.with_executable(executable);
        }
        Solver::with_config(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the program and print its answer sets
    ///
    /// With optimization statements, the last answer printed is the best one found.
    Solve {
        #[command(flatten)]
        sources: Sources,
        #[command(flatten)]
        solver: SolverArgs,
        /// Give up after this many seconds; the result is then unknown
        #[arg(short = 't', long)]
        timeout: Option<u64>,
        /// Number of answer sets to compute (0 for all)
        #[arg(short = 'n', long)]
        models: Option<u32>,
        /// Extra option passed to the solver as-is (repeatable)
        ///
        /// Examples: -o --opt-mode=optN, -o --parallel-mode=4
        #[arg(short = 'o', long = "option", allow_hyphen_values = true)]
        options: Vec<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that the program parses and grounds
    Check {
        #[command(flatten)]
        sources: Sources,
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// List the atoms of the ground program
    ///
    /// Grounds without solving, so this shows every atom that could be true.
    Ground {
        #[command(flatten)]
        sources: Sources,
        #[command(flatten)]
        solver: SolverArgs,
        /// Only list atoms of this predicate
        #[arg(short = 'p', long)]
        predicate: Option<String>,
        /// Print the atoms as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "aspire=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Solve {
            sources,
            solver,
            timeout,
            models,
            options,
            json,
        } => solve_command(sources, solver, *timeout, *models, options, *json),
        Commands::Check { sources, solver } => check_command(sources, solver),
        Commands::Ground {
            sources,
            solver,
            predicate,
            json,
        } => ground_command(sources, solver, predicate.as_deref(), *json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn solve_command(
    sources: &Sources,
    solver: &SolverArgs,
    timeout: Option<u64>,
    models: Option<u32>,
    options: &[String],
    json: bool,
) -> Result<()> {
    let (text, _) = load_program(sources)?;

    let mut options = options.to_vec();
    if let Some(models) = models {
        options.push(format!("--models={}", models));
    }
    let timeout = timeout.map(Duration::from_secs);

    let result = solver.solver().solve_text(&text, &options, timeout)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", Formatter::default().format_solve_result(&result));
    }

    Ok(())
}

fn check_command(sources: &Sources, solver: &SolverArgs) -> Result<()> {
    let (text, file_count) = load_program(sources)?;
    solver.solver().check_text(&text)?;
    println!("OK: {} file(s) parsed and grounded", file_count);
    Ok(())
}

fn ground_command(
    sources: &Sources,
    solver: &SolverArgs,
    predicate: Option<&str>,
    json: bool,
) -> Result<()> {
    let (text, _) = load_program(sources)?;
    let atoms: Vec<String> = solver
        .solver()
        .ground_atoms(&text)?
        .into_iter()
        .filter(|atom| predicate.map_or(true, |p| matches_predicate(p, atom)))
        .collect();

    let report = GroundReport {
        predicate: predicate.map(str::to_string),
        atoms,
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", Formatter::default().format_ground_report(&report));
    }

    Ok(())
}

/// Concatenate the given files and every .lp file under the directory
fn load_program(sources: &Sources) -> Result<(String, usize)> {
    let mut paths = sources.files.clone();
    if let Some(workdir) = &sources.workdir {
        paths.extend(find_programs(workdir)?);
    }
    if paths.is_empty() {
        bail!("No program given: pass .lp files or --dir");
    }

    let mut text = String::new();
    for path in &paths {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", path.display(), e))?;
        text.push_str(&content);
        if !content.ends_with('\n') {
            text.push('\n');
        }
    }
    Ok((text, paths.len()))
}

fn find_programs(workdir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(workdir).sort_by_file_name() {
        let entry = entry?;
        if entry.path().extension().and_then(|s| s.to_str()) == Some("lp") {
            paths.push(entry.path().to_path_buf());
        }
    }
    if paths.is_empty() {
        bail!("No .lp files found under {}", workdir.display());
    }
    Ok(paths)
}
