use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use git_diffstats::{DiffStatsError, JsonOptions, logging, parse_diff, read_diff, render_json};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "git-diffstats")]
#[command(version, about = "Line statistics and numbered hunk changes from git diffs")]
struct Cli {
    /// Log parser decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full report as JSON (e.g., `git diff | git-diffstats report`)
    Report {
        /// Diff file to read; stdin when omitted or "-"
        file: Option<PathBuf>,
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
        /// Only counts and change types, no hunks
        #[arg(long)]
        no_hunks: bool,
    },
    /// Print a `git diff --stat` style summary
    Stat {
        /// Diff file to read; stdin when omitted or "-"
        file: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Generate a roff man page
    Man,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), DiffStatsError> {
    logging::init_tracing(cli.verbose).map_err(|e| DiffStatsError::LoggingFailed {
        message: e.to_string(),
    })?;

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Report {
            file,
            pretty,
            no_hunks,
        } => {
            let report = parse_diff(read_diff(file.as_deref())?.as_str());
            let json = render_json(
                &report,
                JsonOptions {
                    pretty,
                    summary_only: no_hunks,
                },
            )?;
            writeln!(stdout, "{}", json).map_err(write_failed)?;
        }
        Commands::Stat { file } => {
            let report = parse_diff(read_diff(file.as_deref())?.as_str());
            writeln!(stdout, "{}", report).map_err(write_failed)?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "git-diffstats", &mut stdout);
        }
        Commands::Man => {
            clap_mangen::Man::new(Cli::command())
                .render(&mut stdout)
                .map_err(|e| DiffStatsError::ManPageFailed {
                    message: e.to_string(),
                })?;
        }
    }

    Ok(())
}

fn write_failed(e: std::io::Error) -> DiffStatsError {
    DiffStatsError::WriteFailed {
        message: e.to_string(),
    }
}
