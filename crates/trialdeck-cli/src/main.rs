//! trialdeck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "trialdeck",
    version,
    about = "Deterministic trial partitioning for human eval corpora"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the trial assignment table from a corpus
    Generate {
        /// Path to the corpus root directory
        #[arg(long)]
        corpus: PathBuf,

        /// Output path for the trial set JSON
        #[arg(long, default_value = "trials.json")]
        output: PathBuf,

        /// Shuffle seed override
        #[arg(long)]
        seed: Option<u64>,

        /// Number of trials override
        #[arg(long)]
        trial_count: Option<u32>,

        /// Test cases per trial override
        #[arg(long)]
        trial_size: Option<usize>,

        /// Also write an embedded JavaScript data file
        #[arg(long)]
        embed_js: Option<PathBuf>,

        /// Also write an HTML summary report
        #[arg(long)]
        html: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Verify corpus coverage of a generated trial set
    Verify {
        /// Path to the corpus root directory
        #[arg(long)]
        corpus: PathBuf,

        /// Trial set JSON to verify
        #[arg(long, default_value = "trials.json")]
        trials: PathBuf,

        /// Exit code 1 if any test case is uncovered
        #[arg(long)]
        fail_on_uncovered: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the assignments of a single trial
    Show {
        /// Trial set JSON to read
        #[arg(long, default_value = "trials.json")]
        trials: PathBuf,

        /// Trial number (1-based)
        #[arg(long)]
        trial: u32,
    },

    /// Validate a corpus directory and report malformed entries
    Validate {
        /// Path to the corpus root directory
        #[arg(long)]
        corpus: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Re-grade a submissions export against its reference grids
    Grade {
        /// Submissions JSON export
        #[arg(long)]
        submissions: PathBuf,

        /// Exit code 1 if a stored verdict disagrees with re-grading
        #[arg(long)]
        fail_on_mismatch: bool,
    },

    /// Create a starter trialdeck.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trialdeck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            corpus,
            output,
            seed,
            trial_count,
            trial_size,
            embed_js,
            html,
            config,
        } => commands::generate::execute(
            corpus,
            output,
            seed,
            trial_count,
            trial_size,
            embed_js,
            html,
            config,
        ),
        Commands::Verify {
            corpus,
            trials,
            fail_on_uncovered,
            config,
        } => commands::verify::execute(corpus, trials, fail_on_uncovered, config),
        Commands::Show { trials, trial } => commands::show::execute(trials, trial),
        Commands::Validate { corpus, config } => commands::validate::execute(corpus, config),
        Commands::Grade {
            submissions,
            fail_on_mismatch,
        } => commands::grade::execute(submissions, fail_on_mismatch),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
