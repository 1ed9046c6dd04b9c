use crate::dataset::InputKind;
use crate::io::output::OutputFormat;
use crate::steps::Measure;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dovmap")]
#[command(about = "Degree-of-vulnerability classifier for regex benchmark data", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    /// -v: Report vulnerable patterns
    /// -vv: Show classification traces
    /// -vvv: Show all debug information
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by the commands that render a report.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Output format (defaults to `output.default_format`, then terminal)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Disable colored terminal output
    #[arg(long = "plain")]
    pub plain: bool,
}

/// Worker pool options.
#[derive(Args, Debug, Clone, Copy)]
pub struct ParallelArgs {
    /// Number of worker threads (0 = use the configured value or all cores)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    pub jobs: usize,

    /// Classify records sequentially
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify every pattern of a dataset and print the frequency table
    Classify {
        /// JSON-lines dataset
        input: PathBuf,

        #[command(flatten)]
        report: ReportArgs,

        #[command(flatten)]
        parallel: ParallelArgs,
    },

    /// Write each pattern with its step sequence and classification
    Annotate {
        /// JSON-lines dataset
        input: PathBuf,

        /// Annotated JSON-lines output
        output: PathBuf,

        #[command(flatten)]
        parallel: ParallelArgs,
    },

    /// Cross-tabulate the classifications of two runs over the same patterns
    Compare {
        /// Dataset of the baseline configuration (table rows)
        before: PathBuf,

        /// Dataset of the new configuration (table columns)
        after: PathBuf,

        #[command(flatten)]
        report: ReportArgs,

        #[command(flatten)]
        parallel: ParallelArgs,
    },

    /// Summarize per-pattern average steps on positive and negative inputs
    Steps {
        /// JSON-lines dataset with positive/negative inputs
        input: PathBuf,

        /// Counter to read from each run
        #[arg(long, value_enum)]
        measure: Option<Measure>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Count patterns whose steps grew between two runs
    CompareSteps {
        /// Dataset of the baseline configuration
        before: PathBuf,

        /// Dataset of the new configuration
        after: PathBuf,

        /// Input list to compare
        #[arg(long = "input-type", value_enum, default_value = "positive")]
        input_type: InputKind,

        /// Report only increases larger than this many steps
        #[arg(long)]
        threshold: Option<u64>,

        /// Counter to read from each run
        #[arg(long, value_enum)]
        measure: Option<Measure>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Append masked per-input steps and their averages to runs of the same
    /// patterns under different configurations
    Append {
        /// JSON-lines datasets with positive/negative inputs, one per configuration
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory receiving one enriched dataset per input
        #[arg(short = 'o', long = "output-dir")]
        output_dir: PathBuf,

        /// Counter to read from each run
        #[arg(long, value_enum)]
        measure: Option<Measure>,
    },

    /// Initialize a .dovmap.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
