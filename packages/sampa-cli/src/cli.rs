use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sampa",
    version,
    about = "SAMPA BC3 slope filter command-line tool",
    long_about = "Run the SAMPA BC3 slope filter over detector sample windows (ASCII/CSV/JSON).\n\
                  Each column of an input table is one channel; each row is one time bin."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Filter every channel of a sample file
    Filter(FilterArgs),
    /// Filter many sample files
    Batch(BatchArgs),
    /// Print the per-transition classification of one sample list
    Inspect(InspectArgs),
    /// Validate a sample file
    Validate(ValidateArgs),
    /// Show version, defaults and config location
    Info(InfoArgs),
}

/// BC3 parameters; flags override the config file
#[derive(Args, Clone, Debug, Default)]
pub struct ParamArgs {
    /// Smallest fall accepted as a real falling edge
    #[arg(long, env = "SAMPA_BC3_SLOPE_DOWN", allow_hyphen_values = true)]
    pub slope_down: Option<f64>,

    /// Smallest rise accepted as a real rising edge
    #[arg(long, env = "SAMPA_BC3_SLOPE_UP", allow_hyphen_values = true)]
    pub slope_up: Option<f64>,

    /// Half-width of the flat band around zero delta
    #[arg(long, env = "SAMPA_BC3_ROUND", allow_hyphen_values = true)]
    pub round: Option<f64>,

    /// JSON filter config (default: $SAMPA_CONFIG, then <config dir>/sampa/bc3.json)
    #[arg(long)]
    pub config: Option<String>,
}

/// Options shared by `filter` and `batch`
#[derive(Args, Clone, Debug, Default)]
pub struct FilterOptions {
    /// 0-based channel indices (default: all channels)
    #[arg(long, num_args = 1..)]
    pub channels: Option<Vec<usize>>,

    /// Samples evaluated per window (default: whole window)
    #[arg(long)]
    pub npoints: Option<usize>,

    #[command(flatten)]
    pub params: ParamArgs,

    /// Apply BC3 baseline correction and include corrected samples
    #[arg(long, default_value_t = false)]
    pub condition: bool,

    /// Zero-suppression threshold for corrected samples (implies --condition)
    #[arg(long, allow_hyphen_values = true)]
    pub threshold: Option<f64>,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Input sample file (txt, ascii, dat, csv, json)
    #[arg(long)]
    pub file: String,

    #[command(flatten)]
    pub options: FilterOptions,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Exit with code 3 when any channel is rejected
    #[arg(long, default_value_t = false)]
    pub fail_on_reject: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern selecting input files (e.g. "run42/*.csv")
    #[arg(long, conflicts_with = "files")]
    pub glob: Option<String>,

    /// Explicit list of input files
    #[arg(long, num_args = 1..)]
    pub files: Option<Vec<String>>,

    #[command(flatten)]
    pub options: FilterOptions,

    /// Directory for per-file JSON reports (default: JSONL on stdout)
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Keep going after a file fails
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,

    /// List matched files and exit
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Compact JSON in per-file reports
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Samples as a comma or space separated list, e.g. "10,10.3,10"
    #[arg(long, allow_hyphen_values = true)]
    pub samples: String,

    /// Samples evaluated (default: all)
    #[arg(long)]
    pub npoints: Option<usize>,

    #[command(flatten)]
    pub params: ParamArgs,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Input sample file path
    #[arg(long)]
    pub file: String,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
