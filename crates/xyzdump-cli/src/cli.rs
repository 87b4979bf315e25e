use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "xyzdump - Convert particle snapshots into extended-XYZ trajectory frames.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Path to the input snapshot file in TOML format.
    #[arg(value_name = "SNAPSHOT")]
    pub input: PathBuf,

    /// Path for the output trajectory file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Append the frame to an existing trajectory instead of truncating.
    #[arg(long)]
    pub append: bool,

    /// Override the per-record line format (printf style, e.g. "%s %.6f %.6f %.6f").
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Display names for the particle types, one per declared type.
    #[arg(long, value_name = "NAME", num_args = 1..)]
    pub element: Option<Vec<String>>,

    /// Render and write one record at a time instead of buffering the frame.
    #[arg(long)]
    pub line_mode: bool,

    /// Selection bits; only particles whose group bits intersect them are written.
    #[arg(long, value_name = "BITS")]
    pub group: Option<u32>,

    /// Emit tilt factors in the lattice descriptor of triclinic boxes.
    #[arg(long)]
    pub skew_lattice: bool,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
