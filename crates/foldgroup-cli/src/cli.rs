use clap::{Args, Parser, Subcommand};
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
    about = "FoldGroup CLI - Group batches of predicted protein structures by sequence identity and query spatial contacts between target and binder chains.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Group a folder of structures by exact sequence identity.
    Group(GroupArgs),
    /// Auto-detect target chains shared across a folder of structures.
    Detect(DetectArgs),
    /// Search structures for binders contacting the given target residues.
    Search(SearchArgs),
    /// Report interface residues between chains of one structure.
    Contacts(ContactsArgs),
}

/// Arguments for the `group` subcommand.
#[derive(Args, Debug)]
pub struct GroupArgs {
    /// Folder of structure files (or a single file).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}

/// Arguments for the `detect` subcommand.
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Folder of structure files (or a single file).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the minimum fraction of structures a chain must appear in
    /// to count as a target.
    #[arg(long, value_name = "FLOAT")]
    pub min_frequency: Option<f64>,

    /// Overwrite existing designations without confirmation.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `search` subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Folder of structure files (or a single file).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Target residues as CHAIN:RESID pairs, comma-separated (e.g. 'A:12,A:15').
    #[arg(short, long, required = true, value_name = "LIST")]
    pub residues: String,

    /// Override the contact distance cutoff in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Override the minimum number of distinct target residues a hit must touch.
    #[arg(long, value_name = "NUM")]
    pub min_contacts: Option<usize>,
}

/// Arguments for the `contacts` subcommand.
#[derive(Args, Debug)]
pub struct ContactsArgs {
    /// Path to the structure file to analyze.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Binder chain identifier.
    #[arg(short, long, required = true, value_name = "CHAIN")]
    pub binder: char,

    /// Target chain identifiers, comma-separated (e.g. 'A' or 'A,C').
    #[arg(short, long, required = true, value_name = "LIST")]
    pub targets: String,

    /// Contact distance cutoff in Angstroms.
    #[arg(long, default_value_t = 4.5, value_name = "FLOAT")]
    pub cutoff: f64,

    /// Also report the target-side interface residues.
    #[arg(long)]
    pub bidirectional: bool,
}
