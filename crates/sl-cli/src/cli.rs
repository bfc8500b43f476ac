//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Sightline - build BI analysis definitions from operation scripts
#[derive(Parser, Debug)]
#[command(name = "sl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the account id (also read from SL_ACCOUNT_ID)
    #[arg(short, long, global = true)]
    pub account: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an operation script, then compile and submit the analysis
    Apply(ApplyArgs),

    /// Run an operation script and build the document without submitting
    Validate(ValidateArgs),

    /// List the datasets available in the account
    Datasets(DatasetsArgs),

    /// Show the sheets and filter groups of a published analysis
    Describe(DescribeArgs),
}

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Operation script (YAML)
    pub script: String,

    /// Also write the compiled document to this path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Build the document but do not submit it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Operation script (YAML)
    pub script: String,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the datasets command
#[derive(Args, Debug)]
pub struct DatasetsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Arguments for the describe command
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Analysis id
    pub analysis_id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Listing output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
