//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ovr",
    version,
    about = "State online voter registration client",
    long_about = "Talk to state online voter registration APIs.\n\n\
                  All commands run against the Pennsylvania staging API unless\n\
                  --production is given. An API key issued by the state is required."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// API key issued by the state.
    #[arg(long = "api-key", value_name = "KEY", env = "OVR_API_KEY", global = true)]
    pub api_key: Option<String>,

    /// Run against the production API instead of staging.
    #[arg(long = "production", global = true)]
    pub production: bool,

    /// Language code passed through to the API.
    #[arg(long = "language", value_name = "N", default_value_t = 0, global = true)]
    pub language: u32,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch upcoming election dates and declaration texts.
    ElectionInfo,

    /// Dump the code tables fetched from the API as JSON.
    Constants,

    /// List every county with its municipalities.
    Counties,

    /// Submit the canned test registration (staging only unless forced).
    Register(RegisterArgs),
}

#[derive(Parser)]
pub struct RegisterArgs {
    /// Include the test PennDOT driver's license number.
    #[arg(long = "with-dl")]
    pub with_dl: bool,

    /// Include the test last-4 SSN.
    #[arg(long = "with-ssn")]
    pub with_ssn: bool,

    /// Attach a signature image; the format is taken from the extension.
    #[arg(long = "signature", value_name = "PATH")]
    pub signature: Option<PathBuf>,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
