// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Report test results to a TestSolar collector
#[derive(Parser, Debug)]
#[command(name = "testtool-report")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Report test results through the TestSolar pipe or file transport", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a JUnit XML report and report every case in it
    Junit(JunitArgs),

    /// Decode a captured pipe stream and print its payloads
    Decode(DecodeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct JunitArgs {
    /// JUnit XML report to convert
    pub xml: PathBuf,

    /// Report to files under this destination instead of the pipe
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Entry parameter JSON selecting the transport
    #[arg(long, value_name = "PARAM_JSON", conflicts_with = "output")]
    pub entry: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    /// File holding the captured frames
    pub stream: PathBuf,

    /// Print one compact JSON document per line
    #[arg(long, default_value_t = false)]
    pub compact: bool,
}
