use clap::Parser;

use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[clap(next_help_heading = "OUTPUT OPTIONS")]
pub struct OutputOptions {
    /// Output format
    #[clap(short = 'f', long, default_value = "text")]
    pub format: OutputFormat,

    /// Write results to a file
    ///
    /// Default: stdout
    #[clap(short = 'o', long)]
    pub output: Option<String>,
}
