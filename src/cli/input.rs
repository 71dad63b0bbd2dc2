use clap::Parser;

#[derive(Debug, Parser)]
#[clap(next_help_heading = "INPUT OPTIONS")]
pub struct InputOptions {
    /// Path to the pipe-delimited cohort data file
    #[clap(name = "DATA FILE", required = true)]
    pub data_file: String,
}
