use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[clap(next_help_heading = "LOGGING OPTIONS")]
pub struct LoggingOptions {
    /// Increase log verbosity (-v: debug, -vv: trace)
    ///
    /// RUST_LOG takes precedence when set
    #[clap(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[clap(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}
impl LoggingOptions {
    /// Filter directive used when RUST_LOG is unset
    pub fn default_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
