use clap::Parser;

#[derive(Debug, Parser)]
pub struct SelftestArgs {
    /// Print every check, not only the failures
    #[clap(short = 'l', long)]
    pub list: bool,
}
