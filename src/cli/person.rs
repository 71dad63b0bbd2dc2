use clap::Parser;

use super::{InputOptions, OutputOptions};

#[derive(Debug, Parser)]
pub struct PersonArgs {
    #[clap(flatten)]
    pub input: InputOptions,

    /// Full name of the person, exactly as "<first> <last>"
    #[clap(name = "NAME", required = true)]
    pub name: String,

    #[clap(flatten)]
    pub output: OutputOptions,
}
