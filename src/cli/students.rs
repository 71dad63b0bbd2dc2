use clap::Parser;

use super::{InputOptions, OutputOptions};
use crate::query::ALL_COHORTS;

#[derive(Debug, Parser)]
pub struct StudentsArgs {
    #[clap(flatten)]
    pub input: InputOptions,

    /// Only list students in this cohort (e.g. "Fall 2015")
    ///
    /// [All: every cohort]
    #[clap(short = 'c', long, default_value = ALL_COHORTS)]
    pub cohort: String,

    #[clap(flatten)]
    pub output: OutputOptions,
}
