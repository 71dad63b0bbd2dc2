use clap::{
    builder::{
        styling::{AnsiColor, Effects},
        Styles,
    },
    Parser, Subcommand,
};

mod input;
mod logging;
mod output;
mod person;
mod selftest;
mod students;
pub use input::InputOptions;
pub use logging::LoggingOptions;
pub use output::OutputOptions;
pub use person::PersonArgs;
pub use selftest::SelftestArgs;
pub use students::StudentsArgs;

// Configures Clap v3-style help menu colors
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "cohort", version, about, styles = STYLES)]
pub struct Cli {
    #[clap(flatten)]
    pub logging: LoggingOptions,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every distinct, non-empty house
    #[clap(name = "houses")]
    Houses(FileArgs),

    /// List students (sorted by full name), optionally for a single cohort
    #[clap(name = "students")]
    Students(StudentsArgs),

    /// Print the sorted rosters of each house, the ghosts, and the instructors
    #[clap(name = "rosters")]
    Rosters(FileArgs),

    /// Print every record as full name, house, advisor and cohort
    #[clap(name = "dump")]
    Dump(FileArgs),

    /// Print the cohort of a person (exit status 1 if not found)
    #[clap(name = "lookup")]
    Lookup(PersonArgs),

    /// List last names shared by two or more records
    #[clap(name = "dupes")]
    Dupes(FileArgs),

    /// List everyone sharing both house and cohort with a person
    #[clap(name = "housemates")]
    Housemates(PersonArgs),

    /// Load the file once and report houses, cohorts, roster sizes and duplicates
    #[clap(name = "summary")]
    Summary(FileArgs),

    /// Run the built-in conformance checks against the embedded sample data
    #[clap(name = "selftest")]
    Selftest(SelftestArgs),
}

#[derive(Debug, Parser)]
pub struct FileArgs {
    #[clap(flatten)]
    pub input: InputOptions,

    #[clap(flatten)]
    pub output: OutputOptions,
}
