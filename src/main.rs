use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use cohort::cli::{Cli, Command, LoggingOptions};
use cohort::output::emit;
use cohort::{query, selftest, Roster};

fn init_logging(opts: &LoggingOptions) {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(opts.default_filter()));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    init_logging(&args.logging);
    debug!(command = ?args.command, "parsed arguments");

    match args.command {
        Command::Houses(args) => {
            let houses = query::distinct_houses(&args.input.data_file)?;
            emit(&houses, args.output.format, args.output.output.as_deref())?;
        }
        Command::Students(args) => {
            let students = query::students_by_cohort(&args.input.data_file, &args.cohort)?;
            emit(&students, args.output.format, args.output.output.as_deref())?;
        }
        Command::Rosters(args) => {
            let rosters = query::all_names_by_house(&args.input.data_file)?;
            emit(&rosters, args.output.format, args.output.output.as_deref())?;
        }
        Command::Dump(args) => {
            let rows = query::all_data(&args.input.data_file)?;
            emit(&rows, args.output.format, args.output.output.as_deref())?;
        }
        Command::Lookup(args) => {
            let cohort = query::cohort_for(&args.input.data_file, &args.name)?;
            emit(&cohort, args.output.format, args.output.output.as_deref())?;
            if cohort.is_none() {
                info!(name = %args.name, "no such person");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Dupes(args) => {
            let dupes = query::duplicated_last_names(&args.input.data_file)?;
            emit(&dupes, args.output.format, args.output.output.as_deref())?;
        }
        Command::Housemates(args) => {
            let housemates = query::housemates_of(&args.input.data_file, &args.name)?;
            emit(&housemates, args.output.format, args.output.output.as_deref())?;
        }
        Command::Summary(args) => {
            let roster = Roster::load(&args.input.data_file)?;
            emit(&roster.summary(), args.output.format, args.output.output.as_deref())?;
        }
        Command::Selftest(args) => {
            let report = selftest::run();
            report
                .pprint(&mut std::io::stdout(), args.list)
                .context("Failed to write self-test report")?;
            if !report.all_passed() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
