use std::collections::BTreeSet;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::house::HouseRosters;
use crate::record::{DataRow, FIELD_DELIMITER};
use crate::roster::Summary;
use crate::BUFFER_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[clap(name = "text", help = "One value per line")]
    Text,
    #[clap(name = "json", help = "Pretty-printed JSON")]
    Json,
}

/// A query result that can be written as plain text or JSON.
pub trait Render: Serialize {
    fn write_text<W: Write>(&self, wtr: &mut W) -> std::io::Result<()>;
}

fn write_names<'a, W, I>(wtr: &mut W, names: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a String>,
{
    for name in names {
        writeln!(wtr, "{}", name)?;
    }
    Ok(())
}

impl Render for BTreeSet<String> {
    fn write_text<W: Write>(&self, wtr: &mut W) -> std::io::Result<()> {
        write_names(wtr, self)
    }
}

impl Render for Vec<String> {
    fn write_text<W: Write>(&self, wtr: &mut W) -> std::io::Result<()> {
        write_names(wtr, self)
    }
}

impl Render for Option<String> {
    fn write_text<W: Write>(&self, wtr: &mut W) -> std::io::Result<()> {
        if let Some(value) = self {
            writeln!(wtr, "{}", value)?;
        }
        Ok(())
    }
}

impl Render for HouseRosters {
    fn write_text<W: Write>(&self, wtr: &mut W) -> std::io::Result<()> {
        for (bucket, names) in self.iter() {
            writeln!(wtr, "== {}", bucket)?;
            write_names(wtr, names)?;
        }
        Ok(())
    }
}

impl Render for Vec<DataRow> {
    fn write_text<W: Write>(&self, wtr: &mut W) -> std::io::Result<()> {
        let sep = FIELD_DELIMITER;
        for row in self {
            writeln!(
                wtr,
                "{}{sep}{}{sep}{}{sep}{}",
                row.full_name, row.house, row.advisor, row.cohort
            )?;
        }
        Ok(())
    }
}

impl Render for Summary {
    fn write_text<W: Write>(&self, wtr: &mut W) -> std::io::Result<()> {
        writeln!(wtr, "Number of records: {}", self.records)?;
        writeln!(wtr, "Number of students: {}", self.students)?;
        writeln!(wtr, "Houses:")?;
        for house in &self.houses {
            writeln!(wtr, "  {}", house)?;
        }
        writeln!(wtr, "Students per cohort:")?;
        for (cohort, count) in &self.cohorts {
            writeln!(wtr, "  {}: {}", cohort, count)?;
        }
        writeln!(wtr, "Roster sizes:")?;
        for (bucket, names) in self.rosters.iter() {
            writeln!(wtr, "  {}: {}", bucket, names.len())?;
        }
        if !self.duplicated_last_names.is_empty() {
            writeln!(wtr, "Duplicated last names:")?;
            for name in &self.duplicated_last_names {
                writeln!(wtr, "  {}", name)?;
            }
        }
        Ok(())
    }
}

pub fn writer_from_path(path: Option<&str>) -> Result<Box<dyn Write>> {
    if let Some(path) = path {
        let file =
            File::create(path).with_context(|| format!("Unable to create output file {}", path))?;
        let writer = BufWriter::with_capacity(BUFFER_SIZE, file);
        Ok(Box::new(writer))
    } else {
        let writer = BufWriter::with_capacity(BUFFER_SIZE, stdout());
        Ok(Box::new(writer))
    }
}

pub fn write_result<T: Render, W: Write>(value: &T, format: OutputFormat, wtr: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => value.write_text(wtr)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *wtr, value)?;
            writeln!(wtr)?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `value` to `path`, or stdout when no path is given.
pub fn emit<T: Render>(value: &T, format: OutputFormat, path: Option<&str>) -> Result<()> {
    let mut wtr = writer_from_path(path)?;
    write_result(value, format, &mut wtr)
}
