use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use cohort::selftest::SAMPLE_DATA;

/// Test fixture files, written into a fresh temporary directory per test
pub struct TestFixtures {
    dir: TempDir,
    pub sample: PathBuf,    // The embedded sample dataset
    pub housemates: PathBuf, // Two Gryffindors from the same cohort
    pub smiths: PathBuf,     // Smith, Smith, Jones
    pub malformed: PathBuf,  // A four-field line in the middle
    pub empty: PathBuf,
    pub missing: PathBuf, // Never created
}

impl TestFixtures {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let path = |name: &str| dir.path().join(name);
        let fixtures = Self {
            sample: path("cohort_data.txt"),
            housemates: path("housemates.txt"),
            smiths: path("smiths.txt"),
            malformed: path("malformed.txt"),
            empty: path("empty.txt"),
            missing: path("missing.txt"),
            dir,
        };
        fixtures.setup_fixtures()?;
        Ok(fixtures)
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    fn setup_fixtures(&self) -> Result<()> {
        fs::write(&self.sample, SAMPLE_DATA)?;
        fs::write(
            &self.housemates,
            "Harry|Potter|Gryffindor|McGonagall|Fall 2015\n\
             Ron|Weasley|Gryffindor|McGonagall|Fall 2015\n",
        )?;
        fs::write(
            &self.smiths,
            "A|Smith|Hufflepuff|Sprout|Fall 2015\n\
             B|Smith|Ravenclaw|Flitwick|Winter 2016\n\
             C|Jones|Slytherin|Snape|Fall 2015\n",
        )?;
        fs::write(
            &self.malformed,
            "Harry|Potter|Gryffindor|McGonagall|Fall 2015\n\
             Ron|Weasley|Gryffindor|Fall 2015\n\
             Hermione|Granger|Gryffindor|McGonagall|Fall 2015\n",
        )?;
        fs::write(&self.empty, "")?;
        Ok(())
    }

    /// Number of lines in a fixture file
    pub fn line_count(path: &Path) -> Result<usize> {
        Ok(fs::read_to_string(path)?.lines().count())
    }
}
