use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;
use std::path::Path;

use hashbrown::{HashMap, HashSet};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::house::{Bucket, HouseRosters};
use crate::query::ALL_COHORTS;
use crate::record::{DataRow, Record, Records};

/// A data file parsed once and indexed for repeated queries.
///
/// Answers match the streaming functions in [`crate::query`] for the same
/// well-formed input. Loading fails on the first malformed line.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    records: Vec<Record>,
    /// Full name -> position of its first record
    by_name: HashMap<String, usize>,
    /// (house, cohort field) -> positions, in file order
    by_group: HashMap<(String, String), Vec<usize>>,
}
impl Roster {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_records(Records::open(path)?)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::from_records(Records::new(reader))
    }

    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        let mut roster = Self::default();
        for record in records {
            roster.insert(record?);
        }
        debug!(
            records = roster.len(),
            names = roster.by_name.len(),
            groups = roster.by_group.len(),
            "loaded roster"
        );
        Ok(roster)
    }

    fn insert(&mut self, record: Record) {
        let idx = self.records.len();
        self.by_name.entry(record.full_name()).or_insert(idx);
        self.by_group
            .entry((record.house.clone(), record.cohort_field().to_string()))
            .or_default()
            .push(idx);
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    fn find(&self, name: &str) -> Option<&Record> {
        self.by_name.get(name).map(|&idx| &self.records[idx])
    }

    pub fn houses(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .filter(|r| !r.house.is_empty())
            .map(|r| r.house.clone())
            .collect()
    }

    /// Distinct cohort labels carried by students
    pub fn cohorts(&self) -> BTreeSet<&str> {
        self.records.iter().filter_map(Record::cohort).collect()
    }

    pub fn students(&self, cohort: &str) -> Vec<String> {
        let mut students: Vec<String> = self
            .records
            .iter()
            .filter(|r| {
                r.cohort()
                    .is_some_and(|label| cohort == ALL_COHORTS || label == cohort)
            })
            .map(Record::full_name)
            .collect();
        students.sort();
        students
    }

    pub fn rosters(&self) -> HouseRosters {
        let mut rosters = HouseRosters::default();
        for record in &self.records {
            if let Some(bucket) = Bucket::classify(record) {
                rosters.push(bucket, record.full_name());
            }
        }
        rosters.finish()
    }

    pub fn all_data(&self) -> Vec<DataRow> {
        self.records.iter().map(Record::to_row).collect()
    }

    pub fn cohort_for(&self, name: &str) -> Option<&str> {
        self.find(name).map(Record::cohort_field)
    }

    pub fn duplicated_last_names(&self) -> BTreeSet<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| !seen.insert(r.last_name.as_str()))
            .map(|r| r.last_name.clone())
            .collect()
    }

    pub fn housemates_of(&self, name: &str) -> BTreeSet<String> {
        let Some(target) = self.find(name) else {
            return BTreeSet::new();
        };
        let key = (target.house.clone(), target.cohort_field().to_string());
        self.by_group
            .get(&key)
            .into_iter()
            .flatten()
            .map(|&idx| self.records[idx].full_name())
            .filter(|full_name| full_name != name)
            .collect()
    }

    /// Everything the other queries report, from this single load.
    pub fn summary(&self) -> Summary {
        let mut cohorts: BTreeMap<String, usize> = BTreeMap::new();
        for cohort in self.records.iter().filter_map(Record::cohort) {
            *cohorts.entry(cohort.to_string()).or_default() += 1;
        }
        Summary {
            records: self.len(),
            students: cohorts.values().sum(),
            houses: self.houses(),
            cohorts,
            rosters: self.rosters(),
            duplicated_last_names: self.duplicated_last_names(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub records: usize,
    pub students: usize,
    pub houses: BTreeSet<String>,
    /// Student count per cohort label
    pub cohorts: BTreeMap<String, usize>,
    pub rosters: HouseRosters,
    pub duplicated_last_names: BTreeSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const DATA: &str = "\
Harry|Potter|Gryffindor|McGonagall|Fall 2015
Ron|Weasley|Gryffindor|McGonagall|Fall 2015
Hermione|Granger|Gryffindor|McGonagall|Fall 2015
Ginny|Weasley|Gryffindor|McGonagall|Spring 2016
Harry|Potter|Slytherin|Snape|Winter 2016
Minerva|McGonagall||I|I
Fat|Friar||G|G
";

    fn roster() -> Roster {
        Roster::from_reader(Cursor::new(DATA)).unwrap()
    }

    #[test]
    fn test_load_counts() {
        let roster = roster();
        assert_eq!(roster.len(), 7);
        assert!(!roster.is_empty());
        assert_eq!(roster.records()[5].full_name(), "Minerva McGonagall");
        assert!(Roster::from_reader(Cursor::new("")).unwrap().is_empty());
    }

    #[test]
    fn test_first_record_wins_for_names() {
        let roster = roster();
        assert_eq!(roster.cohort_for("Harry Potter"), Some("Fall 2015"));
        assert_eq!(roster.cohort_for("Minerva McGonagall"), Some("I"));
        assert_eq!(roster.cohort_for("Draco Malfoy"), None);
    }

    #[test]
    fn test_housemates_from_index() {
        let roster = roster();
        let mates: Vec<_> = roster.housemates_of("Harry Potter").into_iter().collect();
        assert_eq!(mates, ["Hermione Granger", "Ron Weasley"]);
        assert!(roster.housemates_of("Ginny Weasley").is_empty());
        assert!(roster.housemates_of("Nobody").is_empty());
    }

    #[test]
    fn test_students_and_cohorts() {
        let roster = roster();
        assert_eq!(roster.students(ALL_COHORTS).len(), 5);
        assert_eq!(roster.students("Spring 2016"), ["Ginny Weasley"]);
        let cohorts: Vec<_> = roster.cohorts().into_iter().collect();
        assert_eq!(cohorts, ["Fall 2015", "Spring 2016", "Winter 2016"]);
    }

    #[test]
    fn test_duplicates_include_repeated_full_names() {
        let dupes: Vec<_> = roster().duplicated_last_names().into_iter().collect();
        assert_eq!(dupes, ["Potter", "Weasley"]);
    }

    #[test]
    fn test_summary() {
        let summary = roster().summary();
        assert_eq!(summary.records, 7);
        assert_eq!(summary.students, 5);
        assert_eq!(summary.cohorts.get("Fall 2015"), Some(&3));
        assert_eq!(summary.rosters.get(Bucket::Gryffindor).len(), 4);
        assert_eq!(summary.rosters.get(Bucket::Slytherin), ["Harry Potter"]);
        assert!(summary.houses.contains("Slytherin"));
    }

    #[test]
    fn test_load_rejects_malformed() {
        let result = Roster::from_reader(Cursor::new("Harry|Potter\n"));
        assert!(matches!(
            result,
            Err(crate::error::Error::Malformed { line: 1, fields: 2 })
        ));
    }
}
