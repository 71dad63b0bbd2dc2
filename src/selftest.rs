//! Conformance check of every query against an embedded sample dataset.

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::io::{Cursor, Write};

use tracing::debug;

use crate::error::Result;
use crate::query::{scan, ALL_COHORTS};
use crate::record::{DataRow, Records};
use crate::roster::Roster;

/// The sample data file the checks are written against.
pub const SAMPLE_DATA: &str = include_str!("../data/cohort_data.txt");

fn sample() -> Records<Cursor<&'static str>> {
    Records::with_origin(Cursor::new(SAMPLE_DATA), "<sample data>")
}

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn list(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone)]
pub struct Check {
    pub name: String,
    pub passed: bool,
    /// Expected vs actual, for failures
    pub detail: Option<String>,
}

#[derive(Debug, Default)]
pub struct Report {
    checks: Vec<Check>,
}
impl Report {
    fn check<T: PartialEq + Debug>(&mut self, name: &str, actual: Result<T>, expected: T) {
        let detail = match actual {
            Ok(actual) if actual == expected => None,
            Ok(actual) => Some(format!("expected: {:?}\n  got:      {:?}", expected, actual)),
            Err(e) => Some(format!("expected: {:?}\n  error:    {}", expected, e)),
        };
        debug!(check = name, passed = detail.is_none(), "self-test check");
        self.checks.push(Check {
            name: name.to_string(),
            passed: detail.is_none(),
            detail,
        });
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub fn total(&self) -> usize {
        self.checks.len()
    }

    pub fn failed(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn pprint<W: Write>(&self, wtr: &mut W, verbose: bool) -> std::io::Result<()> {
        for check in &self.checks {
            match &check.detail {
                Some(detail) => {
                    writeln!(wtr, "FAILED: {}", check.name)?;
                    writeln!(wtr, "  {}", detail)?;
                }
                None if verbose => writeln!(wtr, "ok: {}", check.name)?,
                None => {}
            }
        }
        writeln!(
            wtr,
            "{} checks, {} passed, {} failed",
            self.total(),
            self.total() - self.failed(),
            self.failed()
        )?;
        if self.all_passed() {
            writeln!(wtr, "ALL TESTS PASSED")?;
        }
        Ok(())
    }
}

pub fn run() -> Report {
    let mut report = Report::default();

    let houses = set(&[
        "Dumbledore's Army",
        "Gryffindor",
        "Hufflepuff",
        "Ravenclaw",
        "Slytherin",
    ]);
    report.check("distinct houses", scan::distinct_houses(sample()), houses.clone());

    let fall = list(&[
        "Angelina Johnson",
        "Cedric Diggory",
        "Cho Chang",
        "Draco Malfoy",
        "Harry Potter",
        "Hermione Granger",
        "Ron Weasley",
        "Seamus Finnigan",
        "Terence Higgs",
        "Theodore Nott",
    ]);
    let winter = list(&[
        "Adrian Pucey",
        "Andrew Kirke",
        "Fred Weasley",
        "George Weasley",
        "Hannah Abbott",
        "Neville Longbottom",
        "Padma Patil",
        "Parvati Patil",
        "Roger Davies",
        "Susan Bones",
    ]);
    let spring = list(&[
        "Colin Creevey",
        "Cormac McLaggen",
        "Demelza Robins",
        "Ginny Weasley",
        "Luna Lovegood",
        "Michael Corner",
        "Zacharias Smith",
    ]);
    let summer = list(&[
        "Alicia Spinnet",
        "Dean Thomas",
        "Dennis Creevey",
        "Ernie Macmillan",
        "Gregory Goyle",
        "Terry Boot",
        "Vincent Crabbe",
    ]);
    let mut everyone: Vec<String> = [&fall, &winter, &spring, &summer]
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    everyone.sort();

    report.check(
        "all students",
        scan::students_by_cohort(sample(), ALL_COHORTS),
        everyone.clone(),
    );
    for (cohort, expected) in [
        ("Fall 2015", &fall),
        ("Winter 2016", &winter),
        ("Spring 2016", &spring),
        ("Summer 2016", &summer),
    ] {
        report.check(
            &format!("students in {}", cohort),
            scan::students_by_cohort(sample(), cohort),
            expected.clone(),
        );
    }

    let rosters = [
        list(&[
            "Alicia Spinnet",
            "Fred Weasley",
            "George Weasley",
            "Ginny Weasley",
            "Luna Lovegood",
        ]),
        list(&[
            "Andrew Kirke",
            "Angelina Johnson",
            "Colin Creevey",
            "Cormac McLaggen",
            "Dean Thomas",
            "Demelza Robins",
            "Dennis Creevey",
            "Harry Potter",
            "Hermione Granger",
            "Neville Longbottom",
            "Parvati Patil",
            "Ron Weasley",
            "Seamus Finnigan",
        ]),
        list(&[
            "Cedric Diggory",
            "Ernie Macmillan",
            "Hannah Abbott",
            "Susan Bones",
            "Zacharias Smith",
        ]),
        list(&[
            "Cho Chang",
            "Michael Corner",
            "Padma Patil",
            "Roger Davies",
            "Terry Boot",
        ]),
        list(&[
            "Adrian Pucey",
            "Draco Malfoy",
            "Gregory Goyle",
            "Terence Higgs",
            "Theodore Nott",
            "Vincent Crabbe",
        ]),
        list(&[
            "Bloody Baron",
            "Fat Friar",
            "Grey Lady",
            "Nearly Headless Nick",
        ]),
        list(&[
            "Filius Flitwick",
            "Minerva McGonagall",
            "Pomona Sprout",
            "Severus Snape",
        ]),
    ];
    report.check(
        "rosters by house",
        scan::all_names_by_house(sample()).map(|r| r.into_lists()),
        rosters.clone(),
    );

    let harry = DataRow {
        full_name: "Harry Potter".to_string(),
        house: "Gryffindor".to_string(),
        advisor: "McGonagall".to_string(),
        cohort: "Fall 2015".to_string(),
    };
    report.check(
        "all data",
        scan::all_data(sample()).map(|rows| (rows.len(), rows.into_iter().next())),
        (42, Some(harry)),
    );

    for (name, expected) in [
        ("Harry Potter", Some("Fall 2015")),
        ("Hannah Abbott", Some("Winter 2016")),
        ("Someone else", None),
    ] {
        report.check(
            &format!("cohort for {}", name),
            scan::cohort_for(sample(), name),
            expected.map(String::from),
        );
    }

    let dupes = set(&["Creevey", "Patil", "Weasley"]);
    report.check(
        "duplicated last names",
        scan::duplicated_last_names(sample()),
        dupes.clone(),
    );

    let hermione = set(&[
        "Angelina Johnson",
        "Harry Potter",
        "Ron Weasley",
        "Seamus Finnigan",
    ]);
    report.check(
        "housemates of Hermione Granger",
        scan::housemates_of(|| Ok(sample()), "Hermione Granger"),
        hermione.clone(),
    );

    // The loaded roster must agree with the streaming scans
    match Roster::from_records(sample()) {
        Ok(roster) => {
            report.check("roster houses", Ok(roster.houses()), houses);
            report.check("roster students", Ok(roster.students(ALL_COHORTS)), everyone);
            report.check("roster rosters", Ok(roster.rosters().into_lists()), rosters);
            report.check("roster all data", Ok(roster.all_data().len()), 42);
            report.check(
                "roster cohort for Hannah Abbott",
                Ok(roster.cohort_for("Hannah Abbott")),
                Some("Winter 2016"),
            );
            report.check(
                "roster duplicated last names",
                Ok(roster.duplicated_last_names()),
                dupes,
            );
            report.check(
                "roster housemates of Hermione Granger",
                Ok(roster.housemates_of("Hermione Granger")),
                hermione,
            );
        }
        Err(e) => report.check("roster load", Err(e), ()),
    }

    report
}
