//! Stateless queries over a cohort data file.
//!
//! Every function opens `path`, scans it, and drops the handle before
//! returning. Nothing is cached between calls.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::Result;
use crate::house::HouseRosters;
use crate::record::{DataRow, Records};

pub mod scan;

/// Cohort filter that matches every student.
pub const ALL_COHORTS: &str = "All";

/// Non-empty house labels found in the file.
pub fn distinct_houses<P: AsRef<Path>>(path: P) -> Result<BTreeSet<String>> {
    scan::distinct_houses(Records::open(path)?)
}

/// Sorted full names of students in `cohort`, or all students for
/// [`ALL_COHORTS`]. Ghosts and instructors are never included.
pub fn students_by_cohort<P: AsRef<Path>>(path: P, cohort: &str) -> Result<Vec<String>> {
    scan::students_by_cohort(Records::open(path)?, cohort)
}

pub fn all_names_by_house<P: AsRef<Path>>(path: P) -> Result<HouseRosters> {
    scan::all_names_by_house(Records::open(path)?)
}

/// One row per line, in file order.
pub fn all_data<P: AsRef<Path>>(path: P) -> Result<Vec<DataRow>> {
    scan::all_data(Records::open(path)?)
}

/// Raw cohort field of the first person named `name`, `None` if absent.
pub fn cohort_for<P: AsRef<Path>>(path: P, name: &str) -> Result<Option<String>> {
    scan::cohort_for(Records::open(path)?, name)
}

pub fn duplicated_last_names<P: AsRef<Path>>(path: P) -> Result<BTreeSet<String>> {
    scan::duplicated_last_names(Records::open(path)?)
}

/// Everyone else sharing both house and cohort with `name`.
pub fn housemates_of<P: AsRef<Path>>(path: P, name: &str) -> Result<BTreeSet<String>> {
    let path = path.as_ref();
    scan::housemates_of(|| Records::open(path), name)
}
