use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::BUFFER_SIZE;

pub const FIELD_DELIMITER: char = '|';
pub const FIELD_COUNT: usize = 5;

pub const GHOST_FLAG: &str = "G";
pub const INSTRUCTOR_FLAG: &str = "I";

/// What a record represents, decoded from the fifth field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Membership {
    Student { cohort: String },
    Ghost,
    Instructor,
}
impl Membership {
    pub fn from_field(field: &str) -> Self {
        match field {
            GHOST_FLAG => Self::Ghost,
            INSTRUCTOR_FLAG => Self::Instructor,
            cohort => Self::Student {
                cohort: cohort.to_string(),
            },
        }
    }

    /// The raw fifth field this membership was decoded from.
    pub fn as_field(&self) -> &str {
        match self {
            Self::Student { cohort } => cohort.as_str(),
            Self::Ghost => GHOST_FLAG,
            Self::Instructor => INSTRUCTOR_FLAG,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub first_name: String,
    pub last_name: String,
    pub house: String,
    /// Advisor name, or a role flag for non-students
    pub advisor: String,
    pub membership: Membership,
}
impl Record {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Exact, case-sensitive comparison against the derived full name.
    pub fn is_named(&self, name: &str) -> bool {
        name.strip_prefix(self.first_name.as_str())
            .and_then(|rest| rest.strip_prefix(' '))
            .is_some_and(|rest| rest == self.last_name)
    }

    pub fn cohort_field(&self) -> &str {
        self.membership.as_field()
    }

    /// Cohort label for students, `None` for ghosts and instructors
    pub fn cohort(&self) -> Option<&str> {
        match &self.membership {
            Membership::Student { cohort } => Some(cohort.as_str()),
            _ => None,
        }
    }

    pub fn is_student(&self) -> bool {
        matches!(self.membership, Membership::Student { .. })
    }

    pub fn to_row(&self) -> DataRow {
        DataRow {
            full_name: self.full_name(),
            house: self.house.clone(),
            advisor: self.advisor.clone(),
            cohort: self.cohort_field().to_string(),
        }
    }
}

/// The flattened `(full_name, house, advisor, cohort)` view of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataRow {
    pub full_name: String,
    pub house: String,
    pub advisor: String,
    pub cohort: String,
}

/// Parses one line of the data file. `line_no` is 1-based and only used for
/// error reporting.
pub fn parse_line(line: &str, line_no: usize) -> Result<Record> {
    let fields: Vec<&str> = line.trim_end().split(FIELD_DELIMITER).collect();
    let [first_name, last_name, house, advisor, cohort] = fields.as_slice() else {
        return Err(Error::Malformed {
            line: line_no,
            fields: fields.len(),
        });
    };
    Ok(Record {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        house: house.to_string(),
        advisor: advisor.to_string(),
        membership: Membership::from_field(cohort),
    })
}

/// Streaming iterator of parsed records over a buffered reader.
///
/// The underlying reader (and file handle, when opened from a path) is
/// dropped together with the iterator, whichever way the scan ends.
pub struct Records<R> {
    reader: R,
    origin: PathBuf,
    buf: String,
    line: usize,
}
impl Records<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let reader = BufReader::with_capacity(BUFFER_SIZE, file);
        Ok(Self::with_origin(reader, path))
    }
}
impl<R: BufRead> Records<R> {
    pub fn new(reader: R) -> Self {
        Self::with_origin(reader, "<reader>")
    }

    pub fn with_origin(reader: R, origin: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            origin: origin.into(),
            buf: String::new(),
            line: 0,
        }
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line
    }
}
impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_line(&mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line += 1;
                Some(parse_line(&self.buf, self.line))
            }
            Err(e) => Some(Err(Error::io(&self.origin, e))),
        }
    }
}
