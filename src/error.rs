use std::path::PathBuf;

use thiserror::Error;

/// Canonical result for the query library.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The data file could not be opened or read.
    #[error("Unable to read data file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line did not split into exactly five `|`-delimited fields.
    #[error(
        "Malformed record on line {line}: expected {} fields, found {fields}",
        crate::record::FIELD_COUNT
    )]
    Malformed { line: usize, fields: usize },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
