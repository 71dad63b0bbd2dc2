// Library interface for cohort
// Queries, the loaded roster, and the CLI plumbing shared with the binary

// Read and write buffer capacity
pub const BUFFER_SIZE: usize = 64 * 1024;

pub mod cli;
pub mod error;
pub mod house;
pub mod output;
pub mod query;
pub mod record;
pub mod roster;
pub mod selftest;

pub use error::{Error, Result};
pub use house::{Bucket, HouseRosters};
pub use record::{DataRow, Membership, Record};
pub use roster::Roster;
