// File I/O operations

pub mod csv;
pub mod error;

pub use crate::csv::{read_raw_table, write_analyzed, write_merged};
pub use error::IoError;
