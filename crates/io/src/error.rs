use std::fmt;

#[derive(Debug)]
pub enum IoError {
    /// File open/read failure.
    Read { path: String, message: String },
    /// Delimited-data parse failure.
    Parse { path: String, message: String },
    /// Output write failure.
    Write { path: String, message: String },
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "cannot read {path}: {message}"),
            Self::Parse { path, message } => write!(f, "cannot parse {path}: {message}"),
            Self::Write { path, message } => write!(f, "cannot write {path}: {message}"),
        }
    }
}

impl std::error::Error for IoError {}
