use std::{fmt, io};

pub mod repl;
pub mod view;

#[derive(Debug)]
pub enum ReplError {
    Io(io::Error),
}

impl fmt::Display for ReplError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReplError::Io(err) => write!(f, "Terminal I/O failed: {}", err),
        }
    }
}

impl From<io::Error> for ReplError {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}
