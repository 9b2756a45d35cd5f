use std::fmt;

pub mod champion;

#[derive(Debug)]
pub enum ParsingError {
    InvalidType(String),
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParsingError::InvalidType(what) => write!(f, "Unexpected json for: {}", what),
        }
    }
}
