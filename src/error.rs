//! Error enum
use std::fmt;
use std::num::ParseFloatError;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    ParseFloat(ParseFloatError),
    /// Requested transliteration direction is neither supported nor the identity.
    UnsupportedFormatPair {
        input: String,
        output: String,
    },
    MissingFile(PathBuf),
    MissingColumn(String),
    MalformedLine {
        line: usize,
        reason: String,
    },
    UnknownWord(String),
    DimensionMismatch {
        expected: usize,
        found: usize,
    },
    EmptyDialect(String),
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Csv(e) => write!(f, "csv error: {e}"),
            Error::ParseFloat(e) => write!(f, "could not parse float: {e}"),
            Error::UnsupportedFormatPair { input, output } => {
                write!(f, "unsupported transliteration: {input} -> {output}")
            }
            Error::MissingFile(p) => write!(f, "could not find file {:?}", p),
            Error::MissingColumn(c) => write!(f, "missing column {c}"),
            Error::MalformedLine { line, reason } => {
                write!(f, "malformed line {line}: {reason}")
            }
            Error::UnknownWord(w) => write!(f, "word id {w} not in word map"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "expected vectors of dimension {expected}, got {found}")
            }
            Error::EmptyDialect(d) => write!(f, "no i-vectors for dialect {d}"),
            Error::Custom(s) => write!(f, "{s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            Error::ParseFloat(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<ParseFloatError> for Error {
    fn from(e: ParseFloatError) -> Error {
        Error::ParseFloat(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
