use std::io;
use std::path::PathBuf;
use thiserror::Error;

// Variants that wrap a source leave it out of their own message; print the
// whole chain to see the cause.

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("opening {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("reading line {line_number}")]
    LineRead {
        line_number: usize,
        #[source]
        source: io::Error,
    },

    #[error("invalid link on line {line_number}")]
    UrlParse {
        line_number: usize,
        #[source]
        source: ExtractError,
    },

    #[error("Invalid category rule: {0}")]
    InvalidRule(String),

    #[error("serializing report")]
    Report(#[from] serde_json::Error),
}

/// A matched candidate that is not a valid absolute URL.
#[derive(Error, Debug)]
#[error("URL validating {line:?}: {candidate} {reason}")]
pub struct ExtractError {
    pub candidate: String,
    pub line: String,
    pub reason: UrlRejection,
}

#[derive(Error, Debug, PartialEq)]
pub enum UrlRejection {
    #[error("is malformed: {0}")]
    Malformed(#[from] url::ParseError),

    #[error("contains malformed percent-encoding")]
    BadPercentEncoding,

    #[error("has no host")]
    MissingHost,
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
