//! Error types for mdhelp operations.

use thiserror::Error;

/// Errors that can occur while reading input or resolving styles.
///
/// Malformed markup is never an error: unmatched link brackets or odd
/// heading punctuation degrade to plain paragraph text instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("style [{section}] is missing required key {key:?}")]
    MissingKey { section: String, key: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
