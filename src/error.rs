//! Errors of everything around the parser
//!
//! Parsing a schedule never fails, these are for the configuration, the
//! backend, prompts and exports.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file isn't valid TOML
    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration values don't make sense
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request to the backend couldn't be made
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with an error status
    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// Requested row doesn't exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Date not understood
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Interactive prompt failed
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
