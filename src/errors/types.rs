//! Error type definitions for the IPTV scanner
//!
//! Only configuration, input and output problems are fatal. Everything that
//! can go wrong while talking to a candidate host is a [`SourceError`], which
//! the discovery pipeline logs and then treats as "no result".

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Source handling errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Seed list could not be read
    #[error("Seed list error: {path} - {source}")]
    SeedInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be written
    #[error("Failed to write output file {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while probing or harvesting a single candidate host
#[derive(Error, Debug)]
pub enum SourceError {
    /// Request did not complete within the configured timeout
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// Connection refused, DNS failure, TLS failure and the like
    #[error("Connection failed: {url} - {message}")]
    Connection { url: String, message: String },

    /// Final response status was not 200
    #[error("HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// Response body could not be interpreted
    #[error("Parse error: {source_type} - {message}")]
    ParseError { source_type: String, message: String },
}

impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an output error for the given path
    pub fn output<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }
}

impl SourceError {
    /// Create a timeout error
    pub fn timeout<U: Into<String>>(url: U) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Create a connection error
    pub fn connection<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Connection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http<U: Into<String>>(status: u16, url: U) -> Self {
        Self::Http {
            status,
            url: url.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error<S: Into<String>, M: Into<String>>(source_type: S, message: M) -> Self {
        Self::ParseError {
            source_type: source_type.into(),
            message: message.into(),
        }
    }

    /// Build from a reqwest transport error, separating timeouts from the rest
    pub fn from_transport(url: &str, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::timeout(url)
        } else {
            Self::connection(url, error.to_string())
        }
    }
}
