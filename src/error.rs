// src/error.rs
// =============================================================================
// Infrastructure errors.
//
// A broken link is NOT an error here: those are collected as FailureReason
// values in the report. CheckError is for things that make the run itself
// meaningless (unreadable config, unexpected filesystem errors, a client we
// cannot build, a phase that blew its overall timeout). They abort the run.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("could not read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not read document {path}: {source}")]
    DocumentRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not list source directory {path}: {source}")]
    SourceListing {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unexpected filesystem error on {path}: {source}")]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("local file checks did not finish within {0:?}")]
    LocalTimeout(Duration),

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("could not dispatch request to {url}: {source}")]
    Dispatch {
        url: String,
        source: reqwest::Error,
    },

    #[error("remote checks did not finish within {0:?}")]
    RemoteTimeout(Duration),

    #[error("invalid selector '{0}'")]
    Selector(String),
}

pub type Result<T> = std::result::Result<T, CheckError>;
