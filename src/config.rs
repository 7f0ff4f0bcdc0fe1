// src/config.rs
// =============================================================================
// Run configuration.
//
// Every option has a default, so an empty (or missing) TOML file is a valid
// configuration. Layering is: defaults -> TOML file -> CLI flags.
//
// Example doc-link-guardian.toml:
//
//   source_root = "src"
//   extra_documents = ["README.md"]
//   local_extensions = ["md", "html", "scala", "sbt"]
//   artifact_marker = "example_projects"
//   denied_hosts = ["localhost", "127.0.0.1"]
//   domain_key_length = 7
//   max_wave_size = 35
//   pacing_delay_ms = 1000
//   request_timeout_secs = 60
//   phase_timeout_secs = 300
//   local_timeout_ms = 2000
// =============================================================================

use crate::error::{CheckError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the markdown sources; local references must stay inside it
    pub source_root: PathBuf,
    /// Documents checked in addition to `source_root/*.md`, listed first
    pub extra_documents: Vec<PathBuf>,
    /// Only local targets ending in one of these extensions are checked
    pub local_extensions: Vec<String>,
    /// Paths containing this marker are served as-is (no .html -> .md rewrite)
    pub artifact_marker: String,
    /// URLs whose host starts with one of these are not requested at all
    pub denied_hosts: Vec<String>,
    pub domain_key_length: usize,
    /// Fan-out cap: at most this many requests are in flight at once
    pub max_wave_size: usize,
    pub pacing_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub phase_timeout_secs: u64,
    pub local_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("src"),
            extra_documents: vec![PathBuf::from("README.md")],
            local_extensions: vec!["md".into(), "html".into(), "scala".into(), "sbt".into()],
            artifact_marker: "example_projects".into(),
            denied_hosts: vec!["localhost".into(), "127.0.0.1".into()],
            domain_key_length: 7,
            max_wave_size: 35,
            pacing_delay_ms: 1000,
            request_timeout_secs: 60,
            phase_timeout_secs: 300,
            local_timeout_ms: 2000,
        }
    }
}

impl Config {
    /// Loads a TOML file; fields it leaves out keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CheckError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| CheckError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_wave_size == 0 {
            return Err(CheckError::InvalidConfig(
                "max_wave_size must be at least 1".into(),
            ));
        }
        if self.domain_key_length == 0 {
            return Err(CheckError::InvalidConfig(
                "domain_key_length must be at least 1".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(CheckError::InvalidConfig(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        if self.local_extensions.iter().all(|ext| ext.trim().is_empty()) {
            return Err(CheckError::InvalidConfig(
                "local_extensions must name at least one extension".into(),
            ));
        }
        Ok(())
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn local_timeout(&self) -> Duration {
        Duration::from_millis(self.local_timeout_ms)
    }
}
