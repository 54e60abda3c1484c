//! Configuration file support
//!
//! Handles TOML parsing of the optional agent configuration file. Every key
//! is optional; command-line flags take precedence over file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use libcensus::models::AgentConfig;

/// On-disk agent configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfiguration {
    /// Transfer ID attached to the upload
    pub transfer_id: Option<String>,
    /// Collector endpoint
    pub upload_url: Option<String>,
    /// Hostname reported instead of the local one
    pub hostname: Option<String>,
    /// Process-information root
    pub proc_root: Option<PathBuf>,
    /// Linker-inspection utility
    pub ldd: Option<PathBuf>,
    /// Release metadata file
    pub os_release: Option<PathBuf>,
}

impl FileConfiguration {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Overlay the values present in the file onto `config`
    pub fn apply_to(self, config: &mut AgentConfig) {
        if let Some(transfer_id) = self.transfer_id {
            config.transfer_id = transfer_id;
        }
        if let Some(upload_url) = self.upload_url {
            config.upload_url = upload_url;
        }
        if let Some(hostname) = self.hostname {
            config.hostname_override = Some(hostname);
        }
        if let Some(proc_root) = self.proc_root {
            config.proc_root = proc_root;
        }
        if let Some(ldd) = self.ldd {
            config.ldd_program = ldd;
        }
        if let Some(os_release) = self.os_release {
            config.os_release_path = os_release;
        }
    }
}
