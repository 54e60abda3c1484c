//! Host identity: OS name and hostname
//!
//! Thin lookups feeding the snapshot. The OS name degrades to an empty
//! string; a missing hostname is an error because the collector keys
//! uploads on it.

use std::fs;
use std::path::Path;

use log::error;
use sysinfo::{System, SystemExt};

/// Errors resolving the host's identity
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("local hostname could not be determined")]
    HostnameUnavailable,
}

/// Read the OS name from an os-release style file.
///
/// Returns an empty string if the file cannot be read or has no `NAME` line.
pub fn discover_os(os_release: &Path) -> String {
    let contents = match fs::read_to_string(os_release) {
        Ok(contents) => contents,
        Err(err) => {
            error!("ERROR getting OS name from {}: {}", os_release.display(), err);
            return String::new();
        }
    };

    match os_name_from_release(&contents) {
        Some(name) => name,
        None => {
            error!("ERROR getting OS name: no NAME entry in {}", os_release.display());
            String::new()
        }
    }
}

/// Extract the `NAME=` value from os-release contents, unquoted
pub fn os_name_from_release(contents: &str) -> Option<String> {
    contents
        .lines()
        .find_map(|line| line.strip_prefix("NAME="))
        .map(|value| value.trim().trim_matches('"').trim_matches('\'').to_string())
}

/// The override when given and non-empty, otherwise the local hostname
pub fn resolve_hostname(hostname_override: Option<&str>) -> Result<String, HostError> {
    match hostname_override {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => local_hostname(),
    }
}

fn local_hostname() -> Result<String, HostError> {
    System::new()
        .host_name()
        .filter(|name| !name.is_empty())
        .ok_or(HostError::HostnameUnavailable)
}
