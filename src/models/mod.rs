//! Data models module
//!
//! Defines core data structures:
//! - ProcessRecord: One live process and the executable backing it
//! - Census: Library base name to occurrence count
//! - Snapshot: The record uploaded to the collector
//! - AgentConfig: Explicit run configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_LDD_PROGRAM, DEFAULT_OS_RELEASE_PATH, DEFAULT_PROC_ROOT, DEFAULT_UPLOAD_URL,
};

/// Base file name of a shared library (no directory component)
pub type LibraryName = String;

/// Library base name mapped to the number of distinct executables linking it.
/// Every key has a count of at least one.
pub type Census = BTreeMap<LibraryName, u64>;

/// A process seen during enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    /// Directory name under the process root
    pub pid: String,
    /// Resolved executable; empty when the link could not be read
    pub executable_path: PathBuf,
}

impl ProcessRecord {
    pub fn is_resolved(&self) -> bool {
        !self.executable_path.as_os_str().is_empty()
    }
}

/// Complete record sent to the collector for one run.
///
/// Field names on the wire are fixed by the collector and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "TxID")]
    pub transfer_id: String,
    #[serde(rename = "Hostname")]
    pub hostname: String,
    #[serde(rename = "Libs")]
    pub libs: Census,
    #[serde(rename = "Os")]
    pub os: String,
}

impl Snapshot {
    pub fn new(
        transfer_id: impl Into<String>,
        hostname: impl Into<String>,
        os: impl Into<String>,
        libs: Census,
    ) -> Self {
        Self {
            transfer_id: transfer_id.into(),
            hostname: hostname.into(),
            libs,
            os: os.into(),
        }
    }

    /// Number of distinct libraries in the census
    pub fn library_count(&self) -> usize {
        self.libs.len()
    }
}

/// Statistics gathered while walking the process table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverySummary {
    /// Process directories enumerated
    pub processes_seen: usize,
    /// Distinct executables whose libraries were accumulated
    pub executables_analyzed: usize,
    /// Processes whose executable link could not be resolved
    pub unresolved: usize,
    /// Length of the flat library sequence
    pub libraries_found: usize,
}

/// Output of a discovery pass: every library reported, once per distinct executable
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub libraries: Vec<LibraryName>,
    pub summary: DiscoverySummary,
}

/// Configuration for a single snapshot-and-send run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Opaque token correlating the upload with an external tracking context
    pub transfer_id: String,
    /// Collector endpoint
    pub upload_url: String,
    /// Replaces the discovered hostname when set
    pub hostname_override: Option<String>,
    /// Process-information root (normally /proc)
    pub proc_root: PathBuf,
    /// Linker-inspection utility
    pub ldd_program: PathBuf,
    /// Release metadata file holding the OS name
    pub os_release_path: PathBuf,
    /// Print the snapshot instead of uploading it
    pub dry_run: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            transfer_id: String::new(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            hostname_override: None,
            proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
            ldd_program: PathBuf::from(DEFAULT_LDD_PROGRAM),
            os_release_path: PathBuf::from(DEFAULT_OS_RELEASE_PATH),
            dry_run: false,
        }
    }
}

/// Errors raised while reading the process table
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("process root {} is unavailable: {source}", .root.display())]
    Unavailable {
        root: PathBuf,
        source: std::io::Error,
    },
}
