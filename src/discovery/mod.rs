//! Process-to-library discovery
//!
//! Walks the process table, resolves each process's executable and asks the
//! inspector for its libraries. Every distinct executable is inspected at
//! most once per run, however many processes share it.

pub mod census;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::libraries::LibraryInspector;
use crate::models::{Discovery, DiscoverySummary, LibraryName, ProcessRecord};
use crate::scan;

pub use census::build_census;

/// Drives enumeration, resolution and extraction for one snapshot
pub struct DiscoveryCoordinator<I: LibraryInspector> {
    proc_root: PathBuf,
    inspector: I,
}

impl<I: LibraryInspector> DiscoveryCoordinator<I> {
    pub fn new(proc_root: impl Into<PathBuf>, inspector: I) -> Self {
        Self {
            proc_root: proc_root.into(),
            inspector,
        }
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    /// Enumerate the process table and gather libraries from every distinct
    /// executable. An unreadable process root is logged and treated as an
    /// empty table.
    pub fn analyze_processes(&self) -> Discovery {
        let pids = match scan::list_process_ids(&self.proc_root) {
            Ok(pids) => pids,
            Err(err) => {
                error!("ERROR reading process table: {}", err);
                Vec::new()
            }
        };

        let discovery = self.analyze_pids(&pids);
        let summary = &discovery.summary;
        info!(
            "Scanned processes={} executables={} unresolved={} libraries={}",
            summary.processes_seen,
            summary.executables_analyzed,
            summary.unresolved,
            summary.libraries_found
        );
        discovery
    }

    /// Gather libraries for the given process identifiers, in order.
    ///
    /// When several processes share an executable only the first one
    /// encountered contributes. Unresolved processes share the empty path
    /// as their key, so after the first one they are skipped as well.
    pub fn analyze_pids(&self, pids: &[String]) -> Discovery {
        let mut analyzed: HashSet<PathBuf> = HashSet::new();
        let mut libraries: Vec<LibraryName> = Vec::new();
        let mut summary = DiscoverySummary::default();

        for pid in pids {
            summary.processes_seen += 1;

            let record = scan::process_record(&self.proc_root, pid);
            if !record.is_resolved() {
                summary.unresolved += 1;
            }

            if analyzed.contains(&record.executable_path) {
                continue;
            }

            let (executable, found) = self.extract(&record);
            if record.is_resolved() {
                summary.executables_analyzed += 1;
            }
            libraries.extend(found);
            analyzed.insert(executable);
        }

        summary.libraries_found = libraries.len();
        Discovery { libraries, summary }
    }

    /// Libraries for one process, paired with the executable they came from.
    ///
    /// The path is returned even when nothing was found so that the caller
    /// can still mark it as analyzed.
    pub fn extract(&self, record: &ProcessRecord) -> (PathBuf, Vec<LibraryName>) {
        if !record.is_resolved() {
            debug!("Process {} has no resolvable executable", record.pid);
            return (record.executable_path.clone(), Vec::new());
        }

        let libraries = self.inspector.linked_libraries(&record.executable_path);
        debug!(
            "Process {} ({}) links {} libraries",
            record.pid,
            record.executable_path.display(),
            libraries.len()
        );
        (record.executable_path.clone(), libraries)
    }
}
