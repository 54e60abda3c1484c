//! Process table scanning module
//!
//! Responsible for:
//! - Listing process directories under the process-information root
//! - Resolving the `exe` link of a single process
//!
//! Processes may exit at any point between listing and resolution, so a
//! missing link is an ordinary outcome rather than an error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{DiscoveryError, ProcessRecord};

/// List the process identifiers visible under `proc_root`.
///
/// Only directory entries with numeric names are returned, in ascending
/// numeric order. Entries that vanish or cannot be inspected while the
/// directory is being read are skipped.
pub fn list_process_ids(proc_root: &Path) -> Result<Vec<String>, DiscoveryError> {
    let entries = fs::read_dir(proc_root).map_err(|source| DiscoveryError::Unavailable {
        root: proc_root.to_path_buf(),
        source,
    })?;

    let mut pids: Vec<(u64, String)> = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue, // Skip unreadable entries
        };

        // file_type does not follow symlinks, so /proc/self is excluded here
        let is_dir = match entry.file_type() {
            Ok(file_type) => file_type.is_dir(),
            Err(_) => false,
        };
        if !is_dir {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if let Ok(numeric) = name.parse::<u64>() {
            pids.push((numeric, name));
        }
    }

    pids.sort_unstable_by_key(|(numeric, _)| *numeric);
    Ok(pids.into_iter().map(|(_, name)| name).collect())
}

/// Resolve the executable backing process `pid`.
///
/// Returns `None` when the process has exited or the link is not readable.
pub fn resolve_executable(proc_root: &Path, pid: &str) -> Option<PathBuf> {
    fs::read_link(proc_root.join(pid).join("exe")).ok()
}

/// Build the record for one process, with an empty path when unresolved
pub fn process_record(proc_root: &Path, pid: &str) -> ProcessRecord {
    ProcessRecord {
        pid: pid.to_string(),
        executable_path: resolve_executable(proc_root, pid).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;
    use tempfile::TempDir;

    fn fake_proc() -> TempDir {
        let root = tempfile::tempdir().unwrap();
        for pid in ["1", "42", "7"] {
            fs::create_dir(root.path().join(pid)).unwrap();
        }
        // Non-process directories and plain files found under a real /proc
        fs::create_dir(root.path().join("sys")).unwrap();
        fs::write(root.path().join("uptime"), "1.0 1.0").unwrap();
        root
    }

    #[test]
    fn test_lists_numeric_directories_in_order() {
        let root = fake_proc();

        let pids = list_process_ids(root.path()).unwrap();
        assert_eq!(pids, vec!["1", "7", "42"]);
    }

    #[test]
    fn test_symlinked_directories_are_not_processes() {
        let root = fake_proc();
        symlink(root.path().join("42"), root.path().join("9999")).unwrap();

        let pids = list_process_ids(root.path()).unwrap();
        assert!(!pids.contains(&"9999".to_string()));
    }

    #[test]
    fn test_empty_root_yields_no_processes() {
        let root = tempfile::tempdir().unwrap();
        assert!(list_process_ids(root.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_is_unavailable() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("not-proc");

        match list_process_ids(&missing) {
            Err(DiscoveryError::Unavailable { root, .. }) => assert_eq!(root, missing),
            Ok(pids) => panic!("expected an error, got {:?}", pids),
        }
    }

    #[test]
    fn test_resolve_executable_follows_exe_link() {
        let root = fake_proc();
        symlink("/usr/bin/bash", root.path().join("42").join("exe")).unwrap();

        assert_eq!(
            resolve_executable(root.path(), "42"),
            Some(PathBuf::from("/usr/bin/bash"))
        );
    }

    #[test]
    fn test_vanished_process_is_unresolved() {
        let root = fake_proc();

        assert_eq!(resolve_executable(root.path(), "7"), None);
        assert_eq!(resolve_executable(root.path(), "31337"), None);

        let record = process_record(root.path(), "31337");
        assert_eq!(record.pid, "31337");
        assert!(!record.is_resolved());
    }
}
