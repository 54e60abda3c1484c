//! Output formatting module
//!
//! Renders a snapshot for `--dry-run`, using the same field names the
//! collector receives.

use anyhow::Result;

use crate::models::Snapshot;

/// Format a snapshot as pretty-printed JSON
pub fn format_snapshot_json(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Print a snapshot to stdout
pub fn print_snapshot(snapshot: &Snapshot) -> Result<()> {
    println!("{}", format_snapshot_json(snapshot)?);
    Ok(())
}
