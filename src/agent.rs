//! One snapshot-and-send run
//!
//! Gathers the OS name, the library census and the hostname, assembles the
//! snapshot and hands it to the transport. Every failure past argument
//! parsing ends in a log line, never in an error returned to `main`.

use anyhow::{Context, Result};
use log::error;

use crate::discovery::{build_census, DiscoveryCoordinator};
use crate::host;
use crate::libraries::LddInspector;
use crate::models::{AgentConfig, Census, Snapshot};
use crate::output;
use crate::transport::{self, UploadReport, Uploader};

/// Combine the identity fields and the census into the record to upload
pub fn assemble_snapshot(
    transfer_id: &str,
    hostname: &str,
    os: &str,
    census: Census,
) -> Snapshot {
    Snapshot::new(transfer_id, hostname, os, census)
}

/// Scan the host and build its snapshot.
///
/// Fails only when no hostname can be determined.
pub fn collect_snapshot(config: &AgentConfig) -> Result<Snapshot> {
    let os = host::discover_os(&config.os_release_path);

    let inspector = LddInspector::new(&config.ldd_program)?;
    let discovery = DiscoveryCoordinator::new(&config.proc_root, inspector).analyze_processes();
    let census = build_census(&discovery.libraries);

    let hostname = host::resolve_hostname(config.hostname_override.as_deref())
        .context("getting hostname")?;

    Ok(assemble_snapshot(&config.transfer_id, &hostname, &os, census))
}

/// Run the whole pipeline once.
///
/// Returns the collector's answer when a round trip completed.
pub async fn run(config: &AgentConfig) -> Option<UploadReport> {
    let snapshot = match collect_snapshot(config) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            error!("ERROR {:#}", err);
            return None;
        }
    };

    if config.dry_run {
        if let Err(err) = output::print_snapshot(&snapshot) {
            error!("ERROR printing snapshot: {:#}", err);
        }
        return None;
    }

    let uploader = match Uploader::new(config.upload_url.as_str()) {
        Ok(uploader) => uploader,
        Err(err) => {
            error!("ERROR {}", err);
            return None;
        }
    };

    transport::deliver(&uploader, &snapshot).await
}
