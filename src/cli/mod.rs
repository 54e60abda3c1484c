//! CLI argument parsing and validation module
//!
//! Handles command-line interface using clap, including:
//! - Collector endpoint, transfer ID and hostname override
//! - Optional TOML configuration file
//! - Overrides for the process root, ldd and os-release locations
//! - Dry-run and verbosity modes

pub mod config;

use anyhow::{anyhow, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;
use std::path::PathBuf;

use libcensus::models::AgentConfig;

use self::config::FileConfiguration;

/// Everything `main` needs to start a run
#[derive(Debug, Clone)]
pub struct CliOptions {
    pub config: AgentConfig,
    pub log_level: LevelFilter,
}

pub fn build_command() -> Command {
    Command::new("libcensus")
        .version(env!("LIBCENSUS_VERSION"))
        .long_version(concat!(env!("LIBCENSUS_VERSION"), " (", env!("GIT_HASH"), ")"))
        .about("Report the shared libraries used by running processes")
        .long_about("Takes one snapshot of the shared libraries loaded by the executables of all running processes and uploads it to a collector.")
        .arg(
            Arg::new("hostname")
                .short('n')
                .long("hostname")
                .value_name("NAME")
                .help("Override the discovered hostname")
        )
        .arg(
            Arg::new("upload-url")
                .short('a')
                .long("upload-url")
                .value_name("URL")
                .help("Collector upload endpoint")
        )
        .arg(
            Arg::new("id")
                .long("id")
                .value_name("TRANSFER_ID")
                .help("Agent transfer ID")
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Read settings from a TOML file")
        )
        .arg(
            Arg::new("proc-root")
                .long("proc-root")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Process-information root to scan")
        )
        .arg(
            Arg::new("ldd")
                .long("ldd")
                .value_name("PROGRAM")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Linker-inspection utility to run per executable")
        )
        .arg(
            Arg::new("os-release")
                .long("os-release")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Release file to read the OS name from")
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Print the snapshot as JSON instead of uploading it")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log per-process details")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue)
        )
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<CliOptions> {
    options_from_matches(&build_command().get_matches())
}

/// Resolve defaults, then the config file, then command-line flags
pub fn options_from_matches(matches: &ArgMatches) -> Result<CliOptions> {
    let mut config = AgentConfig::default();

    if let Some(path) = matches.get_one::<PathBuf>("config") {
        FileConfiguration::load(path)?.apply_to(&mut config);
    }

    if let Some(hostname) = matches.get_one::<String>("hostname") {
        config.hostname_override = Some(hostname.clone());
    }
    if let Some(url) = matches.get_one::<String>("upload-url") {
        config.upload_url = url.clone();
    }
    if let Some(id) = matches.get_one::<String>("id") {
        config.transfer_id = id.clone();
    }
    if let Some(root) = matches.get_one::<PathBuf>("proc-root") {
        config.proc_root = root.clone();
    }
    if let Some(ldd) = matches.get_one::<PathBuf>("ldd") {
        config.ldd_program = ldd.clone();
    }
    if let Some(os_release) = matches.get_one::<PathBuf>("os-release") {
        config.os_release_path = os_release.clone();
    }
    config.dry_run = matches.get_flag("dry-run");

    if config.upload_url.trim().is_empty() && !config.dry_run {
        return Err(anyhow!("Upload URL must not be empty"));
    }

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else if matches.get_flag("quiet") {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };

    Ok(CliOptions { config, log_level })
}
