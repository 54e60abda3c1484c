//! Logger initialisation
//!
//! Log lines go to stderr through `env_logger`. The filter comes from
//! `LIBCENSUS_LOG` when set, otherwise from the verbosity flags.

use anyhow::{anyhow, Result};
use log::LevelFilter;

use crate::constants::LOG_ENV_VAR;

/// Default filter: our own crate at `level`, dependencies at warn
pub fn default_filter(level: LevelFilter) -> String {
    format!("warn,libcensus={}", level.to_string().to_lowercase())
}

pub fn init_logger(level: LevelFilter) -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::new().filter_or(LOG_ENV_VAR, default_filter(level)),
    )
    .try_init()
    .map_err(|e| anyhow!("Failed to set logger: {}", e))
}
