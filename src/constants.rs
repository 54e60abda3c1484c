//! Global constants for libcensus
//!
//! Centralized location for application-wide defaults

use std::time::Duration;

/// Collector endpoint used when neither the command line nor a config file names one
pub const DEFAULT_UPLOAD_URL: &str = "https://libsoup.com/api/v1/upload";

/// Root of the process-information pseudo-filesystem
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Linker-inspection utility invoked once per distinct executable
pub const DEFAULT_LDD_PROGRAM: &str = "ldd";

/// Release metadata file the OS name is read from
pub const DEFAULT_OS_RELEASE_PATH: &str = "/etc/os-release";

/// Ceiling on the single upload round trip
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(15);

/// Environment variable holding the log filter
pub const LOG_ENV_VAR: &str = "LIBCENSUS_LOG";
