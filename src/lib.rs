//! libcensus - Host Shared Library Census
//!
//! This library exposes the process-to-library discovery engine, the
//! census builder and the snapshot upload pipeline.

pub mod agent;
pub mod constants;
pub mod discovery;
pub mod host;
pub mod libraries;
pub mod logging;
pub mod models;
pub mod output;
pub mod scan;
pub mod transport;
