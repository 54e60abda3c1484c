#![forbid(unsafe_code)]

mod cli;

use anyhow::Result;
use libcensus::{agent, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let options = cli::parse_args()?;
    logging::init_logger(options.log_level)?;

    // Outcome is reported through the log; the process itself exits cleanly
    agent::run(&options.config).await;

    Ok(())
}
