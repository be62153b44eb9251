//! streamview inspection binary.
//!
//! # Usage
//!
//! ```bash
//! # Stream list sections
//! streamview streams --state state.json
//!
//! # One message as shown in the mentions list
//! streamview render --state state.json --message 42 --list-kind mentioned
//! ```

use std::io::{self, Write};

use clap::Parser;
use streamview_cli::{Args, run};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    let mut out = io::stdout().lock();
    if let Err(error) = run(&args.command, &mut out) {
        tracing::error!(%error, "command failed");
        return Err(error.into());
    }
    out.flush()?;

    Ok(())
}
