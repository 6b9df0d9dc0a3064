//! Channel directory search tool
//!
//! Usage:
//!   cf-find --db channels.db --tag urgent 'color=red' 'size=1?'
//!
//! The catalog is opened read-only unless `--read-write` is given.

use anyhow::Result;
use channelfinder_cli::Args;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut out = std::io::stdout().lock();
    channelfinder_cli::run(&args, &mut out)?;
    Ok(())
}
