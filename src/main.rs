#[macro_use]
extern crate tracing;

use anyhow::Result;
use clap::Parser;

mod apply;
mod cli;
mod discover;
mod process;
mod report;
mod sidecar;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = cli::Args::parse();

    println!("=== GooglePhotosMetaFix ===");

    let (source, destination) = args.resolve_directories()?;

    process::start(&source, &destination)
}
