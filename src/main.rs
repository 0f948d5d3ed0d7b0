//! zero2pypi - Zero Install feed to setup.py converter
//!
//! Main entry point for the zero2pypi CLI.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use zero2pypi::attrs::SetupAttrs;
use zero2pypi::feed::Feed;
use zero2pypi::mapping::NameMapping;
use zero2pypi::{deps, emit, entry_points, metadata};

/// Generate a setuptools setup.py from a Zero Install feed
#[derive(Parser, Debug)]
#[command(name = "zero2pypi")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the Zero Install feed to convert
    feed: PathBuf,
}

fn main() {
    if let Err(e) = zero2pypi::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> zero2pypi::Result<()> {
    // Built once, read-only for the rest of the run
    let mapping = NameMapping::load();

    let feed = Feed::load(&cli.feed)?;
    tracing::debug!(url = %feed.url, name = %feed.name, "Loaded feed");

    let requirements = feed.requirements()?;
    let install_requires = deps::resolve_dependencies(&requirements, &mapping);
    let metadata = metadata::extract(&feed, Path::new("."))?;
    let entry_points = entry_points::derive(&feed.name, feed.canonical_group()?);

    let attrs = SetupAttrs::assemble(feed.name.clone(), install_requires, metadata, entry_points);

    let dest = Path::new("setup.py");
    emit::write_setup_py(&attrs, dest)?;

    println!("# Now run:\n./{} register", dest.display());
    Ok(())
}
