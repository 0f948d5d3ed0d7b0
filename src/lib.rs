//! zero2pypi - Zero Install feed to setup.py converter
//!
//! Reads a Zero Install XML feed and generates an executable setuptools
//! `setup.py` for the same component: the newest version group supplies
//! the version, dependencies and entry points, and optional `.zero2pypi`
//! mapping files translate interface URLs into PyPI package names.
//!
//! # Architecture
//!
//! - **feed**: XML parsing and the feed model (canonical group/implementation)
//! - **mapping**: user-supplied interface -> PyPI name overrides
//! - **deps**: requirement resolution into `install_requires` strings
//! - **metadata**: descriptive fields and local module discovery
//! - **entry_points**: console scripts and plugin registrations
//! - **attrs**: the assembled attribute record
//! - **emit**: python-literal rendering and file output

pub mod attrs;
pub mod deps;
pub mod emit;
pub mod entry_points;
pub mod error;
pub mod feed;
pub mod logging;
pub mod mapping;
pub mod metadata;

// Re-exports
pub use error::{Result, Zero2PypiError};
