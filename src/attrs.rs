//! The assembled setup.py attribute set
//!
//! A structured record with one named field per setup() keyword, built by
//! merging the partial results of the extraction steps. Nothing mutates a
//! shared bag; the caller assembles this once and hands it to the emitter.

use crate::entry_points::EntryPoints;
use crate::metadata::Metadata;
use std::collections::BTreeMap;

/// Everything the emitter needs to render setup.py
#[derive(Debug)]
pub struct SetupAttrs {
    pub name: String,
    pub version: String,
    pub url: String,
    pub download_url: Option<String>,
    pub description: Option<String>,
    pub long_description: String,
    pub install_requires: Vec<String>,
    pub py_modules: Option<Vec<String>>,
    pub entry_points: BTreeMap<String, Vec<String>>,
    pub scripts: Option<Vec<String>>,

    /// Raw vendor text appended after the keyword lines, not a field of
    /// its own: it may contain an arbitrary python fragment
    pub extras: Option<String>,
}

impl SetupAttrs {
    /// Merge the partial extraction results into the final record
    pub fn assemble(
        name: String,
        install_requires: Vec<String>,
        metadata: Metadata,
        entry_points: EntryPoints,
    ) -> Self {
        SetupAttrs {
            name,
            version: metadata.version,
            url: metadata.url,
            download_url: metadata.download_url,
            description: metadata.description,
            long_description: metadata.long_description,
            install_requires,
            py_modules: metadata.py_modules,
            entry_points: entry_points.entry_points,
            scripts: entry_points.scripts,
            extras: metadata.extras,
        }
    }
}
