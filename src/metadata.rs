//! Metadata extraction
//!
//! Pulls the descriptive setup.py fields out of the feed and the working
//! directory: version, URLs, summary/description and the list of local
//! top-level python modules. Returns a partial record the caller merges
//! into the final attribute set.

use crate::feed::{Feed, ZEROINSTALL_NS, ZERO2PYPI_FEED};
use crate::Result;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Descriptive fields extracted from a feed
#[derive(Debug)]
pub struct Metadata {
    /// Canonical implementation's version attribute, empty when absent
    pub version: String,

    /// Feed public identifier
    pub url: String,

    /// First archive href of the canonical implementation, kept only when
    /// it looks like a real URL
    pub download_url: Option<String>,

    /// Feed summary
    pub description: Option<String>,

    /// Generated-by notice wrapping the feed's own description
    pub long_description: String,

    /// Local top-level python modules, sorted; empty set becomes None
    pub py_modules: Option<Vec<String>>,

    /// Raw `pypi-extra` vendor text for the emitter
    pub extras: Option<String>,
}

/// Extract metadata from a feed. `module_dir` is scanned for `*.py`
/// modules, normally the working directory.
pub fn extract(feed: &Feed, module_dir: &Path) -> Result<Metadata> {
    let implementation = feed.canonical_implementation()?;

    let version = implementation.attr("version").unwrap_or("").to_string();

    let download_url = implementation
        .descendants(ZEROINSTALL_NS, "archive")
        .iter()
        .filter_map(|archive| archive.attr("href"))
        .find(|href| !href.is_empty())
        .filter(|href| href.contains("://"))
        .map(str::to_owned);

    let long_description = format!(
        "\n**Note**: This package has been built automatically by\n\
         `zero2pypi <{tool_uri}>`_.\n\
         If possible, you should use the zero-install feed instead:\n\
         {uri}\n\
         \n\
         ----------------\n\
         \n\
         {description}\n",
        tool_uri = ZERO2PYPI_FEED,
        uri = feed.url,
        description = feed.description().unwrap_or_default(),
    );

    let modules = scan_py_modules(module_dir)?;

    Ok(Metadata {
        version,
        url: feed.url.clone(),
        download_url,
        description: feed.summary(),
        long_description,
        py_modules: if modules.is_empty() {
            None
        } else {
            Some(modules)
        },
        extras: feed.pypi_extra(),
    })
}

/// Top-level `*.py` modules in `dir`, suffix stripped, sorted and deduped.
/// Test modules and the reserved `setup`/`test`/`conf` names are excluded:
/// they exist in the source tree but don't belong in a distribution.
fn scan_py_modules(dir: &Path) -> Result<Vec<String>> {
    let mut modules = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let Some(module) = file_name.strip_suffix(".py") else {
            continue;
        };
        if module.starts_with("test") || module.ends_with("test") {
            continue;
        }
        if matches!(module, "setup" | "test" | "conf") {
            continue;
        }
        modules.insert(module.to_string());
    }
    Ok(modules.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    const FEED: &str = r#"<interface uri="http://example.org/myproject.xml"
        xmlns="http://zero-install.sourceforge.net/2004/injector/interface">
        <summary>short blurb</summary>
        <description>full prose</description>
        <group>
            <implementation version="0.4">
                <archive href="http://example.org/myproject-0.4.tgz"/>
            </implementation>
        </group>
    </interface>"#;

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), "").unwrap();
    }

    #[test]
    fn test_basic_fields() {
        let feed = Feed::parse(Path::new("myproject.xml"), FEED).unwrap();
        let dir = TempDir::new().unwrap();
        let metadata = extract(&feed, dir.path()).unwrap();

        assert_eq!(metadata.version, "0.4");
        assert_eq!(metadata.url, "http://example.org/myproject.xml");
        assert_eq!(
            metadata.download_url.as_deref(),
            Some("http://example.org/myproject-0.4.tgz")
        );
        assert_eq!(metadata.description.as_deref(), Some("short blurb"));
        assert_eq!(metadata.py_modules, None);
    }

    #[test]
    fn test_long_description_template() {
        let feed = Feed::parse(Path::new("myproject.xml"), FEED).unwrap();
        let dir = TempDir::new().unwrap();
        let metadata = extract(&feed, dir.path()).unwrap();

        assert!(metadata
            .long_description
            .contains("built automatically by\n`zero2pypi <http://gfxmonk.net/dist/0install/zero2pypi.xml>`_."));
        assert!(metadata
            .long_description
            .contains("instead:\nhttp://example.org/myproject.xml"));
        assert!(metadata
            .long_description
            .contains("----------------\n\nfull prose\n"));
    }

    #[test]
    fn test_absent_optional_fields() {
        let xml = r#"<interface uri="http://example.org/x.xml"
            xmlns="http://zero-install.sourceforge.net/2004/injector/interface">
            <group><implementation/></group>
        </interface>"#;
        let feed = Feed::parse(Path::new("x.xml"), xml).unwrap();
        let dir = TempDir::new().unwrap();
        let metadata = extract(&feed, dir.path()).unwrap();

        assert_eq!(metadata.version, "");
        assert_eq!(metadata.download_url, None);
        assert_eq!(metadata.description, None);
        assert_eq!(metadata.extras, None);
        // missing description contributes an empty string to the template
        assert!(metadata
            .long_description
            .ends_with("----------------\n\n\n"));
    }

    #[test]
    fn test_relative_archive_href_dropped() {
        let xml = r#"<interface uri="http://example.org/x.xml"
            xmlns="http://zero-install.sourceforge.net/2004/injector/interface">
            <group>
                <implementation version="1">
                    <archive href="dist/x-1.tgz"/>
                </implementation>
            </group>
        </interface>"#;
        let feed = Feed::parse(Path::new("x.xml"), xml).unwrap();
        let dir = TempDir::new().unwrap();
        let metadata = extract(&feed, dir.path()).unwrap();
        assert_eq!(metadata.download_url, None);
    }

    #[test]
    fn test_py_modules_filtering() {
        let feed = Feed::parse(Path::new("myproject.xml"), FEED).unwrap();
        let dir = TempDir::new().unwrap();
        touch(&dir, "widget.py");
        touch(&dir, "another.py");
        touch(&dir, "test_widget.py"); // starts with test
        touch(&dir, "widget_unittest.py"); // ends with test
        touch(&dir, "setup.py"); // reserved
        touch(&dir, "test.py"); // reserved
        touch(&dir, "conf.py"); // reserved
        touch(&dir, "notes.txt"); // not a module

        let metadata = extract(&feed, dir.path()).unwrap();
        assert_eq!(
            metadata.py_modules,
            Some(vec!["another".to_string(), "widget".to_string()])
        );
    }
}
