//! Zero Install feed model
//!
//! Loads a feed document and exposes the pieces the converter cares about:
//! the public identifier, the canonical group and implementation, the
//! free-text summary/description fields and the gfxmonk `pypi-extra`
//! vendor extension.
//!
//! "Canonical" means the *last* group in document order and the last
//! implementation inside it, relying on feed authors appending releases.
//! Known limitation: a feed with concurrent release branches can pick the
//! wrong one, and no semantic version comparison is attempted.

mod xml;

pub use xml::Element;

use crate::{Result, Zero2PypiError};
use std::fs;
use std::path::Path;

/// The Zero Install injector interface namespace
pub const ZEROINSTALL_NS: &str = "http://zero-install.sourceforge.net/2004/injector/interface";

/// The gfxmonk vendor extension namespace (carries `pypi-extra`)
pub const GFXMONK_NS: &str = "http://gfxmonk.net/dist/0install";

/// Feed URL of the zero2pypi tool itself, embedded in generated output
pub const ZERO2PYPI_FEED: &str = "http://gfxmonk.net/dist/0install/zero2pypi.xml";

/// A parsed feed plus the identity derived for the generated package
#[derive(Debug)]
pub struct Feed {
    /// Package short name, taken from the feed's file name (never from XML)
    pub name: String,

    /// Public identifier: root `uri` attribute, or the `interface` of a
    /// `feed-for` element when the feed has no uri of its own
    pub url: String,

    root: Element,
}

impl Feed {
    /// Load and parse a feed from a file
    pub fn load(path: &Path) -> Result<Self> {
        let xml = fs::read_to_string(path)?;
        Self::parse(path, &xml)
    }

    /// Parse feed XML; `path` supplies the package name and error context
    pub fn parse(path: &Path, xml: &str) -> Result<Self> {
        let root = xml::parse(xml)?;

        let url = root
            .attr("uri")
            .filter(|uri| !uri.is_empty())
            .or_else(|| {
                root.descendants(ZEROINSTALL_NS, "feed-for")
                    .first()
                    .and_then(|e| e.attr("interface"))
                    .filter(|interface| !interface.is_empty())
            })
            .map(str::to_owned)
            .ok_or_else(|| Zero2PypiError::MissingIdentifier(path.to_path_buf()))?;

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Feed { name, url, root })
    }

    /// The last group in document order
    pub fn canonical_group(&self) -> Result<&Element> {
        self.root
            .descendants(ZEROINSTALL_NS, "group")
            .into_iter()
            .last()
            .ok_or_else(|| Zero2PypiError::FeedStructure("feed has no group elements".to_string()))
    }

    /// The last implementation, in document order, of the canonical group
    pub fn canonical_implementation(&self) -> Result<&Element> {
        self.canonical_group()?
            .descendants(ZEROINSTALL_NS, "implementation")
            .into_iter()
            .last()
            .ok_or_else(|| {
                Zero2PypiError::FeedStructure("latest group has no implementations".to_string())
            })
    }

    /// Requirements in resolution scan order: the canonical group's direct
    /// `requires` children first, then every `requires` under the canonical
    /// implementation.
    pub fn requirements(&self) -> Result<Vec<&Element>> {
        let group = self.canonical_group()?;
        let implementation = self.canonical_implementation()?;

        let mut requirements: Vec<&Element> = group.children_named("requires").collect();
        requirements.extend(implementation.descendants(ZEROINSTALL_NS, "requires"));
        Ok(requirements)
    }

    /// The feed's one-line summary, if any
    pub fn summary(&self) -> Option<String> {
        self.text_of(ZEROINSTALL_NS, "summary")
    }

    /// The feed's free-text description, if any
    pub fn description(&self) -> Option<String> {
        self.text_of(ZEROINSTALL_NS, "description")
    }

    /// Raw `pypi-extra` vendor text, passed through to the emitter verbatim
    pub fn pypi_extra(&self) -> Option<String> {
        self.text_of(GFXMONK_NS, "pypi-extra")
    }

    fn text_of(&self, ns: &str, name: &str) -> Option<String> {
        self.root
            .descendants(ns, name)
            .first()
            .map(|e| e.text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0"?>
<interface uri="http://example.org/myproject.xml"
        xmlns="http://zero-install.sourceforge.net/2004/injector/interface"
        xmlns:pypi="http://gfxmonk.net/dist/0install">
    <name>myproject</name>
    <summary>a test project</summary>
    <description>longer prose
about the project</description>
    <pypi:pypi-extra>classifiers=['Development Status :: 4 - Beta'],</pypi:pypi-extra>
    <group main="old.py">
        <implementation version="0.1"/>
    </group>
    <group main="main.py">
        <requires interface="http://example.org/foo.xml"/>
        <implementation version="0.2">
            <archive href="http://example.org/myproject-0.2.tgz"/>
        </implementation>
        <implementation version="0.3">
            <requires interface="http://example.org/bar.xml"/>
        </implementation>
    </group>
</interface>
"#;

    fn feed() -> Feed {
        Feed::parse(Path::new("myproject.xml"), FEED).unwrap()
    }

    #[test]
    fn test_identity_from_uri_and_path() {
        let feed = feed();
        assert_eq!(feed.url, "http://example.org/myproject.xml");
        assert_eq!(feed.name, "myproject");
    }

    #[test]
    fn test_feed_for_fallback() {
        let xml = r#"<interface xmlns="http://zero-install.sourceforge.net/2004/injector/interface">
            <feed-for interface="http://example.org/upstream.xml"/>
            <group><implementation version="1"/></group>
        </interface>"#;
        let feed = Feed::parse(Path::new("local.xml"), xml).unwrap();
        assert_eq!(feed.url, "http://example.org/upstream.xml");
    }

    #[test]
    fn test_missing_identifier() {
        let xml = r#"<interface xmlns="http://zero-install.sourceforge.net/2004/injector/interface">
            <group><implementation version="1"/></group>
        </interface>"#;
        let err = Feed::parse(Path::new("anon.xml"), xml).unwrap_err();
        assert!(matches!(err, Zero2PypiError::MissingIdentifier(_)));
    }

    #[test]
    fn test_canonical_group_is_last() {
        let feed = feed();
        let group = feed.canonical_group().unwrap();
        assert_eq!(group.attr("main"), Some("main.py"));
    }

    #[test]
    fn test_canonical_implementation_is_last_of_last_group() {
        let feed = feed();
        let implementation = feed.canonical_implementation().unwrap();
        assert_eq!(implementation.attr("version"), Some("0.3"));
    }

    #[test]
    fn test_requirement_scan_order() {
        let feed = feed();
        let requirements = feed.requirements().unwrap();
        let interfaces: Vec<_> = requirements
            .iter()
            .filter_map(|r| r.attr("interface"))
            .collect();
        // group's direct requires first, then the implementation's
        assert_eq!(
            interfaces,
            vec!["http://example.org/foo.xml", "http://example.org/bar.xml"]
        );
    }

    #[test]
    fn test_free_text_fields() {
        let feed = feed();
        assert_eq!(feed.summary().as_deref(), Some("a test project"));
        assert_eq!(
            feed.description().as_deref(),
            Some("longer prose\nabout the project")
        );
        assert_eq!(
            feed.pypi_extra().as_deref(),
            Some("classifiers=['Development Status :: 4 - Beta'],")
        );
    }

    #[test]
    fn test_absent_free_text_fields() {
        let xml = r#"<interface uri="http://example.org/x.xml"
            xmlns="http://zero-install.sourceforge.net/2004/injector/interface">
            <group><implementation version="1"/></group>
        </interface>"#;
        let feed = Feed::parse(Path::new("x.xml"), xml).unwrap();
        assert_eq!(feed.summary(), None);
        assert_eq!(feed.description(), None);
        assert_eq!(feed.pypi_extra(), None);
    }

    #[test]
    fn test_feed_without_groups() {
        let xml = r#"<interface uri="http://example.org/x.xml"
            xmlns="http://zero-install.sourceforge.net/2004/injector/interface"/>"#;
        let feed = Feed::parse(Path::new("x.xml"), xml).unwrap();
        assert!(matches!(
            feed.canonical_group(),
            Err(Zero2PypiError::FeedStructure(_))
        ));
    }

    #[test]
    fn test_malformed_feed() {
        let err = Feed::parse(Path::new("x.xml"), "<interface>").unwrap_err();
        assert!(matches!(err, Zero2PypiError::Parse(_)));
    }
}
