//! Namespaced XML element tree
//!
//! Builds a small in-memory tree from quick-xml events so the feed model can
//! run document-order descendant queries, the way the Zero Install schema is
//! usually navigated. Namespace resolution matters here: the injector
//! namespace and the gfxmonk vendor namespace share one document.

use crate::{Result, Zero2PypiError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

/// One XML element: resolved namespace, local name, attributes, children
/// and accumulated character data.
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Resolved namespace URI, if the element is in one
    pub ns: Option<String>,

    /// Local name (prefix stripped)
    pub name: String,

    /// Attributes in document order, local name -> value
    pub attrs: Vec<(String, String)>,

    /// Child elements in document order
    pub children: Vec<Element>,

    /// Concatenated text content of this element (direct text nodes only)
    pub text: String,
}

impl Element {
    /// Look up an attribute by local name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// True if this element has the given namespace and local name
    pub fn is(&self, ns: &str, name: &str) -> bool {
        self.name == name && self.ns.as_deref() == Some(ns)
    }

    /// All descendant elements matching (namespace, local name), in document
    /// order. Does not include the element itself.
    pub fn descendants(&self, ns: &str, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(ns, name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, ns: &str, name: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.is(ns, name) {
                found.push(child);
            }
            child.collect_descendants(ns, name, found);
        }
    }

    /// Direct children with the given local name, any namespace
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// Parse an XML document into an element tree
///
/// Fails with a `Parse` error on anything quick-xml rejects (unbalanced
/// tags, bad attribute syntax, invalid entities).
pub fn parse(xml: &str) -> Result<Element> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_resolved_event() {
            Ok((ns, Event::Start(ref e))) => {
                stack.push(element_from(&ns, e)?);
            }
            Ok((ns, Event::Empty(ref e))) => {
                let element = element_from(&ns, e)?;
                attach(&mut stack, &mut root, element);
            }
            Ok((_, Event::Text(ref t))) => {
                let text = t.unescape().map_err(|e| {
                    Zero2PypiError::Parse(format!("Invalid text content: {}", e))
                })?;
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&text);
                }
            }
            Ok((_, Event::CData(ref t))) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(t));
                }
            }
            Ok((_, Event::End(_))) => {
                // quick-xml has already checked tag balance
                let element = stack
                    .pop()
                    .ok_or_else(|| Zero2PypiError::Parse("Unbalanced end tag".to_string()))?;
                attach(&mut stack, &mut root, element);
            }
            Ok((_, Event::Eof)) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Zero2PypiError::Parse(format!(
                    "Error parsing feed XML: {}",
                    e
                )));
            }
        }
    }

    root.ok_or_else(|| Zero2PypiError::Parse("Document has no root element".to_string()))
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        // First completed top-level element wins; minidom would reject
        // trailing siblings but quick-xml tolerates them
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

fn element_from(ns: &ResolveResult, e: &BytesStart) -> Result<Element> {
    let ns = match ns {
        ResolveResult::Bound(Namespace(ns)) => Some(String::from_utf8_lossy(ns).into_owned()),
        _ => None,
    };
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();

    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr =
            attr.map_err(|e| Zero2PypiError::Parse(format!("Invalid attribute: {}", e)))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Zero2PypiError::Parse(format!("Invalid attribute value: {}", e)))?
            .into_owned();
        attrs.push((key, value));
    }

    Ok(Element {
        ns,
        name,
        attrs,
        children: Vec::new(),
        text: String::new(),
    })
}
