//! Dependency resolution
//!
//! Turns the feed's `requires` elements into pip-style requirement strings.
//! Every run starts from a baseline dependency on setuptools, since the
//! generated descriptor needs it to build at all. The resolution
//! diagnostics printed here are part of the tool's observable output: the
//! user is expected to eyeball the assumed PyPI names and fix them up via
//! a `.zero2pypi` mapping file when they are wrong.

use crate::feed::{Element, ZEROINSTALL_NS};
use crate::mapping::{short_name, NameMapping};

/// The one dependency every generated descriptor carries
const BASELINE: &str = "setuptools";

/// PyPI name a Zero Install interface maps to: the user override if one
/// exists (full URL first, then short name), otherwise the short name.
pub fn extract_name_for_url(url: &str, mapping: &NameMapping) -> String {
    mapping
        .resolve(url)
        .unwrap_or_else(|| short_name(url))
        .to_string()
}

/// Resolve requirements into `install_requires` entries, in scan order,
/// starting with the setuptools baseline. A requirement that resolves to
/// `python` is skipped: the target ecosystem provides it implicitly.
/// Duplicates are not collapsed.
pub fn resolve_dependencies(requirements: &[&Element], mapping: &NameMapping) -> Vec<String> {
    let mut names = vec![BASELINE.to_string()];
    for requirement in requirements {
        let url = requirement.attr("interface").unwrap_or("");
        let mut name = extract_name_for_url(url, mapping);
        println!("assuming http://pypi.python.org/pypi/{} for ({})\n", name, url);
        if name == "python" {
            println!("Skipping dependency on \"python\"...");
            continue;
        }

        let mut conditions = Vec::new();
        for version_spec in requirement.descendants(ZEROINSTALL_NS, "version") {
            // absent or empty bounds contribute nothing; the bound strings
            // themselves are never validated
            if let Some(not_before) = version_spec.attr("not-before").filter(|v| !v.is_empty()) {
                conditions.push(format!(">={}", not_before));
            }
            if let Some(before) = version_spec.attr("before").filter(|v| !v.is_empty()) {
                conditions.push(format!("<{}", before));
            }
        }
        if !conditions.is_empty() {
            println!("{:?}", conditions);
            name.push(' ');
            name.push_str(&conditions.join(", "));
        }
        names.push(name);
    }
    names
}
