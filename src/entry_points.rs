//! Entry point derivation
//!
//! Synthesizes setuptools entry points from the canonical group: the
//! group's main command becomes a console script (for python scripts) or a
//! plain script path, and a NOSETESTS_PLUGINS environment binding becomes
//! a nose plugin registration. Returns a partial record merged by the
//! caller.

use crate::feed::{Element, ZEROINSTALL_NS};
use std::collections::BTreeMap;

/// Environment binding name recognized as a nose plugin registration
const NOSE_BINDING: &str = "NOSETESTS_PLUGINS";

/// Entry point group nose looks plugins up under
const NOSE_GROUP: &str = "nose.plugins.0.10";

/// Entry point and script contributions for the attribute set
#[derive(Debug, Default)]
pub struct EntryPoints {
    /// setuptools entry_points mapping: group name -> entries
    pub entry_points: BTreeMap<String, Vec<String>>,

    /// Non-python main executable, installed verbatim as a script
    pub scripts: Option<Vec<String>>,
}

/// Derive entry points for `program_name` from the canonical group
pub fn derive(program_name: &str, group: &Element) -> EntryPoints {
    let mut result = EntryPoints::default();

    if let Some(main) = main_command(group) {
        if let Some(module_path) = main.strip_suffix(".py") {
            let entry_point = format!("{}:main", module_path.replace('/', "."));
            println!(
                "assuming {} entry point for executable python script {}",
                entry_point, main
            );
            result.entry_points.insert(
                "console_scripts".to_string(),
                vec![format!("{}={}", program_name, entry_point)],
            );
        } else {
            result.scripts = Some(vec![main]);
        }
    }

    for env in group.descendants(ZEROINSTALL_NS, "environment") {
        if env.attr("name") != Some(NOSE_BINDING) {
            continue;
        }
        let value = env
            .attr("insert")
            .filter(|v| !v.is_empty())
            .or_else(|| env.attr("value"))
            .unwrap_or("");
        result.entry_points.insert(
            NOSE_GROUP.to_string(),
            vec![format!("{} = {}", NOSE_BINDING, value.replace('/', ":"))],
        );
    }

    result
}

/// The group's main executable: its own `main` attribute, or the path of
/// a declared command named `run`
fn main_command(group: &Element) -> Option<String> {
    if let Some(main) = group.attr("main").filter(|m| !m.is_empty()) {
        return Some(main.to_string());
    }
    group
        .descendants(ZEROINSTALL_NS, "command")
        .into_iter()
        .find(|command| command.attr("name") == Some("run"))
        .and_then(|command| command.attr("path"))
        .filter(|path| !path.is_empty())
        .map(str::to_owned)
}
