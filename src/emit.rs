//! setup.py emission
//!
//! Renders the attribute set as python literals inside a fixed setup()
//! template and writes the result with execute permission, so the user can
//! run `./setup.py register` directly. Attribute lines are sorted by key;
//! the `extras` vendor text is appended verbatim after them because it may
//! be any python fragment, not a quotable value.

use crate::attrs::SetupAttrs;
use crate::feed::ZERO2PYPI_FEED;
use crate::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Render and write the descriptor, then add a+x to its mode bits
pub fn write_setup_py(attrs: &SetupAttrs, dest: &Path) -> Result<()> {
    fs::write(dest, render(attrs))?;
    make_executable(dest)?;
    tracing::debug!(dest = %dest.display(), "Wrote descriptor");
    Ok(())
}

/// Render the full setup.py text
pub fn render(attrs: &SetupAttrs) -> String {
    let mut lines = attr_lines(attrs);
    if let Some(extras) = &attrs.extras {
        lines.push(extras.clone());
    }
    format!(
        "#!/usr/bin/env python\n\
         \n\
         ## NOTE: ##\n\
         ## this setup.py was generated by zero2pypi:\n\
         ## {}\n\
         \n\
         from setuptools import *\n\
         setup(\n\
         \tpackages = find_packages(exclude=['test', 'test.*']),\n\
         {}\n\
         )\n",
        ZERO2PYPI_FEED,
        lines.join("\n")
    )
}

/// One `\t<key>=<literal>,` line per present attribute, sorted by key
fn attr_lines(attrs: &SetupAttrs) -> Vec<String> {
    let mut fields: BTreeMap<&str, String> = BTreeMap::new();
    fields.insert("name", py_str(&attrs.name));
    fields.insert("version", py_str(&attrs.version));
    fields.insert("url", py_str(&attrs.url));
    fields.insert("long_description", py_str(&attrs.long_description));
    fields.insert("install_requires", py_list(&attrs.install_requires));
    if let Some(download_url) = &attrs.download_url {
        fields.insert("download_url", py_str(download_url));
    }
    if let Some(description) = &attrs.description {
        fields.insert("description", py_str(description));
    }
    if let Some(py_modules) = &attrs.py_modules {
        fields.insert("py_modules", py_list(py_modules));
    }
    if !attrs.entry_points.is_empty() {
        fields.insert("entry_points", py_dict(&attrs.entry_points));
    }
    if let Some(scripts) = &attrs.scripts {
        fields.insert("scripts", py_list(scripts));
    }
    fields
        .iter()
        .map(|(key, literal)| format!("\t{}={},", key, literal))
        .collect()
}

/// Python string literal: single-quoted with the usual escapes
fn py_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn py_list(items: &[String]) -> String {
    let items: Vec<String> = items.iter().map(|item| py_str(item)).collect();
    format!("[{}]", items.join(", "))
}

fn py_dict(map: &BTreeMap<String, Vec<String>>) -> String {
    let entries: Vec<String> = map
        .iter()
        .map(|(key, values)| format!("{}: {}", py_str(key), py_list(values)))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o111);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
