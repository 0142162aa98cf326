//! Document front matter, read loosely. Nothing here validates the schema:
//! missing or oddly shaped fields fall back to defaults.

use std::fs;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use camino::Utf8Path;
use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::Settings;
use crate::manuscript::MAIN_FILENAME;

pub const CONFIG_FILENAME: &str = "00_CONFIG.yml";
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// Front matter as parsed from YAML; shape is defined by whoever wrote the manuscript.
pub type Metadata = Value;

static FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n|\z)")
        .dot_matches_new_line(true)
        .build()
        .expect("front matter pattern is valid")
});

/// Load metadata for the configured manuscript.
///
/// `00_CONFIG.yml` wins when present; otherwise the front matter of `01_MAIN.md` is used.
/// A manuscript without either yields an empty mapping.
pub fn load(settings: &Settings) -> Result<Metadata> {
    let dir = settings.manuscript_dir();

    let config = dir.join(CONFIG_FILENAME);
    if config.is_file() {
        debug!("reading metadata from {}", config);
        return load_yaml_file(&config);
    }

    let main = dir.join(MAIN_FILENAME);
    if main.is_file() {
        debug!("reading front matter from {}", main);
        let raw = fs::read_to_string(&main).with_context(|| format!("reading {}", main))?;
        return parse_front_matter(&raw).with_context(|| format!("parsing front matter in {}", main));
    }

    Ok(empty())
}

pub fn load_yaml_file(path: &Utf8Path) -> Result<Metadata> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    parse_yaml(&raw).with_context(|| format!("parsing {}", path))
}

/// Extract the `---` delimited YAML block at the top of a Markdown document.
pub fn parse_front_matter(markdown: &str) -> Result<Metadata> {
    let markdown = markdown.strip_prefix('\u{feff}').unwrap_or(markdown);
    match FRONT_MATTER.captures(markdown) {
        Some(caps) => parse_yaml(&caps[1]),
        None => Ok(empty()),
    }
}

fn parse_yaml(raw: &str) -> Result<Metadata> {
    if raw.trim().is_empty() {
        return Ok(empty());
    }
    let value: Value = serde_yaml::from_str(raw)?;
    Ok(match value {
        Value::Null => empty(),
        other => other,
    })
}

fn empty() -> Metadata {
    Value::Object(Map::new())
}

/// First four characters of a string `date`, or `fallback`.
pub fn year(metadata: &Metadata, fallback: i32) -> String {
    match metadata.get("date") {
        Some(Value::String(date)) if date.chars().count() >= 4 => date.chars().take(4).collect(),
        _ => fallback.to_string(),
    }
}

/// `title.lead_author`, where `title` is a mapping or a list of mappings.
pub fn lead_author(metadata: &Metadata) -> &str {
    let found = match metadata.get("title") {
        Some(Value::Object(title)) => title.get("lead_author"),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_object)
            .find_map(|item| item.get("lead_author")),
        _ => None,
    };

    match found.and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => name,
        _ => UNKNOWN_AUTHOR,
    }
}
