// src/config/sources.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::registry::{self, SourceDescriptor};

pub const ENV_SOURCES_PATH: &str = "NEWS_SOURCES_PATH";

/// Load a registry from an explicit path. Supports TOML or JSON formats.
pub fn load_sources_from(path: &Path) -> Result<Vec<SourceDescriptor>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading sources from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_sources(&content, ext.as_str())
        .with_context(|| format!("parsing sources from {}", path.display()))
}

/// Load the registry using env var + fallbacks:
/// 1) $NEWS_SOURCES_PATH
/// 2) config/sources.toml
/// 3) config/sources.json
/// 4) built-in list
pub fn load_sources_default() -> Result<Vec<SourceDescriptor>> {
    if let Ok(p) = std::env::var(ENV_SOURCES_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_sources_from(&pb);
        } else {
            return Err(anyhow!("NEWS_SOURCES_PATH points to non-existent path"));
        }
    }
    for fallback in ["config/sources.toml", "config/sources.json"] {
        let p = PathBuf::from(fallback);
        if p.exists() {
            return load_sources_from(&p);
        }
    }
    Ok(registry::builtin().to_vec())
}

fn parse_sources(s: &str, hint_ext: &str) -> Result<Vec<SourceDescriptor>> {
    let parsed = match hint_ext {
        "toml" => parse_toml(s),
        "json" => parse_json(s),
        // unknown extension: sniff
        _ => parse_json(s).or_else(|_| parse_toml(s)),
    }?;
    let cleaned = clean_list(parsed);
    if cleaned.is_empty() {
        return Err(anyhow!("source list is empty"));
    }
    Ok(cleaned)
}

fn parse_toml(s: &str) -> Result<Vec<SourceDescriptor>> {
    #[derive(serde::Deserialize)]
    struct TomlSources {
        sources: Vec<SourceDescriptor>,
    }
    let v: TomlSources = toml::from_str(s)?;
    Ok(v.sources)
}

fn parse_json(s: &str) -> Result<Vec<SourceDescriptor>> {
    Ok(serde_json::from_str(s)?)
}

// Trim fields, drop entries without name/url; order is preserved.
fn clean_list(items: Vec<SourceDescriptor>) -> Vec<SourceDescriptor> {
    items
        .into_iter()
        .filter_map(|mut it| {
            it.name = it.name.trim().to_string();
            it.url = it.url.trim().to_string();
            it.category = it
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty());
            (!it.name.is_empty() && !it.url.is_empty()).then_some(it)
        })
        .collect()
}
