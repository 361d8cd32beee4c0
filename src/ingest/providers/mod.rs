// src/ingest/providers/mod.rs
//! Format parsers. Each is a pure `&str -> Vec<NewsItem>` function picked by the source's tag.

pub mod eastmoney;
pub mod rss;
pub mod sina;
pub mod wallstreet;

use serde_json::Value;

use crate::config::ParseLimits;
use crate::ingest::types::NewsItem;
use crate::ingest::{clean_description, clean_text};
use crate::registry::Format;

pub fn parse(format: Format, body: &str, limits: ParseLimits) -> Vec<NewsItem> {
    match format {
        Format::Rss => rss::parse_feed(body, limits.rss_max_items),
        Format::SinaJson => sina::parse(body, limits.json_max_items),
        Format::WallstreetJson => wallstreet::parse(body, limits.json_max_items),
        Format::EastmoneyJson => eastmoney::parse(body, limits.json_max_items),
    }
}

/// String view of a JSON scalar; numbers are rendered, everything else is empty.
pub(crate) fn json_str(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Build a normalized item, or `None` when title or link end up empty.
pub(crate) fn build_item(title: &str, link: &str, description: &str, pub_date: &str) -> Option<NewsItem> {
    let title = clean_text(title);
    let link = link.trim();
    if title.is_empty() || link.is_empty() {
        return None;
    }
    Some(NewsItem {
        title,
        link: link.to_string(),
        description: clean_description(description),
        pub_date: pub_date.trim().to_string(),
    })
}

/// Decode a JSON body; failures are logged and reported as `None`.
pub(crate) fn decode(body: &str, provider: &'static str) -> Option<Value> {
    match serde_json::from_str(body) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(target: "digest", provider, error = %e, "json decode failed");
            None
        }
    }
}
