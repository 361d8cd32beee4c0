// src/ingest/providers/wallstreet.rs
use chrono::{DateTime, SecondsFormat};
use serde_json::Value;

use super::{build_item, decode, json_str};
use crate::ingest::types::NewsItem;

pub const ARTICLE_URL_PREFIX: &str = "https://wallstreetcn.com/articles/";

fn whole_secs(f: f64) -> Option<i64> {
    (f.is_finite() && f.abs() < i64::MAX as f64).then(|| f.trunc() as i64)
}

/// Unix seconds -> RFC 3339 UTC. Zero, negative, or out-of-range yields "".
fn unix_to_iso(v: Option<&Value>) -> String {
    let secs = match v {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(whole_secs)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_secs))
        }
        _ => None,
    };
    secs.filter(|s| *s > 0)
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

/// Wallstreetcn articles API: `data.items[]`; links are synthesized from `id`.
pub fn parse(body: &str, max_items: usize) -> Vec<NewsItem> {
    let Some(root) = decode(body, "wallstreet") else {
        return Vec::new();
    };
    let Some(list) = root.pointer("/data/items").and_then(Value::as_array) else {
        return Vec::new();
    };

    list.iter()
        .filter_map(|it| {
            let id = json_str(it.get("id"));
            if id.trim().is_empty() {
                return None;
            }
            build_item(
                &json_str(it.get("title")),
                &format!("{ARTICLE_URL_PREFIX}{}", id.trim()),
                &json_str(it.get("summary")),
                &unix_to_iso(it.get("display_time")),
            )
        })
        .take(max_items)
        .collect()
}
