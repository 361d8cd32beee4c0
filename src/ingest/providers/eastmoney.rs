// src/ingest/providers/eastmoney.rs
use serde_json::Value;

use super::{build_item, decode, json_str};
use crate::ingest::types::NewsItem;

/// Eastmoney wraps its JSON (`var ajaxResult={...}` or `cb({...});`); keep the outermost object.
fn unwrap_object(body: &str) -> Option<&str> {
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    (start < end).then(|| &body[start..=end])
}

/// Eastmoney live feed: `LivesList[]` with `Title`/`Url`/`Content`/`ShowTime`.
pub fn parse(body: &str, max_items: usize) -> Vec<NewsItem> {
    let Some(root) = unwrap_object(body).and_then(|s| decode(s, "eastmoney")) else {
        return Vec::new();
    };
    let Some(list) = root.get("LivesList").and_then(Value::as_array) else {
        return Vec::new();
    };

    list.iter()
        .filter_map(|it| {
            build_item(
                &json_str(it.get("Title")),
                &json_str(it.get("Url")),
                &json_str(it.get("Content")),
                &json_str(it.get("ShowTime")),
            )
        })
        .take(max_items)
        .collect()
}
