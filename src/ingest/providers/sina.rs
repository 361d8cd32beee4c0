// src/ingest/providers/sina.rs
use serde_json::Value;

use super::{build_item, decode, json_str};
use crate::ingest::types::NewsItem;

/// Sina roll API: `result.data[]` with `title`/`url`/`intro`/`ctime`.
pub fn parse(body: &str, max_items: usize) -> Vec<NewsItem> {
    let Some(root) = decode(body, "sina") else {
        return Vec::new();
    };
    let Some(list) = root.pointer("/result/data").and_then(Value::as_array) else {
        return Vec::new();
    };

    list.iter()
        .filter_map(|it| {
            build_item(
                &json_str(it.get("title")),
                &json_str(it.get("url")),
                &json_str(it.get("intro")),
                &json_str(it.get("ctime")),
            )
        })
        .take(max_items)
        .collect()
}
