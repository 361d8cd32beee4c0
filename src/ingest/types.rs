// src/ingest/types.rs
use serde::{Deserialize, Serialize};

use crate::registry::{Region, SourceDescriptor};

/// One normalized article. Parsers only emit items with non-empty title and link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub description: String, // tags stripped, <= 300 chars
    pub pub_date: String,    // raw, as published by the source
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SourceResult {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub region: Region,
    pub item_count: usize,
    pub items: Vec<NewsItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceResult {
    pub fn ok(source: &SourceDescriptor, items: Vec<NewsItem>) -> Self {
        Self {
            name: source.name.clone(),
            category: source.category.clone(),
            region: source.region,
            item_count: items.len(),
            items,
            error: None,
        }
    }

    pub fn failed(source: &SourceDescriptor, error: impl ToString) -> Self {
        Self {
            name: source.name.clone(),
            category: source.category.clone(),
            region: source.region,
            item_count: 0,
            items: Vec::new(),
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResponse {
    pub fetch_time: String, // ISO-8601, captured once per response
    pub sources: Vec<SourceResult>,
}

impl AggregateResponse {
    pub fn total_items(&self) -> usize {
        self.sources.iter().map(|s| s.item_count).sum()
    }

    /// Sources in `region` that yielded at least one item.
    pub fn live_sources(&self, region: Region) -> usize {
        self.sources
            .iter()
            .filter(|s| s.region == region && s.item_count > 0)
            .count()
    }
}
