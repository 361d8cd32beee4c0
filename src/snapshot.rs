// src/snapshot.rs
//! One-shot digest dump used by the `fetch_news` binary.

use anyhow::{ensure, Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::types::{AggregateResponse, SourceResult};
use crate::registry::{Region, SourceDescriptor};

pub const SNAPSHOT_FILE: &str = "news_data.json";

/// Digest plus the per-source `url` and a region index of source names.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub fetch_time: &'a str,
    pub sources: Vec<SnapshotSource<'a>>,
    pub regions: Regions<'a>,
}

#[derive(Debug, Serialize)]
pub struct SnapshotSource<'a> {
    #[serde(flatten)]
    pub result: &'a SourceResult,
    pub url: &'a str,
}

/// Every source name by region, failed ones included, in registry order.
#[derive(Debug, Default, Serialize)]
pub struct Regions<'a> {
    pub international: Vec<&'a str>,
    pub chinese: Vec<&'a str>,
}

impl<'a> Snapshot<'a> {
    /// `digest` must come from aggregating `sources` (same order, same length).
    pub fn new(digest: &'a AggregateResponse, sources: &'a [SourceDescriptor]) -> Result<Self> {
        ensure!(
            digest.sources.len() == sources.len(),
            "digest has {} sources, registry has {}",
            digest.sources.len(),
            sources.len()
        );

        let mut regions = Regions::default();
        let entries = digest
            .sources
            .iter()
            .zip(sources)
            .map(|(result, desc)| {
                match result.region {
                    Region::International => regions.international.push(&result.name),
                    Region::Chinese => regions.chinese.push(&result.name),
                }
                SnapshotSource {
                    result,
                    url: &desc.url,
                }
            })
            .collect();

        Ok(Self {
            fetch_time: &digest.fetch_time,
            sources: entries,
            regions,
        })
    }
}

/// Write the snapshot as pretty JSON to `<dir>/news_data.json`, creating `dir` if needed.
pub fn write_snapshot(
    dir: &Path,
    digest: &AggregateResponse,
    sources: &[SourceDescriptor],
) -> Result<PathBuf> {
    let snapshot = Snapshot::new(digest, sources)?;
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(SNAPSHOT_FILE);
    let json = serde_json::to_string_pretty(&snapshot).context("serializing digest")?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
