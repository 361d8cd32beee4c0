//! One-shot run of the digest: fetch every source once and save `news_data.json`.
//!
//! Usage: `fetch_news [OUTPUT_DIR]` (defaults to the current directory).

use std::path::PathBuf;
use std::sync::Arc;

use finance_news_digest::config::{load_sources_default, DigestConfig};
use finance_news_digest::ingest::{self, fetch::HttpFetcher};
use finance_news_digest::snapshot::write_snapshot;
use finance_news_digest::Region;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    finance_news_digest::init_tracing();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let config = DigestConfig::from_env();
    let sources = load_sources_default()?;
    let fetcher = Arc::new(HttpFetcher::new(&config)?);

    let digest = ingest::aggregate(&sources, fetcher, &config).await;
    let path = write_snapshot(&out_dir, &digest, &sources)?;

    println!("News saved to {}", path.display());
    println!("  Total: {} articles", digest.total_items());
    println!("  International: {} sources", digest.live_sources(Region::International));
    println!("  Chinese: {} sources", digest.live_sources(Region::Chinese));
    Ok(())
}
