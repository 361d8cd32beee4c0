// tests/ingest_aggregate.rs
//
// Fan-out behaviour of the aggregator against an in-memory fetcher:
// registry order, settle-all, per-source timeouts, error/items exclusivity.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use finance_news_digest::config::DigestConfig;
use finance_news_digest::ingest::aggregate;
use finance_news_digest::ingest::fetch::{FeedFetcher, FetchError};
use finance_news_digest::{Format, Region, SourceDescriptor};

const RSS: &str = "<rss><channel><item><title>A</title><link>http://x/1</link><pubDate>Mon</pubDate></item><item><title></title><link>http://x/2</link></item></channel></rss>";
const SINA: &str = r#"{"result":{"data":[{"title":"T","url":"http://u","intro":"I","ctime":"123"}]}}"#;

/// Behaviour is keyed off the source URL.
struct ScriptedFetcher;

#[async_trait]
impl FeedFetcher for ScriptedFetcher {
    async fn fetch(&self, source: &SourceDescriptor) -> Result<String, FetchError> {
        match source.url.as_str() {
            "mock://rss" => Ok(RSS.to_string()),
            "mock://rss-late" => {
                tokio::time::sleep(Duration::from_millis(150)).await;
                Ok(RSS.to_string())
            }
            "mock://sina" => Ok(SINA.to_string()),
            "mock://garbage" => Ok("<html>not json</html>".to_string()),
            "mock://503" => Err(FetchError::Status(503)),
            "mock://hang" => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(RSS.to_string())
            }
            "mock://panic" => panic!("parser exploded"),
            other => Err(FetchError::Body(format!("unknown url {other}"))),
        }
    }
}

fn src(name: &str, url: &str, format: Format) -> SourceDescriptor {
    SourceDescriptor::new(name, url, Region::International, format, "Test")
}

fn cfg(timeout_ms: u64) -> DigestConfig {
    DigestConfig {
        fetch_timeout: Duration::from_millis(timeout_ms),
        ..DigestConfig::default()
    }
}

#[tokio::test]
async fn hung_source_times_out_without_affecting_others() {
    let sources = vec![
        src("one", "mock://rss", Format::Rss),
        src("two", "mock://hang", Format::Rss),
        src("three", "mock://sina", Format::SinaJson),
    ];

    let t0 = Instant::now();
    let resp = aggregate(&sources, Arc::new(ScriptedFetcher), &cfg(300)).await;
    assert!(t0.elapsed() < Duration::from_secs(5), "bounded by the timeout");

    let names: Vec<_> = resp.sources.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["one", "two", "three"]);

    assert_eq!(resp.sources[0].item_count, 1);
    assert_eq!(resp.sources[0].items[0].pub_date, "Mon");
    assert!(resp.sources[0].error.is_none());

    let two = &resp.sources[1];
    assert_eq!(two.error.as_deref(), Some("timeout after 300 ms"));
    assert!(two.items.is_empty());
    assert_eq!(two.item_count, 0);

    assert_eq!(resp.sources[2].item_count, 1);
    assert_eq!(resp.sources[2].items[0].link, "http://u");
    assert_eq!(resp.total_items(), 2);
}

#[tokio::test]
async fn order_follows_registry_not_completion() {
    let sources = vec![
        src("slow", "mock://rss-late", Format::Rss),
        src("fast", "mock://rss", Format::Rss),
    ];
    let resp = aggregate(&sources, Arc::new(ScriptedFetcher), &cfg(5_000)).await;
    let names: Vec<_> = resp.sources.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["slow", "fast"]);
}

#[tokio::test]
async fn total_failure_still_produces_every_result() {
    let sources = vec![
        src("a", "mock://503", Format::Rss),
        src("b", "mock://nowhere", Format::Rss),
        src("c", "mock://panic", Format::Rss),
    ];
    let resp = aggregate(&sources, Arc::new(ScriptedFetcher), &cfg(1_000)).await;
    assert_eq!(resp.sources.len(), 3);
    assert_eq!(resp.sources[0].error.as_deref(), Some("HTTP error: status 503"));
    assert!(resp.sources[2]
        .error
        .as_deref()
        .is_some_and(|e| e.starts_with("source task failed")));
    for s in &resp.sources {
        assert!(s.error.is_some());
        assert!(s.items.is_empty());
        assert_eq!(s.item_count, 0);
    }
}

#[tokio::test]
async fn unparsable_body_is_zero_items_not_an_error() {
    let sources = vec![src("g", "mock://garbage", Format::WallstreetJson)];
    let resp = aggregate(&sources, Arc::new(ScriptedFetcher), &cfg(1_000)).await;
    assert_eq!(resp.sources[0].item_count, 0);
    assert!(resp.sources[0].error.is_none());
}

#[tokio::test]
async fn payload_shape_is_camel_case_with_optional_fields_omitted() {
    let mut no_cat = src("n", "mock://503", Format::Rss);
    no_cat.category = None;
    let sources = vec![src("one", "mock://rss", Format::Rss), no_cat];
    let resp = aggregate(&sources, Arc::new(ScriptedFetcher), &cfg(1_000)).await;

    let v = serde_json::to_value(&resp).unwrap();
    assert!(v["fetchTime"].as_str().is_some_and(|t| t.ends_with('Z')));
    let ok = &v["sources"][0];
    assert_eq!(ok["itemCount"], 1);
    assert_eq!(ok["region"], "international");
    assert_eq!(ok["category"], "Test");
    assert!(ok.get("error").is_none());
    assert_eq!(ok["items"][0]["pubDate"], "Mon");

    let failed = &v["sources"][1];
    assert!(failed.get("category").is_none());
    assert_eq!(failed["items"], serde_json::json!([]));
    assert_eq!(failed["error"], "HTTP error: status 503");
}
