// src/ingest/mod.rs
pub mod fetch;
pub mod providers;
pub mod types;

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{SecondsFormat, Utc};
use futures::future::join_all;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;

use crate::config::{DigestConfig, ParseLimits};
use crate::ingest::fetch::{fetch_with_timeout, FeedFetcher, FetchError};
use crate::ingest::types::{AggregateResponse, SourceResult};
use crate::registry::{Region, SourceDescriptor};

pub const MAX_DESCRIPTION_CHARS: usize = 300;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("digest_requests_total", "Aggregations run.");
        describe_counter!(
            "digest_source_errors_total",
            "Sources that failed to fetch (network, status, timeout)."
        );
        describe_counter!("digest_items_total", "Items emitted across all sources.");
        describe_histogram!("digest_fetch_ms", "Per-source fetch+parse time in milliseconds.");
    });
}

// Known HTML element names only, so "<AAPL.O>" or "< 40% vs >" survive.
static RE_MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<!--.*?-->|</?(?:a|abbr|article|b|blockquote|br|caption|cite|code|dd|div|dl|dt|em|figcaption|figure|font|footer|h[1-6]|header|hr|i|iframe|img|li|ol|p|picture|pre|q|s|section|small|source|span|strong|sub|sup|table|tbody|td|th|thead|tr|u|ul|video)(?:\s[^<>]*)?/?>",
    )
    .expect("markup regex")
});
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Normalize feed text: strip markup, decode entities, strip escaped markup, collapse whitespace.
pub fn clean_text(s: &str) -> String {
    // 1) Raw markup (CDATA bodies, JSON intros)
    let stripped = RE_MARKUP.replace_all(s, "");

    // 2) HTML entity decode
    let decoded = html_escape::decode_html_entities(&stripped);

    // 3) Markup that was entity-escaped (`<summary type="html">`)
    let out = RE_MARKUP.replace_all(&decoded, "");

    // 4) Collapse whitespace
    RE_WS.replace_all(&out, " ").trim().to_string()
}

/// Cap to `max` chars (not bytes), keeping char boundaries intact.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Description as emitted: cleaned and capped at [`MAX_DESCRIPTION_CHARS`].
pub fn clean_description(s: &str) -> String {
    truncate_chars(&clean_text(s), MAX_DESCRIPTION_CHARS)
}

/// Fetch one source, parse its body by format, and fold the outcome into a `SourceResult`.
pub async fn fetch_source(
    fetcher: &dyn FeedFetcher,
    source: &SourceDescriptor,
    timeout: Duration,
    limits: ParseLimits,
) -> SourceResult {
    let t0 = Instant::now();
    let res = match fetch_with_timeout(fetcher, source, timeout).await {
        Ok(body) => {
            let items = providers::parse(source.format, &body, limits);
            tracing::debug!(target: "digest", source = %source.name, items = items.len(), "source parsed");
            SourceResult::ok(source, items)
        }
        Err(e) => {
            tracing::warn!(target: "digest", source = %source.name, error = %e, "source fetch failed");
            counter!("digest_source_errors_total").increment(1);
            SourceResult::failed(source, e)
        }
    };
    histogram!("digest_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
    res
}

/// Fan out to every source concurrently and settle all of them.
/// Results come back in registry order regardless of completion order.
pub async fn aggregate(
    sources: &[SourceDescriptor],
    fetcher: Arc<dyn FeedFetcher>,
    cfg: &DigestConfig,
) -> AggregateResponse {
    ensure_metrics_described();
    counter!("digest_requests_total").increment(1);

    let limits = cfg.limits();
    let timeout = cfg.fetch_timeout;
    let tasks = sources.iter().cloned().map(|source| {
        let fetcher = Arc::clone(&fetcher);
        tokio::spawn(async move { fetch_source(fetcher.as_ref(), &source, timeout, limits).await })
    });
    let settled = join_all(tasks).await;

    let results: Vec<SourceResult> = sources
        .iter()
        .zip(settled)
        .map(|(source, joined)| match joined {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(target: "digest", source = %source.name, error = %e, "source task aborted");
                counter!("digest_source_errors_total").increment(1);
                SourceResult::failed(source, FetchError::Task(e.to_string()))
            }
        })
        .collect();

    let resp = AggregateResponse {
        fetch_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        sources: results,
    };
    log_summary(&resp);
    resp
}

fn log_summary(resp: &AggregateResponse) {
    let total = resp.total_items();
    counter!("digest_items_total").increment(total as u64);

    tracing::info!(
        target: "digest",
        total_items = total,
        sources = resp.sources.len(),
        international = resp.live_sources(Region::International),
        chinese = resp.live_sources(Region::Chinese),
        "Fetched {} articles from {} sources",
        total,
        resp.sources.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_strips_markup_and_collapses_ws() {
        let s = "  <b>Stocks</b>\n   rally &amp; <i>bonds</i> slip  ";
        assert_eq!(clean_text(s), "Stocks rally & bonds slip");
    }

    #[test]
    fn clean_text_strips_escaped_markup() {
        assert_eq!(clean_text("&lt;p&gt;Hi&lt;/p&gt;"), "Hi");
    }

    #[test]
    fn clean_text_keeps_escaped_angle_brackets_that_are_not_markup() {
        let s = "Apple &lt;AAPL.O&gt; beats; margin &lt; 40% vs &gt; 35% est";
        assert_eq!(clean_text(s), "Apple <AAPL.O> beats; margin < 40% vs > 35% est");
        assert_eq!(clean_text("CPI < 3% while PMI > 50"), "CPI < 3% while PMI > 50");
        assert_eq!(clean_text("<S&P 500> slips"), "<S&P 500> slips");
    }

    #[test]
    fn clean_text_strips_attributes_comments_and_self_closing_tags() {
        let s = r#"<a href="https://x.test/?a=1&amp;b=2">Link</a><br/><!-- ad --> <img src="x.png" /> done"#;
        assert_eq!(clean_text(s), "Link done");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let s = "财经新闻".repeat(100);
        let out = truncate_chars(&s, 300);
        assert_eq!(out.chars().count(), 300);
        assert_eq!(truncate_chars("abc", 300), "abc");
    }

    #[test]
    fn description_is_capped() {
        let long = format!("<p>{}</p>", "x".repeat(1000));
        assert_eq!(clean_description(&long).chars().count(), MAX_DESCRIPTION_CHARS);
    }
}
