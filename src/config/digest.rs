// src/config/digest.rs
//! Runtime knobs, read from the environment once at startup.

use std::time::Duration;

// --- env names ---
pub const ENV_FETCH_TIMEOUT_MS: &str = "DIGEST_FETCH_TIMEOUT_MS";
pub const ENV_RSS_MAX_ITEMS: &str = "DIGEST_RSS_MAX_ITEMS";
pub const ENV_JSON_MAX_ITEMS: &str = "DIGEST_JSON_MAX_ITEMS";
pub const ENV_CACHE_S_MAXAGE: &str = "DIGEST_CACHE_S_MAXAGE";
pub const ENV_USER_AGENT: &str = "DIGEST_USER_AGENT";
pub const ENV_MAX_REDIRECTS: &str = "DIGEST_MAX_REDIRECTS";
pub const ENV_MAX_BODY_BYTES: &str = "DIGEST_MAX_BODY_BYTES";

// --- defaults ---
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 8_000;
pub const DEFAULT_RSS_MAX_ITEMS: usize = 15;
pub const DEFAULT_JSON_MAX_ITEMS: usize = 10;
pub const DEFAULT_CACHE_S_MAXAGE: u64 = 300;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; NewsBot/1.0)";
pub const DEFAULT_MAX_REDIRECTS: usize = 5;
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Per-format item caps handed to the parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    pub rss_max_items: usize,
    pub json_max_items: usize,
}

#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub fetch_timeout: Duration,
    pub rss_max_items: usize,
    pub json_max_items: usize,
    /// `s-maxage`; `stale-while-revalidate` is always twice this.
    pub cache_s_maxage: u64,
    pub user_agent: String,
    pub max_redirects: usize,
    /// Upper bound on one upstream response body.
    pub max_body_bytes: usize,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            rss_max_items: DEFAULT_RSS_MAX_ITEMS,
            json_max_items: DEFAULT_JSON_MAX_ITEMS,
            cache_s_maxage: DEFAULT_CACHE_S_MAXAGE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

// parse optional integer env and clamp into range
fn parse_clamped<T>(raw: Option<String>, lo: T, hi: T) -> Option<T>
where
    T: std::str::FromStr + Ord,
{
    raw.and_then(|s| s.trim().parse::<T>().ok())
        .map(|v| v.clamp(lo, hi))
}

impl DigestConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Same as [`from_env`](Self::from_env) but with an injectable lookup (tests).
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        let timeout_ms = parse_clamped(get(ENV_FETCH_TIMEOUT_MS), 500, 30_000)
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_MS);
        let user_agent = get(ENV_USER_AGENT)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(d.user_agent);

        Self {
            fetch_timeout: Duration::from_millis(timeout_ms),
            rss_max_items: parse_clamped(get(ENV_RSS_MAX_ITEMS), 1, 100).unwrap_or(d.rss_max_items),
            json_max_items: parse_clamped(get(ENV_JSON_MAX_ITEMS), 1, 100)
                .unwrap_or(d.json_max_items),
            cache_s_maxage: parse_clamped(get(ENV_CACHE_S_MAXAGE), 0, 86_400)
                .unwrap_or(d.cache_s_maxage),
            user_agent,
            max_redirects: parse_clamped(get(ENV_MAX_REDIRECTS), 0, 10).unwrap_or(d.max_redirects),
            max_body_bytes: parse_clamped(get(ENV_MAX_BODY_BYTES), 1024, 100 * 1024 * 1024)
                .unwrap_or(d.max_body_bytes),
        }
    }

    pub fn limits(&self) -> ParseLimits {
        ParseLimits {
            rss_max_items: self.rss_max_items,
            json_max_items: self.json_max_items,
        }
    }

    /// e.g. `s-maxage=300, stale-while-revalidate=600`
    pub fn cache_control(&self) -> String {
        format!(
            "s-maxage={}, stale-while-revalidate={}",
            self.cache_s_maxage,
            self.cache_s_maxage * 2
        )
    }
}
