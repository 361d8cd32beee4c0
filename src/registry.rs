// src/registry.rs
//! Feed registry: the fixed, ordered list of sources the digest fans out to.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    International,
    Chinese,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::International => "international",
            Region::Chinese => "chinese",
        }
    }
}

/// Content-format tag; selects the parser for a source's body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    #[default]
    Rss,
    SinaJson,
    WallstreetJson,
    EastmoneyJson,
}

impl Format {
    /// `Accept` header sent with the outbound request.
    pub fn accept(&self) -> &'static str {
        match self {
            Format::Rss => "application/rss+xml, application/xml, text/xml, */*",
            _ => "application/json, text/javascript, text/plain, */*",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub format: Format,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl SourceDescriptor {
    pub fn new(name: &str, url: &str, region: Region, format: Format, category: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            region,
            format,
            category: Some(category.to_string()),
        }
    }
}

static BUILTIN: Lazy<Vec<SourceDescriptor>> = Lazy::new(|| {
    use Format::*;
    use Region::*;
    vec![
        // International RSS
        SourceDescriptor::new(
            "Reuters Business",
            "https://feeds.reuters.com/reuters/businessNews",
            International,
            Rss,
            "Business",
        ),
        SourceDescriptor::new(
            "BBC Business",
            "https://feeds.bbci.co.uk/news/business/rss.xml",
            International,
            Rss,
            "Business",
        ),
        SourceDescriptor::new(
            "CNBC Top News",
            "https://www.cnbc.com/id/100003114/device/rss/rss.html",
            International,
            Rss,
            "Finance",
        ),
        SourceDescriptor::new(
            "Financial Times",
            "https://www.ft.com/rss/home",
            International,
            Rss,
            "Finance",
        ),
        SourceDescriptor::new(
            "Yahoo Finance",
            "https://finance.yahoo.com/news/rssindex",
            International,
            Rss,
            "Finance",
        ),
        SourceDescriptor::new(
            "MarketWatch",
            "http://feeds.marketwatch.com/marketwatch/topstories/",
            International,
            Rss,
            "Markets",
        ),
        SourceDescriptor::new(
            "WSJ Markets",
            "https://feeds.a.dj.com/rss/RSSMarketsMain.xml",
            International,
            Rss,
            "Markets",
        ),
        // Chinese sources (bespoke JSON APIs + RSS)
        SourceDescriptor::new(
            "新浪财经",
            "https://feed.mix.sina.com.cn/api/roll/get?pageid=153&lid=2516&k=&num=50&page=1",
            Chinese,
            SinaJson,
            "综合",
        ),
        SourceDescriptor::new(
            "东方财富",
            "https://newsapi.eastmoney.com/kuaixun/v1/getlist_101_ajaxResult_50_1_.html",
            Chinese,
            EastmoneyJson,
            "快讯",
        ),
        SourceDescriptor::new(
            "华尔街见闻",
            "https://api.wallstreetcn.com/apiv1/content/articles?channel=global-channel&limit=20",
            Chinese,
            WallstreetJson,
            "全球",
        ),
        SourceDescriptor::new("36氪财经", "https://36kr.com/feed", Chinese, Rss, "科技财经"),
        SourceDescriptor::new(
            "界面新闻",
            "https://www.jiemian.com/rss/caijing.rss",
            Chinese,
            Rss,
            "财经",
        ),
        SourceDescriptor::new("虎嗅网", "https://www.huxiu.com/rss/0.xml", Chinese, Rss, "商业"),
    ]
});

/// Built-in registry, initialised once per process.
pub fn builtin() -> &'static [SourceDescriptor] {
    &BUILTIN
}
