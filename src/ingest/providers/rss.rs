// src/ingest/providers/rss.rs
//! Tolerant RSS/Atom extractor. Scans item containers with regexes instead of a strict XML
//! parser, since real feeds routinely carry undeclared entities and broken markup.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::ingest::types::NewsItem;
use crate::ingest::{clean_description, clean_text};

static RE_CONTAINER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<item(?:\s[^>]*)?>(.*?)</item>|<entry(?:\s[^>]*)?>(.*?)</entry>")
        .expect("container regex")
});
static RE_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<title[^>]*>(?:<!\[CDATA\[)?(.*?)(?:\]\]>)?</title>").expect("title regex")
});
static RE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)<link(?:\s[^>]*)?>(?:<!\[CDATA\[)?(.*?)(?:\]\]>)?</link>|<link\s[^>]*href\s*=\s*["']([^"']+)["']"#,
    )
    .expect("link regex")
});
static RE_DESC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<description[^>]*>(?:<!\[CDATA\[)?(.*?)(?:\]\]>)?</description>|<summary[^>]*>(?:<!\[CDATA\[)?(.*?)(?:\]\]>)?</summary>",
    )
    .expect("description regex")
});
static RE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<pubDate[^>]*>(.*?)</pubDate>|<published[^>]*>(.*?)</published>|<updated[^>]*>(.*?)</updated>",
    )
    .expect("date regex")
});

/// Text of whichever alternation branch matched.
fn first_group<'a>(caps: &Captures<'a>) -> &'a str {
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .next()
        .unwrap_or_default()
}

fn extract<'a>(re: &Regex, hay: &'a str) -> Option<&'a str> {
    re.captures(hay).map(|c| first_group(&c))
}

fn parse_container(body: &str) -> Option<NewsItem> {
    let title = extract(&RE_TITLE, body).map(clean_text).unwrap_or_default();
    let link = extract(&RE_LINK, body)
        .map(|l| l.trim().replace("&amp;", "&"))
        .unwrap_or_default();
    if title.is_empty() || link.is_empty() {
        return None;
    }

    let description = extract(&RE_DESC, body)
        .map(clean_description)
        .unwrap_or_default();
    let pub_date = extract(&RE_DATE, body)
        .map(|d| d.trim().to_string())
        .unwrap_or_default();

    Some(NewsItem {
        title,
        link,
        description,
        pub_date,
    })
}

/// Items in document order, at most `max_items` valid ones. Invalid containers do not count.
pub fn parse_feed(content: &str, max_items: usize) -> Vec<NewsItem> {
    RE_CONTAINER
        .captures_iter(content)
        .filter_map(|caps| parse_container(first_group(&caps)))
        .take(max_items)
        .collect()
}
