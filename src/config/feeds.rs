// src/config/feeds.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::types::FeedSource;

pub const ENV_FEEDS_PATH: &str = "FEEDS_CONFIG_PATH";

/// Feeds read when no feed file is configured.
pub const DEFAULT_FEEDS: [&str; 8] = [
    "https://nitter.privacyredirect.com/khamenei_ir/rss",
    "https://nitter.privacyredirect.com/elonmusk/rss",
    "https://nitter.privacyredirect.com/IrnaEnglish/rss",
    "https://nitter.privacyredirect.com/IranIntl_En/rss",
    "https://nitter.privacyredirect.com/Tasnimnews_EN/rss",
    "https://nitter.privacyredirect.com/EnglishFars/rss",
    "https://nitter.privacyredirect.com/isna_farsi/rss",
    "https://nitter.privacyredirect.com/MehrnewsCom/rss",
];

pub fn default_feeds() -> Vec<FeedSource> {
    DEFAULT_FEEDS.iter().map(|u| FeedSource::new(*u)).collect()
}

/// Load a feed list from an explicit path. Supports TOML (`feeds = [..]`) or a JSON array.
pub fn load_feeds_from(path: &Path) -> Result<Vec<FeedSource>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feed list from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let urls = parse_feeds(&content, ext.as_str())?;
    if urls.is_empty() {
        return Err(anyhow!("feed list {} is empty", path.display()));
    }
    Ok(urls.into_iter().map(FeedSource::new).collect())
}

/// Feed list from `$FEEDS_CONFIG_PATH` when set, otherwise [`DEFAULT_FEEDS`].
/// An unreadable file is logged and the built-in list used instead.
pub fn load_feeds_default() -> Vec<FeedSource> {
    let Ok(p) = std::env::var(ENV_FEEDS_PATH) else {
        return default_feeds();
    };
    let pb = PathBuf::from(p);
    match load_feeds_from(&pb) {
        Ok(feeds) => feeds,
        Err(e) => {
            tracing::warn!(
                path = %pb.display(),
                error = ?e,
                "feed list unusable, using built-in feeds"
            );
            default_feeds()
        }
    }
}

fn parse_feeds(s: &str, hint_ext: &str) -> Result<Vec<String>> {
    match hint_ext {
        "toml" => parse_toml(s),
        "json" => parse_json(s),
        _ => parse_json(s).or_else(|_| parse_toml(s)),
    }
}

fn parse_toml(s: &str) -> Result<Vec<String>> {
    #[derive(serde::Deserialize)]
    struct TomlFeeds {
        feeds: Vec<String>,
    }
    let v: TomlFeeds = toml::from_str(s)?;
    Ok(clean_list(v.feeds))
}

fn parse_json(s: &str) -> Result<Vec<String>> {
    let v: Vec<String> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

/// Trim, drop blanks and repeats; first occurrence wins so feed order is kept.
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|o| o == t) {
            out.push(t.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_and_json_are_cleaned_in_order() {
        let toml = r#"feeds = [" https://b.example/rss ", "", "https://a.example/rss", "https://b.example/rss"]"#;
        assert_eq!(
            parse_toml(toml).unwrap(),
            vec!["https://b.example/rss", "https://a.example/rss"]
        );
        let json = r#"["https://z.example/feed", "  "]"#;
        assert_eq!(parse_json(json).unwrap(), vec!["https://z.example/feed"]);
    }

    #[test]
    fn unknown_extension_tries_both() {
        assert_eq!(parse_feeds(r#"["u"]"#, "").unwrap(), vec!["u"]);
        assert_eq!(parse_feeds(r#"feeds = ["u"]"#, "txt").unwrap(), vec!["u"]);
        assert!(parse_feeds("???", "").is_err());
    }

    #[test]
    fn builtin_list_has_eight_feeds() {
        assert_eq!(default_feeds().len(), 8);
    }
}
