// tests/feeds_config.rs
use news_digest_bot::config::feeds::{
    default_feeds, load_feeds_default, load_feeds_from, ENV_FEEDS_PATH,
};
use std::{env, fs};

#[test]
fn parse_toml_and_json_paths() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("feeds.toml");
    fs::write(
        &p_toml,
        r#"
feeds = [" https://a.example/rss ", "", "https://b.example/rss", "https://a.example/rss"]
"#,
    )
    .unwrap();
    let v: Vec<String> = load_feeds_from(&p_toml).unwrap().into_iter().map(|f| f.url).collect();
    assert_eq!(v, vec!["https://a.example/rss", "https://b.example/rss"]);

    let p_json = dir.path().join("feeds.json");
    fs::write(&p_json, r#"["https://c.example/atom"]"#).unwrap();
    let vj = load_feeds_from(&p_json).unwrap();
    assert_eq!(vj[0].url, "https://c.example/atom");

    let p_empty = dir.path().join("empty.json");
    fs::write(&p_empty, "[]").unwrap();
    assert!(load_feeds_from(&p_empty).is_err());
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_builtin() {
    env::remove_var(ENV_FEEDS_PATH);
    assert_eq!(load_feeds_default(), default_feeds());

    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("feeds.json");
    fs::write(&p, r#"["https://only.example/rss"]"#).unwrap();
    env::set_var(ENV_FEEDS_PATH, p.display().to_string());
    let v = load_feeds_default();
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].url, "https://only.example/rss");

    // Unreadable path falls back rather than failing startup.
    env::set_var(ENV_FEEDS_PATH, tmp.path().join("missing.toml").display().to_string());
    assert_eq!(load_feeds_default(), default_feeds());

    env::remove_var(ENV_FEEDS_PATH);
}
