// tests/config_sources.rs
use finance_news_digest::config::sources::ENV_SOURCES_PATH;
use finance_news_digest::config::{load_sources_default, load_sources_from};
use finance_news_digest::registry;
use finance_news_digest::{Format, Region};
use std::{env, fs};

#[test]
fn parse_toml_and_json_paths() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("sources.toml");
    fs::write(
        &p_toml,
        r#"
[[sources]]
name = "36氪财经"
url = "https://36kr.com/feed"
region = "chinese"
category = "科技财经"

[[sources]]
name = "WSJ Markets"
url = "https://feeds.a.dj.com/rss/RSSMarketsMain.xml"
"#,
    )
    .unwrap();
    let v = load_sources_from(&p_toml).unwrap();
    assert_eq!(v.len(), 2);
    assert_eq!(v[0].region, Region::Chinese);
    assert_eq!(v[0].format, Format::Rss);
    assert_eq!(v[1].name, "WSJ Markets");

    let p_json = dir.path().join("sources.json");
    fs::write(
        &p_json,
        r#"[{"name":"东方财富","url":"https://newsapi.eastmoney.com/x","region":"chinese","format":"eastmoney-json"}]"#,
    )
    .unwrap();
    let vj = load_sources_from(&p_json).unwrap();
    assert_eq!(vj[0].format, Format::EastmoneyJson);
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks_then_builtin() {
    // Isolate CWD so the repo's own config/ is not picked up
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();

    env::remove_var(ENV_SOURCES_PATH);

    // 1) Nothing on disk -> built-in registry
    let v = load_sources_default().unwrap();
    assert_eq!(v, registry::builtin().to_vec());

    // 2) Fallback TOML in ./config/
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(
        cfg_dir.join("sources.toml"),
        "[[sources]]\nname = \"Local\"\nurl = \"http://localhost/feed\"\n",
    )
    .unwrap();
    let vt = load_sources_default().unwrap();
    assert_eq!(vt.len(), 1);
    assert_eq!(vt[0].name, "Local");

    // 3) Env wins
    let p_env = tmp.path().join("override.json");
    fs::write(&p_env, r#"[{"name":"Env","url":"http://env/feed"}]"#).unwrap();
    env::set_var(ENV_SOURCES_PATH, p_env.display().to_string());
    let ve = load_sources_default().unwrap();
    assert_eq!(ve[0].name, "Env");

    // 4) Env pointing nowhere is an error, not a silent fallback
    env::set_var(ENV_SOURCES_PATH, tmp.path().join("missing.toml").display().to_string());
    assert!(load_sources_default().is_err());
    env::remove_var(ENV_SOURCES_PATH);

    env::set_current_dir(&old).unwrap();
}
