//! Config loading and init against real files on disk.

use std::io::Write;
use std::path::PathBuf;

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tattle-config-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn load_config_reads_file_and_falls_back_to_defaults() {
    let dir = temp_dir();
    let path = dir.join("config.json");
    std::fs::File::create(&path)
        .and_then(|mut f| {
            f.write_all(br#"{"gateway":{"port":9999},"slack":{"modChannelId":"C42"}}"#)
        })
        .expect("write config.json");

    let (config, used) = lib::config::load_config(Some(path.clone())).expect("load config");
    assert_eq!(used, path);
    assert_eq!(config.gateway.port, 9999);
    assert_eq!(config.gateway.bind, "127.0.0.1");
    assert_eq!(config.slack.mod_channel_id.as_deref(), Some("C42"));
    assert_eq!(config.slack.bot_token, None);

    let (config, _) = lib::config::load_config(Some(dir.join("absent.json"))).expect("defaults");
    assert_eq!(config.gateway.port, 15252);
    assert_eq!(config.slack.mod_channel_id, None);
}

#[test]
fn load_config_rejects_malformed_file() {
    let dir = temp_dir();
    let path = dir.join("config.json");
    std::fs::write(&path, b"not json").expect("write config.json");

    let err = lib::config::load_config(Some(path)).expect_err("must fail on bad JSON");
    assert!(err.to_string().contains("parsing config"), "got: {}", err);
}

#[test]
fn init_writes_a_loadable_template_once() {
    let dir = temp_dir();
    let path = dir.join("config.json");

    lib::init::init_config_dir(&path).expect("init");
    let (config, _) = lib::config::load_config(Some(path.clone())).expect("load template");
    assert_eq!(config.gateway.port, 15252);
    assert_eq!(config.slack.bot_token, None);

    // A second init must not clobber an existing config.
    std::fs::write(&path, br#"{"gateway":{"port":1234}}"#).expect("overwrite config");
    lib::init::init_config_dir(&path).expect("re-init");
    let (config, _) = lib::config::load_config(Some(path)).expect("reload");
    assert_eq!(config.gateway.port, 1234);
}
