#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use pagesize_exporter::config::{self, ExporterConfig, Schedule};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
poll:
  interval_ms: 30000
  intervall_ms: 5000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config_uses_defaults() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.exporter.listen, "0.0.0.0:9222");
    assert_eq!(cfg.sites.file, "sites.txt");
    assert_eq!(cfg.poll.interval(), Duration::from_secs(30));
    assert_eq!(cfg.poll.timeout(), Duration::from_secs(10));
    assert_eq!(cfg.poll.max_concurrency, None);
    assert_eq!(cfg.poll.schedule, Schedule::FixedDelay);
}

#[test]
fn built_in_default_matches_minimal_document() {
    let parsed = config::load_from_str("version: 1\n").unwrap();
    let default = ExporterConfig::default();
    assert_eq!(parsed.exporter.listen, default.exporter.listen);
    assert_eq!(parsed.sites.file, default.sites.file);
    assert_eq!(parsed.poll.interval_ms, default.poll.interval_ms);
    assert_eq!(parsed.poll.timeout_ms, default.poll.timeout_ms);
    default.validate().expect("defaults must validate");
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
exporter:
  listen: "127.0.0.1:9300"
sites:
  file: "/etc/pagesize/sites.txt"
poll:
  interval_ms: 60000
  timeout_ms: 5000
  max_concurrency: 8
  schedule: fixed_rate
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.exporter.listen_addr().unwrap().port(), 9300);
    assert_eq!(cfg.sites.file, "/etc/pagesize/sites.txt");
    assert_eq!(cfg.poll.max_concurrency, Some(8));
    assert_eq!(cfg.poll.schedule, Schedule::FixedRate);
}

#[test]
fn rejects_out_of_range_values() {
    for bad in [
        "version: 2\n",
        "version: 1\nexporter:\n  listen: \"not-an-addr\"\n",
        "version: 1\nsites:\n  file: \"  \"\n",
        "version: 1\npoll:\n  interval_ms: 10\n",
        "version: 1\npoll:\n  timeout_ms: 0\n",
        "version: 1\npoll:\n  max_concurrency: 0\n",
        "version: 1\npoll:\n  schedule: whenever\n",
    ] {
        let err = config::load_from_str(bad).expect_err(bad);
        assert_eq!(err.code().as_str(), "BAD_CONFIG", "{bad}");
    }
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let path = std::env::temp_dir().join("pagesize-no-such-config.yaml");
    let cfg = config::load_or_default(&path).expect("defaults");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.exporter.listen, "0.0.0.0:9222");
}

#[test]
fn present_but_invalid_file_is_fatal() {
    let path = std::env::temp_dir().join(format!("pagesize-{}-bad.yaml", std::process::id()));
    std::fs::write(&path, "version: 1\nunknown: true\n").unwrap();
    let err = config::load_or_default(&path).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
    let _ = std::fs::remove_file(path);
}
