//! Config file handling: default file creation, overrides and seed files.

use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

use iptv_scanner::config::{defaults::DEFAULT_SEED_URLS, Config, RewriteRuleConfig};
use iptv_scanner::discovery::normalize_seeds;
use iptv_scanner::errors::AppError;

#[test]
fn test_missing_file_writes_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let path_str = path.to_str().unwrap();

    let config = Config::load_from_file(path_str).unwrap();
    assert!(path.exists());
    assert_eq!(config.scan.max_workers, 50);

    // The generated file loads back to the same settings
    let reloaded = Config::load_from_file(path_str).unwrap();
    assert_eq!(reloaded.scan.request_timeout, config.scan.request_timeout);
    assert_eq!(reloaded.seeds.urls, config.seeds.urls);
    assert_eq!(reloaded.output.ip_list_path, PathBuf::from("ip.txt"));
}

#[test]
fn test_full_file_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scanner.toml");
    std::fs::write(
        &path,
        r#"
[scan]
max_workers = 200
request_timeout = 3
max_retries = 0
backoff_factor = "250ms"
retry_status_codes = ["5xx"]
accept_invalid_certs = false

[output]
ip_list_path = "out/hosts.txt"
channel_list_path = "out/channels.txt"

[[normalizer.extra_rules]]
pattern = "^CCTV(\\d+)$"
replacement = "CCTV-$1"
"#,
    )
    .unwrap();

    let config = Config::load_from_file(path.to_str().unwrap()).unwrap();
    config.validate().unwrap();

    assert_eq!(config.scan.max_workers, 200);
    assert_eq!(config.scan.request_timeout, Duration::from_secs(3));
    assert_eq!(config.scan.max_retries, 0);
    assert_eq!(config.scan.backoff_factor, Duration::from_millis(250));
    assert_eq!(config.scan.retry_status_codes, vec!["5xx"]);
    assert!(!config.scan.accept_invalid_certs);
    assert_eq!(config.output.channel_list_path, PathBuf::from("out/channels.txt"));
    assert_eq!(
        config.normalizer.extra_rules,
        vec![RewriteRuleConfig {
            pattern: r"^CCTV(\d+)$".to_string(),
            replacement: "CCTV-$1".to_string(),
        }]
    );
    // Untouched sections keep their defaults
    assert_eq!(config.seeds.urls.len(), DEFAULT_SEED_URLS.len());
}

#[test]
fn test_negative_timeout_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[scan]\nrequest_timeout = -1\n").unwrap();

    assert!(Config::load_from_file(path.to_str().unwrap()).is_err());
}

#[test]
fn test_seed_file_replaces_inline_seeds() {
    let dir = TempDir::new().unwrap();
    let seeds = dir.path().join("seeds.txt");
    std::fs::write(
        &seeds,
        "# hotel boxes\nhttp://10.0.0.5:9901\n\n  https://10.0.1.7:8443  \nhttp://10.0.0.99:9901\n",
    )
    .unwrap();

    let mut config = Config::default();
    config.seeds.seed_file = Some(seeds);

    let resolved = config.resolve_seeds().unwrap();
    assert_eq!(
        resolved,
        vec![
            "http://10.0.0.5:9901",
            "https://10.0.1.7:8443",
            "http://10.0.0.99:9901",
        ]
    );
    assert_eq!(normalize_seeds(&resolved).len(), 2);
}

#[test]
fn test_missing_seed_file_is_seed_input_error() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.seeds.seed_file = Some(dir.path().join("nope.txt"));

    let err = config.resolve_seeds().unwrap_err();
    assert!(matches!(err, AppError::SeedInput { .. }));
}
