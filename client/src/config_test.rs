use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

// =============================================================
// SessionConfig::is_api_target
// =============================================================

#[test]
fn api_target_matches_prefix_segments() {
    let cfg = SessionConfig::default();
    assert!(cfg.is_api_target("/api/accounts"));
    assert!(cfg.is_api_target("/api/transactions/recent"));
    assert!(cfg.is_api_target("/api"));
    assert!(cfg.is_api_target("/api?type=net_worth"));
}

#[test]
fn page_targets_are_not_api() {
    let cfg = SessionConfig::default();
    assert!(!cfg.is_api_target("/dashboard"));
    assert!(!cfg.is_api_target("/transactions"));
    assert!(!cfg.is_api_target("/apis"));
    assert!(!cfg.is_api_target("/"));
    assert!(!cfg.is_api_target("api/accounts"));
}

#[test]
fn api_prefix_with_trailing_slash_behaves_the_same() {
    let cfg = SessionConfig { api_prefix: "/api/".to_owned(), ..SessionConfig::default() };
    assert!(cfg.is_api_target("/api/accounts"));
    assert!(!cfg.is_api_target("/apis"));
}

// =============================================================
// ClientConfig::from_lookup
// =============================================================

#[test]
fn from_lookup_defaults() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("HOME", "/home/ana")])).unwrap();
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.timeouts, Timeouts::default());
    assert_eq!(cfg.session_file, PathBuf::from("/home/ana/.pfm/session.json"));
    assert_eq!(cfg.session, SessionConfig::default());
}

#[test]
fn from_lookup_without_home_uses_working_dir_file() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg.session_file, PathBuf::from(".pfm-session.json"));
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("PFM_BASE_URL", "https://finance.example.test/"),
        ("PFM_REQUEST_TIMEOUT_SECS", "42"),
        ("PFM_CONNECT_TIMEOUT_SECS", "7"),
        ("PFM_SESSION_FILE", "/tmp/pfm.json"),
        ("PFM_LOGIN_PATH", "/signin"),
        ("PFM_API_PREFIX", "/v2"),
    ]))
    .unwrap();
    assert_eq!(cfg.base_url, "https://finance.example.test");
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 42, connect_secs: 7 });
    assert_eq!(cfg.session_file, PathBuf::from("/tmp/pfm.json"));
    assert_eq!(cfg.session.login_path, "/signin");
    assert_eq!(cfg.session.api_prefix, "/v2");
}

#[test]
fn from_lookup_invalid_timeouts_fall_back() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("PFM_REQUEST_TIMEOUT_SECS", "soon"),
        ("PFM_CONNECT_TIMEOUT_SECS", "0"),
    ]))
    .unwrap();
    assert_eq!(cfg.timeouts, Timeouts::default());
}

#[test]
fn from_lookup_rejects_non_http_base_url() {
    let err = ClientConfig::from_lookup(lookup_from(&[("PFM_BASE_URL", "ftp://x")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
}

#[test]
fn from_lookup_rejects_relative_api_prefix() {
    let err = ClientConfig::from_lookup(lookup_from(&[("PFM_API_PREFIX", "api")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidPath { var: "PFM_API_PREFIX", value: "api".to_owned() });
}
