#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use routestat_middleware::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
statsd:
  collector_host: "127.0.0.1"
  colector_port: 9125 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind(), "INVALID_CONFIG");
}

#[test]
fn ok_minimal_config_uses_defaults() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.statsd.collector_host, "127.0.0.1");
    assert_eq!(cfg.statsd.collector_port, 8125);
    assert_eq!(cfg.statsd.request_key_field, "statsdKey");
    assert_eq!(cfg.statsd.prefix, "express.http");
}

#[test]
fn partial_overlay_keeps_other_defaults() {
    let ok = r#"
version: 1
statsd:
  collector_port: 9125
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.statsd.collector_port, 9125);
    assert_eq!(cfg.statsd.collector_host, "127.0.0.1");
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.kind(), "UNSUPPORTED_VERSION");
}

#[test]
fn zero_port_rejected() {
    let bad = r#"
version: 1
statsd:
  collector_port: 0
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind(), "INVALID_CONFIG");
}

#[test]
fn empty_host_rejected() {
    let bad = r#"
version: 1
statsd:
  collector_host: "  "
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn reserved_prefix_rejected() {
    for prefix in ["", "api:v1", "a|b", "a b", "a@b", "a#b"] {
        let cfg = config::InterceptorConfig {
            prefix: prefix.to_string(),
            ..Default::default()
        };
        assert!(cfg.validate_naming().is_err(), "prefix {prefix:?} must be rejected");
    }
}

#[test]
fn load_shipped_config() {
    let cfg = config::load_from_file("../../routestat.yaml").expect("must load");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.statsd.collector_port, 8125);
}

#[test]
fn missing_file_is_an_error() {
    let err = config::load_from_file("does-not-exist.yaml").expect_err("must fail");
    assert_eq!(err.kind(), "INTERNAL");
}
