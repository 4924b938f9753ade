//! Integration tests for logging and endpoint configuration

use bridge_traits::log::LogLevel;
use core_runtime::config::{Network, WidgetEndpoints};
use core_runtime::logging::{redact_if_sensitive, LogFormat, LoggingConfig};

#[test]
fn test_logging_config_defaults() {
    let config = LoggingConfig::default();

    assert_eq!(config.level, LogLevel::Info);
    assert!(config.redact_sensitive);
    assert!(config.filter.is_none());
    assert!(config.logger_sink.is_none());
}

#[test]
fn test_logging_config_chaining() {
    // Only one global subscriber can exist per process, so exercise the builder
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Trace)
        .with_spans(true);

    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level, LogLevel::Trace);
    assert!(config.enable_spans);
    assert!(config.default_directives().contains("core_widget=trace"));
}

#[test]
fn test_redaction_keeps_addresses() {
    let accounts = "0x52908400098527886E0F7030069857D2E4169EE7";
    assert_eq!(redact_if_sensitive("accounts", accounts), accounts);
    assert_eq!(redact_if_sensitive("signed_tx", accounts), "[REDACTED]");
}

#[test]
fn test_endpoint_overrides_per_network() {
    let endpoints = WidgetEndpoints::default()
        .with_test("https://staging.widget.example/")
        .with_local("http://localhost:8080/");

    assert_eq!(
        endpoints.base_for(Network::Test).unwrap().as_str(),
        "https://staging.widget.example/"
    );
    assert_eq!(
        endpoints.base_for(Network::Local).unwrap().as_str(),
        "http://localhost:8080/"
    );
    assert_eq!(
        endpoints.base_for(Network::Main).unwrap().as_str(),
        "https://widget.hydroprotocol.io/"
    );
}
