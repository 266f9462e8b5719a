//! Tests for bootstrap configuration and email settings resolution
//!
//! Tests the implementation of:
//! - Missing TOML file SHALL NOT prevent startup (defaults are used)
//! - Malformed TOML file is reported as an error
//! - Command line / environment overrides take priority over TOML
//! - Email credential absence selects degraded mode
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate SENDGRID_API_KEY or EMAIL_FROM are marked with #[serial].

use mnu_common::config::{
    ConfigSource, EmailConfig, EmailSettings, ServerConfig, TomlConfig, DEFAULT_FROM_ADDRESS,
    DEFAULT_PORT, SENDGRID_API_URL,
};
use mnu_common::Error;
use serial_test::serial;
use std::collections::HashMap;
use std::env;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

fn write_toml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Should create temp file");
    file.write_all(content.as_bytes()).expect("Should write TOML");
    file
}

/// Log sink shared between a test and its scoped subscriber
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` under a plain-text subscriber and return what it logged
fn capture_logs(f: impl FnOnce()) -> String {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = log.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_full_toml_file() {
    let file = write_toml(
        r#"
[server]
host = "127.0.0.1"
port = 8080

[email]
from = "members@example.org"
api_url = "http://127.0.0.1:9999/send"

[logging]
level = "debug"
"#,
    );

    let config = TomlConfig::load(file.path()).expect("Should parse TOML");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.email.from.as_deref(), Some("members@example.org"));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_partial_toml_uses_defaults() {
    let file = write_toml("[logging]\nlevel = \"warn\"\n");

    let config = TomlConfig::load(file.path()).expect("Should parse TOML");
    assert_eq!(config.server, ServerConfig::default());
    assert_eq!(config.server.port, DEFAULT_PORT);
    assert!(config.email.from.is_none());
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = dir.path().join("does-not-exist.toml");

    let (config, source) =
        TomlConfig::load_or_default(Some(&path)).expect("Missing file is not fatal");
    assert_eq!(config.server.port, DEFAULT_PORT);
    assert_eq!(config.logging.level, "info");
    assert_eq!(source, ConfigSource::Missing(path));
}

#[test]
fn test_missing_file_is_reported_as_warning() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = dir.path().join("does-not-exist.toml");
    let (_, source) = TomlConfig::load_or_default(Some(&path)).expect("Missing file is not fatal");

    let output = capture_logs(|| source.report());

    assert!(output.contains("WARN"), "expected a warning, got: {}", output);
    assert!(output.contains("does-not-exist.toml not found, using defaults"));
}

#[test]
fn test_loaded_file_is_reported() {
    let file = write_toml("[server]
port = 8080
");

    let (config, source) = TomlConfig::load_or_default(Some(file.path())).expect("Should load");
    assert_eq!(config.server.port, 8080);
    assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));

    let output = capture_logs(|| source.report());
    assert!(output.contains("INFO"));
    assert!(output.contains("Loaded configuration from"));
}

#[test]
fn test_load_of_absent_file_is_io_error() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let err = TomlConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = write_toml("[server\nport = ");
    let err = TomlConfig::load_or_default(Some(file.path())).unwrap_err();
    assert!(matches!(err, Error::TomlParse(_)));

    let file = write_toml("[server]\nport = \"not a number\"\n");
    assert!(TomlConfig::load(file.path()).is_err());
}

#[test]
fn test_server_overrides() {
    let server = ServerConfig::default().with_overrides(None, Some(7000));
    assert_eq!(server.port, 7000);
    assert_eq!(server.host, "0.0.0.0");
    assert_eq!(server.address(), "0.0.0.0:7000");

    let server = ServerConfig {
        host: "10.0.0.1".to_string(),
        port: 9000,
    }
    .with_overrides(Some("127.0.0.1".to_string()), None);
    assert_eq!(server.address(), "127.0.0.1:9000");
}

#[test]
fn test_email_defaults_without_credential() {
    let config = EmailConfig::from_lookup(&EmailSettings::default(), lookup_from(&[]));

    assert!(config.is_degraded());
    assert_eq!(config.from, DEFAULT_FROM_ADDRESS);
    assert_eq!(config.api_url, SENDGRID_API_URL);
}

#[test]
fn test_blank_credential_counts_as_absent() {
    let config = EmailConfig::from_lookup(
        &EmailSettings::default(),
        lookup_from(&[("SENDGRID_API_KEY", "   ")]),
    );
    assert!(config.is_degraded());
}

#[test]
fn test_environment_from_overrides_toml() {
    let settings = EmailSettings {
        from: Some("toml@example.org".to_string()),
        api_url: None,
    };

    let config = EmailConfig::from_lookup(
        &settings,
        lookup_from(&[("SENDGRID_API_KEY", "SG.key"), ("EMAIL_FROM", "env@example.org")]),
    );
    assert!(!config.is_degraded());
    assert_eq!(config.api_key.as_deref(), Some("SG.key"));
    assert_eq!(config.from, "env@example.org");

    let config = EmailConfig::from_lookup(&settings, lookup_from(&[]));
    assert_eq!(config.from, "toml@example.org");
}

#[test]
fn test_debug_output_redacts_credential() {
    let config = EmailConfig::from_lookup(
        &EmailSettings::default(),
        lookup_from(&[("SENDGRID_API_KEY", "SG.very-secret")]),
    );
    let debug = format!("{:?}", config);
    assert!(!debug.contains("very-secret"));
    assert!(debug.contains("<redacted>"));
}

#[test]
#[serial]
fn test_resolve_reads_process_environment() {
    env::set_var("SENDGRID_API_KEY", "SG.from-env");
    env::set_var("EMAIL_FROM", "union@example.org");

    let config = EmailConfig::resolve(&EmailSettings::default());
    assert_eq!(config.api_key.as_deref(), Some("SG.from-env"));
    assert_eq!(config.from, "union@example.org");

    env::remove_var("SENDGRID_API_KEY");
    env::remove_var("EMAIL_FROM");

    let config = EmailConfig::resolve(&EmailSettings::default());
    assert!(config.is_degraded());
}
