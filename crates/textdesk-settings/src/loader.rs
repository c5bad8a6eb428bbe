//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`TextdeskSettings::default()`]
//! 2. If the settings file exists, deep-merge its values over defaults
//! 3. Apply environment variable overrides (highest priority)
//! 4. Validate the result
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::TextdeskSettings;

/// Env var naming an explicit settings file.
pub const SETTINGS_PATH_ENV: &str = "TEXTDESK_SETTINGS";

/// Resolve the settings file path: `$TEXTDESK_SETTINGS`, else `~/.textdesk/settings.json`.
pub fn settings_path() -> PathBuf {
    if let Some(path) = read_env_string(SETTINGS_PATH_ENV) {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".textdesk").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<TextdeskSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults; a file with invalid JSON is an error.
pub fn load_settings_from_path(path: &Path) -> Result<TextdeskSettings> {
    let mut settings = load_file_layer(path)?;
    apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

/// Defaults merged with the file at `path`, without env overrides.
pub fn load_file_layer(path: &Path) -> Result<TextdeskSettings> {
    let parse_err = |source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let defaults = serde_json::to_value(TextdeskSettings::default()).map_err(parse_err)?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let user: Value = serde_json::from_str(&content).map_err(parse_err)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    serde_json::from_value(merged).map_err(parse_err)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(settings: &mut TextdeskSettings) {
    apply_overrides_from(settings, |name| std::env::var(name).ok());
}

/// Apply overrides using `lookup` to read variables.
///
/// `PORT` is honoured for compatibility with common hosting setups;
/// `TEXTDESK_PORT` wins when both are set. Invalid values are ignored
/// with a warning.
pub fn apply_overrides_from<F>(settings: &mut TextdeskSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    for name in ["PORT", "TEXTDESK_PORT"] {
        if let Some(v) = read(name) {
            match parse_u16_range(&v, 0, u16::MAX) {
                Some(port) => settings.server.port = port,
                None => warn_invalid(name, &v),
            }
        }
    }
    if let Some(v) = read("TEXTDESK_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = read("TEXTDESK_STATIC_DIR") {
        settings.server.static_dir = v;
    }
    if let Some(v) = read("TEXTDESK_MAX_BODY_BYTES") {
        match parse_usize_range(&v, 1, 64 * 1024 * 1024) {
            Some(n) => settings.server.max_body_bytes = n,
            None => warn_invalid("TEXTDESK_MAX_BODY_BYTES", &v),
        }
    }
    if let Some(v) = read("TEXTDESK_SHUTDOWN_TIMEOUT_SECS") {
        match parse_u64_range(&v, 1, 3_600) {
            Some(n) => settings.server.shutdown_timeout_secs = n,
            None => warn_invalid("TEXTDESK_SHUTDOWN_TIMEOUT_SECS", &v),
        }
    }
    if let Some(v) = read("TEXTDESK_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = read("TEXTDESK_LOG_FORMAT") {
        match v.parse() {
            Ok(format) => settings.logging.format = format,
            Err(_) => warn_invalid("TEXTDESK_LOG_FORMAT", &v),
        }
    }
}

// ── Pure parsing functions ──────────────────────────────────────────────────

/// Parse a string as a `u16` within a range.
pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `usize` within a range.
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn warn_invalid(name: &str, value: &str) {
    tracing::warn!(key = name, value, "invalid env var, ignoring");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{InvalidSetting, SettingsError};
    use assert_matches::assert_matches;
    use std::collections::HashMap;
    use std::io::Write;
    use textdesk_core::logging::LogFormat;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn write_settings(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn deep_merge_nested_objects() {
        let target = serde_json::json!({"a": {"b": 1, "c": 2}, "d": 3});
        let source = serde_json::json!({"a": {"b": 10}, "e": 5});
        let merged = deep_merge(target, source);
        assert_eq!(merged, serde_json::json!({"a": {"b": 10, "c": 2}, "d": 3, "e": 5}));
    }

    #[test]
    fn deep_merge_skips_nulls_and_replaces_arrays() {
        let target = serde_json::json!({"a": 1, "list": [1, 2, 3]});
        let source = serde_json::json!({"a": null, "list": [9]});
        let merged = deep_merge(target, source);
        assert_eq!(merged, serde_json::json!({"a": 1, "list": [9]}));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_file_layer(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_settings(r#"{"server":{"port":4567,"staticDir":"www"},"logging":{"format":"json"}}"#);
        let settings = load_file_layer(file.path()).unwrap();
        assert_eq!(settings.server.port, 4567);
        assert_eq!(settings.server.static_dir, "www");
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let file = write_settings("{not json");
        assert_matches!(load_file_layer(file.path()), Err(SettingsError::Parse { .. }));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let file = write_settings(r#"{"server":{"maxBodyBytes":0}}"#);
        let mut settings = load_file_layer(file.path()).unwrap();
        apply_overrides_from(&mut settings, env(&[]));
        assert_matches!(
            settings.validate(),
            Err(SettingsError::Invalid(InvalidSetting::ZeroBodyLimit))
        );
    }

    #[test]
    fn port_env_overrides() {
        let mut settings = TextdeskSettings::default();
        apply_overrides_from(&mut settings, env(&[("PORT", "8080")]));
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn textdesk_port_wins_over_port() {
        let mut settings = TextdeskSettings::default();
        apply_overrides_from(&mut settings, env(&[("PORT", "8080"), ("TEXTDESK_PORT", "9090")]));
        assert_eq!(settings.server.port, 9090);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut settings = TextdeskSettings::default();
        apply_overrides_from(
            &mut settings,
            env(&[
                ("PORT", "not-a-port"),
                ("TEXTDESK_MAX_BODY_BYTES", "0"),
                ("TEXTDESK_LOG_FORMAT", "xml"),
                ("TEXTDESK_SHUTDOWN_TIMEOUT_SECS", "-1"),
            ]),
        );
        let defaults = TextdeskSettings::default();
        assert_eq!(settings.server.port, defaults.server.port);
        assert_eq!(settings.server.max_body_bytes, defaults.server.max_body_bytes);
        assert_eq!(settings.logging.format, defaults.logging.format);
        assert_eq!(
            settings.server.shutdown_timeout_secs,
            defaults.server.shutdown_timeout_secs
        );
    }

    #[test]
    fn string_env_overrides() {
        let mut settings = TextdeskSettings::default();
        apply_overrides_from(
            &mut settings,
            env(&[
                ("TEXTDESK_HOST", "127.0.0.1"),
                ("TEXTDESK_STATIC_DIR", "/srv/www"),
                ("TEXTDESK_LOG_LEVEL", "debug"),
                ("TEXTDESK_LOG_FORMAT", "compact"),
                ("TEXTDESK_MAX_BODY_BYTES", "2048"),
            ]),
        );
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.static_dir, "/srv/www");
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Compact);
        assert_eq!(settings.server.max_body_bytes, 2048);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut settings = TextdeskSettings::default();
        apply_overrides_from(&mut settings, env(&[("TEXTDESK_HOST", "")]));
        assert_eq!(settings.server.host, "0.0.0.0");
    }

    #[test]
    fn parse_ranges() {
        assert_eq!(parse_u16_range("80", 1, 65535), Some(80));
        assert_eq!(parse_u16_range("0", 1, 65535), None);
        assert_eq!(parse_u16_range("70000", 0, 65535), None);
        assert_eq!(parse_u64_range(" 30 ", 1, 60), Some(30));
        assert_eq!(parse_usize_range("abc", 0, 10), None);
    }
}
