//! Settings types.
//!
//! All structs use `#[serde(default)]` so a settings file only needs the
//! keys it overrides. Keys are camelCase on disk.

use serde::{Deserialize, Serialize};
use textdesk_core::logging::LogFormat;

use crate::errors::{InvalidSetting, Result};

/// Root settings object.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextdeskSettings {
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Log output settings.
    pub logging: LoggingSettings,
}

impl TextdeskSettings {
    /// Reject values the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        let server = &self.server;
        if server.host.trim().is_empty() {
            return Err(InvalidSetting::BlankHost.into());
        }
        if server.static_dir.trim().is_empty() {
            return Err(InvalidSetting::BlankStaticDir.into());
        }
        if server.max_body_bytes == 0 {
            return Err(InvalidSetting::ZeroBodyLimit.into());
        }
        if server.shutdown_timeout_secs == 0 {
            return Err(InvalidSetting::ZeroShutdownTimeout.into());
        }
        Ok(())
    }
}

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// Listen port (`0` picks a free port).
    pub port: u16,
    /// Directory holding `index.html`, `about.html`, `404.html` and assets.
    pub static_dir: String,
    /// Largest accepted request body in bytes.
    pub max_body_bytes: usize,
    /// How long shutdown waits for in-flight requests.
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: "public".to_string(),
            max_body_bytes: 100 * 1024,
            shutdown_timeout_secs: 10,
        }
    }
}

/// Log output settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default filter directive (e.g. `"info"` or `"textdesk_server=debug"`).
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SettingsError;
    use assert_matches::assert_matches;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: TextdeskSettings =
            serde_json::from_str(r#"{"server":{"port":8080}}"#).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn keys_are_camel_case() {
        let json = serde_json::to_value(TextdeskSettings::default()).unwrap();
        assert!(json["server"].get("staticDir").is_some());
        assert!(json["server"].get("maxBodyBytes").is_some());
        assert!(json["server"].get("shutdownTimeoutSecs").is_some());
        assert_eq!(json["logging"]["format"], "pretty");
    }

    #[test]
    fn validate_rejects_zero_body_limit() {
        let mut settings = TextdeskSettings::default();
        settings.server.max_body_bytes = 0;
        assert_matches!(settings.validate(), Err(SettingsError::Invalid(InvalidSetting::ZeroBodyLimit)));
    }

    #[test]
    fn validate_rejects_blank_static_dir() {
        let mut settings = TextdeskSettings::default();
        settings.server.static_dir = "  ".into();
        assert_matches!(settings.validate(), Err(SettingsError::Invalid(InvalidSetting::BlankStaticDir)));
    }

    #[test]
    fn validate_rejects_zero_shutdown_timeout() {
        let mut settings = TextdeskSettings::default();
        settings.server.shutdown_timeout_secs = 0;
        assert_matches!(
            settings.validate(),
            Err(SettingsError::Invalid(InvalidSetting::ZeroShutdownTimeout))
        );
    }

    #[test]
    fn validate_rejects_blank_host() {
        let mut settings = TextdeskSettings::default();
        settings.server.host = String::new();
        assert_matches!(settings.validate(), Err(SettingsError::Invalid(InvalidSetting::BlankHost)));
    }

    #[test]
    fn port_zero_is_allowed() {
        let mut settings = TextdeskSettings::default();
        settings.server.port = 0;
        assert!(settings.validate().is_ok());
    }
}
