//! Why textdesk refused to start with its settings.

use std::path::PathBuf;

use thiserror::Error;

/// A settings file that could not be used, or a value the server cannot run with.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file exists but reading it failed.
    #[error("cannot read settings file {}: {source}", .path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The file is not JSON, or a key holds a value of the wrong type.
    #[error("settings file {} is not usable: {source}", .path.display())]
    Parse {
        /// File that was being parsed.
        path: PathBuf,
        /// Underlying decode failure.
        source: serde_json::Error,
    },
    /// The merged settings fail [`TextdeskSettings::validate`](crate::TextdeskSettings::validate).
    #[error(transparent)]
    Invalid(#[from] InvalidSetting),
}

/// Server settings textdesk cannot bind or serve with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidSetting {
    /// `server.host` is blank.
    #[error("server.host must not be blank")]
    BlankHost,
    /// `server.staticDir` is blank.
    #[error("server.staticDir must name the directory holding the pages")]
    BlankStaticDir,
    /// `server.maxBodyBytes` is zero, which would reject every POST.
    #[error("server.maxBodyBytes must be at least 1")]
    ZeroBodyLimit,
    /// `server.shutdownTimeoutSecs` is zero, which would abort in-flight requests.
    #[error("server.shutdownTimeoutSecs must be at least 1")]
    ZeroShutdownTimeout,
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn read_error_names_the_file() {
        let err = SettingsError::Read {
            path: PathBuf::from("/etc/textdesk.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/textdesk.json"), "got: {msg}");
        assert!(msg.contains("denied"), "got: {msg}");
    }

    #[test]
    fn parse_error_names_the_file() {
        let source = serde_json::from_str::<serde_json::Value>("{bad}").unwrap_err();
        let err = SettingsError::Parse {
            path: PathBuf::from("settings.json"),
            source,
        };
        assert!(err.to_string().starts_with("settings file settings.json is not usable"));
    }

    #[test]
    fn invalid_setting_is_shown_as_is() {
        let err: SettingsError = InvalidSetting::ZeroBodyLimit.into();
        assert_matches!(err, SettingsError::Invalid(InvalidSetting::ZeroBodyLimit));
        assert_eq!(err.to_string(), "server.maxBodyBytes must be at least 1");
    }
}
