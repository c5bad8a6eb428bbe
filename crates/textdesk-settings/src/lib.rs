//! # textdesk-settings
//!
//! Configuration management with layered sources.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`TextdeskSettings::default()`]
//! 2. **User file**: `~/.textdesk/settings.json` or `$TEXTDESK_SETTINGS`
//!    (deep-merged over defaults)
//! 3. **Environment variables**: `PORT` and `TEXTDESK_*` overrides
//!
//! Command-line flags are applied on top by the binary.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{InvalidSetting, Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;
