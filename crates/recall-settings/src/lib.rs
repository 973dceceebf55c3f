//! # recall-settings
//!
//! Layered configuration for the Recall memory engine.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`RecallSettings::default()`]
//! 2. **User file** — `~/.recall/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `RECALL_*` overrides (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use recall_settings::get_settings;
//!
//! let settings = get_settings();
//! println!("token budget: {}", settings.budget.total_tokens);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::{
    BudgetSettings, DistillSettings, FactGateSettings, LoggingSettings, RecallSettings,
};

use std::sync::OnceLock;

/// Global settings singleton.
static SETTINGS: OnceLock<RecallSettings> = OnceLock::new();

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.recall/settings.json` with env
/// var overrides. On subsequent calls, returns the cached value. If loading
/// fails, returns compiled defaults.
pub fn get_settings() -> &'static RecallSettings {
    SETTINGS.get_or_init(|| load_settings().unwrap_or_default())
}
