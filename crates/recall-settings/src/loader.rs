//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`RecallSettings::default()`]
//! 2. If `~/.recall/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::RecallSettings;

/// Resolve the path to the settings file (`~/.recall/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".recall").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<RecallSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<RecallSettings> {
    let defaults = serde_json::to_value(RecallSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: RecallSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
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

/// Apply environment variable overrides to loaded settings.
///
/// Each env var has strict parsing rules: integers must be valid and within
/// range; invalid values are silently ignored (fall back to file/default).
pub fn apply_env_overrides(settings: &mut RecallSettings) {
    // ── Budget ──────────────────────────────────────────────────────
    if let Some(v) = read_env_u32("RECALL_BUDGET_TOTAL", 256, 1_000_000) {
        settings.budget.total_tokens = v;
    }
    if let Some(v) = read_env_u32("RECALL_BUDGET_OUTPUT_RESERVATION", 0, 1_000_000) {
        settings.budget.output_reservation = v;
    }
    if let Some(v) = read_env_u32("RECALL_BUDGET_WINDOW", 0, 1_000_000) {
        settings.budget.window_allocation = v;
    }

    // ── Distillation ────────────────────────────────────────────────
    if let Some(v) = read_env_u32("RECALL_CHUNK_SIZE", 1, 1_000) {
        settings.distill.chunk_size = v;
    }
    if let Some(v) = read_env_u32("RECALL_MAX_CHUNKS", 1, 100) {
        settings.distill.max_chunks = v;
    }

    // ── Fact gate ───────────────────────────────────────────────────
    if let Some(v) = read_env_u32("RECALL_MIN_FACT_CHARS", 1, 1_000) {
        settings.facts.min_fact_chars = v;
    }

    // ── Logging ─────────────────────────────────────────────────────
    if let Ok(level) = std::env::var("RECALL_LOG_LEVEL") {
        let level = level.trim().to_lowercase();
        if matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
            settings.logging.level = level;
        }
    }
}

/// Read and range-check a u32 env var. Invalid or out-of-range values
/// return `None`.
fn read_env_u32(name: &str, min: u32, max: u32) -> Option<u32> {
    parse_in_range(&std::env::var(name).ok()?, min, max)
}

/// Parse a u32 from text and range-check it.
fn parse_in_range(raw: &str, min: u32, max: u32) -> Option<u32> {
    let value: u32 = raw.trim().parse().ok()?;
    (min..=max).contains(&value).then_some(value)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
