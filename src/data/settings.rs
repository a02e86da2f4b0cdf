//! Loader for the optional `config.json` settings document.
//!
//! The document is never required. Every key is looked up individually and
//! only positive integers override a default, so a partly broken file still
//! yields usable settings.

use serde_json::Value;
use std::{path::Path, time::Duration};

use crate::model::settings::{ColumnWidths, RateLimit, Settings};

/// Reads settings from `path`, falling back to defaults for anything missing or invalid.
///
/// # Arguments
/// - `path` - Location of `config.json`
///
/// # Returns
/// - `Settings` - Parsed settings; all defaults when the file is absent or unreadable
pub async fn load(path: &Path) -> Settings {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No settings file at {}; using defaults", path.display());
            return Settings::default();
        }
        Err(e) => {
            tracing::warn!("Could not read settings from {}: {}", path.display(), e);
            return Settings::default();
        }
    };

    match serde_json::from_str::<Value>(&contents) {
        Ok(value) if value.is_object() => from_value(&value),
        Ok(_) => {
            tracing::warn!("Settings file {} is not a JSON object; using defaults", path.display());
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Could not parse settings from {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

/// Builds settings from an already parsed document.
pub fn from_value(value: &Value) -> Settings {
    let defaults = Settings::default();
    let rate_limits = value.get("rate_limits");

    let mut settings = Settings {
        list_tables: column_widths(value.get("list_tables"), defaults.list_tables),
        my_tables: column_widths(value.get("my_tables"), defaults.my_tables),
        rate_limits: defaults.rate_limits,
    };

    settings.rate_limits.user = rate_limit(
        rate_limits,
        "user_command_limit",
        "user_command_window_seconds",
        defaults.rate_limits.user,
    );
    settings.rate_limits.guild = rate_limit(
        rate_limits,
        "guild_command_limit",
        "guild_command_window_seconds",
        defaults.rate_limits.guild,
    );

    settings
}

fn positive_int(section: Option<&Value>, key: &str) -> Option<u64> {
    section?.get(key)?.as_u64().filter(|v| *v > 0)
}

fn column_widths(section: Option<&Value>, defaults: ColumnWidths) -> ColumnWidths {
    let widths = section.and_then(|s| s.get("column_widths"));
    let width = |key: &str, default: usize| {
        positive_int(widths, key)
            .map(|v| v as usize)
            .unwrap_or(default)
    };

    ColumnWidths {
        system: width("system", defaults.system),
        schedule: width("schedule", defaults.schedule),
        gm: width("gm", defaults.gm),
        players: width("players", defaults.players),
        status: width("status", defaults.status),
    }
}

fn rate_limit(
    section: Option<&Value>,
    limit_key: &str,
    window_key: &str,
    default: RateLimit,
) -> RateLimit {
    let max_calls = positive_int(section, limit_key)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default.max_calls);
    let window = positive_int(section, window_key)
        .map(|secs| {
            let window = Duration::from_secs(secs);
            if window > RateLimit::MAX_WINDOW {
                tracing::warn!(
                    "{} of {}s exceeds {}s; clamping",
                    window_key,
                    secs,
                    RateLimit::MAX_WINDOW.as_secs()
                );
                RateLimit::MAX_WINDOW
            } else {
                window
            }
        })
        .unwrap_or(default.window);

    RateLimit { max_calls, window }
}
