use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Stores user-configurable shell preferences and the last opened bill file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding the `YYYYMM.md` files. Defaults to the working directory.
    pub data_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened_file: Option<String>,
    #[serde(default = "Config::default_undo_limit")]
    pub undo_limit: usize,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            last_opened_file: None,
            undo_limit: Self::default_undo_limit(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            plain_output: false,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 5] = [
        "data_dir",
        "last_opened_file",
        "undo_limit",
        "ui_color_enabled",
        "plain_output",
    ];

    pub fn default_undo_limit() -> usize {
        50
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Updates one setting from its textual form. `none` or an empty value
    /// clears optional settings.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "data_dir" => self.data_dir = optional(value).map(PathBuf::from),
            "last_opened_file" => self.last_opened_file = optional(value).map(str::to_string),
            "undo_limit" => {
                self.undo_limit = value
                    .parse::<usize>()
                    .ok()
                    .filter(|limit| *limit > 0)
                    .ok_or_else(|| invalid("undo_limit", value))?;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled =
                    parse_flag(value).ok_or_else(|| invalid("ui_color_enabled", value))?;
            }
            "plain_output" => {
                self.plain_output =
                    parse_flag(value).ok_or_else(|| invalid("plain_output", value))?;
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Key/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "data_dir",
                self.data_dir
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "(working directory)".into()),
            ),
            (
                "last_opened_file",
                self.last_opened_file
                    .clone()
                    .unwrap_or_else(|| "(none)".into()),
            ),
            ("undo_limit", self.undo_limit.to_string()),
            ("ui_color_enabled", on_off(self.ui_color_enabled)),
            ("plain_output", on_off(self.plain_output)),
        ]
    }
}

fn optional(value: &str) -> Option<&str> {
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn on_off(value: bool) -> String {
    if value { "on" } else { "off" }.to_string()
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
