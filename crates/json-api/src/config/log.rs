//! Logging Config

use serde::Deserialize;

/// Log output format.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    #[default]
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Log level (debug, info, warn, error)
    pub level: String,

    /// Log format (compact, json)
    pub format: LogFormat,
}

impl LogSettings {
    /// The configured level, falling back to `info` for anything unrecognised.
    #[must_use]
    pub fn normalised_level(&self) -> &'static str {
        match self.level.trim().to_ascii_lowercase().as_str() {
            "debug" => "debug",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(level: &str) -> &'static str {
        LogSettings {
            level: level.to_string(),
            format: LogFormat::Json,
        }
        .normalised_level()
    }

    #[test]
    fn known_levels_are_kept() {
        assert_eq!(level("debug"), "debug");
        assert_eq!(level("WARN"), "warn");
        assert_eq!(level("error"), "error");
        assert_eq!(level("info"), "info");
    }

    #[test]
    fn unknown_levels_fall_back_to_info() {
        assert_eq!(level("trace"), "info");
        assert_eq!(level("verbose"), "info");
        assert_eq!(level(""), "info");
    }
}
