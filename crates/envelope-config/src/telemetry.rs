use serde::Deserialize;

/// Logging configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// `tracing` filter directive (e.g. `info,envelope_server=debug`)
    ///
    /// `RUST_LOG` takes precedence when set.
    #[serde(default)]
    pub log_filter: Option<String>,
    /// Output format for log lines
    #[serde(default)]
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_text() {
        let config: TelemetryConfig = toml::from_str("").unwrap();
        assert_eq!(config.format, LogFormat::Text);
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn deserialize_json_format() {
        let config: TelemetryConfig = toml::from_str("format = \"json\"\nlog_filter = \"debug\"").unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
    }
}
