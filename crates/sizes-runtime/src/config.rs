#![forbid(unsafe_code)]

//! Simulator configuration loaded from TOML or JSON.
//!
//! ```toml
//! # sizes.toml
//! [reveal]
//! delay_ms = 1000
//! damping_ratio = 0.75
//! response_ms = 1000
//! panel_height = 220
//!
//! [initial]
//! device = "phone-4.7"
//! orientation = "landscape"
//! content_size = "extra-large"
//! ```
//!
//! ```rust,ignore
//! let config = SimulatorConfig::from_toml_file("sizes.toml")?;
//! let config = SimulatorConfig::from_json_str(json)?;
//! ```
//!
//! Every field is optional and defaults to the built-in behavior, so
//! `SimulatorConfig::default()` matches a container built without a file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sizes_core::{ContentSizeCategory, Device, Orientation};
use web_time::Duration;

use crate::controller::SelectionEvent;
use crate::reveal::RevealMotion;

/// Top-level simulator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub reveal: RevealConfig,
    pub initial: InitialSelection,
}

/// Configuration panel reveal timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Delay between attachment and the start of the reveal. Default: 1000.
    pub delay_ms: u64,
    /// Spring damping ratio, in (0, 1]. Default: 0.75.
    pub damping_ratio: f64,
    /// Spring response period. Default: 1000.
    pub response_ms: u64,
    /// Panel travel distance in points. Default: 220.
    pub panel_height: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1000,
            damping_ratio: 0.75,
            response_ms: 1000,
            panel_height: 220.0,
        }
    }
}

impl RevealConfig {
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    #[must_use]
    pub fn motion(&self) -> RevealMotion {
        RevealMotion {
            damping_ratio: self.damping_ratio,
            response: Duration::from_millis(self.response_ms),
            panel_height: self.panel_height,
        }
    }
}

/// Selection applied right after a screen is attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialSelection {
    pub device: Device,
    pub orientation: Orientation,
    pub content_size: ContentSizeCategory,
}

impl InitialSelection {
    #[must_use]
    pub fn event(&self) -> SelectionEvent {
        SelectionEvent {
            orientation: self.orientation,
            device: self.device,
            content_size: self.content_size,
        }
    }
}

impl SimulatorConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Human-readable problems with this configuration. Empty when valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let reveal = &self.reveal;

        if !(reveal.damping_ratio > 0.0 && reveal.damping_ratio <= 1.0) {
            errors.push(format!(
                "reveal.damping_ratio must be in (0, 1], got {}",
                reveal.damping_ratio
            ));
        }
        if reveal.response_ms == 0 {
            errors.push("reveal.response_ms must be > 0".into());
        }
        if !(reveal.panel_height > 0.0 && reveal.panel_height.is_finite()) {
            errors.push(format!(
                "reveal.panel_height must be > 0, got {}",
                reveal.panel_height
            ));
        }
        errors
    }

    pub(crate) fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Format as a JSONL line for structured logging.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        format!(
            r#"{{"schema":"sizes-config-v1","reveal_delay_ms":{},"damping_ratio":{},"response_ms":{},"panel_height":{},"initial_device":"{}","initial_orientation":"{}","initial_content_size":"{}"}}"#,
            self.reveal.delay_ms,
            self.reveal.damping_ratio,
            self.reveal.response_ms,
            self.reveal.panel_height,
            self.initial.device,
            self.initial.orientation,
            self.initial.content_size,
        )
    }
}

/// Errors from loading a [`SimulatorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_builtin_behavior() {
        let config = SimulatorConfig::default();
        assert_eq!(config.reveal.delay(), Duration::from_secs(1));
        assert_eq!(config.reveal.motion(), RevealMotion::default());
        assert_eq!(config.initial.device, Device::Default);
        assert_eq!(config.initial.orientation, Orientation::Portrait);
        assert_eq!(config.initial.content_size, ContentSizeCategory::Large);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(SimulatorConfig::from_toml_str("").unwrap(), SimulatorConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config = SimulatorConfig::from_toml_str(
            r#"
            [reveal]
            delay_ms = 250

            [initial]
            device = "phone-5.5"
            orientation = "landscape"
            "#,
        )
        .unwrap();
        assert_eq!(config.reveal.delay_ms, 250);
        assert_eq!(config.reveal.damping_ratio, 0.75);
        assert_eq!(config.initial.device, Device::Phone5_5Inch);
        assert_eq!(config.initial.orientation, Orientation::Landscape);
        assert_eq!(config.initial.content_size, ContentSizeCategory::Large);
    }

    #[test]
    fn json_loads() {
        let config = SimulatorConfig::from_json_str(
            r#"{"initial":{"device":"pad-12.9","content_size":"accessibility-large"}}"#,
        )
        .unwrap();
        assert_eq!(config.initial.device, Device::Pad12_9Inch);
        assert_eq!(config.initial.content_size, ContentSizeCategory::AccessibilityLarge);
    }

    #[test]
    fn unknown_device_is_a_parse_error() {
        let err = SimulatorConfig::from_toml_str("[initial]\ndevice = \"phone-6.1\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "{err}");
    }

    #[test]
    fn validate_catches_bad_damping_ratio() {
        for ratio in [0.0, -0.5, 1.5, f64::NAN] {
            let mut config = SimulatorConfig::default();
            config.reveal.damping_ratio = ratio;
            let errors = config.validate();
            assert!(errors.iter().any(|e| e.contains("reveal.damping_ratio")), "{ratio}");
        }
    }

    #[test]
    fn validate_catches_zero_response_and_height() {
        let mut config = SimulatorConfig::default();
        config.reveal.response_ms = 0;
        config.reveal.panel_height = 0.0;
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn invalid_file_reports_every_problem() {
        let err = SimulatorConfig::from_toml_str("[reveal]\nresponse_ms = 0\npanel_height = -1\n")
            .unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[reveal]\ndelay_ms = 10").unwrap();
        let config = SimulatorConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.reveal.delay_ms, 10);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimulatorConfig::from_toml_file("/nonexistent/sizes.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn to_jsonl_produces_valid_json() {
        let line = SimulatorConfig::default().to_jsonl();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["schema"], "sizes-config-v1");
        assert_eq!(value["initial_device"], "default");
        assert_eq!(value["initial_content_size"], "large");
        assert!(!line.contains('\n'));
    }
}
