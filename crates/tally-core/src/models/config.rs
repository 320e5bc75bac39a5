//! Configuration structures for transcript parsing and intake.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Main configuration for tally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// Parser configuration.
    pub parser: ParserConfig,

    /// Intake gate configuration.
    pub intake: IntakeConfig,
}

/// Voice invoice parser configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Date that "today" resolves to. `None` uses the local calendar date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
}

/// Intake gate configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Minimum confidence to accept a parse (0.0 - 1.0).
    pub min_confidence: f32,

    /// Substrings that mark a speech-engine error message instead of a transcript.
    pub failure_markers: Vec<String>,

    /// Customer names matched exactly against parsed names.
    pub known_customers: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            failure_markers: ["错误", "失败", "无法", "未检测到", "转录失败"]
                .into_iter()
                .map(String::from)
                .collect(),
            known_customers: Vec::new(),
        }
    }
}

impl TallyConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: TallyConfig =
            serde_json::from_str(r#"{"intake": {"min_confidence": 0.7}}"#).unwrap();

        assert_eq!(config.intake.min_confidence, 0.7);
        assert_eq!(config.intake.failure_markers.len(), 5);
        assert_eq!(config.parser.reference_date, None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = TallyConfig::default();
        config.parser.reference_date = NaiveDate::from_ymd_opt(2024, 5, 20);
        config.intake.known_customers = vec!["中心小学".to_string()];
        config.save(&path).unwrap();

        assert_eq!(TallyConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = TallyConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
