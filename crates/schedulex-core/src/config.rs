use serde::{Deserialize, Serialize};
use std::path::Path;

/// Analyzer configuration loaded from `.schedulex.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Task priority that marks a contractual key date
    /// (1000 is "do not level" in the interchange format).
    pub key_date_priority: i64,

    /// Extended attribute whose value `true` marks a key date.
    pub key_date_attribute: String,

    /// Provenance recorded against delays found in the document.
    pub delay_reason: String,

    pub clauses: ClauseReferences,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            key_date_priority: 1000,
            key_date_attribute: "KeyDate".to_string(),
            delay_reason: "identified from schedule document".to_string(),
            clauses: ClauseReferences::default(),
        }
    }
}

/// Contract clause identifiers quoted in issues. Opaque to the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClauseReferences {
    pub key_dates: String,
    pub delay_notification: String,
    pub completion_impact: String,
}

impl Default for ClauseReferences {
    fn default() -> Self {
        Self {
            key_dates: "31.2".to_string(),
            delay_notification: "61.3".to_string(),
            completion_impact: "62.2".to_string(),
        }
    }
}

/// Load analyzer configuration from a TOML file.
pub fn load_config(path: &Path) -> anyhow::Result<AnalyzerConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
    let config: AnalyzerConfig = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
    Ok(config)
}
