//! Agronomic indicator models

use serde::{Deserialize, Serialize};

/// Indicator severity, lowest to highest
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Alert,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Alert => "alert",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discrete agronomic signal derived from the weather summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgronomicIndicator {
    /// Stable identifier, e.g. `low_rainfall`
    pub indicator: String,
    pub severity: Severity,
    pub message: String,
}

impl AgronomicIndicator {
    pub fn new(indicator: &str, severity: Severity, message: &str) -> Self {
        Self {
            indicator: indicator.to_string(),
            severity,
            message: message.to_string(),
        }
    }
}
