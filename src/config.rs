use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Medichat";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment override for the reference data directory.
pub const DATA_DIR_ENV: &str = "MEDICHAT_DATA_DIR";

pub const TRAINING_FILE: &str = "Training.csv";
pub const TESTING_FILE: &str = "Testing.csv";
pub const SEVERITY_FILE: &str = "Symptom_severity.csv";
pub const DESCRIPTION_FILE: &str = "symptom_Description.csv";
pub const PRECAUTION_FILE: &str = "symptom_precaution.csv";

/// Score above which the severity verdict escalates to a doctor visit.
pub const DEFAULT_SEVERITY_THRESHOLD: f64 = 13.0;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "medichat=info"
}

/// Get the application data directory (~/Medichat/)
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Reference data directory: `$MEDICHAT_DATA_DIR`, else ~/Medichat/data.
pub fn data_dir() -> PathBuf {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => app_data_dir().join("data"),
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config read failed ({0}): {1}")]
    Read(String, String),

    #[error("Config parse failed ({0}): {1}")]
    Parse(String, String),
}

/// Seeded train/hold-out split for one tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Fraction of cases held out for evaluation, in `[0, 1)`.
    pub test_fraction: f64,
    pub seed: u64,
}

/// Tunables for building and running the triage engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    pub severity_threshold: f64,
    /// Split for the primary (per-symptom) decision tree.
    pub primary_split: SplitConfig,
    /// Split for the secondary classifier; differs so the two trees are
    /// trained on different case subsets.
    pub secondary_split: SplitConfig,
    /// `None` grows trees until leaves are pure.
    pub max_depth: Option<usize>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            severity_threshold: DEFAULT_SEVERITY_THRESHOLD,
            primary_split: SplitConfig {
                test_fraction: 0.33,
                seed: 42,
            },
            secondary_split: SplitConfig {
                test_fraction: 0.3,
                seed: 20,
            },
            max_depth: None,
        }
    }
}

impl TriageConfig {
    /// Load from a JSON file; missing fields fall back to defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e.to_string()))?;
        serde_json::from_str(&raw)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))
    }

    /// Train both trees on every case (no hold-out).
    pub fn without_holdout() -> Self {
        let mut config = Self::default();
        config.primary_split.test_fraction = 0.0;
        config.secondary_split.test_fraction = 0.0;
        config
    }
}
