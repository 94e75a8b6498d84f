//! TOML configuration for imports.
//!
//! ```toml
//! [detection]
//! scan_rows = 10
//! min_matches = 2
//!
//! [limits]
//! max_file_size = 52428800
//!
//! [[synonyms]]
//! label = "工事項目"
//! field = "name"
//! ```
//!
//! Every section is optional.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use boq_ingest::MAX_FILE_SIZE;
use boq_map::DetectOptions;
use boq_model::FieldKey;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    pub detection: DetectOptions,
    pub limits: LimitsConfig,
    /// Extra header labels, consulted before the built-in ones.
    pub synonyms: Vec<SynonymEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Largest accepted file, in bytes.
    pub max_file_size: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynonymEntry {
    pub label: String,
    pub field: FieldKey,
}

impl ImportConfig {
    /// Reads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), synonyms = config.synonyms.len(), "loaded config");
        Ok(config)
    }

    /// Rejects settings that would make detection or reading meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| {
            Err(ConfigError::Invalid {
                message: message.to_string(),
            })
        };
        if self.detection.scan_rows == 0 {
            return invalid("detection.scan_rows must be at least 1");
        }
        if self.detection.min_matches == 0 {
            return invalid("detection.min_matches must be at least 1");
        }
        if self.limits.max_file_size == 0 {
            return invalid("limits.max_file_size must be greater than 0");
        }
        if let Some(entry) = self.synonyms.iter().find(|entry| entry.label.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                message: format!("synonym for {} has an empty label", entry.field),
            });
        }
        Ok(())
    }
}
