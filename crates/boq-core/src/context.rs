//! Settings shared by every import.

use boq_ingest::ReadOptions;
use boq_map::{DetectOptions, HeaderSynonymDictionary};

use crate::config::ImportConfig;

/// Dictionary, detection tuning and read limits for a run of imports.
///
/// Passed explicitly to [`ImportSession::open`](crate::ImportSession::open);
/// nothing is read from global state.
#[derive(Debug, Clone, Default)]
pub struct ImportContext {
    dictionary: HeaderSynonymDictionary,
    detect_options: DetectOptions,
    read_options: ReadOptions,
}

impl ImportContext {
    /// Built-in synonyms and default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        Self::new().with_config(config)
    }

    /// Applies a config on top of the current settings. Configured synonyms
    /// take precedence over those already present.
    #[must_use]
    pub fn with_config(self, config: &ImportConfig) -> Self {
        let synonyms = config
            .synonyms
            .iter()
            .map(|entry| (entry.label.clone(), entry.field));
        Self {
            dictionary: self.dictionary.with_priority_entries(synonyms),
            detect_options: config.detection,
            read_options: ReadOptions {
                max_file_size: config.limits.max_file_size,
            },
        }
    }

    #[must_use]
    pub fn with_dictionary(mut self, dictionary: HeaderSynonymDictionary) -> Self {
        self.dictionary = dictionary;
        self
    }

    #[must_use]
    pub fn with_detect_options(mut self, options: DetectOptions) -> Self {
        self.detect_options = options;
        self
    }

    #[must_use]
    pub fn with_read_options(mut self, options: ReadOptions) -> Self {
        self.read_options = options;
        self
    }

    pub fn dictionary(&self) -> &HeaderSynonymDictionary {
        &self.dictionary
    }

    pub fn detect_options(&self) -> &DetectOptions {
        &self.detect_options
    }

    pub fn read_options(&self) -> &ReadOptions {
        &self.read_options
    }
}
