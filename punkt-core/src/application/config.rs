//! Trainer configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration constants
pub mod defaults {
    /// Minimum abbreviation score for a type to become an abbreviation
    pub const ABBREV_CUTOFF: f64 = 0.3;

    /// Frequency below which a type is a rare-abbreviation candidate
    pub const ABBREV_BACKOFF: usize = 5;

    /// Minimum log-likelihood for a collocation
    pub const COLLOCATION_CUTOFF: f64 = 7.88;

    /// Minimum log-likelihood for a frequent sentence starter
    pub const SENTENCE_STARTER_CUTOFF: f64 = 30.0;

    /// Pair counts must exceed this to be considered as collocations
    pub const MIN_COLLOCATION_FREQUENCY: usize = 1;
}

/// Cut-offs and switches of the trainer
///
/// Missing keys in a TOML document fall back to the defaults:
///
/// ```toml
/// abbrev_cutoff = 0.3
/// collocation_cutoff = 7.88
/// include_all_collocations = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainerConfig {
    pub abbrev_cutoff: f64,
    /// Drop the length penalty from the abbreviation score
    pub ignore_abbrev_penalty: bool,
    pub abbrev_backoff: usize,
    pub collocation_cutoff: f64,
    pub sentence_starter_cutoff: f64,
    /// Count every adjacent pair as a collocation candidate
    pub include_all_collocations: bool,
    /// Count pairs whose first token is an abbreviation
    pub include_abbrev_collocations: bool,
    pub min_collocation_frequency: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            abbrev_cutoff: defaults::ABBREV_CUTOFF,
            ignore_abbrev_penalty: false,
            abbrev_backoff: defaults::ABBREV_BACKOFF,
            collocation_cutoff: defaults::COLLOCATION_CUTOFF,
            sentence_starter_cutoff: defaults::SENTENCE_STARTER_CUTOFF,
            include_all_collocations: true,
            include_abbrev_collocations: false,
            min_collocation_frequency: defaults::MIN_COLLOCATION_FREQUENCY,
        }
    }
}

impl TrainerConfig {
    /// Create a configuration builder
    pub fn builder() -> TrainerConfigBuilder {
        TrainerConfigBuilder::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TrainerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        log::debug!("Loaded trainer configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let cutoffs = [
            ("abbrev_cutoff", self.abbrev_cutoff),
            ("collocation_cutoff", self.collocation_cutoff),
            ("sentence_starter_cutoff", self.sentence_starter_cutoff),
        ];

        for (name, value) in cutoffs {
            if !value.is_finite() {
                return Err(Error::Configuration(format!("{name} must be finite")));
            }
            if value < 0.0 {
                return Err(Error::Configuration(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// Fluent builder for trainer configuration
#[derive(Debug, Default)]
pub struct TrainerConfigBuilder {
    config: TrainerConfig,
}

impl TrainerConfigBuilder {
    /// Create a new builder starting from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abbrev_cutoff(mut self, cutoff: f64) -> Self {
        self.config.abbrev_cutoff = cutoff;
        self
    }

    pub fn ignore_abbrev_penalty(mut self, ignore: bool) -> Self {
        self.config.ignore_abbrev_penalty = ignore;
        self
    }

    pub fn abbrev_backoff(mut self, backoff: usize) -> Self {
        self.config.abbrev_backoff = backoff;
        self
    }

    pub fn collocation_cutoff(mut self, cutoff: f64) -> Self {
        self.config.collocation_cutoff = cutoff;
        self
    }

    pub fn sentence_starter_cutoff(mut self, cutoff: f64) -> Self {
        self.config.sentence_starter_cutoff = cutoff;
        self
    }

    pub fn include_all_collocations(mut self, include: bool) -> Self {
        self.config.include_all_collocations = include;
        self
    }

    pub fn include_abbrev_collocations(mut self, include: bool) -> Self {
        self.config.include_abbrev_collocations = include;
        self
    }

    pub fn min_collocation_frequency(mut self, frequency: usize) -> Self {
        self.config.min_collocation_frequency = frequency;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<TrainerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
