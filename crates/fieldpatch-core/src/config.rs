use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid patch config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// DuplicatePolicy
///
/// What happens when a patch records the same field twice.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Second record fails with `PatchError::DuplicateField`.
    #[default]
    Reject,
    /// Second record replaces the first.
    LastWriteWins,
}

///
/// ApplyMode
///
/// Failure semantics of `Patch::apply`.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyMode {
    /// Write field by field; a failure leaves earlier writes in place.
    #[default]
    Partial,
    /// Coerce every field first and only write when all succeed.
    Atomic,
}

///
/// PatchConfig
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchConfig {
    pub duplicates: DuplicatePolicy,
    pub apply_mode: ApplyMode,
}

impl PatchConfig {
    #[must_use]
    pub const fn new(duplicates: DuplicatePolicy, apply_mode: ApplyMode) -> Self {
        Self {
            duplicates,
            apply_mode,
        }
    }

    #[must_use]
    pub const fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    #[must_use]
    pub const fn with_apply_mode(mut self, apply_mode: ApplyMode) -> Self {
        self.apply_mode = apply_mode;
        self
    }

    /// Parse a config table, e.g. the `[patch]` section of an app config.
    ///
    /// Missing keys fall back to their defaults; unknown keys are rejected.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }
}

///
/// TESTS
///
