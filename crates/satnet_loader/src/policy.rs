//! What to do with records that fail to decode.

use satnet_config::LoaderConfig;

/// How the loader treats a malformed record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Stop at the first malformed record.
    #[default]
    FailFast,
    /// Drop malformed records with a warning and keep going.
    IgnoreMalformed,
}

impl LoadPolicy {
    /// Picks the policy selected by `[loader] ignore_errors`.
    pub fn from_config(config: &LoaderConfig) -> Self {
        if config.ignore_errors {
            LoadPolicy::IgnoreMalformed
        } else {
            LoadPolicy::FailFast
        }
    }
}

/// Record counts from one load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Records that became new rows.
    pub inserted: usize,
    /// Records dropped because a row with the same key already existed.
    pub duplicates: usize,
    /// Records dropped because they could not be decoded.
    pub malformed: usize,
}
