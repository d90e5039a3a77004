//! Configuration types deserialized from `satnet.toml`.

use satnet_common::GateType;
use serde::Deserialize;

/// The top-level configuration parsed from `satnet.toml`.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Netlist loader settings.
    #[serde(default)]
    pub loader: LoaderConfig,
    /// Saturation driver settings.
    #[serde(default)]
    pub saturate: SaturateConfig,
    /// Per-rule enable switches.
    #[serde(default)]
    pub rules: RulesConfig,
}

/// How the loader reacts to records it cannot decode.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    /// Drop malformed records with a warning instead of failing the load.
    #[serde(default)]
    pub ignore_errors: bool,
}

/// Saturation driver settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaturateConfig {
    /// Whether to run each rule once or loop until nothing changes.
    #[serde(default)]
    pub mode: SaturationMode,
    /// Upper bound on full passes in fixpoint mode.
    #[serde(default = "default_max_passes")]
    pub max_passes: u32,
    /// Gate types to symmetrize, in order.
    #[serde(default = "default_commutative")]
    pub commutative: Vec<GateType>,
}

impl Default for SaturateConfig {
    fn default() -> Self {
        Self {
            mode: SaturationMode::default(),
            max_passes: default_max_passes(),
            commutative: default_commutative(),
        }
    }
}

fn default_max_passes() -> u32 {
    16
}

fn default_commutative() -> Vec<GateType> {
    vec![GateType::And, GateType::Or]
}

/// Scheduling discipline for the rewrite rules.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SaturationMode {
    /// Group flip-flops, symmetrize, then synthesize demuxes, each exactly once.
    SinglePass,
    /// Repeat the single-pass sequence until a pass changes nothing (default).
    #[default]
    Fixpoint,
}

/// Per-rule enable switches. Commutative saturation is controlled by
/// [`SaturateConfig::commutative`] (an empty list disables it).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Merge flip-flops sharing clock and enable into one wide flip-flop.
    #[serde(default = "enabled")]
    pub group_flip_flops: bool,
    /// Recognize `{a & !s, a & s}` pairs as 1-to-2 demultiplexers.
    #[serde(default = "enabled")]
    pub synthesize_demuxes: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            group_flip_flops: true,
            synthesize_demuxes: true,
        }
    }
}

fn enabled() -> bool {
    true
}
