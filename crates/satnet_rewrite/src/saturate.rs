//! The saturation driver.
//!
//! Runs the enabled rules in a fixed order (flip-flop grouping, commutative
//! saturation for each configured gate type, demux synthesis). In
//! [`SaturationMode::SinglePass`] the sequence runs once; in
//! [`SaturationMode::Fixpoint`] it repeats until a full pass changes nothing
//! or the pass limit is reached.

use satnet_config::{ConfigError, ProjectConfig, SaturationMode};
use satnet_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use satnet_ir::{IdAllocator, Store, StoreCounts};

use crate::commutative::CommutativeRule;
use crate::demux::SynthesizeDemuxes;
use crate::dff_group::GroupFlipFlops;
use crate::rule::RewriteRule;

/// Per-rule counters from one saturation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleStats {
    /// The rule's name.
    pub name: String,
    /// Number of invocations that changed the store.
    pub fired: u32,
    /// Number of times the rule ran.
    pub invocations: u32,
}

/// The outcome of [`Saturator::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaturationReport {
    /// Full passes executed.
    pub passes: u32,
    /// Counters for each rule, in execution order.
    pub rule_stats: Vec<RuleStats>,
    /// Whether the last pass changed nothing.
    pub reached_fixpoint: bool,
    /// Row counts before the first pass.
    pub counts_before: StoreCounts,
    /// Row counts after the last pass.
    pub counts_after: StoreCounts,
}

impl SaturationReport {
    /// Returns `true` if any rule changed the store.
    pub fn changed(&self) -> bool {
        self.rule_stats.iter().any(|s| s.fired > 0)
    }
}

/// Runs a sequence of rewrite rules over a store.
pub struct Saturator {
    mode: SaturationMode,
    max_passes: u32,
    rules: Vec<Box<dyn RewriteRule>>,
}

impl Saturator {
    /// Creates a driver for an explicit rule sequence.
    pub fn new(mode: SaturationMode, max_passes: u32, rules: Vec<Box<dyn RewriteRule>>) -> Self {
        Self {
            mode,
            max_passes: max_passes.max(1),
            rules,
        }
    }

    /// Builds the standard rule sequence selected by the configuration.
    pub fn from_config(config: &ProjectConfig) -> Result<Self, ConfigError> {
        let mut rules: Vec<Box<dyn RewriteRule>> = Vec::new();
        if config.rules.group_flip_flops {
            rules.push(Box::new(GroupFlipFlops));
        }
        let mut seen = Vec::new();
        for &ty in &config.saturate.commutative {
            if seen.contains(&ty) {
                continue;
            }
            seen.push(ty);
            let rule = CommutativeRule::new(ty).ok_or_else(|| {
                ConfigError::ValidationError(format!("{ty} is not a commutative gate type"))
            })?;
            rules.push(Box::new(rule));
        }
        if config.rules.synthesize_demuxes {
            rules.push(Box::new(SynthesizeDemuxes));
        }
        Ok(Self::new(
            config.saturate.mode,
            config.saturate.max_passes,
            rules,
        ))
    }

    /// Names of the rules in execution order.
    pub fn rule_names(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Runs the rules and reports what happened.
    ///
    /// Emits warning `W301` if fixpoint mode stops at the pass limit while
    /// the last pass still changed the store.
    pub fn run(
        &self,
        store: &mut Store,
        ids: &mut IdAllocator,
        sink: &DiagnosticSink,
    ) -> SaturationReport {
        let counts_before = store.counts();
        let mut rule_stats: Vec<RuleStats> = self
            .rules
            .iter()
            .map(|rule| RuleStats {
                name: rule.name(),
                fired: 0,
                invocations: 0,
            })
            .collect();

        let limit = match self.mode {
            SaturationMode::SinglePass => 1,
            SaturationMode::Fixpoint => self.max_passes,
        };

        let mut passes = 0;
        let mut reached_fixpoint = false;
        while passes < limit {
            passes += 1;
            let mut changed = false;
            for (rule, stats) in self.rules.iter().zip(rule_stats.iter_mut()) {
                stats.invocations += 1;
                if rule.run(store, ids, sink) {
                    stats.fired += 1;
                    changed = true;
                }
            }
            if !changed {
                reached_fixpoint = true;
                break;
            }
        }

        if self.mode == SaturationMode::Fixpoint && !reached_fixpoint {
            sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::NOT_CONVERGED,
                    format!("saturation did not reach a fixpoint within {limit} passes"),
                )
                .with_help("raise `saturate.max_passes` in satnet.toml or pass --max-passes"),
            );
        }

        SaturationReport {
            passes,
            rule_stats,
            reached_fixpoint,
            counts_before,
            counts_after: store.counts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satnet_common::{GateType, NodeId, UnaryType};
    use satnet_ir::{validate, BinaryGate, FlipFlop, UnaryGate, Wire};
    use std::cell::Cell;

    fn n(raw: u64) -> NodeId {
        NodeId::from_raw(raw)
    }

    fn and(a: u64, b: u64, y: u64) -> BinaryGate {
        BinaryGate {
            a: n(a),
            b: n(b),
            y: n(y),
            ty: GateType::And,
        }
    }

    /// The demux pattern from the rule tests plus two flip-flops on clock 1, enable 2.
    fn mixed_store() -> Store {
        let mut store = Store::new();
        for id in 1..=9 {
            store.insert_wire(Wire { id: n(id), width: 1 });
        }
        store.insert_unary_gate(UnaryGate {
            a: n(4),
            y: n(2),
            ty: UnaryType::Not,
        });
        store.insert_binary_gate(and(1, 2, 3));
        store.insert_binary_gate(and(1, 4, 5));
        store.insert_flip_flop(FlipFlop {
            d: n(6),
            c: n(1),
            e: n(2),
            q: n(7),
        });
        store.insert_flip_flop(FlipFlop {
            d: n(8),
            c: n(1),
            e: n(2),
            q: n(9),
        });
        store
    }

    /// Changes the store on its first `remaining` runs, then stops.
    struct Countdown {
        remaining: Cell<u32>,
    }

    impl RewriteRule for Countdown {
        fn name(&self) -> String {
            "countdown".to_string()
        }

        fn run(&self, _store: &mut Store, _ids: &mut IdAllocator, _sink: &DiagnosticSink) -> bool {
            let left = self.remaining.get();
            if left == 0 {
                return false;
            }
            self.remaining.set(left - 1);
            true
        }
    }

    #[test]
    fn default_config_rule_order() {
        let saturator = Saturator::from_config(&ProjectConfig::default()).unwrap();
        assert_eq!(
            saturator.rule_names(),
            vec![
                "group-flip-flops",
                "commutative $_AND_",
                "commutative $_OR_",
                "synthesize-demuxes"
            ]
        );
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let mut config = ProjectConfig::default();
        config.rules.group_flip_flops = false;
        config.rules.synthesize_demuxes = false;
        config.saturate.commutative = vec![GateType::Xor, GateType::Xor];
        let saturator = Saturator::from_config(&config).unwrap();
        assert_eq!(saturator.rule_names(), vec!["commutative $_XOR_"]);
    }

    #[test]
    fn non_commutative_tag_rejected() {
        let mut config = ProjectConfig::default();
        config.saturate.commutative = vec![GateType::OrNot];
        assert!(Saturator::from_config(&config).is_err());
    }

    #[test]
    fn fixpoint_run_is_idempotent() {
        let mut store = mixed_store();
        let mut ids = IdAllocator::seeded_from(&store);
        let sink = DiagnosticSink::new();
        let saturator = Saturator::from_config(&ProjectConfig::default()).unwrap();

        let report = saturator.run(&mut store, &mut ids, &sink);
        assert!(report.reached_fixpoint);
        assert!(report.changed());
        assert!(report.passes >= 2);
        assert_eq!(report.counts_after, store.counts());
        assert!(validate(&store).is_empty());

        let fingerprint = store.fingerprint();
        let again = saturator.run(&mut store, &mut ids, &sink);
        assert_eq!(again.passes, 1);
        assert!(!again.changed());
        assert_eq!(store.fingerprint(), fingerprint);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn single_pass_runs_each_rule_once() {
        let mut store = mixed_store();
        let mut ids = IdAllocator::seeded_from(&store);
        let mut config = ProjectConfig::default();
        config.saturate.mode = SaturationMode::SinglePass;
        let saturator = Saturator::from_config(&config).unwrap();

        let report = saturator.run(&mut store, &mut ids, &DiagnosticSink::new());
        assert_eq!(report.passes, 1);
        assert!(report.rule_stats.iter().all(|s| s.invocations == 1));
        assert_eq!(store.counts().flip_flops, 1);
        assert!(store.binary_gate(n(1), n(4), GateType::Demux).is_some());
        assert!(store.binary_gate(n(2), n(1), GateType::And).is_some());
    }

    #[test]
    fn pass_limit_emits_warning() {
        let saturator = Saturator::new(
            SaturationMode::Fixpoint,
            3,
            vec![Box::new(Countdown {
                remaining: Cell::new(10),
            })],
        );
        let mut store = Store::new();
        let mut ids = IdAllocator::seeded_from(&store);
        let sink = DiagnosticSink::new();

        let report = saturator.run(&mut store, &mut ids, &sink);
        assert_eq!(report.passes, 3);
        assert!(!report.reached_fixpoint);
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::NOT_CONVERGED);
    }

    #[test]
    fn converges_one_pass_after_last_change() {
        let saturator = Saturator::new(
            SaturationMode::Fixpoint,
            10,
            vec![Box::new(Countdown {
                remaining: Cell::new(2),
            })],
        );
        let mut store = Store::new();
        let mut ids = IdAllocator::seeded_from(&store);
        let report = saturator.run(&mut store, &mut ids, &DiagnosticSink::new());
        assert_eq!(report.passes, 3);
        assert!(report.reached_fixpoint);
        assert_eq!(report.rule_stats[0].fired, 2);
        assert_eq!(report.rule_stats[0].invocations, 3);
    }

    #[test]
    fn single_pass_never_warns() {
        let saturator = Saturator::new(
            SaturationMode::SinglePass,
            1,
            vec![Box::new(Countdown {
                remaining: Cell::new(5),
            })],
        );
        let mut store = Store::new();
        let mut ids = IdAllocator::seeded_from(&store);
        let sink = DiagnosticSink::new();
        let report = saturator.run(&mut store, &mut ids, &sink);
        assert!(!report.reached_fixpoint);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn empty_rule_set_is_trivially_fixed() {
        let saturator = Saturator::new(SaturationMode::Fixpoint, 4, Vec::new());
        let mut store = Store::new();
        let mut ids = IdAllocator::seeded_from(&store);
        let report = saturator.run(&mut store, &mut ids, &DiagnosticSink::new());
        assert_eq!(report.passes, 1);
        assert!(report.reached_fixpoint);
    }
}
