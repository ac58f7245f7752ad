//! Trial conditions: the per-channel (cost/fitness/score) rules a plan step
//! uses to turn a raw measured value into a trial value, and to decide
//! whether a candidate trial value is an improvement worth keeping.
//!
//! §9 flags the exact `TrialValue` factor-combination formula as something
//! the original only specifies through its regression plans, not through
//! text; lacking those fixtures, this crate commits to the
//! likelihood-weighted running average documented in `DESIGN.md` and in the
//! doc comments below, rather than guess at undocumented behavior.

use crate::geometry::ApproxEq;

/// Whether a channel's trial value should trend up, down, or hold steady
/// across accepted trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionMode {
    Decrease,
    Increase,
    Maintain,
}

/// One `<value likelihood="" value="" factor=""/>` bucket: `likelihood`
/// weights this bucket's contribution to the blended trial value;
/// `factor` controls how much of the raw input (vs. the running previous
/// value) this bucket blends in; `value` is this bucket's target/reference
/// point, used only to pick the nearest bucket when more than one is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueBucket {
    pub likelihood: f64,
    pub value: f64,
    pub factor: f64,
}

/// A single channel's trial condition: a mode plus its value buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialCondition {
    pub mode: ConditionMode,
    pub buckets: Vec<ValueBucket>,
}

impl TrialCondition {
    pub fn new(mode: ConditionMode, buckets: Vec<ValueBucket>) -> Self {
        Self { mode, buckets }
    }

    /// Blends `input` (the value just measured) against `previous` (the
    /// value carried from the last accepted trial) into the new trial
    /// value: each bucket proposes `previous + (input - previous) * factor`
    /// (`factor = 1` takes the input outright, `factor = 0` holds steady),
    /// then buckets are combined by their relative likelihood.
    pub fn trial_value(&self, input: f64, previous: f64) -> f64 {
        if self.buckets.is_empty() {
            return input;
        }
        let total_likelihood: f64 = self.buckets.iter().map(|b| b.likelihood).sum();
        if total_likelihood.approx_zero() {
            return input;
        }
        self.buckets
            .iter()
            .map(|b| b.likelihood * (previous + (input - previous) * b.factor))
            .sum::<f64>()
            / total_likelihood
    }

    /// Does `candidate` satisfy this condition relative to `previous`,
    /// given its mode? `Maintain` tolerates the approximate-equality
    /// epsilon used throughout measurement/scoring.
    pub fn passes(&self, previous: f64, candidate: f64) -> bool {
        match self.mode {
            ConditionMode::Increase => candidate >= previous,
            ConditionMode::Decrease => candidate <= previous,
            ConditionMode::Maintain => candidate.approx_eq(previous),
        }
    }

    /// Is `a` a strictly better trial value than `b` under this condition's
    /// mode (used to rank considerations against one another)?
    pub fn better(&self, a: f64, b: f64) -> bool {
        match self.mode {
            ConditionMode::Increase => a > b,
            ConditionMode::Decrease => a < b,
            ConditionMode::Maintain => (a - 0.0).abs() < (b - 0.0).abs(),
        }
    }
}

/// `DurationTerminationCondition`: stop after a maximum trial and/or
/// attempt count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationTermination {
    pub max_trials: Option<usize>,
    pub max_attempts: Option<usize>,
}

impl DurationTermination {
    pub fn fires(&self, trial: usize, attempts: usize) -> bool {
        self.max_trials.map(|max| trial >= max).unwrap_or(false)
            || self.max_attempts.map(|max| attempts >= max).unwrap_or(false)
    }
}

/// `RollbackTerminationCondition`: stop if a single trial rolls back more
/// than the configured limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RollbackTermination {
    pub max_rollbacks_per_trial: Option<usize>,
}

impl RollbackTermination {
    pub fn fires(&self, rollbacks_this_trial: usize) -> bool {
        self.max_rollbacks_per_trial
            .map(|max| rollbacks_this_trial > max)
            .unwrap_or(false)
    }
}

/// `FitnessTerminationCondition`: stop once fitness crosses a configured
/// floor or ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitnessTermination {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl FitnessTermination {
    pub fn fires(&self, fitness: f64) -> bool {
        self.minimum.map(|min| fitness <= min).unwrap_or(false)
            || self.maximum.map(|max| fitness >= max).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increase_mode_passes_when_not_smaller() {
        let cond = TrialCondition::new(ConditionMode::Increase, vec![]);
        assert!(cond.passes(1.0, 1.5));
        assert!(!cond.passes(1.5, 1.0));
    }

    #[test]
    fn decrease_mode_passes_when_not_larger() {
        let cond = TrialCondition::new(ConditionMode::Decrease, vec![]);
        assert!(cond.passes(1.5, 1.0));
        assert!(!cond.passes(1.0, 1.5));
    }

    #[test]
    fn maintain_mode_tolerates_only_near_equality() {
        let cond = TrialCondition::new(ConditionMode::Maintain, vec![]);
        assert!(cond.passes(1.0, 1.0));
        assert!(!cond.passes(1.0, 1.5));
    }

    #[test]
    fn empty_buckets_pass_input_through_unchanged() {
        let cond = TrialCondition::new(ConditionMode::Increase, vec![]);
        assert_eq!(cond.trial_value(0.8, 0.5), 0.8);
    }

    #[test]
    fn single_full_factor_bucket_takes_input_outright() {
        let cond = TrialCondition::new(
            ConditionMode::Increase,
            vec![ValueBucket {
                likelihood: 1.0,
                value: 0.0,
                factor: 1.0,
            }],
        );
        assert!((cond.trial_value(0.9, 0.1) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn zero_factor_bucket_holds_previous_value() {
        let cond = TrialCondition::new(
            ConditionMode::Increase,
            vec![ValueBucket {
                likelihood: 1.0,
                value: 0.0,
                factor: 0.0,
            }],
        );
        assert!((cond.trial_value(0.9, 0.1) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn duration_termination_fires_on_either_limit() {
        let term = DurationTermination {
            max_trials: Some(10),
            max_attempts: None,
        };
        assert!(!term.fires(9, 100));
        assert!(term.fires(10, 100));
    }

    #[test]
    fn fitness_termination_fires_on_floor_or_ceiling() {
        let term = FitnessTermination {
            minimum: Some(0.1),
            maximum: Some(0.9),
        };
        assert!(term.fires(0.05));
        assert!(term.fires(0.95));
        assert!(!term.fires(0.5));
    }
}
