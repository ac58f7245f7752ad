//! Collected trial/genome statistics, mirroring `ST_STATISTICS` and its
//! nested association structs.

/// A value achieved in a particular trial (`ST_TRIALVALUE`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrialValue {
    pub trial: usize,
    pub value: f64,
}

/// The number of rollbacks executed during a particular trial
/// (`ST_TRIALROLLBACKS`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrialRollbacks {
    pub trial: usize,
    pub rollbacks: usize,
}

/// The genome size achieved in a particular trial (`ST_TRIALSIZE`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrialSize {
    pub trial: usize,
    pub bases: usize,
}

/// Paired attempt/accept counters for one mutation kind (`ST_ATTEMPTS`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Attempts {
    pub considered: usize,
    pub attempted: usize,
    pub accepted: usize,
    pub bases_affected: usize,
}

impl Attempts {
    pub fn record_consideration(&mut self) {
        self.considered += 1;
    }

    pub fn record_attempt(&mut self, bases_affected: usize) {
        self.attempted += 1;
        self.bases_affected += bases_affected;
    }

    pub fn record_acceptance(&mut self) {
        self.accepted += 1;
    }
}

/// All statistics tracked for the current genome and trial history
/// (`ST_STATISTICS`), assuming a single gene per genome as the original
/// does.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statistics {
    pub trial_initial: usize,
    pub trial_current: usize,
    pub trial_attempts: usize,

    pub score: f64,
    pub units: f64,
    pub cost: f64,
    pub fitness: f64,
    pub rollbacks: usize,
    pub bases: usize,

    pub score_max: TrialValue,
    pub score_min: TrialValue,
    pub units_max: TrialValue,
    pub units_min: TrialValue,
    pub cost_max: TrialValue,
    pub cost_min: TrialValue,
    pub fitness_max: TrialValue,
    pub fitness_min: TrialValue,

    pub total_rollbacks: usize,
    pub rollbacks_max: TrialRollbacks,
    pub rollbacks_min: TrialRollbacks,

    pub size_max: TrialSize,
    pub size_min: TrialSize,

    pub bases_changed: usize,
    pub bases_inserted: usize,
    pub bases_deleted: usize,

    pub silent: usize,
    pub attempted: usize,
    pub considered: usize,
    pub accepted: usize,

    pub changed: Attempts,
    pub copied: Attempts,
    pub deleted: Attempts,
    pub inserted: Attempts,
    pub transposed: Attempts,
}

impl Statistics {
    /// Updates the running max/min trackers for score, units, cost, and
    /// fitness after a trial's value has been committed.
    pub fn record_trial_values(&mut self, trial: usize, score: f64, units: f64, cost: f64, fitness: f64) {
        self.trial_current = trial;

        self.score = score;
        self.units = units;
        self.cost = cost;
        self.fitness = fitness;

        update_max(&mut self.score_max, trial, score);
        update_min(&mut self.score_min, trial, score);
        update_max(&mut self.units_max, trial, units);
        update_min(&mut self.units_min, trial, units);
        update_max(&mut self.cost_max, trial, cost);
        update_min(&mut self.cost_min, trial, cost);
        update_max(&mut self.fitness_max, trial, fitness);
        update_min(&mut self.fitness_min, trial, fitness);
    }

    pub fn record_rollback(&mut self, trial: usize, rollbacks_in_trial: usize) {
        self.rollbacks = rollbacks_in_trial;
        self.total_rollbacks += rollbacks_in_trial;

        if rollbacks_in_trial > self.rollbacks_max.rollbacks {
            self.rollbacks_max = TrialRollbacks {
                trial,
                rollbacks: rollbacks_in_trial,
            };
        }
        if self.rollbacks_min.rollbacks == 0 || rollbacks_in_trial < self.rollbacks_min.rollbacks {
            self.rollbacks_min = TrialRollbacks {
                trial,
                rollbacks: rollbacks_in_trial,
            };
        }
    }

    pub fn record_size(&mut self, trial: usize, bases: usize) {
        self.bases = bases;

        if bases > self.size_max.bases {
            self.size_max = TrialSize { trial, bases };
        }
        if self.size_min.bases == 0 || bases < self.size_min.bases {
            self.size_min = TrialSize { trial, bases };
        }
    }
}

fn update_max(slot: &mut TrialValue, trial: usize, value: f64) {
    if value > slot.value {
        *slot = TrialValue { trial, value };
    }
}

fn update_min(slot: &mut TrialValue, trial: usize, value: f64) {
    if slot.value == 0.0 || value < slot.value {
        *slot = TrialValue { trial, value };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trial_values_track_running_extremes() {
        let mut stats = Statistics::default();
        stats.record_trial_values(1, 0.5, 1.0, 2.0, 0.25);
        stats.record_trial_values(2, 0.8, 1.0, 1.5, 0.4);
        stats.record_trial_values(3, 0.3, 1.0, 3.0, 0.1);

        assert_eq!(stats.score_max, TrialValue { trial: 2, value: 0.8 });
        assert_eq!(stats.score_min, TrialValue { trial: 3, value: 0.3 });
        assert_eq!(stats.cost_max, TrialValue { trial: 3, value: 3.0 });
        assert_eq!(stats.cost_min, TrialValue { trial: 2, value: 1.5 });
    }

    #[test]
    fn attempts_counters_accumulate() {
        let mut a = Attempts::default();
        a.record_consideration();
        a.record_attempt(3);
        a.record_acceptance();
        assert_eq!(a.considered, 1);
        assert_eq!(a.attempted, 1);
        assert_eq!(a.accepted, 1);
        assert_eq!(a.bases_affected, 3);
    }
}
