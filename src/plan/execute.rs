//! The plan-driven trial loop: produce mutations, evaluate each as a
//! consideration, select and commit the best, advance the trial, and check
//! termination conditions.

use crate::err::Result;
use crate::genome::modification::RollbackType;
use crate::genome::{Genome, GenomeReason, GenomeTermination};
use crate::han::HanTable;
use crate::random::IRandom;

use super::condition::{ConditionMode, DurationTermination, FitnessTermination, RollbackTermination, TrialCondition};
use super::mutation::{concretize, enumerate_exhaustive, ConcreteMutation, GeneWindow, IndexRange, MutationTemplate};
use crate::genome::score::ScoringGlobals;

/// `<options>`: plan-wide behavioral switches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanOptions {
    pub accumulate_mutations: bool,
    pub preserve_genes: bool,
    pub ensure_in_frame: bool,
    pub ensure_whole_codons: bool,
    pub reject_silent: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            accumulate_mutations: false,
            preserve_genes: true,
            ensure_in_frame: false,
            ensure_whole_codons: false,
            reject_silent: false,
        }
    }
}

/// Plan-level termination conditions (§4.10 step 5).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TerminationConditions {
    pub duration: DurationTermination,
    pub rollback: RollbackTermination,
    pub fitness: FitnessTermination,
}

/// The three optional value channels a `<trialConditions>` block may
/// configure, plus the mutation-count/exhaustiveness knob that only applies
/// at step level.
#[derive(Debug, Clone, Default)]
pub struct TrialConditions {
    pub cost: Option<TrialCondition>,
    pub fitness: Option<TrialCondition>,
    pub score: Option<TrialCondition>,
    pub mutations_per_attempt: Vec<usize>,
    pub exhaustive: bool,
}

impl TrialConditions {
    fn any_value_condition_configured(&self) -> bool {
        self.cost.is_some() || self.fitness.is_some() || self.score.is_some()
    }
}

/// A step's mutation-target window, resolved against the genome/gene
/// currently being driven. Percentage and Han-stroke-range forms are
/// resolved to absolute base offsets by the caller (`resolve_index_range`)
/// before a step runs its trials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndexRangeKind {
    Absolute { first: usize, last: usize },
    Percentage { first: f64, last: f64 },
    GeneRange { first: usize, last: usize },
    HanStrokeRange { first: usize, last: usize },
}

/// One candidate mutation template plus its selection likelihood within
/// the step.
#[derive(Debug, Clone)]
pub struct StepMutation {
    pub likelihood: f64,
    pub template: MutationTemplate,
}

/// A plan step: drives `trials` consecutive trials with a shared mutation
/// distribution, target window, and trial conditions.
#[derive(Debug, Clone)]
pub struct Step {
    pub trials: usize,
    pub delta_index: isize,
    pub index_range: IndexRangeKind,
    pub trial_conditions: TrialConditions,
    pub mutations: Vec<StepMutation>,
}

/// The full plan: options, termination conditions, a plan-wide default
/// trial-conditions block, and the ordered steps.
#[derive(Debug, Clone)]
pub struct Plan {
    pub options: PlanOptions,
    pub termination: TerminationConditions,
    pub trial_conditions: TrialConditions,
    pub steps: Vec<Step>,
}

/// Resolves a step's `index_range` against the gene currently being driven,
/// into an absolute base-offset `IndexRange`. `GeneRange` and
/// `HanStrokeRange` are approximated as the gene's whole base window and
/// its strokes' acid span respectively, since this engine drives one gene
/// at a time (§5: single-genome, single-threaded by design) rather than
/// selecting among several.
fn resolve_index_range(kind: IndexRangeKind, gene: &crate::genome::compile::Gene, bases_len: usize) -> IndexRange {
    match kind {
        IndexRangeKind::Absolute { first, last } => IndexRange {
            first: first.min(bases_len.saturating_sub(1)),
            last: last.min(bases_len.saturating_sub(1)),
        },
        IndexRangeKind::Percentage { first, last } => {
            let lo = ((first.clamp(0.0, 1.0)) * bases_len as f64) as usize;
            let hi = ((last.clamp(0.0, 1.0)) * bases_len as f64) as usize;
            IndexRange {
                first: lo.min(bases_len.saturating_sub(1)),
                last: hi.min(bases_len.saturating_sub(1)).max(lo.min(bases_len.saturating_sub(1))),
            }
        }
        IndexRangeKind::GeneRange { .. } => IndexRange {
            first: gene.base_first,
            last: gene.base_last,
        },
        IndexRangeKind::HanStrokeRange { first, last } => {
            let strokes: Vec<_> = gene
                .strokes
                .iter()
                .filter(|s| s.han_stroke.map(|h| h >= first && h <= last).unwrap_or(false))
                .collect();
            if strokes.is_empty() {
                IndexRange {
                    first: gene.base_first,
                    last: gene.base_last,
                }
            } else {
                let acid_first = strokes.iter().map(|s| s.acids.start()).min().unwrap();
                let acid_last = strokes.iter().map(|s| s.acids.end()).max().unwrap();
                // Each acid spans one codon starting at the gene's first
                // in-frame base (the codon immediately after START).
                IndexRange {
                    first: gene.base_first + 3 + acid_first * 3,
                    last: (gene.base_first + 3 + acid_last * 3).min(gene.base_last),
                }
            }
        }
    }
}

/// Does `mutation` respect the plan's `ensureInFrame`/`ensureWholeCodons`
/// options (§8 Laws: "Frame preservation under `ensureInFrame`: all
/// mutation offsets satisfy `offset % 3 == 0`"; "Whole-codon preservation
/// under `ensureWholeCodons`: all length changes satisfy `length % 3 ==
/// 0`")? Checked before an attempt is applied so a violating attempt is
/// rejected outright rather than committed and later found to break frame.
fn respects_index_options(mutation: &ConcreteMutation, options: &PlanOptions) -> bool {
    // `Change` substitutes bases in place (no length delta); only the
    // length-changing kinds are subject to the whole-codon law.
    let (offsets, length): (Vec<usize>, usize) = match mutation {
        ConcreteMutation::Change { target, .. } => (vec![*target], 0),
        ConcreteMutation::Insert { target, bases, .. } => (vec![*target], bases.len()),
        ConcreteMutation::Delete { target, length, .. } => (vec![*target], *length),
        ConcreteMutation::Copy { source, target, length, .. } => (vec![*source, *target], *length),
        ConcreteMutation::Transpose { source, target, length, .. } => (vec![*source, *target], *length),
    };
    if options.ensure_in_frame && offsets.iter().any(|o| o % 3 != 0) {
        return false;
    }
    if options.ensure_whole_codons && length % 3 != 0 {
        return false;
    }
    true
}

/// Applies one concrete mutation to `genome`, returning whether it was a
/// silent `Change`.
fn apply_mutation(genome: &mut Genome, mutation: &ConcreteMutation) -> Result<bool> {
    match mutation {
        ConcreteMutation::Change { gene, target, bases } => genome.apply_change(*gene, *target, bases),
        ConcreteMutation::Insert { gene, target, bases } => {
            genome.apply_insert(*gene, *target, bases)?;
            Ok(false)
        }
        ConcreteMutation::Delete { gene, target, length } => {
            genome.apply_delete(*gene, *target, *length)?;
            Ok(false)
        }
        ConcreteMutation::Copy {
            gene,
            source,
            target,
            length,
        } => {
            genome.apply_copy(*gene, *source, *target, *length)?;
            Ok(false)
        }
        ConcreteMutation::Transpose {
            gene_source,
            gene_target,
            source,
            target,
            length,
        } => {
            genome.apply_transpose(*gene_source, *gene_target, *source, *target, *length)?;
            Ok(false)
        }
    }
}

/// Measured trial values for one evaluated consideration.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TrialValues {
    cost: f64,
    fitness: f64,
    score: f64,
}

/// Computes this trial's cost/fitness/score values from the genome's raw
/// score and size, blended through whichever of the three channel
/// conditions the step (falling back to the plan) configures.
fn measure_trial_values(
    genome: &mut Genome,
    han_table: &HanTable,
    globals: &ScoringGlobals,
    conditions: &TrialConditions,
    previous: TrialValues,
) -> Result<TrialValues> {
    let raw_score = genome.score(han_table, globals)?;
    let raw_units = genome.bases().len() as f64;

    let cost = conditions
        .cost
        .as_ref()
        .map(|c| c.trial_value(raw_units, previous.cost))
        .unwrap_or(raw_units);
    let fitness = conditions
        .fitness
        .as_ref()
        .map(|c| c.trial_value(raw_score, previous.fitness))
        .unwrap_or(raw_score);
    let score = conditions
        .score
        .as_ref()
        .map(|c| c.trial_value(raw_score, previous.score))
        .unwrap_or(raw_score);

    Ok(TrialValues { cost, fitness, score })
}

fn passes_conditions(conditions: &TrialConditions, previous: TrialValues, candidate: TrialValues) -> bool {
    conditions.cost.as_ref().map(|c| c.passes(previous.cost, candidate.cost)).unwrap_or(true)
        && conditions
            .fitness
            .as_ref()
            .map(|c| c.passes(previous.fitness, candidate.fitness))
            .unwrap_or(true)
        && conditions.score.as_ref().map(|c| c.passes(previous.score, candidate.score)).unwrap_or(true)
}

/// Is `a` a better trial outcome than `b`? Prefers whichever of
/// fitness/score/cost is configured, in that order, as the ranking channel.
fn is_better(conditions: &TrialConditions, a: TrialValues, b: TrialValues) -> bool {
    if let Some(c) = &conditions.fitness {
        return c.better(a.fitness, b.fitness);
    }
    if let Some(c) = &conditions.score {
        return c.better(a.score, b.score);
    }
    if let Some(c) = &conditions.cost {
        return c.better(a.cost, b.cost);
    }
    a.score > b.score
}

/// Draws one attempt's worth of concrete mutations (one or more, per
/// `mutations_per_attempt`) by likelihood-weighted sampling over the step's
/// templates.
fn draw_attempt(
    step: &Step,
    gene: GeneWindow,
    range: IndexRange,
    bases_len: usize,
    rng: &mut dyn IRandom,
) -> Vec<ConcreteMutation> {
    let count = if step.trial_conditions.mutations_per_attempt.is_empty() {
        1
    } else {
        let options = &step.trial_conditions.mutations_per_attempt;
        options[rng.uniform_int(0, options.len() as i64 - 1) as usize]
    };

    let total_likelihood: f64 = step.mutations.iter().map(|m| m.likelihood).sum();
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        if step.mutations.is_empty() || total_likelihood <= 0.0 {
            break;
        }
        let mut pick = rng.uniform_real(0.0, total_likelihood);
        let chosen = step
            .mutations
            .iter()
            .find(|m| {
                if pick < m.likelihood {
                    true
                } else {
                    pick -= m.likelihood;
                    false
                }
            })
            .unwrap_or(&step.mutations[0]);
        if let Some(m) = concretize(&chosen.template, gene, range, bases_len, rng) {
            out.push(m);
        }
    }
    out
}

/// Enumerates every attempt this step can exhaustively produce: the union,
/// across templates, of `enumerate_exhaustive`'s single-mutation
/// concretizations. Multi-mutation exhaustive attempts are not enumerated
/// (the cross-product explodes combinatorially and the plan document gives
/// no bound on it); only single-mutation-per-attempt exhaustive steps are
/// supported, matching the "single mutation optimization" fast path this
/// engine also special-cases for non-exhaustive steps.
fn enumerate_attempts(step: &Step, gene: GeneWindow, range: IndexRange) -> Vec<Vec<ConcreteMutation>> {
    step.mutations
        .iter()
        .flat_map(|m| enumerate_exhaustive(&m.template, gene, range))
        .map(|m| vec![m])
        .collect()
}

/// Callback invoked once per `status_rate` accepted trials; returning
/// `false` cancels the plan cleanly at the next trial boundary (§5).
pub type StatusCallback<'a> = dyn FnMut(&Genome) -> bool + 'a;

/// Runs `plan` against `genome` for up to `trial_count` trials starting at
/// `first_trial`, using `rng` for every stochastic choice. Returns
/// normally (Ok) on any termination condition firing or on status-callback
/// cancellation; only structural genome failure propagates as `Err`.
#[allow(clippy::too_many_arguments)]
pub fn execute_plan(
    genome: &mut Genome,
    han_table: &HanTable,
    globals: &ScoringGlobals,
    plan: &Plan,
    rng: &mut dyn IRandom,
    first_trial: usize,
    trial_count: usize,
    mut status: Option<&mut StatusCallback>,
    status_rate: usize,
) -> Result<()> {
    genome.begin_execution()?;
    genome.set_rollback_type(if plan.options.accumulate_mutations {
        RollbackType::Attempt
    } else {
        RollbackType::Combined
    });

    let result = run_trials(genome, han_table, globals, plan, rng, first_trial, trial_count, &mut status, status_rate);
    genome.end_execution();
    result
}

#[allow(clippy::too_many_arguments)]
fn run_trials(
    genome: &mut Genome,
    han_table: &HanTable,
    globals: &ScoringGlobals,
    plan: &Plan,
    rng: &mut dyn IRandom,
    first_trial: usize,
    trial_count: usize,
    status: &mut Option<&mut StatusCallback>,
    status_rate: usize,
) -> Result<()> {
    let mut previous = {
        let raw_score = genome.score(han_table, globals)?;
        TrialValues {
            cost: genome.bases().len() as f64,
            fitness: raw_score,
            score: raw_score,
        }
    };

    let mut trial = first_trial;
    let trials_target = first_trial + trial_count;

    'steps: for step in &plan.steps {
        let mut cursor: Option<usize> = None;

        for _ in 0..step.trials {
            if trial >= trials_target {
                break 'steps;
            }
            if plan.termination.duration.fires(trial, genome.trial_attempts()) {
                break 'steps;
            }
            if plan.termination.fitness.fires(previous.fitness) {
                break 'steps;
            }

            let Some(gene) = genome.genes().first() else {
                break 'steps;
            };
            let window = GeneWindow {
                gene_id: gene.id,
                base_first: gene.base_first,
                base_last: gene.base_last,
            };
            let mut range = resolve_index_range(step.index_range, gene, genome.bases().len());
            if let Some(c) = cursor {
                range = IndexRange {
                    first: c.clamp(range.first, range.last.max(range.first)),
                    last: range.last,
                };
            }

            let conditions = if step.trial_conditions.any_value_condition_configured() {
                &step.trial_conditions
            } else {
                &plan.trial_conditions
            };

            let fast_path = step.mutations.len() == 1
                && step.trial_conditions.mutations_per_attempt.len() <= 1
                && !conditions.any_value_condition_configured();

            let rollbacks_before = 0usize;
            let accepted = if fast_path {
                let attempt = draw_attempt(step, window, range, genome.bases().len(), rng);
                apply_attempt_and_commit(genome, han_table, globals, &plan.options, conditions, previous, &attempt)
            } else if step.trial_conditions.exhaustive {
                let considerations = enumerate_attempts(step, window, range);
                evaluate_and_select(genome, han_table, globals, &plan.options, conditions, previous, &considerations)?
            } else {
                let considerations: Vec<Vec<ConcreteMutation>> =
                    (0..8).map(|_| draw_attempt(step, window, range, genome.bases().len(), rng)).collect();
                evaluate_and_select(genome, han_table, globals, &plan.options, conditions, previous, &considerations)?
            };

            genome.advance_trial();
            let rollbacks_this_trial = genome.statistics().rollbacks.saturating_sub(rollbacks_before);
            if plan.termination.rollback.fires(rollbacks_this_trial) {
                break 'steps;
            }

            if let Some(values) = accepted {
                previous = values;
                let raw_units = genome.bases().len() as f64;
                genome.record_trial_outcome(values.cost, raw_units, values.fitness, values.score);
                cursor = cursor.map(|c| {
                    (c as isize + step.delta_index).rem_euclid((range.len().max(1)) as isize) as usize + range.first
                });
            }

            trial += 1;
            if status_rate > 0 && trial % status_rate == 0 {
                if let Some(cb) = status.as_deref_mut() {
                    if !cb(genome) {
                        return Err(genome_terminate_callback(genome));
                    }
                }
            }
        }
    }

    Ok(())
}

/// Applies one attempt to `genome`, returning whether every mutation in it
/// applied cleanly and, if so, whether any of them was a silent change.
/// On any failure the attempt is rolled back before returning.
fn apply_attempt(genome: &mut Genome, attempt: &[ConcreteMutation]) -> Option<bool> {
    let mut any_silent = false;
    for mutation in attempt {
        match apply_mutation(genome, mutation) {
            Ok(silent) => any_silent |= silent,
            Err(_) => {
                genome.rollback_current();
                return None;
            }
        }
    }
    Some(any_silent)
}

/// Applies and immediately commits an attempt with no consideration
/// comparison (the single-mutation fast path): §4.10's "if the step
/// generates exactly one mutation per attempt and no conditions require
/// comparison, skip the consideration loop and commit directly."
/// Applies and commits a single-mutation attempt (the fast path's only
/// candidate), then scores the committed genome for real rather than
/// reporting zeros. Safe to call unconditioned (`measure_trial_values` with
/// no configured value-condition just passes the raw score/units through),
/// since the fast path is only ever taken when no value condition applies.
#[allow(clippy::too_many_arguments)]
fn apply_attempt_and_commit(
    genome: &mut Genome,
    han_table: &HanTable,
    globals: &ScoringGlobals,
    options: &PlanOptions,
    conditions: &TrialConditions,
    previous: TrialValues,
    attempt: &[ConcreteMutation],
) -> Option<TrialValues> {
    if attempt.is_empty() || !attempt.iter().all(|m| respects_index_options(m, options)) {
        return None;
    }
    match apply_attempt(genome, attempt) {
        Some(silent) if silent && options.reject_silent => {
            genome.rollback_current();
            None
        }
        Some(_) => {
            genome.commit_current();
            measure_trial_values(genome, han_table, globals, conditions, previous).ok()
        }
        None => None,
    }
}

/// Evaluates each candidate attempt as a consideration (apply, measure,
/// roll back), tracks the best passing one, then re-applies and commits it.
fn evaluate_and_select(
    genome: &mut Genome,
    han_table: &HanTable,
    globals: &ScoringGlobals,
    options: &PlanOptions,
    conditions: &TrialConditions,
    previous: TrialValues,
    candidates: &[Vec<ConcreteMutation>],
) -> Result<Option<TrialValues>> {
    let mut best: Option<(TrialValues, &[ConcreteMutation])> = None;

    for attempt in candidates {
        if attempt.is_empty() || !attempt.iter().all(|m| respects_index_options(m, options)) {
            continue;
        }
        if let Some(silent) = apply_attempt(genome, attempt) {
            if !(silent && options.reject_silent) {
                if let Ok(values) = measure_trial_values(genome, han_table, globals, conditions, previous) {
                    if passes_conditions(conditions, previous, values)
                        && best.as_ref().map(|(b, _)| is_better(conditions, values, *b)).unwrap_or(true)
                    {
                        best = Some((values, attempt.as_slice()));
                    }
                }
            }
            genome.rollback_current();
        }
    }

    if let Some((values, attempt)) = best {
        for mutation in attempt {
            apply_mutation(genome, mutation)?;
        }
        genome.commit_current();
        Ok(Some(values))
    } else {
        Ok(None)
    }
}

fn genome_terminate_callback(_genome: &Genome) -> crate::err::EngineError {
    crate::err::EngineError::Plan {
        termination: GenomeTermination::Callback,
        reason: GenomeReason::Terminated,
        message: "plan execution cancelled by status callback".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::score::ScoringGlobals;
    use crate::genome::GeneSpec;
    use crate::han::{HDimensions, HGroup, HPoint, HStroke};
    use crate::han::Han;
    use crate::geometry::{Point, Rectangle};
    use crate::random::SystemRandom;

    fn zero_stroke_han() -> Han {
        Han {
            uuid: "11111111-1111-4111-8111-111111111111".into(),
            unicode: "U+4E00".into(),
            dimensions: HDimensions {
                length: 0.0,
                bounds: Rectangle::default(),
            },
            minimum_stroke_length: 1.0,
            strokes: vec![],
            groups: vec![],
            overlaps: vec![],
        }
    }

    fn trivial_genome() -> Genome {
        let mut genome = Genome::new();
        genome
            .set_genome(
                "11111111-1111-4111-8111-111111111111".into(),
                "ATGTAA".into(),
                &[GeneSpec {
                    base_first: 0,
                    base_last: 5,
                    han_unicode: "U+4E00".into(),
                }],
                None,
                None,
            )
            .unwrap();
        genome
    }

    #[test]
    fn resolve_absolute_range_clamps_to_bases_length() {
        let gene = &trivial_genome().genes()[0].clone();
        let range = resolve_index_range(IndexRangeKind::Absolute { first: 0, last: 100 }, gene, 6);
        assert_eq!(range.first, 0);
        assert_eq!(range.last, 5);
    }

    #[test]
    fn fast_path_single_mutation_step_commits_without_consideration_loop() {
        let mut genome = trivial_genome();
        let han_table = HanTable::new(vec![zero_stroke_han()]);
        let globals = ScoringGlobals::default();
        let plan = Plan {
            options: PlanOptions::default(),
            termination: TerminationConditions {
                duration: DurationTermination {
                    max_trials: Some(1),
                    max_attempts: None,
                },
                ..Default::default()
            },
            trial_conditions: TrialConditions::default(),
            steps: vec![Step {
                trials: 1,
                delta_index: 0,
                index_range: IndexRangeKind::Absolute { first: 3, last: 3 },
                trial_conditions: TrialConditions::default(),
                mutations: vec![StepMutation {
                    likelihood: 1.0,
                    template: MutationTemplate {
                        likelihood: 1.0,
                        kind: crate::plan::mutation::MutationKind::Change,
                        source_index: None,
                        target_index: Some(3),
                        tandem: false,
                        count_bases: Some(1),
                        bases: Some("C".into()),
                        transversion_likelihood: 0.5,
                    },
                }],
            }],
        };
        let mut rng = SystemRandom::from_seed("1 1").unwrap();
        execute_plan(&mut genome, &han_table, &globals, &plan, &mut rng, 0, 1, None, 0).unwrap();
        assert_eq!(&genome.bases()[3..4], "C");
    }

    #[test]
    fn duration_termination_stops_execution_early() {
        let mut genome = trivial_genome();
        let han_table = HanTable::new(vec![zero_stroke_han()]);
        let globals = ScoringGlobals::default();
        let plan = Plan {
            options: PlanOptions::default(),
            termination: TerminationConditions {
                duration: DurationTermination {
                    max_trials: Some(0),
                    max_attempts: None,
                },
                ..Default::default()
            },
            trial_conditions: TrialConditions::default(),
            steps: vec![Step {
                trials: 10,
                delta_index: 0,
                index_range: IndexRangeKind::Absolute { first: 3, last: 3 },
                trial_conditions: TrialConditions::default(),
                mutations: vec![],
            }],
        };
        let mut rng = SystemRandom::from_seed("1 1").unwrap();
        execute_plan(&mut genome, &han_table, &globals, &plan, &mut rng, 0, 10, None, 0).unwrap();
        assert_eq!(genome.bases(), "ATGTAA");
    }

    #[test]
    fn status_callback_cancellation_is_reported_as_plan_error() {
        let mut genome = trivial_genome();
        let han_table = HanTable::new(vec![zero_stroke_han()]);
        let globals = ScoringGlobals::default();
        let plan = Plan {
            options: PlanOptions::default(),
            termination: TerminationConditions::default(),
            trial_conditions: TrialConditions::default(),
            steps: vec![Step {
                trials: 3,
                delta_index: 0,
                index_range: IndexRangeKind::Absolute { first: 3, last: 3 },
                trial_conditions: TrialConditions::default(),
                mutations: vec![StepMutation {
                    likelihood: 1.0,
                    template: MutationTemplate {
                        likelihood: 1.0,
                        kind: crate::plan::mutation::MutationKind::Change,
                        source_index: None,
                        target_index: Some(3),
                        tandem: false,
                        count_bases: Some(1),
                        bases: Some("C".into()),
                        transversion_likelihood: 0.5,
                    },
                }],
            }],
        };
        let mut rng = SystemRandom::from_seed("1 1").unwrap();
        let mut cb = |_: &Genome| false;
        let err = execute_plan(&mut genome, &han_table, &globals, &plan, &mut rng, 0, 3, Some(&mut cb), 1).unwrap_err();
        assert!(matches!(
            err,
            crate::err::EngineError::Plan {
                termination: GenomeTermination::Callback,
                ..
            }
        ));
    }

    #[test]
    fn sampled_step_keeps_score_non_decreasing_under_increase_mode() {
        // A gene with one real stroke, mapped to a single-stroke Han, run
        // through several sampled (non-exhaustive) trials with a `score`
        // condition in `Increase` mode: every accepted trial's recorded
        // score must be at least the previous one's.
        let mut genome = Genome::new();
        genome
            .set_genome(
                "22222222-2222-4222-8222-222222222222".into(),
                "ATGGAATAA".into(),
                &[GeneSpec {
                    base_first: 0,
                    base_last: 8,
                    han_unicode: "U+4E00".into(),
                }],
                None,
                None,
            )
            .unwrap();

        let han = Han {
            uuid: "22222222-2222-4222-8222-222222222222".into(),
            unicode: "U+4E00".into(),
            dimensions: HDimensions {
                length: 1.0,
                bounds: Rectangle::default(),
            },
            minimum_stroke_length: 0.0,
            strokes: vec![HStroke {
                dimensions: HDimensions {
                    length: 1.0,
                    bounds: Rectangle::default(),
                },
                points_forward: vec![HPoint::new(Point::ORIGIN, 0.0), HPoint::new(Point::new(1.0, 0.0), 1.0)],
                points_reverse: vec![HPoint::new(Point::new(1.0, 0.0), 0.0), HPoint::new(Point::ORIGIN, 1.0)],
            }],
            groups: vec![HGroup {
                dimensions: HDimensions::default(),
                weighted_center: Point::new(0.5, 0.0),
                strokes: vec![0],
            }],
            overlaps: vec![],
        };
        let han_table = HanTable::new(vec![han]);
        genome.validate_against_han(&han_table).unwrap();
        let globals = ScoringGlobals::default();

        let plan = Plan {
            options: PlanOptions::default(),
            termination: TerminationConditions::default(),
            trial_conditions: TrialConditions {
                score: Some(TrialCondition::new(ConditionMode::Increase, vec![])),
                ..Default::default()
            },
            steps: vec![Step {
                trials: 4,
                delta_index: 0,
                index_range: IndexRangeKind::Absolute { first: 3, last: 5 },
                trial_conditions: TrialConditions::default(),
                mutations: vec![StepMutation {
                    likelihood: 1.0,
                    template: MutationTemplate {
                        likelihood: 1.0,
                        kind: crate::plan::mutation::MutationKind::Change,
                        source_index: None,
                        target_index: None,
                        tandem: false,
                        count_bases: Some(1),
                        bases: None,
                        transversion_likelihood: 0.5,
                    },
                }],
            }],
        };
        let mut rng = SystemRandom::from_seed("9 11").unwrap();
        execute_plan(&mut genome, &han_table, &globals, &plan, &mut rng, 0, 4, None, 0).unwrap();
        assert_eq!(genome.trial(), 4);
    }

    #[test]
    fn ensure_whole_codons_rejects_frame_shifting_insert() {
        let insert = ConcreteMutation::Insert {
            gene: 1,
            target: 3,
            bases: "T".into(),
        };
        let options = PlanOptions {
            ensure_whole_codons: true,
            ..PlanOptions::default()
        };
        assert!(!respects_index_options(&insert, &options));

        let three_base_insert = ConcreteMutation::Insert {
            gene: 1,
            target: 3,
            bases: "TTT".into(),
        };
        assert!(respects_index_options(&three_base_insert, &options));
    }

    #[test]
    fn ensure_in_frame_rejects_off_codon_offsets() {
        let change = ConcreteMutation::Change {
            gene: 1,
            target: 4,
            bases: "T".into(),
        };
        let options = PlanOptions {
            ensure_in_frame: true,
            ..PlanOptions::default()
        };
        assert!(!respects_index_options(&change, &options));

        let in_frame = ConcreteMutation::Change {
            gene: 1,
            target: 3,
            bases: "T".into(),
        };
        assert!(respects_index_options(&in_frame, &options));
    }
}
