//! The genome lifecycle state machine: loading, compilation, validation,
//! scoring, mutation, and rollback.
//!
//! The original's process-wide singleton `Genome` (all-static members,
//! enforced by `friend` access from its mutation classes) becomes an owned
//! value manipulated through `&mut Genome` methods, per the REDESIGN FLAGS.

pub mod compile;
pub mod han_map;
pub mod measure;
pub mod modification;
pub mod overlap;
pub mod score;

use crate::acid::CodonTable;
use crate::err::{EngineError, Result};
use crate::geometry::Line;
use crate::han::HanTable;
use crate::stats::Statistics;
use compile::{Gene, InvalidFlags};
use modification::{Modification, ModificationStack, RollbackType};
use overlap::OverlapOutcome;
use score::ScoringGlobals;

/// The genome's lifecycle state (`ST_GENOMESTATE`). Control never returns
/// to the caller with the genome in an internal (non-public) state; the
/// states marked below are the only ones a caller can observe between
/// calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenomeState {
    /// Alive and valid — externally observable.
    Alive,
    Compiled,
    Compiling,
    /// Dead — externally observable.
    Dead,
    /// Internal structures are out-of-sync — externally observable.
    Invalid,
    Loading,
    Mutating,
    Recording,
    Rollback,
    Restoring,
    /// Scoring is complete — externally observable.
    Scored,
    Scoring,
    Spawning,
    Validated,
    Validating,
}

impl GenomeState {
    pub fn is_dead(self) -> bool {
        matches!(self, GenomeState::Dead)
    }
}

/// Which process last terminated, and why (`ST_GENOMETERMINATION`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenomeTermination {
    #[default]
    None,
    Compilation,
    Validation,
    Score,
    Mutation,
    Duration,
    Rollback,
    Fitness,
    Callback,
}

/// An action-specific reason code for the last termination
/// (`ST_GENOMEREASON`, flattened into one enum per REDESIGN).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenomeReason {
    #[default]
    None,
    // Validation
    Strokes,
    Measurement,
    // Scoring
    Cost,
    Fitness,
    Score,
    Stroke,
    // Mutation
    Change,
    Copy,
    Delete,
    Insert,
    Transpose,
    // Duration
    Trials,
    Attempts,
    // Rollback
    Limit,
    // Fitness (plan-level)
    Maximum,
    Minimum,
    // Callback
    Terminated,
}

/// A single, named gene definition supplied when loading a genome: its
/// base range and the Han glyph it is scored against.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneSpec {
    pub base_first: usize,
    pub base_last: usize,
    pub han_unicode: String,
}

/// The owned genome value: base string, compiled genes, modification
/// history, rollback stacks, and accumulated statistics.
pub struct Genome {
    pub uuid: String,
    pub strain: String,
    pub ancestors: String,
    author: String,

    bases: String,
    codon_table: CodonTable,
    genes: Vec<Gene>,

    state: GenomeState,
    termination: GenomeTermination,
    reason: GenomeReason,
    termination_message: String,

    stats: Statistics,
    stats_since_record: Statistics,

    modifications: ModificationStack,
    attempts: Vec<ModificationStack>,
    considerations: Vec<ModificationStack>,
    rollback_type: RollbackType,

    executing: bool,
}

impl Genome {
    /// A genome "wakes up" dead; `set_genome` is required before any other
    /// operation (besides state inspection) succeeds.
    pub fn new() -> Self {
        Self {
            uuid: String::new(),
            strain: String::new(),
            ancestors: String::new(),
            author: String::new(),
            bases: String::new(),
            codon_table: CodonTable::default(),
            genes: Vec::new(),
            state: GenomeState::Dead,
            termination: GenomeTermination::None,
            reason: GenomeReason::None,
            termination_message: String::new(),
            stats: Statistics::default(),
            stats_since_record: Statistics::default(),
            modifications: ModificationStack::new(),
            attempts: Vec::new(),
            considerations: Vec::new(),
            rollback_type: RollbackType::Combined,
            executing: false,
        }
    }

    pub fn state(&self) -> GenomeState {
        self.state
    }

    pub fn is_state(&self, state: GenomeState) -> bool {
        self.state == state
    }

    pub fn termination(&self) -> (GenomeTermination, GenomeReason, &str) {
        (self.termination, self.reason, &self.termination_message)
    }

    pub fn bases(&self) -> &str {
        &self.bases
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn gene_by_id(&self, id: usize) -> Option<&Gene> {
        self.genes.iter().find(|g| g.id == id)
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn trial(&self) -> usize {
        self.stats.trial_current
    }

    pub fn trial_attempts(&self) -> usize {
        self.stats.trial_attempts
    }

    pub fn set_rollback_type(&mut self, rollback_type: RollbackType) {
        self.rollback_type = rollback_type;
    }

    fn require_not_dead(&self) -> Result<()> {
        if self.state.is_dead() {
            return Err(EngineError::Dead(
                "genome has not been loaded, or loading failed".into(),
            ));
        }
        Ok(())
    }

    fn require_alive(&self) -> Result<()> {
        if self.state != GenomeState::Alive {
            return Err(EngineError::InvalidState {
                expected: GenomeState::Alive,
                found: self.state,
            });
        }
        Ok(())
    }

    fn fail(&mut self, termination: GenomeTermination, reason: GenomeReason, message: impl Into<String>) -> EngineError {
        self.state = GenomeState::Dead;
        self.termination = termination;
        self.reason = reason;
        self.termination_message = message.into();
        EngineError::Plan {
            termination,
            reason,
            message: self.termination_message.clone(),
        }
    }

    /// Loads a new genome definition: sets bases, compiles each gene's ORF,
    /// checks structural liveness, and moves to `ALIVE` on success or
    /// `DEAD` (recording the termination) on failure.
    ///
    /// Precondition: no plan is currently executing.
    pub fn set_genome(
        &mut self,
        uuid: String,
        bases: String,
        genes: &[GeneSpec],
        author: Option<String>,
        codon_table: Option<CodonTable>,
    ) -> Result<()> {
        if self.executing {
            return Err(EngineError::InExecution);
        }

        self.state = GenomeState::Loading;
        self.uuid = uuid;
        self.bases = bases;
        self.author = author.unwrap_or_default();
        self.codon_table = codon_table.unwrap_or_default();
        self.genes.clear();
        self.modifications.clear();
        self.attempts.clear();
        self.considerations.clear();
        self.stats = Statistics::default();
        self.stats_since_record = Statistics::default();

        self.state = GenomeState::Compiling;
        for (index, spec) in genes.iter().enumerate() {
            let gene = compile::compile_gene(
                index + 1,
                &self.bases,
                &self.codon_table,
                spec.base_first,
                spec.base_last,
                spec.han_unicode.clone(),
            )
            .map_err(|e| self.fail(GenomeTermination::Compilation, GenomeReason::None, e.to_string()))?;
            self.genes.push(gene);
        }
        self.state = GenomeState::Compiled;

        self.state = GenomeState::Validating;
        for gene in &self.genes {
            if !gene.is_alive() {
                return Err(self.fail(
                    GenomeTermination::Validation,
                    GenomeReason::Strokes,
                    format!("gene {} produced no strokes", gene.id),
                ));
            }
        }
        self.state = GenomeState::Validated;
        self.state = GenomeState::Alive;
        self.stats.bases = self.bases.len();
        Ok(())
    }

    /// Maps every gene's structural strokes onto its Han's strokes and
    /// groups, per the liveness invariant in the data model. Fails (and
    /// kills the genome) if a gene's non-mark stroke count doesn't match
    /// its Han's stroke count.
    pub fn validate_against_han(&mut self, han_table: &HanTable) -> Result<()> {
        self.require_not_dead()?;
        self.state = GenomeState::Validating;
        for gene in &mut self.genes {
            let han = han_table.by_unicode(&gene.han_unicode).ok_or_else(|| {
                EngineError::BadArguments(format!("no Han definition for {}", gene.han_unicode))
            })?;
            if let Err(e) = han_map::assign_han_mapping(gene, han) {
                self.state = GenomeState::Dead;
                self.termination = GenomeTermination::Validation;
                self.reason = GenomeReason::Strokes;
                self.termination_message = e.to_string();
                return Err(e);
            }
            gene.invalid.clear(InvalidFlags::STROKES);
            gene.invalid.clear(InvalidFlags::GEOMETRY);
        }
        self.state = GenomeState::Validated;
        self.state = GenomeState::Alive;
        Ok(())
    }

    /// Scores every gene against its mapped Han definition: measures each
    /// non-mark stroke's scale/placement/deviation/extra-length, detects
    /// stroke overlaps and classifies them against the Han's declared
    /// overlaps, aggregates into group- and gene-level exponents, and
    /// multiplies through the weighted-exponent score formula. Moves
    /// `ALIVE -> SCORING -> SCORED`.
    pub fn score(&mut self, han_table: &HanTable, globals: &ScoringGlobals) -> Result<f64> {
        self.require_alive()?;
        self.state = GenomeState::Scoring;

        let mut total_score = 0.0;
        for gene in &mut self.genes {
            let han = han_table.by_unicode(&gene.han_unicode).ok_or_else(|| {
                EngineError::BadArguments(format!("no Han definition for {}", gene.han_unicode))
            })?;

            if gene.invalid.contains(InvalidFlags::STROKES) || gene.groups.is_empty() {
                han_map::assign_han_mapping(gene, han)?;
                gene.invalid.clear(InvalidFlags::STROKES);
                gene.invalid.clear(InvalidFlags::GEOMETRY);
            }

            // Pass 1: measure every non-mark stroke against its mapped Han
            // stroke, using the gene's current (previous-trial) scale as
            // the parent scale for degenerate-dimension inheritance.
            let parent_scale = gene.scale;
            for stroke in &mut gene.strokes {
                let Some(han_index) = stroke.han_stroke else { continue };
                let han_stroke = &han.strokes[han_index];
                let measurement =
                    measure::measure_stroke(&gene.points, &gene.acids, stroke, han_stroke, parent_scale)?;
                stroke.scale = measurement.scale;
                stroke.translation = measurement.translation;
                stroke.reversed = measurement.reversed;
                stroke.deviation = measurement.deviation;
                stroke.extra_length = measurement.extra_length;
                stroke.dropout = measurement.dropout;
                stroke.inherited_x = measurement.inherited_x;
                stroke.inherited_y = measurement.inherited_y;
            }

            // Pass 2: aggregate group scale/translation from member strokes
            // (weighted by Han stroke length), then gene scale/translation
            // from its groups (weighted by total Han stroke length per
            // group). A group dimension counts as inherited only when every
            // member stroke inherited it.
            let mut group_weighted = Vec::with_capacity(gene.groups.len());
            let mut group_translation_weighted = Vec::with_capacity(gene.groups.len());
            let mut group_aggregates = Vec::with_capacity(gene.groups.len());
            for group in &gene.groups {
                let member_strokes: Vec<&compile::Stroke> = group
                    .strokes
                    .iter()
                    .filter_map(|&i| gene.strokes[i].han_stroke.map(|_| &gene.strokes[i]))
                    .collect();
                let members: Vec<(compile::Scale, f64)> = group
                    .strokes
                    .iter()
                    .filter_map(|&i| {
                        let stroke = &gene.strokes[i];
                        stroke.han_stroke.map(|h| (stroke.scale, han.strokes[h].length()))
                    })
                    .collect();
                let translation_members: Vec<((f64, f64), f64)> = group
                    .strokes
                    .iter()
                    .filter_map(|&i| {
                        let stroke = &gene.strokes[i];
                        stroke.han_stroke.map(|h| (stroke.translation, han.strokes[h].length()))
                    })
                    .collect();
                let group_scale = measure::measure_group_scale(&members);
                let group_translation = measure::measure_group_translation(&translation_members);
                let total_han_length: f64 = members.iter().map(|(_, w)| w).sum();
                group_weighted.push((group_scale, total_han_length));
                group_translation_weighted.push((group_translation, total_han_length));

                let han_group = &han.groups[group.han_group];
                let inherited_x = !member_strokes.is_empty() && member_strokes.iter().all(|s| s.inherited_x);
                let inherited_y = !member_strokes.is_empty() && member_strokes.iter().all(|s| s.inherited_y);
                group_aggregates.push(measure::GroupAggregate {
                    scale: group_scale,
                    translation: group_translation,
                    inherited_x,
                    inherited_y,
                    han_width: han.group_bounds(han_group).width(),
                    han_height: han.group_bounds(han_group).height(),
                    han_length: total_han_length,
                });
            }
            gene.scale = measure::measure_gene_scale(&group_weighted);
            gene.translation = measure::measure_gene_translation(&group_translation_weighted);

            // Overlap detection: one `Line` per acid contributing to a
            // non-mark stroke, owner id = stroke index within the gene.
            let mut lines = Vec::new();
            let mut line_id = 0usize;
            for (stroke_index, stroke) in gene.strokes.iter().enumerate() {
                if stroke.han_stroke.is_none() {
                    continue;
                }
                for acid_index in stroke.acids.start()..stroke.acids.end() {
                    lines.push(Line::new(
                        gene.points[acid_index],
                        gene.points[acid_index + 1],
                        line_id,
                        stroke_index,
                    ));
                    line_id += 1;
                }
            }
            let actual_overlaps = overlap::detect_stroke_overlaps(&lines);
            let classified = overlap::classify_overlaps(&actual_overlaps, &han.overlaps);

            let mut gene_illegal = 0usize;
            let mut gene_missing = 0usize;
            let mut group_illegal = vec![0usize; gene.groups.len()];
            let mut group_missing = vec![0usize; gene.groups.len()];
            for result in &classified {
                if !matches!(result.outcome, OverlapOutcome::Illegal | OverlapOutcome::Missing) {
                    continue;
                }
                let group_a = gene.strokes.get(result.stroke_a).and_then(|s| s.group);
                let group_b = gene.strokes.get(result.stroke_b).and_then(|s| s.group);
                let same_group = matches!((group_a, group_b), (Some(a), Some(b)) if a == b);
                let group_index = if same_group {
                    gene.groups.iter().position(|g| Some(g.han_group) == group_a)
                } else {
                    None
                };
                match (result.outcome, group_index) {
                    (OverlapOutcome::Illegal, Some(g)) => group_illegal[g] += 1,
                    (OverlapOutcome::Illegal, None) => gene_illegal += 1,
                    (OverlapOutcome::Missing, Some(g)) => group_missing[g] += 1,
                    (OverlapOutcome::Missing, None) => gene_missing += 1,
                    _ => unreachable!(),
                }
            }

            // Pass 3: per-group score from its member strokes' own scores,
            // penalized by the group's own channel exponents, including the
            // real scale/placement consistency of its member strokes.
            let mut group_scores = Vec::with_capacity(gene.groups.len());
            for (group_index, group) in gene.groups.iter().enumerate() {
                let stroke_scores: Vec<f64> = group
                    .strokes
                    .iter()
                    .map(|&i| {
                        let stroke = &gene.strokes[i];
                        score::stroke_score(stroke.deviation, stroke.extra_length, globals)
                    })
                    .collect();
                let dropouts: usize = group.strokes.iter().map(|&i| gene.strokes[i].dropout).sum();
                let consistency_members: Vec<measure::StrokeConsistency> = group
                    .strokes
                    .iter()
                    .filter_map(|&i| {
                        let stroke = &gene.strokes[i];
                        stroke.han_stroke.map(|h| measure::StrokeConsistency {
                            stroke,
                            han_stroke: &han.strokes[h],
                        })
                    })
                    .collect();
                let group_scale = group_weighted[group_index].0;
                let group_translation = group_translation_weighted[group_index].0;
                let han_group_bounds = han.group_bounds(&han.groups[group.han_group]);
                let consistency = measure::measure_group_consistency(
                    &consistency_members,
                    group_scale,
                    group_translation,
                    &han_group_bounds,
                );
                let exponents = score::GroupExponents {
                    scale: consistency.scale,
                    placement: consistency.placement,
                    illegal_overlaps: group_illegal[group_index] as f64,
                    deviation: consistency.deviation,
                    extra_length: consistency.extra_length,
                    missing_overlaps: group_missing[group_index] as f64,
                    dropouts: dropouts as f64,
                };
                group_scores.push(score::group_score(&stroke_scores, exponents, globals));
            }

            let marks = gene.strokes.iter().filter(|s| s.is_mark).count();
            let (gene_scale_exponent, gene_placement_exponent) = measure::measure_gene_consistency(
                &group_aggregates,
                gene.scale,
                gene.translation,
                han.bounds(),
                han.length(),
            );
            let gene_exponents = score::GeneExponents {
                scale: gene_scale_exponent,
                placement: gene_placement_exponent,
                illegal_overlaps: gene_illegal as f64,
                missing_overlaps: gene_missing as f64,
                marks: marks as f64,
            };
            let gene_score = score::gene_score(&group_scores, gene_exponents, globals);

            gene.score = gene_score;
            gene.invalid = InvalidFlags::NONE;
            total_score += gene_score;
        }

        let score = if self.genes.is_empty() {
            1.0
        } else {
            total_score / self.genes.len() as f64
        };

        self.state = GenomeState::Scored;
        Ok(score)
    }

    /// Shifts every gene's base range by `delta` at the point `at`: genes
    /// entirely after `at` slide by `delta`; a gene whose range straddles
    /// `at` has only its end shifted (the mutation occurred inside it).
    /// Every gene's base range must stay in sync with the base string
    /// after any length-changing mutation (§3 Ownership).
    fn shift_genes(&mut self, at: usize, delta: isize) {
        for gene in &mut self.genes {
            if gene.base_first as isize >= at as isize {
                gene.base_first = (gene.base_first as isize + delta).max(0) as usize;
                gene.base_last = (gene.base_last as isize + delta).max(0) as usize;
            } else if gene.base_last as isize >= at as isize {
                gene.base_last = (gene.base_last as isize + delta).max(0) as usize;
            }
        }
    }

    /// Recompiles every gene's acids/points/strokes from the current base
    /// string, after its range has been kept in sync by `shift_genes`.
    /// Cheap enough to run unconditionally (the engine is single-gene by
    /// convention, and rarely holds more than a handful).
    fn recompile_genes(&mut self) -> Result<()> {
        for i in 0..self.genes.len() {
            let (id, base_first, base_last, han_unicode) = {
                let g = &self.genes[i];
                (g.id, g.base_first, g.base_last, g.han_unicode.clone())
            };
            let gene = compile::compile_gene(id, &self.bases, &self.codon_table, base_first, base_last, han_unicode)?;
            self.genes[i] = gene;
        }
        Ok(())
    }

    /// Applies a change mutation, recording its undo information.
    /// Returns whether the change was silent (same-acid substitution).
    pub fn apply_change(&mut self, gene_id: usize, target: usize, replacement: &str) -> Result<bool> {
        self.require_alive()?;
        let bases_before = self
            .bases
            .get(target..target + replacement.len())
            .ok_or_else(|| EngineError::BadArguments("change target out of range".into()))?
            .to_string();

        let silent =
            crate::acid::is_silent_change(&self.codon_table, self.bases.as_bytes(), target, replacement.as_bytes());

        self.state = GenomeState::Mutating;
        self.bases.replace_range(target..target + replacement.len(), replacement);
        let compiled = self.recompile_genes();

        self.modifications.record(Modification::Change {
            gene: gene_id,
            target,
            bases_before,
            bases_after: replacement.to_string(),
            silent,
        });

        self.stats.changed.record_attempt(replacement.len());
        self.stats.attempted += 1;
        if silent {
            self.stats.silent += 1;
        }
        self.state = GenomeState::Alive;
        compiled.map_err(|e| self.fail(GenomeTermination::Compilation, GenomeReason::Change, e.to_string()))?;
        Ok(silent)
    }

    pub fn apply_insert(&mut self, gene_id: usize, target: usize, bases: &str) -> Result<()> {
        self.require_alive()?;
        self.state = GenomeState::Mutating;
        self.bases.insert_str(target, bases);
        self.shift_genes(target, bases.len() as isize);
        let compiled = self.recompile_genes();
        self.modifications.record(Modification::Insert {
            gene: gene_id,
            target,
            bases: bases.to_string(),
        });
        self.stats.inserted.record_attempt(bases.len());
        self.stats.attempted += 1;
        self.stats.bases_inserted += bases.len();
        self.state = GenomeState::Alive;
        compiled.map_err(|e| self.fail(GenomeTermination::Compilation, GenomeReason::Insert, e.to_string()))?;
        Ok(())
    }

    pub fn apply_delete(&mut self, gene_id: usize, target: usize, length: usize) -> Result<()> {
        self.require_alive()?;
        let removed = self
            .bases
            .get(target..target + length)
            .ok_or_else(|| EngineError::BadArguments("delete target out of range".into()))?
            .to_string();

        self.state = GenomeState::Mutating;
        self.bases.replace_range(target..target + length, "");
        self.shift_genes(target, -(length as isize));
        let compiled = self.recompile_genes();
        self.modifications.record(Modification::Delete {
            gene: gene_id,
            target,
            bases: removed.clone(),
        });
        self.stats.deleted.record_attempt(length);
        self.stats.attempted += 1;
        self.stats.bases_deleted += removed.len();
        self.state = GenomeState::Alive;
        compiled.map_err(|e| self.fail(GenomeTermination::Compilation, GenomeReason::Delete, e.to_string()))?;
        Ok(())
    }

    pub fn apply_copy(&mut self, gene_id: usize, source: usize, target: usize, length: usize) -> Result<()> {
        self.require_alive()?;
        let copied = self
            .bases
            .get(source..source + length)
            .ok_or_else(|| EngineError::BadArguments("copy source out of range".into()))?
            .to_string();

        self.state = GenomeState::Mutating;
        self.bases.insert_str(target, &copied);
        self.shift_genes(target, copied.len() as isize);
        let compiled = self.recompile_genes();
        self.modifications.record(Modification::Copy {
            gene: gene_id,
            source,
            target,
            bases: copied,
        });
        self.stats.copied.record_attempt(length);
        self.stats.attempted += 1;
        self.state = GenomeState::Alive;
        compiled.map_err(|e| self.fail(GenomeTermination::Compilation, GenomeReason::Copy, e.to_string()))?;
        Ok(())
    }

    pub fn apply_transpose(
        &mut self,
        gene_source: usize,
        gene_target: usize,
        source: usize,
        target: usize,
        length: usize,
    ) -> Result<()> {
        self.require_alive()?;
        let moved = self
            .bases
            .get(source..source + length)
            .ok_or_else(|| EngineError::BadArguments("transpose source out of range".into()))?
            .to_string();

        self.state = GenomeState::Mutating;
        self.bases.replace_range(source..source + length, "");
        self.shift_genes(source, -(length as isize));
        let adjusted_target = if target > source { target - length } else { target };
        self.bases.insert_str(adjusted_target, &moved);
        self.shift_genes(adjusted_target, length as isize);
        let compiled = self.recompile_genes();
        self.modifications.record(Modification::Transpose {
            gene_source,
            gene_target,
            source,
            target: adjusted_target,
            bases: moved,
        });
        self.stats.transposed.record_attempt(length);
        self.stats.attempted += 1;
        self.state = GenomeState::Alive;
        compiled.map_err(|e| self.fail(GenomeTermination::Compilation, GenomeReason::Transpose, e.to_string()))?;
        Ok(())
    }

    pub fn current_modifications(&self) -> &ModificationStack {
        &self.modifications
    }

    /// Drains the current modification log into a fresh, empty stack,
    /// e.g. to stash it as a rejected attempt or consideration.
    pub fn take_modifications(&mut self) -> ModificationStack {
        std::mem::take(&mut self.modifications)
    }

    /// Undoes every modification made since the last commit, restoring the
    /// prior base string. Moves through `ROLLBACK` back to `ALIVE`.
    pub fn rollback_current(&mut self) {
        self.state = GenomeState::Rollback;
        let rollbacks = self.modifications.len();
        self.modifications.undo(&mut self.bases);
        let _ = self.recompile_genes();
        self.stats.record_rollback(self.stats.trial_current, rollbacks);
        self.state = GenomeState::Alive;
    }

    /// Commits the current modification log as an accepted attempt,
    /// clearing it without undoing anything.
    pub fn commit_current(&mut self) {
        self.modifications.clear();
        self.stats.accepted += 1;
    }

    pub fn push_attempt(&mut self, stack: ModificationStack) {
        self.attempts.push(stack);
    }

    pub fn push_consideration(&mut self, stack: ModificationStack) {
        self.considerations.push(stack);
    }

    pub fn attempts(&self) -> &[ModificationStack] {
        &self.attempts
    }

    pub fn considerations(&self) -> &[ModificationStack] {
        &self.considerations
    }

    pub fn is_rollback_allowed(&self) -> bool {
        !matches!(self.state, GenomeState::Dead | GenomeState::Invalid)
    }

    /// Guards against nested plan execution; pairs with `end_execution`.
    pub fn begin_execution(&mut self) -> Result<()> {
        if self.executing {
            return Err(EngineError::InExecution);
        }
        self.executing = true;
        Ok(())
    }

    pub fn end_execution(&mut self) {
        self.executing = false;
    }

    pub fn is_executing(&self) -> bool {
        self.executing
    }

    pub fn advance_trial(&mut self) {
        self.stats.trial_current += 1;
        self.stats.trial_attempts += 1;
    }

    /// Records a committed trial's values against the running statistics:
    /// the current score/units/cost/fitness plus the genome's current size,
    /// updating every max/min tracker in one call.
    pub fn record_trial_outcome(&mut self, cost: f64, units: f64, fitness: f64, score: f64) {
        let trial = self.stats.trial_current;
        self.stats.record_trial_values(trial, score, units, cost, fitness);
        self.stats.record_size(trial, self.bases.len());
    }
}

impl Default for Genome {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::GeneSpec;

    fn loaded_genome() -> Genome {
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
    fn new_genome_wakes_up_dead() {
        let genome = Genome::new();
        assert_eq!(genome.state(), GenomeState::Dead);
    }

    #[test]
    fn set_genome_compiles_and_becomes_alive() {
        let genome = loaded_genome();
        assert_eq!(genome.state(), GenomeState::Alive);
        assert_eq!(genome.genes().len(), 1);
    }

    #[test]
    fn set_genome_rejects_bad_orf_and_dies() {
        let mut genome = Genome::new();
        let err = genome
            .set_genome(
                "uuid".into(),
                "ATGATG".into(),
                &[GeneSpec {
                    base_first: 0,
                    base_last: 5,
                    han_unicode: "U+4E00".into(),
                }],
                None,
                None,
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::Plan { .. }));
        assert_eq!(genome.state(), GenomeState::Dead);
    }

    #[test]
    fn apply_change_then_rollback_restores_bases() {
        let mut genome = loaded_genome();
        let original = genome.bases().to_string();
        // "ATGTAA" only has 6 bases; a same-length change at the STOP codon
        // ("TAA" -> "TAG") keeps the gene alive (TAG is also a stop codon).
        genome.apply_change(1, 3, "TAG").ok();
        assert_ne!(genome.bases(), original);
        genome.rollback_current();
        assert_eq!(genome.bases(), original);
    }

    #[test]
    fn insert_shifts_later_gene_ranges() {
        let mut genome = Genome::new();
        genome
            .set_genome(
                "uuid".into(),
                "ATGTAAATGTAA".into(),
                &[
                    GeneSpec {
                        base_first: 0,
                        base_last: 5,
                        han_unicode: "U+4E00".into(),
                    },
                    GeneSpec {
                        base_first: 6,
                        base_last: 11,
                        han_unicode: "U+4E00".into(),
                    },
                ],
                None,
                None,
            )
            .unwrap();
        genome.apply_insert(1, 3, "GGG").unwrap();
        assert_eq!(genome.genes()[0].base_last, 8);
        assert_eq!(genome.genes()[1].base_first, 9);
        assert_eq!(genome.genes()[1].base_last, 14);
        assert_eq!(genome.bases().len(), 15);
    }

    #[test]
    fn nested_execution_is_rejected() {
        let mut genome = loaded_genome();
        genome.begin_execution().unwrap();
        assert!(matches!(genome.begin_execution(), Err(EngineError::InExecution)));
        genome.end_execution();
        assert!(genome.begin_execution().is_ok());
    }

    #[test]
    fn set_genome_rejects_reentrant_call_during_execution() {
        let mut genome = loaded_genome();
        genome.begin_execution().unwrap();
        let err = genome
            .set_genome("uuid".into(), "ATGTAA".into(), &[], None, None)
            .unwrap_err();
        assert!(matches!(err, EngineError::InExecution));
    }
}
