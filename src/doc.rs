//! In-memory shapes of the external XML documents (genome, plan, Han,
//! globals) that the out-of-scope XML loader/writer targets.
//!
//! This crate does not parse XML itself (the loader is an external
//! collaborator, per the Non-goals); these are plain `serde`-derived
//! structs so that an embedder's XML (de)serializer — or, for tests and any
//! embedder that prefers it, `serde_json` — can populate and read them.
//! Namespace `http://biologicinstitute.net/stylus/1.3` (also 1.0 and
//! prerelease variants) is a detail of that external loader, not modeled
//! here.

use serde::{Deserialize, Serialize};

/// `<codonTable>`: an optional override of the default 64-entry table,
/// identified by UUID with per-entry `(codon, acid name)` overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodonTableDoc {
    pub uuid: String,
    pub author: String,
    pub created: String,
    pub tool: String,
    pub overrides: Vec<CodonOverrideDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodonOverrideDoc {
    pub codon: String,
    pub acid: String,
}

/// `<genes><gene>`: a gene's base range and Han reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneDoc {
    pub name: String,
    pub base_first: usize,
    pub base_last: usize,
    pub han_unicode: String,
}

/// `<seed processorID="...">content</seed>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedDoc {
    pub processor_id: String,
    pub content: String,
}

/// One entry of `<lineage>`: an already-applied modification, recorded for
/// provenance rather than replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageEntryDoc {
    pub trial: usize,
    pub mutation_type: String,
    pub gene: usize,
    pub description: String,
}

/// One entry of `<history>`: a recorded accepted attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntryDoc {
    pub trial: usize,
    pub score: f64,
    pub fitness: f64,
    pub cost: f64,
}

/// `<statistics>`, as persisted/loaded rather than accumulated at runtime
/// (runtime accumulation lives in `crate::stats::Statistics`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StatisticsDoc {
    pub trial_initial: usize,
    pub trial_current: usize,
    pub score: f64,
    pub units: f64,
    pub cost: f64,
    pub fitness: f64,
    pub bases: usize,
}

/// The genome document: `uuid`, `strain`, `ancestors`, optional `seed`,
/// optional `codonTable` override, `bases`, `genes`, `statistics`, and
/// optional `lineage`/`history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomeDoc {
    pub uuid: String,
    pub strain: String,
    pub ancestors: String,
    pub author: Option<String>,
    pub seed: Option<SeedDoc>,
    pub codon_table: Option<CodonTableDoc>,
    pub bases: String,
    pub genes: Vec<GeneDoc>,
    pub statistics: StatisticsDoc,
    pub lineage: Vec<LineageEntryDoc>,
    pub history: Vec<HistoryEntryDoc>,
}

/// `<options>` of a plan document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanOptionsDoc {
    pub accumulate_mutations: bool,
    pub preserve_genes: bool,
    pub ensure_in_frame: bool,
    pub ensure_whole_codons: bool,
    pub reject_silent: bool,
}

impl Default for PlanOptionsDoc {
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

/// `<terminationConditions><duration>`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DurationDoc {
    pub trials: Option<usize>,
    pub attempts: Option<usize>,
}

/// `<terminationConditions><fitness>`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct FitnessLimitsDoc {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

/// Plan-level `<terminationConditions>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TerminationConditionsDoc {
    pub duration: DurationDoc,
    pub rollback_limit: Option<usize>,
    pub fitness: FitnessLimitsDoc,
}

/// `mode` of a `<trialConditions>` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionModeDoc {
    Decrease,
    Increase,
    Maintain,
}

/// One `<value likelihood="" value="" factor=""/>` entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueBucketDoc {
    pub likelihood: f64,
    pub value: f64,
    pub factor: f64,
}

/// One `<trialConditions>` channel (`cost`, `fitness`, or `score`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialConditionDoc {
    pub mode: ConditionModeDoc,
    pub value: Vec<ValueBucketDoc>,
}

/// `<trialConditions><mutationCondition>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MutationConditionDoc {
    pub mutations_per_attempt: Vec<usize>,
    pub exhaustive: bool,
}

/// A full `<trialConditions>` block: per-channel cost/fitness/score plus the
/// mutation-count/exhaustiveness condition (the latter only meaningful at
/// step level).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TrialConditionsDoc {
    pub cost: Option<TrialConditionDoc>,
    pub fitness: Option<TrialConditionDoc>,
    pub score: Option<TrialConditionDoc>,
    pub mutation: MutationConditionDoc,
}

/// `<indexRange>`: a step's allowed mutation-target window, expressed one
/// of four ways.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum IndexRangeDoc {
    Absolute { first: usize, last: usize },
    Percentage { first: f64, last: f64 },
    GeneRange { first: usize, last: usize },
    HanStrokeRange { first: usize, last: usize },
}

/// `type` of a `<mutations><mutation>` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationKindDoc {
    Copy,
    Change,
    Delete,
    Insert,
    Transpose,
}

/// One `<mutations><mutation>` template: a likelihood plus the (possibly
/// partial) fields the mutation generator concretizes using the plan's RNG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationTemplateDoc {
    pub likelihood: f64,
    #[serde(rename = "type")]
    pub kind: MutationKindDoc,
    pub source_index: Option<usize>,
    pub target_index: Option<usize>,
    pub tandem: Option<bool>,
    pub count_bases: Option<usize>,
    pub bases: Option<String>,
    pub transversion_likelihood: Option<f64>,
}

/// `<steps><step>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDoc {
    pub trials: usize,
    pub delta_index: isize,
    pub index_range: IndexRangeDoc,
    pub trial_conditions: TrialConditionsDoc,
    pub mutations: Vec<MutationTemplateDoc>,
}

/// The plan document root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDoc {
    pub options: PlanOptionsDoc,
    pub termination_conditions: TerminationConditionsDoc,
    pub trial_conditions: TrialConditionsDoc,
    pub steps: Vec<StepDoc>,
}

/// `<bounds>` shared by Han, stroke, and group dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BoundsDoc {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

/// One `pointsForward`/`pointsReverse` entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HPointDoc {
    pub x: f64,
    pub y: f64,
    pub fractional_distance: f64,
}

/// `<strokes><stroke>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HStrokeDoc {
    pub bounds: BoundsDoc,
    pub length: f64,
    pub points_forward: Vec<HPointDoc>,
    pub points_reverse: Vec<HPointDoc>,
}

/// `<groups><group>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HGroupDoc {
    pub weighted_center_x: f64,
    pub weighted_center_y: f64,
    pub strokes: Vec<usize>,
}

/// `<overlaps><overlap>`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HOverlapDoc {
    pub first_stroke: usize,
    pub second_stroke: usize,
    pub required: bool,
}

/// The Han document root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HanDoc {
    pub unicode: String,
    pub uuid: String,
    pub bounds: BoundsDoc,
    pub minimum_stroke_length: f64,
    pub strokes: Vec<HStrokeDoc>,
    pub groups: Vec<HGroupDoc>,
    pub overlaps: Vec<HOverlapDoc>,
}

/// `group_score_mode` of a globals document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupScoreModeDoc {
    Average,
    Minimum,
}

/// One `<weights>`/`<setpoints>` channel entry, keyed by channel name
/// (`scale`, `placement`, `deviation`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSettingDoc {
    pub channel: String,
    pub weight: f64,
    pub setpoint: f64,
}

/// The globals document root: per-level channel weights/setpoints and the
/// group-score aggregation mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalsDoc {
    pub group_channels: Vec<ChannelSettingDoc>,
    pub gene_channels: Vec<ChannelSettingDoc>,
    pub group_score_mode: GroupScoreModeDoc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genome_doc_round_trips_through_json() {
        let doc = GenomeDoc {
            uuid: "11111111-1111-4111-8111-111111111111".into(),
            strain: "wild-type".into(),
            ancestors: String::new(),
            author: Some("tester".into()),
            seed: Some(SeedDoc {
                processor_id: "0".into(),
                content: "42 7".into(),
            }),
            codon_table: None,
            bases: "ATGTAA".into(),
            genes: vec![GeneDoc {
                name: "g1".into(),
                base_first: 0,
                base_last: 5,
                han_unicode: "U+4E00".into(),
            }],
            statistics: StatisticsDoc::default(),
            lineage: vec![],
            history: vec![],
        };
        let json = serde_json::to_string(&doc).unwrap();
        let back: GenomeDoc = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn plan_doc_round_trips_through_json() {
        let doc = PlanDoc {
            options: PlanOptionsDoc::default(),
            termination_conditions: TerminationConditionsDoc {
                duration: DurationDoc {
                    trials: Some(1000),
                    attempts: None,
                },
                rollback_limit: Some(10),
                fitness: FitnessLimitsDoc::default(),
            },
            trial_conditions: TrialConditionsDoc::default(),
            steps: vec![StepDoc {
                trials: 100,
                delta_index: 0,
                index_range: IndexRangeDoc::Absolute { first: 0, last: 10 },
                trial_conditions: TrialConditionsDoc::default(),
                mutations: vec![MutationTemplateDoc {
                    likelihood: 1.0,
                    kind: MutationKindDoc::Change,
                    source_index: None,
                    target_index: None,
                    tandem: None,
                    count_bases: Some(1),
                    bases: None,
                    transversion_likelihood: Some(0.5),
                }],
            }],
        };
        let json = serde_json::to_string(&doc).unwrap();
        let back: PlanDoc = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }
}
