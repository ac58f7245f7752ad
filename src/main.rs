//! Stylus engine CLI.
//!
//! A thin convenience wrapper around the `stylus_engine` library: it reads
//! the `doc` JSON shapes from disk (XML (de)serialization is an
//! out-of-scope collaborator, so this binary speaks JSON instead) and
//! drives `Genome`/`execute_plan` directly. Not part of the scored engine
//! surface.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};

use stylus_engine::acid::{AcidType, Base, CodonTable};
use stylus_engine::doc::{self, ConditionModeDoc, GroupScoreModeDoc, IndexRangeDoc, MutationKindDoc};
use stylus_engine::genome::score::{
    ChannelSetting, GeneChannel, GroupChannel, GroupScoreMode, ScoringGlobals,
};
use stylus_engine::genome::{GeneSpec, Genome};
use stylus_engine::geometry::{Point, Rectangle};
use stylus_engine::han::{HDimensions, HGroup, HOverlap, HPoint, HStroke, Han, HanTable};
use stylus_engine::plan::condition::{ConditionMode, DurationTermination, FitnessTermination, RollbackTermination, TrialCondition, ValueBucket};
use stylus_engine::plan::execute::{execute_plan, IndexRangeKind, Plan, PlanOptions, Step, StepMutation, TerminationConditions, TrialConditions};
use stylus_engine::plan::mutation::MutationKind;
use stylus_engine::random::{IRandom, SystemRandom};

/// Commonly used command line arguments, mirroring the teacher's
/// `common::Args`: just verbosity, flattened into every subcommand.
#[derive(Parser, Debug)]
pub struct CommonArgs {
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Stylus genome-evolution engine",
    long_about = "Drives a Han-glyph genome through compilation, scoring, and plan-directed mutation trials"
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a plan against a genome, recording the trial history.
    Run(RunArgs),
    /// Compile, validate, and score a genome without running a plan.
    Score(ScoreArgs),
    /// Print a single UUIDv4 drawn from the engine's RNG abstraction.
    Uuid(UuidArgs),
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Path to a genome document (JSON, the `doc::GenomeDoc` shape).
    genome: PathBuf,
    /// Path to a plan document (JSON, the `doc::PlanDoc` shape).
    plan: PathBuf,
    /// Path to one or more Han glyph documents (JSON, `doc::HanDoc`).
    #[arg(long = "han", required = true)]
    han: Vec<PathBuf>,
    /// Path to a globals document (JSON, `doc::GlobalsDoc`); defaults when omitted.
    #[arg(long)]
    globals: Option<PathBuf>,
    /// Number of trials to run.
    #[arg(long, default_value_t = 100)]
    trials: usize,
    /// Emit a status line every N trials.
    #[arg(long = "record-rate", default_value_t = 10)]
    record_rate: usize,
}

#[derive(Debug, Parser)]
struct ScoreArgs {
    genome: PathBuf,
    #[arg(long = "han", required = true)]
    han: Vec<PathBuf>,
    #[arg(long)]
    globals: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct UuidArgs {
    /// Seed (quoted phrase, or two whitespace-separated integers).
    #[arg(long, default_value = "1 1")]
    seed: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let collector = tracing_subscriber::fmt()
        .with_target(true)
        .with_max_level(match cli.common.verbose.log_level() {
            Some(level) => match level {
                log::Level::Error => tracing::Level::ERROR,
                log::Level::Warn => tracing::Level::WARN,
                log::Level::Info => tracing::Level::INFO,
                log::Level::Debug => tracing::Level::DEBUG,
                log::Level::Trace => tracing::Level::TRACE,
            },
            None => tracing::Level::INFO,
        })
        .compact()
        .finish();

    tracing::subscriber::with_default(collector, || match &cli.command {
        Commands::Run(args) => run_plan(args),
        Commands::Score(args) => run_score(args),
        Commands::Uuid(args) => run_uuid(args),
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = fs::read_to_string(path).map_err(|e| anyhow::anyhow!("reading {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| anyhow::anyhow!("parsing {}: {e}", path.display()))
}

fn run_uuid(args: &UuidArgs) -> anyhow::Result<()> {
    let mut rng = SystemRandom::from_seed(&args.seed)?;
    println!("{}", rng.uuid_v4());
    Ok(())
}

fn run_score(args: &ScoreArgs) -> anyhow::Result<()> {
    let genome_doc: doc::GenomeDoc = read_json(&args.genome)?;
    let han_table = load_han_table(&args.han)?;
    let globals = load_globals(args.globals.as_deref())?;

    let mut genome = Genome::new();
    load_genome_doc(&mut genome, &genome_doc)?;
    genome.validate_against_han(&han_table)?;
    let score = genome.score(&han_table, &globals)?;

    tracing::info!(score, "scored genome");
    println!("score = {score:.6}");
    Ok(())
}

fn run_plan(args: &RunArgs) -> anyhow::Result<()> {
    let genome_doc: doc::GenomeDoc = read_json(&args.genome)?;
    let plan_doc: doc::PlanDoc = read_json(&args.plan)?;
    let han_table = load_han_table(&args.han)?;
    let globals = load_globals(args.globals.as_deref())?;
    let plan = convert_plan(&plan_doc);

    let mut genome = Genome::new();
    load_genome_doc(&mut genome, &genome_doc)?;
    genome.validate_against_han(&han_table)?;
    genome.score(&han_table, &globals)?;

    let seed = genome_doc
        .seed
        .as_ref()
        .map(|s| s.content.clone())
        .unwrap_or_else(|| "1 1".to_string());
    let mut rng = SystemRandom::from_seed(&seed)?;

    let record_rate = args.record_rate.max(1);
    let mut status = move |g: &Genome| -> bool {
        if g.trial() % record_rate == 0 {
            tracing::info!(trial = g.trial(), score = g.statistics().score, "trial status");
        }
        true
    };

    let result = execute_plan(&mut genome, &han_table, &globals, &plan, &mut rng, genome.trial(), args.trials, Some(&mut status), record_rate);

    match result {
        Ok(()) => {
            tracing::info!(trial = genome.trial(), "plan completed");
            Ok(())
        }
        Err(stylus_engine::EngineError::Plan { termination, reason, message }) => {
            tracing::warn!(?termination, ?reason, message, "plan terminated");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn load_genome_doc(genome: &mut Genome, doc: &doc::GenomeDoc) -> anyhow::Result<()> {
    let codon_table = doc.codon_table.as_ref().map(convert_codon_table).transpose()?;
    let specs: Vec<GeneSpec> = doc
        .genes
        .iter()
        .map(|g| GeneSpec {
            base_first: g.base_first,
            base_last: g.base_last,
            han_unicode: g.han_unicode.clone(),
        })
        .collect();
    genome.set_genome(doc.uuid.clone(), doc.bases.clone(), &specs, doc.author.clone(), codon_table)?;
    genome.uuid = doc.uuid.clone();
    genome.strain = doc.strain.clone();
    genome.ancestors = doc.ancestors.clone();
    Ok(())
}

fn convert_codon_table(doc: &doc::CodonTableDoc) -> anyhow::Result<CodonTable> {
    let mut overrides = Vec::with_capacity(doc.overrides.len());
    for entry in &doc.overrides {
        let codon: Vec<char> = entry.codon.chars().collect();
        if codon.len() != 3 {
            anyhow::bail!("codon override {:?} is not 3 bases", entry.codon);
        }
        let bases: Vec<Base> = codon
            .iter()
            .map(|&c| Base::from_char(c).ok_or_else(|| anyhow::anyhow!("invalid base {c:?} in codon override")))
            .collect::<anyhow::Result<_>>()?;
        let index = stylus_engine::acid::codon_index(bases[0], bases[1], bases[2]);
        let acid = AcidType::from_name(&entry.acid)
            .ok_or_else(|| anyhow::anyhow!("unknown acid name {:?}", entry.acid))?;
        overrides.push((index, acid));
    }
    Ok(CodonTable::default().with_overrides(&overrides))
}

fn load_han_table(paths: &[PathBuf]) -> anyhow::Result<HanTable> {
    let mut hans = Vec::with_capacity(paths.len());
    for path in paths {
        let doc: doc::HanDoc = read_json(path)?;
        hans.push(convert_han(&doc));
    }
    Ok(HanTable::new(hans))
}

fn convert_han(doc: &doc::HanDoc) -> Han {
    Han {
        uuid: doc.uuid.clone(),
        unicode: doc.unicode.clone(),
        dimensions: HDimensions {
            length: doc.strokes.iter().map(|s| s.length).sum(),
            bounds: convert_bounds(&doc.bounds),
        },
        minimum_stroke_length: doc.minimum_stroke_length,
        strokes: doc.strokes.iter().map(convert_han_stroke).collect(),
        groups: doc.groups.iter().map(convert_han_group).collect(),
        overlaps: doc
            .overlaps
            .iter()
            .map(|o| HOverlap {
                stroke_a: o.first_stroke,
                stroke_b: o.second_stroke,
                required: o.required,
            })
            .collect(),
    }
}

fn convert_bounds(b: &doc::BoundsDoc) -> Rectangle {
    Rectangle::new(b.top, b.left, b.bottom, b.right)
}

fn convert_han_point(p: &doc::HPointDoc) -> HPoint {
    HPoint::new(Point::new(p.x, p.y), p.fractional_distance)
}

fn convert_han_stroke(doc: &doc::HStrokeDoc) -> HStroke {
    HStroke {
        dimensions: HDimensions {
            length: doc.length,
            bounds: convert_bounds(&doc.bounds),
        },
        points_forward: doc.points_forward.iter().map(convert_han_point).collect(),
        points_reverse: doc.points_reverse.iter().map(convert_han_point).collect(),
    }
}

fn convert_han_group(doc: &doc::HGroupDoc) -> HGroup {
    HGroup {
        dimensions: HDimensions::default(),
        weighted_center: Point::new(doc.weighted_center_x, doc.weighted_center_y),
        strokes: doc.strokes.clone(),
    }
}

fn load_globals(path: Option<&Path>) -> anyhow::Result<ScoringGlobals> {
    let Some(path) = path else {
        return Ok(ScoringGlobals::default());
    };
    let doc: doc::GlobalsDoc = read_json(path)?;
    convert_globals(&doc)
}

fn convert_globals(doc: &doc::GlobalsDoc) -> anyhow::Result<ScoringGlobals> {
    let mut globals = ScoringGlobals::default();
    for entry in &doc.group_channels {
        let channel = match entry.channel.as_str() {
            "scale" => GroupChannel::Scale,
            "placement" => GroupChannel::Placement,
            "illegalOverlaps" => GroupChannel::IllegalOverlaps,
            "deviation" => GroupChannel::Deviation,
            "extraLength" => GroupChannel::ExtraLength,
            "missingOverlaps" => GroupChannel::MissingOverlaps,
            "dropouts" => GroupChannel::Dropouts,
            other => anyhow::bail!("unknown group channel {other:?}"),
        };
        globals
            .group_channels
            .insert(channel, ChannelSetting::new(entry.weight, entry.setpoint));
    }
    for entry in &doc.gene_channels {
        let channel = match entry.channel.as_str() {
            "scale" => GeneChannel::Scale,
            "placement" => GeneChannel::Placement,
            "illegalOverlaps" => GeneChannel::IllegalOverlaps,
            "missingOverlaps" => GeneChannel::MissingOverlaps,
            "marks" => GeneChannel::Marks,
            other => anyhow::bail!("unknown gene channel {other:?}"),
        };
        globals
            .gene_channels
            .insert(channel, ChannelSetting::new(entry.weight, entry.setpoint));
    }
    globals.group_score_mode = match doc.group_score_mode {
        GroupScoreModeDoc::Average => GroupScoreMode::Average,
        GroupScoreModeDoc::Minimum => GroupScoreMode::Minimum,
    };
    Ok(globals)
}

fn convert_condition_mode(mode: ConditionModeDoc) -> ConditionMode {
    match mode {
        ConditionModeDoc::Decrease => ConditionMode::Decrease,
        ConditionModeDoc::Increase => ConditionMode::Increase,
        ConditionModeDoc::Maintain => ConditionMode::Maintain,
    }
}

fn convert_trial_condition(doc: &doc::TrialConditionDoc) -> TrialCondition {
    TrialCondition::new(
        convert_condition_mode(doc.mode),
        doc.value
            .iter()
            .map(|v| ValueBucket {
                likelihood: v.likelihood,
                value: v.value,
                factor: v.factor,
            })
            .collect(),
    )
}

fn convert_trial_conditions(doc: &doc::TrialConditionsDoc) -> TrialConditions {
    TrialConditions {
        cost: doc.cost.as_ref().map(convert_trial_condition),
        fitness: doc.fitness.as_ref().map(convert_trial_condition),
        score: doc.score.as_ref().map(convert_trial_condition),
        mutations_per_attempt: doc.mutation.mutations_per_attempt.clone(),
        exhaustive: doc.mutation.exhaustive,
    }
}

fn convert_index_range(doc: &IndexRangeDoc) -> IndexRangeKind {
    match *doc {
        IndexRangeDoc::Absolute { first, last } => IndexRangeKind::Absolute { first, last },
        IndexRangeDoc::Percentage { first, last } => IndexRangeKind::Percentage { first, last },
        IndexRangeDoc::GeneRange { first, last } => IndexRangeKind::GeneRange { first, last },
        IndexRangeDoc::HanStrokeRange { first, last } => IndexRangeKind::HanStrokeRange { first, last },
    }
}

fn convert_mutation_kind(kind: MutationKindDoc) -> MutationKind {
    match kind {
        MutationKindDoc::Copy => MutationKind::Copy,
        MutationKindDoc::Change => MutationKind::Change,
        MutationKindDoc::Delete => MutationKind::Delete,
        MutationKindDoc::Insert => MutationKind::Insert,
        MutationKindDoc::Transpose => MutationKind::Transpose,
    }
}

fn convert_mutation_template(doc: &doc::MutationTemplateDoc) -> StepMutation {
    StepMutation {
        likelihood: doc.likelihood,
        template: stylus_engine::plan::mutation::MutationTemplate {
            likelihood: doc.likelihood,
            kind: convert_mutation_kind(doc.kind),
            source_index: doc.source_index,
            target_index: doc.target_index,
            tandem: doc.tandem.unwrap_or(false),
            count_bases: doc.count_bases,
            bases: doc.bases.clone(),
            transversion_likelihood: doc.transversion_likelihood.unwrap_or(0.5),
        },
    }
}

fn convert_step(doc: &doc::StepDoc) -> Step {
    Step {
        trials: doc.trials,
        delta_index: doc.delta_index,
        index_range: convert_index_range(&doc.index_range),
        trial_conditions: convert_trial_conditions(&doc.trial_conditions),
        mutations: doc.mutations.iter().map(convert_mutation_template).collect(),
    }
}

fn convert_plan(doc: &doc::PlanDoc) -> Plan {
    Plan {
        options: PlanOptions {
            accumulate_mutations: doc.options.accumulate_mutations,
            preserve_genes: doc.options.preserve_genes,
            ensure_in_frame: doc.options.ensure_in_frame,
            ensure_whole_codons: doc.options.ensure_whole_codons,
            reject_silent: doc.options.reject_silent,
        },
        termination: TerminationConditions {
            duration: DurationTermination {
                max_trials: doc.termination_conditions.duration.trials,
                max_attempts: doc.termination_conditions.duration.attempts,
            },
            rollback: RollbackTermination {
                max_rollbacks_per_trial: doc.termination_conditions.rollback_limit,
            },
            fitness: FitnessTermination {
                minimum: doc.termination_conditions.fitness.minimum,
                maximum: doc.termination_conditions.fitness.maximum,
            },
        },
        trial_conditions: convert_trial_conditions(&doc.trial_conditions),
        steps: doc.steps.iter().map(convert_step).collect(),
    }
}
