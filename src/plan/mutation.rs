//! Mutation templates and their concretization into applyable mutations.
//!
//! A `<mutations><mutation>` element is a partial template: some fields
//! (target/source offset, base count, literal bases) may be omitted and are
//! filled in from the plan's `IRandom` within the step's allowed index
//! range. An *exhaustive* step instead enumerates every legal
//! concretization instead of drawing one.

use crate::acid::Base;
use crate::random::IRandom;

/// Which of the five mutation kinds a template/concrete mutation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Copy,
    Change,
    Delete,
    Insert,
    Transpose,
}

/// A step's allowed mutation-target window (`<indexRange>`), already
/// resolved to an absolute `[first, last]` base-offset pair (percentage,
/// gene-range, and Han-stroke-range forms are resolved against the current
/// genome/gene/Han by the caller before mutation generation runs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    pub first: usize,
    pub last: usize,
}

impl IndexRange {
    pub fn len(&self) -> usize {
        self.last.saturating_sub(self.first) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }

    pub fn contains(&self, i: usize) -> bool {
        i >= self.first && i <= self.last
    }
}

/// A `<mutations><mutation>` template: a likelihood weight plus the
/// (possibly partial) fields the generator concretizes.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationTemplate {
    pub likelihood: f64,
    pub kind: MutationKind,
    pub source_index: Option<usize>,
    pub target_index: Option<usize>,
    pub tandem: bool,
    pub count_bases: Option<usize>,
    pub bases: Option<String>,
    pub transversion_likelihood: f64,
}

/// A single gene's target (for attributing the mutation in a modification
/// record) plus its current base range, used to pick an in-gene offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneWindow {
    pub gene_id: usize,
    pub base_first: usize,
    pub base_last: usize,
}

/// A fully concretized mutation, ready to apply to a `Genome`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConcreteMutation {
    Change {
        gene: usize,
        target: usize,
        bases: String,
    },
    Copy {
        gene: usize,
        source: usize,
        target: usize,
        length: usize,
    },
    Delete {
        gene: usize,
        target: usize,
        length: usize,
    },
    Insert {
        gene: usize,
        target: usize,
        bases: String,
    },
    Transpose {
        gene_source: usize,
        gene_target: usize,
        source: usize,
        target: usize,
        length: usize,
    },
}

impl ConcreteMutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            ConcreteMutation::Change { .. } => MutationKind::Change,
            ConcreteMutation::Copy { .. } => MutationKind::Copy,
            ConcreteMutation::Delete { .. } => MutationKind::Delete,
            ConcreteMutation::Insert { .. } => MutationKind::Insert,
            ConcreteMutation::Transpose { .. } => MutationKind::Transpose,
        }
    }
}

/// Draws `count` random bases. When `prior` is given, each base is drawn as
/// a transversion (purine <-> pyrimidine: A/G <-> C/T) with probability
/// `transversion_likelihood`, else a transition (same class, different
/// base) — mirroring the template's `transversionLikelihood` knob.
fn random_bases(rng: &mut dyn IRandom, count: usize, prior: Option<&str>, transversion_likelihood: f64) -> String {
    let prior_bytes: Vec<char> = prior.map(|s| s.chars().collect()).unwrap_or_default();
    (0..count)
        .map(|i| {
            if let Some(&from) = prior_bytes.get(i) {
                random_base_related_to(rng, from, transversion_likelihood)
            } else {
                random_base(rng)
            }
        })
        .collect()
}

fn random_base(rng: &mut dyn IRandom) -> char {
    match rng.uniform_int(0, 3) {
        0 => 'T',
        1 => 'C',
        2 => 'A',
        _ => 'G',
    }
}

fn is_purine(b: char) -> bool {
    matches!(b, 'A' | 'G')
}

fn random_base_related_to(rng: &mut dyn IRandom, from: char, transversion_likelihood: f64) -> char {
    let transversion = rng.uniform() < transversion_likelihood;
    let from_purine = is_purine(from);
    let want_purine = from_purine != transversion;
    let candidates: &[char] = match (want_purine, from) {
        (true, _) => &['A', 'G'],
        (false, _) => &['T', 'C'],
    };
    let candidates: Vec<char> = candidates.iter().copied().filter(|&b| b != from).collect();
    if candidates.is_empty() {
        return from;
    }
    let pick = rng.uniform_int(0, candidates.len() as i64 - 1) as usize;
    candidates[pick]
}

/// Draws one concrete mutation from `template`, choosing any omitted
/// offsets uniformly within `range` and, for `gene`'s-relative offsets,
/// within the gene's current base window.
pub fn concretize(
    template: &MutationTemplate,
    gene: GeneWindow,
    range: IndexRange,
    bases_len: usize,
    rng: &mut dyn IRandom,
) -> Option<ConcreteMutation> {
    if range.is_empty() {
        return None;
    }
    let draw_offset = |rng: &mut dyn IRandom, explicit: Option<usize>| -> usize {
        explicit.unwrap_or_else(|| rng.uniform_int(range.first as i64, range.last as i64) as usize)
    };

    match template.kind {
        MutationKind::Change => {
            let target = draw_offset(rng, template.target_index).min(bases_len.saturating_sub(1));
            let count = template.count_bases.unwrap_or(1).min(bases_len.saturating_sub(target));
            if count == 0 {
                return None;
            }
            let bases = template
                .bases
                .clone()
                .unwrap_or_else(|| random_bases(rng, count, None, template.transversion_likelihood));
            Some(ConcreteMutation::Change {
                gene: gene.gene_id,
                target,
                bases,
            })
        }
        MutationKind::Insert => {
            let target = draw_offset(rng, template.target_index).min(bases_len);
            let count = template.count_bases.unwrap_or(3).max(1);
            let bases = template
                .bases
                .clone()
                .unwrap_or_else(|| random_bases(rng, count, None, template.transversion_likelihood));
            Some(ConcreteMutation::Insert {
                gene: gene.gene_id,
                target,
                bases,
            })
        }
        MutationKind::Delete => {
            let target = draw_offset(rng, template.target_index).min(bases_len.saturating_sub(1));
            let count = template.count_bases.unwrap_or(3).min(bases_len.saturating_sub(target)).max(1);
            Some(ConcreteMutation::Delete {
                gene: gene.gene_id,
                target,
                length: count,
            })
        }
        MutationKind::Copy => {
            let source = draw_offset(rng, template.source_index).min(bases_len.saturating_sub(1));
            let count = template.count_bases.unwrap_or(3).min(bases_len.saturating_sub(source)).max(1);
            let target = if template.tandem {
                source + count
            } else {
                draw_offset(rng, template.target_index).min(bases_len)
            };
            Some(ConcreteMutation::Copy {
                gene: gene.gene_id,
                source,
                target,
                length: count,
            })
        }
        MutationKind::Transpose => {
            let source = draw_offset(rng, template.source_index).min(bases_len.saturating_sub(1));
            let count = template.count_bases.unwrap_or(3).min(bases_len.saturating_sub(source)).max(1);
            let target = draw_offset(rng, template.target_index).min(bases_len);
            Some(ConcreteMutation::Transpose {
                gene_source: gene.gene_id,
                gene_target: gene.gene_id,
                source,
                target,
                length: count,
            })
        }
    }
}

/// Enumerates every legal single-base `Change` concretization within
/// `range` using the full `{T,C,A,G}` alphabet, for an exhaustive step.
/// Only `Change` with `count_bases == 1` and no explicit `bases`/offsets is
/// supported exhaustively — other kinds/templates are skipped, since the
/// space of copy/insert/delete/transpose offsets × lengths × base content is
/// unbounded without further constraints the plan document does not supply.
pub fn enumerate_exhaustive(template: &MutationTemplate, gene: GeneWindow, range: IndexRange) -> Vec<ConcreteMutation> {
    if template.kind != MutationKind::Change
        || template.count_bases.unwrap_or(1) != 1
        || template.bases.is_some()
        || template.target_index.is_some()
        || range.is_empty()
    {
        return Vec::new();
    }
    let mut out = Vec::new();
    for offset in range.first..=range.last {
        for base in [Base::T, Base::C, Base::A, Base::G] {
            out.push(ConcreteMutation::Change {
                gene: gene.gene_id,
                target: offset,
                bases: base.to_char().to_string(),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SystemRandom;

    fn window() -> GeneWindow {
        GeneWindow {
            gene_id: 1,
            base_first: 0,
            base_last: 8,
        }
    }

    #[test]
    fn concretize_change_uses_explicit_bases_when_given() {
        let template = MutationTemplate {
            likelihood: 1.0,
            kind: MutationKind::Change,
            source_index: None,
            target_index: Some(3),
            tandem: false,
            count_bases: Some(3),
            bases: Some("GGG".into()),
            transversion_likelihood: 0.5,
        };
        let mut rng = SystemRandom::from_seed("1 2").unwrap();
        let m = concretize(&template, window(), IndexRange { first: 0, last: 8 }, 9, &mut rng).unwrap();
        assert_eq!(
            m,
            ConcreteMutation::Change {
                gene: 1,
                target: 3,
                bases: "GGG".into(),
            }
        );
    }

    #[test]
    fn concretize_insert_draws_target_within_range() {
        let template = MutationTemplate {
            likelihood: 1.0,
            kind: MutationKind::Insert,
            source_index: None,
            target_index: None,
            tandem: false,
            count_bases: Some(3),
            bases: Some("CCC".into()),
            transversion_likelihood: 0.5,
        };
        let mut rng = SystemRandom::from_seed("7 9").unwrap();
        let m = concretize(&template, window(), IndexRange { first: 2, last: 4 }, 9, &mut rng).unwrap();
        match m {
            ConcreteMutation::Insert { target, .. } => assert!((2..=4).contains(&target)),
            _ => panic!("expected Insert"),
        }
    }

    #[test]
    fn tandem_copy_targets_immediately_after_source() {
        let template = MutationTemplate {
            likelihood: 1.0,
            kind: MutationKind::Copy,
            source_index: Some(0),
            target_index: None,
            tandem: true,
            count_bases: Some(3),
            bases: None,
            transversion_likelihood: 0.5,
        };
        let mut rng = SystemRandom::from_seed("1 1").unwrap();
        let m = concretize(&template, window(), IndexRange { first: 0, last: 8 }, 9, &mut rng).unwrap();
        assert_eq!(
            m,
            ConcreteMutation::Copy {
                gene: 1,
                source: 0,
                target: 3,
                length: 3,
            }
        );
    }

    #[test]
    fn exhaustive_enumeration_covers_every_offset_and_base() {
        let template = MutationTemplate {
            likelihood: 1.0,
            kind: MutationKind::Change,
            source_index: None,
            target_index: None,
            tandem: false,
            count_bases: Some(1),
            bases: None,
            transversion_likelihood: 0.5,
        };
        let all = enumerate_exhaustive(&template, window(), IndexRange { first: 3, last: 4 });
        assert_eq!(all.len(), 2 * 4);
    }

    #[test]
    fn transversion_always_swaps_purine_pyrimidine_class() {
        let mut rng = SystemRandom::from_seed("3 3").unwrap();
        for _ in 0..20 {
            let b = random_base_related_to(&mut rng, 'A', 1.0);
            assert!(!is_purine(b));
        }
    }

    #[test]
    fn transition_always_keeps_purine_pyrimidine_class() {
        let mut rng = SystemRandom::from_seed("4 4").unwrap();
        for _ in 0..20 {
            let b = random_base_related_to(&mut rng, 'A', 0.0);
            assert!(is_purine(b));
            assert_ne!(b, 'A');
        }
    }
}
