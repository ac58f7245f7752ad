//! Maps a gene's structurally-delimited strokes onto a Han definition's
//! strokes and groups.
//!
//! Per the data model, a gene is alive only once its *non-mark* strokes map
//! 1:1 onto the Han's strokes, in order; mark classification depends on an
//! initial gene-wide scale estimate (short strokes below the Han's
//! `minimum_stroke_length`, once scaled, contribute only to the gene-level
//! `MARKS` channel and are excluded from the 1:1 mapping).

use crate::err::{EngineError, Result};
use crate::genome::compile::{Gene, GeneGroup, Scale};
use crate::genome::measure::is_mark;
use crate::genome::{GenomeReason, GenomeTermination};
use crate::geometry::{ApproxEq, Rectangle};
use crate::han::Han;

/// A first-pass, whole-gene scale estimate used only to decide which
/// structural strokes are marks before the real per-stroke/group/gene
/// scales are computed in `measure`. Computed the same way a stroke's scale
/// is (Han bounds over gene bounds), just at gene granularity.
fn initial_scale_estimate(gene: &Gene, han: &Han) -> Scale {
    let rect = Rectangle::from_points(&gene.points);
    let gene_width = rect.width();
    let gene_height = rect.height();
    let han_width = han.bounds().width();
    let han_height = han.bounds().height();

    let sx = if gene_width.approx_zero() { 1.0 } else { han_width / gene_width };
    let sy = if gene_height.approx_zero() { 1.0 } else { han_height / gene_height };
    Scale::new(sx, sy)
}

/// Assigns each of the gene's non-mark structural strokes to a Han stroke
/// index (in order) and builds `gene.groups` from the Han's group
/// membership. Fails with `STGR_STROKES` if the non-mark stroke count does
/// not equal the Han's stroke count.
pub fn assign_han_mapping(gene: &mut Gene, han: &Han) -> Result<()> {
    let estimate = initial_scale_estimate(gene, han);

    for stroke in &mut gene.strokes {
        stroke.is_mark = is_mark(&gene.acids, stroke, estimate, han.minimum_stroke_length);
        stroke.han_stroke = None;
        stroke.group = None;
    }

    let non_mark_count = gene.strokes.iter().filter(|s| !s.is_mark).count();
    if non_mark_count != han.stroke_count() {
        return Err(EngineError::Plan {
            termination: GenomeTermination::Validation,
            reason: GenomeReason::Strokes,
            message: format!(
                "gene {} has {} non-mark strokes, Han {} requires {}",
                gene.id,
                non_mark_count,
                han.unicode,
                han.stroke_count()
            ),
        });
    }

    let mut han_index = 0usize;
    for (stroke_index, stroke) in gene.strokes.iter_mut().enumerate() {
        if stroke.is_mark {
            continue;
        }
        stroke.han_stroke = Some(han_index);
        stroke.group = han.map_stroke_to_group(han_index).map(|_| han_index);
        let _ = stroke_index;
        han_index += 1;
    }

    gene.groups.clear();
    for (group_index, han_group) in han.groups.iter().enumerate() {
        let strokes: Vec<usize> = gene
            .strokes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.han_stroke.map(|h| han_group.strokes.contains(&h)).unwrap_or(false))
            .map(|(i, _)| i)
            .collect();
        gene.groups.push(GeneGroup {
            han_group: group_index,
            strokes,
        });
    }

    gene.scale = estimate;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acid::CodonTable;
    use crate::genome::compile::compile_gene;
    use crate::geometry::Point;
    use crate::han::{HDimensions, HGroup, HPoint, HStroke};

    fn one_stroke_han() -> Han {
        Han {
            uuid: "11111111-1111-4111-8111-111111111111".into(),
            unicode: "U+4E00".into(),
            dimensions: HDimensions {
                length: 18.0,
                bounds: Rectangle::new(0.0, 0.0, 0.0, 18.0),
            },
            minimum_stroke_length: 1.0,
            strokes: vec![HStroke {
                dimensions: HDimensions {
                    length: 18.0,
                    bounds: Rectangle::new(0.0, 0.0, 0.0, 18.0),
                },
                points_forward: vec![HPoint::new(Point::new(0.0, 0.0), 0.0), HPoint::new(Point::new(18.0, 0.0), 1.0)],
                points_reverse: vec![HPoint::new(Point::new(18.0, 0.0), 0.0), HPoint::new(Point::new(0.0, 0.0), 1.0)],
            }],
            groups: vec![HGroup {
                dimensions: HDimensions::default(),
                weighted_center: Point::new(9.0, 0.0),
                strokes: vec![0],
            }],
            overlaps: vec![],
        }
    }

    #[test]
    fn single_stroke_gene_maps_onto_single_han_stroke() {
        let table = CodonTable::default();
        // ATG + one non-stop codon + TAA: a single acid never breaks into
        // more than one stroke, regardless of which acid it decodes to.
        let mut gene = compile_gene(1, "ATGGACTAA", &table, 0, 8, "U+4E00".into()).unwrap();
        let han = one_stroke_han();
        assign_han_mapping(&mut gene, &han).unwrap();
        assert_eq!(gene.strokes.len(), 1);
        assert_eq!(gene.strokes[0].han_stroke, Some(0));
        assert_eq!(gene.groups.len(), 1);
        assert_eq!(gene.groups[0].strokes, vec![0]);
    }

    #[test]
    fn stroke_count_mismatch_is_rejected() {
        let table = CodonTable::default();
        let mut gene = compile_gene(1, "ATGGACTAA", &table, 0, 8, "U+4E00".into()).unwrap();
        let mut han = one_stroke_han();
        han.strokes.push(han.strokes[0].clone());
        let err = assign_han_mapping(&mut gene, &han).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Plan {
                reason: GenomeReason::Strokes,
                ..
            }
        ));
    }
}
