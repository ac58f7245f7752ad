//! Scale, placement, and deviation measurement: comparing a gene's compiled
//! strokes against their mapped Han strokes.

use crate::acid::AcidType;
use crate::err::{EngineError, Result};
use crate::genome::compile::{Scale, ScaledLength, Stroke};
use crate::genome::{GenomeReason, GenomeTermination};
use crate::geometry::{ApproxEq, Point, Rectangle};
use crate::han::HStroke;

/// Bounding rectangle of the gene points spanning a stroke's acid range
/// (points are 1 longer than acids, so the stroke's rectangle is built
/// from `points[start ..= end]`).
pub fn stroke_bounds(points: &[Point], stroke: &Stroke) -> Rectangle {
    let slice = &points[stroke.acids.start()..=stroke.acids.end()];
    Rectangle::from_points(slice)
}

/// Computes a stroke's scale-to-Han triple, inheriting degenerate
/// dimensions from the parent gene scale and flagging which dimensions
/// were inherited (so the group scale-consistency penalty can exclude
/// them).
pub fn measure_stroke_scale(
    gene_rect: &Rectangle,
    han_stroke: &HStroke,
    parent_scale: Scale,
) -> (Scale, bool, bool) {
    let gene_width = gene_rect.width();
    let gene_height = gene_rect.height();
    let han_width = han_stroke.bounds().width();
    let han_height = han_stroke.bounds().height();

    let (sx, inherited_x) = if gene_width.approx_zero() {
        (parent_scale.sx, true)
    } else {
        (han_width / gene_width, false)
    };
    let (sy, inherited_y) = if gene_height.approx_zero() {
        (parent_scale.sy, true)
    } else {
        (han_height / gene_height, false)
    };

    (Scale::new(sx, sy), inherited_x, inherited_y)
}

/// Centers the scaled gene-stroke bounding box on the Han stroke's
/// bounding box center.
pub fn measure_translation(gene_rect: &Rectangle, han_stroke: &HStroke, scale: Scale) -> (f64, f64) {
    let scaled_center = gene_rect.center().scale(scale.sx, scale.sy);
    let han_center = han_stroke.bounds().center();
    (han_center.x - scaled_center.x, han_center.y - scaled_center.y)
}

/// Weighted average of contained stroke scales, weighted by each mapped
/// Han stroke's length.
pub fn measure_group_scale(members: &[(Scale, f64)]) -> Scale {
    weighted_scale(members)
}

/// Weighted average of group scales, weighted by total contained Han
/// stroke length per group.
pub fn measure_gene_scale(groups: &[(Scale, f64)]) -> Scale {
    weighted_scale(groups)
}

fn weighted_scale(members: &[(Scale, f64)]) -> Scale {
    let total_weight: f64 = members.iter().map(|(_, w)| w).sum();
    if total_weight.approx_zero() {
        return Scale::IDENTITY;
    }
    let sx = members.iter().map(|(s, w)| s.sx * w).sum::<f64>() / total_weight;
    let sy = members.iter().map(|(s, w)| s.sy * w).sum::<f64>() / total_weight;
    Scale::new(sx, sy)
}

/// Weighted average of contained stroke translations, weighted by each
/// mapped Han stroke's length.
pub fn measure_group_translation(members: &[((f64, f64), f64)]) -> (f64, f64) {
    weighted_translation(members)
}

/// Weighted average of group translations, weighted by total contained
/// Han stroke length per group.
pub fn measure_gene_translation(groups: &[((f64, f64), f64)]) -> (f64, f64) {
    weighted_translation(groups)
}

fn weighted_translation(members: &[((f64, f64), f64)]) -> (f64, f64) {
    let total_weight: f64 = members.iter().map(|(_, w)| w).sum();
    if total_weight.approx_zero() {
        return (0.0, 0.0);
    }
    let dx = members.iter().map(|(t, w)| t.0 * w).sum::<f64>() / total_weight;
    let dy = members.iter().map(|(t, w)| t.1 * w).sum::<f64>() / total_weight;
    (dx, dy)
}

fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator.approx_zero() {
        0.0
    } else {
        numerator / denominator
    }
}

/// One stroke's contribution to its group's scale/placement consistency
/// exponents: its own measured scale/translation plus the mapped Han
/// stroke's width/height/length to weight it by.
pub struct StrokeConsistency<'a> {
    pub stroke: &'a Stroke,
    pub han_stroke: &'a HStroke,
}

/// A group's measured consistency exponents (`Group::calcScore`): how far
/// its member strokes' scale and translation spread around the group's
/// own aggregate, plus the group's mean deviation and extra length.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupConsistency {
    pub scale: f64,
    pub placement: f64,
    pub deviation: f64,
    pub extra_length: f64,
}

/// Computes a group's `SCALE`/`PLACEMENT`/`DEVIATION`/`EXTRA_LENGTH`
/// exponents from its member strokes, mirroring `Group::calcScore`: scale
/// variance is weighted by each Han stroke's width/height and skips
/// dimensions a stroke inherited; placement variance and the deviation/
/// extra-length means are weighted by Han stroke length and normalized by
/// the Han group's own bounds and total length respectively.
pub fn measure_group_consistency(
    members: &[StrokeConsistency],
    group_scale: Scale,
    group_translation: (f64, f64),
    han_group_bounds: &Rectangle,
) -> GroupConsistency {
    let mut dsx = 0.0;
    let mut nx = 0.0;
    let mut dsy = 0.0;
    let mut ny = 0.0;
    let mut d_place = 0.0;
    let mut deviation_sum = 0.0;
    let mut extra_sum = 0.0;
    let mut total_length = 0.0;

    for m in members {
        let han_length = m.han_stroke.length();
        total_length += han_length;

        let ddx = group_translation.0 - m.stroke.translation.0;
        let ddy = group_translation.1 - m.stroke.translation.1;
        d_place += han_length * (ddx * ddx + ddy * ddy);

        deviation_sum += m.stroke.deviation;
        extra_sum += m.stroke.extra_length;

        if !m.stroke.inherited_x {
            let width = m.han_stroke.bounds().width();
            let d = group_scale.sx - m.stroke.scale.sx;
            dsx += width * d * d;
            nx += width;
        }
        if !m.stroke.inherited_y {
            let height = m.han_stroke.bounds().height();
            let d = group_scale.sy - m.stroke.scale.sy;
            dsy += height * d * d;
            ny += height;
        }
    }

    if nx > 0.0 {
        dsx /= nx;
    }
    if ny > 0.0 {
        dsy /= ny;
    }
    let scale = safe_ratio(dsx.sqrt(), group_scale.sx) + safe_ratio(dsy.sqrt(), group_scale.sy);

    if total_length.approx_zero() {
        return GroupConsistency {
            scale,
            placement: 0.0,
            deviation: 0.0,
            extra_length: 0.0,
        };
    }

    let bounds_norm = han_group_bounds.width() + han_group_bounds.height();
    let placement = safe_ratio((d_place / total_length).sqrt(), bounds_norm);
    let deviation = deviation_sum / total_length;
    let extra_length = extra_sum / total_length;

    GroupConsistency {
        scale,
        placement,
        deviation,
        extra_length,
    }
}

/// One group's contribution to its gene's scale/placement consistency
/// exponents: its own aggregate scale/translation, whether each dimension
/// was wholly inherited from its members, and the Han group's own
/// width/height/length to weight it by.
#[derive(Debug, Clone, Copy)]
pub struct GroupAggregate {
    pub scale: Scale,
    pub translation: (f64, f64),
    pub inherited_x: bool,
    pub inherited_y: bool,
    pub han_width: f64,
    pub han_height: f64,
    pub han_length: f64,
}

/// A gene's measured `SCALE`/`PLACEMENT` consistency exponents
/// (`Gene::calcScore`), the same formula as `measure_group_consistency`
/// one level up: groups replace strokes, and the whole Han's bounds and
/// length replace the Han group's.
pub fn measure_gene_consistency(
    members: &[GroupAggregate],
    gene_scale: Scale,
    gene_translation: (f64, f64),
    han_bounds: &Rectangle,
    han_length: f64,
) -> (f64, f64) {
    let mut dsx = 0.0;
    let mut nx = 0.0;
    let mut dsy = 0.0;
    let mut ny = 0.0;
    let mut d_place = 0.0;

    for m in members {
        let ddx = gene_translation.0 - m.translation.0;
        let ddy = gene_translation.1 - m.translation.1;
        d_place += m.han_length * (ddx * ddx + ddy * ddy);

        if !m.inherited_x {
            let d = gene_scale.sx - m.scale.sx;
            dsx += m.han_width * d * d;
            nx += m.han_width;
        }
        if !m.inherited_y {
            let d = gene_scale.sy - m.scale.sy;
            dsy += m.han_height * d * d;
            ny += m.han_height;
        }
    }

    if nx > 0.0 {
        dsx /= nx;
    }
    if ny > 0.0 {
        dsy /= ny;
    }
    let scale = safe_ratio(dsx.sqrt(), gene_scale.sx) + safe_ratio(dsy.sqrt(), gene_scale.sy);

    let placement = if han_length.approx_zero() {
        0.0
    } else {
        let norm = han_bounds.width() + han_bounds.height();
        safe_ratio((d_place / han_length).sqrt(), norm)
    };

    (scale, placement)
}

fn transform(point: Point, scale: Scale, translation: (f64, f64)) -> Point {
    point.scale(scale.sx, scale.sy).translate(translation.0, translation.1)
}

/// Squared perpendicular distance from `point` to the closest segment of
/// `polyline`.
fn squared_distance_to_polyline(point: Point, polyline: &[Point]) -> f64 {
    polyline
        .windows(2)
        .map(|seg| squared_distance_to_segment(point, seg[0], seg[1]))
        .fold(f64::INFINITY, f64::min)
}

fn squared_distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq.approx_zero() {
        return p.square_deviation_from(&a);
    }
    let t = (((p.x - a.x) * ab.x) + ((p.y - a.y) * ab.y)) / len_sq;
    let t_clamped = t.clamp(0.0, 1.0);
    let closest = Point::new(a.x + ab.x * t_clamped, a.y + ab.y * t_clamped);
    p.square_deviation_from(&closest)
}

/// Result of measuring one stroke's orientation, deviation, and extra
/// length against its mapped Han stroke.
pub struct StrokeMeasurement {
    pub scale: Scale,
    pub translation: (f64, f64),
    pub reversed: bool,
    pub deviation: f64,
    pub extra_length: f64,
    pub dropout: usize,
    pub inherited_x: bool,
    pub inherited_y: bool,
}

/// Measures a single stroke: scale, translation, orientation, deviation,
/// and extra length relative to `han_stroke`.
pub fn measure_stroke(
    points: &[Point],
    acids: &[AcidType],
    stroke: &Stroke,
    han_stroke: &HStroke,
    parent_scale: Scale,
) -> Result<StrokeMeasurement> {
    let gene_rect = stroke_bounds(points, stroke);
    let (scale, inherited_x, inherited_y) = measure_stroke_scale(&gene_rect, han_stroke, parent_scale);
    let translation = measure_translation(&gene_rect, han_stroke, scale);

    let start = stroke.acids.start();
    let end = stroke.acids.end();
    let gene_points: Vec<Point> = points[start..=end]
        .iter()
        .map(|p| transform(*p, scale, translation))
        .collect();

    if gene_points.is_empty() || han_stroke.points_forward.is_empty() {
        return Err(EngineError::Plan {
            termination: GenomeTermination::Validation,
            reason: GenomeReason::Stroke,
            message: "stroke or mapped Han stroke has no points to compare".into(),
        });
    }

    let gene_start = *gene_points.first().unwrap();
    let gene_end = *gene_points.last().unwrap();
    let han_start = han_stroke.start_point();
    let han_end = han_stroke.end_point();

    let forward_dev = gene_start.square_deviation_from(&han_start) + gene_end.square_deviation_from(&han_end);
    let reverse_dev = gene_start.square_deviation_from(&han_end) + gene_end.square_deviation_from(&han_start);
    let reversed = reverse_dev < forward_dev;

    let han_points: Vec<Point> = if reversed {
        han_stroke.points_reverse.iter().map(|hp| hp.point).collect()
    } else {
        han_stroke.points_forward.iter().map(|hp| hp.point).collect()
    };

    let mut max_sq_deviation = 0.0f64;
    for p in &gene_points {
        max_sq_deviation = max_sq_deviation.max(squared_distance_to_polyline(*p, &han_points));
    }
    for p in &han_points {
        max_sq_deviation = max_sq_deviation.max(squared_distance_to_polyline(*p, &gene_points));
    }

    let mut scaled_length = ScaledLength::default();
    for acid in &acids[start..end] {
        scaled_length.accumulate(*acid);
    }
    let gene_length = scaled_length.length(scale);
    let extra_length = (gene_length - han_stroke.length()).max(0.0);

    // A dropout counts Han control points the stroke's own vertices never
    // land near: whenever the Han side of the comparison carries more
    // sampled detail than the gene's acid-vertex polyline, the excess Han
    // points are geometry the stroke passes through without a bend of its
    // own to match.
    let dropout = han_points.len().saturating_sub(gene_points.len());

    Ok(StrokeMeasurement {
        scale,
        translation,
        reversed,
        deviation: max_sq_deviation.sqrt(),
        extra_length,
        dropout,
        inherited_x,
        inherited_y,
    })
}

/// A stroke shorter than the Han's `minimum_stroke_length` (after applying
/// gene scale) is classified as a mark: excluded from stroke scoring and
/// only contributing to the gene-level `MARKS` exponent.
pub fn is_mark(acids: &[AcidType], stroke: &Stroke, gene_scale: Scale, minimum_stroke_length: f64) -> bool {
    let mut scaled_length = ScaledLength::default();
    for acid in &acids[stroke.acids.start()..stroke.acids.end()] {
        scaled_length.accumulate(*acid);
    }
    scaled_length.length(gene_scale) < minimum_stroke_length
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::han::{HDimensions, HPoint};

    fn flat_han_stroke(start: Point, end: Point, length: f64) -> HStroke {
        HStroke {
            dimensions: HDimensions {
                length,
                bounds: Rectangle::from_points(&[start, end]),
            },
            points_forward: vec![HPoint::new(start, 0.0), HPoint::new(end, 1.0)],
            points_reverse: vec![HPoint::new(end, 0.0), HPoint::new(start, 1.0)],
        }
    }

    #[test]
    fn degenerate_dimension_inherits_parent_scale() {
        let gene_rect = Rectangle::new(0.0, 0.0, 0.0, 0.0); // a point: zero width/height
        let han = flat_han_stroke(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 10.0);
        let (scale, inherited_x, inherited_y) = measure_stroke_scale(&gene_rect, &han, Scale::new(2.0, 3.0));
        assert!(inherited_x);
        assert!(inherited_y);
        assert_eq!(scale.sx, 2.0);
        assert_eq!(scale.sy, 3.0);
    }

    #[test]
    fn translation_centers_scaled_gene_on_han() {
        let gene_rect = Rectangle::new(1.0, -1.0, -1.0, 1.0); // centered at origin
        let han = flat_han_stroke(Point::new(5.0, 0.0), Point::new(15.0, 0.0), 10.0);
        let scale = Scale::new(1.0, 1.0);
        let (dx, dy) = measure_translation(&gene_rect, &han, scale);
        assert!((dx - 10.0).abs() < 1e-9);
        assert!(dy.abs() < 1e-9);
    }

    #[test]
    fn squared_distance_to_segment_endpoint_clamps() {
        let d = squared_distance_to_segment(Point::new(-5.0, 0.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!((d - 25.0).abs() < 1e-9);
    }

    #[test]
    fn weighted_scale_with_zero_weight_falls_back_to_identity() {
        let scale = weighted_scale(&[]);
        assert_eq!(scale.sx, 1.0);
        assert_eq!(scale.sy, 1.0);
    }
}
