//! Han glyph reference definitions.
//!
//! `Han` values are shared, read-only reference data looked up by UUID or
//! Unicode codepoint (see `HanTable`). Retrieving them over HTTP or from a
//! file is an out-of-scope collaborator; this module only models the
//! in-memory shape and the lookups the engine performs against it.

use crate::geometry::{Point, Rectangle};

/// A point along a Han stroke's forward or reverse traversal, carrying its
/// cumulative fractional distance along the stroke in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HPoint {
    pub point: Point,
    pub fractional_distance: f64,
}

impl HPoint {
    pub fn new(point: Point, fractional_distance: f64) -> Self {
        Self {
            point,
            fractional_distance,
        }
    }
}

/// Dimensions common to strokes and groups: accumulated length and bounds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HDimensions {
    pub length: f64,
    pub bounds: Rectangle,
}

/// A single stroke within a Han definition, sampled in both directions so
/// gene strokes can be compared against whichever orientation best matches.
#[derive(Debug, Clone, PartialEq)]
pub struct HStroke {
    pub dimensions: HDimensions,
    pub points_forward: Vec<HPoint>,
    pub points_reverse: Vec<HPoint>,
}

impl HStroke {
    pub fn length(&self) -> f64 {
        self.dimensions.length
    }

    pub fn bounds(&self) -> &Rectangle {
        &self.dimensions.bounds
    }

    pub fn start_point(&self) -> Point {
        self.points_forward
            .first()
            .map(|p| p.point)
            .unwrap_or(Point::ORIGIN)
    }

    pub fn end_point(&self) -> Point {
        self.points_forward
            .last()
            .map(|p| p.point)
            .unwrap_or(Point::ORIGIN)
    }
}

/// A group of related strokes within a Han definition (e.g. a radical),
/// with its ink-weighted center.
#[derive(Debug, Clone, PartialEq)]
pub struct HGroup {
    pub dimensions: HDimensions,
    pub weighted_center: Point,
    pub strokes: Vec<usize>,
}

/// A declared overlap requirement (or explicit non-requirement) between
/// two stroke indices in a Han definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HOverlap {
    pub stroke_a: usize,
    pub stroke_b: usize,
    pub required: bool,
}

impl HOverlap {
    /// Canonical comparison key: unordered pair, lower index first.
    fn key(&self) -> (usize, usize) {
        if self.stroke_a <= self.stroke_b {
            (self.stroke_a, self.stroke_b)
        } else {
            (self.stroke_b, self.stroke_a)
        }
    }

    pub fn involves(&self, a: usize, b: usize) -> bool {
        self.key() == Self::pair_key(a, b)
    }

    fn pair_key(a: usize, b: usize) -> (usize, usize) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl PartialOrd for HOverlap {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HOverlap {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

/// A reference Han glyph definition: dimensions, strokes, groups, and the
/// declared overlap requirements among strokes.
#[derive(Debug, Clone, PartialEq)]
pub struct Han {
    pub uuid: String,
    pub unicode: String,
    pub dimensions: HDimensions,
    pub minimum_stroke_length: f64,
    pub strokes: Vec<HStroke>,
    pub groups: Vec<HGroup>,
    pub overlaps: Vec<HOverlap>,
}

impl Han {
    pub fn length(&self) -> f64 {
        self.dimensions.length
    }

    pub fn bounds(&self) -> &Rectangle {
        &self.dimensions.bounds
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// The group a given stroke index belongs to, if any group claims it.
    pub fn map_stroke_to_group(&self, stroke: usize) -> Option<&HGroup> {
        self.groups.iter().find(|g| g.strokes.contains(&stroke))
    }

    /// Total length of `group`'s member strokes (`hgrp.getLength()` in the
    /// original): the document format carries only a group's weighted
    /// center and stroke membership, not precomputed aggregate dimensions,
    /// so these are derived from the member `HStroke`s on demand.
    pub fn group_length(&self, group: &HGroup) -> f64 {
        group.strokes.iter().filter_map(|&i| self.strokes.get(i)).map(|s| s.length()).sum()
    }

    /// Bounding rectangle enclosing `group`'s member strokes
    /// (`hgrp.getBounds()` in the original).
    pub fn group_bounds(&self, group: &HGroup) -> Rectangle {
        let mut members = group.strokes.iter().filter_map(|&i| self.strokes.get(i));
        let Some(first) = members.next() else {
            return Rectangle::default();
        };
        members.fold(*first.bounds(), |acc, s| acc.union(s.bounds()))
    }

    pub fn overlap_between(&self, a: usize, b: usize) -> Option<&HOverlap> {
        self.overlaps.iter().find(|o| o.involves(a, b))
    }
}

/// A read-only collection of Han definitions, keyed by UUID and Unicode
/// codepoint, standing in for the original's process-wide `Han` registry.
/// Population (from XML, HTTP, or a local file) is an out-of-scope
/// collaborator; callers build this from already-parsed `Han` values.
#[derive(Debug, Clone, Default)]
pub struct HanTable {
    definitions: Vec<Han>,
}

impl HanTable {
    pub fn new(definitions: Vec<Han>) -> Self {
        Self { definitions }
    }

    pub fn by_unicode(&self, unicode: &str) -> Option<&Han> {
        self.definitions.iter().find(|h| h.unicode == unicode)
    }

    pub fn by_uuid(&self, uuid: &str) -> Option<&Han> {
        self.definitions.iter().find(|h| h.uuid == uuid)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_han() -> Han {
        Han {
            uuid: "11111111-1111-4111-8111-111111111111".into(),
            unicode: "U+4E00".into(),
            dimensions: HDimensions {
                length: 10.0,
                bounds: Rectangle::new(10.0, 0.0, 0.0, 10.0),
            },
            minimum_stroke_length: 1.0,
            strokes: vec![HStroke {
                dimensions: HDimensions {
                    length: 10.0,
                    bounds: Rectangle::new(10.0, 0.0, 0.0, 10.0),
                },
                points_forward: vec![
                    HPoint::new(Point::new(0.0, 0.0), 0.0),
                    HPoint::new(Point::new(10.0, 0.0), 1.0),
                ],
                points_reverse: vec![
                    HPoint::new(Point::new(10.0, 0.0), 0.0),
                    HPoint::new(Point::new(0.0, 0.0), 1.0),
                ],
            }],
            groups: vec![HGroup {
                dimensions: HDimensions::default(),
                weighted_center: Point::new(5.0, 0.0),
                strokes: vec![0],
            }],
            overlaps: vec![],
        }
    }

    #[test]
    fn table_looks_up_by_unicode_and_uuid() {
        let table = HanTable::new(vec![sample_han()]);
        assert!(table.by_unicode("U+4E00").is_some());
        assert!(table.by_uuid("11111111-1111-4111-8111-111111111111").is_some());
        assert!(table.by_unicode("U+4E01").is_none());
    }

    #[test]
    fn stroke_maps_to_its_group() {
        let han = sample_han();
        assert!(han.map_stroke_to_group(0).is_some());
        assert!(han.map_stroke_to_group(1).is_none());
    }

    #[test]
    fn group_length_and_bounds_derive_from_member_strokes() {
        let han = sample_han();
        let group = &han.groups[0];
        assert!((han.group_length(group) - 10.0).abs() < 1e-9);
        let bounds = han.group_bounds(group);
        assert!((bounds.width() - 10.0).abs() < 1e-9);
        assert!((bounds.height() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn overlap_lookup_is_unordered() {
        let overlap = HOverlap {
            stroke_a: 1,
            stroke_b: 3,
            required: true,
        };
        assert!(overlap.involves(1, 3));
        assert!(overlap.involves(3, 1));
        assert!(!overlap.involves(1, 2));
    }
}
