//! Stroke-overlap detection (a Bentley-Ottmann sweep over per-acid line
//! segments) and overlap scoring (merging detected overlaps against a
//! Han's declared overlap requirements).

use crate::geometry::Line;
use crate::han::HOverlap;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum LineEventType {
    Enter,
    Swap,
    Exit,
}

#[derive(Debug, Clone, Copy)]
struct LineEvent {
    x: f64,
    event_type: LineEventType,
    y: f64,
    line: usize,
    other: Option<usize>,
}

fn event_key(e: &LineEvent) -> (f64, u8, f64) {
    (e.x, e.event_type as u8, e.y)
}

/// Pending sweep events, kept sorted by `(x, type, y)`.
#[derive(Default)]
struct EventStack {
    events: Vec<LineEvent>,
}

impl EventStack {
    fn push(&mut self, event: LineEvent) {
        let key = event_key(&event);
        let pos = self
            .events
            .partition_point(|e| event_key(e) < key);
        self.events.insert(pos, event);
    }

    fn pop_min(&mut self) -> Option<LineEvent> {
        if self.events.is_empty() {
            None
        } else {
            Some(self.events.remove(0))
        }
    }
}

/// Currently-active lines, ordered by descending y at the current sweep
/// position. Adjacent entries are the only candidates for intersection.
struct LineStack<'a> {
    lines: &'a [Line],
    active: Vec<usize>,
}

impl<'a> LineStack<'a> {
    fn new(lines: &'a [Line]) -> Self {
        Self {
            lines,
            active: Vec::new(),
        }
    }

    fn y_at(&self, line: usize, x: f64) -> f64 {
        self.lines[line].y_at(x)
    }

    fn insert(&mut self, line: usize, x: f64) -> usize {
        let y = self.y_at(line, x);
        let pos = self
            .active
            .partition_point(|&idx| self.y_at(idx, x) > y);
        self.active.insert(pos, line);
        pos
    }

    fn position_of(&self, line: usize) -> Option<usize> {
        self.active.iter().position(|&l| l == line)
    }

    fn remove(&mut self, line: usize) {
        if let Some(pos) = self.position_of(line) {
            self.active.remove(pos);
        }
    }

    fn neighbors(&self, pos: usize) -> (Option<usize>, Option<usize>) {
        let above = if pos > 0 { Some(self.active[pos - 1]) } else { None };
        let below = self.active.get(pos + 1).copied();
        (above, below)
    }

    fn swap(&mut self, pos: usize) {
        if pos + 1 < self.active.len() {
            self.active.swap(pos, pos + 1);
        }
    }
}

/// Detects all pairs of *different-owner* stroke lines whose segments
/// cross, via a Bentley-Ottmann sweep. Returns the deduplicated,
/// `(min, max)`-ordered set of owner-id (stroke index) pairs.
pub fn detect_stroke_overlaps(lines: &[Line]) -> BTreeSet<(usize, usize)> {
    let mut overlaps = BTreeSet::new();
    if lines.len() < 2 {
        return overlaps;
    }

    let mut events = EventStack::default();
    for (i, line) in lines.iter().enumerate() {
        events.push(LineEvent {
            x: line.start.x,
            event_type: LineEventType::Enter,
            y: line.start.y,
            line: i,
            other: None,
        });
        events.push(LineEvent {
            x: line.end.x,
            event_type: LineEventType::Exit,
            y: line.end.y,
            line: i,
            other: None,
        });
    }

    let mut stack = LineStack::new(lines);

    let mut test_pair = |a: usize, b: usize, at_x: f64, events: &mut EventStack| {
        if let Some(point) = lines[a].intersects_at(&lines[b], at_x) {
            if lines[a].owner_id != lines[b].owner_id {
                overlaps.insert(order_pair(lines[a].owner_id, lines[b].owner_id));
            }
            events.push(LineEvent {
                x: point.x,
                event_type: LineEventType::Swap,
                y: point.y,
                line: a,
                other: Some(b),
            });
        }
    };

    while let Some(event) = events.pop_min() {
        match event.event_type {
            LineEventType::Enter => {
                let pos = stack.insert(event.line, event.x);
                let (above, below) = stack.neighbors(pos);
                if let Some(above) = above {
                    test_pair(above, event.line, event.x, &mut events);
                }
                if let Some(below) = below {
                    test_pair(event.line, below, event.x, &mut events);
                }
            }
            LineEventType::Exit => {
                if let Some(pos) = stack.position_of(event.line) {
                    let (above, below) = stack.neighbors(pos);
                    stack.remove(event.line);
                    if let (Some(above), Some(below)) = (above, below) {
                        test_pair(above, below, event.x, &mut events);
                    }
                }
            }
            LineEventType::Swap => {
                if let (Some(pos_a), Some(other)) = (stack.position_of(event.line), event.other) {
                    if let Some(pos_b) = stack.position_of(other) {
                        if pos_a.abs_diff(pos_b) == 1 {
                            let first = pos_a.min(pos_b);
                            stack.swap(first);
                            let (above, _) = stack.neighbors(first);
                            let (_, below) = stack.neighbors(first + 1);
                            if let Some(above) = above {
                                test_pair(above, stack.active[first], event.x + f64::EPSILON, &mut events);
                            }
                            if let Some(below) = below {
                                test_pair(stack.active[first + 1], below, event.x + f64::EPSILON, &mut events);
                            }
                        }
                    }
                }
            }
        }
    }

    overlaps
}

fn order_pair(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Classification of one overlap comparison between the gene's detected
/// overlaps and a Han's declared overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapOutcome {
    Match,
    Missing,
    Illegal,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapResult {
    pub stroke_a: usize,
    pub stroke_b: usize,
    pub outcome: OverlapOutcome,
}

/// Merges the gene's actual (sorted) stroke overlaps against the Han's
/// declared overlaps by simple sorted-merge on the `(min, max)` stroke
/// pair, per the documented open-question decision (not spatial
/// proximity).
pub fn classify_overlaps(actual: &BTreeSet<(usize, usize)>, declared: &[HOverlap]) -> Vec<OverlapResult> {
    let mut declared_sorted: Vec<&HOverlap> = declared.iter().collect();
    declared_sorted.sort_by_key(|o| order_pair(o.stroke_a, o.stroke_b));

    let mut results = Vec::new();
    let mut actual_iter = actual.iter().peekable();
    let mut declared_iter = declared_sorted.iter().peekable();

    loop {
        match (actual_iter.peek(), declared_iter.peek()) {
            (None, None) => break,
            (Some(&&(a, b)), None) => {
                results.push(OverlapResult {
                    stroke_a: a,
                    stroke_b: b,
                    outcome: OverlapOutcome::Illegal,
                });
                actual_iter.next();
            }
            (None, Some(han)) => {
                results.push(OverlapResult {
                    stroke_a: han.stroke_a,
                    stroke_b: han.stroke_b,
                    outcome: if han.required {
                        OverlapOutcome::Missing
                    } else {
                        OverlapOutcome::Ignored
                    },
                });
                declared_iter.next();
            }
            (Some(&&(a, b)), Some(han)) => {
                let actual_key = order_pair(a, b);
                let han_key = order_pair(han.stroke_a, han.stroke_b);
                match actual_key.cmp(&han_key) {
                    std::cmp::Ordering::Equal => {
                        results.push(OverlapResult {
                            stroke_a: a,
                            stroke_b: b,
                            outcome: OverlapOutcome::Match,
                        });
                        actual_iter.next();
                        declared_iter.next();
                    }
                    std::cmp::Ordering::Less => {
                        results.push(OverlapResult {
                            stroke_a: a,
                            stroke_b: b,
                            outcome: OverlapOutcome::Illegal,
                        });
                        actual_iter.next();
                    }
                    std::cmp::Ordering::Greater => {
                        results.push(OverlapResult {
                            stroke_a: han.stroke_a,
                            stroke_b: han.stroke_b,
                            outcome: if han.required {
                                OverlapOutcome::Missing
                            } else {
                                OverlapOutcome::Ignored
                            },
                        });
                        declared_iter.next();
                    }
                }
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn crossing_lines_from_different_owners_overlap() {
        let lines = vec![
            Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0), 0, 1),
            Line::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0), 1, 2),
        ];
        let overlaps = detect_stroke_overlaps(&lines);
        assert_eq!(overlaps.len(), 1);
        assert!(overlaps.contains(&(1, 2)));
    }

    #[test]
    fn crossing_lines_from_same_owner_do_not_overlap() {
        let lines = vec![
            Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0), 0, 5),
            Line::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0), 1, 5),
        ];
        let overlaps = detect_stroke_overlaps(&lines);
        assert!(overlaps.is_empty());
    }

    #[test]
    fn non_crossing_lines_do_not_overlap() {
        let lines = vec![
            Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 0, 1),
            Line::new(Point::new(0.0, 5.0), Point::new(10.0, 5.0), 1, 2),
        ];
        let overlaps = detect_stroke_overlaps(&lines);
        assert!(overlaps.is_empty());
    }

    #[test]
    fn classify_matches_missing_illegal_and_ignored() {
        let declared = vec![
            HOverlap {
                stroke_a: 0,
                stroke_b: 1,
                required: true,
            },
            HOverlap {
                stroke_a: 2,
                stroke_b: 3,
                required: false,
            },
        ];
        let mut actual = BTreeSet::new();
        actual.insert((0, 1)); // match
        actual.insert((5, 6)); // illegal (not declared)

        let results = classify_overlaps(&actual, &declared);
        let outcomes: Vec<_> = results.iter().map(|r| r.outcome).collect();
        assert!(outcomes.contains(&OverlapOutcome::Match));
        assert!(outcomes.contains(&OverlapOutcome::Illegal));
        assert!(outcomes.contains(&OverlapOutcome::Ignored));
        // stroke_b=3's declared-but-absent-and-required pair never appears here
        // because (2,3) was non-required -> Ignored, not Missing.
    }

    #[test]
    fn classify_flags_missing_required_overlap() {
        let declared = vec![HOverlap {
            stroke_a: 0,
            stroke_b: 1,
            required: true,
        }];
        let actual = BTreeSet::new();
        let results = classify_overlaps(&actual, &declared);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].outcome, OverlapOutcome::Missing);
    }
}
