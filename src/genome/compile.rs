//! Gene data model and compilation: translating bases into acids, tracing
//! the acid polyline, and delimiting strokes at coherence breaks.

use crate::acid::{AcidType, Base, CodonTable};
use crate::err::{EngineError, Result};
use crate::geometry::{Point, Range};

/// Per-stroke/per-gene scale factors, `sxy` always `sqrt(sx^2 + sy^2)`
/// because every diagonal acid has `dx == dy`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scale {
    pub sx: f64,
    pub sy: f64,
    pub sxy: f64,
}

impl Scale {
    pub fn new(sx: f64, sy: f64) -> Self {
        Self {
            sx,
            sy,
            sxy: (sx * sx + sy * sy).sqrt(),
        }
    }

    pub const IDENTITY: Scale = Scale {
        sx: 1.0,
        sy: 1.0,
        sxy: std::f64::consts::SQRT_2,
    };
}

/// Accumulates a run of acids' vector components unscaled, so that scale
/// can be applied once to the sums rather than per-acid (avoiding
/// round-off divergence between the point-trace and length-sum paths).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScaledLength {
    dx_vectors: f64,
    dy_vectors: f64,
    dxy_vectors: f64,
}

impl ScaledLength {
    pub fn accumulate(&mut self, acid: AcidType) {
        let v = acid.vector();
        if v.x.abs() > 0.0 && v.y.abs() > 0.0 {
            self.dxy_vectors += v.x.signum() * (v.x.abs() / std::f64::consts::FRAC_1_SQRT_2);
        } else {
            self.dx_vectors += v.x;
            self.dy_vectors += v.y;
        }
    }

    pub fn length(&self, scale: Scale) -> f64 {
        ((self.dx_vectors * scale.sx).powi(2) + (self.dy_vectors * scale.sy).powi(2)).sqrt()
            + self.dxy_vectors * scale.sxy
    }
}

/// Bit-flags recording which derived data for a gene are stale and must be
/// recomputed (`GEOMETRY`, `STROKES`, `OVERLAPS`, `SCORE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvalidFlags(u8);

impl InvalidFlags {
    pub const GEOMETRY: InvalidFlags = InvalidFlags(1 << 0);
    pub const STROKES: InvalidFlags = InvalidFlags(1 << 1);
    pub const OVERLAPS: InvalidFlags = InvalidFlags(1 << 2);
    pub const SCORE: InvalidFlags = InvalidFlags(1 << 3);
    pub const ALL: InvalidFlags = InvalidFlags(0b1111);
    pub const NONE: InvalidFlags = InvalidFlags(0);

    pub fn set(&mut self, flags: InvalidFlags) {
        self.0 |= flags.0;
    }

    pub fn clear(&mut self, flags: InvalidFlags) {
        self.0 &= !flags.0;
    }

    pub fn contains(&self, flags: InvalidFlags) -> bool {
        self.0 & flags.0 == flags.0
    }

    pub fn any(&self) -> bool {
        self.0 != 0
    }
}

/// A coherent run of acids within a gene, delimited by coherence breaks.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Half-open range of acid indices (within the gene's `acids`, not
    /// counting the trailing `Stop` sentinel) this stroke covers.
    pub acids: Range,
    pub han_stroke: Option<usize>,
    pub group: Option<usize>,
    pub scale: Scale,
    pub translation: (f64, f64),
    pub deviation: f64,
    pub extra_length: f64,
    pub dropout: usize,
    pub scaled_length: ScaledLength,
    pub is_mark: bool,
    pub reversed: bool,
    pub inherited_x: bool,
    pub inherited_y: bool,
}

impl Stroke {
    fn new(acids: Range) -> Self {
        Self {
            acids,
            han_stroke: None,
            group: None,
            scale: Scale::IDENTITY,
            translation: (0.0, 0.0),
            deviation: 0.0,
            extra_length: 0.0,
            dropout: 0,
            scaled_length: ScaledLength::default(),
            is_mark: false,
            reversed: false,
            inherited_x: false,
            inherited_y: false,
        }
    }
}

/// The subset of a gene's strokes assigned to one of the Han's groups.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeneGroup {
    pub han_group: usize,
    pub strokes: Vec<usize>,
}

/// A named structural unit spanning `[base_first, base_last]` (inclusive,
/// matching the document convention; ranges are converted to the crate's
/// half-open `Range` internally at the call sites that need one).
#[derive(Debug, Clone, PartialEq)]
pub struct Gene {
    pub id: usize,
    pub base_first: usize,
    pub base_last: usize,
    pub han_unicode: String,
    pub acids: Vec<AcidType>,
    pub points: Vec<Point>,
    pub strokes: Vec<Stroke>,
    pub groups: Vec<GeneGroup>,
    pub scale: Scale,
    pub translation: (f64, f64),
    pub invalid: InvalidFlags,
    pub score: f64,
    pub units: f64,
}

impl Gene {
    /// Number of in-frame, non-`Stop` acids this gene translates to.
    pub fn acid_count(&self) -> usize {
        self.acids.len().saturating_sub(1)
    }

    /// Structural liveness only: a well-formed ORF. Liveness against a Han
    /// (stroke-count match) is a separate check, since a Han requiring zero
    /// strokes is satisfied by a gene with zero strokes.
    pub fn is_alive(&self) -> bool {
        !self.acids.is_empty() && self.acids.last() == Some(&AcidType::Stop)
    }

    pub fn invalidate(&mut self, flags: InvalidFlags) {
        self.invalid.set(flags);
    }
}

/// Scans `bases[base_first..=base_last]` for a valid open reading frame:
/// a `START` codon, an uninterrupted run of non-stop acids, and a single
/// terminal `Stop`. Returns the decoded acid sequence including the
/// trailing `Stop`.
pub fn scan_orf(
    bases: &str,
    table: &CodonTable,
    base_first: usize,
    base_last: usize,
) -> Result<Vec<AcidType>> {
    let bytes = bases.as_bytes();
    if base_last < base_first || base_last >= bytes.len() {
        return Err(EngineError::BadArguments(format!(
            "gene base range [{base_first}, {base_last}] is out of bounds"
        )));
    }

    let span = base_last - base_first + 1;
    if span % 3 != 0 {
        return Err(EngineError::Plan {
            termination: crate::genome::GenomeTermination::Compilation,
            reason: crate::genome::GenomeReason::None,
            message: format!("gene span {span} is not a multiple of 3"),
        });
    }

    if !bytes[base_first..base_first + 3].eq_ignore_ascii_case(crate::acid::START_CODON.as_bytes()) {
        return Err(EngineError::Plan {
            termination: crate::genome::GenomeTermination::Compilation,
            reason: crate::genome::GenomeReason::None,
            message: "gene does not begin with a START codon".into(),
        });
    }

    // The START codon itself is consumed as a frame marker only; the acid
    // sequence begins at the codon that follows it (spec's trivial-identity
    // worked example: "ATGTAA" compiles to zero non-STOP acids).
    let mut acids = Vec::with_capacity(span / 3);
    let mut found_stop = false;
    for chunk_start in (base_first..=base_last).step_by(3).skip(1) {
        let b0 = decode_base(bytes, chunk_start)?;
        let b1 = decode_base(bytes, chunk_start + 1)?;
        let b2 = decode_base(bytes, chunk_start + 2)?;
        let acid = table.codon_to_acid(b0, b1, b2);
        let is_stop = acid.is_stop();
        acids.push(acid);
        if is_stop {
            found_stop = true;
            break;
        }
    }

    if !found_stop {
        return Err(EngineError::Plan {
            termination: crate::genome::GenomeTermination::Compilation,
            reason: crate::genome::GenomeReason::None,
            message: "gene contains no in-frame STOP codon".into(),
        });
    }

    if acids[..acids.len() - 1].iter().any(|a| a.is_stop()) {
        return Err(EngineError::Plan {
            termination: crate::genome::GenomeTermination::Compilation,
            reason: crate::genome::GenomeReason::None,
            message: "gene contains a premature in-frame STOP".into(),
        });
    }

    Ok(acids)
}

fn decode_base(bytes: &[u8], at: usize) -> Result<Base> {
    let c = *bytes
        .get(at)
        .ok_or_else(|| EngineError::BadArguments(format!("base index {at} out of range")))? as char;
    Base::from_char(c).ok_or_else(|| EngineError::BadArguments(format!("illegal base '{c}' at {at}")))
}

/// Walks decoded acids into a point polyline: `points[0] = (0,0)`,
/// `points[i+1] = points[i] + acids[i].vector`.
pub fn walk_points(acids: &[AcidType]) -> Vec<Point> {
    let mut points = Vec::with_capacity(acids.len() + 1);
    points.push(Point::ORIGIN);
    for acid in acids {
        let last = *points.last().unwrap();
        points.push(last + acid.vector());
    }
    points
}

/// Partitions the gene's non-`Stop` acids into coherent runs ("strokes").
/// A break occurs at position `i > 0` when the trivector
/// `(acids[i-1], acids[i], acids[i+1])` is incoherent; the implicit
/// trailing `Stop` sentinel guarantees the final run always closes.
pub fn build_strokes(acids: &[AcidType]) -> Vec<Stroke> {
    let non_stop_len = acids.len().saturating_sub(1);
    if non_stop_len == 0 {
        return Vec::new();
    }

    let mut strokes = Vec::new();
    let mut start = 0usize;
    for i in 1..non_stop_len {
        if !crate::acid::is_coherent(acids[i - 1], acids[i], acids[i + 1]) {
            strokes.push(Stroke::new(Range::new(start, i)));
            start = i;
        }
    }
    strokes.push(Stroke::new(Range::new(start, non_stop_len)));
    strokes
}

/// Compiles a gene's acids, points, and structural (pre-measurement)
/// strokes from its base range.
pub fn compile_gene(
    id: usize,
    bases: &str,
    table: &CodonTable,
    base_first: usize,
    base_last: usize,
    han_unicode: String,
) -> Result<Gene> {
    let acids = scan_orf(bases, table, base_first, base_last)?;
    let points = walk_points(&acids);
    let strokes = build_strokes(&acids);

    Ok(Gene {
        id,
        base_first,
        base_last,
        han_unicode,
        acids,
        points,
        strokes,
        groups: Vec::new(),
        scale: Scale::IDENTITY,
        translation: (0.0, 0.0),
        invalid: InvalidFlags::ALL,
        score: 0.0,
        units: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acid::AcidType;

    #[test]
    fn trivial_identity_gene_has_no_strokes() {
        let table = CodonTable::default();
        let acids = scan_orf("ATGTAA", &table, 0, 5).unwrap();
        assert_eq!(acids.len(), 1);
        assert!(acids[0].is_stop());
        let strokes = build_strokes(&acids);
        assert!(strokes.is_empty());
    }

    #[test]
    fn missing_start_codon_is_rejected() {
        let table = CodonTable::default();
        assert!(scan_orf("TAATAA", &table, 0, 5).is_err());
    }

    #[test]
    fn missing_stop_codon_is_rejected() {
        let table = CodonTable::default();
        assert!(scan_orf("ATGATG", &table, 0, 5).is_err());
    }

    #[test]
    fn points_accumulate_from_origin() {
        let acids = vec![AcidType::Eas, AcidType::Nos, AcidType::Stop];
        let points = walk_points(&acids);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Point::ORIGIN);
        assert_eq!(points[1], points[0] + AcidType::Eas.vector());
        assert_eq!(points[2], points[1] + AcidType::Nos.vector());
        assert_eq!(points[3], points[2]);
    }

    #[test]
    fn coherence_break_splits_documented_example() {
        // spec example: [Eas, Eas, Nos] with coherent(Eas, Nos, STOP) = false
        // produces strokes [Eas, Eas] and [Nos].
        let acids = vec![AcidType::Eas, AcidType::Eas, AcidType::Nos, AcidType::Stop];
        let strokes = build_strokes(&acids);
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].acids, Range::new(0, 2));
        assert_eq!(strokes[1].acids, Range::new(2, 3));
    }

    #[test]
    fn single_acid_gene_never_breaks() {
        let acids = vec![AcidType::Eas, AcidType::Stop];
        let strokes = build_strokes(&acids);
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].acids, Range::new(0, 1));
    }
}
