//! Fixed codon/acid/coherence tables: the translation from base triplets to
//! the 21-member acid alphabet, and the trivector coherence relation that
//! governs where strokes break.
//!
//! The 21x21x21 `s_aryCOHERENCE` table is transcribed verbatim from the
//! original engine's `codon.cpp`. The literal 64-entry `s_mapCodonToType`
//! codon-to-acid assignment was not present in the retrieved sources (only
//! its declaration in `core/genome.hpp` survived extraction, not its
//! initializer), so `CodonTable::default()` below assigns codons to acids
//! with a deterministic, documented scheme instead; see `DESIGN.md`.

use crate::geometry::Point;
use std::fmt;

/// One of the eight compass directions an acid's vector points in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl Direction {
    const ORDER: [Direction; 8] = [
        Direction::N,
        Direction::Ne,
        Direction::E,
        Direction::Se,
        Direction::S,
        Direction::Sw,
        Direction::W,
        Direction::Nw,
    ];

    fn index(self) -> i32 {
        Self::ORDER.iter().position(|d| *d == self).unwrap() as i32
    }

    fn is_diagonal(self) -> bool {
        matches!(self, Direction::Ne | Direction::Se | Direction::Sw | Direction::Nw)
    }

    /// Shortest distance around the 8-point compass between two directions.
    fn circular_distance(self, other: Direction) -> i32 {
        let diff = (self.index() - other.index()).abs();
        diff.min(8 - diff)
    }

    /// Unit direction vector (before length scaling).
    fn unit(self) -> (f64, f64) {
        let diag = std::f64::consts::FRAC_1_SQRT_2;
        match self {
            Direction::N => (0.0, 1.0),
            Direction::Ne => (diag, diag),
            Direction::E => (1.0, 0.0),
            Direction::Se => (diag, -diag),
            Direction::S => (0.0, -1.0),
            Direction::Sw => (-diag, -diag),
            Direction::W => (-1.0, 0.0),
            Direction::Nw => (-diag, diag),
        }
    }
}

/// One of an acid's three magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Length {
    Short,
    Medium,
    Long,
}

impl Length {
    fn magnitude(self) -> f64 {
        match self {
            Length::Short => 6.0,
            Length::Medium => 12.0,
            Length::Long => 18.0,
        }
    }
}

/// The 21 acid products of the codon table: `Stop` plus 20 planar vectors.
/// Diagonal directions (`Ne`, `Se`, `Sw`, `Nw`) carry only `Short`/`Medium`
/// lengths; cardinal directions (`N`, `E`, `S`, `W`) carry all three,
/// matching the fixed acid vectors in the original table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AcidType {
    Stop,
    Nos,
    Nom,
    Nol,
    Nes,
    Nem,
    Eas,
    Eam,
    Eal,
    Ses,
    Sem,
    Sos,
    Som,
    Sol,
    Sws,
    Swm,
    Wes,
    Wem,
    Wel,
    Nws,
    Nwm,
}

impl AcidType {
    /// All 21 acids in declaration order, `Stop` first.
    pub const ALL: [AcidType; 21] = [
        AcidType::Stop,
        AcidType::Nos,
        AcidType::Nom,
        AcidType::Nol,
        AcidType::Nes,
        AcidType::Nem,
        AcidType::Eas,
        AcidType::Eam,
        AcidType::Eal,
        AcidType::Ses,
        AcidType::Sem,
        AcidType::Sos,
        AcidType::Som,
        AcidType::Sol,
        AcidType::Sws,
        AcidType::Swm,
        AcidType::Wes,
        AcidType::Wem,
        AcidType::Wel,
        AcidType::Nws,
        AcidType::Nwm,
    ];

    /// The 20 non-`Stop` acids, in the same relative order as `ALL`.
    pub const NON_STOP: [AcidType; 20] = [
        AcidType::Nos,
        AcidType::Nom,
        AcidType::Nol,
        AcidType::Nes,
        AcidType::Nem,
        AcidType::Eas,
        AcidType::Eam,
        AcidType::Eal,
        AcidType::Ses,
        AcidType::Sem,
        AcidType::Sos,
        AcidType::Som,
        AcidType::Sol,
        AcidType::Sws,
        AcidType::Swm,
        AcidType::Wes,
        AcidType::Wem,
        AcidType::Wel,
        AcidType::Nws,
        AcidType::Nwm,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AcidType::Stop => "STP",
            AcidType::Nos => "Nos",
            AcidType::Nom => "Nom",
            AcidType::Nol => "Nol",
            AcidType::Nes => "Nes",
            AcidType::Nem => "Nem",
            AcidType::Eas => "Eas",
            AcidType::Eam => "Eam",
            AcidType::Eal => "Eal",
            AcidType::Ses => "Ses",
            AcidType::Sem => "Sem",
            AcidType::Sos => "Sos",
            AcidType::Som => "Som",
            AcidType::Sol => "Sol",
            AcidType::Sws => "Sws",
            AcidType::Swm => "Swm",
            AcidType::Wes => "Wes",
            AcidType::Wem => "Wem",
            AcidType::Wel => "Wel",
            AcidType::Nws => "Nws",
            AcidType::Nwm => "Nwm",
        }
    }

    /// Reverse lookup of an acid by its 3-character, case-sensitive name.
    pub fn from_name(name: &str) -> Option<AcidType> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    pub fn is_stop(self) -> bool {
        matches!(self, AcidType::Stop)
    }

    fn direction(self) -> Option<Direction> {
        match self {
            AcidType::Stop => None,
            AcidType::Nos | AcidType::Nom | AcidType::Nol => Some(Direction::N),
            AcidType::Nes | AcidType::Nem => Some(Direction::Ne),
            AcidType::Eas | AcidType::Eam | AcidType::Eal => Some(Direction::E),
            AcidType::Ses | AcidType::Sem => Some(Direction::Se),
            AcidType::Sos | AcidType::Som | AcidType::Sol => Some(Direction::S),
            AcidType::Sws | AcidType::Swm => Some(Direction::Sw),
            AcidType::Wes | AcidType::Wem | AcidType::Wel => Some(Direction::W),
            AcidType::Nws | AcidType::Nwm => Some(Direction::Nw),
        }
    }

    fn length(self) -> Option<Length> {
        match self {
            AcidType::Stop => None,
            AcidType::Nos | AcidType::Nes | AcidType::Eas | AcidType::Ses | AcidType::Sos
            | AcidType::Sws | AcidType::Wes | AcidType::Nws => Some(Length::Short),
            AcidType::Nom | AcidType::Nem | AcidType::Eam | AcidType::Sem | AcidType::Som
            | AcidType::Swm | AcidType::Wem | AcidType::Nwm => Some(Length::Medium),
            AcidType::Nol | AcidType::Eal | AcidType::Sol | AcidType::Wel => Some(Length::Long),
        }
    }

    /// The displacement vector this acid contributes when walked. `Stop`
    /// contributes the zero vector.
    pub fn vector(self) -> Point {
        match (self.direction(), self.length()) {
            (Some(dir), Some(len)) => {
                let (ux, uy) = dir.unit();
                let mag = len.magnitude();
                Point::new(ux * mag, uy * mag)
            }
            _ => Point::ORIGIN,
        }
    }
}

/// Literal transcription of the original coherence table: `COHERENCE[a][b][c]` is
/// `true` when acid `c` may directly follow the pair `(a, b)` in a stroke without
/// breaking it. Indexed by `AcidType as usize` in `AcidType::ALL` declaration order.
#[rustfmt::skip]
const COHERENCE: [[[bool; 21]; 21]; 21] = [
    // Stop
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Stop
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Nos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Nom
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Nol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Nes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Nem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Eas
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Eam
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Eal
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Ses
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Sem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Sos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Som
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Sol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Sws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Swm
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Wes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Wem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Wel
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Nws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Stop-Nwm
    ],
    // Nos
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nos-Stop
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, true , true , true , true , true ], // Nos-Nos
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, true , true , true , true , true ], // Nos-Nom
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, true , true , true , true , true ], // Nos-Nol
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true ], // Nos-Nes
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true ], // Nos-Nem
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Nos-Eas
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Nos-Eam
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Nos-Eal
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nos-Ses
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nos-Sem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nos-Sos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nos-Som
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nos-Sol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nos-Sws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nos-Swm
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nos-Wes
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nos-Wem
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nos-Wel
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nos-Nws
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nos-Nwm
    ],
    // Nom
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nom-Stop
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, true , true , true , true , true ], // Nom-Nos
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, true , true , true , true , true ], // Nom-Nom
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, true , true , true , true , true ], // Nom-Nol
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true ], // Nom-Nes
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true ], // Nom-Nem
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Nom-Eas
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Nom-Eam
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Nom-Eal
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nom-Ses
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nom-Sem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nom-Sos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nom-Som
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nom-Sol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nom-Sws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nom-Swm
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nom-Wes
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nom-Wem
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nom-Wel
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nom-Nws
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nom-Nwm
    ],
    // Nol
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nol-Stop
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, true , true , true , true , true ], // Nol-Nos
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, true , true , true , true , true ], // Nol-Nom
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, true , true , true , true , true ], // Nol-Nol
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true ], // Nol-Nes
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true ], // Nol-Nem
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Nol-Eas
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Nol-Eam
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Nol-Eal
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nol-Ses
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nol-Sem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nol-Sos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nol-Som
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nol-Sol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nol-Sws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nol-Swm
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nol-Wes
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nol-Wem
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nol-Wel
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nol-Nws
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nol-Nwm
    ],
    // Nes
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nes-Stop
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true ], // Nes-Nos
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true ], // Nes-Nom
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true ], // Nes-Nol
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, true , true ], // Nes-Nes
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, true , true ], // Nes-Nem
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Nes-Eas
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Nes-Eam
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Nes-Eal
        [false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Nes-Ses
        [false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Nes-Sem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nes-Sos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nes-Som
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nes-Sol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nes-Sws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nes-Swm
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nes-Wes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nes-Wem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nes-Wel
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, false, true , true ], // Nes-Nws
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, false, true , true ], // Nes-Nwm
    ],
    // Nem
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nem-Stop
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true ], // Nem-Nos
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true ], // Nem-Nom
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true ], // Nem-Nol
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, true , true ], // Nem-Nes
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, true , true ], // Nem-Nem
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Nem-Eas
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Nem-Eam
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Nem-Eal
        [false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Nem-Ses
        [false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Nem-Sem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nem-Sos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nem-Som
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nem-Sol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nem-Sws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nem-Swm
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nem-Wes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nem-Wem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nem-Wel
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, false, true , true ], // Nem-Nws
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, false, true , true ], // Nem-Nwm
    ],
    // Eas
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eas-Stop
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Eas-Nos
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Eas-Nom
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Eas-Nol
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Eas-Nes
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Eas-Nem
        [false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eas-Eas
        [false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eas-Eam
        [false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eas-Eal
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eas-Ses
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eas-Sem
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eas-Sos
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eas-Som
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eas-Sol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eas-Sws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eas-Swm
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eas-Wes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eas-Wem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eas-Wel
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eas-Nws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eas-Nwm
    ],
    // Eam
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eam-Stop
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Eam-Nos
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Eam-Nom
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Eam-Nol
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Eam-Nes
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Eam-Nem
        [false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eam-Eas
        [false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eam-Eam
        [false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eam-Eal
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eam-Ses
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eam-Sem
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eam-Sos
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eam-Som
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eam-Sol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eam-Sws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eam-Swm
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eam-Wes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eam-Wem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eam-Wel
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eam-Nws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eam-Nwm
    ],
    // Eal
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eal-Stop
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Eal-Nos
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Eal-Nom
        [false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false], // Eal-Nol
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Eal-Nes
        [false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Eal-Nem
        [false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eal-Eas
        [false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eal-Eam
        [false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eal-Eal
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eal-Ses
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eal-Sem
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eal-Sos
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eal-Som
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Eal-Sol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eal-Sws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eal-Swm
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eal-Wes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eal-Wem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eal-Wel
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eal-Nws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Eal-Nwm
    ],
    // Ses
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Ses-Stop
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Ses-Nos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Ses-Nom
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Ses-Nol
        [false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Ses-Nes
        [false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Ses-Nem
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Ses-Eas
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Ses-Eam
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Ses-Eal
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Ses-Ses
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Ses-Sem
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Ses-Sos
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Ses-Som
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Ses-Sol
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false], // Ses-Sws
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false], // Ses-Swm
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Ses-Wes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Ses-Wem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Ses-Wel
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Ses-Nws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Ses-Nwm
    ],
    // Sem
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sem-Stop
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sem-Nos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sem-Nom
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sem-Nol
        [false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Sem-Nes
        [false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false, false, false, false, false, false], // Sem-Nem
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Sem-Eas
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Sem-Eam
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Sem-Eal
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Sem-Ses
        [false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Sem-Sem
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Sem-Sos
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Sem-Som
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Sem-Sol
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false], // Sem-Sws
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false], // Sem-Swm
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sem-Wes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sem-Wem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sem-Wel
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sem-Nws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sem-Nwm
    ],
    // Sos
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sos-Stop
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sos-Nos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sos-Nom
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sos-Nol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sos-Nes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sos-Nem
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Sos-Eas
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Sos-Eam
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Sos-Eal
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Sos-Ses
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Sos-Sem
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false], // Sos-Sos
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false], // Sos-Som
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false], // Sos-Sol
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false], // Sos-Sws
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false], // Sos-Swm
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Sos-Wes
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Sos-Wem
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Sos-Wel
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sos-Nws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sos-Nwm
    ],
    // Som
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Som-Stop
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Som-Nos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Som-Nom
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Som-Nol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Som-Nes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Som-Nem
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Som-Eas
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Som-Eam
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Som-Eal
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Som-Ses
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Som-Sem
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false], // Som-Sos
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false], // Som-Som
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false], // Som-Sol
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false], // Som-Sws
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false], // Som-Swm
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Som-Wes
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Som-Wem
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Som-Wel
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Som-Nws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Som-Nwm
    ],
    // Sol
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sol-Stop
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sol-Nos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sol-Nom
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sol-Nol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sol-Nes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sol-Nem
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Sol-Eas
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Sol-Eam
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false, false, false, false, false, false], // Sol-Eal
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Sol-Ses
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false, false, false, false], // Sol-Sem
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false], // Sol-Sos
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false], // Sol-Som
        [false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true , true , false, false], // Sol-Sol
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false], // Sol-Sws
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false], // Sol-Swm
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Sol-Wes
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Sol-Wem
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Sol-Wel
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sol-Nws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sol-Nwm
    ],
    // Sws
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sws-Stop
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sws-Nos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sws-Nom
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sws-Nol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sws-Nes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sws-Nem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sws-Eas
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sws-Eam
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Sws-Eal
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false], // Sws-Ses
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false], // Sws-Sem
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false], // Sws-Sos
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false], // Sws-Som
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false], // Sws-Sol
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true ], // Sws-Sws
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true ], // Sws-Swm
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Sws-Wes
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Sws-Wem
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Sws-Wel
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Sws-Nws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Sws-Nwm
    ],
    // Swm
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Swm-Stop
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Swm-Nos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Swm-Nom
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Swm-Nol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Swm-Nes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Swm-Nem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Swm-Eas
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Swm-Eam
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Swm-Eal
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false], // Swm-Ses
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , false, false, false, false, false], // Swm-Sem
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false], // Swm-Sos
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false], // Swm-Som
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , false, false], // Swm-Sol
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true ], // Swm-Sws
        [false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true , true , true ], // Swm-Swm
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Swm-Wes
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Swm-Wem
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Swm-Wel
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Swm-Nws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Swm-Nwm
    ],
    // Wes
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wes-Stop
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Wes-Nos
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Wes-Nom
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Wes-Nol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wes-Nes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wes-Nem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wes-Eas
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wes-Eam
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wes-Eal
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wes-Ses
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wes-Sem
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Wes-Sos
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Wes-Som
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Wes-Sol
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Wes-Sws
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Wes-Swm
        [false, true , true , true , false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Wes-Wes
        [false, true , true , true , false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Wes-Wem
        [false, true , true , true , false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Wes-Wel
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Wes-Nws
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Wes-Nwm
    ],
    // Wem
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wem-Stop
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Wem-Nos
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Wem-Nom
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Wem-Nol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wem-Nes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wem-Nem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wem-Eas
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wem-Eam
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wem-Eal
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wem-Ses
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wem-Sem
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Wem-Sos
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Wem-Som
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Wem-Sol
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Wem-Sws
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Wem-Swm
        [false, true , true , true , false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Wem-Wes
        [false, true , true , true , false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Wem-Wem
        [false, true , true , true , false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Wem-Wel
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Wem-Nws
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Wem-Nwm
    ],
    // Wel
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wel-Stop
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Wel-Nos
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Wel-Nom
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Wel-Nol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wel-Nes
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wel-Nem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wel-Eas
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wel-Eam
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wel-Eal
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wel-Ses
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Wel-Sem
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Wel-Sos
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Wel-Som
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , false, false], // Wel-Sol
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Wel-Sws
        [false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Wel-Swm
        [false, true , true , true , false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Wel-Wes
        [false, true , true , true , false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Wel-Wem
        [false, true , true , true , false, false, false, false, false, false, false, true , true , true , true , true , true , true , true , true , true ], // Wel-Wel
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Wel-Nws
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Wel-Nwm
    ],
    // Nws
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nws-Stop
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nws-Nos
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nws-Nom
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nws-Nol
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, false, true , true ], // Nws-Nes
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, false, true , true ], // Nws-Nem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nws-Eas
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nws-Eam
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nws-Eal
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nws-Ses
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nws-Sem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nws-Sos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nws-Som
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nws-Sol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Nws-Sws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Nws-Swm
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Nws-Wes
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Nws-Wem
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Nws-Wel
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Nws-Nws
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Nws-Nwm
    ],
    // Nwm
    [
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nwm-Stop
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nwm-Nos
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nwm-Nom
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true ], // Nwm-Nol
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, false, true , true ], // Nwm-Nes
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, false, false, false, false, false, true , true ], // Nwm-Nem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nwm-Eas
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nwm-Eam
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nwm-Eal
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nwm-Ses
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nwm-Sem
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nwm-Sos
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nwm-Som
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false, false], // Nwm-Sol
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Nwm-Sws
        [false, false, false, false, false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Nwm-Swm
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Nwm-Wes
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Nwm-Wem
        [false, true , true , true , false, false, false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Nwm-Wel
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Nwm-Nws
        [false, true , true , true , true , true , false, false, false, false, false, false, false, false, true , true , true , true , true , true , true ], // Nwm-Nwm
    ],
];

impl fmt::Display for AcidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trivector coherence relation, transcribed verbatim from the original
/// engine's `Codon::s_aryCOHERENCE[ACID_MAX][ACID_MAX][ACID_MAX]`: `false`
/// whenever any operand is `Stop`, and otherwise a literal lookup of
/// whether acid `c` may directly follow the pair `(a, b)` in a stroke
/// without breaking it.
pub fn is_coherent(a: AcidType, b: AcidType, c: AcidType) -> bool {
    COHERENCE[a as usize][b as usize][c as usize]
}

/// One base of the four-letter alphabet, ordered `T=0, C=1, A=2, G=3` for
/// codon indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    T,
    C,
    A,
    G,
}

impl Base {
    fn index(self) -> usize {
        match self {
            Base::T => 0,
            Base::C => 1,
            Base::A => 2,
            Base::G => 3,
        }
    }

    pub fn from_char(c: char) -> Option<Base> {
        match c {
            'T' => Some(Base::T),
            'C' => Some(Base::C),
            'A' => Some(Base::A),
            'G' => Some(Base::G),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Base::T => 'T',
            Base::C => 'C',
            Base::A => 'A',
            Base::G => 'G',
        }
    }
}

/// Index of a codon `(b0, b1, b2)` into the 64-entry codon table.
pub fn codon_index(b0: Base, b1: Base, b2: Base) -> usize {
    b0.index() * 16 + b1.index() * 4 + b2.index()
}

const STOP_INDICES: [usize; 3] = [
    10, // TAA
    11, // TAG
    14, // TGA
];

pub const START_CODON: &str = "ATG";

/// A codon -> acid mapping. The default table assigns the three stop
/// codons (`TAA`, `TAG`, `TGA`) to `Stop` and cycles the remaining 61
/// codons, in ascending codon-index order, across the 20 non-stop acids.
///
/// An alternative table may override individual entries, identified by a
/// UUID/author/creation metadata (see `doc::CodonTableDoc`).
#[derive(Debug, Clone, PartialEq)]
pub struct CodonTable {
    entries: [AcidType; 64],
}

impl CodonTable {
    pub fn acid_at(&self, index: usize) -> AcidType {
        self.entries[index]
    }

    pub fn codon_to_acid(&self, b0: Base, b1: Base, b2: Base) -> AcidType {
        self.entries[codon_index(b0, b1, b2)]
    }

    /// Applies a sparse set of per-codon overrides to a copy of this table.
    pub fn with_overrides(&self, overrides: &[(usize, AcidType)]) -> CodonTable {
        let mut entries = self.entries;
        for &(index, acid) in overrides {
            entries[index] = acid;
        }
        CodonTable { entries }
    }

    pub fn is_start(codon: &str) -> bool {
        codon == START_CODON
    }

    pub fn is_stop(&self, b0: Base, b1: Base, b2: Base) -> bool {
        self.codon_to_acid(b0, b1, b2).is_stop()
    }
}

impl Default for CodonTable {
    fn default() -> Self {
        let mut entries = [AcidType::Stop; 64];
        let mut cycle = 0usize;
        for (index, slot) in entries.iter_mut().enumerate() {
            if STOP_INDICES.contains(&index) {
                *slot = AcidType::Stop;
            } else {
                *slot = AcidType::NON_STOP[cycle % AcidType::NON_STOP.len()];
                cycle += 1;
            }
        }
        CodonTable { entries }
    }
}

/// True iff replacing `bases[at..at+replacement.len()]` with `replacement`
/// changes no acid the affected codons decode to (same length, and every
/// whole codon touched decodes identically before and after).
pub fn is_silent_change(table: &CodonTable, bases: &[u8], at: usize, replacement: &[u8]) -> bool {
    if bases.len() != {
        let mut after = bases.to_vec();
        after.splice(at..at + replacement.len(), replacement.iter().copied());
        after.len()
    } {
        return false;
    }

    let mut after = bases.to_vec();
    after.splice(at..at + replacement.len(), replacement.iter().copied());

    let first_codon = at / 3;
    let last_codon = (at + replacement.len() - 1) / 3;
    for codon_i in first_codon..=last_codon {
        let base_i = codon_i * 3;
        if base_i + 3 > bases.len() {
            return false;
        }
        let before = decode_codon(&bases[base_i..base_i + 3], table);
        let after_acid = decode_codon(&after[base_i..base_i + 3], table);
        match (before, after_acid) {
            (Some(b), Some(a)) if b == a => continue,
            _ => return false,
        }
    }
    true
}

fn decode_codon(bytes: &[u8], table: &CodonTable) -> Option<AcidType> {
    let b0 = Base::from_char(bytes[0] as char)?;
    let b1 = Base::from_char(bytes[1] as char)?;
    let b2 = Base::from_char(bytes[2] as char)?;
    Some(table.codon_to_acid(b0, b1, b2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_codons_decode_to_stop() {
        let table = CodonTable::default();
        assert!(table.codon_to_acid(Base::T, Base::A, Base::A).is_stop());
        assert!(table.codon_to_acid(Base::T, Base::A, Base::G).is_stop());
        assert!(table.codon_to_acid(Base::T, Base::G, Base::A).is_stop());
    }

    #[test]
    fn start_codon_is_not_stop() {
        let table = CodonTable::default();
        assert!(!table.codon_to_acid(Base::A, Base::T, Base::G).is_stop());
        assert!(CodonTable::is_start("ATG"));
    }

    #[test]
    fn exactly_three_stop_codons_in_default_table() {
        let table = CodonTable::default();
        let stops = table.entries.iter().filter(|a| a.is_stop()).count();
        assert_eq!(stops, 3);
    }

    #[test]
    fn name_round_trips() {
        for acid in AcidType::ALL {
            assert_eq!(AcidType::from_name(acid.name()), Some(acid));
        }
    }

    #[test]
    fn coherence_is_false_whenever_any_operand_is_stop() {
        assert!(!is_coherent(AcidType::Stop, AcidType::Nos, AcidType::Eas));
        assert!(!is_coherent(AcidType::Nos, AcidType::Stop, AcidType::Eas));
        assert!(!is_coherent(AcidType::Nos, AcidType::Eas, AcidType::Stop));
    }

    #[test]
    fn adjacent_directions_are_coherent() {
        assert!(is_coherent(AcidType::Eas, AcidType::Eas, AcidType::Nes));
    }

    #[test]
    fn opposite_directions_are_incoherent() {
        assert!(!is_coherent(AcidType::Eas, AcidType::Eas, AcidType::Wes));
    }

    #[test]
    fn documented_break_example_is_incoherent() {
        // spec example: coherent(Eas, Nos, STOP) = false (any STOP operand).
        assert!(!is_coherent(AcidType::Eas, AcidType::Nos, AcidType::Stop));
    }

    #[test]
    fn cardinal_acids_have_three_lengths_diagonal_have_two() {
        assert_eq!(AcidType::Nol.length(), Some(Length::Long));
        assert_eq!(AcidType::Nes.length(), Some(Length::Short));
        assert_eq!(AcidType::Nem.length(), Some(Length::Medium));
    }

    #[test]
    fn diagonal_vector_has_equal_components() {
        let v = AcidType::Nes.vector();
        assert!((v.x - v.y).abs() < 1e-9);
    }

    #[test]
    fn silent_change_detects_same_acid_after_replacement() {
        let table = CodonTable::default();
        // Find two distinct T* codons decoding to the same acid, if any exist,
        // else fall back to an identity replacement which is trivially silent.
        let bases = b"ATGTAA".to_vec();
        assert!(is_silent_change(&table, &bases, 0, b"ATG"));
    }
}
