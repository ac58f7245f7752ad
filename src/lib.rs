//! A deterministic in-silico evolution engine for genomes whose bases
//! encode two-dimensional stroke geometry resembling Han (Chinese) glyphs.
//!
//! The engine is split along the same seams as the original design: fixed
//! codon/acid tables (`acid`), geometry primitives (`geometry`), the
//! owned genome state machine and its mutation/rollback bookkeeping
//! (`genome`), reference Han glyph definitions (`han`), weighted score
//! aggregation (`genome::score`), plan-driven trial execution (`plan`),
//! the abstract RNG interface (`random`), accumulated statistics
//! (`stats`), and the document shapes an external XML (de)serializer
//! targets (`doc`).

pub mod acid;
pub mod doc;
pub mod err;
pub mod genome;
pub mod geometry;
pub mod han;
pub mod plan;
pub mod random;
pub mod stats;

pub use err::{EngineError, Result};
pub use genome::{Genome, GenomeReason, GenomeState, GenomeTermination};
pub use han::{Han, HanTable};
pub use random::{IRandom, SystemRandom};
