//! Recorded mutations and the stacks used to undo them.
//!
//! The original's `IModification` class hierarchy (`ChangeModification`,
//! `CopyModification`, ...) becomes one tagged `Modification` enum per the
//! REDESIGN FLAGS; `ModificationStack` keeps its name and undo-on-pop
//! behavior.

/// Which kind of mutation produced a `Modification` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationType {
    Copy,
    Change,
    Delete,
    Insert,
    Transpose,
}

/// Which rollback stack(s) retain a modification, controlling how deeply a
/// rejected attempt or consideration is undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackType {
    /// Undo only the current attempt.
    Attempt,
    /// Undo only the current consideration (may span several attempts).
    Consideration,
    /// Undo both: an attempt nested within a consideration.
    Combined,
}

/// A single recorded, undoable edit to a gene's bases.
#[derive(Debug, Clone, PartialEq)]
pub enum Modification {
    Change {
        gene: usize,
        target: usize,
        bases_before: String,
        bases_after: String,
        silent: bool,
    },
    Copy {
        gene: usize,
        source: usize,
        target: usize,
        bases: String,
    },
    Delete {
        gene: usize,
        target: usize,
        bases: String,
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
        bases: String,
    },
}

impl Modification {
    pub fn mutation_type(&self) -> MutationType {
        match self {
            Modification::Change { .. } => MutationType::Change,
            Modification::Copy { .. } => MutationType::Copy,
            Modification::Delete { .. } => MutationType::Delete,
            Modification::Insert { .. } => MutationType::Insert,
            Modification::Transpose { .. } => MutationType::Transpose,
        }
    }

    /// Number of bases affected, used for statistics and silent-change
    /// accounting.
    pub fn length(&self) -> usize {
        match self {
            Modification::Change { bases_after, .. } => bases_after.len(),
            Modification::Copy { bases, .. }
            | Modification::Delete { bases, .. }
            | Modification::Insert { bases, .. }
            | Modification::Transpose { bases, .. } => bases.len(),
        }
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, Modification::Change { silent: true, .. })
    }

    /// Applies the inverse of this modification to `bases`, reverting the
    /// genome's base string to its pre-modification content.
    pub fn undo(&self, bases_buf: &mut String) {
        match self {
            Modification::Change {
                target,
                bases_before,
                bases_after,
                ..
            } => {
                replace_range(bases_buf, *target, bases_after.len(), bases_before);
            }
            Modification::Copy {
                target,
                bases: copied,
                ..
            } => {
                replace_range(bases_buf, *target, copied.len(), "");
            }
            Modification::Delete {
                target,
                bases: deleted,
                ..
            } => {
                insert_at(bases_buf, *target, deleted);
            }
            Modification::Insert {
                target,
                bases: inserted,
                ..
            } => {
                replace_range(bases_buf, *target, inserted.len(), "");
            }
            Modification::Transpose {
                source,
                target,
                bases: moved,
                ..
            } => {
                // Transpose moved `bases` from `source` to `target`; undo by
                // removing from `target` and reinserting at `source`.
                replace_range(bases_buf, *target, moved.len(), "");
                insert_at(bases_buf, *source, moved);
            }
        }
    }
}

fn replace_range(bases: &mut String, at: usize, len: usize, with: &str) {
    bases.replace_range(at..at + len, with);
}

fn insert_at(bases: &mut String, at: usize, with: &str) {
    bases.insert_str(at, with);
}

/// An ordered stack of modifications, undone most-recent-first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModificationStack {
    description: String,
    modifications: Vec<Modification>,
}

impl ModificationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, modification: Modification) {
        self.modifications.push(modification);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_empty(&self) -> bool {
        self.modifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modifications.len()
    }

    pub fn clear(&mut self) {
        self.modifications.clear();
    }

    /// Undoes every recorded modification against `bases`, most-recent
    /// first, emptying the stack.
    pub fn undo(&mut self, bases: &mut String) {
        while let Some(modification) = self.modifications.pop() {
            modification.undo(bases);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modification> {
        self.modifications.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_change_restores_prior_bases() {
        let mut bases = "ATGCCCTAA".to_string();
        let modification = Modification::Change {
            gene: 0,
            target: 3,
            bases_before: "CCC".into(),
            bases_after: "GGG".into(),
            silent: false,
        };
        bases.replace_range(3..6, "GGG");
        assert_eq!(bases, "ATGGGGTAA");
        modification.undo(&mut bases);
        assert_eq!(bases, "ATGCCCTAA");
    }

    #[test]
    fn undo_insert_removes_inserted_bases() {
        let mut bases = "ATGCCCTAA".to_string();
        bases.insert_str(6, "GGG");
        assert_eq!(bases, "ATGCCCGGGTAA");
        let modification = Modification::Insert {
            gene: 0,
            target: 6,
            bases: "GGG".into(),
        };
        modification.undo(&mut bases);
        assert_eq!(bases, "ATGCCCTAA");
    }

    #[test]
    fn undo_delete_reinserts_deleted_bases() {
        let mut bases = "ATGCCCTAA".to_string();
        let deleted = bases[3..6].to_string();
        bases.replace_range(3..6, "");
        assert_eq!(bases, "ATGTAA");
        let modification = Modification::Delete {
            gene: 0,
            target: 3,
            bases: deleted,
        };
        modification.undo(&mut bases);
        assert_eq!(bases, "ATGCCCTAA");
    }

    #[test]
    fn stack_undoes_in_reverse_order() {
        let mut bases = "ATGTAA".to_string();
        let mut stack = ModificationStack::new();

        bases.insert_str(3, "CCC");
        stack.record(Modification::Insert {
            gene: 0,
            target: 3,
            bases: "CCC".into(),
        });
        assert_eq!(bases, "ATGCCCTAA");

        bases.insert_str(6, "GGG");
        stack.record(Modification::Insert {
            gene: 0,
            target: 6,
            bases: "GGG".into(),
        });
        assert_eq!(bases, "ATGCCCGGGTAA");

        stack.undo(&mut bases);
        assert_eq!(bases, "ATGTAA");
        assert!(stack.is_empty());
    }
}
