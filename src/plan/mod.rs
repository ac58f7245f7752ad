//! Plan-driven mutation trials: templates, trial/termination conditions,
//! and the execution loop that drives a `Genome` through them.

pub mod condition;
pub mod execute;
pub mod mutation;

pub use condition::{ConditionMode, DurationTermination, FitnessTermination, RollbackTermination, TrialCondition, ValueBucket};
pub use execute::{execute_plan, IndexRangeKind, Plan, PlanOptions, Step, StepMutation, StatusCallback, TerminationConditions, TrialConditions};
pub use mutation::{concretize, enumerate_exhaustive, ConcreteMutation, GeneWindow, IndexRange, MutationKind, MutationTemplate};
