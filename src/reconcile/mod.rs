// file: src/reconcile/mod.rs
// description: label reconciliation module exports
// reference: internal module structure

pub mod plan;
pub mod progress;
pub mod reconciler;

pub use plan::LabelPlan;
pub use progress::{ProgressTracker, RunStats};
pub use reconciler::{
    MutationFailure, MutationKind, ReconcileOptions, ReconcileReport, Reconciler,
    RepositoryReport,
};
