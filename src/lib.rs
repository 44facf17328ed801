// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod github;
pub mod models;
pub mod reconcile;
pub mod utils;

pub use config::{Config, EnvOverrides, GithubConfig, SyncConfig};
pub use error::{Result, SyncError};
pub use exporter::JsonExporter;
pub use github::{CreateOutcome, DeleteOutcome, GithubClient, LabelApi};
pub use models::{Label, ReferenceLabelSet, Repository};
pub use reconcile::{
    LabelPlan, ReconcileOptions, ReconcileReport, Reconciler, RepositoryReport, RunStats,
};
pub use utils::Validator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        assert_eq!(config.reference_labels().unwrap(), ReferenceLabelSet::common());
        assert!(LabelPlan::default().is_empty());
    }
}
