// file: src/exporter/json.rs
// description: json export of reconciliation run reports

use crate::error::{Result, SyncError};
use crate::reconcile::ReconcileReport;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportedReport<'a> {
    pub generated_at: String,
    #[serde(flatten)]
    pub report: &'a ReconcileReport,
}

impl JsonExporter {
    /// Creates the parent directory of `output_path` if needed.
    pub fn new(output_path: impl Into<PathBuf>) -> Result<Self> {
        let output_path = output_path.into();
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { output_path })
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }

    pub fn export_report(&self, report: &ReconcileReport, pretty: bool) -> Result<()> {
        let exported = ExportedReport {
            generated_at: Utc::now().to_rfc3339(),
            report,
        };

        let json = if pretty {
            serde_json::to_string_pretty(&exported)
        } else {
            serde_json::to_string(&exported)
        }
        .map_err(|e| SyncError::Serialization(e.to_string()))?;

        fs::write(&self.output_path, json)?;

        info!(
            "Wrote report for {} repositories to {}",
            report.repositories.len(),
            self.output_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Label;
    use crate::reconcile::{LabelPlan, RepositoryReport, RunStats};
    use tempfile::tempdir;

    fn sample_report() -> ReconcileReport {
        ReconcileReport {
            org: "acme".to_string(),
            dry_run: false,
            repositories: vec![RepositoryReport {
                repository: "api".to_string(),
                plan: LabelPlan {
                    to_create: vec![Label::new("C", "008672")],
                    to_delete: vec!["A".to_string()],
                },
                created: vec!["C".to_string()],
                deleted: vec!["A".to_string()],
                ..RepositoryReport::default()
            }],
            skipped: vec!["legacy".to_string()],
            stats: RunStats {
                repositories_processed: 1,
                repositories_skipped: 1,
                labels_created: 1,
                labels_deleted: 1,
                ..RunStats::new()
            },
        }
    }

    #[test]
    fn test_exporter_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports/run.json");
        let exporter = JsonExporter::new(&path).unwrap();

        assert!(path.parent().unwrap().is_dir());
        assert_eq!(exporter.path(), path.as_path());
    }

    #[test]
    fn test_export_report_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        let exporter = JsonExporter::new(&path).unwrap();

        exporter.export_report(&sample_report(), true).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["org"], "acme");
        assert_eq!(value["skipped"][0], "legacy");
        assert_eq!(value["repositories"][0]["created"][0], "C");
        assert_eq!(value["repositories"][0]["plan"]["to_delete"][0], "A");
        assert_eq!(value["stats"]["labels_deleted"], 1);
        assert!(value["generated_at"].as_str().is_some());
    }
}
