// file: src/reconcile/reconciler.rs
// description: brings every repository's labels in an organization to the reference set
// reference: sequential list, diff, create, delete workflow

use crate::config::SyncConfig;
use crate::error::Result;
use crate::github::{CreateOutcome, DeleteOutcome, LabelApi};
use crate::models::{Label, ReferenceLabelSet, Repository};
use crate::reconcile::plan::LabelPlan;
use crate::reconcile::progress::{ProgressTracker, RunStats};
use crate::utils::Validator;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Response bodies are cut to this many characters in logs and reports.
const MAX_BODY_CHARS: usize = 200;

#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    pub dry_run: bool,
    pub skip_archived: bool,
    /// When non-empty, only these repositories are reconciled.
    pub repositories: Vec<String>,
    pub show_progress: bool,
    pub colored: bool,
}

impl From<&SyncConfig> for ReconcileOptions {
    fn from(config: &SyncConfig) -> Self {
        Self {
            dry_run: config.dry_run,
            skip_archived: config.skip_archived,
            repositories: config.repositories.clone(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Create,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationFailure {
    pub kind: MutationKind,
    pub label: String,
    pub status: Option<u16>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RepositoryReport {
    pub repository: String,
    pub plan: LabelPlan,
    pub created: Vec<String>,
    pub already_existing: Vec<String>,
    pub deleted: Vec<String>,
    pub failures: Vec<MutationFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    pub org: String,
    pub dry_run: bool,
    pub repositories: Vec<RepositoryReport>,
    pub skipped: Vec<String>,
    pub stats: RunStats,
}

impl ReconcileReport {
    pub fn has_failures(&self) -> bool {
        self.repositories.iter().any(|r| !r.failures.is_empty())
    }

    pub fn pending_changes(&self) -> usize {
        self.repositories
            .iter()
            .map(|r| r.plan.to_create.len() + r.plan.to_delete.len())
            .sum()
    }
}

pub struct Reconciler<'a, A: LabelApi> {
    api: &'a A,
    reference: &'a ReferenceLabelSet,
    options: ReconcileOptions,
}

impl<'a, A: LabelApi> Reconciler<'a, A> {
    pub fn new(api: &'a A, reference: &'a ReferenceLabelSet, options: ReconcileOptions) -> Self {
        Self {
            api,
            reference,
            options,
        }
    }

    /// Reconciles every repository of `org`.
    ///
    /// Listing failures abort the run and are returned as errors. Failed
    /// creations and deletions are logged, recorded in the report, and the
    /// run moves on.
    pub async fn reconcile(&self, org: &str) -> Result<ReconcileReport> {
        let start = Instant::now();
        info!("Listing repositories for organization {}", org);

        let repositories = self.api.list_repositories(org).await?;
        info!("Found {} repositories in {}", repositories.len(), org);
        self.warn_unknown_filters(&repositories);

        let progress = if self.options.show_progress {
            ProgressTracker::new(repositories.len(), self.options.colored)
        } else {
            ProgressTracker::hidden()
        };

        let mut reports = Vec::new();
        let mut skipped = Vec::new();

        for repository in &repositories {
            progress.start_repository(&repository.name);

            if let Some(reason) = self.skip_reason(repository) {
                debug!("Skipping {}: {}", repository.name, reason);
                skipped.push(repository.name.clone());
                progress.inc_repositories_skipped();
                continue;
            }

            let report = self
                .reconcile_repository(org, &repository.name, &progress)
                .await?;
            reports.push(report);
            progress.inc_repositories_processed();
        }

        progress.finish();

        let mut stats = progress.get_stats();
        stats.duration_secs = start.elapsed().as_secs();

        Ok(ReconcileReport {
            org: org.to_string(),
            dry_run: self.options.dry_run,
            repositories: reports,
            skipped,
            stats,
        })
    }

    async fn reconcile_repository(
        &self,
        org: &str,
        repo: &str,
        progress: &ProgressTracker,
    ) -> Result<RepositoryReport> {
        let existing = self.api.list_labels(org, repo).await?;
        let plan = LabelPlan::compute(self.reference, &existing);

        let mut report = RepositoryReport {
            repository: repo.to_string(),
            plan: plan.clone(),
            ..RepositoryReport::default()
        };

        if plan.is_empty() {
            progress.suspend(|| debug!("{} already matches the reference labels", repo));
            return Ok(report);
        }

        if self.options.dry_run {
            progress.suspend(|| log_plan(repo, &plan));
            return Ok(report);
        }

        for label in &plan.to_create {
            self.create(org, repo, label, progress, &mut report).await;
        }

        for name in &plan.to_delete {
            self.delete(org, repo, name, progress, &mut report).await;
        }

        Ok(report)
    }

    async fn create(
        &self,
        org: &str,
        repo: &str,
        label: &Label,
        progress: &ProgressTracker,
        report: &mut RepositoryReport,
    ) {
        match self.api.create_label(org, repo, label).await {
            Ok(CreateOutcome::Created) => {
                progress.suspend(|| {
                    info!("Successfully created label {} in {}", label.name, repo)
                });
                progress.inc_created();
                report.created.push(label.name.clone());
            }
            Ok(CreateOutcome::AlreadyExists) => {
                progress.suspend(|| info!("Label {} already exists in {}", label.name, repo));
                progress.inc_already_existing();
                report.already_existing.push(label.name.clone());
            }
            Ok(CreateOutcome::Failed { status, body }) => {
                let body = Validator::truncate_text(&body, MAX_BODY_CHARS);
                progress.suspend(|| {
                    error!(
                        "Failed to create label {} in {}: {} {}",
                        label.name, repo, status, body
                    )
                });
                progress.inc_failed();
                report
                    .failures
                    .push(failure(MutationKind::Create, &label.name, Some(status), body));
            }
            Err(e) => {
                progress.suspend(|| {
                    error!("Failed to create label {} in {}: {}", label.name, repo, e)
                });
                progress.inc_failed();
                report.failures.push(failure(
                    MutationKind::Create,
                    &label.name,
                    e.status(),
                    e.to_string(),
                ));
            }
        }
    }

    async fn delete(
        &self,
        org: &str,
        repo: &str,
        name: &str,
        progress: &ProgressTracker,
        report: &mut RepositoryReport,
    ) {
        match self.api.delete_label(org, repo, name).await {
            Ok(DeleteOutcome::Deleted) => {
                progress.suspend(|| info!("Successfully deleted label {} in {}", name, repo));
                progress.inc_deleted();
                report.deleted.push(name.to_string());
            }
            Ok(DeleteOutcome::Failed { status, body }) => {
                let body = Validator::truncate_text(&body, MAX_BODY_CHARS);
                progress.suspend(|| {
                    error!("Failed to delete label {} in {}: {} {}", name, repo, status, body)
                });
                progress.inc_failed();
                report
                    .failures
                    .push(failure(MutationKind::Delete, name, Some(status), body));
            }
            Err(e) => {
                progress.suspend(|| error!("Failed to delete label {} in {}: {}", name, repo, e));
                progress.inc_failed();
                report.failures.push(failure(
                    MutationKind::Delete,
                    name,
                    e.status(),
                    e.to_string(),
                ));
            }
        }
    }

    fn skip_reason(&self, repository: &Repository) -> Option<&'static str> {
        if !self.options.repositories.is_empty()
            && !self.options.repositories.contains(&repository.name)
        {
            return Some("not selected");
        }

        if self.options.skip_archived && repository.archived {
            return Some("archived");
        }

        None
    }

    fn warn_unknown_filters(&self, repositories: &[Repository]) {
        for wanted in &self.options.repositories {
            if !repositories.iter().any(|r| &r.name == wanted) {
                warn!("Selected repository {} was not found in the organization", wanted);
            }
        }
    }
}

fn failure(kind: MutationKind, label: &str, status: Option<u16>, message: String) -> MutationFailure {
    MutationFailure {
        kind,
        label: label.to_string(),
        status,
        message,
    }
}

fn log_plan(repo: &str, plan: &LabelPlan) {
    for label in &plan.to_create {
        info!("[dry-run] would create label {} in {}", label.name, repo);
    }
    for name in &plan.to_delete {
        info!("[dry-run] would delete label {} in {}", name, repo);
    }
}
