// file: src/github/mod.rs
// description: GitHub label API surface and module exports
// reference: https://docs.github.com/en/rest/issues/labels

pub mod client;
pub mod pagination;

pub use client::GithubClient;

use crate::error::Result;
use crate::models::{Label, Repository};
use serde::Serialize;

/// Result of a label creation attempt. Only transport errors are returned as `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
    Failed { status: u16, body: String },
}

/// Result of a label deletion attempt. Only transport errors are returned as `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    Failed { status: u16, body: String },
}

/// Label operations the reconciler needs from GitHub.
///
/// Listing calls fail with [`crate::SyncError::Http`] on any non-success status.
/// Mutations report non-success statuses through their outcome types instead.
#[allow(async_fn_in_trait)]
pub trait LabelApi {
    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>>;

    async fn list_labels(&self, org: &str, repo: &str) -> Result<Vec<Label>>;

    async fn create_label(&self, org: &str, repo: &str, label: &Label) -> Result<CreateOutcome>;

    async fn delete_label(&self, org: &str, repo: &str, name: &str) -> Result<DeleteOutcome>;
}
