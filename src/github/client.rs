// file: src/github/client.rs
// description: reqwest-based GitHub REST client for repository and label operations
// reference: https://docs.github.com/en/rest/issues/labels

use crate::config::GithubConfig;
use crate::error::{Result, SyncError};
use crate::github::pagination;
use crate::github::{CreateOutcome, DeleteOutcome, LabelApi};
use crate::models::{Label, Repository};
use crate::utils::Validator;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    base_url: Url,
    per_page: u32,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("token {}", config.token))
            .map_err(|e| SyncError::Config(format!("Invalid GitHub token: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        let base_url = Url::parse(&config.api_url)
            .map_err(|e| SyncError::Config(format!("Invalid API URL {}: {}", config.api_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(SyncError::Config(format!(
                "API URL cannot be used as a base: {}",
                config.api_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            per_page: config.per_page,
        })
    }

    /// Appends each segment percent-encoded, so label names with spaces,
    /// slashes or emoji stay a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_paginated<T: DeserializeOwned>(&self, mut url: Url) -> Result<Vec<T>> {
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string());

        let mut items = Vec::new();
        let mut next = Some(url);

        while let Some(url) = next.take() {
            debug!("GET {}", url);

            let response = self.client.get(url.clone()).send().await?;
            let response = ensure_success(response, &url).await?;

            next = pagination::next_page(response.headers())?.filter(|candidate| *candidate != url);

            let page: Vec<T> = response.json().await.map_err(|e| SyncError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })?;

            debug!("Fetched {} items from {}", page.len(), url);
            items.extend(page);
        }

        Ok(items)
    }
}

async fn ensure_success(response: Response, url: &Url) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(SyncError::Http {
        status: status.as_u16(),
        url: url.to_string(),
        body,
    })
}

impl LabelApi for GithubClient {
    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>> {
        self.get_paginated(self.endpoint(&["orgs", org, "repos"]))
            .await
    }

    async fn list_labels(&self, org: &str, repo: &str) -> Result<Vec<Label>> {
        self.get_paginated(self.endpoint(&["repos", org, repo, "labels"]))
            .await
    }

    async fn create_label(&self, org: &str, repo: &str, label: &Label) -> Result<CreateOutcome> {
        let url = self.endpoint(&["repos", org, repo, "labels"]);
        debug!("POST {} ({})", url, label.name);

        let response = self.client.post(url).json(label).send().await?;

        match response.status() {
            StatusCode::CREATED => Ok(CreateOutcome::Created),
            StatusCode::UNPROCESSABLE_ENTITY => Ok(CreateOutcome::AlreadyExists),
            status => Ok(CreateOutcome::Failed {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }

    async fn delete_label(&self, org: &str, repo: &str, name: &str) -> Result<DeleteOutcome> {
        Validator::validate_path_segment(name)?;
        let url = self.endpoint(&["repos", org, repo, "labels", name]);
        debug!("DELETE {}", url);

        let response = self.client.delete(url).send().await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(DeleteOutcome::Deleted),
            status => Ok(DeleteOutcome::Failed {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}
