// file: src/config.rs
// description: application configuration management with toml and environment support
// reference: https://docs.rs/config

use crate::error::{Result, SyncError};
use crate::models::{Label, ReferenceLabelSet};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default = "default_labels")]
    pub labels: Vec<Label>,
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GithubConfig {
    pub token: String,
    pub org: String,
    pub api_url: String,
    pub per_page: u32,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SyncConfig {
    pub dry_run: bool,
    pub skip_archived: bool,
    pub repositories: Vec<String>,
}

/// Values taken from the plain `GITHUB_TOKEN` / `ORG_NAME` variables, which
/// win over every other source.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub github_token: Option<String>,
    pub org_name: Option<String>,
}

impl EnvOverrides {
    pub fn from_process() -> Self {
        Self {
            github_token: std::env::var("GITHUB_TOKEN").ok().filter(|v| !v.is_empty()),
            org_name: std::env::var("ORG_NAME").ok().filter(|v| !v.is_empty()),
        }
    }

    pub fn with_org(mut self, org: Option<String>) -> Self {
        if org.is_some() {
            self.org_name = org;
        }
        self
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            org: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            per_page: 100,
            timeout_secs: 30,
            user_agent: concat!("label_sync/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubConfig")
            .field("token", &"<redacted>")
            .field("org", &self.org)
            .field("api_url", &self.api_url)
            .field("per_page", &self.per_page)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_labels() -> Vec<Label> {
    ReferenceLabelSet::common().iter().cloned().collect()
}

impl Config {
    /// Loads `.env`, then layers the optional file, `LABEL_SYNC__*` variables
    /// and the `GITHUB_TOKEN` / `ORG_NAME` overrides. `org` replaces `ORG_NAME`.
    pub fn load(path: Option<&Path>, org: Option<String>) -> Result<Self> {
        dotenv().ok();
        Self::load_with_env(path, EnvOverrides::from_process().with_org(org))
    }

    pub fn load_with_env(path: Option<&Path>, env: EnvOverrides) -> Result<Self> {
        let config = Self::build(path, env)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads only the reference label set. Credentials are not required.
    pub fn load_reference_labels(path: Option<&Path>) -> Result<ReferenceLabelSet> {
        Self::build(path, EnvOverrides::default())?
            .reference_labels()
            .map_err(|e| SyncError::Config(e.to_string()))
    }

    fn build(path: Option<&Path>, env: EnvOverrides) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder
            .add_source(
                config::Environment::with_prefix("LABEL_SYNC")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("sync.repositories")
                    .try_parsing(true),
            )
            .set_override_option("github.token", env.github_token)
            .map_err(|e| SyncError::Config(e.to_string()))?
            .set_override_option("github.org", env.org_name)
            .map_err(|e| SyncError::Config(e.to_string()))?;

        let settings = builder
            .build()
            .map_err(|e| SyncError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| SyncError::Config(e.to_string()))
    }

    pub fn default_config() -> Self {
        Self {
            github: GithubConfig::default(),
            sync: SyncConfig::default(),
            labels: default_labels(),
        }
    }

    pub fn reference_labels(&self) -> Result<ReferenceLabelSet> {
        ReferenceLabelSet::new(self.labels.clone())
    }

    fn validate(&self) -> Result<()> {
        if self.github.token.trim().is_empty() {
            return Err(SyncError::Config(
                "GITHUB_TOKEN is not set".to_string(),
            ));
        }

        if self.github.org.trim().is_empty() {
            return Err(SyncError::Config("ORG_NAME is not set".to_string()));
        }

        if self.github.timeout_secs == 0 {
            return Err(SyncError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Validator::validate_org_name(&self.github.org)
            .and_then(|_| Validator::validate_url(&self.github.api_url))
            .and_then(|_| Validator::validate_per_page(self.github.per_page))
            .and_then(|_| self.reference_labels().map(|_| ()))
            .map_err(|e| SyncError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn env(token: &str, org: &str) -> EnvOverrides {
        EnvOverrides {
            github_token: Some(token.to_string()),
            org_name: Some(org.to_string()),
        }
    }

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_with_env_overrides() {
        let config = Config::load_with_env(None, env("ghp_test", "acme")).unwrap();

        assert_eq!(config.github.token, "ghp_test");
        assert_eq!(config.github.org, "acme");
        assert_eq!(config.github.api_url, DEFAULT_API_URL);
        assert_eq!(config.github.per_page, 100);
        assert_eq!(config.reference_labels().unwrap(), ReferenceLabelSet::common());
        assert!(!config.sync.dry_run);
    }

    #[test]
    fn test_with_org_keeps_env_value_when_absent() {
        let overrides = env("t", "from-env").with_org(None);
        assert_eq!(overrides.org_name.as_deref(), Some("from-env"));

        let overrides = env("t", "from-env").with_org(Some("from-flag".to_string()));
        assert_eq!(overrides.org_name.as_deref(), Some("from-flag"));
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let overrides = EnvOverrides {
            github_token: None,
            org_name: Some("acme".to_string()),
        };
        let err = Config::load_with_env(None, overrides).unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }

    #[test]
    fn test_file_values_and_override_precedence() {
        let file = write_toml(
            r#"
[github]
token = "from-file"
org = "file-org"
per_page = 50

[sync]
skip_archived = true
repositories = ["api", "web"]

[[labels]]
name = "bug"
color = "d73a4a"
description = "Something isn't working"
"#,
        );

        let config = Config::load_with_env(Some(file.path()), env("from-env", "env-org")).unwrap();

        assert_eq!(config.github.token, "from-env");
        assert_eq!(config.github.org, "env-org");
        assert_eq!(config.github.per_page, 50);
        assert!(config.sync.skip_archived);
        assert_eq!(config.sync.repositories, vec!["api", "web"]);

        let labels = config.reference_labels().unwrap();
        assert_eq!(labels.len(), 1);
        assert!(labels.contains("bug"));
    }

    #[test]
    fn test_reference_labels_load_without_credentials() {
        let file = write_toml(
            r#"
[[labels]]
name = "triage"
color = "fbca04"
"#,
        );

        assert!(Config::load_with_env(Some(file.path()), EnvOverrides::default()).is_err());

        let labels = Config::load_reference_labels(Some(file.path())).unwrap();
        assert_eq!(labels.len(), 1);
        assert!(labels.contains("triage"));
    }

    #[test]
    fn test_reference_labels_default_without_file() {
        let labels = Config::load_reference_labels(None).unwrap();
        assert_eq!(labels, ReferenceLabelSet::common());
    }

    #[test]
    fn test_reference_labels_reject_invalid_file() {
        let file = write_toml("[[labels]]\nname = \"bug\"\ncolor = \"red\"\n");
        let err = Config::load_reference_labels(Some(file.path())).unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }

    #[test]
    fn test_invalid_label_color_in_file() {
        let file = write_toml(
            r##"
[[labels]]
name = "bug"
color = "#d73a4a"
"##,
        );

        let err = Config::load_with_env(Some(file.path()), env("t", "acme")).unwrap_err();
        assert!(err.to_string().contains("6 hex digits"));
    }

    #[test]
    fn test_per_page_bounds() {
        let file = write_toml("[github]\nper_page = 500\n");
        assert!(Config::load_with_env(Some(file.path()), env("t", "acme")).is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut config = Config::default_config();
        config.github.token = "ghp_secret".to_string();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
