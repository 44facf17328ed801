// file: src/models/label.rs
// description: issue label model and the reference label set every repository should carry
// reference: https://docs.github.com/en/rest/issues/labels

use crate::error::{Result, SyncError};
use crate::utils::Validator;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An issue label. Identity within a repository is the `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Label {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_label_name(&self.name)?;
        Validator::validate_label_color(&self.color)
    }
}

const COMMON_LABELS: [(&str, &str); 5] = [
    ("🚨 bug", "f29513"),
    ("🎉 enhancement", "a2eeef"),
    ("🔥 feature", "008672"),
    ("💬 question", "d876e3"),
    ("📝 documentation", "008672"),
];

/// Ordered, immutable set of labels that should exist in every repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceLabelSet {
    labels: Vec<Label>,
}

impl ReferenceLabelSet {
    /// The built-in common label set.
    pub fn common() -> Self {
        Self {
            labels: COMMON_LABELS
                .iter()
                .map(|(name, color)| Label::new(*name, *color))
                .collect(),
        }
    }

    /// Builds a set from configured labels, rejecting empty sets, invalid
    /// entries and duplicate names.
    pub fn new(labels: Vec<Label>) -> Result<Self> {
        if labels.is_empty() {
            return Err(SyncError::Validation(
                "reference label set must contain at least one label".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for label in &labels {
            label.validate()?;
            if !seen.insert(label.name.as_str()) {
                return Err(SyncError::Validation(format!(
                    "duplicate label in reference set: {}",
                    label.name
                )));
            }
        }

        Ok(Self { labels })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    pub fn names(&self) -> HashSet<&str> {
        self.labels.iter().map(|label| label.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for ReferenceLabelSet {
    fn default() -> Self {
        Self::common()
    }
}
