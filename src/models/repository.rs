// file: src/models/repository.rs
// description: organization repository record as returned by the GitHub API

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub archived: bool,
}

impl Repository {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            archived: false,
        }
    }

    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }
}
