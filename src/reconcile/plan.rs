// file: src/reconcile/plan.rs
// description: name-based diff between a repository's labels and the reference set

use crate::models::{Label, ReferenceLabelSet};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelPlan {
    /// Reference labels absent from the repository, in reference order.
    pub to_create: Vec<Label>,
    /// Repository label names absent from the reference set, in listing order.
    pub to_delete: Vec<String>,
}

impl LabelPlan {
    pub fn compute(reference: &ReferenceLabelSet, existing: &[Label]) -> Self {
        let existing_names: HashSet<&str> = existing.iter().map(|l| l.name.as_str()).collect();
        let reference_names = reference.names();

        let to_create = reference
            .iter()
            .filter(|label| !existing_names.contains(label.name.as_str()))
            .cloned()
            .collect();

        let mut seen = HashSet::new();
        let to_delete = existing
            .iter()
            .map(|label| label.name.as_str())
            .filter(|name| !reference_names.contains(name) && seen.insert(*name))
            .map(str::to_string)
            .collect();

        Self {
            to_create,
            to_delete,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_delete.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reference(names: &[&str]) -> ReferenceLabelSet {
        ReferenceLabelSet::new(names.iter().map(|n| Label::new(*n, "008672")).collect()).unwrap()
    }

    fn labels(names: &[&str]) -> Vec<Label> {
        names.iter().map(|n| Label::new(*n, "ededed")).collect()
    }

    #[test]
    fn test_create_missing_delete_extraneous() {
        let plan = LabelPlan::compute(&reference(&["B", "C"]), &labels(&["A", "B"]));

        assert_eq!(plan.to_create, vec![Label::new("C", "008672")]);
        assert_eq!(plan.to_delete, vec!["A".to_string()]);
    }

    #[test]
    fn test_matching_repository_has_empty_plan() {
        let plan = LabelPlan::compute(&reference(&["B", "C"]), &labels(&["C", "B"]));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_color_mismatch_is_not_a_difference() {
        let existing = vec![Label::new("B", "ffffff")];
        assert!(LabelPlan::compute(&reference(&["B"]), &existing).is_empty());
    }

    #[test]
    fn test_creation_follows_reference_order() {
        let plan = LabelPlan::compute(&reference(&["z", "a", "m"]), &[]);
        let names: Vec<&str> = plan.to_create.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
        assert!(plan.to_delete.is_empty());
    }

    #[test]
    fn test_duplicate_listing_deletes_once() {
        let plan = LabelPlan::compute(&reference(&["keep"]), &labels(&["old", "keep", "old", "stale"]));
        assert_eq!(plan.to_delete, vec!["old".to_string(), "stale".to_string()]);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let plan = LabelPlan::compute(&reference(&["Bug"]), &labels(&["bug"]));
        assert_eq!(plan.to_create.len(), 1);
        assert_eq!(plan.to_delete, vec!["bug".to_string()]);
    }
}
