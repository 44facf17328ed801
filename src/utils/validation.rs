// file: src/utils/validation.rs
// description: input validation for configuration values and label definitions
// reference: input validation patterns

use crate::error::{Result, SyncError};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEX_COLOR: Regex =
        Regex::new(r"^[0-9a-fA-F]{6}$").expect("HEX_COLOR regex is valid");

    // GitHub logins: alphanumerics and single hyphens, no leading hyphen
    static ref ORG_NAME: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]{0,38}$").expect("ORG_NAME regex is valid");
}

pub struct Validator;

impl Validator {
    pub fn validate_not_empty(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(SyncError::Validation(format!("{} must not be empty", field)));
        }
        Ok(())
    }

    pub fn validate_org_name(org: &str) -> Result<()> {
        Self::validate_not_empty("organization name", org)?;

        if !ORG_NAME.is_match(org) {
            return Err(SyncError::Validation(format!(
                "Invalid organization name: {}",
                org
            )));
        }
        Ok(())
    }

    pub fn validate_label_name(name: &str) -> Result<()> {
        Self::validate_not_empty("label name", name)?;

        // GitHub rejects label names longer than 50 characters
        if name.chars().count() > 50 {
            return Err(SyncError::Validation(format!(
                "Label name too long (max 50 characters): {}",
                name
            )));
        }
        Ok(())
    }

    pub fn validate_label_color(color: &str) -> Result<()> {
        if !HEX_COLOR.is_match(color) {
            return Err(SyncError::Validation(format!(
                "Label color must be 6 hex digits without '#': {}",
                color
            )));
        }
        Ok(())
    }

    /// URL parsers collapse `.` and `..` segments, so such names cannot be
    /// addressed as a single path segment.
    pub fn validate_path_segment(segment: &str) -> Result<()> {
        if segment == "." || segment == ".." {
            return Err(SyncError::Validation(format!(
                "'{}' cannot be used as a URL path segment",
                segment
            )));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SyncError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_per_page(per_page: u32) -> Result<()> {
        if per_page == 0 {
            return Err(SyncError::Validation(
                "per_page must be greater than 0".to_string(),
            ));
        }

        if per_page > 100 {
            return Err(SyncError::Validation(
                "per_page too large (max 100)".to_string(),
            ));
        }

        Ok(())
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &text[..idx]),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(Validator::validate_not_empty("token", "ghp_abc").is_ok());
        assert!(Validator::validate_not_empty("token", "").is_err());
        assert!(Validator::validate_not_empty("token", "   ").is_err());
    }

    #[test]
    fn test_validate_org_name() {
        assert!(Validator::validate_org_name("acme").is_ok());
        assert!(Validator::validate_org_name("acme-labs-2").is_ok());
        assert!(Validator::validate_org_name("").is_err());
        assert!(Validator::validate_org_name("-acme").is_err());
        assert!(Validator::validate_org_name("acme/repo").is_err());
    }

    #[test]
    fn test_validate_label_color() {
        assert!(Validator::validate_label_color("f29513").is_ok());
        assert!(Validator::validate_label_color("A2EEEF").is_ok());
        assert!(Validator::validate_label_color("#f29513").is_err());
        assert!(Validator::validate_label_color("f2951").is_err());
        assert!(Validator::validate_label_color("zzzzzz").is_err());
    }

    #[test]
    fn test_validate_label_name() {
        assert!(Validator::validate_label_name("🚨 bug").is_ok());
        assert!(Validator::validate_label_name(" ").is_err());
        assert!(Validator::validate_label_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_path_segment() {
        assert!(Validator::validate_path_segment(".").is_err());
        assert!(Validator::validate_path_segment("..").is_err());
        assert!(Validator::validate_path_segment("...").is_ok());
        assert!(Validator::validate_path_segment(".github").is_ok());
    }

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://api.github.com").is_ok());
        assert!(Validator::validate_url("http://localhost:8080").is_ok());
        assert!(Validator::validate_url("api.github.com").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_per_page() {
        assert!(Validator::validate_per_page(100).is_ok());
        assert!(Validator::validate_per_page(0).is_err());
        assert!(Validator::validate_per_page(101).is_err());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
        assert_eq!(Validator::truncate_text("🚨🚨🚨", 2), "🚨🚨...");
    }
}
