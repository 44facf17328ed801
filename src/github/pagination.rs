// file: src/github/pagination.rs
// description: Link header parsing for paginated GitHub list endpoints
// reference: https://docs.github.com/en/rest/using-the-rest-api/using-pagination-in-the-rest-api

use crate::error::{Result, SyncError};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;
use reqwest::header::{HeaderMap, LINK};

lazy_static! {
    static ref LINK_NEXT: Regex =
        Regex::new(r#"^\s*<([^>]+)>\s*;.*\brel="?next"?"#).expect("LINK_NEXT regex is valid");
}

/// Extracts the `rel="next"` target from a `Link` header value.
pub fn parse_next_link(header: &str) -> Option<&str> {
    header
        .split(',')
        .find_map(|part| LINK_NEXT.captures(part))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn next_page(headers: &HeaderMap) -> Result<Option<Url>> {
    let Some(value) = headers.get(LINK) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|e| SyncError::Validation(format!("Malformed Link header: {}", e)))?;

    parse_next_link(value)
        .map(|next| {
            Url::parse(next)
                .map_err(|e| SyncError::Validation(format!("Invalid next page URL {}: {}", next, e)))
        })
        .transpose()
}
