// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod label;
pub mod repository;

pub use label::{Label, ReferenceLabelSet};
pub use repository::Repository;
