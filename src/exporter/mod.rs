// file: src/exporter/mod.rs
// description: run report exporters
// reference: internal module structure

pub mod json;

pub use json::{ExportedReport, JsonExporter};
