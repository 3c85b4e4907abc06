//! ngxtract - translation key extractor for angular-translate
//!
//! ngxtract scans HTML and JavaScript/TypeScript sources for angular-translate
//! usages (filters, directives, `$translate` calls, `/* i18nextract */`
//! comments) and keeps one JSON dictionary per locale in sync with them.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Pattern catalog, extraction and reconciliation engine

pub mod cli;
pub mod config;
pub mod core;
