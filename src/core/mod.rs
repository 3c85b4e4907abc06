//! Extraction and reconciliation engine.
//!
//! The pure parts take strings and maps and never touch the file system:
//!
//! 1. [`patterns`] builds the catalog of named regular expressions.
//! 2. [`extract`] runs the catalog over content and fills an [`Extracted`] map.
//! 3. [`namespace`] nests dotted keys (namespace mode only).
//! 4. [`merge`] reconciles extracted keys with a persisted dictionary.
//! 5. [`stats`] counts new, deleted, updated and empty entries.
//!
//! [`scanner`], [`store`] and [`pipeline`] connect those parts to source
//! files and locale JSON files.

pub mod error;
pub mod extract;
pub mod merge;
pub mod namespace;
pub mod patterns;
pub mod pipeline;
pub mod plural;
pub mod scanner;
pub mod stats;
pub mod store;

pub use error::{ExtractError, PluralLiteralError};
pub use extract::{Extracted, Extractor, KeyMatch};
pub use merge::{MergeOptions, Reconciled, reconcile};
pub use patterns::{CatalogOptions, PatternCatalog};
pub use stats::Stats;
