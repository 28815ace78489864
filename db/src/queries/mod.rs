//! CSV ingestion, export and statement execution against a [`Database`].
//!
//! # Modules
//!
//! ## Import
//! - [`columns`] - Derive unique, store-safe column names from a CSV header row
//! - [`coerce`] - Infer a typed value from a single CSV cell
//! - [`import`] - Create a table from a CSV file and load it in bounded batches
//!
//! ## Export
//! - [`export`] - Re-run a query and stream its rows into a CSV file
//!
//! ## Interactive queries
//! - [`statement`] - Run one operator statement and keep a bounded preview
//!
//! # Statement Pattern
//!
//! Generated SQL only ever interpolates identifiers, always double-quoted via
//! [`crate::db::quote_identifier`]. Cell values are bound as parameters.
//!
//! [`Database`]: crate::backend::Database

pub mod coerce;
pub mod columns;
pub mod export;
pub mod import;
pub mod statement;
