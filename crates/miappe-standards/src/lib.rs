//! MIAPPE v1.1 standards data and lookups.
//!
//! This crate provides:
//!
//! - **Embedded schema tables**, one per [`Category`](miappe_model::Category)
//! - **Format registry**: format label to primitive type and validator
//! - **Cardinality registry**: cardinality label to required flag and bounds
//! - **Schema loading** from embedded data or a directory, cached per category
//! - **ISO 3166-1 country table** for the country validator
//!
//! # Data Layout
//!
//! ```text
//! data/
//! ├── miappe/v1.1/           # one table per category
//! │   ├── Investigation_model.tsv
//! │   ├── Study_model.tsv
//! │   └── ...
//! └── iso3166/
//!     └── countries.csv
//! ```
//!
//! Each schema table has exactly five tab-separated columns:
//! `MIAPPE Check list`, `Definition`, `Example`, `Format`, `Cardinality`.

pub mod cardinality;
pub mod countries;
pub mod embedded;
pub mod error;
pub mod format;
pub mod loader;
pub mod source;

pub use countries::{CountryTable, countries};
pub use error::{Result, StandardsError};
pub use loader::{SCHEMA_COLUMNS, SchemaLoader, parse_schema_table};
pub use source::{DirectorySource, EmbeddedSource, SCHEMA_DIR_ENV, SchemaSource, resolve_source};
