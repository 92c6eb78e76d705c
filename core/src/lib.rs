//! Census tract dashboard core: immutable tract tables, column summaries,
//! and the two-tract metric comparison.

pub mod comparison;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod metric;
pub mod profile;
pub mod selection;
pub mod summary;
pub mod table;
pub mod types;
