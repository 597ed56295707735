//! CLI functionality for the eligibility tool
//!
//! - Expression validation
//! - Eligibility checks from JSON documents
//! - Catalog listing
//! - Output formatting

pub mod catalog;
pub mod check;
pub mod documents;
pub mod output;
pub mod validate;
