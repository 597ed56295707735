//! Operator implementations for [`CriteriaEngine`](crate::CriteriaEngine)
//!
//! - Logical operators (AND, OR, NOT)
//! - Field comparisons (age, gestational age, gender, language count)

pub mod comparison;
pub mod logical;
