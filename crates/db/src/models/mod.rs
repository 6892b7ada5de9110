//! Row types and DTOs, one module per table.

pub mod comment;
pub mod dashboard;
pub mod user;
