pub mod comment;
pub mod error;
pub mod filter_template;
pub mod types;
