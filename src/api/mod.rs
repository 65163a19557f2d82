//! API endpoint handlers module

pub mod health;
pub mod operations;
pub mod validate;
