//! Row models and DTOs, one module per table.

pub mod movie;
pub mod review;
pub mod role;
pub mod user;
