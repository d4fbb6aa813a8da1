//! Domain primitives shared by the database and API crates.
//!
//! - [`error`] -- the domain error taxonomy ([`error::CoreError`]).
//! - [`types`] -- id and timestamp aliases used across the workspace.
//! - [`roles`] -- well-known role name constants.
//! - [`ownership`] -- the ownership predicate gating review mutation.

pub mod error;
pub mod ownership;
pub mod roles;
pub mod types;
