//! Well-known role name constants.
//!
//! `admin` must match the seed data in `20260115000001_create_roles.sql`.
//! Other roles are created on demand via the role-assignment endpoint.

pub const ROLE_ADMIN: &str = "admin";
