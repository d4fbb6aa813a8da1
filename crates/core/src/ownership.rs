//! Ownership predicate for user-authored resources.
//!
//! A review may only be updated or deleted by the user who wrote it. The
//! check is a typed result rather than exception-style control flow: callers
//! match on [`CoreError::Forbidden`] and translate it to a 403.

use crate::error::CoreError;
use crate::types::DbId;

/// Verify that `requester_id` owns the resource authored by `owner_id`.
///
/// A violation rejects the single operation being attempted; it never
/// changes the state of the resource itself.
pub fn ensure_owner(owner_id: DbId, requester_id: DbId) -> Result<(), CoreError> {
    if owner_id != requester_id {
        return Err(CoreError::Forbidden(
            "You do not have permission to modify this resource".into(),
        ));
    }
    Ok(())
}
