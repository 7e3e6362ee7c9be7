//! Identity seam: supplies the owner id operations are scoped to.

use crate::error::TaskError;
use crate::task::OwnerId;

/// Source of the current session's owner identity.
pub trait IdentityProvider: Send + Sync {
    /// The signed-in owner, or `None` when unauthenticated.
    fn current_owner(&self) -> Option<OwnerId>;
}

/// Fixed identity resolved ahead of time (config, flag, or env).
pub struct StaticIdentity(pub Option<OwnerId>);

impl IdentityProvider for StaticIdentity {
    fn current_owner(&self) -> Option<OwnerId> {
        self.0
    }
}

/// Reject unauthenticated callers before any remote call is made.
pub fn require_owner(identity: &dyn IdentityProvider) -> Result<OwnerId, TaskError> {
    identity.current_owner().ok_or(TaskError::NoOwner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn missing_identity_is_rejected() {
        let err = require_owner(&StaticIdentity(None)).unwrap_err();
        assert!(matches!(err, TaskError::NoOwner));
    }

    #[test]
    fn present_identity_passes_through() {
        let owner = OwnerId(Uuid::from_u128(1));
        assert_eq!(require_owner(&StaticIdentity(Some(owner))).unwrap(), owner);
    }
}
