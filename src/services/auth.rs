//! Authorization policy
//!
//! Role checks live with the caller, not inside the ledger: callers resolve
//! an [`Identity`] up front and gate each action here, so ledger operations
//! stay policy-free and testable in isolation.

use tracing::warn;
use crate::models::user::{Role, User};
use crate::utils::errors::{VolunteerHubError, Result};

/// Who is acting, as established by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
        }
    }
}

/// Actions subject to role policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreateEvent,
    EditEvent,
    DeleteEvent,
    SubmitRegistration,
    AcceptRegistration,
    RejectRegistration,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::CreateEvent => "create_event",
            Action::EditEvent => "edit_event",
            Action::DeleteEvent => "delete_event",
            Action::SubmitRegistration => "submit_registration",
            Action::AcceptRegistration => "accept_registration",
            Action::RejectRegistration => "reject_registration",
        }
    }
}

/// Check whether a role may perform an action
pub fn is_allowed(role: Role, action: Action) -> bool {
    match action {
        Action::CreateEvent | Action::DeleteEvent => {
            matches!(role, Role::Administrator)
        }
        Action::EditEvent | Action::AcceptRegistration | Action::RejectRegistration => {
            matches!(role, Role::Administrator | Role::Moderator)
        }
        Action::SubmitRegistration => true,
    }
}

/// Require permission for an action or return an error
pub fn require(identity: &Identity, action: Action) -> Result<()> {
    if is_allowed(identity.role, action) {
        return Ok(());
    }

    warn!(
        user_id = identity.user_id,
        role = %identity.role,
        action = action.as_str(),
        "Permission denied"
    );
    Err(VolunteerHubError::PermissionDenied(format!(
        "User {} with role {} may not {}",
        identity.user_id,
        identity.role,
        action.as_str()
    )))
}
