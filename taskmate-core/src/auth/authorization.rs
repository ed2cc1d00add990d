/// Authorization predicates
///
/// Every mutating or admin-scoped task operation runs one of these checks
/// before touching the store. The rules are small and fixed:
///
/// - a task may be edited or deleted by its creator or by an admin
/// - the all-tasks view is admin-only
///
/// The `Caller` is the authenticated identity (id + role) extracted from a
/// validated session token; it is passed explicitly into every workflow
/// operation rather than read from ambient state.

use serde::{Deserialize, Serialize};

use crate::auth::session::Claims;
use crate::error::{Error, Result};
use crate::models::{task::Task, user::Role, user::User};

/// Authenticated caller identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// The caller's user ID
    pub id: i64,

    /// The caller's role
    pub role: Role,
}

impl Caller {
    /// Builds a caller from validated session claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
        }
    }

    /// True if the caller holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// True if the caller may edit or delete the task
    ///
    /// Creator-or-admin: the creator always may; an admin may regardless
    /// of ownership. Being the shared recipient grants no edit rights.
    pub fn can_modify(&self, task: &Task) -> bool {
        self.id == task.created_by || self.is_admin()
    }
}

impl From<&User> for Caller {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
        }
    }
}

/// Requires the admin role
///
/// # Errors
///
/// Returns `Error::AccessDenied` for non-admin callers
pub fn require_admin(caller: &Caller) -> Result<()> {
    if !caller.is_admin() {
        return Err(Error::AccessDenied("admins only"));
    }

    Ok(())
}

/// Requires that the caller is the task's creator or an admin
///
/// # Errors
///
/// Returns `Error::AccessDenied` otherwise
pub fn require_creator_or_admin(caller: &Caller, task: &Task) -> Result<()> {
    if !caller.can_modify(task) {
        return Err(Error::AccessDenied("you can only modify your own tasks"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task_created_by(user_id: i64) -> Task {
        Task {
            id: 1,
            title: "t".to_string(),
            description: "d".to_string(),
            status: "pending".to_string(),
            created_by: user_id,
            shared_with: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_creator_can_modify() {
        let caller = Caller { id: 1, role: Role::Member };
        assert!(caller.can_modify(&task_created_by(1)));
        assert!(require_creator_or_admin(&caller, &task_created_by(1)).is_ok());
    }

    #[test]
    fn test_other_member_cannot_modify() {
        let caller = Caller { id: 2, role: Role::Member };
        assert!(!caller.can_modify(&task_created_by(1)));
        assert!(require_creator_or_admin(&caller, &task_created_by(1)).is_err());
    }

    #[test]
    fn test_sharee_cannot_modify() {
        let caller = Caller { id: 3, role: Role::Member };
        let mut task = task_created_by(1);
        task.shared_with = Some(3);
        assert!(!caller.can_modify(&task));
    }

    #[test]
    fn test_admin_can_modify_any_task() {
        let caller = Caller { id: 99, role: Role::Admin };
        assert!(caller.can_modify(&task_created_by(1)));
        assert!(require_admin(&caller).is_ok());
    }

    #[test]
    fn test_member_is_not_admin() {
        let caller = Caller { id: 1, role: Role::Member };
        let err = require_admin(&caller).unwrap_err();
        assert!(matches!(err, Error::AccessDenied(_)));
    }

    #[test]
    fn test_caller_from_claims() {
        let claims = Claims::new(5, Role::Admin);
        let caller = Caller::from_claims(&claims);
        assert_eq!(caller.id, 5);
        assert!(caller.is_admin());
    }
}
