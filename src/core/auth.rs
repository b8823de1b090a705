use crate::core::aliases::UserId;
use crate::core::models::Demo;
use crate::core::types::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
    pub role: Role,
}

/// Who is acting. Passed into every operation that depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    user: Option<CurrentUser>,
}

impl AuthContext {
    pub fn signed_in(user: CurrentUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn can_schedule(&self) -> bool {
        self.is_authenticated()
    }

    /// Admins and managers see every demo; agents only their own.
    pub fn can_view_all(&self) -> bool {
        matches!(self.role(), Some(Role::Admin | Role::Manager))
    }

    /// Start, complete, cancel or reschedule a given demo.
    pub fn can_manage(&self, demo: &Demo) -> bool {
        match &self.user {
            None => false,
            Some(u) if matches!(u.role, Role::Admin | Role::Manager) => true,
            Some(u) => demo.assigned_user_id.as_deref() == Some(u.id.as_str()),
        }
    }

    pub fn can_administer_users(&self) -> bool {
        self.role() == Some(Role::Admin)
    }
}
