//! Admin access gate.
//!
//! Screens such as suppliers and purchase orders sit behind an
//! [`AccessGate`]. A role outside the gate's set gets the static
//! access-denied screen instead.

use serde::{Deserialize, Serialize};
use shopfront_core::UserRole;
use tracing::{debug, warn};

pub const ACCESS_DENIED_TITLE: &str = "Admin Access Required";
pub const ACCESS_DENIED_MESSAGE: &str =
    "You need administrator privileges to view this page. Please contact your store administrator.";

/// The access-denied screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDeniedView {
    pub title: String,
    pub message: String,
}

impl Default for AccessDeniedView {
    fn default() -> Self {
        AccessDeniedView {
            title: ACCESS_DENIED_TITLE.to_string(),
            message: ACCESS_DENIED_MESSAGE.to_string(),
        }
    }
}

/// Outcome of [`AccessGate::check`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "access")]
pub enum Access {
    Granted,
    Denied(AccessDeniedView),
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }
}

/// Set of roles allowed past the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGate {
    allowed: Vec<UserRole>,
}

impl Default for AccessGate {
    fn default() -> Self {
        AccessGate {
            allowed: vec![UserRole::Admin],
        }
    }
}

impl AccessGate {
    pub fn admin_only() -> Self {
        Self::default()
    }

    pub fn with_roles(roles: impl IntoIterator<Item = UserRole>) -> Self {
        AccessGate {
            allowed: roles.into_iter().collect(),
        }
    }

    pub fn check(&self, role: UserRole) -> Access {
        if self.allowed.contains(&role) {
            debug!(?role, "access granted");
            Access::Granted
        } else {
            warn!(?role, "access denied");
            Access::Denied(AccessDeniedView::default())
        }
    }
}
