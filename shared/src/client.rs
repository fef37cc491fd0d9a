//! Auth DTOs shared by the API client and its callers
//!
//! Request/response bodies for `/auth/register` and `/auth/login`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role name that unlocks admin-only actions in the UI
pub const ADMIN_ROLE: &str = "admin";

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information as returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    /// `user` or `admin`
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserInfo {
    /// Presentation-level role check. The server authorizes independently.
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}
