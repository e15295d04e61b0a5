use serde::Serialize;

use super::UserDetails;
use crate::models::users::entities::{User, UserRole};

/// 已认证用户的身份信息
#[derive(Debug, Clone, Serialize)]
pub struct UserPrincipal {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub is_approved: bool,
}

impl UserPrincipal {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            is_active: user.is_active,
            is_approved: user.is_approved,
        }
    }

    /// 权限字符串，如 `ROLE_TEACHER`
    pub fn authority(&self) -> String {
        format!("ROLE_{}", self.role.as_str())
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role
    }
}

impl From<User> for UserPrincipal {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            is_active: user.is_active,
            is_approved: user.is_approved,
        }
    }
}

impl UserDetails for UserPrincipal {
    fn username(&self) -> &str {
        &self.email
    }

    fn password(&self) -> &str {
        &self.password_hash
    }

    fn authorities(&self) -> Vec<String> {
        vec![self.authority()]
    }

    fn is_account_non_expired(&self) -> bool {
        true
    }

    fn is_account_non_locked(&self) -> bool {
        self.is_active
    }

    fn is_credentials_non_expired(&self) -> bool {
        true
    }

    fn is_enabled(&self) -> bool {
        self.is_active && self.is_approved
    }
}
