use super::entities::UserRole;
use crate::errors::Result;
use crate::utils::validate::{validate_email, validate_max_len, validate_required};
use serde::Deserialize;
use ts_rs::TS;

// 用户创建请求（password_hash 由调用方预先哈希）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct CreateUserRequest {
    pub full_name: String,
    pub email: String,
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    // 默认 true
    pub is_active: Option<bool>,
    // 默认 false
    pub is_approved: Option<bool>,
    pub survey_answers: Option<serde_json::Value>,
    pub profile_picture: Option<String>,
    pub phone_number: Option<String>,
    pub institution: Option<String>,
}

impl CreateUserRequest {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
            is_active: None,
            is_approved: None,
            survey_answers: None,
            profile_picture: None,
            phone_number: None,
            institution: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_required("full_name", &self.full_name, 100)?;
        validate_email(&self.email)?;
        validate_required("password", &self.password_hash, 255)?;
        validate_max_len("profile_picture", self.profile_picture.as_deref(), 255)?;
        validate_max_len("phone_number", self.phone_number.as_deref(), 255)?;
        validate_max_len("institution", self.institution.as_deref(), 255)
    }
}

// 用户更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    #[ts(skip)]
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub is_approved: Option<bool>,
    pub survey_answers: Option<serde_json::Value>,
    pub profile_picture: Option<String>,
    pub phone_number: Option<String>,
    pub institution: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref full_name) = self.full_name {
            validate_required("full_name", full_name, 100)?;
        }
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        if let Some(ref password_hash) = self.password_hash {
            validate_required("password", password_hash, 255)?;
        }
        validate_max_len("profile_picture", self.profile_picture.as_deref(), 255)?;
        validate_max_len("phone_number", self.phone_number.as_deref(), 255)?;
        validate_max_len("institution", self.institution.as_deref(), 255)
    }
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub is_approved: Option<bool>,
    pub is_active: Option<bool>,
    // 匹配姓名或邮箱
    pub search: Option<String>,
}
