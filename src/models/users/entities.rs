use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::db_enum::define_db_enum;

define_db_enum! {
    // 用户角色
    #[ts(export, export_to = "user.ts")]
    UserRole("user role") {
        Admin => "ADMIN",
        Teacher => "TEACHER",
        Student => "STUDENT",
        Parent => "PARENT",
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub is_approved: bool,
    // 注册问卷答案（JSON）
    pub survey_answers: Option<serde_json::Value>,
    pub profile_picture: Option<String>,
    pub phone_number: Option<String>,
    pub institution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_db_names() {
        assert_eq!(UserRole::Admin.to_string(), "ADMIN");
        assert_eq!("PARENT".parse::<UserRole>(), Ok(UserRole::Parent));
        assert!("admin".parse::<UserRole>().is_err());
        assert!("GUEST".parse::<UserRole>().is_err());
        assert_eq!(UserRole::ALL.len(), 4);
    }

    #[test]
    fn test_role_json_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&UserRole::Teacher).unwrap(),
            "\"teacher\""
        );
        let role: UserRole = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, UserRole::Student);
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: 1,
            full_name: "Ada Lovelace".into(),
            email: "ada@school.edu".into(),
            password_hash: "$argon2id$secret".into(),
            role: UserRole::Teacher,
            is_active: true,
            is_approved: true,
            survey_answers: None,
            profile_picture: None,
            phone_number: None,
            institution: None,
            created_at: Utc::now(),
            updated_at: None,
            last_login_at: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("\"role\":\"teacher\""));
    }
}
