//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    // 密码哈希
    pub password: String,
    pub role: String,
    pub is_active: bool,
    pub is_approved: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub survey_answers: Option<String>,
    pub profile_picture: Option<String>,
    pub phone_number: Option<String>,
    pub institution: Option<String>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
    pub last_login_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::class_bookings::Entity")]
    ClassBookings,
    #[sea_orm(has_many = "super::class_enrollments::Entity")]
    ClassEnrollments,
    #[sea_orm(has_many = "super::assessment_submissions::Entity")]
    AssessmentSubmissions,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::class_bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassBookings.def()
    }
}

impl Related<super::class_enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassEnrollments.def()
    }
}

impl Related<super::assessment_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssessmentSubmissions.def()
    }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{User, UserRole};
        use chrono::{DateTime, Utc};

        User {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            password_hash: self.password,
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::Student),
            is_active: self.is_active,
            is_approved: self.is_approved,
            survey_answers: self.survey_answers.as_deref().map(super::parse_json_text),
            profile_picture: self.profile_picture,
            phone_number: self.phone_number,
            institution: self.institution,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: self
                .updated_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            last_login_at: self
                .last_login_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
        }
    }
}
