//! 课程预约实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "class_bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub subject: String,
    pub start_time: i64,
    pub end_time: i64,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub max_students: Option<i32>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: Option<i64>,
    pub teacher_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Teacher,
    #[sea_orm(has_many = "super::class_enrollments::Entity")]
    ClassEnrollments,
    #[sea_orm(has_many = "super::course_materials::Entity")]
    CourseMaterials,
    #[sea_orm(has_many = "super::assessments::Entity")]
    Assessments,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::class_enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassEnrollments.def()
    }
}

impl Related<super::course_materials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseMaterials.def()
    }
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_class_booking(self) -> crate::models::class_bookings::entities::ClassBooking {
        use crate::models::class_bookings::entities::{ClassBooking, ClassStatus};
        use chrono::{DateTime, Utc};

        ClassBooking {
            id: self.id,
            title: self.title,
            description: self.description,
            subject: self.subject,
            start_time: DateTime::<Utc>::from_timestamp(self.start_time, 0).unwrap_or_default(),
            end_time: DateTime::<Utc>::from_timestamp(self.end_time, 0).unwrap_or_default(),
            meeting_link: self.meeting_link,
            location: self.location,
            max_students: self.max_students,
            status: self.status.parse::<ClassStatus>().unwrap_or_default(),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: self
                .updated_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            teacher_id: self.teacher_id,
        }
    }
}
