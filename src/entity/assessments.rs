//! 测验实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    // JSON 编码的题目
    #[sea_orm(column_type = "Text")]
    pub questions: String,
    pub time_limit: Option<i32>,
    pub total_points: Option<i32>,
    pub due_date: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: Option<i64>,
    pub class_id: i64,
    pub created_by: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class_bookings::Entity",
        from = "Column::ClassId",
        to = "super::class_bookings::Column::Id",
        on_delete = "Cascade"
    )]
    ClassBooking,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::assessment_submissions::Entity")]
    AssessmentSubmissions,
}

impl Related<super::class_bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassBooking.def()
    }
}

impl Related<super::assessment_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssessmentSubmissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_assessment(self) -> crate::models::assessments::entities::Assessment {
        use crate::models::assessments::entities::Assessment;
        use chrono::{DateTime, Utc};

        Assessment {
            id: self.id,
            title: self.title,
            description: self.description,
            questions: super::parse_json_text(&self.questions),
            time_limit: self.time_limit,
            total_points: self.total_points,
            due_date: self
                .due_date
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: self
                .updated_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            class_id: self.class_id,
            created_by: self.created_by,
        }
    }
}
