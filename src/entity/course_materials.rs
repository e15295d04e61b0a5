//! 课程资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
    pub download_count: i32,
    pub created_at: i64,
    pub class_id: i64,
    pub uploaded_by: i64,
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
        from = "Column::UploadedBy",
        to = "super::users::Column::Id"
    )]
    Uploader,
}

impl Related<super::class_bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassBooking.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploader.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_course_material(self) -> crate::models::course_materials::entities::CourseMaterial {
        use crate::models::course_materials::entities::CourseMaterial;
        use chrono::{DateTime, Utc};

        CourseMaterial {
            id: self.id,
            title: self.title,
            description: self.description,
            file_name: self.file_name,
            file_path: self.file_path,
            file_type: self.file_type,
            file_size: self.file_size,
            download_count: self.download_count,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            class_id: self.class_id,
            uploaded_by: self.uploaded_by,
        }
    }
}
