use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程资料实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "course_material.ts")]
pub struct CourseMaterial {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
    pub download_count: i32,
    pub created_at: DateTime<Utc>,
    pub class_id: i64,
    pub uploaded_by: i64,
}
