use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 测验实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct Assessment {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    // 题目集合（JSON）
    pub questions: serde_json::Value,
    // 时间限制（分钟）
    pub time_limit: Option<i32>,
    pub total_points: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub class_id: i64,
    pub created_by: i64,
}
