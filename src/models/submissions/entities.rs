use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::db_enum::define_db_enum;

define_db_enum! {
    // 提交状态
    #[ts(export, export_to = "submission.ts")]
    SubmissionStatus("submission status") {
        Submitted => "SUBMITTED",
        Graded => "GRADED",
        Returned => "RETURNED",
    }
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        SubmissionStatus::Submitted
    }
}

// 测验提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct Submission {
    pub id: i64,
    // 作答内容（JSON）
    pub answers: serde_json::Value,
    pub score: Option<i32>,
    pub total_points: Option<i32>,
    pub percentage: Option<f64>,
    pub feedback: Option<String>,
    pub status: SubmissionStatus,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub assessment_id: i64,
    pub student_id: i64,
    pub graded_by: Option<i64>,
}

/// 计算得分百分比，满分缺失或不为正时返回 None
pub fn compute_percentage(score: i32, total_points: Option<i32>) -> Option<f64> {
    match total_points {
        Some(total) if total > 0 => Some(f64::from(score) / f64::from(total) * 100.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_percentage() {
        assert_eq!(compute_percentage(8, Some(10)), Some(80.0));
        assert_eq!(compute_percentage(0, Some(5)), Some(0.0));
        assert_eq!(compute_percentage(3, Some(0)), None);
        assert_eq!(compute_percentage(3, None), None);
    }

    #[test]
    fn test_status_names() {
        assert_eq!(SubmissionStatus::default().as_str(), "SUBMITTED");
        assert_eq!("RETURNED".parse::<SubmissionStatus>(), Ok(SubmissionStatus::Returned));
        assert!("LATE".parse::<SubmissionStatus>().is_err());
    }
}
