use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::SubmissionStatus;
use crate::errors::Result;
use crate::utils::validate::{validate_json_present, validate_non_negative};

// 创建提交请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct CreateSubmissionRequest {
    pub assessment_id: i64,
    pub student_id: i64,
    pub answers: serde_json::Value,
    // 缺省时为当前时间
    pub submitted_at: Option<DateTime<Utc>>,
}

impl CreateSubmissionRequest {
    pub fn validate(&self) -> Result<()> {
        validate_json_present("answers", &self.answers)
    }
}

// 更新提交请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct UpdateSubmissionRequest {
    pub answers: Option<serde_json::Value>,
    pub score: Option<i32>,
    pub total_points: Option<i32>,
    pub percentage: Option<f64>,
    pub feedback: Option<String>,
    pub status: Option<SubmissionStatus>,
}

impl UpdateSubmissionRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref answers) = self.answers {
            validate_json_present("answers", answers)?;
        }
        validate_non_negative("score", self.score.map(i64::from))?;
        validate_non_negative("total_points", self.total_points.map(i64::from))
    }
}

// 评分请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct GradeSubmissionRequest {
    pub score: i32,
    // 缺省时取测验的满分
    pub total_points: Option<i32>,
    pub feedback: Option<String>,
}

impl GradeSubmissionRequest {
    pub fn validate(&self) -> Result<()> {
        validate_non_negative("score", Some(i64::from(self.score)))?;
        validate_non_negative("total_points", self.total_points.map(i64::from))
    }
}

// 提交列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assessment_id: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_answers_must_be_present() {
        let mut req = CreateSubmissionRequest {
            assessment_id: 1,
            student_id: 2,
            answers: json!({ "1": "B" }),
            submitted_at: None,
        };
        assert!(req.validate().is_ok());
        req.answers = serde_json::Value::Null;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_grade_rejects_negative_score() {
        let req = GradeSubmissionRequest {
            score: -1,
            total_points: None,
            feedback: None,
        };
        assert!(req.validate().is_err());
    }
}
