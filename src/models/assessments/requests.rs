use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::errors::Result;
use crate::utils::validate::{validate_json_present, validate_non_negative, validate_required};

// 创建测验请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct CreateAssessmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub questions: serde_json::Value,
    pub time_limit: Option<i32>,
    pub total_points: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
    // 默认 true
    pub is_active: Option<bool>,
    pub class_id: i64,
    pub created_by: i64,
}

impl CreateAssessmentRequest {
    pub fn validate(&self) -> Result<()> {
        validate_required("title", &self.title, 200)?;
        validate_json_present("questions", &self.questions)?;
        validate_non_negative("time_limit", self.time_limit.map(i64::from))?;
        validate_non_negative("total_points", self.total_points.map(i64::from))
    }
}

// 更新测验请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct UpdateAssessmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub questions: Option<serde_json::Value>,
    pub time_limit: Option<i32>,
    pub total_points: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

impl UpdateAssessmentRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref title) = self.title {
            validate_required("title", title, 200)?;
        }
        if let Some(ref questions) = self.questions {
            validate_json_present("questions", questions)?;
        }
        validate_non_negative("time_limit", self.time_limit.map(i64::from))?;
        validate_non_negative("total_points", self.total_points.map(i64::from))
    }
}

// 测验列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct AssessmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    pub created_by: Option<i64>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_questions_must_be_present() {
        let mut req = CreateAssessmentRequest {
            title: "Quiz 1".into(),
            description: None,
            questions: json!([{ "q": "2 + 2", "options": [3, 4], "answer": 1 }]),
            time_limit: Some(30),
            total_points: Some(10),
            due_date: None,
            is_active: None,
            class_id: 1,
            created_by: 1,
        };
        assert!(req.validate().is_ok());

        req.questions = serde_json::Value::Null;
        assert!(req.validate().is_err());
    }
}
