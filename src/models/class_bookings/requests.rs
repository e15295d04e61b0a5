use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::ClassStatus;
use crate::errors::Result;
use crate::utils::validate::{validate_max_len, validate_non_negative, validate_required};

// 创建课程请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "class_booking.ts")]
pub struct CreateClassRequest {
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub max_students: Option<i32>,
    // 默认 SCHEDULED
    pub status: Option<ClassStatus>,
    pub teacher_id: i64,
}

impl CreateClassRequest {
    pub fn validate(&self) -> Result<()> {
        validate_required("title", &self.title, 200)?;
        validate_required("subject", &self.subject, 100)?;
        validate_max_len("meeting_link", self.meeting_link.as_deref(), 500)?;
        validate_max_len("location", self.location.as_deref(), 100)?;
        validate_non_negative("max_students", self.max_students.map(i64::from))
    }
}

// 更新课程请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "class_booking.ts")]
pub struct UpdateClassRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub max_students: Option<i32>,
    pub status: Option<ClassStatus>,
}

impl UpdateClassRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref title) = self.title {
            validate_required("title", title, 200)?;
        }
        if let Some(ref subject) = self.subject {
            validate_required("subject", subject, 100)?;
        }
        validate_max_len("meeting_link", self.meeting_link.as_deref(), 500)?;
        validate_max_len("location", self.location.as_deref(), 100)?;
        validate_non_negative("max_students", self.max_students.map(i64::from))
    }
}

// 课程列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "class_booking.ts")]
pub struct ClassListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: Option<i64>,
    pub status: Option<ClassStatus>,
    pub subject: Option<String>,
    // 匹配标题或学科
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateClassRequest {
        let now = Utc::now();
        CreateClassRequest {
            title: "Intro to Rust".into(),
            description: None,
            subject: "Programming".into(),
            start_time: now,
            end_time: now,
            meeting_link: None,
            location: None,
            max_students: Some(20),
            status: None,
            teacher_id: 1,
        }
    }

    #[test]
    fn test_create_class_validation() {
        assert!(request().validate().is_ok());

        let mut blank_subject = request();
        blank_subject.subject = String::new();
        assert!(blank_subject.validate().is_err());

        let mut long_link = request();
        long_link.meeting_link = Some(format!("https://meet.example.com/{}", "a".repeat(500)));
        assert!(long_link.validate().is_err());

        let mut negative = request();
        negative.max_students = Some(-1);
        assert!(negative.validate().is_err());
    }
}
