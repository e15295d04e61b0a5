use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::db_enum::define_db_enum;

define_db_enum! {
    // 通知类型
    #[ts(export, export_to = "notification.ts")]
    NotificationType("notification type") {
        ClassReminder => "CLASS_REMINDER",
        AssessmentDue => "ASSESSMENT_DUE",
        GradePosted => "GRADE_POSTED",
        General => "GENERAL",
        System => "SYSTEM",
    }
}

// 通知实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "notification.ts")]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub is_email_sent: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub recipient_id: i64,
    pub sender_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(NotificationType::GradePosted.as_str(), "GRADE_POSTED");
        assert_eq!(
            serde_json::to_string(&NotificationType::ClassReminder).unwrap(),
            "\"class_reminder\""
        );
        assert!("REMINDER".parse::<NotificationType>().is_err());
    }
}
