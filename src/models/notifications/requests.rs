use serde::Deserialize;
use ts_rs::TS;

use super::entities::NotificationType;
use crate::errors::Result;
use crate::utils::validate::validate_required;

// 创建通知请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "notification.ts")]
pub struct CreateNotificationRequest {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub recipient_id: i64,
    pub sender_id: Option<i64>,
}

impl CreateNotificationRequest {
    pub fn validate(&self) -> Result<()> {
        validate_required("title", &self.title, 200)?;
        // message 为 TEXT，只要求非空
        validate_required("message", &self.message, usize::MAX)
    }
}

// 通知列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "notification.ts")]
pub struct NotificationListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub unread_only: Option<bool>,
    #[serde(rename = "type")]
    pub notification_type: Option<NotificationType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_notification_validation() {
        let mut req = CreateNotificationRequest {
            title: "Grades are out".into(),
            message: "Quiz 1 has been graded".into(),
            notification_type: NotificationType::GradePosted,
            recipient_id: 1,
            sender_id: None,
        };
        assert!(req.validate().is_ok());
        req.message = "   ".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_type_field_deserializes_from_type_key() {
        let req: CreateNotificationRequest = serde_json::from_str(
            r#"{"title":"t","message":"m","type":"system","recipient_id":3,"sender_id":null}"#,
        )
        .unwrap();
        assert_eq!(req.notification_type, NotificationType::System);
    }
}
