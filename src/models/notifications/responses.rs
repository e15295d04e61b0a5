use super::entities::Notification;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 通知列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "notification.ts")]
pub struct NotificationListResponse {
    pub items: Vec<Notification>,
    pub pagination: PaginationInfo,
    // 未读总数
    pub unread_count: i64,
}
