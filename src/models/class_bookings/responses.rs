use super::entities::ClassBooking;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 课程列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "class_booking.ts")]
pub struct ClassListResponse {
    pub items: Vec<ClassBooking>,
    pub pagination: PaginationInfo,
}
