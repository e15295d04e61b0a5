use super::entities::Assessment;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 测验列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct AssessmentListResponse {
    pub items: Vec<Assessment>,
    pub pagination: PaginationInfo,
}
