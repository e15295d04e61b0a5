use super::entities::CourseMaterial;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 资料列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "course_material.ts")]
pub struct MaterialListResponse {
    pub items: Vec<CourseMaterial>,
    pub pagination: PaginationInfo,
}
