use serde::Deserialize;
use ts_rs::TS;

use crate::errors::Result;
use crate::utils::validate::{validate_max_len, validate_non_negative, validate_required};

// 上传资料请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "course_material.ts")]
pub struct CreateMaterialRequest {
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
    pub class_id: i64,
    pub uploaded_by: i64,
}

impl CreateMaterialRequest {
    pub fn validate(&self) -> Result<()> {
        validate_required("title", &self.title, 200)?;
        validate_required("file_name", &self.file_name, 255)?;
        validate_required("file_path", &self.file_path, 500)?;
        validate_max_len("file_type", self.file_type.as_deref(), 50)?;
        validate_non_negative("file_size", self.file_size)
    }
}

// 更新资料请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "course_material.ts")]
pub struct UpdateMaterialRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub file_name: Option<String>,
    pub file_path: Option<String>,
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
}

impl UpdateMaterialRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref title) = self.title {
            validate_required("title", title, 200)?;
        }
        if let Some(ref file_name) = self.file_name {
            validate_required("file_name", file_name, 255)?;
        }
        if let Some(ref file_path) = self.file_path {
            validate_required("file_path", file_path, 500)?;
        }
        validate_max_len("file_type", self.file_type.as_deref(), 50)?;
        validate_non_negative("file_size", self.file_size)
    }
}

// 资料列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "course_material.ts")]
pub struct MaterialListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    pub uploaded_by: Option<i64>,
    pub file_type: Option<String>,
    // 匹配标题或描述
    pub search: Option<String>,
}
