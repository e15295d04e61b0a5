//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod assessment_submissions;
pub mod assessments;
pub mod class_bookings;
pub mod class_enrollments;
pub mod course_materials;
pub mod notifications;
pub mod users;

/// 解析 TEXT 列中保存的 JSON，无法解析时按原始字符串返回
pub(crate) fn parse_json_text(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::parse_json_text;
    use serde_json::json;

    #[test]
    fn test_parse_json_text() {
        assert_eq!(parse_json_text(r#"{"a":[1,2]}"#), json!({ "a": [1, 2] }));
        assert_eq!(parse_json_text("not json"), json!("not json"));
    }
}
