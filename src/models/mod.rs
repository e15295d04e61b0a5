//! 业务数据模型
//!
//! 与 `entity` 中的数据库实体分离，对外暴露强类型的枚举与时间字段。

pub mod assessments;
pub mod class_bookings;
pub mod common;
pub mod course_materials;
pub mod notifications;
pub mod submissions;
pub mod users;

pub use common::{MAX_PAGE_SIZE, PaginationInfo, normalize_page};
