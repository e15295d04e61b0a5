//! 配置管理
//!
//! 按顺序合并：`config.toml` → `config.{APP_ENV}.toml` → `CLASSROOM_*` 环境变量。

mod r#impl;
mod structs;

pub use structs::*;
