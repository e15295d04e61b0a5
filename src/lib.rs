//! Classroom Store - 在线辅导平台持久层
//!
//! 用户、课程预约、课程资料、测验、提交和通知的存储与查询。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 业务数据模型与请求校验
//! - `runtime`: 运行时生命周期管理
//! - `security`: 认证适配层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod security;
pub mod storage;
pub mod utils;
