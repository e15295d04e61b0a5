#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use classroom_store::config::DatabaseConfig;
use classroom_store::models::assessments::{
    entities::Assessment, requests::CreateAssessmentRequest,
};
use classroom_store::models::class_bookings::{
    entities::ClassBooking, requests::CreateClassRequest,
};
use classroom_store::models::users::{
    entities::{User, UserRole},
    requests::CreateUserRequest,
};
use classroom_store::storage::{SeaOrmStorage, Storage};
use serde_json::json;

/// 独立的内存 SQLite 存储，已完成迁移
pub async fn test_storage() -> Arc<dyn Storage> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 30,
    };
    let storage = SeaOrmStorage::connect(&config)
        .await
        .expect("in-memory storage");
    Arc::new(storage)
}

/// 文件型 SQLite 存储，连接池可并发使用
pub async fn file_storage(path: &Path, pool_size: u32) -> Arc<dyn Storage> {
    let config = DatabaseConfig {
        url: path.to_string_lossy().into_owned(),
        pool_size,
        timeout: 30,
    };
    let storage = SeaOrmStorage::connect(&config)
        .await
        .expect("file-backed storage");
    Arc::new(storage)
}

pub async fn create_user(storage: &Arc<dyn Storage>, email: &str, role: UserRole) -> User {
    let mut req = CreateUserRequest::new("Test User", email, "not-a-real-hash", role);
    req.is_approved = Some(true);
    storage.create_user(req).await.expect("create user")
}

pub fn class_request(teacher_id: i64, title: &str, start: DateTime<Utc>) -> CreateClassRequest {
    CreateClassRequest {
        title: title.to_string(),
        description: None,
        subject: "Mathematics".to_string(),
        start_time: start,
        end_time: start + Duration::hours(1),
        meeting_link: None,
        location: None,
        max_students: None,
        status: None,
        teacher_id,
    }
}

pub async fn create_class(storage: &Arc<dyn Storage>, teacher_id: i64, title: &str) -> ClassBooking {
    storage
        .create_class(class_request(teacher_id, title, Utc::now() + Duration::days(1)))
        .await
        .expect("create class")
}

pub fn assessment_request(class_id: i64, created_by: i64, title: &str) -> CreateAssessmentRequest {
    CreateAssessmentRequest {
        title: title.to_string(),
        description: None,
        questions: json!([{ "prompt": "2 + 2 = ?", "choices": ["3", "4"], "answer": 1 }]),
        time_limit: Some(20),
        total_points: Some(20),
        due_date: None,
        is_active: None,
        class_id,
        created_by,
    }
}

pub async fn create_assessment(
    storage: &Arc<dyn Storage>,
    class_id: i64,
    created_by: i64,
    title: &str,
) -> Assessment {
    storage
        .create_assessment(assessment_request(class_id, created_by, title))
        .await
        .expect("create assessment")
}
