//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assessments;
mod class_bookings;
mod course_materials;
mod enrollments;
mod notifications;
mod submissions;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{ClassroomError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database).await
    }

    /// 按给定数据库配置连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ClassroomError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ClassroomError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(config.pool_size.min(5))
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ClassroomError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ClassroomError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assessments::{
        entities::Assessment,
        requests::{AssessmentListQuery, CreateAssessmentRequest, UpdateAssessmentRequest},
        responses::AssessmentListResponse,
    },
    class_bookings::{
        entities::{ClassBooking, ClassStatus, Enrollment},
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    course_materials::{
        entities::CourseMaterial,
        requests::{CreateMaterialRequest, MaterialListQuery, UpdateMaterialRequest},
        responses::MaterialListResponse,
    },
    notifications::{
        entities::{Notification, NotificationType},
        requests::{CreateNotificationRequest, NotificationListQuery},
        responses::NotificationListResponse,
    },
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::{
            CreateSubmissionRequest, GradeSubmissionRequest, SubmissionListQuery,
            UpdateSubmissionRequest,
        },
        responses::SubmissionListResponse,
    },
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn exists_user_by_email(&self, email: &str) -> Result<bool> {
        self.exists_user_by_email_impl(email).await
    }

    async fn list_users_by_role(&self, role: UserRole) -> Result<Vec<User>> {
        self.list_users_by_role_impl(role).await
    }

    async fn list_users_by_role_and_approval(
        &self,
        role: UserRole,
        is_approved: bool,
    ) -> Result<Vec<User>> {
        self.list_users_by_role_and_approval_impl(role, is_approved).await
    }

    async fn list_pending_approvals(&self) -> Result<Vec<User>> {
        self.list_pending_approvals_impl().await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn approve_user(&self, id: i64) -> Result<bool> {
        self.approve_user_impl(id).await
    }

    async fn reject_user(&self, id: i64) -> Result<bool> {
        self.reject_user_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn count_users_by_role(&self, role: UserRole) -> Result<u64> {
        self.count_users_by_role_impl(role).await
    }

    async fn count_active_users(&self) -> Result<u64> {
        self.count_active_users_impl().await
    }

    // 课程模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<ClassBooking> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<ClassBooking>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn list_classes_by_teacher(&self, teacher_id: i64) -> Result<Vec<ClassBooking>> {
        self.list_classes_by_teacher_impl(teacher_id).await
    }

    async fn list_classes_by_enrolled_student(&self, student_id: i64) -> Result<Vec<ClassBooking>> {
        self.list_classes_by_enrolled_student_impl(student_id).await
    }

    async fn list_classes_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ClassBooking>> {
        self.list_classes_by_date_range_impl(start, end).await
    }

    async fn list_classes_by_subject(&self, subject: &str) -> Result<Vec<ClassBooking>> {
        self.list_classes_by_subject_impl(subject).await
    }

    async fn list_classes_by_status(&self, status: ClassStatus) -> Result<Vec<ClassBooking>> {
        self.list_classes_by_status_impl(status).await
    }

    async fn list_upcoming_classes(&self, now: DateTime<Utc>) -> Result<Vec<ClassBooking>> {
        self.list_upcoming_classes_impl(now).await
    }

    async fn list_live_classes(&self, now: DateTime<Utc>) -> Result<Vec<ClassBooking>> {
        self.list_live_classes_impl(now).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<ClassBooking>> {
        self.update_class_impl(class_id, update).await
    }

    async fn update_class_status(&self, class_id: i64, status: ClassStatus) -> Result<bool> {
        self.update_class_status_impl(class_id, status).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    async fn count_classes(&self) -> Result<u64> {
        self.count_classes_impl().await
    }

    // 选课模块
    async fn enroll_student(&self, class_id: i64, student_id: i64) -> Result<Enrollment> {
        self.enroll_student_impl(class_id, student_id).await
    }

    async fn unenroll_student(&self, class_id: i64, student_id: i64) -> Result<bool> {
        self.unenroll_student_impl(class_id, student_id).await
    }

    async fn list_enrolled_students(&self, class_id: i64) -> Result<Vec<User>> {
        self.list_enrolled_students_impl(class_id).await
    }

    async fn count_enrolled_students(&self, class_id: i64) -> Result<u64> {
        self.count_enrolled_students_impl(class_id).await
    }

    async fn is_student_enrolled(&self, class_id: i64, student_id: i64) -> Result<bool> {
        self.is_student_enrolled_impl(class_id, student_id).await
    }

    // 资料模块
    async fn create_material(&self, material: CreateMaterialRequest) -> Result<CourseMaterial> {
        self.create_material_impl(material).await
    }

    async fn get_material_by_id(&self, id: i64) -> Result<Option<CourseMaterial>> {
        self.get_material_by_id_impl(id).await
    }

    async fn list_materials_by_class(&self, class_id: i64) -> Result<Vec<CourseMaterial>> {
        self.list_materials_by_class_impl(class_id).await
    }

    async fn list_materials_by_uploader(&self, user_id: i64) -> Result<Vec<CourseMaterial>> {
        self.list_materials_by_uploader_impl(user_id).await
    }

    async fn list_materials_by_file_type(&self, file_type: &str) -> Result<Vec<CourseMaterial>> {
        self.list_materials_by_file_type_impl(file_type).await
    }

    async fn list_materials_by_subject(&self, subject: &str) -> Result<Vec<CourseMaterial>> {
        self.list_materials_by_subject_impl(subject).await
    }

    async fn list_most_downloaded_materials(&self, limit: u64) -> Result<Vec<CourseMaterial>> {
        self.list_most_downloaded_materials_impl(limit).await
    }

    async fn list_materials_with_pagination(
        &self,
        query: MaterialListQuery,
    ) -> Result<MaterialListResponse> {
        self.list_materials_with_pagination_impl(query).await
    }

    async fn update_material(
        &self,
        id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<CourseMaterial>> {
        self.update_material_impl(id, update).await
    }

    async fn increment_download_count(&self, id: i64) -> Result<bool> {
        self.increment_download_count_impl(id).await
    }

    async fn delete_material(&self, id: i64) -> Result<bool> {
        self.delete_material_impl(id).await
    }

    async fn count_materials(&self) -> Result<u64> {
        self.count_materials_impl().await
    }

    // 测验模块
    async fn create_assessment(&self, assessment: CreateAssessmentRequest) -> Result<Assessment> {
        self.create_assessment_impl(assessment).await
    }

    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>> {
        self.get_assessment_by_id_impl(id).await
    }

    async fn list_assessments_by_class(&self, class_id: i64) -> Result<Vec<Assessment>> {
        self.list_assessments_by_class_impl(class_id).await
    }

    async fn list_assessments_by_creator(&self, user_id: i64) -> Result<Vec<Assessment>> {
        self.list_assessments_by_creator_impl(user_id).await
    }

    async fn list_active_assessments(&self) -> Result<Vec<Assessment>> {
        self.list_active_assessments_impl().await
    }

    async fn list_upcoming_assessments(&self, now: DateTime<Utc>) -> Result<Vec<Assessment>> {
        self.list_upcoming_assessments_impl(now).await
    }

    async fn list_assessments_by_subject(&self, subject: &str) -> Result<Vec<Assessment>> {
        self.list_assessments_by_subject_impl(subject).await
    }

    async fn list_assessments_with_pagination(
        &self,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse> {
        self.list_assessments_with_pagination_impl(query).await
    }

    async fn update_assessment(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        self.update_assessment_impl(id, update).await
    }

    async fn delete_assessment(&self, id: i64) -> Result<bool> {
        self.delete_assessment_impl(id).await
    }

    async fn count_assessments(&self) -> Result<u64> {
        self.count_assessments_impl().await
    }

    // 提交模块
    async fn create_submission(&self, submission: CreateSubmissionRequest) -> Result<Submission> {
        self.create_submission_impl(submission).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission_by_assessment_and_student(
        &self,
        assessment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_by_assessment_and_student_impl(assessment_id, student_id).await
    }

    async fn list_submissions_by_assessment(&self, assessment_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_by_assessment_impl(assessment_id).await
    }

    async fn list_submissions_by_student(&self, student_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_by_student_impl(student_id).await
    }

    async fn list_submissions_by_status(
        &self,
        status: SubmissionStatus,
    ) -> Result<Vec<Submission>> {
        self.list_submissions_by_status_impl(status).await
    }

    async fn list_submissions_by_teacher(&self, teacher_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_by_teacher_impl(teacher_id).await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(query).await
    }

    async fn get_average_percentage_by_student(&self, student_id: i64) -> Result<Option<f64>> {
        self.get_average_percentage_by_student_impl(student_id).await
    }

    async fn count_submissions_by_student(&self, student_id: i64) -> Result<u64> {
        self.count_submissions_by_student_impl(student_id).await
    }

    async fn update_submission(
        &self,
        id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>> {
        self.update_submission_impl(id, update).await
    }

    async fn grade_submission(
        &self,
        id: i64,
        grader_id: i64,
        grade: GradeSubmissionRequest,
    ) -> Result<Submission> {
        self.grade_submission_impl(id, grader_id, grade).await
    }

    async fn return_submission(&self, id: i64) -> Result<bool> {
        self.return_submission_impl(id).await
    }

    async fn delete_submission(&self, id: i64) -> Result<bool> {
        self.delete_submission_impl(id).await
    }

    async fn count_submissions(&self) -> Result<u64> {
        self.count_submissions_impl().await
    }

    // 通知模块
    async fn create_notification(
        &self,
        notification: CreateNotificationRequest,
    ) -> Result<Notification> {
        self.create_notification_impl(notification).await
    }

    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>> {
        self.get_notification_by_id_impl(id).await
    }

    async fn list_notifications_by_recipient(
        &self,
        recipient_id: i64,
    ) -> Result<Vec<Notification>> {
        self.list_notifications_by_recipient_impl(recipient_id).await
    }

    async fn list_notifications_with_pagination(
        &self,
        recipient_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(recipient_id, query).await
    }

    async fn list_unread_notifications(&self, recipient_id: i64) -> Result<Vec<Notification>> {
        self.list_unread_notifications_impl(recipient_id).await
    }

    async fn count_unread_notifications(&self, recipient_id: i64) -> Result<u64> {
        self.count_unread_notifications_impl(recipient_id).await
    }

    async fn list_notifications_by_type(
        &self,
        notification_type: NotificationType,
    ) -> Result<Vec<Notification>> {
        self.list_notifications_by_type_impl(notification_type).await
    }

    async fn list_pending_email_notifications(&self) -> Result<Vec<Notification>> {
        self.list_pending_email_notifications_impl().await
    }

    async fn list_notifications_by_sender(&self, sender_id: i64) -> Result<Vec<Notification>> {
        self.list_notifications_by_sender_impl(sender_id).await
    }

    async fn mark_notification_as_read(&self, id: i64) -> Result<bool> {
        self.mark_notification_as_read_impl(id).await
    }

    async fn mark_all_notifications_as_read(&self, recipient_id: i64) -> Result<u64> {
        self.mark_all_notifications_as_read_impl(recipient_id).await
    }

    async fn mark_email_sent(&self, id: i64) -> Result<bool> {
        self.mark_email_sent_impl(id).await
    }

    async fn delete_notification(&self, id: i64) -> Result<bool> {
        self.delete_notification_impl(id).await
    }

    async fn count_notifications(&self) -> Result<u64> {
        self.count_notifications_impl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("classroom.db").unwrap(),
            "sqlite://classroom.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("sqlite::memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/classroom").unwrap(),
            "postgres://u:p@localhost/classroom"
        );
        assert!(SeaOrmStorage::build_database_url("classroom").is_err());
    }
}
