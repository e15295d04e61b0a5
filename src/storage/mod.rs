use std::sync::Arc;

use chrono::{DateTime, Utc};

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

use crate::errors::Result;

pub mod sea_orm_storage;

pub use sea_orm_storage::SeaOrmStorage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 邮箱是否已注册
    async fn exists_user_by_email(&self, email: &str) -> Result<bool>;
    // 按角色列出用户
    async fn list_users_by_role(&self, role: UserRole) -> Result<Vec<User>>;
    // 按角色和审核状态列出用户
    async fn list_users_by_role_and_approval(
        &self,
        role: UserRole,
        is_approved: bool,
    ) -> Result<Vec<User>>;
    // 待审核用户
    async fn list_pending_approvals(&self) -> Result<Vec<User>>;
    // 分页列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 审核通过 / 拒绝
    async fn approve_user(&self, id: i64) -> Result<bool>;
    async fn reject_user(&self, id: i64) -> Result<bool>;
    // 用户统计
    async fn count_users(&self) -> Result<u64>;
    async fn count_users_by_role(&self, role: UserRole) -> Result<u64>;
    async fn count_active_users(&self) -> Result<u64>;

    /// 课程管理方法
    async fn create_class(&self, class: CreateClassRequest) -> Result<ClassBooking>;
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<ClassBooking>>;
    async fn list_classes_by_teacher(&self, teacher_id: i64) -> Result<Vec<ClassBooking>>;
    async fn list_classes_by_enrolled_student(&self, student_id: i64)
    -> Result<Vec<ClassBooking>>;
    // 开始时间落在 [start, end] 内
    async fn list_classes_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ClassBooking>>;
    async fn list_classes_by_subject(&self, subject: &str) -> Result<Vec<ClassBooking>>;
    async fn list_classes_by_status(&self, status: ClassStatus) -> Result<Vec<ClassBooking>>;
    // 即将开始的课程
    async fn list_upcoming_classes(&self, now: DateTime<Utc>) -> Result<Vec<ClassBooking>>;
    // 正在进行的课程
    async fn list_live_classes(&self, now: DateTime<Utc>) -> Result<Vec<ClassBooking>>;
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<ClassBooking>>;
    async fn update_class_status(&self, class_id: i64, status: ClassStatus) -> Result<bool>;
    // 删除课程（级联删除资料、测验、提交和选课记录）
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    async fn count_classes(&self) -> Result<u64>;

    /// 选课管理方法
    async fn enroll_student(&self, class_id: i64, student_id: i64) -> Result<Enrollment>;
    async fn unenroll_student(&self, class_id: i64, student_id: i64) -> Result<bool>;
    async fn list_enrolled_students(&self, class_id: i64) -> Result<Vec<User>>;
    async fn count_enrolled_students(&self, class_id: i64) -> Result<u64>;
    async fn is_student_enrolled(&self, class_id: i64, student_id: i64) -> Result<bool>;

    /// 课程资料方法
    async fn create_material(&self, material: CreateMaterialRequest) -> Result<CourseMaterial>;
    async fn get_material_by_id(&self, id: i64) -> Result<Option<CourseMaterial>>;
    async fn list_materials_by_class(&self, class_id: i64) -> Result<Vec<CourseMaterial>>;
    async fn list_materials_by_uploader(&self, user_id: i64) -> Result<Vec<CourseMaterial>>;
    async fn list_materials_by_file_type(&self, file_type: &str) -> Result<Vec<CourseMaterial>>;
    async fn list_materials_by_subject(&self, subject: &str) -> Result<Vec<CourseMaterial>>;
    async fn list_most_downloaded_materials(&self, limit: u64) -> Result<Vec<CourseMaterial>>;
    async fn list_materials_with_pagination(
        &self,
        query: MaterialListQuery,
    ) -> Result<MaterialListResponse>;
    async fn update_material(
        &self,
        id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<CourseMaterial>>;
    async fn increment_download_count(&self, id: i64) -> Result<bool>;
    async fn delete_material(&self, id: i64) -> Result<bool>;
    async fn count_materials(&self) -> Result<u64>;

    /// 测验管理方法
    async fn create_assessment(&self, assessment: CreateAssessmentRequest) -> Result<Assessment>;
    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>>;
    async fn list_assessments_by_class(&self, class_id: i64) -> Result<Vec<Assessment>>;
    async fn list_assessments_by_creator(&self, user_id: i64) -> Result<Vec<Assessment>>;
    async fn list_active_assessments(&self) -> Result<Vec<Assessment>>;
    async fn list_upcoming_assessments(&self, now: DateTime<Utc>) -> Result<Vec<Assessment>>;
    async fn list_assessments_by_subject(&self, subject: &str) -> Result<Vec<Assessment>>;
    async fn list_assessments_with_pagination(
        &self,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse>;
    async fn update_assessment(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>>;
    async fn delete_assessment(&self, id: i64) -> Result<bool>;
    async fn count_assessments(&self) -> Result<u64>;

    /// 测验提交方法
    async fn create_submission(&self, submission: CreateSubmissionRequest) -> Result<Submission>;
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    async fn get_submission_by_assessment_and_student(
        &self,
        assessment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    async fn list_submissions_by_assessment(&self, assessment_id: i64)
    -> Result<Vec<Submission>>;
    async fn list_submissions_by_student(&self, student_id: i64) -> Result<Vec<Submission>>;
    async fn list_submissions_by_status(&self, status: SubmissionStatus)
    -> Result<Vec<Submission>>;
    async fn list_submissions_by_teacher(&self, teacher_id: i64) -> Result<Vec<Submission>>;
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 平均得分百分比（忽略未评分）
    async fn get_average_percentage_by_student(&self, student_id: i64) -> Result<Option<f64>>;
    async fn count_submissions_by_student(&self, student_id: i64) -> Result<u64>;
    async fn update_submission(
        &self,
        id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>>;
    async fn grade_submission(
        &self,
        id: i64,
        grader_id: i64,
        grade: GradeSubmissionRequest,
    ) -> Result<Submission>;
    async fn return_submission(&self, id: i64) -> Result<bool>;
    async fn delete_submission(&self, id: i64) -> Result<bool>;
    async fn count_submissions(&self) -> Result<u64>;

    /// 通知方法
    async fn create_notification(
        &self,
        notification: CreateNotificationRequest,
    ) -> Result<Notification>;
    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>>;
    async fn list_notifications_by_recipient(&self, recipient_id: i64)
    -> Result<Vec<Notification>>;
    async fn list_notifications_with_pagination(
        &self,
        recipient_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    async fn list_unread_notifications(&self, recipient_id: i64) -> Result<Vec<Notification>>;
    async fn count_unread_notifications(&self, recipient_id: i64) -> Result<u64>;
    async fn list_notifications_by_type(
        &self,
        notification_type: NotificationType,
    ) -> Result<Vec<Notification>>;
    async fn list_pending_email_notifications(&self) -> Result<Vec<Notification>>;
    async fn list_notifications_by_sender(&self, sender_id: i64) -> Result<Vec<Notification>>;
    async fn mark_notification_as_read(&self, id: i64) -> Result<bool>;
    async fn mark_all_notifications_as_read(&self, recipient_id: i64) -> Result<u64>;
    async fn mark_email_sent(&self, id: i64) -> Result<bool>;
    async fn delete_notification(&self, id: i64) -> Result<bool>;
    async fn count_notifications(&self) -> Result<u64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
