//! 课程预约存储操作

use super::SeaOrmStorage;
use crate::entity::class_bookings::{ActiveModel, Column, Entity as ClassBookings, Relation};
use crate::entity::class_enrollments::Column as EnrollmentColumn;
use crate::errors::{ClassroomError, Result};
use crate::models::{
    PaginationInfo,
    class_bookings::{
        entities::{ClassBooking, ClassStatus},
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    normalize_page,
};
use crate::utils::contains_any;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<ClassBooking> {
        req.validate()?;
        let now = Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            subject: Set(req.subject),
            start_time: Set(req.start_time.timestamp()),
            end_time: Set(req.end_time.timestamp()),
            meeting_link: Set(req.meeting_link),
            location: Set(req.location),
            max_students: Set(req.max_students),
            status: Set(req.status.unwrap_or_default().to_string()),
            created_at: Set(now),
            updated_at: Set(Some(now)),
            teacher_id: Set(req.teacher_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("创建课程失败", e))?;

        Ok(result.into_class_booking())
    }

    /// 通过 ID 获取课程
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<ClassBooking>> {
        let result = ClassBookings::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询课程失败", e))?;

        Ok(result.map(|m| m.into_class_booking()))
    }

    /// 列出教师开设的课程
    pub async fn list_classes_by_teacher_impl(&self, teacher_id: i64) -> Result<Vec<ClassBooking>> {
        let classes = ClassBookings::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询课程列表失败", e))?;

        Ok(classes.into_iter().map(|m| m.into_class_booking()).collect())
    }

    /// 列出学生已选的课程
    pub async fn list_classes_by_enrolled_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<ClassBooking>> {
        let classes = ClassBookings::find()
            .join(JoinType::InnerJoin, Relation::ClassEnrollments.def())
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询学生课程失败", e))?;

        Ok(classes.into_iter().map(|m| m.into_class_booking()).collect())
    }

    /// 开始时间落在 [start, end] 内的课程
    pub async fn list_classes_by_date_range_impl(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ClassBooking>> {
        let classes = ClassBookings::find()
            .filter(Column::StartTime.between(start.timestamp(), end.timestamp()))
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询课程列表失败", e))?;

        Ok(classes.into_iter().map(|m| m.into_class_booking()).collect())
    }

    /// 按学科列出课程
    pub async fn list_classes_by_subject_impl(&self, subject: &str) -> Result<Vec<ClassBooking>> {
        let classes = ClassBookings::find()
            .filter(Column::Subject.eq(subject))
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询课程列表失败", e))?;

        Ok(classes.into_iter().map(|m| m.into_class_booking()).collect())
    }

    /// 按状态列出课程
    pub async fn list_classes_by_status_impl(
        &self,
        status: ClassStatus,
    ) -> Result<Vec<ClassBooking>> {
        let classes = ClassBookings::find()
            .filter(Column::Status.eq(status.as_str()))
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询课程列表失败", e))?;

        Ok(classes.into_iter().map(|m| m.into_class_booking()).collect())
    }

    /// 即将开始的课程：已排期且开始时间不早于 now
    pub async fn list_upcoming_classes_impl(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ClassBooking>> {
        let classes = ClassBookings::find()
            .filter(Column::StartTime.gte(now.timestamp()))
            .filter(Column::Status.eq(ClassStatus::Scheduled.as_str()))
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询即将开始的课程失败", e))?;

        Ok(classes.into_iter().map(|m| m.into_class_booking()).collect())
    }

    /// 正在进行的课程：已排期且 start_time <= now <= end_time
    pub async fn list_live_classes_impl(&self, now: DateTime<Utc>) -> Result<Vec<ClassBooking>> {
        let ts = now.timestamp();
        let classes = ClassBookings::find()
            .filter(Column::StartTime.lte(ts))
            .filter(Column::EndTime.gte(ts))
            .filter(Column::Status.eq(ClassStatus::Scheduled.as_str()))
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询进行中的课程失败", e))?;

        Ok(classes.into_iter().map(|m| m.into_class_booking()).collect())
    }

    /// 分页列出课程
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = ClassBookings::find();

        // 教师筛选
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        if let Some(ref subject) = query.subject {
            select = select.filter(Column::Subject.eq(subject.as_str()));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(contains_any(
                &[Column::Title, Column::Subject],
                search.trim(),
            ));
        }

        // 排序
        select = select
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassroomError::from_db("查询课程总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClassroomError::from_db("查询课程页数失败", e))?;

        let classes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassroomError::from_db("查询课程列表失败", e))?;

        Ok(ClassListResponse {
            items: classes.into_iter().map(|m| m.into_class_booking()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新课程信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<ClassBooking>> {
        update.validate()?;

        // 先检查课程是否存在
        let existing = self.get_class_by_id_impl(class_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(subject) = update.subject {
            model.subject = Set(subject);
        }

        if let Some(start_time) = update.start_time {
            model.start_time = Set(start_time.timestamp());
        }

        if let Some(end_time) = update.end_time {
            model.end_time = Set(end_time.timestamp());
        }

        if let Some(meeting_link) = update.meeting_link {
            model.meeting_link = Set(Some(meeting_link));
        }

        if let Some(location) = update.location {
            model.location = Set(Some(location));
        }

        if let Some(max_students) = update.max_students {
            model.max_students = Set(Some(max_students));
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("更新课程失败", e))?;

        self.get_class_by_id_impl(class_id).await
    }

    /// 更新课程状态
    pub async fn update_class_status_impl(&self, class_id: i64, status: ClassStatus) -> Result<bool> {
        let now = Utc::now().timestamp();

        let result = ClassBookings::update_many()
            .col_expr(Column::Status, Expr::value(status.as_str()))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(class_id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("更新课程状态失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除课程（资料、测验、提交和选课记录级联删除）
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let result = ClassBookings::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("删除课程失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计课程数量
    pub async fn count_classes_impl(&self) -> Result<u64> {
        let count = ClassBookings::find()
            .count(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("统计课程数量失败", e))?;

        Ok(count)
    }
}
