//! 测验存储操作

use super::SeaOrmStorage;
use crate::entity::assessments::{ActiveModel, Column, Entity as Assessments, Relation};
use crate::entity::class_bookings::Column as ClassColumn;
use crate::errors::{ClassroomError, Result};
use crate::models::{
    PaginationInfo,
    assessments::{
        entities::Assessment,
        requests::{AssessmentListQuery, CreateAssessmentRequest, UpdateAssessmentRequest},
        responses::AssessmentListResponse,
    },
    normalize_page,
};
use crate::utils::contains_any;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 创建测验
    pub async fn create_assessment_impl(&self, req: CreateAssessmentRequest) -> Result<Assessment> {
        req.validate()?;
        let now = Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            questions: Set(serde_json::to_string(&req.questions)?),
            time_limit: Set(req.time_limit),
            total_points: Set(req.total_points),
            due_date: Set(req.due_date.map(|d| d.timestamp())),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(Some(now)),
            class_id: Set(req.class_id),
            created_by: Set(req.created_by),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("创建测验失败", e))?;

        Ok(result.into_assessment())
    }

    /// 通过 ID 获取测验
    pub async fn get_assessment_by_id_impl(&self, id: i64) -> Result<Option<Assessment>> {
        let result = Assessments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询测验失败", e))?;

        Ok(result.map(|m| m.into_assessment()))
    }

    pub async fn list_assessments_by_class_impl(&self, class_id: i64) -> Result<Vec<Assessment>> {
        let assessments = Assessments::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询测验列表失败", e))?;

        Ok(assessments.into_iter().map(|m| m.into_assessment()).collect())
    }

    pub async fn list_assessments_by_creator_impl(&self, user_id: i64) -> Result<Vec<Assessment>> {
        let assessments = Assessments::find()
            .filter(Column::CreatedBy.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询测验列表失败", e))?;

        Ok(assessments.into_iter().map(|m| m.into_assessment()).collect())
    }

    pub async fn list_active_assessments_impl(&self) -> Result<Vec<Assessment>> {
        let assessments = Assessments::find()
            .filter(Column::IsActive.eq(true))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询测验列表失败", e))?;

        Ok(assessments.into_iter().map(|m| m.into_assessment()).collect())
    }

    /// 未到截止时间的有效测验，按截止时间升序
    pub async fn list_upcoming_assessments_impl(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Assessment>> {
        let assessments = Assessments::find()
            .filter(Column::DueDate.gte(now.timestamp()))
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询即将截止的测验失败", e))?;

        Ok(assessments.into_iter().map(|m| m.into_assessment()).collect())
    }

    /// 按所属课程的学科列出测验
    pub async fn list_assessments_by_subject_impl(&self, subject: &str) -> Result<Vec<Assessment>> {
        let assessments = Assessments::find()
            .join(JoinType::InnerJoin, Relation::ClassBooking.def())
            .filter(ClassColumn::Subject.eq(subject))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询测验列表失败", e))?;

        Ok(assessments.into_iter().map(|m| m.into_assessment()).collect())
    }

    /// 分页列出测验
    pub async fn list_assessments_with_pagination_impl(
        &self,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Assessments::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        if let Some(created_by) = query.created_by {
            select = select.filter(Column::CreatedBy.eq(created_by));
        }

        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(contains_any(
                &[Column::Title, Column::Description],
                search.trim(),
            ));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassroomError::from_db("查询测验总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClassroomError::from_db("查询测验页数失败", e))?;

        let assessments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassroomError::from_db("查询测验列表失败", e))?;

        Ok(AssessmentListResponse {
            items: assessments.into_iter().map(|m| m.into_assessment()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新测验
    pub async fn update_assessment_impl(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        update.validate()?;

        let existing = self.get_assessment_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(questions) = update.questions {
            model.questions = Set(serde_json::to_string(&questions)?);
        }

        if let Some(time_limit) = update.time_limit {
            model.time_limit = Set(Some(time_limit));
        }

        if let Some(total_points) = update.total_points {
            model.total_points = Set(Some(total_points));
        }

        if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(due_date.timestamp()));
        }

        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("更新测验失败", e))?;

        self.get_assessment_by_id_impl(id).await
    }

    /// 删除测验（提交记录级联删除）
    pub async fn delete_assessment_impl(&self, id: i64) -> Result<bool> {
        let result = Assessments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("删除测验失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计测验数量
    pub async fn count_assessments_impl(&self) -> Result<u64> {
        let count = Assessments::find()
            .count(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("统计测验数量失败", e))?;

        Ok(count)
    }
}
