//! 测验提交存储操作

use super::SeaOrmStorage;
use crate::entity::assessment_submissions::{
    ActiveModel, Column, Entity as AssessmentSubmissions, Relation,
};
use crate::entity::assessments::Column as AssessmentColumn;
use crate::errors::{ClassroomError, Result};
use crate::models::{
    PaginationInfo,
    normalize_page,
    submissions::{
        entities::{Submission, SubmissionStatus, compute_percentage},
        requests::{
            CreateSubmissionRequest, GradeSubmissionRequest, SubmissionListQuery,
            UpdateSubmissionRequest,
        },
        responses::SubmissionListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, sea_query::Expr,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 提交测验
    pub async fn create_submission_impl(&self, req: CreateSubmissionRequest) -> Result<Submission> {
        req.validate()?;
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            answers: Set(serde_json::to_string(&req.answers)?),
            status: Set(SubmissionStatus::Submitted.to_string()),
            submitted_at: Set(Some(req.submitted_at.map_or(now, |t| t.timestamp()))),
            created_at: Set(now),
            updated_at: Set(Some(now)),
            assessment_id: Set(req.assessment_id),
            student_id: Set(req.student_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("创建提交失败", e))?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = AssessmentSubmissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询提交失败", e))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取学生在某测验下的提交（存在多条时取最新一条）
    pub async fn get_submission_by_assessment_and_student_impl(
        &self,
        assessment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = AssessmentSubmissions::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询提交失败", e))?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn list_submissions_by_assessment_impl(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<Submission>> {
        let submissions = AssessmentSubmissions::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询提交列表失败", e))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }

    pub async fn list_submissions_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Submission>> {
        let submissions = AssessmentSubmissions::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询提交列表失败", e))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }

    pub async fn list_submissions_by_status_impl(
        &self,
        status: SubmissionStatus,
    ) -> Result<Vec<Submission>> {
        let submissions = AssessmentSubmissions::find()
            .filter(Column::Status.eq(status.as_str()))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询提交列表失败", e))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 教师所出测验下的全部提交
    pub async fn list_submissions_by_teacher_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<Submission>> {
        let submissions = AssessmentSubmissions::find()
            .join(JoinType::InnerJoin, Relation::Assessment.def())
            .filter(AssessmentColumn::CreatedBy.eq(teacher_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询提交列表失败", e))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 学生的平均得分百分比，忽略未评分的提交
    pub async fn get_average_percentage_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Option<f64>> {
        let percentages: Vec<Option<f64>> = AssessmentSubmissions::find()
            .select_only()
            .column(Column::Percentage)
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Percentage.is_not_null())
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询平均分失败", e))?;

        let values: Vec<f64> = percentages.into_iter().flatten().collect();
        if values.is_empty() {
            return Ok(None);
        }

        Ok(Some(values.iter().sum::<f64>() / values.len() as f64))
    }

    pub async fn count_submissions_by_student_impl(&self, student_id: i64) -> Result<u64> {
        let count = AssessmentSubmissions::find()
            .filter(Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("统计提交数量失败", e))?;

        Ok(count)
    }

    /// 分页列出提交
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = AssessmentSubmissions::find();

        if let Some(assessment_id) = query.assessment_id {
            select = select.filter(Column::AssessmentId.eq(assessment_id));
        }

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        select = select
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassroomError::from_db("查询提交总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClassroomError::from_db("查询提交页数失败", e))?;

        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassroomError::from_db("查询提交列表失败", e))?;

        Ok(SubmissionListResponse {
            items: submissions.into_iter().map(|m| m.into_submission()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新提交
    pub async fn update_submission_impl(
        &self,
        id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>> {
        update.validate()?;

        let existing = self.get_submission_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        if let Some(answers) = update.answers {
            model.answers = Set(serde_json::to_string(&answers)?);
        }

        if let Some(score) = update.score {
            model.score = Set(Some(score));
        }

        if let Some(total_points) = update.total_points {
            model.total_points = Set(Some(total_points));
        }

        if let Some(percentage) = update.percentage {
            model.percentage = Set(Some(percentage));
        }

        if let Some(feedback) = update.feedback {
            model.feedback = Set(Some(feedback));
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("更新提交失败", e))?;

        self.get_submission_by_id_impl(id).await
    }

    /// 评分
    ///
    /// 满分优先取请求中的值，否则取测验的 total_points；
    /// 满分为正数时同时计算百分比。
    pub async fn grade_submission_impl(
        &self,
        id: i64,
        grader_id: i64,
        req: GradeSubmissionRequest,
    ) -> Result<Submission> {
        req.validate()?;

        let submission = self
            .get_submission_by_id_impl(id)
            .await?
            .ok_or_else(|| ClassroomError::not_found(format!("提交不存在: {id}")))?;

        let total_points = match req.total_points {
            Some(total) => Some(total),
            None => self
                .get_assessment_by_id_impl(submission.assessment_id)
                .await?
                .and_then(|a| a.total_points),
        };

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(id),
            score: Set(Some(req.score)),
            total_points: Set(total_points),
            percentage: Set(compute_percentage(req.score, total_points)),
            feedback: Set(req.feedback),
            status: Set(SubmissionStatus::Graded.to_string()),
            graded_by: Set(Some(grader_id)),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("评分失败", e))?;

        debug!("Submission {} graded by {}", id, grader_id);

        Ok(result.into_submission())
    }

    /// 退回提交
    pub async fn return_submission_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = AssessmentSubmissions::update_many()
            .col_expr(
                Column::Status,
                Expr::value(SubmissionStatus::Returned.to_string()),
            )
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("退回提交失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除提交
    pub async fn delete_submission_impl(&self, id: i64) -> Result<bool> {
        let result = AssessmentSubmissions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("删除提交失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计提交数量
    pub async fn count_submissions_impl(&self) -> Result<u64> {
        let count = AssessmentSubmissions::find()
            .count(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("统计提交数量失败", e))?;

        Ok(count)
    }
}
