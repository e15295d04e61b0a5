//! 用户存储操作

use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{ClassroomError, Result};
use crate::models::{
    PaginationInfo, normalize_page,
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::contains_any;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        req.validate()?;
        let now = chrono::Utc::now().timestamp();

        let survey_answers = req
            .survey_answers
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let model = ActiveModel {
            full_name: Set(req.full_name),
            email: Set(req.email),
            password: Set(req.password_hash),
            role: Set(req.role.to_string()),
            is_active: Set(req.is_active.unwrap_or(true)),
            is_approved: Set(req.is_approved.unwrap_or(false)),
            survey_answers: Set(survey_answers),
            profile_picture: Set(req.profile_picture),
            phone_number: Set(req.phone_number),
            institution: Set(req.institution),
            created_at: Set(now),
            updated_at: Set(Some(now)),
            last_login_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("创建用户失败", e))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 邮箱是否已被注册
    pub async fn exists_user_by_email_impl(&self, email: &str) -> Result<bool> {
        let count = Users::find()
            .filter(Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询用户失败", e))?;

        Ok(count > 0)
    }

    /// 按角色列出用户
    pub async fn list_users_by_role_impl(&self, role: UserRole) -> Result<Vec<User>> {
        let users = Users::find()
            .filter(Column::Role.eq(role.as_str()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询用户列表失败", e))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 按角色和审核状态列出用户
    pub async fn list_users_by_role_and_approval_impl(
        &self,
        role: UserRole,
        is_approved: bool,
    ) -> Result<Vec<User>> {
        let users = Users::find()
            .filter(Column::Role.eq(role.as_str()))
            .filter(Column::IsApproved.eq(is_approved))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询用户列表失败", e))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 待审核用户，按注册时间先后排列
    pub async fn list_pending_approvals_impl(&self) -> Result<Vec<User>> {
        let users = Users::find()
            .filter(Column::IsApproved.eq(false))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询待审核用户失败", e))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(contains_any(
                &[Column::FullName, Column::Email],
                search.trim(),
            ));
        }

        // 角色筛选
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.as_str()));
        }

        if let Some(is_approved) = query.is_approved {
            select = select.filter(Column::IsApproved.eq(is_approved));
        }

        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }

        // 排序
        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassroomError::from_db("查询用户总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClassroomError::from_db("查询用户页数失败", e))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassroomError::from_db("查询用户列表失败", e))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLoginAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("更新最后登录时间失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 审核通过
    pub async fn approve_user_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::IsApproved, Expr::value(true))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("审核用户失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 审核拒绝：取消审核并停用账号
    pub async fn reject_user_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::IsApproved, Expr::value(false))
            .col_expr(Column::IsActive, Expr::value(false))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("拒绝用户失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        update.validate()?;

        // 先检查用户是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(password_hash) = update.password_hash {
            model.password = Set(password_hash);
        }

        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }

        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        if let Some(is_approved) = update.is_approved {
            model.is_approved = Set(is_approved);
        }

        if let Some(survey_answers) = update.survey_answers {
            model.survey_answers = Set(Some(serde_json::to_string(&survey_answers)?));
        }

        if let Some(profile_picture) = update.profile_picture {
            model.profile_picture = Set(Some(profile_picture));
        }

        if let Some(phone_number) = update.phone_number {
            model.phone_number = Set(Some(phone_number));
        }

        if let Some(institution) = update.institution {
            model.institution = Set(Some(institution));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("更新用户失败", e))?;

        self.get_user_by_id_impl(id).await
    }

    /// 删除用户
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("删除用户失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("统计用户数量失败", e))?;

        Ok(count)
    }

    /// 按角色统计用户数量
    pub async fn count_users_by_role_impl(&self, role: UserRole) -> Result<u64> {
        let count = Users::find()
            .filter(Column::Role.eq(role.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("统计用户数量失败", e))?;

        Ok(count)
    }

    /// 统计启用中的用户数量
    pub async fn count_active_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .filter(Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("统计用户数量失败", e))?;

        Ok(count)
    }
}
