//! 课程资料存储操作

use super::SeaOrmStorage;
use crate::entity::class_bookings::Column as ClassColumn;
use crate::entity::course_materials::{ActiveModel, Column, Entity as CourseMaterials, Relation};
use crate::errors::{ClassroomError, Result};
use crate::models::{
    MAX_PAGE_SIZE, PaginationInfo,
    course_materials::{
        entities::CourseMaterial,
        requests::{CreateMaterialRequest, MaterialListQuery, UpdateMaterialRequest},
        responses::MaterialListResponse,
    },
    normalize_page,
};
use crate::utils::contains_any;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
    sea_query::{Expr, ExprTrait},
};

impl SeaOrmStorage {
    /// 上传资料
    pub async fn create_material_impl(&self, req: CreateMaterialRequest) -> Result<CourseMaterial> {
        req.validate()?;
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            file_name: Set(req.file_name),
            file_path: Set(req.file_path),
            file_type: Set(req.file_type),
            file_size: Set(req.file_size),
            download_count: Set(0),
            created_at: Set(now),
            class_id: Set(req.class_id),
            uploaded_by: Set(req.uploaded_by),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("创建资料失败", e))?;

        Ok(result.into_course_material())
    }

    /// 通过 ID 获取资料
    pub async fn get_material_by_id_impl(&self, id: i64) -> Result<Option<CourseMaterial>> {
        let result = CourseMaterials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询资料失败", e))?;

        Ok(result.map(|m| m.into_course_material()))
    }

    pub async fn list_materials_by_class_impl(&self, class_id: i64) -> Result<Vec<CourseMaterial>> {
        let materials = CourseMaterials::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询资料列表失败", e))?;

        Ok(materials.into_iter().map(|m| m.into_course_material()).collect())
    }

    pub async fn list_materials_by_uploader_impl(
        &self,
        user_id: i64,
    ) -> Result<Vec<CourseMaterial>> {
        let materials = CourseMaterials::find()
            .filter(Column::UploadedBy.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询资料列表失败", e))?;

        Ok(materials.into_iter().map(|m| m.into_course_material()).collect())
    }

    pub async fn list_materials_by_file_type_impl(
        &self,
        file_type: &str,
    ) -> Result<Vec<CourseMaterial>> {
        let materials = CourseMaterials::find()
            .filter(Column::FileType.eq(file_type))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询资料列表失败", e))?;

        Ok(materials.into_iter().map(|m| m.into_course_material()).collect())
    }

    /// 按所属课程的学科列出资料
    pub async fn list_materials_by_subject_impl(
        &self,
        subject: &str,
    ) -> Result<Vec<CourseMaterial>> {
        let materials = CourseMaterials::find()
            .join(JoinType::InnerJoin, Relation::ClassBooking.def())
            .filter(ClassColumn::Subject.eq(subject))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询资料列表失败", e))?;

        Ok(materials.into_iter().map(|m| m.into_course_material()).collect())
    }

    /// 下载次数最多的资料
    pub async fn list_most_downloaded_materials_impl(
        &self,
        limit: u64,
    ) -> Result<Vec<CourseMaterial>> {
        let materials = CourseMaterials::find()
            .order_by_desc(Column::DownloadCount)
            .order_by_asc(Column::Id)
            .limit(std::cmp::Ord::min(limit, MAX_PAGE_SIZE as u64))
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询热门资料失败", e))?;

        Ok(materials.into_iter().map(|m| m.into_course_material()).collect())
    }

    /// 分页列出资料
    pub async fn list_materials_with_pagination_impl(
        &self,
        query: MaterialListQuery,
    ) -> Result<MaterialListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = CourseMaterials::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        if let Some(uploaded_by) = query.uploaded_by {
            select = select.filter(Column::UploadedBy.eq(uploaded_by));
        }

        if let Some(ref file_type) = query.file_type {
            select = select.filter(Column::FileType.eq(file_type.as_str()));
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

        // 排序
        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassroomError::from_db("查询资料总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClassroomError::from_db("查询资料页数失败", e))?;

        let materials = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassroomError::from_db("查询资料列表失败", e))?;

        Ok(MaterialListResponse {
            items: materials.into_iter().map(|m| m.into_course_material()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新资料信息
    pub async fn update_material_impl(
        &self,
        id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<CourseMaterial>> {
        update.validate()?;

        let existing = self.get_material_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = <ActiveModel as Default>::default();

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(file_name) = update.file_name {
            model.file_name = Set(file_name);
        }

        if let Some(file_path) = update.file_path {
            model.file_path = Set(file_path);
        }

        if let Some(file_type) = update.file_type {
            model.file_type = Set(Some(file_type));
        }

        if let Some(file_size) = update.file_size {
            model.file_size = Set(Some(file_size));
        }

        // 没有需要更新的字段
        if !model.is_changed() {
            return Ok(existing);
        }
        model.id = Set(id);

        model
            .update(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("更新资料失败", e))?;

        self.get_material_by_id_impl(id).await
    }

    /// 下载次数 +1
    pub async fn increment_download_count_impl(&self, id: i64) -> Result<bool> {
        let result = CourseMaterials::update_many()
            .col_expr(
                Column::DownloadCount,
                Expr::col(Column::DownloadCount).add(1),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("更新下载次数失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除资料
    pub async fn delete_material_impl(&self, id: i64) -> Result<bool> {
        let result = CourseMaterials::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("删除资料失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计资料数量
    pub async fn count_materials_impl(&self) -> Result<u64> {
        let count = CourseMaterials::find()
            .count(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("统计资料数量失败", e))?;

        Ok(count)
    }
}
