//! 通知存储操作

use super::SeaOrmStorage;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{ClassroomError, Result};
use crate::models::{
    PaginationInfo,
    normalize_page,
    notifications::{
        entities::{Notification, NotificationType},
        requests::{CreateNotificationRequest, NotificationListQuery},
        responses::NotificationListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建通知
    pub async fn create_notification_impl(
        &self,
        req: CreateNotificationRequest,
    ) -> Result<Notification> {
        req.validate()?;
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            message: Set(req.message),
            notification_type: Set(req.notification_type.to_string()),
            is_read: Set(false),
            is_email_sent: Set(false),
            created_at: Set(now),
            read_at: Set(None),
            recipient_id: Set(req.recipient_id),
            sender_id: Set(req.sender_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("创建通知失败", e))?;

        Ok(result.into_notification())
    }

    /// 通过 ID 获取通知
    pub async fn get_notification_by_id_impl(&self, id: i64) -> Result<Option<Notification>> {
        let result = Notifications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询通知失败", e))?;

        Ok(result.map(|m| m.into_notification()))
    }

    pub async fn list_notifications_by_recipient_impl(
        &self,
        recipient_id: i64,
    ) -> Result<Vec<Notification>> {
        let notifications = Notifications::find()
            .filter(Column::RecipientId.eq(recipient_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询通知列表失败", e))?;

        Ok(notifications.into_iter().map(|m| m.into_notification()).collect())
    }

    /// 未读通知，最新的在前
    pub async fn list_unread_notifications_impl(
        &self,
        recipient_id: i64,
    ) -> Result<Vec<Notification>> {
        let notifications = Notifications::find()
            .filter(Column::RecipientId.eq(recipient_id))
            .filter(Column::IsRead.eq(false))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询未读通知失败", e))?;

        Ok(notifications.into_iter().map(|m| m.into_notification()).collect())
    }

    pub async fn list_notifications_by_type_impl(
        &self,
        notification_type: NotificationType,
    ) -> Result<Vec<Notification>> {
        let notifications = Notifications::find()
            .filter(Column::NotificationType.eq(notification_type.as_str()))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询通知列表失败", e))?;

        Ok(notifications.into_iter().map(|m| m.into_notification()).collect())
    }

    /// 尚未发送邮件的通知，按创建时间先后排列
    pub async fn list_pending_email_notifications_impl(&self) -> Result<Vec<Notification>> {
        let notifications = Notifications::find()
            .filter(Column::IsEmailSent.eq(false))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询待发送邮件通知失败", e))?;

        Ok(notifications.into_iter().map(|m| m.into_notification()).collect())
    }

    pub async fn list_notifications_by_sender_impl(
        &self,
        sender_id: i64,
    ) -> Result<Vec<Notification>> {
        let notifications = Notifications::find()
            .filter(Column::SenderId.eq(sender_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询通知列表失败", e))?;

        Ok(notifications.into_iter().map(|m| m.into_notification()).collect())
    }

    /// 分页列出用户的通知
    pub async fn list_notifications_with_pagination_impl(
        &self,
        recipient_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Notifications::find().filter(Column::RecipientId.eq(recipient_id));

        // 仅未读
        if query.unread_only.unwrap_or(false) {
            select = select.filter(Column::IsRead.eq(false));
        }

        // 类型筛选
        if let Some(notification_type) = query.notification_type {
            select = select.filter(Column::NotificationType.eq(notification_type.as_str()));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassroomError::from_db("查询通知总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClassroomError::from_db("查询通知页数失败", e))?;

        let notifications = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassroomError::from_db("查询通知列表失败", e))?;

        let unread_count = self.count_unread_notifications_impl(recipient_id).await?;

        Ok(NotificationListResponse {
            items: notifications
                .into_iter()
                .map(|m| m.into_notification())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
            unread_count: unread_count as i64,
        })
    }

    /// 获取用户未读通知数量
    pub async fn count_unread_notifications_impl(&self, recipient_id: i64) -> Result<u64> {
        let count = Notifications::find()
            .filter(Column::RecipientId.eq(recipient_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("查询未读通知数量失败", e))?;

        Ok(count)
    }

    /// 标记通知为已读
    pub async fn mark_notification_as_read_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Notifications::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .col_expr(Column::ReadAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("标记通知已读失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 标记用户所有通知为已读，返回更新条数
    pub async fn mark_all_notifications_as_read_impl(&self, recipient_id: i64) -> Result<u64> {
        let now = chrono::Utc::now().timestamp();

        let result = Notifications::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .col_expr(Column::ReadAt, Expr::value(now))
            .filter(Column::RecipientId.eq(recipient_id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("标记全部通知已读失败", e))?;

        Ok(result.rows_affected)
    }

    /// 标记邮件已发送
    pub async fn mark_email_sent_impl(&self, id: i64) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::IsEmailSent, Expr::value(true))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("标记邮件已发送失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除通知
    pub async fn delete_notification_impl(&self, id: i64) -> Result<bool> {
        let result = Notifications::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("删除通知失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计通知数量
    pub async fn count_notifications_impl(&self) -> Result<u64> {
        let count = Notifications::find()
            .count(&self.db)
            .await
            .map_err(|e| ClassroomError::from_db("统计通知数量失败", e))?;

        Ok(count)
    }
}
