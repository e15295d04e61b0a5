mod common;

use classroom_store::models::notifications::{
    entities::NotificationType,
    requests::{CreateNotificationRequest, NotificationListQuery},
};
use classroom_store::models::users::entities::UserRole;
use classroom_store::storage::Storage;
use common::{create_user, test_storage};

fn notification(
    recipient_id: i64,
    sender_id: Option<i64>,
    notification_type: NotificationType,
) -> CreateNotificationRequest {
    CreateNotificationRequest {
        title: "Heads up".to_string(),
        message: "Class starts in 15 minutes".to_string(),
        notification_type,
        recipient_id,
        sender_id,
    }
}

#[tokio::test]
async fn new_notifications_are_unread_and_unsent() {
    let storage = test_storage().await;
    let student = create_user(&storage, "student@school.edu", UserRole::Student).await;

    let created = storage
        .create_notification(notification(student.id, None, NotificationType::System))
        .await
        .unwrap();
    assert!(!created.is_read);
    assert!(!created.is_email_sent);
    assert!(created.read_at.is_none());
    assert_eq!(created.notification_type, NotificationType::System);
}

#[tokio::test]
async fn unread_counts_and_mark_read() {
    let storage = test_storage().await;
    let teacher = create_user(&storage, "teacher@school.edu", UserRole::Teacher).await;
    let student = create_user(&storage, "student@school.edu", UserRole::Student).await;

    let first = storage
        .create_notification(notification(student.id, Some(teacher.id), NotificationType::ClassReminder))
        .await
        .unwrap();
    storage
        .create_notification(notification(student.id, Some(teacher.id), NotificationType::GradePosted))
        .await
        .unwrap();
    let last = storage
        .create_notification(notification(student.id, None, NotificationType::General))
        .await
        .unwrap();
    storage
        .create_notification(notification(teacher.id, None, NotificationType::System))
        .await
        .unwrap();

    assert_eq!(storage.count_unread_notifications(student.id).await.unwrap(), 3);

    // 最新的在前
    let unread = storage.list_unread_notifications(student.id).await.unwrap();
    assert_eq!(unread.len(), 3);
    assert_eq!(unread[0].id, last.id);

    assert!(storage.mark_notification_as_read(first.id).await.unwrap());
    assert!(!storage.mark_notification_as_read(first.id).await.unwrap());
    let read = storage.get_notification_by_id(first.id).await.unwrap().unwrap();
    assert!(read.is_read);
    assert!(read.read_at.is_some());
    assert_eq!(storage.count_unread_notifications(student.id).await.unwrap(), 2);

    assert_eq!(storage.mark_all_notifications_as_read(student.id).await.unwrap(), 2);
    assert_eq!(storage.count_unread_notifications(student.id).await.unwrap(), 0);
    assert_eq!(storage.count_unread_notifications(teacher.id).await.unwrap(), 1);

    assert_eq!(storage.list_notifications_by_recipient(student.id).await.unwrap().len(), 3);
    assert_eq!(storage.list_notifications_by_sender(teacher.id).await.unwrap().len(), 2);
    assert_eq!(
        storage
            .list_notifications_by_type(NotificationType::System)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn pending_email_queue() {
    let storage = test_storage().await;
    let student = create_user(&storage, "student@school.edu", UserRole::Student).await;

    let a = storage
        .create_notification(notification(student.id, None, NotificationType::AssessmentDue))
        .await
        .unwrap();
    let b = storage
        .create_notification(notification(student.id, None, NotificationType::AssessmentDue))
        .await
        .unwrap();

    assert!(storage.mark_email_sent(a.id).await.unwrap());

    let pending = storage.list_pending_email_notifications().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, b.id);
}

#[tokio::test]
async fn paginated_notifications() {
    let storage = test_storage().await;
    let student = create_user(&storage, "student@school.edu", UserRole::Student).await;

    for _ in 0..3 {
        storage
            .create_notification(notification(student.id, None, NotificationType::General))
            .await
            .unwrap();
    }
    let reminder = storage
        .create_notification(notification(student.id, None, NotificationType::ClassReminder))
        .await
        .unwrap();
    storage.mark_notification_as_read(reminder.id).await.unwrap();

    let unread = storage
        .list_notifications_with_pagination(
            student.id,
            NotificationListQuery {
                unread_only: Some(true),
                size: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(unread.items.len(), 2);
    assert_eq!(unread.pagination.total, 3);
    assert_eq!(unread.unread_count, 3);

    let reminders = storage
        .list_notifications_with_pagination(
            student.id,
            NotificationListQuery {
                notification_type: Some(NotificationType::ClassReminder),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(reminders.pagination.total, 1);
    assert!(reminders.items[0].is_read);
}

#[tokio::test]
async fn notifications_follow_their_recipient() {
    let storage = test_storage().await;
    let teacher = create_user(&storage, "teacher@school.edu", UserRole::Teacher).await;
    let student = create_user(&storage, "student@school.edu", UserRole::Student).await;

    let sent = storage
        .create_notification(notification(student.id, Some(teacher.id), NotificationType::General))
        .await
        .unwrap();

    // 删除发送者：sender_id 置空
    storage.delete_user(teacher.id).await.unwrap();
    let orphaned = storage.get_notification_by_id(sent.id).await.unwrap().unwrap();
    assert_eq!(orphaned.sender_id, None);

    // 删除接收者：通知级联删除
    storage.delete_user(student.id).await.unwrap();
    assert!(storage.get_notification_by_id(sent.id).await.unwrap().is_none());
    assert_eq!(storage.count_notifications().await.unwrap(), 0);
}
