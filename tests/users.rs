mod common;

use classroom_store::errors::ClassroomError;
use classroom_store::models::course_materials::requests::CreateMaterialRequest;
use classroom_store::models::submissions::requests::{
    CreateSubmissionRequest, GradeSubmissionRequest,
};
use classroom_store::models::users::{
    entities::UserRole,
    requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
};
use classroom_store::storage::Storage;
use common::{create_assessment, create_class, create_user, test_storage};
use serde_json::json;

#[tokio::test]
async fn create_user_applies_defaults() {
    let storage = test_storage().await;

    let user = storage
        .create_user(CreateUserRequest::new(
            "Ada Lovelace",
            "ada@school.edu",
            "hash",
            UserRole::Student,
        ))
        .await
        .unwrap();

    assert!(user.id > 0);
    assert!(user.is_active);
    assert!(!user.is_approved);
    assert!(user.last_login_at.is_none());
    assert_eq!(user.role, UserRole::Student);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let storage = test_storage().await;
    create_user(&storage, "dup@school.edu", UserRole::Teacher).await;

    let err = storage
        .create_user(CreateUserRequest::new(
            "Someone Else",
            "dup@school.edu",
            "hash",
            UserRole::Student,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, ClassroomError::Conflict(_)), "got {err:?}");
    assert!(storage.exists_user_by_email("dup@school.edu").await.unwrap());
    assert!(!storage.exists_user_by_email("nobody@school.edu").await.unwrap());
}

#[tokio::test]
async fn invalid_requests_are_rejected_before_write() {
    let storage = test_storage().await;

    let blank = CreateUserRequest::new("", "blank@school.edu", "hash", UserRole::Student);
    let err = storage.create_user(blank).await.unwrap_err();
    assert!(matches!(err, ClassroomError::Validation(_)));

    let bad_email = CreateUserRequest::new("Bad Email", "not-an-email", "hash", UserRole::Student);
    let err = storage.create_user(bad_email).await.unwrap_err();
    assert!(matches!(err, ClassroomError::Validation(_)));

    assert_eq!(storage.count_users().await.unwrap(), 0);
}

#[tokio::test]
async fn survey_answers_round_trip_as_json() {
    let storage = test_storage().await;

    let answers = json!({ "grade": 7, "subjects": ["math", "science"] });
    let mut req = CreateUserRequest::new("Parent", "parent@home.org", "hash", UserRole::Parent);
    req.survey_answers = Some(answers.clone());
    let user = storage.create_user(req).await.unwrap();

    let fetched = storage
        .get_user_by_email("parent@home.org")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.survey_answers, Some(answers));
}

#[tokio::test]
async fn role_queries_and_counts() {
    let storage = test_storage().await;
    create_user(&storage, "t1@school.edu", UserRole::Teacher).await;
    create_user(&storage, "t2@school.edu", UserRole::Teacher).await;
    let student = create_user(&storage, "s1@school.edu", UserRole::Student).await;
    storage
        .create_user(CreateUserRequest::new(
            "Pending Teacher",
            "t3@school.edu",
            "hash",
            UserRole::Teacher,
        ))
        .await
        .unwrap();

    assert_eq!(storage.list_users_by_role(UserRole::Teacher).await.unwrap().len(), 3);
    assert_eq!(storage.count_users_by_role(UserRole::Teacher).await.unwrap(), 3);
    assert_eq!(storage.count_users_by_role(UserRole::Admin).await.unwrap(), 0);

    let approved_teachers = storage
        .list_users_by_role_and_approval(UserRole::Teacher, true)
        .await
        .unwrap();
    assert_eq!(approved_teachers.len(), 2);

    let pending = storage.list_pending_approvals().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].email, "t3@school.edu");

    storage.reject_user(student.id).await.unwrap();
    assert_eq!(storage.count_users().await.unwrap(), 4);
    assert_eq!(storage.count_active_users().await.unwrap(), 3);
}

#[tokio::test]
async fn approve_and_reject() {
    let storage = test_storage().await;
    let user = storage
        .create_user(CreateUserRequest::new(
            "New Teacher",
            "new@school.edu",
            "hash",
            UserRole::Teacher,
        ))
        .await
        .unwrap();

    assert!(storage.approve_user(user.id).await.unwrap());
    let approved = storage.get_user_by_id(user.id).await.unwrap().unwrap();
    assert!(approved.is_approved);
    assert!(approved.is_active);

    assert!(storage.reject_user(user.id).await.unwrap());
    let rejected = storage.get_user_by_id(user.id).await.unwrap().unwrap();
    assert!(!rejected.is_approved);
    assert!(!rejected.is_active);

    assert!(!storage.approve_user(9999).await.unwrap());
}

#[tokio::test]
async fn pagination_with_search_and_filters() {
    let storage = test_storage().await;
    for i in 0..5 {
        create_user(&storage, &format!("student{i}@school.edu"), UserRole::Student).await;
    }
    create_user(&storage, "teacher@school.edu", UserRole::Teacher).await;

    let page = storage
        .list_users_with_pagination(UserListQuery {
            page: Some(3),
            size: Some(2),
            role: Some(UserRole::Student),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.pagination.total, 5);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.pagination.page, 3);

    let search = storage
        .list_users_with_pagination(UserListQuery {
            search: Some("teacher@".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(search.items.len(), 1);
    assert_eq!(search.items[0].role, UserRole::Teacher);

    // 通配符按字面匹配
    let wildcard = storage
        .list_users_with_pagination(UserListQuery {
            search: Some("%".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(wildcard.pagination.total, 0);

    let far = storage
        .list_users_with_pagination(UserListQuery {
            page: Some(i64::MAX),
            size: Some(100),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(far.items.is_empty());
    assert_eq!(far.pagination.total, 6);
}

#[tokio::test]
async fn update_and_delete_user() {
    let storage = test_storage().await;
    let user = create_user(&storage, "grace@navy.mil", UserRole::Teacher).await;
    let other = create_user(&storage, "other@navy.mil", UserRole::Teacher).await;

    let updated = storage
        .update_user(
            user.id,
            UpdateUserRequest {
                full_name: Some("Grace Hopper".to_string()),
                institution: Some("Yale".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.full_name, "Grace Hopper");
    assert_eq!(updated.institution.as_deref(), Some("Yale"));
    assert_eq!(updated.email, "grace@navy.mil");

    let err = storage
        .update_user(
            other.id,
            UpdateUserRequest {
                email: Some("grace@navy.mil".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClassroomError::Conflict(_)));

    assert!(storage.update_user(9999, UpdateUserRequest::default()).await.unwrap().is_none());

    assert!(storage.update_last_login(user.id).await.unwrap());
    let logged_in = storage.get_user_by_id(user.id).await.unwrap().unwrap();
    assert!(logged_in.last_login_at.is_some());

    assert!(storage.delete_user(user.id).await.unwrap());
    assert!(storage.get_user_by_id(user.id).await.unwrap().is_none());
    assert!(!storage.delete_user(user.id).await.unwrap());
}

#[tokio::test]
async fn deleting_a_user_follows_foreign_key_rules() {
    let storage = test_storage().await;
    let ada = create_user(&storage, "ada@school.edu", UserRole::Teacher).await;
    let guest = create_user(&storage, "guest@school.edu", UserRole::Teacher).await;
    let grader = create_user(&storage, "grader@school.edu", UserRole::Admin).await;
    let student = create_user(&storage, "student@school.edu", UserRole::Student).await;

    let ada_class = create_class(&storage, ada.id, "Logic").await;
    let guest_class = create_class(&storage, guest.id, "Rhetoric").await;
    storage.enroll_student(ada_class.id, student.id).await.unwrap();

    let material = storage
        .create_material(CreateMaterialRequest {
            title: "Syllogisms".to_string(),
            description: None,
            file_name: "syllogisms.pdf".to_string(),
            file_path: "/uploads/syllogisms.pdf".to_string(),
            file_type: Some("pdf".to_string()),
            file_size: Some(1024),
            class_id: ada_class.id,
            uploaded_by: ada.id,
        })
        .await
        .unwrap();
    let quiz = create_assessment(&storage, ada_class.id, ada.id, "Quiz 1").await;
    // 客座老师在 ada 的课程里出的测验
    let guest_quiz = create_assessment(&storage, ada_class.id, guest.id, "Guest quiz").await;
    let own_quiz = create_assessment(&storage, guest_class.id, guest.id, "Debate").await;

    let mut submissions = Vec::new();
    for assessment_id in [quiz.id, own_quiz.id] {
        let submission = storage
            .create_submission(CreateSubmissionRequest {
                assessment_id,
                student_id: student.id,
                answers: json!({ "1": "b" }),
                submitted_at: None,
            })
            .await
            .unwrap();
        storage
            .grade_submission(
                submission.id,
                grader.id,
                GradeSubmissionRequest {
                    score: 18,
                    total_points: None,
                    feedback: None,
                },
            )
            .await
            .unwrap();
        submissions.push(submission.id);
    }

    // 仍是别人课程中测验的创建者：外键阻止删除，且不留下部分删除
    let err = storage.delete_user(guest.id).await.unwrap_err();
    assert!(matches!(err, ClassroomError::Constraint(_)), "got {err:?}");
    assert!(storage.get_user_by_id(guest.id).await.unwrap().is_some());
    assert!(storage.get_class_by_id(guest_class.id).await.unwrap().is_some());

    // 删除评分人：graded_by 置空，提交保留
    assert!(storage.delete_user(grader.id).await.unwrap());
    for id in &submissions {
        let submission = storage.get_submission_by_id(*id).await.unwrap().unwrap();
        assert_eq!(submission.graded_by, None);
        assert_eq!(submission.score, Some(18));
    }

    // 删除授课老师：课程、资料、测验、提交和选课记录一并删除
    assert!(storage.delete_user(ada.id).await.unwrap());
    assert!(storage.get_class_by_id(ada_class.id).await.unwrap().is_none());
    assert!(storage.get_material_by_id(material.id).await.unwrap().is_none());
    assert!(storage.get_assessment_by_id(quiz.id).await.unwrap().is_none());
    assert!(storage.get_assessment_by_id(guest_quiz.id).await.unwrap().is_none());
    assert!(storage.get_submission_by_id(submissions[0]).await.unwrap().is_none());
    assert!(
        storage
            .list_classes_by_enrolled_student(student.id)
            .await
            .unwrap()
            .is_empty()
    );

    // 学生和客座老师自己课程里的数据不受影响
    assert!(storage.get_user_by_id(student.id).await.unwrap().is_some());
    assert!(storage.get_submission_by_id(submissions[1]).await.unwrap().is_some());

    // 不再引用别人的课程后可以删除
    assert!(storage.delete_user(guest.id).await.unwrap());
    assert!(storage.get_class_by_id(guest_class.id).await.unwrap().is_none());
    assert!(storage.get_submission_by_id(submissions[1]).await.unwrap().is_none());
}
