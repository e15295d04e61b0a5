mod common;

use classroom_store::errors::ClassroomError;
use classroom_store::models::users::{entities::UserRole, requests::CreateUserRequest};
use classroom_store::security::{UserDetails, authenticate, issue_tokens, load_principal_by_email};
use classroom_store::storage::Storage;
use classroom_store::utils::jwt::JwtUtils;
use classroom_store::utils::password::hash_password;
use common::test_storage;

const PASSWORD: &str = "Sup3rSecret!";

async fn register(
    storage: &std::sync::Arc<dyn Storage>,
    email: &str,
    is_active: bool,
    is_approved: bool,
) -> i64 {
    let mut req = CreateUserRequest::new(
        "Login User",
        email,
        hash_password(PASSWORD).unwrap(),
        UserRole::Teacher,
    );
    req.is_active = Some(is_active);
    req.is_approved = Some(is_approved);
    storage.create_user(req).await.unwrap().id
}

#[tokio::test]
async fn authenticate_records_last_login() {
    let storage = test_storage().await;
    let id = register(&storage, "ok@school.edu", true, true).await;

    let principal = authenticate(storage.as_ref(), "ok@school.edu", PASSWORD)
        .await
        .unwrap();
    assert_eq!(principal.id, id);
    assert_eq!(principal.username(), "ok@school.edu");
    assert_eq!(principal.authorities(), vec!["ROLE_TEACHER".to_string()]);
    assert!(principal.is_enabled());

    let user = storage.get_user_by_id(id).await.unwrap().unwrap();
    assert!(user.last_login_at.is_some());
}

#[tokio::test]
async fn authenticate_rejects_bad_credentials_and_accounts() {
    let storage = test_storage().await;
    register(&storage, "ok@school.edu", true, true).await;
    let pending = register(&storage, "pending@school.edu", true, false).await;
    register(&storage, "inactive@school.edu", false, true).await;

    for (email, password) in [
        ("ok@school.edu", "wrong-password"),
        ("nobody@school.edu", PASSWORD),
        ("pending@school.edu", PASSWORD),
        ("inactive@school.edu", PASSWORD),
    ] {
        let err = authenticate(storage.as_ref(), email, password)
            .await
            .unwrap_err();
        assert!(
            matches!(err, ClassroomError::Authentication(_)),
            "{email}: got {err:?}"
        );
    }

    // 未知邮箱与密码错误无法区分
    let unknown = authenticate(storage.as_ref(), "nobody@school.edu", PASSWORD)
        .await
        .unwrap_err();
    let wrong = authenticate(storage.as_ref(), "ok@school.edu", "wrong-password")
        .await
        .unwrap_err();
    assert_eq!(unknown.message(), wrong.message());
    assert_eq!(unknown.message(), "邮箱或密码错误");

    // 失败的登录不记录时间
    let user = storage.get_user_by_id(pending).await.unwrap().unwrap();
    assert!(user.last_login_at.is_none());
}

#[tokio::test]
async fn load_principal_and_issue_tokens() {
    let storage = test_storage().await;
    let id = register(&storage, "tokens@school.edu", true, true).await;

    let principal = load_principal_by_email(storage.as_ref(), "tokens@school.edu")
        .await
        .unwrap();
    assert!(principal.is_account_non_locked());

    let tokens = issue_tokens(&principal).unwrap();
    let claims = JwtUtils::verify_access_token(&tokens.access_token).unwrap();
    assert_eq!(claims.user_id(), Some(id));
    assert_eq!(claims.email, "tokens@school.edu");
    assert_eq!(claims.role, "TEACHER");
    assert!(JwtUtils::verify_access_token(&tokens.refresh_token).is_err());
    assert!(JwtUtils::verify_refresh_token(&tokens.refresh_token).is_ok());

    let err = load_principal_by_email(storage.as_ref(), "missing@school.edu")
        .await
        .unwrap_err();
    assert!(matches!(err, ClassroomError::NotFound(_)));
}
