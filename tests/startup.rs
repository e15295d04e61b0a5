mod common;

use classroom_store::config::SeedConfig;
use classroom_store::models::users::entities::UserRole;
use classroom_store::runtime::lifetime::startup::{collect_table_counts, seed_admin};
use classroom_store::security::authenticate;
use classroom_store::storage::Storage;
use common::{create_class, create_user, test_storage};

#[tokio::test]
async fn seeds_admin_only_into_empty_database() {
    let storage = test_storage().await;
    let seed = SeedConfig::default();

    let admin = seed_admin(&storage, &seed, Some("Adm1nPassword".to_string()))
        .await
        .unwrap()
        .expect("admin created");
    assert_eq!(admin.role, UserRole::Admin);
    assert_eq!(admin.email, seed.admin_email);
    assert!(admin.is_active);
    assert!(admin.is_approved);

    let principal = authenticate(storage.as_ref(), &seed.admin_email, "Adm1nPassword")
        .await
        .unwrap();
    assert_eq!(principal.id, admin.id);

    let again = seed_admin(&storage, &seed, None).await.unwrap();
    assert!(again.is_none());
    assert_eq!(storage.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn counts_every_table() {
    let storage = test_storage().await;
    let teacher = create_user(&storage, "teacher@school.edu", UserRole::Teacher).await;
    create_class(&storage, teacher.id, "Algebra").await;

    let counts = collect_table_counts(&storage).await.unwrap();
    assert_eq!(counts.users, 1);
    assert_eq!(counts.classes, 1);
    assert_eq!(counts.materials, 0);
    assert_eq!(counts.notifications, 0);
}
