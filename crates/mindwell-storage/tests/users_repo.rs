use mindwell_storage::pool::Database;
use mindwell_storage::users::UserRepository;

async fn test_db(dir: &tempfile::TempDir) -> Database {
    let path = dir.path().join("test.db");
    Database::connect(path.to_str().unwrap())
        .await
        .expect("failed to open test database")
}

#[tokio::test]
async fn registered_user_round_trips_by_id_and_email() {
    let dir = tempfile::tempdir().unwrap();
    let repo = UserRepository::new(test_db(&dir).await);

    let user = repo
        .create_registered("user@example.com", "$2b$12$fakehash", Some("13800000000"))
        .await
        .unwrap();

    assert!(!user.is_anonymous);
    assert!(user.anonymous_id.starts_with("anon_"));

    let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(by_id.email.as_deref(), Some("user@example.com"));
    assert_eq!(by_id.password_hash.as_deref(), Some("$2b$12$fakehash"));
    assert_eq!(by_id.phone.as_deref(), Some("13800000000"));

    let by_email = repo.find_by_email("user@example.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let repo = UserRepository::new(test_db(&dir).await);

    repo.create_registered("taken@example.com", "hash", None)
        .await
        .unwrap();

    assert!(repo
        .create_registered("taken@example.com", "hash2", None)
        .await
        .is_err());
}

#[tokio::test]
async fn anonymous_user_has_no_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let repo = UserRepository::new(test_db(&dir).await);

    let user = repo.create_anonymous().await.unwrap();
    assert!(user.is_anonymous);
    assert_eq!(user.email, None);
    assert_eq!(user.password_hash, None);

    let found = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(found.is_anonymous);
}

#[tokio::test]
async fn profile_update_is_partial() {
    let dir = tempfile::tempdir().unwrap();
    let repo = UserRepository::new(test_db(&dir).await);

    let user = repo
        .create_registered("old@example.com", "hash", None)
        .await
        .unwrap();

    let updated = repo
        .update_profile(user.id, None, Some("13900000000"))
        .await
        .unwrap()
        .unwrap();

    // Email untouched, phone set.
    assert_eq!(updated.email.as_deref(), Some("old@example.com"));
    assert_eq!(updated.phone.as_deref(), Some("13900000000"));
}

#[tokio::test]
async fn soft_deleted_user_disappears_from_lookups() {
    let dir = tempfile::tempdir().unwrap();
    let repo = UserRepository::new(test_db(&dir).await);

    let user = repo
        .create_registered("gone@example.com", "hash", None)
        .await
        .unwrap();

    assert!(repo.soft_delete(user.id).await.unwrap());

    assert!(repo.find_by_id(user.id).await.unwrap().is_none());
    assert!(repo.find_by_email("gone@example.com").await.unwrap().is_none());

    // Already deleted: no row to mark.
    assert!(!repo.soft_delete(user.id).await.unwrap());
}
