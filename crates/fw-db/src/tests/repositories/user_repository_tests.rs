use crate::{DbError, UserRepository};

use fw_core::{KycStatus, User};

use sqlx::{SqlitePool, migrate};
use uuid::Uuid;

async fn setup_db() -> SqlitePool {
    let pool = SqlitePool::connect(":memory:")
        .await
        .expect("Failed to create test database");

    migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn test_user(email: &str) -> User {
    User::new(
        "Test User".to_string(),
        email.to_string(),
        "$2b$12$abcdefghijklmnopqrstuvwxyz012345678901234567890123456".to_string(),
    )
}

#[tokio::test]
async fn given_new_user_when_created_then_found_by_id_and_email() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);
    let user = test_user("a@x.com");

    repo.create(&user).await.unwrap();

    let by_id = repo.find_by_id(user.id).await.unwrap();
    assert_eq!(by_id.id, user.id);
    assert_eq!(by_id.full_name, "Test User");
    assert_eq!(by_id.email, "a@x.com");
    assert_eq!(by_id.password_hash, user.password_hash);
    assert_eq!(by_id.kyc_status, KycStatus::Unverified);
    assert_eq!(by_id.created_at.timestamp(), user.created_at.timestamp());

    let by_email = repo.find_by_email("a@x.com").await.unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn given_duplicate_email_when_created_then_returns_duplicate_error() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);

    repo.create(&test_user("dup@x.com")).await.unwrap();
    let result = repo.create(&test_user("dup@x.com")).await;

    assert!(matches!(result, Err(DbError::DuplicateEmail { .. })));
}

#[tokio::test]
async fn given_unknown_id_when_finding_then_returns_not_found() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);

    let result = repo.find_by_id(Uuid::new_v4()).await;

    assert!(matches!(result, Err(DbError::UserNotFound { .. })));
}

#[tokio::test]
async fn given_unknown_email_when_finding_then_returns_not_found() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);

    let result = repo.find_by_email("nobody@x.com").await;

    assert!(matches!(result, Err(DbError::UserNotFound { .. })));
}

#[tokio::test]
async fn given_existing_user_when_updating_password_hash_then_hash_replaced() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);
    let user = test_user("p@x.com");
    repo.create(&user).await.unwrap();

    repo.update_password_hash(user.id, "$2b$12$newhash")
        .await
        .unwrap();

    let updated = repo.find_by_id(user.id).await.unwrap();
    assert_eq!(updated.password_hash, "$2b$12$newhash");
    assert!(updated.updated_at >= updated.created_at);
}

#[tokio::test]
async fn given_unknown_id_when_updating_password_hash_then_returns_not_found() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);

    let result = repo.update_password_hash(Uuid::new_v4(), "$2b$12$hash").await;

    assert!(matches!(result, Err(DbError::UserNotFound { .. })));
}

#[tokio::test]
async fn given_existing_user_when_updating_kyc_status_then_status_replaced() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);
    let user = test_user("k@x.com");
    repo.create(&user).await.unwrap();

    repo.update_kyc_status(user.id, KycStatus::Pending)
        .await
        .unwrap();

    let updated = repo.find_by_id(user.id).await.unwrap();
    assert_eq!(updated.kyc_status, KycStatus::Pending);
    assert!(updated.updated_at >= updated.created_at);
}

#[tokio::test]
async fn given_unknown_id_when_updating_kyc_status_then_returns_not_found() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);

    let result = repo
        .update_kyc_status(Uuid::new_v4(), KycStatus::Pending)
        .await;

    assert!(matches!(result, Err(DbError::UserNotFound { .. })));
}

#[tokio::test]
async fn given_mixed_statuses_when_listing_filtered_then_returns_matches_and_total() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);

    for i in 0..3 {
        let user = test_user(&format!("pending{}@x.com", i));
        repo.create(&user).await.unwrap();
        repo.update_kyc_status(user.id, KycStatus::Pending)
            .await
            .unwrap();
    }
    repo.create(&test_user("unverified@x.com")).await.unwrap();

    let page = repo.list(Some(KycStatus::Pending), 1, 10).await.unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.users.len(), 3);
    assert!(
        page.users
            .iter()
            .all(|u| u.kyc_status == KycStatus::Pending)
    );
}

#[tokio::test]
async fn given_many_users_when_paginating_then_pages_do_not_overlap() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);

    for i in 0..5 {
        repo.create(&test_user(&format!("user{}@x.com", i)))
            .await
            .unwrap();
    }

    let first = repo.list(None, 1, 2).await.unwrap();
    let second = repo.list(None, 2, 2).await.unwrap();
    let third = repo.list(None, 3, 2).await.unwrap();

    assert_eq!(first.total, 5);
    assert_eq!(first.users.len(), 2);
    assert_eq!(second.users.len(), 2);
    assert_eq!(third.users.len(), 1);

    let mut seen: Vec<Uuid> = Vec::new();
    for user in first
        .users
        .iter()
        .chain(second.users.iter())
        .chain(third.users.iter())
    {
        assert!(!seen.contains(&user.id), "page overlap at {}", user.email);
        seen.push(user.id);
    }
}

#[tokio::test]
async fn given_same_page_when_listed_twice_then_results_are_identical() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);

    for i in 0..4 {
        repo.create(&test_user(&format!("r{}@x.com", i)))
            .await
            .unwrap();
    }

    let a = repo.list(None, 1, 10).await.unwrap();
    let b = repo.list(None, 1, 10).await.unwrap();

    assert_eq!(a.users, b.users);
    assert_eq!(a.total, b.total);
}
