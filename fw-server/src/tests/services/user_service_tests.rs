use crate::services::{ServiceError, UserService};
use crate::tests::services::{create_test_pool, test_hasher};

use fw_auth::AuthError;
use fw_core::{CoreError, KycStatus};
use fw_db::DbError;

async fn setup_service() -> UserService {
    UserService::new(create_test_pool().await, test_hasher())
}

#[tokio::test]
async fn given_valid_input_when_registering_then_user_starts_unverified() {
    let service = setup_service().await;

    let user = service
        .register("Alice", "a@x.com", "pw12345678")
        .await
        .unwrap();

    assert_eq!(user.full_name, "Alice");
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.kyc_status, KycStatus::Unverified);
    assert_ne!(user.password_hash, "pw12345678");
    assert!(!user.password_hash.is_empty());
}

#[tokio::test]
async fn given_unnormalized_email_when_registering_then_stored_lowercase() {
    let service = setup_service().await;

    let user = service
        .register("  Alice  ", "  Alice@Example.COM ", "pw12345678")
        .await
        .unwrap();

    assert_eq!(user.full_name, "Alice");
    assert_eq!(user.email, "alice@example.com");
}

#[tokio::test]
async fn given_blank_full_name_when_registering_then_validation_error() {
    let service = setup_service().await;

    let result = service.register("   ", "a@x.com", "pw12345678").await;

    assert!(matches!(result, Err(ServiceError::Validation { .. })));
}

#[tokio::test]
async fn given_invalid_email_when_registering_then_validation_error() {
    let service = setup_service().await;

    let result = service.register("Alice", "not-an-email", "pw12345678").await;

    assert!(matches!(result, Err(ServiceError::Validation { .. })));
}

#[tokio::test]
async fn given_short_password_when_registering_then_validation_error() {
    let service = setup_service().await;

    let result = service.register("Alice", "a@x.com", "short").await;

    assert!(matches!(result, Err(ServiceError::Validation { .. })));
}

#[tokio::test]
async fn given_taken_email_when_registering_then_duplicate_error() {
    let service = setup_service().await;
    service
        .register("Alice", "a@x.com", "pw12345678")
        .await
        .unwrap();

    let result = service.register("Bob", "a@x.com", "pw87654321").await;

    assert!(matches!(
        result,
        Err(ServiceError::Db {
            source: DbError::DuplicateEmail { .. }
        })
    ));
}

#[tokio::test]
async fn given_taken_email_in_other_case_when_registering_then_duplicate_error() {
    // Case-insensitive uniqueness: normalization happens before storage
    let service = setup_service().await;
    service
        .register("Alice", "a@x.com", "pw12345678")
        .await
        .unwrap();

    let result = service.register("Bob", "A@X.COM", "pw87654321").await;

    assert!(matches!(
        result,
        Err(ServiceError::Db {
            source: DbError::DuplicateEmail { .. }
        })
    ));
}

#[tokio::test]
async fn given_correct_password_when_verifying_then_returns_user() {
    let service = setup_service().await;
    let registered = service
        .register("Alice", "a@x.com", "pw12345678")
        .await
        .unwrap();

    let user = service
        .verify_credentials("a@x.com", "pw12345678")
        .await
        .unwrap();

    assert_eq!(user.id, registered.id);
}

#[tokio::test]
async fn given_differently_cased_email_when_verifying_then_still_matches() {
    let service = setup_service().await;
    service
        .register("Alice", "a@x.com", "pw12345678")
        .await
        .unwrap();

    let result = service.verify_credentials("A@X.com", "pw12345678").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn given_wrong_password_when_verifying_then_invalid_credentials() {
    let service = setup_service().await;
    service
        .register("Alice", "a@x.com", "pw12345678")
        .await
        .unwrap();

    let result = service.verify_credentials("a@x.com", "wrong-password").await;

    assert!(matches!(
        result,
        Err(ServiceError::Auth {
            source: AuthError::InvalidCredentials { .. }
        })
    ));
}

#[tokio::test]
async fn given_unknown_email_when_verifying_then_same_invalid_credentials() {
    // Unknown user and wrong password must be indistinguishable
    let service = setup_service().await;

    let result = service
        .verify_credentials("nobody@x.com", "pw12345678")
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::Auth {
            source: AuthError::InvalidCredentials { .. }
        })
    ));
}

#[tokio::test]
async fn given_new_password_when_changed_then_only_new_password_verifies() {
    let service = setup_service().await;
    let user = service
        .register("Alice", "a@x.com", "pw12345678")
        .await
        .unwrap();

    service.change_password(user.id, "newpw12345").await.unwrap();

    assert!(service.verify_credentials("a@x.com", "newpw12345").await.is_ok());
    assert!(
        service
            .verify_credentials("a@x.com", "pw12345678")
            .await
            .is_err()
    );
}

#[tokio::test]
async fn given_short_new_password_when_changed_then_validation_error() {
    let service = setup_service().await;
    let user = service
        .register("Alice", "a@x.com", "pw12345678")
        .await
        .unwrap();

    let result = service.change_password(user.id, "short").await;

    assert!(matches!(result, Err(ServiceError::Validation { .. })));
}

#[tokio::test]
async fn given_review_flow_when_advancing_kyc_then_each_step_persists() {
    let service = setup_service().await;
    let user = service
        .register("Alice", "a@x.com", "pw12345678")
        .await
        .unwrap();

    let pending = service
        .change_kyc_status(user.id, KycStatus::Pending)
        .await
        .unwrap();
    assert_eq!(pending.kyc_status, KycStatus::Pending);

    let verified = service
        .change_kyc_status(user.id, KycStatus::Verified)
        .await
        .unwrap();
    assert_eq!(verified.kyc_status, KycStatus::Verified);

    let stored = service.get_by_id(user.id).await.unwrap();
    assert_eq!(stored.kyc_status, KycStatus::Verified);
}

#[tokio::test]
async fn given_unverified_user_when_skipping_review_then_invalid_transition() {
    let service = setup_service().await;
    let user = service
        .register("Alice", "a@x.com", "pw12345678")
        .await
        .unwrap();

    let result = service.change_kyc_status(user.id, KycStatus::Verified).await;

    assert!(matches!(
        result,
        Err(ServiceError::Core {
            source: CoreError::InvalidKycTransition { .. }
        })
    ));

    // Nothing persisted
    let stored = service.get_by_id(user.id).await.unwrap();
    assert_eq!(stored.kyc_status, KycStatus::Unverified);
}

#[tokio::test]
async fn given_verified_user_when_moving_back_to_pending_then_invalid_transition() {
    let service = setup_service().await;
    let user = service
        .register("Alice", "a@x.com", "pw12345678")
        .await
        .unwrap();
    service
        .change_kyc_status(user.id, KycStatus::Pending)
        .await
        .unwrap();
    service
        .change_kyc_status(user.id, KycStatus::Verified)
        .await
        .unwrap();

    let result = service.change_kyc_status(user.id, KycStatus::Pending).await;

    assert!(matches!(
        result,
        Err(ServiceError::Core {
            source: CoreError::InvalidKycTransition { .. }
        })
    ));
}

#[tokio::test]
async fn given_rejected_user_when_resubmitting_then_back_to_pending() {
    let service = setup_service().await;
    let user = service
        .register("Alice", "a@x.com", "pw12345678")
        .await
        .unwrap();
    service
        .change_kyc_status(user.id, KycStatus::Pending)
        .await
        .unwrap();
    service
        .change_kyc_status(user.id, KycStatus::Rejected)
        .await
        .unwrap();

    let resubmitted = service
        .change_kyc_status(user.id, KycStatus::Pending)
        .await
        .unwrap();

    assert_eq!(resubmitted.kyc_status, KycStatus::Pending);
}

#[tokio::test]
async fn given_zero_page_when_listing_then_validation_error() {
    let service = setup_service().await;

    assert!(matches!(
        service.list_users(None, 0, 10).await,
        Err(ServiceError::Validation { .. })
    ));
    assert!(matches!(
        service.list_users(None, 1, 0).await,
        Err(ServiceError::Validation { .. })
    ));
}

#[tokio::test]
async fn given_status_filter_when_listing_then_only_matches_returned() {
    let service = setup_service().await;

    for i in 0..3 {
        let user = service
            .register("User", &format!("u{}@x.com", i), "pw12345678")
            .await
            .unwrap();
        if i < 2 {
            service
                .change_kyc_status(user.id, KycStatus::Pending)
                .await
                .unwrap();
        }
    }

    let page = service
        .list_users(Some(KycStatus::Pending), 1, 10)
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert!(
        page.users
            .iter()
            .all(|u| u.kyc_status == KycStatus::Pending)
    );
}
