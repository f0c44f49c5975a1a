mod user_service_tests;

use fw_auth::PasswordHasher;

use sqlx::SqlitePool;

// Minimum bcrypt cost keeps the suite fast
pub const TEST_COST: u32 = 4;

pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect(":memory:")
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("../crates/fw-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn test_hasher() -> PasswordHasher {
    PasswordHasher::new(TEST_COST)
}
