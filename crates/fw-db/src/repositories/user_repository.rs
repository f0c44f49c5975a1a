//! User repository - CRUD operations on identity records.
//!
//! Email uniqueness is enforced by the unique index on `users.email`;
//! inserts that hit it surface as `DbError::DuplicateEmail`. KYC status
//! writes are raw field updates - transition validation is the domain
//! layer's job and callers must only pass an already-validated status.

use crate::{DbError, Result as DbErrorResult};

use fw_core::{KycStatus, User};

use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const SELECT_COLUMNS: &str =
    "id, full_name, email, password_hash, kyc_status, created_at, updated_at";

/// One page of users plus the total count for the applied filter.
pub struct UserPage {
    pub users: Vec<User>,
    pub total: i64,
}

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new identity record. The caller assigns id and timestamps
    /// (see `User::new`); a second record with the same email fails with
    /// `DuplicateEmail`.
    pub async fn create(&self, user: &User) -> DbErrorResult<()> {
        let result = sqlx::query(
            r#"
                INSERT INTO users (
                    id, full_name, email, password_hash, kyc_status,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.kyc_status.as_str())
        .bind(user.created_at.timestamp())
        .bind(user.updated_at.timestamp())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(DbError::DuplicateEmail {
                    email: user.email.clone(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Err(e) => Err(DbError::from(e)),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<User> {
        let id_str = id.to_string();

        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(&id_str)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DbError::UserNotFound {
                key: id_str,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Look up by normalized email (the login key).
    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<User> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DbError::UserNotFound {
                key: email.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Atomically replace the credential hash and refresh `updated_at`.
    pub async fn update_password_hash(&self, id: Uuid, new_hash: &str) -> DbErrorResult<()> {
        let id_str = id.to_string();
        let updated_at = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(new_hash)
        .bind(updated_at)
        .bind(&id_str)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::UserNotFound {
                key: id_str,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Atomically replace the KYC status and refresh `updated_at`.
    /// The status must already have passed transition validation.
    pub async fn update_kyc_status(&self, id: Uuid, status: KycStatus) -> DbErrorResult<()> {
        let id_str = id.to_string();
        let updated_at = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
                UPDATE users
                SET kyc_status = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(status.as_str())
        .bind(updated_at)
        .bind(&id_str)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::UserNotFound {
                key: id_str,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Fetch one page of users, optionally filtered by KYC status.
    /// `page` is 1-based; each call re-runs the query, so pages reflect
    /// the state at call time.
    pub async fn list(
        &self,
        status: Option<KycStatus>,
        page: u32,
        page_size: u32,
    ) -> DbErrorResult<UserPage> {
        let limit = page_size as i64;
        let offset = (page as i64 - 1).max(0) * page_size as i64;

        let rows = match status {
            Some(status) => {
                sqlx::query(&format!(
                    r#"
                        SELECT {SELECT_COLUMNS} FROM users
                        WHERE kyc_status = ?
                        ORDER BY created_at, id
                        LIMIT ? OFFSET ?
                    "#
                ))
                .bind(status.as_str())
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    r#"
                        SELECT {SELECT_COLUMNS} FROM users
                        ORDER BY created_at, id
                        LIMIT ? OFFSET ?
                    "#
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let users = rows
            .iter()
            .map(row_to_user)
            .collect::<DbErrorResult<Vec<_>>>()?;

        let total: i64 = match status {
            Some(status) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE kyc_status = ?")
                    .bind(status.as_str())
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM users")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(UserPage { users, total })
    }
}

fn row_to_user(row: &SqliteRow) -> DbErrorResult<User> {
    let id: String = row.try_get("id")?;
    let kyc_status: String = row.try_get("kyc_status")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(User {
        id: Uuid::parse_str(&id).map_err(|e| DbError::Initialization {
            message: format!("Invalid UUID in users.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        kyc_status: KycStatus::from_str(&kyc_status).map_err(|e| DbError::Initialization {
            message: format!("Invalid KycStatus in users.kyc_status: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| {
            DbError::Initialization {
                message: "Invalid timestamp in users.created_at".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
        updated_at: DateTime::from_timestamp(updated_at, 0).ok_or_else(|| {
            DbError::Initialization {
                message: "Invalid timestamp in users.updated_at".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
    })
}
