pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod services;
pub mod state;

pub use api::{
    auth::{
        auth::{login, register},
        login_request::LoginRequest,
        login_response::LoginResponse,
        register_request::RegisterRequest,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::auth_user::AuthUser,
    users::{
        change_kyc_request::ChangeKycRequest,
        change_password_request::ChangePasswordRequest,
        list_users_query::ListUsersQuery,
        user_dto::UserDto,
        user_list_response::UserListResponse,
        user_response::UserResponse,
        users::{advance_kyc, change_password, get_me, initiate_kyc, list_users},
    },
};

pub use crate::routes::build_router;
pub use crate::services::{AuthService, ServiceError, UserService};
pub use crate::state::AppState;

use fw_auth::{JwtValidator, PasswordHasher, TokenIssuer};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Pick up a local .env before reading FW_* overrides
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = fw_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = fw_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting fw-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(database_path)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(Duration::from_secs(5)),
        )
        .await?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../crates/fw-db/migrations")
        .run(&pool)
        .await?;
    info!("Migrations complete");

    // validate() guarantees the secret is present and long enough
    let secret = config
        .auth
        .jwt_secret
        .as_deref()
        .expect("validate() ensures auth.jwt_secret is set");

    let token_issuer = Arc::new(TokenIssuer::with_hs256(secret.as_bytes()));
    let jwt_validator = Arc::new(JwtValidator::with_hs256(secret.as_bytes()));
    let password_hasher = PasswordHasher::new(config.auth.bcrypt_cost);
    info!("Token signing and password hashing initialized");

    // Build application state
    let app_state = AppState {
        pool,
        token_issuer,
        jwt_validator,
        password_hasher,
        access_token_ttl: Duration::from_secs(config.auth.access_token_ttl_secs),
    };

    // Build router
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Start server with graceful shutdown on SIGINT
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
                Err(e) => log::error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    info!("Server exited");

    Ok(())
}
