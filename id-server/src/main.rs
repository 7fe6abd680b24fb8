use id_server::{AppState, Metrics, build_router, logger};

use id_auth::{
    Argon2Hasher, Hasher, LoginRateLimiter, OAuthManager, RateLimitConfig, TokenConfig,
    TokenService,
    oauth::{FacebookOAuthProvider, GoogleOAuthProvider},
};
use id_core::{Provider, Role, UserProfile};
use id_db::{AccountRepository, ProfileRepository};

use std::error::Error;
use std::sync::Arc;

use log::{error, info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;
use tower_cookies::Key;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = id_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = id_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting id-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(database_path)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(std::time::Duration::from_secs(5)),
        )
        .await?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../crates/id-db/migrations").run(&pool).await?;
    info!("Migrations complete");

    // Token service; validate() guarantees the secret is present
    let secret = config
        .auth
        .session_secret
        .clone()
        .expect("validate() ensures auth.session_secret is set");
    let tokens = Arc::new(TokenService::new(TokenConfig {
        secret: secret.clone(),
        identity_ttl_secs: config.auth.identity_ttl_secs,
        session_ttl_secs: config.auth.session_ttl_secs,
        reset_ttl_secs: config.auth.reset_ttl_secs,
    }));

    let hasher: Arc<dyn Hasher> = Arc::new(Argon2Hasher::new());

    // Seed the bootstrap super_admin when configured and absent
    ensure_bootstrap_admin(&pool, &config, hasher.as_ref()).await;

    // Configure federated providers
    let mut oauth = OAuthManager::new();
    if config.oauth.google.enabled {
        let google = GoogleOAuthProvider::new(
            config.oauth.google.client_id.clone().unwrap_or_default(),
            config.oauth.google.client_secret.clone().unwrap_or_default(),
            config.oauth.google.redirect_uri.clone().unwrap_or_default(),
        )?;
        oauth.add_provider(Provider::Google, Arc::new(google));
        info!("OAuth: Google sign-in enabled");
    }
    if config.oauth.facebook.enabled {
        let facebook = FacebookOAuthProvider::new(
            config.oauth.facebook.client_id.clone().unwrap_or_default(),
            config
                .oauth
                .facebook
                .client_secret
                .clone()
                .unwrap_or_default(),
            config.oauth.facebook.redirect_uri.clone().unwrap_or_default(),
        )?;
        oauth.add_provider(Provider::Facebook, Arc::new(facebook));
        info!("OAuth: Facebook sign-in enabled");
    }

    let login_limiter = Arc::new(LoginRateLimiter::new(RateLimitConfig {
        max_requests: config.rate_limit.max_requests,
        window_secs: config.rate_limit.window_secs,
    }));

    // Build application state
    let app_state = AppState {
        pool,
        tokens,
        hasher,
        oauth,
        login_limiter,
        metrics: Metrics::new(),
        cookie_key: Key::derive_from(secret.as_bytes()),
        auth: config.auth.clone(),
        post_login_redirect: config.oauth.post_login_redirect.clone(),
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
                Ok(()) => info!("Received SIGINT (Ctrl+C), shutting down"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    info!("Graceful shutdown complete");

    Ok(())
}

/// Ensure the bootstrap super_admin exists: identity account plus profile
/// record with role super_admin. Does nothing when unconfigured or when
/// the email is already registered.
async fn ensure_bootstrap_admin(
    pool: &sqlx::SqlitePool,
    config: &id_config::Config,
    hasher: &dyn Hasher,
) {
    if !config.bootstrap.is_configured() {
        return;
    }

    let email = config
        .bootstrap
        .super_admin_email
        .as_deref()
        .unwrap_or_default();
    let password = config
        .bootstrap
        .super_admin_password
        .as_deref()
        .unwrap_or_default();
    let display_name = config.bootstrap.super_admin_display_name.clone();

    let accounts = AccountRepository::new(pool.clone());
    match accounts.find_by_email(email).await {
        Ok(Some(_)) => return,
        Ok(None) => {}
        Err(e) => {
            warn!("Bootstrap admin lookup failed: {}", e);
            return;
        }
    }

    let password_hash = match hasher.hash(password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash bootstrap admin password: {}", e);
            return;
        }
    };

    let mut account =
        id_core::AuthAccount::new(email.to_string(), password_hash, display_name);
    account.email_verified = true;

    if let Err(e) = accounts.create(&account).await {
        warn!("Failed to create bootstrap admin (may already exist): {}", e);
        return;
    }

    let mut profile = UserProfile::for_account(&account);
    profile.role = Role::SuperAdmin;

    match ProfileRepository::new(pool.clone()).upsert(&profile).await {
        Ok(()) => info!("Created bootstrap super_admin: {} ({})", email, account.uid),
        Err(e) => warn!("Failed to create bootstrap admin profile: {}", e),
    }
}
