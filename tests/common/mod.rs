use std::sync::Arc;

use argon2::Params;
use hospital_backend::config::{AppConfig, AuthConfig, DbConfig};
use hospital_backend::db::service::DbService;
use hospital_backend::services::AuthServices;
use hospital_backend::utils::password::Argon2Hasher;
use hospital_backend::utils::token::RandomTokenGenerator;
use tempfile::TempDir;

pub mod client;

pub const SQLITE_MEMORY: &str = "sqlite::memory:";

pub struct TestContext {
    pub db: Arc<DbService>,
    pub config: AppConfig,
    pub auth: AuthServices,
    pub _media: TempDir,
}

impl TestContext {
    pub async fn new() -> TestContext {
        Self::with_auth_config(AuthConfig::default()).await
    }

    pub async fn with_auth_config(auth_config: AuthConfig) -> TestContext {
        let media = tempfile::tempdir().expect("Failed to create media dir");
        let db = Arc::new(
            DbService::connect(SQLITE_MEMORY)
                .await
                .expect("Failed to initialize DbService")
        );

        let config = AppConfig {
            port: 8080,
            db: DbConfig { url: SQLITE_MEMORY.to_string(), max_connections: Some(1) },
            auth: auth_config,
            media_root: media.path().to_path_buf(),
        };

        TestContext {
            db,
            config,
            auth: fast_auth_services(),
            _media: media,
        }
    }
}

/// Argon2id with minimal cost so hashing does not dominate test time.
pub fn fast_hasher() -> Argon2Hasher {
    Argon2Hasher::new(Params::new(1024, 1, 1, None).expect("valid argon2 params"))
}

pub fn fast_auth_services() -> AuthServices {
    AuthServices {
        hasher: Arc::new(fast_hasher()),
        tokens: Arc::new(RandomTokenGenerator),
    }
}

// Test data helpers
pub mod test_data {
    use hospital_backend::types::user::RUserCreate;

    pub fn sample_user() -> RUserCreate {
        RUserCreate {
            email: "test@example.com".to_string(),
            password: "pasword221".to_string(),
            name: "Test user".to_string(),
        }
    }

    pub fn sample_user_with_email(email: &str) -> RUserCreate {
        RUserCreate {
            email: email.to_string(),
            ..sample_user()
        }
    }
}
