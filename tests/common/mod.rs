use lantern_auth::config::{EnvConfig, MailConfig, SessionConfig, CONFIG};
use lantern_auth::db::postgres_service::PostgresService;
use sea_orm::ConnectOptions;
use std::sync::Arc;

pub mod client;

pub struct TestContext {
    pub db: Arc<PostgresService>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        // Initialize config for tests
        let _ = CONFIG.set(get_test_config());

        // Single-connection in-memory sqlite: each TestContext gets its own
        // isolated database, migrations included.
        let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
        options.max_connections(1).min_connections(1);

        let db = Arc::new(
            PostgresService::connect(options)
                .await
                .expect("Failed to initialize PostgresService"),
        );

        TestContext { db }
    }
}

pub fn get_test_config() -> EnvConfig {
    EnvConfig {
        port: 8080,
        db_url: "test".to_string(), // Not used in tests
        admin_key: "test-admin-key".to_string(),
        mail: MailConfig {
            api_key: "test".to_string(),
            // unroutable on purpose; mail is fire-and-forget so tests survive it
            endpoint: "http://127.0.0.1:1/emails".to_string(),
            from: "noreply@test.dev".to_string(),
        },
        session: SessionConfig {
            destroy_on_sign_out: true,
            keep_signed_ttl_days: 30,
            reset_ttl_mins: 60,
        },
    }
}

// Test data helpers
pub mod test_data {
    use lantern_auth::types::user::RUserCreate;
    use uuid::Uuid;

    pub const PASSWORD: &str = "correct-horse-battery-staple";

    pub fn sample_user() -> RUserCreate {
        let tag = Uuid::new_v4();
        RUserCreate {
            name: format!("user-{}", tag),
            email: format!("user-{}@test.com", tag),
            phone: None,
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            birthday: None,
            password: PASSWORD.to_string(),
        }
    }

    pub fn sample_user_with_phone(phone: &str) -> RUserCreate {
        let mut user = sample_user();
        user.phone = Some(phone.to_string());
        user
    }
}
