use std::env;
use std::sync::OnceLock;

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: i32,
    pub db_url: String,
    pub admin_key: String,
    pub mail: MailConfig,
    pub session: SessionConfig,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub api_key: String,
    pub endpoint: String,
    pub from: String,
}

#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// When true, signing out also revokes the presented keep-signed token.
    pub destroy_on_sign_out: bool,
    pub keep_signed_ttl_days: i64,
    pub reset_ttl_mins: i64,
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let db_url: String = Self::get_env("DATABASE_URL");

        EnvConfig {
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8080),
            db_url,
            admin_key: Self::get_env("ADMIN_KEY"),
            mail: MailConfig {
                api_key: Self::get_env("MAIL_API_KEY"),
                endpoint: env::var("MAIL_ENDPOINT")
                    .unwrap_or_else(|_| "https://api.resend.com/emails".to_string()),
                from: env::var("MAIL_FROM")
                    .unwrap_or_else(|_| "noreply@lantern.dev".to_string()),
            },
            session: SessionConfig {
                destroy_on_sign_out: env::var("DESTROY_ON_SIGN_OUT")
                    .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                    .unwrap_or(true),
                keep_signed_ttl_days: env::var("KEEP_SIGNED_TTL_DAYS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
                reset_ttl_mins: env::var("RESET_TTL_MINS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
            },
        }
    }
}

pub static CONFIG: OnceLock<EnvConfig> = OnceLock::new();

pub fn config() -> &'static EnvConfig {
    CONFIG.get().expect("Not initialized")
}
