use std::env;

use sqlx::postgres::PgSslMode;

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    // Deployment
    pub app_env: String,
    pub db_strict_tls: bool,
    pub db_max_connections: u32,

    // Seeding
    pub seed_total_trades: usize,
    pub seed_total_corporate_actions: usize,
    pub setup_skip_historical: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()?,

            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            db_strict_tls: env::var("DB_STRICT_TLS")
                .unwrap_or_else(|_| "false".into())
                .parse()
                .unwrap_or(false),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),

            seed_total_trades: env::var("SEED_TOTAL_TRADES")
                .unwrap_or_else(|_| "1000".into())
                .parse()
                .unwrap_or(1_000),
            seed_total_corporate_actions: env::var("SEED_TOTAL_CORPORATE_ACTIONS")
                .unwrap_or_else(|_| "200".into())
                .parse()
                .unwrap_or(200),
            setup_skip_historical: env::var("SETUP_SKIP_HISTORICAL")
                .unwrap_or_else(|_| "false".into())
                .parse()
                .unwrap_or(false),
        })
    }

    pub fn is_development(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("development")
    }

    /// TLS policy for the database connection. Development tolerates
    /// plaintext; everything else requires TLS, with certificate
    /// verification when `DB_STRICT_TLS` is set.
    pub fn ssl_mode(&self) -> PgSslMode {
        if self.is_development() {
            PgSslMode::Prefer
        } else if self.db_strict_tls {
            PgSslMode::VerifyFull
        } else {
            PgSslMode::Require
        }
    }
}

/// Front-door settings. The proxy never touches the database, so unlike
/// `AppConfig` this does not require `DATABASE_URL`.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub host: String,
    pub proxy_port: u16,
    pub backend_url: String,
    pub static_dir: String,
}

impl ProxyConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            proxy_port: env::var("PROXY_PORT")
                .unwrap_or_else(|_| "5000".into())
                .parse()?,
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.into()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".into()),
        })
    }
}
