/*
 * Responsibility
 * - 環境変数 / .env からの設定読み込み (PORT, secrets, cookie policy, limits)
 * - 設定値のバリデーション (production で secret 未設定なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

const DEV_JWT_SECRET: &str = "dev-jwt-secret";
const DEV_COOKIE_SECRET: &str = "dev-cookie-secret";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Attributes applied to the session (`auth`) cookie.
#[derive(Debug, Clone)]
pub struct SessionCookiePolicy {
    pub max_age_seconds: u64,
    pub path: String,
    pub secure: bool,
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub jwt_secret: String,
    pub cookie_secret: String,
    pub session_cookie: SessionCookiePolicy,

    pub request_body_limit_bytes: usize,
    pub request_timeout_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print secrets
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("session_cookie", &self.session_cookie)
            .field("request_body_limit_bytes", &self.request_body_limit_bytes)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let env_var = |key: &str| std::env::var(key).ok();
        let jwt_secret = secret_from(env_var, "JWT_SECRET", DEV_JWT_SECRET, app_env)?;
        let cookie_secret = secret_from(env_var, "COOKIE_SECRET", DEV_COOKIE_SECRET, app_env)?;

        let max_age_seconds = std::env::var("SESSION_MAX_AGE_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(3600);

        let secure = match std::env::var("COOKIE_SECURE") {
            Ok(v) => parse_bool(&v).ok_or(ConfigError::Invalid("COOKIE_SECURE"))?,
            Err(_) => app_env.is_production(),
        };

        let request_body_limit_bytes = std::env::var("REQUEST_BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        let request_timeout_seconds = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        Ok(Self {
            addr,
            app_env,
            jwt_secret,
            cookie_secret,
            session_cookie: SessionCookiePolicy {
                max_age_seconds,
                path: "/".to_string(),
                secure,
            },
            request_body_limit_bytes,
            request_timeout_seconds,
        })
    }
}

// Development falls back to a fixed demo secret; production must set it.
fn secret_from(
    lookup: impl Fn(&str) -> Option<String>,
    key: &'static str,
    dev_default: &str,
    app_env: AppEnv,
) -> Result<String, ConfigError> {
    match lookup(key) {
        Some(v) if v.trim().is_empty() => Err(ConfigError::Invalid(key)),
        Some(v) => Ok(v),
        None if app_env.is_production() => Err(ConfigError::Missing(key)),
        None => {
            tracing::warn!(key, "secret not configured, using development default");
            Ok(dev_default.to_string())
        }
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            app_env: AppEnv::Development,
            jwt_secret: "test-jwt-secret".to_string(),
            cookie_secret: "test-cookie-secret".to_string(),
            session_cookie: SessionCookiePolicy {
                max_age_seconds: 3600,
                path: "/".to_string(),
                secure: false,
            },
            request_body_limit_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
