//! Process configuration read from the environment at startup.

use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

use crate::auth::password::{MAX_COST, MIN_COST};
use crate::error::AppError;

/// Deployment environment of the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Development,
    Production,
    Test,
}

impl RuntimeEnv {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

impl FromStr for RuntimeEnv {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(AppError::config(format!(
                "APP_ENV must be development, production or test, got '{other}'"
            ))),
        }
    }
}

static RUNTIME_ENV: OnceLock<RuntimeEnv> = OnceLock::new();

/// Install the process runtime environment. Only the first call has effect.
pub fn install_runtime_env(env: RuntimeEnv) {
    let _ = RUNTIME_ENV.set(env);
}

/// Current runtime environment; `Production` until one is installed.
pub fn runtime_env() -> RuntimeEnv {
    RUNTIME_ENV.get().copied().unwrap_or(RuntimeEnv::Production)
}

/// Whether internal error detail may be returned to clients.
pub fn exposes_error_detail() -> bool {
    runtime_env() == RuntimeEnv::Development
}

/// Fixed window and request ceiling for one rate limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    pub window: Duration,
    pub max_requests: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub env: RuntimeEnv,
    pub jwt_secret: String,
    pub jwt_ttl: Duration,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub bcrypt_cost: u32,
    pub auth_rate_limit: RateLimitSettings,
    pub api_rate_limit: RateLimitSettings,
}

pub const DEFAULT_TOKEN_TAG: &str = "starter-kit-api";
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let jwt_secret = var("JWT_SECRET").ok_or_else(|| {
            AppError::config("Required environment variable 'JWT_SECRET' is not set")
        })?;

        let env = match var("APP_ENV") {
            Some(raw) => raw.parse()?,
            None => RuntimeEnv::Development,
        };

        let jwt_ttl = match var("JWT_EXPIRES_IN") {
            Some(raw) => parse_duration(&raw)?,
            None => DEFAULT_TOKEN_TTL,
        };

        let bcrypt_cost = parse_or("BCRYPT_ROUNDS", var("BCRYPT_ROUNDS"), DEFAULT_BCRYPT_COST)?;
        if !(MIN_COST..=MAX_COST).contains(&bcrypt_cost) {
            return Err(AppError::config(format!(
                "BCRYPT_ROUNDS must be between {MIN_COST} and {MAX_COST}, got {bcrypt_cost}"
            )));
        }

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", var("PORT"), 3000)?,
            env,
            jwt_secret,
            jwt_ttl,
            jwt_issuer: var("JWT_ISSUER").unwrap_or_else(|| DEFAULT_TOKEN_TAG.to_string()),
            jwt_audience: var("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_TOKEN_TAG.to_string()),
            bcrypt_cost,
            auth_rate_limit: RateLimitSettings {
                window: Duration::from_secs(parse_or(
                    "AUTH_RATE_LIMIT_WINDOW_SECS",
                    var("AUTH_RATE_LIMIT_WINDOW_SECS"),
                    900,
                )?),
                max_requests: parse_or("AUTH_RATE_LIMIT_MAX", var("AUTH_RATE_LIMIT_MAX"), 5)?,
            },
            api_rate_limit: RateLimitSettings {
                window: Duration::from_secs(parse_or(
                    "API_RATE_LIMIT_WINDOW_SECS",
                    var("API_RATE_LIMIT_WINDOW_SECS"),
                    900,
                )?),
                max_requests: parse_or("API_RATE_LIMIT_MAX", var("API_RATE_LIMIT_MAX"), 100)?,
            },
        })
    }
}

fn parse_or<T: FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T, AppError> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{name} has an invalid value: '{raw}'"))),
        None => Ok(default),
    }
}

/// Parse `90`, `45s`, `15m`, `12h`, `7d` or `2w` into a duration.
/// A bare number is seconds.
pub fn parse_duration(raw: &str) -> Result<Duration, AppError> {
    let raw = raw.trim();
    let invalid = || AppError::config(format!("invalid duration: '{raw}'"));

    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);
    let value: u64 = digits.parse().map_err(|_| invalid())?;

    let multiplier = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        "w" => 7 * 24 * 60 * 60,
        _ => return Err(invalid()),
    };

    let secs = value.checked_mul(multiplier).ok_or_else(invalid)?;
    if secs == 0 {
        return Err(invalid());
    }
    Ok(Duration::from_secs(secs))
}
