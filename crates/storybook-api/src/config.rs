//! Server configuration read from the environment.

use std::fmt::Display;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::str::FromStr;

use storybook_openai::{DEFAULT_BASE_URL, OpenAiSettings};
use storybook_pipeline::application::rate_limiter::{
    DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_SECS, RateLimitPolicy,
};
use storybook_pipeline::domain::prompt::DEFAULT_CHAT_MODEL;

use crate::error::AppError;

/// Everything `main` needs to start serving.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Provider location and credential.
    pub openai: OpenAiSettings,
    /// Chat model used for story text.
    pub chat_model: String,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Per-client quota.
    pub rate_limit: RateLimitPolicy,
    /// Key clients by the first `X-Forwarded-For` entry.
    pub trust_forwarded_for: bool,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("OPENAI_API_KEY environment variable must be set".into())
            })?;
        let base_url = lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let chat_model =
            lookup("OPENAI_CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_owned());
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;

        let max_requests = parse_or(
            &lookup,
            "RATE_LIMIT_MAX_REQUESTS",
            NonZeroU32::new(DEFAULT_MAX_REQUESTS).unwrap_or(NonZeroU32::MIN),
        )?;
        let window_secs = parse_or(
            &lookup,
            "RATE_LIMIT_WINDOW_SECS",
            NonZeroU32::new(DEFAULT_WINDOW_SECS).unwrap_or(NonZeroU32::MIN),
        )?;
        let trust_forwarded_for = parse_flag(&lookup, "TRUST_FORWARDED_FOR")?;

        Ok(Self {
            openai: OpenAiSettings::new(base_url, api_key),
            chat_model,
            host,
            port,
            rate_limit: RateLimitPolicy::new(max_requests, window_secs),
            trust_forwarded_for,
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST` and `PORT` do not form a valid
    /// address.
    pub fn bind_address(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a positive number: {e}"))),
    }
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<bool, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        Some(v) => Err(AppError::Config(format!(
            "{key} must be true or false, got {v:?}"
        ))),
    }
}
