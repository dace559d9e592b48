use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_TRANSCRIPT_LIMIT: usize = 40;
pub const DEFAULT_LANGUAGE: &str = "English";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_KEY environment variable not set")]
    MissingApiKey,

    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub api_base: String,
    pub text_model: String,
    pub image_model: String,
    pub temperature: f32,
    /// `None` keeps the whole transcript.
    pub transcript_limit: Option<usize>,
    pub language: String,
    /// `None` disables the client timeout.
    pub http_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't have to
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("API_KEY")
            .or_else(|| lookup("GEMINI_API_KEY"))
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let text = |var: &str, default: &str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let temperature = parse_var(&lookup, "ADVENTURE_TEMPERATURE", DEFAULT_TEMPERATURE)?;
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(ConfigError::Invalid {
                var: "ADVENTURE_TEMPERATURE",
                value: temperature.to_string(),
            });
        }
        let transcript_limit =
            parse_var(&lookup, "ADVENTURE_TRANSCRIPT_LIMIT", DEFAULT_TRANSCRIPT_LIMIT)?;
        let timeout_secs =
            parse_var(&lookup, "ADVENTURE_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;

        Ok(Self {
            api_key,
            api_base: text("ADVENTURE_API_BASE", DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            text_model: text("ADVENTURE_TEXT_MODEL", DEFAULT_TEXT_MODEL),
            image_model: text("ADVENTURE_IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            temperature,
            transcript_limit: (transcript_limit > 0).then_some(transcript_limit),
            language: text("ADVENTURE_LANGUAGE", DEFAULT_LANGUAGE),
            http_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        _ => Ok(default),
    }
}
