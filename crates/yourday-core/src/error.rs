//! Centralized error types for YourDay.
//!
//! Every stage of the daily run reports failures through one of the leaf
//! error enums below. They all convert into [`AppError`], which is what the
//! binary inspects to decide between a clean one-line message and the
//! generic "unexpected error" path.

use thiserror::Error;

/// Top-level application error type.
///
/// Closed set: one kind per pipeline stage plus configuration and the
/// reserved `VaultMcp` kind.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Weather API error: {0}")]
    Weather(#[from] WeatherError),

    #[error("News API error: {0}")]
    News(#[from] NewsError),

    #[error("Agent workflow failed: {0}")]
    Agent(#[from] AgentError),

    #[error("Vault API error: {0}")]
    Vault(#[from] VaultError),

    /// Legacy kind from the MCP-based publisher. Nothing produces it.
    #[error("Vault MCP error: {0}")]
    VaultMcp(String),
}

impl AppError {
    /// Returns a short operator hint for the failing stage.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::News(e) => e.user_message(),
            AppError::Agent(e) => e.user_message(),
            AppError::Vault(e) => e.user_message(),
            AppError::VaultMcp(_) => "Vault MCP posting failed.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    #[error("Invalid configuration: {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::MissingVariables(_) => {
                "A required setting is missing. Check your environment or .env file."
            }
            ConfigError::Invalid { .. } => "Invalid configuration. Check your settings.",
        }
    }
}

/// Weather provider errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Weather provider unreachable: {0}")]
    Unreachable(String),

    #[error("Invalid API response format: {0}")]
    MalformedResponse(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::LocationNotFound(_) => "Location not found. Check LOCATION.",
            WeatherError::Unreachable(_) => "Weather service unavailable. Please try again later.",
            WeatherError::MalformedResponse(_) => "Weather service returned unexpected data.",
        }
    }
}

/// News provider errors.
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("News provider unreachable: {0}")]
    Unreachable(String),

    #[error("Invalid API response format: {0}")]
    MalformedResponse(String),
}

impl NewsError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NewsError::Unreachable(_) => "News service unavailable. Check NEWS_API_KEY and try again.",
            NewsError::MalformedResponse(_) => "News service returned unexpected data.",
        }
    }
}

/// Generation-stage errors.
///
/// Sub-causes (auth, quota, transport, empty output) are deliberately folded
/// into a single message.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct AgentError(pub String);

impl AgentError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn user_message(&self) -> &'static str {
        "Summary generation failed. Check model access and credentials."
    }
}

/// Vault publishing errors.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Failed to post to vault: {status} - {message}")]
    PublishFailed { status: u16, message: String },

    #[error("Failed to post to vault: {0}")]
    Unreachable(String),
}

impl VaultError {
    pub fn user_message(&self) -> &'static str {
        match self {
            VaultError::PublishFailed { status, .. } if *status == 401 || *status == 403 => {
                "Vault rejected the API key. Check OBSIDIAN_API_KEY."
            }
            VaultError::PublishFailed { .. } => "Vault refused the write. Please try again.",
            VaultError::Unreachable(_) => {
                "Unable to reach the vault. Is the Local REST API plugin running?"
            }
        }
    }
}

/// Extension trait for describing reqwest errors in error messages.
pub trait ReqwestErrorExt {
    fn describe(&self) -> String;
}

impl ReqwestErrorExt for reqwest::Error {
    fn describe(&self) -> String {
        if self.is_timeout() {
            format!("request timed out: {}", self)
        } else if self.is_connect() {
            format!("connection failed: {}", self)
        } else if let Some(status) = self.status() {
            format!("HTTP {}: {}", status.as_u16(), self)
        } else if self.is_decode() {
            format!("could not decode response body: {}", self)
        } else {
            self.to_string()
        }
    }
}
