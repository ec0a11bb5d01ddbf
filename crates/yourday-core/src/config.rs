use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_OBSIDIAN_BASE_URL: &str = "http://localhost:27123";
pub const DEFAULT_AWS_REGION: &str = "us-east-1";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Environment variables that must be set and non-empty.
pub const REQUIRED_VARS: [&str; 4] = [
    "NEWS_API_KEY",
    "BEDROCK_MODEL_ID",
    "LOCATION",
    "OBSIDIAN_API_KEY",
];

/// Run configuration, read once at startup and passed to every client.
#[derive(Clone)]
pub struct Config {
    /// GNews API token
    pub news_api_key: String,

    /// Bedrock model or inference profile identifier
    pub bedrock_model_id: String,

    /// Free-text location to geocode, e.g. "Berlin"
    pub location: String,

    /// Bearer token for the Obsidian Local REST API plugin
    pub obsidian_api_key: String,

    /// Base URL of the Obsidian Local REST API
    pub obsidian_base_url: String,

    /// AWS region hosting the Bedrock runtime endpoint
    pub aws_region: String,

    /// Log verbosity (DEBUG, INFO, WARNING, ERROR)
    pub log_level: String,

    /// Bedrock API key (`AWS_BEARER_TOKEN_BEDROCK`)
    pub bedrock_api_key: Option<String>,

    /// Overrides the regional Bedrock runtime endpoint
    pub bedrock_endpoint: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset. All missing required variables are
    /// reported in a single error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|name| get(**name).is_none())
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing));
        }

        let required = |name: &str| get(name).unwrap_or_default();

        let config = Self {
            news_api_key: required("NEWS_API_KEY"),
            bedrock_model_id: required("BEDROCK_MODEL_ID"),
            location: required("LOCATION"),
            obsidian_api_key: required("OBSIDIAN_API_KEY"),
            obsidian_base_url: get("OBSIDIAN_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OBSIDIAN_BASE_URL.to_string()),
            aws_region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            bedrock_api_key: get("AWS_BEARER_TOKEN_BEDROCK"),
            bedrock_endpoint: get("BEDROCK_ENDPOINT"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url(&self.obsidian_base_url, "OBSIDIAN_BASE_URL")?;

        if let Some(endpoint) = &self.bedrock_endpoint {
            validate_url(endpoint, "BEDROCK_ENDPOINT")?;
        }

        Ok(())
    }
}

/// Validate a URL field
fn validate_url(url_str: &str, field_name: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::Invalid {
        field: field_name.to_string(),
        message,
    };

    let url = Url::parse(url_str).map_err(|e| invalid(format!("Invalid URL: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(format!(
            "URL must use http or https scheme, got: {}",
            url.scheme()
        )));
    }

    if url.host().is_none() {
        return Err(invalid("URL must have a host".to_string()));
    }

    Ok(())
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("news_api_key", &"<redacted>")
            .field("bedrock_model_id", &self.bedrock_model_id)
            .field("location", &self.location)
            .field("obsidian_api_key", &"<redacted>")
            .field("obsidian_base_url", &self.obsidian_base_url)
            .field("aws_region", &self.aws_region)
            .field("log_level", &self.log_level)
            .field(
                "bedrock_api_key",
                &self.bedrock_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("bedrock_endpoint", &self.bedrock_endpoint)
            .finish()
    }
}
