//! Hosted model invocation through the Bedrock Converse API.
//!
//! One user message in, one completed assistant message out. A Bedrock API
//! key is sent as a bearer token over plain HTTPS. Without one, the AWS SDK
//! signs the call with the default credential chain (environment, profiles,
//! SSO, instance and task roles).

use aws_sdk_bedrockruntime::config::Region;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, ConverseOutput, Message as SdkMessage};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use yourday_core::{AgentError, Config, ReqwestErrorExt};

/// Generation of a full summary regularly takes longer than the 10 second
/// budget used by the data adapters.
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Serialize)]
struct ConverseRequest<'a> {
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<TextBlock<'a>>,
}

#[derive(Debug, Serialize)]
struct TextBlock<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ConverseResponse {
    output: ConverseResponseOutput,
    #[serde(rename = "stopReason")]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConverseResponseOutput {
    message: OutputMessage,
}

#[derive(Debug, Deserialize)]
struct OutputMessage {
    #[serde(default)]
    content: Vec<OutputBlock>,
}

#[derive(Debug, Deserialize)]
struct OutputBlock {
    text: Option<String>,
}

/// Bedrock runtime endpoint for `region`.
pub fn regional_endpoint(region: &str) -> String {
    format!("https://bedrock-runtime.{}.amazonaws.com", region)
}

/// How Converse calls are authenticated.
#[derive(Clone)]
enum Auth {
    /// Bearer Bedrock API key against `endpoint`
    ApiKey {
        client: Arc<Client>,
        endpoint: String,
        api_key: String,
    },
    /// SDK client built from the default credential chain on first use
    DefaultChain {
        region: String,
        endpoint: Option<String>,
    },
    /// Ready SDK client
    Sdk(aws_sdk_bedrockruntime::Client),
}

#[derive(Clone)]
pub struct BedrockModel {
    model_id: String,
    auth: Auth,
}

impl BedrockModel {
    /// Authenticate with a Bedrock API key.
    pub fn with_api_key(
        model_id: &str,
        endpoint: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AgentError::new(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            model_id: model_id.to_string(),
            auth: Auth::ApiKey {
                client: Arc::new(client),
                endpoint: endpoint.trim_end_matches('/').to_string(),
                api_key: api_key.into(),
            },
        })
    }

    /// Sign with whatever the AWS default credential chain resolves.
    ///
    /// Credentials are looked up when the first request is made, so a
    /// missing login surfaces as a generation failure.
    pub fn with_default_credentials(model_id: &str, region: &str, endpoint: Option<String>) -> Self {
        Self {
            model_id: model_id.to_string(),
            auth: Auth::DefaultChain {
                region: region.to_string(),
                endpoint,
            },
        }
    }

    /// Use an already configured SDK client.
    pub fn with_sdk_client(model_id: &str, client: aws_sdk_bedrockruntime::Client) -> Self {
        Self {
            model_id: model_id.to_string(),
            auth: Auth::Sdk(client),
        }
    }

    /// Build from run configuration. `AWS_BEARER_TOKEN_BEDROCK` wins over
    /// the default credential chain; `BEDROCK_ENDPOINT` overrides the
    /// regional URL either way.
    pub fn from_config(config: &Config) -> Result<Self, AgentError> {
        match &config.bedrock_api_key {
            Some(api_key) => {
                let endpoint = config
                    .bedrock_endpoint
                    .clone()
                    .unwrap_or_else(|| regional_endpoint(&config.aws_region));
                Self::with_api_key(&config.bedrock_model_id, &endpoint, api_key.as_str())
            }
            None => Ok(Self::with_default_credentials(
                &config.bedrock_model_id,
                &config.aws_region,
                config.bedrock_endpoint.clone(),
            )),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    fn converse_url(endpoint: &str, model_id: &str) -> String {
        format!(
            "{}/model/{}/converse",
            endpoint,
            urlencoding::encode(model_id)
        )
    }

    /// Send `prompt` as the only user message and return the reply text.
    #[instrument(skip(self, prompt), fields(model = %self.model_id, prompt_chars = prompt.len()), level = "info")]
    pub async fn complete(&self, prompt: &str) -> Result<String, AgentError> {
        match &self.auth {
            Auth::ApiKey {
                client,
                endpoint,
                api_key,
            } => self.complete_with_key(client, endpoint, api_key, prompt).await,
            Auth::DefaultChain { region, endpoint } => {
                let client = default_chain_client(region, endpoint.as_deref()).await;
                self.complete_with_sdk(&client, prompt).await
            }
            Auth::Sdk(client) => self.complete_with_sdk(client, prompt).await,
        }
    }

    async fn complete_with_key(
        &self,
        client: &Client,
        endpoint: &str,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, AgentError> {
        let request = ConverseRequest {
            messages: vec![Message {
                role: "user",
                content: vec![TextBlock { text: prompt }],
            }],
        };

        let response = client
            .post(Self::converse_url(endpoint, &self.model_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::new(e.describe()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AgentError::new(e.describe()))?;

        if !status.is_success() {
            return Err(AgentError::new(format!(
                "Bedrock returned {}: {}",
                status, body
            )));
        }

        let parsed: ConverseResponse = serde_json::from_str(&body)
            .map_err(|e| AgentError::new(format!("Invalid Bedrock response: {}", e)))?;

        let text: String = parsed
            .output
            .message
            .content
            .into_iter()
            .filter_map(|block| block.text)
            .collect();

        non_empty(text, parsed.stop_reason.as_deref())
    }

    async fn complete_with_sdk(
        &self,
        client: &aws_sdk_bedrockruntime::Client,
        prompt: &str,
    ) -> Result<String, AgentError> {
        let message = SdkMessage::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(prompt.to_string()))
            .build()
            .map_err(|e| AgentError::new(format!("Invalid Bedrock request: {}", e)))?;

        let output = client
            .converse()
            .model_id(&self.model_id)
            .messages(message)
            .send()
            .await
            .map_err(|e| AgentError::new(DisplayErrorContext(&e).to_string()))?;

        let text: String = match output.output() {
            Some(ConverseOutput::Message(message)) => message
                .content()
                .iter()
                .filter_map(|block| block.as_text().ok())
                .map(String::as_str)
                .collect(),
            _ => String::new(),
        };

        non_empty(text, Some(output.stop_reason().as_str()))
    }
}

async fn default_chain_client(
    region: &str,
    endpoint: Option<&str>,
) -> aws_sdk_bedrockruntime::Client {
    let timeouts = aws_config::timeout::TimeoutConfig::builder()
        .operation_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build();

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .timeout_config(timeouts);
    if let Some(endpoint) = endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    tracing::debug!("Using AWS default credential chain in {}", region);
    aws_sdk_bedrockruntime::Client::new(&sdk_config)
}

fn non_empty(text: String, stop_reason: Option<&str>) -> Result<String, AgentError> {
    if text.trim().is_empty() {
        return Err(AgentError::new(format!(
            "Model returned no text (stop reason: {})",
            stop_reason.unwrap_or("unknown")
        )));
    }
    Ok(text)
}

impl std::fmt::Debug for BedrockModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut d = f.debug_struct("BedrockModel");
        d.field("model_id", &self.model_id);
        match &self.auth {
            Auth::ApiKey { endpoint, .. } => d
                .field("endpoint", endpoint)
                .field("api_key", &"<redacted>"),
            Auth::DefaultChain { region, endpoint } => d
                .field("region", region)
                .field("endpoint", endpoint)
                .field("credentials", &"default chain"),
            Auth::Sdk(_) => d.field("credentials", &"sdk client"),
        };
        d.finish()
    }
}
