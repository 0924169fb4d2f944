//! Azure OpenAI compatible completions client.
//!
//! Sends `Q: {text}\nA:` to a fine-tuned completions deployment and reads the
//! first choice's text as RawFacts.

use std::time::Duration;

use hours_model::{ProgramContext, RawFacts};
use reqwest::blocking::Client;
use reqwest::header::RETRY_AFTER;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::collaborator::Collaborator;
use crate::error::CollaboratorError;
use crate::response::{clean_completion, parse_completion};

/// Environment variable holding the API key unless configured otherwise.
pub const DEFAULT_API_KEY_ENV: &str = "AZURE_OPENAI_API_KEY";

/// Endpoint and sampling parameters for the completions deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionsConfig {
    /// Resource base URL, e.g. `https://example.openai.azure.com/`.
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub best_of: u32,
    pub stop: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for CompletionsConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            deployment: "hours-clean".to_string(),
            api_version: "2022-12-01".to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            temperature: 0.2,
            max_tokens: 256,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            best_of: 1,
            stop: vec!["%%".to_string()],
            timeout_secs: 30,
        }
    }
}

impl CompletionsConfig {
    /// Full request URL for the deployment.
    pub fn url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    prompt: String,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    best_of: u32,
    stop: &'a [String],
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}

pub struct CompletionsClient {
    config: CompletionsConfig,
    api_key: String,
    client: Client,
}

impl CompletionsClient {
    pub fn new(config: CompletionsConfig, api_key: impl Into<String>) -> Result<Self, CollaboratorError> {
        if config.endpoint.trim().is_empty() {
            return Err(CollaboratorError::Configuration(
                "completions endpoint is not set".to_string(),
            ));
        }
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CollaboratorError::Configuration("API key is empty".to_string()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| CollaboratorError::Configuration(err.to_string()))?;
        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Build a client reading the key from `config.api_key_env`.
    pub fn from_env(config: CompletionsConfig) -> Result<Self, CollaboratorError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            CollaboratorError::Configuration(format!(
                "environment variable {} is not set",
                config.api_key_env
            ))
        })?;
        Self::new(config, api_key)
    }

    fn request_body<'a>(&'a self, text: &str) -> CompletionRequest<'a> {
        CompletionRequest {
            prompt: format!("Q: {text}\nA:"),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
            frequency_penalty: self.config.frequency_penalty,
            presence_penalty: self.config.presence_penalty,
            best_of: self.config.best_of,
            stop: &self.config.stop,
        }
    }
}

impl Collaborator for CompletionsClient {
    fn name(&self) -> &str {
        "completions"
    }

    fn extract(&self, text: &str, context: &ProgramContext) -> Result<RawFacts, CollaboratorError> {
        debug!(program_id = %context.program_id, deployment = %self.config.deployment, "requesting completion");
        let response = self
            .client
            .post(self.config.url())
            .header("api-key", &self.api_key)
            .json(&self.request_body(text))
            .send()?;

        let status = response.status();
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            warn!(program_id = %context.program_id, ?retry_after, "completions endpoint rate limited");
            return Err(CollaboratorError::RateLimited { retry_after });
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(if status.is_server_error() {
                CollaboratorError::Server {
                    status: status.as_u16(),
                    body,
                }
            } else {
                CollaboratorError::Rejected {
                    status: status.as_u16(),
                    body,
                }
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .map_err(|err| CollaboratorError::Unparseable(err.to_string()))?;
        let completion = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| CollaboratorError::Unparseable("response has no choices".to_string()))?;
        parse_completion(&clean_completion(&completion, text))
    }
}
