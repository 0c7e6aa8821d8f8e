//! Prompt completion through a hosted foundation model.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::operation::invoke_model::builders::InvokeModelFluentBuilder;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MlError, MlResult};

/// Completion token cap.
pub const MAX_TOKENS: u32 = 500;
/// Sampling temperature.
pub const TEMPERATURE: f32 = 0.5;
/// Nucleus sampling cutoff.
pub const TOP_P: f32 = 0.5;

const JSON_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Penalty {
    pub scale: f32,
}

/// Request body in the Jurassic-2 completion format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub stop_sequences: Vec<String>,
    pub count_penalty: Penalty,
    pub presence_penalty: Penalty,
    pub frequency_penalty: Penalty,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        let none = Penalty { scale: 0.0 };
        Self {
            prompt: prompt.into(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            stop_sequences: Vec::new(),
            count_penalty: none,
            presence_penalty: none,
            frequency_penalty: none,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    completions: Vec<Completion>,
}

#[derive(Debug, Deserialize)]
struct Completion {
    data: CompletionData,
}

#[derive(Debug, Deserialize)]
struct CompletionData {
    text: String,
}

/// Extract the first completion's text from a response body.
pub fn parse_completion(body: &[u8]) -> MlResult<String> {
    let response: CompletionResponse = serde_json::from_slice(body)?;
    response
        .completions
        .into_iter()
        .next()
        .map(|c| c.data.text)
        .ok_or(MlError::MissingField("completions[0].data.text"))
}

/// Generates text from a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> MlResult<String>;
}

/// `TextGenerator` that invokes a Bedrock model.
#[derive(Clone)]
pub struct BedrockTextGenerator {
    client: Client,
    model_id: String,
}

impl BedrockTextGenerator {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self::new(Client::new(config), model_id)
    }

    /// JSON in, JSON out.
    fn invoke_request(&self, body: Vec<u8>) -> InvokeModelFluentBuilder {
        self.client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type(JSON_MEDIA_TYPE)
            .accept(JSON_MEDIA_TYPE)
            .body(Blob::new(body))
    }
}

#[async_trait]
impl TextGenerator for BedrockTextGenerator {
    async fn generate(&self, prompt: &str) -> MlResult<String> {
        let body = serde_json::to_vec(&CompletionRequest::new(prompt))?;

        let response = self
            .invoke_request(body)
            .send()
            .await
            .map_err(|e| MlError::generation(format!("{}: {}", self.model_id, e)))?;

        let text = parse_completion(response.body().as_ref())?;
        debug!("Model {} returned {} chars", self.model_id, text.len());
        Ok(text)
    }
}
