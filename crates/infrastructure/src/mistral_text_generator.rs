use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use webaudit_application::{RecommendationPrompt, TextGenerationError, TextGenerator};

/// Text generator backed by a Mistral compatible chat completions API.
#[derive(Clone)]
pub struct MistralTextGenerator {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl MistralTextGenerator {
    /// Creates a generator for one model.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl TextGenerator for MistralTextGenerator {
    async fn generate(&self, prompt: &RecommendationPrompt) -> Result<String, TextGenerationError> {
        let content = prompt.render();
        let request = ChatCompletionRequest {
            model: self.model.as_str(),
            messages: [ChatMessage {
                role: "user",
                content: content.as_str(),
            }],
            temperature: 0.8,
            max_tokens: 150,
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|error| TextGenerationError::Failed(format!("request failed: {error}")))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TextGenerationError::RateLimited(format!("status {status}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TextGenerationError::Failed(format!(
                "status {status}: {body}"
            )));
        }

        let completion = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|error| TextGenerationError::Failed(format!("undecodable completion: {error}")))?;

        first_choice_text(completion)
    }
}

fn first_choice_text(completion: ChatCompletionResponse) -> Result<String, TextGenerationError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_owned())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| TextGenerationError::Failed("completion has no content".to_owned()))
}
