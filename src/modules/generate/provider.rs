//! Thin call-through client for the AI text-generation provider.
//!
//! The provider speaks an OpenAI-compatible chat-completions API. The model
//! is asked for strict JSON matching [`GenerateSiteResponse`]; anything else
//! (transport failures, non-2xx statuses, unparseable output) surfaces as a
//! recognized 502 failure so callers get a well-formed envelope rather than
//! a masked 500.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ai::AiConfig;
use crate::utils::errors::AppError;

use super::model::{GenerateSiteRequest, GenerateSiteResponse, slugify};

#[derive(Debug, Clone)]
pub struct AiProvider {
    http: reqwest::Client,
    config: AiConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl AiProvider {
    pub fn new(config: AiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub async fn generate_site(
        &self,
        request: &GenerateSiteRequest,
    ) -> Result<GenerateSiteResponse, AppError> {
        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt(request),
                },
            ],
        };

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::bad_gateway(anyhow::anyhow!("AI provider unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "AI provider returned an error");
            return Err(AppError::bad_gateway(anyhow::anyhow!(
                "AI provider returned status {}",
                status
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::bad_gateway(anyhow::anyhow!("Malformed provider response: {}", e)))?;

        let content = completion
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| AppError::bad_gateway(anyhow::anyhow!("Provider returned no choices")))?;

        debug!(bytes = content.len(), "AI draft received");

        let mut draft: GenerateSiteResponse = serde_json::from_str(content).map_err(|e| {
            AppError::bad_gateway(anyhow::anyhow!("Provider output was not valid JSON: {}", e))
        })?;

        if draft.slug.is_empty() {
            draft.slug = slugify(&request.business_name);
        }

        Ok(draft)
    }
}

const SYSTEM_PROMPT: &str = "You generate small marketing websites. Respond with a single JSON \
object: {\"name\", \"slug\", \"sections\": [{\"kind\", \"title\", \"body\"}], \"palette\": \
[\"#rrggbb\", ...]}. No prose, no markdown fences.";

fn user_prompt(request: &GenerateSiteRequest) -> String {
    format!(
        "Business name: {}\nBusiness type: {}\nDescription: {}\nWrite all copy in locale: {}",
        request.business_name, request.business_type, request.description, request.locale
    )
}
