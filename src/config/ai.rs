use std::env;

/// Configuration for the AI text-generation provider.
///
/// The base URL is overridable so tests can point the client at a mock
/// server.
#[derive(Clone, Debug)]
pub struct AiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl AiConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("AI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            api_key: env::var("AI_API_KEY").unwrap_or_default(),
            model: env::var("AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        }
    }
}
