mod api_error;
mod providers;

use std::time::Duration;
use tracing::{debug, info};

use crate::error::GenerationError;
use crate::model::ProviderKind;

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f64 = 0.6;

#[derive(Debug, Clone)]
pub struct LlmClient {
    provider: ProviderKind,
    api_key: String,
    model: String,
    http: reqwest::Client,
}

impl LlmClient {
    pub fn new(
        provider: ProviderKind,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| GenerationError::Transport {
                provider: provider.display_name(),
                source,
            })?;
        Ok(Self {
            provider,
            api_key: api_key.into(),
            model: model.into(),
            http,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// One request, no retries. The returned text is trimmed and never empty.
    pub async fn generate(&self, request: &str) -> Result<String, GenerationError> {
        debug!(
            provider = self.provider.as_str(),
            model = %self.model,
            "sending generation request"
        );
        let text = match self.provider {
            ProviderKind::Gemini => self.call_gemini(request).await?,
            ProviderKind::OpenAI => self.call_openai(request).await?,
            ProviderKind::Claude => self.call_claude(request).await?,
        };
        info!(
            provider = self.provider.as_str(),
            chars = text.len(),
            "generation finished"
        );
        Ok(text)
    }
}
