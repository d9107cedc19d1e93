use serde::Deserialize;
use serde_json::{Value, json};

use super::{decode, finish_text, send_json};
use crate::error::GenerationError;
use crate::llm::{LlmClient, TEMPERATURE};

const PROVIDER: &str = "Claude";
const MAX_TOKENS: u32 = 2048;
const API_VERSION: &str = "2023-06-01";

impl LlmClient {
    pub(crate) async fn call_claude(&self, request: &str) -> Result<String, GenerationError> {
        let base = std::env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com/v1".to_string());
        let url = format!("{}/messages", base.trim_end_matches('/'));
        let body = request_body(&self.model, request);

        let request = self
            .http
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION);
        let payload = send_json(PROVIDER, request, &body).await?;
        extract_text(&payload)
    }
}

fn request_body(model: &str, request: &str) -> Value {
    json!({
        "model": model,
        "max_tokens": MAX_TOKENS,
        "temperature": TEMPERATURE,
        "messages": [
            {
                "role": "user",
                "content": request
            }
        ]
    })
}

fn extract_text(payload: &str) -> Result<String, GenerationError> {
    let parsed: ClaudeResponse = decode(PROVIDER, payload)?;
    let text = parsed
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect::<String>();
    finish_text(PROVIDER, Some(text))
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<ClaudeBlock>,
}

#[derive(Debug, Deserialize)]
struct ClaudeBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}
