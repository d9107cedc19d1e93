use serde::Deserialize;
use serde_json::{Value, json};

use super::{decode, finish_text, send_json};
use crate::error::GenerationError;
use crate::llm::{LlmClient, TEMPERATURE};

const PROVIDER: &str = "Gemini";

impl LlmClient {
    pub(crate) async fn call_gemini(&self, request: &str) -> Result<String, GenerationError> {
        let base = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string());
        let model_path = if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        };
        let endpoint = format!(
            "{}/{}:generateContent",
            base.trim_end_matches('/'),
            model_path
        );
        let url = reqwest::Url::parse(&endpoint).map_err(|err| GenerationError::Endpoint {
            provider: PROVIDER,
            detail: err.to_string(),
        })?;

        let body = request_body(request);

        let request = self.http.post(url).header("x-goog-api-key", &self.api_key);
        let payload = send_json(PROVIDER, request, &body).await?;
        extract_text(&payload)
    }
}

// The model travels in the URL path, not the body.
fn request_body(request: &str) -> Value {
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [{"text": request}]
            }
        ],
        "generationConfig": {
            "temperature": TEMPERATURE
        }
    })
}

fn extract_text(payload: &str) -> Result<String, GenerationError> {
    let parsed: GeminiResponse = decode(PROVIDER, payload)?;
    let text = parsed.candidates.into_iter().next().map(|candidate| {
        candidate
            .content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<String>()
    });
    finish_text(PROVIDER, text)
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}
