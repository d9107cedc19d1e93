use serde::Deserialize;
use serde_json::{Value, json};

use super::{decode, finish_text, send_json};
use crate::error::GenerationError;
use crate::llm::{LlmClient, TEMPERATURE};

const PROVIDER: &str = "OpenAI";

impl LlmClient {
    pub(crate) async fn call_openai(&self, request: &str) -> Result<String, GenerationError> {
        let base = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let url = format!("{}/chat/completions", base.trim_end_matches('/'));
        let body = request_body(&self.model, request);

        let request = self.http.post(url).bearer_auth(&self.api_key);
        let payload = send_json(PROVIDER, request, &body).await?;
        extract_text(&payload)
    }
}

fn request_body(model: &str, request: &str) -> Value {
    json!({
        "model": model,
        "messages": [
            {
                "role": "user",
                "content": request
            }
        ],
        "temperature": TEMPERATURE
    })
}

fn extract_text(payload: &str) -> Result<String, GenerationError> {
    let parsed: OpenAIResponse = decode(PROVIDER, payload)?;
    let text = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content);
    finish_text(PROVIDER, text)
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_model_prompt_and_temperature() {
        let body = request_body("gpt-4o-mini", "give me 2 questions on SQL");
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["temperature"].as_f64(), Some(TEMPERATURE));
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "give me 2 questions on SQL");
    }

    #[test]
    fn reads_first_choice_content() {
        let payload = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":" 1. Define a join. "}}]}"#;
        assert_eq!(extract_text(payload).unwrap(), "1. Define a join.");
    }

    #[test]
    fn null_content_is_empty() {
        let payload = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert!(extract_text(payload).is_err());
    }
}
