mod claude;
mod gemini;
mod openai;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api_error::extract_api_error;
use crate::error::GenerationError;

/// Sends `body` and returns the raw success payload.
pub(super) async fn send_json(
    provider: &'static str,
    request: reqwest::RequestBuilder,
    body: &Value,
) -> Result<String, GenerationError> {
    let transport = |source| GenerationError::Transport { provider, source };
    let response = request.json(body).send().await.map_err(transport)?;
    let status = response.status();
    let payload = response.text().await.map_err(transport)?;
    if status.is_success() {
        return Ok(payload);
    }

    let message = extract_api_error(&payload);
    if is_auth_failure(status, &message) {
        return Err(GenerationError::Unauthorized {
            provider,
            status,
            message,
        });
    }
    Err(GenerationError::Api {
        provider,
        status,
        message,
    })
}

pub(super) fn decode<T: DeserializeOwned>(
    provider: &'static str,
    payload: &str,
) -> Result<T, GenerationError> {
    serde_json::from_str(payload).map_err(|source| GenerationError::Decode { provider, source })
}

pub(super) fn finish_text(
    provider: &'static str,
    text: Option<String>,
) -> Result<String, GenerationError> {
    text.map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(GenerationError::EmptyResponse { provider })
}

// Gemini answers a bad key with 400 INVALID_ARGUMENT rather than 401.
fn is_auth_failure(status: StatusCode, message: &str) -> bool {
    status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || (status == StatusCode::BAD_REQUEST && message.contains("API key not valid"))
}
