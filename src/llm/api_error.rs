use serde::Deserialize;

/// Pulls a readable message out of a provider error body. All three providers
/// wrap it in `{"error": {...}}`; the inner fields differ.
pub(crate) fn extract_api_error(body: &str) -> String {
    #[derive(Debug, Deserialize)]
    struct Envelope {
        error: Option<ErrorBody>,
    }

    #[derive(Debug, Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        status: Option<String>,
        #[serde(rename = "type")]
        kind: Option<String>,
    }

    let Ok(Envelope { error: Some(err) }) = serde_json::from_str::<Envelope>(body) else {
        let trimmed = body.trim();
        return if trimmed.is_empty() {
            "empty error body".to_string()
        } else {
            trimmed.to_string()
        };
    };

    let message = err.message.unwrap_or_else(|| "unknown error".to_string());
    match err.status.or(err.kind) {
        Some(label) => format!("{} ({})", message, label),
        None => message,
    }
}
