use anyhow::{Result, anyhow};

use super::provider_kind::{ProviderKind, default_model, provider_from_name};
use crate::error::GenerationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSelection {
    pub provider: ProviderKind,
    pub model: String,
}

/// Resolves `--model`: `provider:model`, a bare provider name, or a bare model
/// name. Without an argument, the first provider with a credential in the
/// environment is used, falling back to Gemini.
pub fn resolve_selection(model_arg: Option<&str>) -> Result<ProviderSelection> {
    resolve_selection_with(model_arg, get_env)
}

pub fn resolve_key(
    provider: ProviderKind,
    override_key: Option<&str>,
) -> Result<String, GenerationError> {
    resolve_key_with(provider, override_key, get_env)
}

fn resolve_selection_with(
    model_arg: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ProviderSelection> {
    let Some(raw) = model_arg.map(str::trim) else {
        let provider = provider_from_env(&lookup);
        return Ok(selection(provider, None));
    };
    if raw.is_empty() {
        return Err(anyhow!("model argument is empty"));
    }

    if let Some((provider_part, model_part)) = raw.split_once(':') {
        let provider = provider_from_name(provider_part)
            .ok_or_else(|| anyhow!("unknown provider '{}'", provider_part))?;
        return Ok(selection(provider, Some(model_part)));
    }
    if let Some(provider) = provider_from_name(raw) {
        return Ok(selection(provider, None));
    }
    let provider = provider_from_model_name(raw).unwrap_or_else(|| provider_from_env(&lookup));
    Ok(selection(provider, Some(raw)))
}

fn resolve_key_with(
    provider: ProviderKind,
    override_key: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, GenerationError> {
    if let Some(key) = override_key.map(str::trim).filter(|key| !key.is_empty()) {
        return Ok(key.to_string());
    }
    provider
        .key_vars()
        .iter()
        .find_map(|var| lookup(*var))
        .ok_or_else(|| GenerationError::MissingCredential {
            provider: provider.as_str(),
            checked: provider.key_vars().join("/"),
        })
}

fn selection(provider: ProviderKind, model: Option<&str>) -> ProviderSelection {
    let model = model
        .map(str::trim)
        .filter(|model| !model.is_empty())
        .unwrap_or_else(|| default_model(provider));
    ProviderSelection {
        provider,
        model: model.to_string(),
    }
}

fn provider_from_env(lookup: &impl Fn(&str) -> Option<String>) -> ProviderKind {
    [ProviderKind::Gemini, ProviderKind::OpenAI, ProviderKind::Claude]
        .into_iter()
        .find(|provider| provider.key_vars().iter().any(|var| lookup(*var).is_some()))
        .unwrap_or(ProviderKind::Gemini)
}

fn provider_from_model_name(model: &str) -> Option<ProviderKind> {
    let lowered = model.to_lowercase();
    if lowered.starts_with("gemini") || lowered.starts_with("models/gemini") {
        return Some(ProviderKind::Gemini);
    }
    if lowered.starts_with("gpt-") || lowered.starts_with("o1") || lowered.starts_with("o3") {
        return Some(ProviderKind::OpenAI);
    }
    if lowered.starts_with("claude") {
        return Some(ProviderKind::Claude);
    }
    None
}

fn get_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
