#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    OpenAI,
    Claude,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAI => "openai",
            ProviderKind::Claude => "claude",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "Gemini",
            ProviderKind::OpenAI => "OpenAI",
            ProviderKind::Claude => "Claude",
        }
    }

    /// Environment variables holding the credential, in lookup order.
    pub fn key_vars(&self) -> &'static [&'static str] {
        match self {
            ProviderKind::Gemini => &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
            ProviderKind::OpenAI => &["OPENAI_API_KEY"],
            ProviderKind::Claude => &["ANTHROPIC_API_KEY"],
        }
    }
}

pub fn default_model(provider: ProviderKind) -> &'static str {
    match provider {
        ProviderKind::Gemini => "gemini-2.0-flash",
        ProviderKind::OpenAI => "gpt-4o-mini",
        ProviderKind::Claude => "claude-sonnet-4-5",
    }
}

pub fn provider_from_name(name: &str) -> Option<ProviderKind> {
    match name.trim().to_lowercase().as_str() {
        "gemini" | "google" => Some(ProviderKind::Gemini),
        "openai" => Some(ProviderKind::OpenAI),
        "claude" | "anthropic" => Some(ProviderKind::Claude),
        _ => None,
    }
}
