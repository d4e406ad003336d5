use std::fmt;

/// Default endpoint for GitHub Models
pub const GITHUB_MODELS_DEFAULT_URL: &str =
    "https://models.inference.ai.azure.com/chat/completions";

/// Hosted model providers the judge can talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    Gemini,
    Xai,
    Github,
    DeepSeek,
    Unknown,
}

impl Provider {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix.to_ascii_lowercase().as_str() {
            "openai" => Some(Provider::OpenAi),
            "gemini" => Some(Provider::Gemini),
            "xai" | "grok" => Some(Provider::Xai),
            "github" => Some(Provider::Github),
            "deepseek" => Some(Provider::DeepSeek),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::Xai => "xai",
            Provider::Github => "github",
            Provider::DeepSeek => "deepseek",
            Provider::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a model identifier into its provider and the provider's model name.
///
/// An explicit `provider:` or `provider/` prefix wins; otherwise the model
/// name's own prefix decides. Unrecognized names resolve to `Unknown`.
pub fn resolve_provider(model: &str) -> (Provider, String) {
    let raw = model.trim();

    for sep in [':', '/'] {
        if let Some((prefix, rest)) = raw.split_once(sep) {
            if rest.is_empty() {
                continue;
            }
            if let Some(provider) = Provider::from_prefix(prefix) {
                return (provider, rest.to_string());
            }
        }
    }

    let lower = raw.to_ascii_lowercase();
    let provider = if ["gpt", "o1", "o3", "o4"].iter().any(|p| lower.starts_with(p)) {
        Provider::OpenAi
    } else if lower.starts_with("gemini") {
        Provider::Gemini
    } else if lower.starts_with("grok") {
        Provider::Xai
    } else if lower.starts_with("deepseek") {
        Provider::DeepSeek
    } else {
        Provider::Unknown
    };
    (provider, raw.to_string())
}

/// API keys and endpoints, read once from the environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    pub openai: Option<String>,
    pub xai: Option<String>,
    /// Primary key first, then the fallback key
    pub gemini: Vec<String>,
    pub github: Option<String>,
    pub github_url: String,
    pub deepseek: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from any variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut gemini = Vec::new();
        for name in ["GOOGLE_API_KEY", "GOOGLE_API_KEY_FALLBACK"] {
            if let Some(key) = get(name) {
                if !gemini.contains(&key) {
                    gemini.push(key);
                }
            }
        }

        Self {
            openai: get("OPENAI_API_KEY"),
            xai: get("XAI_API_KEY").or_else(|| get("GROK_API_KEY")),
            gemini,
            github: get("GITHUB_MODELS_TOKEN").or_else(|| get("GITHUB_TOKEN")),
            github_url: get("GITHUB_MODELS_URL")
                .unwrap_or_else(|| GITHUB_MODELS_DEFAULT_URL.to_string()),
            deepseek: get("DEEPSEEK_API_KEY"),
        }
    }
}
