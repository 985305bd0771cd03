//! Model provider: the closed set of catalogs a lookup can target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A source of model catalogs and pricing (vendor API or local runtime).
///
/// The string form (`as_str`) is used in cache keys, in the LiteLLM catalog's
/// `litellm_provider` field and on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    OpenAI,
    Anthropic,
    Groq,
    Gemini,
    XAI,
    Mistral,
    Ollama,
    LMStudio,
    Together,
    OpenRouter,
    Bedrock,
    DeepSeek,
    Custom,
}

impl ModelProvider {
    const ALL: [ModelProvider; 13] = [
        ModelProvider::OpenAI,
        ModelProvider::Anthropic,
        ModelProvider::Groq,
        ModelProvider::Gemini,
        ModelProvider::XAI,
        ModelProvider::Mistral,
        ModelProvider::Ollama,
        ModelProvider::LMStudio,
        ModelProvider::Together,
        ModelProvider::OpenRouter,
        ModelProvider::Bedrock,
        ModelProvider::DeepSeek,
        ModelProvider::Custom,
    ];

    /// Every provider, in declaration order.
    pub fn all() -> &'static [ModelProvider] {
        &Self::ALL
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelProvider::OpenAI => "openai",
            ModelProvider::Anthropic => "anthropic",
            ModelProvider::Groq => "groq",
            ModelProvider::Gemini => "gemini",
            ModelProvider::XAI => "xai",
            ModelProvider::Mistral => "mistral",
            ModelProvider::Ollama => "ollama",
            ModelProvider::LMStudio => "lmstudio",
            ModelProvider::Together => "together",
            ModelProvider::OpenRouter => "openrouter",
            ModelProvider::Bedrock => "bedrock",
            ModelProvider::DeepSeek => "deepseek",
            ModelProvider::Custom => "custom",
        }
    }
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| {
                format!(
                    "unknown model provider: {} (use one of: {})",
                    s,
                    Self::ALL.map(|p| p.as_str()).join(", ")
                )
            })
    }
}
