//! Endpoint and cache settings read from the environment.

use std::time::Duration;

use crate::factory::DEFAULT_CACHE_NAMESPACE;
use crate::providers::{DEFAULT_LMSTUDIO_HOST, DEFAULT_OLLAMA_HOST, LITELLM_CATALOG_URL, XAI_BASE_URL};

pub const ENV_CACHE_NAMESPACE: &str = "MODEL_INFO_CACHE_NAMESPACE";
pub const ENV_CACHE_TTL_SECS: &str = "MODEL_INFO_CACHE_TTL_SECS";
pub const ENV_OLLAMA_HOST: &str = "MODEL_INFO_OLLAMA_HOST";
pub const ENV_LMSTUDIO_HOST: &str = "MODEL_INFO_LMSTUDIO_HOST";
pub const ENV_LITELLM_URL: &str = "MODEL_INFO_LITELLM_URL";
pub const ENV_XAI_BASE_URL: &str = "MODEL_INFO_XAI_BASE_URL";
pub const ENV_XAI_API_KEY: &str = "XAI_API_KEY";

/// Where adapters connect and how the factory caches.
///
/// Empty values count as unset. An unparsable TTL is ignored with a warning.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfoSettings {
    pub cache_namespace: String,
    pub cache_ttl: Option<Duration>,
    pub ollama_host: String,
    pub lmstudio_host: String,
    pub litellm_url: String,
    pub xai_base_url: String,
    pub xai_api_key: Option<String>,
}

impl Default for ModelInfoSettings {
    fn default() -> Self {
        Self {
            cache_namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
            cache_ttl: None,
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            lmstudio_host: DEFAULT_LMSTUDIO_HOST.to_string(),
            litellm_url: LITELLM_CATALOG_URL.to_string(),
            xai_base_url: XAI_BASE_URL.to_string(),
            xai_api_key: None,
        }
    }
}

impl ModelInfoSettings {
    /// Reads the `MODEL_INFO_*` variables and `XAI_API_KEY` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let cache_ttl = get(ENV_CACHE_TTL_SECS).and_then(|raw| match raw.parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(e) => {
                tracing::warn!(var = ENV_CACHE_TTL_SECS, value = %raw, error = %e, "ignoring invalid cache ttl");
                None
            }
        });

        Self {
            cache_namespace: get(ENV_CACHE_NAMESPACE).unwrap_or(defaults.cache_namespace),
            cache_ttl,
            ollama_host: get(ENV_OLLAMA_HOST).unwrap_or(defaults.ollama_host),
            lmstudio_host: get(ENV_LMSTUDIO_HOST).unwrap_or(defaults.lmstudio_host),
            litellm_url: get(ENV_LITELLM_URL).unwrap_or(defaults.litellm_url),
            xai_base_url: get(ENV_XAI_BASE_URL).unwrap_or(defaults.xai_base_url),
            xai_api_key: get(ENV_XAI_API_KEY),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> ModelInfoSettings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ModelInfoSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(settings(&[]), ModelInfoSettings::default());
        let defaults = ModelInfoSettings::default();
        assert_eq!(defaults.cache_namespace, "model-info");
        assert_eq!(defaults.ollama_host, "http://localhost:11434");
        assert_eq!(defaults.xai_api_key, None);
    }

    #[test]
    fn reads_every_variable() {
        let s = settings(&[
            (ENV_CACHE_NAMESPACE, "cortex"),
            (ENV_CACHE_TTL_SECS, "3600"),
            (ENV_OLLAMA_HOST, "http://gpu-box:11434"),
            (ENV_LMSTUDIO_HOST, "http://gpu-box:1234"),
            (ENV_LITELLM_URL, "http://mirror/catalog.json"),
            (ENV_XAI_BASE_URL, "http://proxy/v1"),
            (ENV_XAI_API_KEY, "xai-123"),
        ]);
        assert_eq!(s.cache_namespace, "cortex");
        assert_eq!(s.cache_ttl, Some(Duration::from_secs(3600)));
        assert_eq!(s.ollama_host, "http://gpu-box:11434");
        assert_eq!(s.lmstudio_host, "http://gpu-box:1234");
        assert_eq!(s.litellm_url, "http://mirror/catalog.json");
        assert_eq!(s.xai_base_url, "http://proxy/v1");
        assert_eq!(s.xai_api_key.as_deref(), Some("xai-123"));
    }

    #[test]
    fn blank_and_invalid_values_fall_back() {
        let s = settings(&[
            (ENV_CACHE_NAMESPACE, "   "),
            (ENV_CACHE_TTL_SECS, "an hour"),
            (ENV_XAI_API_KEY, ""),
        ]);
        assert_eq!(s.cache_namespace, "model-info");
        assert_eq!(s.cache_ttl, None);
        assert_eq!(s.xai_api_key, None);
    }
}
