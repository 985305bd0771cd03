//! Read `$XDG_CONFIG_HOME/<app>/config.toml`: a free-form `[env]` table plus a typed
//! `[model_info]` table whose keys map onto the `MODEL_INFO_*` variables.
//!
//! ```toml
//! [env]
//! XAI_API_KEY = "xai-..."
//!
//! [model_info]
//! ollama_host = "http://gpu-box:11434"
//! cache_ttl_secs = 3600
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use model_info::settings::{
    ENV_CACHE_NAMESPACE, ENV_CACHE_TTL_SECS, ENV_LITELLM_URL, ENV_LMSTUDIO_HOST, ENV_OLLAMA_HOST,
    ENV_XAI_BASE_URL,
};
use serde::Deserialize;

use crate::LoadError;

/// `$XDG_CONFIG_HOME` when set and absolute, else the platform config dir.
pub fn config_home() -> Result<PathBuf, LoadError> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
    {
        return Ok(dir);
    }
    dirs::config_dir().ok_or_else(|| LoadError::XdgPath("no config directory for this platform".into()))
}

pub fn config_path(config_home: &Path, app_name: &str) -> PathBuf {
    config_home.join(app_name).join("config.toml")
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelInfoSection {
    cache_namespace: Option<String>,
    cache_ttl_secs: Option<u64>,
    ollama_host: Option<String>,
    lmstudio_host: Option<String>,
    litellm_url: Option<String>,
    xai_base_url: Option<String>,
}

impl ModelInfoSection {
    fn into_env(self) -> impl Iterator<Item = (String, String)> {
        [
            (ENV_CACHE_NAMESPACE, self.cache_namespace),
            (ENV_CACHE_TTL_SECS, self.cache_ttl_secs.map(|s| s.to_string())),
            (ENV_OLLAMA_HOST, self.ollama_host),
            (ENV_LMSTUDIO_HOST, self.lmstudio_host),
            (ENV_LITELLM_URL, self.litellm_url),
            (ENV_XAI_BASE_URL, self.xai_base_url),
        ]
        .into_iter()
        .filter_map(|(key, value)| Some((key.to_string(), value?)))
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
    #[serde(default)]
    model_info: ModelInfoSection,
}

/// Env pairs from the app's config file under `config_home`; `[env]` wins over
/// `[model_info]` for the same variable. A missing file yields an empty map.
pub fn load_env_map(config_home: &Path, app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    let path = config_path(config_home, app_name);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => return Err(LoadError::XdgRead(e)),
    };
    let config: ConfigFile = toml::from_str(&content)?;
    let mut map: HashMap<String, String> = config.model_info.into_env().collect();
    map.extend(config.env);
    Ok(map)
}
