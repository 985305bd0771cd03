//! Load model-info configuration from XDG `config.toml` and a project `.env`, then apply it
//! to the process environment with priority: **existing env > .env > XDG**.
//!
//! The library ([`model_info::ModelInfoSettings::from_env`]) only reads environment
//! variables; this crate is how the CLI fills them from files.

mod dotenv;
mod xdg_toml;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use xdg_toml::config_home;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read {}: {reason}", path.display())]
    Dotenv { path: PathBuf, reason: String },
}

/// Location of the app's XDG config file (it may not exist).
pub fn config_path(app_name: &str) -> Result<PathBuf, LoadError> {
    Ok(xdg_toml::config_path(&config_home()?, app_name))
}

/// Loads `$XDG_CONFIG_HOME/<app_name>/config.toml` and `.env`, then sets every variable
/// that is **not** already set in the process.
///
/// * `app_name`: e.g. `"model-info"`.
/// * `override_dir`: look for `.env` here instead of the current directory.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    load_and_apply_from(&config_home()?, app_name, override_dir)
}

/// [`load_and_apply`] with an explicit config home.
pub fn load_and_apply_from(
    config_home: &Path,
    app_name: &str,
    override_dir: Option<&Path>,
) -> Result<(), LoadError> {
    let merged = merge(
        xdg_toml::load_env_map(config_home, app_name)?,
        dotenv::load_env_map(override_dir)?,
    );
    for (key, value) in merged {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
        }
    }
    Ok(())
}

/// `.env` entries replace XDG entries with the same key.
fn merge(
    xdg: HashMap<String, String>,
    dotenv: HashMap<String, String>,
) -> HashMap<String, String> {
    let mut merged = xdg;
    merged.extend(dotenv);
    merged
}
