//! Read a project `.env` into a map; applying it to the environment happens in `lib`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// `.env` in `override_dir`, else in the current directory, if it is a file.
fn dotenv_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = override_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())?;
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Parsed with the `dotenv` crate (quotes, `export` prefix, comments). Missing file → empty map.
pub fn load_env_map(override_dir: Option<&Path>) -> Result<HashMap<String, String>, LoadError> {
    let Some(path) = dotenv_path(override_dir) else {
        return Ok(HashMap::new());
    };
    let iter = ::dotenv::from_path_iter(&path).map_err(|e| LoadError::Dotenv {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    iter.map(|item| {
        item.map_err(|e| LoadError::Dotenv {
            path: path.clone(),
            reason: e.to_string(),
        })
    })
    .collect()
}
