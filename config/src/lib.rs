//! Configuration store for notesmith.
//!
//! The store is a TOML file at `~/.notesmith/config.toml` (or `$NOTESMITH_CONFIG`):
//!
//! ```toml
//! [gemini]
//! api_key = "${GEMINI_API_KEY}"
//! model = "gemini-2.5-flash-preview-04-17"
//! ```
//!
//! It is read once at startup and resolved into a [`GenerationCredential`],
//! which callers hand to each request explicitly. Writes go through
//! `toml_edit` so user comments and formatting survive.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fmt, fs, io};
use thiserror::Error;

use notesmith_types::{ApiKey, GeminiModel, GenerationCredential};
use notesmith_utils::{AtomicWriteOptions, FileSyncPolicy, ParentDirSyncPolicy, PersistMode};

/// Overrides the config file location.
pub const CONFIG_PATH_ENV_VAR: &str = "NOTESMITH_CONFIG";
/// Fallback source for the API key when the config file has none.
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Default, Deserialize)]
pub struct NotesmithConfig {
    pub gemini: Option<GeminiConfig>,
}

#[derive(Default, Deserialize)]
pub struct GeminiConfig {
    /// Literal key or `${ENV_VAR}` reference.
    pub api_key: Option<String>,
    /// Full model id or alias (`flash`, `pro`).
    pub model: Option<String>,
}

// Manual Debug impl to prevent leaking API keys in logs.
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.api_key.is_some() {
            "[REDACTED]"
        } else {
            "None"
        };
        f.debug_struct("GeminiConfig")
            .field("api_key", &key)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to write config at {}: {source}", path.display())]
    Persist { path: PathBuf, source: io::Error },
    #[error("could not determine config path (no home directory)")]
    NoPath,
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Persist { path, .. } => Some(path),
            ConfigError::NoPath => None,
        }
    }
}

pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Pick the effective key: the config value (after `${}` expansion) when it is
/// non-blank, otherwise the environment fallback, otherwise empty.
fn resolve_api_key(config_value: Option<&str>, env_value: Option<String>) -> ApiKey {
    let from_config = config_value
        .map(expand_env_vars)
        .filter(|value| !value.trim().is_empty());
    let from_env = env_value.filter(|value| !value.trim().is_empty());
    ApiKey::new(from_config.or(from_env).unwrap_or_default())
}

fn resolve_model(raw: Option<&str>) -> GeminiModel {
    let Some(raw) = raw else {
        return GeminiModel::default();
    };
    match GeminiModel::parse(raw) {
        Ok(model) => model,
        Err(err) => {
            tracing::warn!(%err, "Unknown model in config; using {}", GeminiModel::default());
            GeminiModel::default()
        }
    }
}

impl NotesmithConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn model(&self) -> GeminiModel {
        resolve_model(self.gemini.as_ref().and_then(|g| g.model.as_deref()))
    }

    /// Resolve the credential, consulting `GEMINI_API_KEY` when the file has no key.
    #[must_use]
    pub fn credential(&self) -> GenerationCredential {
        let config_key = self.gemini.as_ref().and_then(|g| g.api_key.as_deref());
        GenerationCredential::new(
            resolve_api_key(config_key, env::var(API_KEY_ENV_VAR).ok()),
            self.model(),
        )
    }

    /// Credential for an optional config; a missing file behaves like an empty one.
    #[must_use]
    pub fn resolve(config: Option<&Self>) -> GenerationCredential {
        match config {
            Some(config) => config.credential(),
            None => Self::default().credential(),
        }
    }

    pub fn persist_api_key(key: &str) -> Result<PathBuf, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoPath)?;
        persist_gemini_value(&path, "api_key", key)?;
        Ok(path)
    }

    pub fn persist_model(model: GeminiModel) -> Result<PathBuf, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoPath)?;
        persist_gemini_value(&path, "model", model.model_id())?;
        Ok(path)
    }
}

/// Set `[gemini].<key> = value` in the file at `path`.
///
/// Creates the file and parent directory if they don't exist. The parent
/// directory and file are restricted to the owner on Unix.
pub fn persist_gemini_value(path: &Path, key: &str, value: &str) -> Result<(), ConfigError> {
    let persist_err = |source: io::Error| ConfigError::Persist {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(persist_err)?;
        restrict_dir_permissions(parent).map_err(persist_err)?;
    }

    let content = if path.exists() {
        fs::read_to_string(path).map_err(persist_err)?
    } else {
        String::new()
    };

    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| persist_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    if !doc.contains_key("gemini") {
        doc["gemini"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    let Some(gemini) = doc
        .get_mut("gemini")
        .and_then(toml_edit::Item::as_table_like_mut)
    else {
        return Err(persist_err(io::Error::new(
            io::ErrorKind::InvalidData,
            "`gemini` is not a table",
        )));
    };
    gemini.insert(key, toml_edit::value(value));

    notesmith_utils::atomic_write_with_options(
        path,
        doc.to_string().as_bytes(),
        AtomicWriteOptions {
            file_sync: FileSyncPolicy::SyncAll,
            parent_dir_sync: ParentDirSyncPolicy::SyncBestEffort,
            mode: PersistMode::SensitiveOwnerOnly,
        },
    )
    .map_err(persist_err)?;

    tracing::info!(path = %path.display(), key, "Persisted config value");
    Ok(())
}

#[cfg(unix)]
fn restrict_dir_permissions(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::{MetadataExt, PermissionsExt};
    let metadata = fs::metadata(dir)?;
    // Only modify permissions if we own the directory
    let our_uid = unsafe { libc::getuid() };
    if metadata.uid() == our_uid {
        let mode = metadata.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
        }
    }
    Ok(())
}

#[cfg(not(unix))]
fn restrict_dir_permissions(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_PATH_ENV_VAR).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".notesmith").join("config.toml"))
}
