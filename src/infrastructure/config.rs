use crate::application::services::AliasSource;
use crate::domain::entities::AliasEntry;
use crate::domain::errors::AppError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

const DEFAULT_ALIAS: &str = "httpbin";
const DEFAULT_URL: &str = "https://httpbin.dev/anything";

/// One alias as written in `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasConfig {
    pub url: String,
    #[serde(rename = "defaultHeaders", default)]
    pub default_headers: HashMap<String, String>,
}

/// On-disk format: alias name to its settings.
pub type ConfigFile = BTreeMap<String, AliasConfig>;

/// Alias configuration backed by a JSON file.
///
/// The file is created with a single `httpbin` entry the first time it is
/// read, so a fresh install works out of the box.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.config/ashttp/config.json`
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("ashttp")
            .join("config.json")
    }

    /// Reads every alias from the file, creating the default file first if needed.
    pub fn load(&self) -> Result<HashMap<String, AliasEntry>, AppError> {
        self.ensure_exists()?;

        let data = fs::read_to_string(&self.path).map_err(|source| AppError::ConfigRead {
            path: self.path.clone(),
            source,
        })?;
        let file: ConfigFile =
            serde_json::from_str(&data).map_err(|source| AppError::ConfigParse {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), aliases = file.len(), "loaded config");
        Ok(into_entries(file))
    }

    fn ensure_exists(&self) -> Result<(), AppError> {
        if self.path.exists() {
            return Ok(());
        }
        self.write_default()
    }

    /// Writes the default file through a sibling temp file that is moved into
    /// place without replacing an existing file, so readers never see a
    /// partial config.
    fn write_default(&self) -> Result<(), AppError> {
        let write_err = |source| AppError::ConfigWrite {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(write_err)?;

        let data = serde_json::to_string_pretty(&default_config())
            .map_err(|e| write_err(std::io::Error::other(e)))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(data.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;

        match tmp.persist_noclobber(&self.path) {
            Ok(_) => {
                info!(path = %self.path.display(), "created default config");
                Ok(())
            }
            // Another invocation created it first.
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(write_err(e.error)),
        }
    }
}

impl AliasSource for ConfigStore {
    fn resolve(&self, alias: &str) -> Result<AliasEntry, AppError> {
        self.load()?
            .remove(alias)
            .ok_or_else(|| AppError::AliasNotFound {
                alias: alias.to_string(),
                path: self.path.clone(),
            })
    }
}

pub fn default_config() -> ConfigFile {
    BTreeMap::from([(
        DEFAULT_ALIAS.to_string(),
        AliasConfig {
            url: DEFAULT_URL.to_string(),
            default_headers: HashMap::from([("authorization".to_string(), "123".to_string())]),
        },
    )])
}

fn into_entries(file: ConfigFile) -> HashMap<String, AliasEntry> {
    file.into_iter()
        .map(|(alias, config)| {
            let entry = AliasEntry {
                alias: alias.clone(),
                base_url: config.url,
                default_headers: config.default_headers,
            };
            (alias, entry)
        })
        .collect()
}
