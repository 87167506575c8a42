// Configuration for the command-line front end

use crate::kv::{FileKv, KvStore, validate_key};
use crate::sqlite::SqliteKv;
use crate::store::DEFAULT_KEY;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Optional config file looked up inside the store directory
pub const CONFIG_FILE: &str = "tasklist.yml";

/// Database file name used by the SQLite backend
pub const DB_FILE: &str = "tasklist.db";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    File,
    Sqlite,
}

impl FromStr for Backend {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Backend::File),
            "sqlite" => Ok(Backend::Sqlite),
            other => Err(eyre!("Unknown backend: {} (expected file or sqlite)", other)),
        }
    }
}

/// Values read from `tasklist.yml`; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub backend: Option<Backend>,
    pub key: Option<String>,
}

impl ConfigFile {
    /// Read the config file in `dir`, empty if there is none
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        let file: ConfigFile =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

        debug!(path = ?path, ?file, "Loaded config file");
        Ok(file)
    }
}

/// Resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
    pub backend: Backend,
    pub key: String,
}

impl Config {
    /// Default store directory: `<data dir>/tasklist`, or `./.tasklist`
    pub fn default_store_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("tasklist"))
            .unwrap_or_else(|| PathBuf::from(".tasklist"))
    }

    /// Layer defaults, the config file, then explicit overrides
    pub fn resolve(store_path: Option<PathBuf>, backend: Option<Backend>, key: Option<String>) -> Result<Self> {
        let store_path = store_path.unwrap_or_else(Self::default_store_path);
        let file = ConfigFile::load(&store_path)?;

        let config = Self {
            backend: backend.or(file.backend).unwrap_or_default(),
            key: key.or(file.key).unwrap_or_else(|| DEFAULT_KEY.to_string()),
            store_path,
        };

        validate_key(&config.key)?;
        Ok(config)
    }

    /// Open the configured storage backend
    pub fn open_kv(&self) -> Result<Box<dyn KvStore>> {
        let kv: Box<dyn KvStore> = match self.backend {
            Backend::File => Box::new(FileKv::open(&self.store_path)?),
            Backend::Sqlite => Box::new(SqliteKv::open(self.store_path.join(DB_FILE))?),
        };
        Ok(kv)
    }
}
