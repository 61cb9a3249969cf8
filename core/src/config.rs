use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::selection::ManagerType;

const CONFIG_FILE_NAME: &str = "config.json";
pub const API_URL_ENV: &str = "SALESDASH_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub default_manager_type: ManagerType,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            default_manager_type: ManagerType::default(),
        }
    }
}

/// `~/.salesdash`, where the config file and logs live.
pub fn data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(".salesdash"))
}

impl Settings {
    /// Reads `config.json` from `base_dir` (default `~/.salesdash`), writing
    /// the defaults there first if it does not exist yet.
    pub fn load(base_dir: Option<PathBuf>) -> Result<Self> {
        let dir = match base_dir {
            Some(dir) => dir,
            None => data_dir()?,
        };
        fs::create_dir_all(&dir)?;
        let path = dir.join(CONFIG_FILE_NAME);

        if !path.exists() {
            let defaults = Settings::default();
            defaults.save_to(&path)?;
            return Ok(defaults);
        }

        let file = File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
        let settings: Settings = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Command-line flag beats the environment, which beats the file.
    pub fn with_overrides(
        mut self,
        env_url: Option<String>,
        flag_url: Option<String>,
        flag_timeout: Option<u64>,
    ) -> Self {
        let given = |u: &String| !u.trim().is_empty();
        if let Some(url) = flag_url.filter(given).or(env_url.filter(given)) {
            self.api_base_url = url;
        }
        if let Some(secs) = flag_timeout {
            self.timeout_secs = secs;
        }
        self
    }

    pub fn resolve(
        base_dir: Option<PathBuf>,
        flag_url: Option<String>,
        flag_timeout: Option<u64>,
    ) -> Result<Self> {
        let env_url = std::env::var(API_URL_ENV).ok();
        Ok(Self::load(base_dir)?.with_overrides(env_url, flag_url, flag_timeout))
    }
}
