use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::catalog::{WizardConfig, WizardVariant};
use crate::errors::PlannerError;
use crate::submission::DEFAULT_SUBMIT_PATH;
use crate::utils::{app_data_dir, ensure_dir};

pub const CONFIG_FILE: &str = "config.json";
pub const API_URL_ENV: &str = "TRIP_PLANNER_API_URL";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub submit_path: String,
    pub timeout_secs: u64,
    pub variant: WizardVariant,
    /// JSON `WizardConfig` used instead of the variant preset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_desired_experiences: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            submit_path: DEFAULT_SUBMIT_PATH.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            variant: WizardVariant::default(),
            catalog_file: None,
            require_desired_experiences: None,
        }
    }
}

impl Config {
    /// Replaces the API base URL when an override is given and non-blank.
    pub fn apply_api_url_override(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url {
            let url = url.trim();
            if !url.is_empty() {
                self.api_base_url = url.to_string();
            }
        }
    }

    /// Builds the catalogs and rules the wizard runs with.
    pub fn wizard_config(&self) -> Result<WizardConfig, PlannerError> {
        let mut wizard = match &self.catalog_file {
            Some(path) => WizardConfig::from_path(path)?,
            None => WizardConfig::for_variant(self.variant),
        };
        if let Some(required) = self.require_desired_experiences {
            wizard.rules.require_desired_experiences = required;
        }
        Ok(wizard)
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, PlannerError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, PlannerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Reads the stored config (defaults when absent) and applies the
    /// `TRIP_PLANNER_API_URL` override.
    pub fn load(&self) -> Result<Config, PlannerError> {
        let mut config = self.load_stored()?;
        config.apply_api_url_override(env::var(API_URL_ENV).ok());
        Ok(config)
    }

    pub fn load_stored(&self) -> Result<Config, PlannerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), PlannerError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension(TMP_SUFFIX);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), PlannerError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
