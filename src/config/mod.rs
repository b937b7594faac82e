use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod layout;
pub mod profile;

pub use layout::DataLayout;
pub use profile::FieldProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_dir: String,
    #[serde(default = "default_live_file_name")]
    pub live_file_name: String,
    #[serde(default)]
    pub compress_backups: bool,
    #[serde(default)]
    pub fields: FieldProfile,
}

fn default_live_file_name() -> String {
    "Stakeholder_Live_Clean.csv".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir().to_string_lossy().to_string(),
            live_file_name: default_live_file_name(),
            compress_backups: false,
            fields: FieldProfile::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("stakesync")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".stakesync")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("stakesync.conf")
    }

    /// Return the default data directory
    pub fn default_data_dir() -> PathBuf {
        Self::config_dir().join("data")
    }

    /// Resolve the config file: explicit override first, standard location otherwise
    pub fn resolve_file(custom: Option<&str>) -> PathBuf {
        custom.map(expand_tilde).unwrap_or_else(Self::config_file)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Directory layout derived from `data_dir`.
    pub fn layout(&self) -> DataLayout {
        DataLayout::new(expand_tilde(&self.data_dir), &self.live_file_name)
    }

    /// Initialize configuration file and data directory tree
    pub fn init_all(
        path: &Path,
        data_dir: Option<&str>,
        profile: FieldProfile,
        is_test: bool,
    ) -> AppResult<Config> {
        let mut config = Config::load_from(path)?;
        if let Some(dir) = data_dir {
            config.data_dir = dir.to_string();
        }
        config.fields = profile;

        // Write config file
        if !is_test {
            config.save_to(path)?;
            println!("✅ Config file: {:?}", path);
        }

        let layout = config.layout();
        layout.ensure_dirs()?;
        println!("✅ Data dir:    {:?}", layout.root);

        Ok(config)
    }

    /// Problems with the configuration, empty when it is usable.
    pub fn check(&self) -> Vec<String> {
        let mut issues = self.fields.check();
        if self.data_dir.trim().is_empty() {
            issues.push("data_dir is empty".to_string());
        }
        if !self.live_file_name.to_lowercase().ends_with(".csv") {
            issues.push(format!(
                "live_file_name '{}' should be a .csv file",
                self.live_file_name
            ));
        }
        issues
    }
}
