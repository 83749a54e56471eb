use crate::core::comparator::ComparePolicy;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: String,
    /// Policy used by `sales today` when `--policy` is not given.
    pub compare_policy: ComparePolicy,
    /// Employer social security rate applied to gross payroll.
    pub social_security_rate: f64,
    pub apply_social_security: bool,
    pub currency: String,
    pub separator_char: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            compare_policy: ComparePolicy::IsoWeek,
            social_security_rate: 0.33,
            apply_social_security: true,
            currency: "€".to_string(),
            separator_char: "-".to_string(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("oyken")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".oyken")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("oyken.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("oyken.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;
        let cfg: Config = serde_yaml::from_str(&content)?;

        if !(0.0..=1.0).contains(&cfg.social_security_rate) {
            return Err(AppError::Config(format!(
                "social_security_rate must be between 0 and 1 (got {})",
                cfg.social_security_rate
            )));
        }

        Ok(cfg)
    }

    /// Effective employer social security rate.
    pub fn ss_rate(&self) -> f64 {
        if self.apply_social_security {
            self.social_security_rate
        } else {
            0.0
        }
    }

    /// Character used to draw table separator lines.
    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Initialize configuration and database files.
    ///
    /// In test mode the configuration file is left untouched.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();

        let db_path = match custom_name {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
