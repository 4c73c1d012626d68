use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CloseoutError, Result};
use crate::taxonomy::MatchPolicy;

/// Run configuration. Loaded once at startup and passed explicitly into the
/// pipeline; nothing below the CLI layer reads it from disk or globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub company_code: String,
    /// Fiscal period being closed, "YYYY.MM".
    pub period: String,
    pub data_dir: String,
    #[serde(default)]
    pub match_policy: MatchPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            company_code: "1000".to_string(),
            period: current_period(),
            data_dir: default_data_dir().to_string_lossy().to_string(),
            match_policy: MatchPolicy::default(),
        }
    }
}

impl Settings {
    pub fn input_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("input")
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("output")
    }

    pub fn temp_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("temp")
    }

    /// Default location of the extracted trial balance for the period.
    pub fn trial_balance_path(&self) -> PathBuf {
        self.temp_dir()
            .join(format!("trial_balance_{}.csv", self.period))
    }
}

pub fn current_period() -> String {
    chrono::Local::now().format("%Y.%m").to_string()
}

/// Period strings are "YYYY.MM" with a real month number.
pub fn validate_period(period: &str) -> Result<()> {
    let re = regex::Regex::new(r"^\d{4}\.(0[1-9]|1[0-2])$").unwrap();
    if re.is_match(period) {
        Ok(())
    } else {
        Err(CloseoutError::Settings(format!(
            "invalid period '{period}' (expected YYYY.MM)"
        )))
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("closeout")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("closeout")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| CloseoutError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}
