use crate::dataset::{LoadOptions, DEFAULT_DELIMITER};
use crate::model::RegressionKind;
use crate::plot::{PLOT_HEIGHT, PLOT_WIDTH};
use crate::split::{DEFAULT_SEED, DEFAULT_TEST_RATIO};

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "regrs_settings.json";

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("could not read settings {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not write settings {}: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("test_ratio must be between 0 and 1, got {0}")]
    TestRatio(f64),
    #[error("delimiter must be a single ASCII character, got {0:?}")]
    Delimiter(char),
    #[error("plot size must be non-zero")]
    PlotSize,
}

/// Knobs of the train/score workflow, stored as JSON next to the binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowSettings {
    pub test_ratio: f64,
    pub seed: u64,
    pub delimiter: char,
    pub kind: RegressionKind,
    pub plot_width: u32,
    pub plot_height: u32,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            test_ratio: DEFAULT_TEST_RATIO,
            seed: DEFAULT_SEED,
            delimiter: DEFAULT_DELIMITER as char,
            kind: RegressionKind::default(),
            plot_width: PLOT_WIDTH,
            plot_height: PLOT_HEIGHT,
        }
    }
}

impl WorkflowSettings {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| SettingsError::Read { path: path.to_path_buf(), source })?;
        let parsed: Self = serde_json::from_str(&content)?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Reads `path` when it exists, otherwise falls back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            },
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        let mut file = fs::File::create(path)
            .map_err(|source| SettingsError::Write { path: path.to_path_buf(), source })?;
        file.write_all(json.as_bytes())
            .map_err(|source| SettingsError::Write { path: path.to_path_buf(), source })?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(SettingsError::TestRatio(self.test_ratio));
        }
        if !self.delimiter.is_ascii() {
            return Err(SettingsError::Delimiter(self.delimiter));
        }
        if self.plot_width == 0 || self.plot_height == 0 {
            return Err(SettingsError::PlotSize);
        }
        Ok(())
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions { delimiter: self.delimiter as u8 }
    }
}
