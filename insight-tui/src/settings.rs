//! User settings from `<config_dir>/settings.json`.
//!
//! Every field has a default, so a missing file or a partial one is fine.
//! Command-line flags override what is loaded here.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use insight_ui::speech::DEFAULT_PROGRAM;
use insight_ui::{CommandEngine, Lang};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;

use crate::error::AppError;
use crate::paths;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub lang: Lang,
    pub reduced_motion: bool,
    pub speech: SpeechSettings,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    pub enabled: bool,
    pub program: String,
    /// Voice passed to the program per language. Unlisted languages use
    /// the language code.
    pub voices: HashMap<Lang, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lang: Lang::default(),
            reduced_motion: false,
            speech: SpeechSettings::default(),
            log_level: "debug".to_string(),
        }
    }
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            program: DEFAULT_PROGRAM.to_string(),
            voices: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load from the platform config directory, or defaults when there is none.
    pub fn load_default() -> Result<Self, AppError> {
        match paths::settings_file() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| AppError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Configured log level, `Debug` when unrecognised.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Debug)
    }
}

impl SpeechSettings {
    pub fn engine(&self) -> CommandEngine {
        CommandEngine::new(&self.program).voices(self.voices.clone())
    }
}
