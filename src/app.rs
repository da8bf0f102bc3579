use crate::error::QsResult;
use crate::selection::DEFAULT_UNKNOWN_LABEL;
use crate::storage::SqliteStore;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum ComposerBackend {
    /// Hand an `sms:` URI to the desktop's handler.
    #[default]
    #[serde(rename = "sms-uri")]
    SmsUri,
    /// Send through a BlueBubbles server.
    #[serde(rename = "bluebubbles")]
    BlueBubbles,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub base_url: String,
    pub password: String,
    pub composer: ComposerBackend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
    pub log_level: String,
    pub unknown_contact_label: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            password: String::new(),
            composer: ComposerBackend::default(),
            database_path: None,
            log_level: "info".to_string(),
            unknown_contact_label: DEFAULT_UNKNOWN_LABEL.to_string(),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("quicksms.toml"))
    }

    /// Load from the default location, writing a default file on first run
    /// so there is something to edit. Any problem yields defaults.
    pub fn load_or_init() -> Self {
        match Self::toml_path() {
            Some(path) => Self::load_or_init_from(&path),
            None => Self::new(),
        }
    }

    pub fn load_or_init_from(path: &Path) -> Self {
        if path.exists() {
            return Self::load_from(path);
        }
        let state = Self::new();
        match state.save_to(path) {
            Ok(()) => log::info!("wrote default config to {}", path.display()),
            Err(e) => log::warn!("could not write default config {}: {}", path.display(), e),
        }
        state
    }

    pub fn load_from(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return Self::new(),
        };
        match toml::from_str::<AppState>(&text) {
            Ok(mut state) => {
                if !state.base_url.is_empty() {
                    state.base_url = crate::utils::normalize_url(&state.base_url);
                }
                state
            }
            Err(e) => {
                log::warn!("ignoring unreadable config {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> QsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml = toml::to_string_pretty(self)?;
        fs::write(path, toml)?;
        Ok(())
    }

    pub fn server_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.password.is_empty()
    }

    /// The storage slot at the configured path, or the platform default.
    pub fn open_slot(&self) -> QsResult<SqliteStore> {
        match &self.database_path {
            Some(path) => SqliteStore::open(path),
            None => SqliteStore::open_default(),
        }
    }
}
