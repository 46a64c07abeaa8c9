//! Session preferences - persisted between runs as a JSON file

use crate::view::{CategoryFilter, SortRule, ViewState};
use serde::{Deserialize, Serialize};
use shared::Language;
use std::fs;
use std::path::{Path, PathBuf};

/// Values remembered across sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionPrefs {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
    pub language: Language,
    pub category: CategoryFilter,
    pub sort: SortRule,
}

impl SessionPrefs {
    pub fn view_state(&self) -> ViewState {
        ViewState {
            category: self.category.clone(),
            language: self.language,
            sort: self.sort,
        }
    }
}

/// Session file storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        let path = base_path.into().join(filename);
        Self { path }
    }

    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, prefs: &SessionPrefs) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, json)
    }

    /// Saved preferences, or defaults when the file is missing or unreadable
    pub fn load(&self) -> SessionPrefs {
        if !self.path.exists() {
            return SessionPrefs::default();
        }
        match fs::read_to_string(&self.path)
            .map_err(|e| e.to_string())
            .and_then(|json| serde_json::from_str(&json).map_err(|e| e.to_string()))
        {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Ignoring session file: {}", e);
                SessionPrefs::default()
            }
        }
    }

    /// Load, apply `change`, save
    pub fn update(&self, change: impl FnOnce(&mut SessionPrefs)) -> std::io::Result<SessionPrefs> {
        let mut prefs = self.load();
        change(&mut prefs);
        self.save(&prefs)?;
        Ok(prefs)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
