//! Preferences
//!
//! Process-wide display preferences, loaded once at start up and written back
//! whenever they change.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::language::Language;

/// Preference Store Errors
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// IO error reading or writing the preferences file
    #[error("Failed to access preferences file: {0}")]
    Io(#[from] io::Error),

    /// YAML error
    #[error("Failed to parse preferences: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    Light,

    /// Dark theme
    #[default]
    Dark,
}

/// Display preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Display language
    pub language: Language,

    /// Colour theme
    pub theme: Theme,
}

/// Storage for [`Preferences`].
pub trait PreferencesStore {
    /// Load stored preferences, or the defaults when none are stored.
    ///
    /// # Errors
    ///
    /// Returns an error when stored preferences cannot be read.
    fn load(&self) -> Result<Preferences, PreferencesError>;

    /// Store preferences.
    ///
    /// # Errors
    ///
    /// Returns an error when the preferences cannot be written.
    fn save(&self, preferences: &Preferences) -> Result<(), PreferencesError>;
}

/// Preferences stored as YAML in a file.
#[derive(Debug, Clone)]
pub struct FilePreferencesStore {
    path: PathBuf,
}

impl FilePreferencesStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferencesStore for FilePreferencesStore {
    fn load(&self) -> Result<Preferences, PreferencesError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_norway::from_str(&contents)?),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Preferences::default()),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&self, preferences: &Preferences) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_norway::to_string(preferences)?)?;

        Ok(())
    }
}

/// Loaded preferences that write through to their store on change.
#[derive(Debug)]
pub struct PreferencesHandle<S> {
    store: S,
    current: Preferences,
}

impl<S: PreferencesStore> PreferencesHandle<S> {
    /// Load preferences from the store.
    ///
    /// # Errors
    ///
    /// Returns an error when stored preferences cannot be read.
    pub fn load(store: S) -> Result<Self, PreferencesError> {
        let current = store.load()?;

        Ok(Self { store, current })
    }

    /// Current preferences.
    pub fn get(&self) -> Preferences {
        self.current
    }

    /// Change the language, writing to the store when it differs.
    ///
    /// # Errors
    ///
    /// Returns an error when the preferences cannot be written.
    pub fn set_language(&mut self, language: Language) -> Result<(), PreferencesError> {
        self.update(Preferences {
            language,
            ..self.current
        })
    }

    /// Change the theme, writing to the store when it differs.
    ///
    /// # Errors
    ///
    /// Returns an error when the preferences cannot be written.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), PreferencesError> {
        self.update(Preferences {
            theme,
            ..self.current
        })
    }

    fn update(&mut self, next: Preferences) -> Result<(), PreferencesError> {
        if next == self.current {
            return Ok(());
        }

        self.store.save(&next)?;
        self.current = next;

        Ok(())
    }
}
