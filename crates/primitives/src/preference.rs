//! PreferenceStore: the persisted display theme
//!
//! The theme is stored as bare text (`light` or `dark`) under `theme` in the
//! persistent namespace. Anything else found there reads back as the default,
//! `light`.
//!
//! ## State Machine
//!
//! [`ThemeState`] has two states, `Light` and `Dark`. `toggle` flips between
//! them; there is no terminal state. The initial state is whatever
//! [`PreferenceStore::load_preference`] returns at startup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use sitestate_core::{keys, Error};

use crate::store::{Outcome, StoreAdapter};

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme (default)
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl Theme {
    /// Stored text for this theme
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::invalid_input(format!("unknown theme '{}'", other))),
        }
    }
}

/// Theme currently applied by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeState {
    current: Theme,
}

impl ThemeState {
    /// Start in `initial`
    pub fn new(initial: Theme) -> Self {
        Self { current: initial }
    }

    /// The applied theme
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme and return the new one
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.current
    }
}

/// Persisted theme preference
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    store: StoreAdapter,
}

impl PreferenceStore {
    /// Keep the preference in `store` (the persistent namespace)
    pub fn new(store: StoreAdapter) -> Self {
        Self { store }
    }

    /// The saved theme, or `Light` if none is saved or it is not recognised
    pub fn load_preference(&self) -> Theme {
        match self.store.load_text(keys::THEME).into_value() {
            Some(text) => text.parse().unwrap_or_else(|e: Error| {
                warn!(target: "sitestate::preference", error = %e, "Ignoring saved theme");
                Theme::default()
            }),
            None => Theme::default(),
        }
    }

    /// Persist `theme`
    pub fn set_preference(&self, theme: Theme) -> Outcome<bool> {
        self.store.save_text(keys::THEME, theme.as_str())
    }

    /// Flip the `applied` theme, persist the result and return it
    ///
    /// The new theme is returned even if persisting it failed, so the
    /// presentation layer can still apply it for this page.
    pub fn toggle(&self, applied: Theme) -> Outcome<Theme> {
        let next = applied.toggled();
        let saved = self.set_preference(next);
        info!(target: "sitestate::preference", theme = %next, "Theme changed");
        saved.map(|_| next)
    }
}
