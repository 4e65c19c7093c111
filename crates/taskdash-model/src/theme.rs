use std::fmt;

use tracing::warn;

use crate::storage::{KeyValueStore, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Absent means dark; any stored value other than `"dark"` means light.
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            None | Some("dark") => Self::Dark,
            Some(_) => Self::Light,
        }
    }

    pub fn load<S: KeyValueStore + ?Sized>(storage: &S) -> Self {
        match storage.get(THEME_KEY) {
            Ok(raw) => Self::from_stored(raw.as_deref()),
            Err(err) => {
                warn!(error = %err, "failed to read theme; using dark");
                Self::Dark
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(self, storage: &mut S) {
        if let Err(err) = storage.set(THEME_KEY, self.as_str()) {
            warn!(error = %err, theme = self.as_str(), "failed to persist theme");
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
