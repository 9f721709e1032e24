//! Per-item customization: spice level and free-text notes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a spice level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpiceLevelError {
    #[error("unknown spice level: {0} (expected mild, medium, hot or extra-hot)")]
    Unknown(String),
}

/// How spicy the kitchen should make an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SpiceLevel {
    #[default]
    Mild,
    Medium,
    Hot,
    ExtraHot,
}

impl SpiceLevel {
    /// The option value used by the UI.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Medium => "medium",
            Self::Hot => "hot",
            Self::ExtraHot => "extra-hot",
        }
    }

    /// Whether this is the default level, which order documents omit.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Mild)
    }
}

impl fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpiceLevel {
    type Err = SpiceLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mild" => Ok(Self::Mild),
            "medium" => Ok(Self::Medium),
            "hot" => Ok(Self::Hot),
            "extra-hot" | "extra_hot" | "extrahot" => Ok(Self::ExtraHot),
            _ => Err(SpiceLevelError::Unknown(s.to_string())),
        }
    }
}

/// Customization chosen for a line item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Customization {
    spice_level: SpiceLevel,
    notes: String,
}

impl Customization {
    /// Create a customization. Surrounding whitespace in `notes` is dropped.
    #[must_use]
    pub fn new(spice_level: SpiceLevel, notes: impl Into<String>) -> Self {
        let notes: String = notes.into();
        Self {
            spice_level,
            notes: notes.trim().to_string(),
        }
    }

    #[must_use]
    pub const fn spice_level(&self) -> SpiceLevel {
        self.spice_level
    }

    /// Special notes for the kitchen, empty when none were given.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// The spice level, if it differs from the default.
    #[must_use]
    pub const fn non_default_spice(&self) -> Option<SpiceLevel> {
        if self.spice_level.is_default() {
            None
        } else {
            Some(self.spice_level)
        }
    }

    /// The notes, if any were given.
    #[must_use]
    pub fn non_empty_notes(&self) -> Option<&str> {
        if self.notes.is_empty() {
            None
        } else {
            Some(&self.notes)
        }
    }
}
