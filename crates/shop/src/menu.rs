//! Menu catalog.
//!
//! The menu is read from YAML, either the built-in `menu.yaml` or a file
//! named by `GWD_MENU_PATH`. Items marked `customizable` take a spice level
//! and notes when added; the rest are added as a single default unit.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use grizzly_core::{ItemDraft, NewItem, Price};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

const BUILTIN_MENU: &str = include_str!("../menu.yaml");

/// Errors loading or validating a menu.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Failed to read menu {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid menu YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Menu has no items")]
    Empty,

    #[error("Duplicate menu slug: {0}")]
    DuplicateSlug(String),

    #[error("Menu item {0} has an empty name")]
    EmptyName(String),
}

/// A dish or drink on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Short handle used in commands (e.g. `beef-samosa`).
    pub slug: String,
    /// Display name written into the cart and the order.
    pub name: String,
    /// Unit price in whole shillings.
    pub price: Price,
    /// Whether spice level and notes can be chosen.
    #[serde(default)]
    pub customizable: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl MenuItem {
    /// Start a draft for this item at quantity 1.
    #[must_use]
    pub fn draft(&self) -> ItemDraft {
        ItemDraft::new(self.name.clone(), self.price)
    }

    /// One unit with default customization.
    #[must_use]
    pub fn simple(&self) -> NewItem {
        NewItem::simple(self.name.clone(), self.price)
    }
}

/// The full menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub items: Vec<MenuItem>,
}

impl Menu {
    /// Parse and validate a menu from YAML.
    ///
    /// # Errors
    ///
    /// Returns `MenuError` if the YAML is malformed or fails validation.
    pub fn from_yaml(content: &str) -> Result<Self, MenuError> {
        let menu: Self = serde_yaml::from_str(content)?;
        menu.validate()?;
        Ok(menu)
    }

    /// The menu compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `MenuError` if the built-in menu is invalid.
    pub fn builtin() -> Result<Self, MenuError> {
        Self::from_yaml(BUILTIN_MENU)
    }

    /// Load the menu from `path`, or the built-in menu when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `MenuError` if the file cannot be read or is invalid.
    pub async fn load(path: Option<&Path>) -> Result<Self, MenuError> {
        let Some(path) = path else {
            let menu = Self::builtin()?;
            info!(items = menu.items.len(), "Loaded built-in menu");
            return Ok(menu);
        };

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| MenuError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let menu = Self::from_yaml(&content)?;
        info!(path = %path.display(), items = menu.items.len(), "Loaded menu");
        Ok(menu)
    }

    fn validate(&self) -> Result<(), MenuError> {
        if self.items.is_empty() {
            return Err(MenuError::Empty);
        }
        let mut seen = HashSet::new();
        for item in &self.items {
            if item.name.trim().is_empty() {
                return Err(MenuError::EmptyName(item.slug.clone()));
            }
            if !seen.insert(item.slug.to_ascii_lowercase()) {
                return Err(MenuError::DuplicateSlug(item.slug.clone()));
            }
        }
        Ok(())
    }

    /// Look up an item by slug, ignoring case.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<&MenuItem> {
        self.items
            .iter()
            .find(|item| item.slug.eq_ignore_ascii_case(slug.trim()))
    }
}
