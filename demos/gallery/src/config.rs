//! Gallery configuration: keybindings, dropdown settings and item files
//!
//! The config file is TOML and every section is optional:
//!
//! ```toml
//! [keybindings.global]
//! quit = ["ctrl+q", "ctrl+c"]
//!
//! [keybindings.dialog]
//! confirm = ["y"]
//!
//! [dropdown]
//! max_visible_rows = 8
//! enable_select_all = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tui_controls::components::TooltipPosition;
use tui_controls::{BindingContext, Item, Keybindings};

/// Keybinding contexts of the gallery
#[derive(BindingContext, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GalleryContext {
    Form,
    Dialog,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings applied to every dropdown in the form
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DropdownSettings {
    pub max_visible_rows: usize,
    pub searchable: bool,
    pub add_option: bool,
    pub enable_select_all: bool,
    pub tooltip_position: TooltipPosition,
}

impl Default for DropdownSettings {
    fn default() -> Self {
        Self {
            max_visible_rows: 6,
            searchable: true,
            add_option: true,
            enable_select_all: true,
            tooltip_position: TooltipPosition::Top,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Merged over [`default_keybindings`]
    pub keybindings: Keybindings<GalleryContext>,
    pub dropdown: DropdownSettings,
}

impl GalleryConfig {
    /// Parse a config from TOML text
    pub fn from_toml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        let mut config: GalleryConfig = toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.keybindings = default_keybindings().merged(config.keybindings);
        Ok(config)
    }

    /// Defaults with the built-in keybindings
    pub fn builtin() -> Self {
        Self {
            keybindings: default_keybindings(),
            dropdown: DropdownSettings::default(),
        }
    }
}

/// `$XDG_CONFIG_HOME/tui-controls/gallery.toml` or the platform equivalent
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tui-controls").join("gallery.toml"))
}

/// Load the config from `path`, or from the default location when `None`
///
/// A missing file at the default location is not an error.
pub fn load_config(path: Option<&Path>) -> Result<GalleryConfig, ConfigError> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => return Ok(GalleryConfig::builtin()),
        },
    };

    if !required && !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(GalleryConfig::builtin());
    }

    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config = GalleryConfig::from_toml(&path, &text)?;
    tracing::info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Load dropdown items from a JSON array
pub fn load_items(path: &Path) -> Result<Vec<Item<u32>>, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn default_keybindings() -> Keybindings<GalleryContext> {
    let mut bindings = Keybindings::new();
    bindings.add_global("quit", vec!["ctrl+q".into(), "ctrl+c".into()]);
    bindings.add_global("focus_next", vec!["tab".into()]);
    bindings.add_global("focus_prev", vec!["shift+tab".into()]);
    bindings.add(GalleryContext::Form, "submit", vec!["ctrl+s".into()]);
    bindings.add(GalleryContext::Dialog, "confirm", vec!["y".into()]);
    bindings.add(GalleryContext::Dialog, "cancel", vec!["n".into(), "esc".into()]);
    bindings
}

/// Items used when no item file is given
pub fn builtin_countries() -> Vec<Item<u32>> {
    vec![
        Item::group("Europe", 0),
        Item::new("France", 33).with_logo("FR"),
        Item::new("Germany", 49).with_logo("DE"),
        Item::new("Italy", 39).with_logo("IT"),
        Item::new("Spain", 34).with_logo("ES"),
        Item::group("Asia", 1),
        Item::new("India", 91).with_logo("IN"),
        Item::new("Japan", 81).with_logo("JP"),
        Item::group("Americas", 2),
        Item::new("Brazil", 55).with_logo("BR"),
        Item::new("Canada", 1001).with_logo("CA"),
        Item::new("Mexico", 52).with_logo("MX"),
    ]
}
