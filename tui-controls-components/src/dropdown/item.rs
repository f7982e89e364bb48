//! Option items and the payloads the dropdown reports to its host

use serde::{Deserialize, Serialize};

/// One entry of the options list
///
/// `value` is the selection key and is compared with `PartialEq`. Group
/// labels partition the list and can never be selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item<V> {
    /// Short prefix shown before the text (an emoji or a tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Display text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Selection key
    pub value: V,
    /// Non-selectable separator
    #[serde(default)]
    pub is_group_label: bool,
}

impl<V> Item<V> {
    /// A selectable item
    pub fn new(text: impl Into<String>, value: V) -> Self {
        Self {
            logo: None,
            text: Some(text.into()),
            value,
            is_group_label: false,
        }
    }

    /// A group label
    pub fn group(text: impl Into<String>, value: V) -> Self {
        Self {
            is_group_label: true,
            ..Self::new(text, value)
        }
    }

    /// Add a logo prefix
    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Display text, empty when unset
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Whether this item can be selected
    pub fn is_selectable(&self) -> bool {
        !self.is_group_label
    }
}

/// Selection reported through `on_change`, also used as mount value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DropdownValue<V> {
    Single(V),
    Multiple(Vec<V>),
}

impl<V> DropdownValue<V> {
    /// The values as a slice (one element for `Single`)
    pub fn as_slice(&self) -> &[V] {
        match self {
            DropdownValue::Single(value) => std::slice::from_ref(value),
            DropdownValue::Multiple(values) => values,
        }
    }
}

/// Payload of `on_search_input_change`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInput {
    /// Id of the dropdown that changed
    pub id: String,
    /// Current search text
    pub text: String,
}

/// Scroll position of the options panel, passed to `on_scroll`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    /// Index of the first visible row
    pub offset: usize,
    /// Rows that fit in the panel
    pub visible: usize,
    /// Total rows
    pub total: usize,
}

impl ScrollMetrics {
    /// Whether the last row is visible
    pub fn at_end(&self) -> bool {
        self.offset + self.visible >= self.total
    }
}
