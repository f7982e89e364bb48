//! Context-aware keybindings for host applications
//!
//! Bindings map command names to key strings (`"q"`, `"ctrl+p"`,
//! `"shift+tab"`). A context table is checked first, then the global table.
//! The whole structure (de)serializes as a map of context name to bindings,
//! so it can be embedded in a TOML or JSON config file.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

const GLOBAL: &str = "global";

/// A named keybinding context (e.g. "dialog", "dropdown")
///
/// Use `#[derive(BindingContext)]` from `tui-controls-macros` for enums.
pub trait BindingContext: Clone + Copy + Eq + Hash {
    /// Context name as used in config files
    fn name(&self) -> &'static str;

    /// Parse a context from its name
    fn from_name(name: &str) -> Option<Self>;

    /// Every context value
    fn all() -> &'static [Self];
}

type Table = HashMap<String, Vec<String>>;

/// Command lookup by key, with per-context overrides
#[derive(Debug, Clone)]
pub struct Keybindings<C: BindingContext> {
    global: Table,
    contexts: HashMap<C, Table>,
}

impl<C: BindingContext> Default for Keybindings<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BindingContext> Keybindings<C> {
    /// Empty bindings
    pub fn new() -> Self {
        Self {
            global: HashMap::new(),
            contexts: HashMap::new(),
        }
    }

    /// Bind `keys` to `command` in every context
    pub fn add_global(&mut self, command: impl Into<String>, keys: Vec<String>) {
        self.global.insert(command.into(), keys);
    }

    /// Bind `keys` to `command` in `context`
    pub fn add(&mut self, context: C, command: impl Into<String>, keys: Vec<String>) {
        self.contexts
            .entry(context)
            .or_default()
            .insert(command.into(), keys);
    }

    /// Command bound to `key` in `context`, falling back to global bindings
    pub fn command(&self, key: &KeyEvent, context: C) -> Option<&str> {
        self.contexts
            .get(&context)
            .and_then(|table| find_command(table, key))
            .or_else(|| find_command(&self.global, key))
    }

    /// First key string bound to `command`, for help lines
    pub fn hint(&self, command: &str, context: C) -> Option<&str> {
        self.contexts
            .get(&context)
            .and_then(|table| table.get(command))
            .or_else(|| self.global.get(command))
            .and_then(|keys| keys.first())
            .map(String::as_str)
    }

    /// Overlay `user` on top of `self`; user entries win per command
    pub fn merged(mut self, user: Self) -> Self {
        self.global.extend(user.global);
        for (context, table) in user.contexts {
            self.contexts.entry(context).or_default().extend(table);
        }
        self
    }
}

fn find_command<'a>(table: &'a Table, key: &KeyEvent) -> Option<&'a str> {
    table.iter().find_map(|(command, keys)| {
        keys.iter()
            .filter_map(|s| parse_key_string(s))
            .any(|bound| keys_match(&bound, key))
            .then_some(command.as_str())
    })
}

/// Compare code and modifiers; character keys compare case-insensitively
fn keys_match(bound: &KeyEvent, key: &KeyEvent) -> bool {
    let codes_match = match (bound.code, key.code) {
        (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
        (a, b) => a == b,
    };
    codes_match && bound.modifiers == key.modifiers
}

impl<C: BindingContext> Serialize for Keybindings<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1 + self.contexts.len()))?;
        map.serialize_entry(GLOBAL, &self.global)?;
        for (context, table) in &self.contexts {
            map.serialize_entry(context.name(), table)?;
        }
        map.end()
    }
}

impl<'de, C: BindingContext> Deserialize<'de> for Keybindings<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: HashMap<String, Table> = HashMap::deserialize(deserializer)?;
        let mut bindings = Keybindings::new();

        for (name, table) in raw {
            if name == GLOBAL {
                bindings.global = table;
            } else if let Some(context) = C::from_name(&name) {
                bindings.contexts.insert(context, table);
            } else {
                tracing::warn!(context = %name, "Ignoring bindings for unknown context");
            }
        }

        Ok(bindings)
    }
}

/// Parse a key string like `"q"`, `"esc"`, `"ctrl+p"` or `"shift+tab"`
///
/// Returns `None` for empty or unknown key names.
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    // "+" on its own is a key, not a separator
    let (modifier_parts, key_part) = match key_str.rsplit_once('+') {
        Some((mods, "")) => (mods.trim_end_matches('+'), "+"),
        Some((mods, key)) => (mods, key),
        None => ("", key_str.as_str()),
    };

    let mut modifiers = KeyModifiers::empty();
    for part in modifier_parts.split('+').filter(|p| !p.is_empty()) {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        "tab" => KeyCode::Tab,
        "backtab" => {
            modifiers |= KeyModifiers::SHIFT;
            KeyCode::BackTab
        }
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                (Some('f'), Some(_)) => KeyCode::F(other[1..].parse().ok()?),
                _ => return None,
            }
        }
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Render a key string for display in help lines (`"ctrl+p"` -> `"^P"`)
pub fn format_key_for_display(key_str: &str) -> String {
    let Some(key) = parse_key_string(key_str) else {
        return key_str.to_string();
    };

    let base = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => return "S-Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        other => format!("{:?}", other),
    };

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        format!("^{}", base.to_uppercase())
    } else if key.modifiers.contains(KeyModifiers::ALT) {
        format!("M-{}", base)
    } else {
        base
    }
}
