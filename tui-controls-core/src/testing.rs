//! Test utilities for components
//!
//! - [`key`]: build a `KeyEvent` from a string (`key("ctrl+p")`)
//! - [`left_click`], [`mouse_move`], [`scroll`]: pointer events at a cell
//! - [`RenderHarness`]: render into an in-memory terminal and read it back
//! - `assert_emitted!` and friends for checking returned actions
//!
//! # Example
//!
//! ```ignore
//! use tui_controls::testing::*;
//!
//! let mut harness = RenderHarness::new(40, 10);
//! let output = harness.render_to_string_plain(|frame| {
//!     dropdown.render(frame, frame.area(), props());
//! });
//! assert!(output.contains("Choose Country"));
//!
//! let actions: Vec<_> = dropdown
//!     .handle_event(&EventKind::Key(key("enter")), props())
//!     .into_iter()
//!     .collect();
//! assert_emitted!(actions, Action::CountryChange(_));
//! ```

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Frame, Terminal};

use crate::event::EventKind;
use crate::keybindings::parse_key_string;

/// Create a `KeyEvent` from a key string
///
/// # Examples
///
/// ```
/// use tui_controls_core::testing::key;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let k = key("tab");
/// assert_eq!(k.code, KeyCode::Tab);
///
/// let k = key("ctrl+u");
/// assert_eq!(k.code, KeyCode::Char('u'));
/// assert!(k.modifiers.contains(KeyModifiers::CONTROL));
/// ```
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// `KeyEvent` for a character with no modifiers
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Key events for every character of `text`, as typed
pub fn type_text(text: &str) -> Vec<EventKind> {
    text.chars().map(|c| EventKind::Key(char_key(c))).collect()
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> EventKind {
    EventKind::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Left button press at a cell
pub fn left_click(column: u16, row: u16) -> EventKind {
    mouse(MouseEventKind::Down(MouseButton::Left), column, row)
}

/// Pointer movement to a cell
pub fn mouse_move(column: u16, row: u16) -> EventKind {
    mouse(MouseEventKind::Moved, column, row)
}

/// Wheel scroll at a cell (positive delta = down)
pub fn scroll(column: u16, row: u16, delta: isize) -> EventKind {
    EventKind::Scroll { column, row, delta }
}

/// Renders into an in-memory terminal
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Harness with a `width` x `height` terminal
    ///
    /// # Panics
    ///
    /// Panics if the test backend cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("Failed to create test terminal: {}", e));
        Self { terminal }
    }

    /// Resize the in-memory terminal
    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal.backend_mut().resize(width, height);
        let _ = self.terminal.resize(Rect::new(0, 0, width, height));
    }

    /// Draw one frame and return the resulting buffer
    ///
    /// # Panics
    ///
    /// Panics if drawing fails.
    pub fn render<F>(&mut self, render: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal
            .draw(render)
            .unwrap_or_else(|e| panic!("Failed to draw frame: {}", e));
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return its text without styling
    pub fn render_to_string_plain<F>(&mut self, render: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(self.render(render))
    }
}

/// Text content of a buffer, one line per row, trailing spaces removed
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    buffer_rect_to_string_plain(buffer, buffer.area)
}

/// Text content of `rect` within a buffer
pub fn buffer_rect_to_string_plain(buffer: &Buffer, rect: Rect) -> String {
    let rect = rect.intersection(buffer.area);
    let mut lines = Vec::with_capacity(rect.height as usize);
    for y in rect.top()..rect.bottom() {
        let mut line = String::new();
        for x in rect.left()..rect.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Row index (0-based) of the first line containing `needle`
pub fn find_row(output: &str, needle: &str) -> Option<u16> {
    output
        .lines()
        .position(|line| line.contains(needle))
        .map(|row| row as u16)
}

/// Assert that an action matching a pattern was emitted
///
/// ```ignore
/// assert_emitted!(actions, Action::Changed(DropdownValue::Single(2)));
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern was emitted
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Count actions matching a pattern
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}
