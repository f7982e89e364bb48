//! Event types delivered to components

use bitflags::bitflags;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// Kind of event, used for listener subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Keyboard events
    Key,
    /// Mouse click/move events
    Mouse,
    /// Scroll wheel events
    Scroll,
    /// Terminal resize events
    Resize,
    /// Periodic tick
    Tick,
}

bitflags! {
    /// Set of event types a listener wants to receive
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventMask: u8 {
        const KEY = 1 << 0;
        const MOUSE = 1 << 1;
        const SCROLL = 1 << 2;
        const RESIZE = 1 << 3;
        const TICK = 1 << 4;
    }
}

impl From<EventType> for EventMask {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Key => EventMask::KEY,
            EventType::Mouse => EventMask::MOUSE,
            EventType::Scroll => EventMask::SCROLL,
            EventType::Resize => EventMask::RESIZE,
            EventType::Tick => EventMask::TICK,
        }
    }
}

/// The event payload
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event (wheel events arrive as `Scroll`)
    Mouse(MouseEvent),
    /// Scroll event with position and delta (positive = down)
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize
    Resize(u16, u16),
    /// Periodic tick
    Tick,
}

impl EventKind {
    /// Get the event type for this event kind
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Key(_) => EventType::Key,
            EventKind::Mouse(_) => EventType::Mouse,
            EventKind::Scroll { .. } => EventType::Scroll,
            EventKind::Resize(_, _) => EventType::Resize,
            EventKind::Tick => EventType::Tick,
        }
    }

    /// Screen position of a mouse or scroll event
    pub fn position(&self) -> Option<Position> {
        match self {
            EventKind::Mouse(mouse) => Some(Position::new(mouse.column, mouse.row)),
            EventKind::Scroll { column, row, .. } => Some(Position::new(*column, *row)),
            _ => None,
        }
    }

    /// Position of a left button press, if this is one
    pub fn left_click(&self) -> Option<Position> {
        match self {
            EventKind::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some(Position::new(*column, *row)),
            _ => None,
        }
    }

    /// Whether this is a left click inside `area`
    pub fn is_click_in(&self, area: Rect) -> bool {
        self.left_click().is_some_and(|pos| area.contains(pos))
    }

    /// Whether this is a plain Tab key press
    pub fn is_tab(&self) -> bool {
        matches!(
            self,
            EventKind::Key(KeyEvent {
                code: KeyCode::Tab,
                ..
            })
        )
    }

    /// Whether this event should reach every mounted listener regardless of focus
    pub fn is_global(&self) -> bool {
        match self {
            EventKind::Key(key) => {
                matches!(key.code, KeyCode::Esc | KeyCode::Tab)
                    || (key.modifiers.contains(KeyModifiers::CONTROL)
                        && matches!(key.code, KeyCode::Char('c')))
            }
            EventKind::Resize(_, _) => true,
            _ => false,
        }
    }
}
