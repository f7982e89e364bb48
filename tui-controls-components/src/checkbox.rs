//! Checkbox component

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_controls_core::{Component, EventKind};

use crate::icons::Icon;

/// Props for Checkbox component
pub struct CheckboxProps<'a, A> {
    /// Text next to the box
    pub label: &'a str,
    /// Current checked state (owned by the host)
    pub checked: bool,
    /// Disabled checkboxes render dimmed and ignore input
    pub disabled: bool,
    /// Whether this component has focus
    pub is_focused: bool,
    /// Callback with the requested new state
    pub on_change: fn(bool) -> A,
}

/// A `[x] label` toggle
///
/// Space/Enter while focused, or a left click on it, emits
/// `on_change(!checked)`.
#[derive(Debug, Default)]
pub struct Checkbox {
    area: Rect,
}

impl Checkbox {
    /// Create a new Checkbox
    pub fn new() -> Self {
        Self::default()
    }
}

/// The `[x] label` line used by the checkbox and by multi-select dropdown rows
pub fn checkbox_line<'a>(checked: bool, label: impl Into<Span<'a>>, style: Style) -> Line<'a> {
    let mark = if checked { Icon::Check.symbol() } else { " " };
    let mark_style = if checked {
        style.fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        style
    };
    let label = label.into();
    let label_style = style.patch(label.style);
    Line::from(vec![
        Span::styled("[", style),
        Span::styled(mark, mark_style),
        Span::styled("] ", style),
        Span::styled(label.content, label_style),
    ])
}

impl<A> Component<A> for Checkbox {
    type Props<'a> = CheckboxProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if props.disabled {
            return None;
        }

        let toggle = match event {
            EventKind::Key(key) if props.is_focused => {
                matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter)
            }
            EventKind::Mouse(_) => event.is_click_in(self.area),
            _ => false,
        };

        toggle.then(|| (props.on_change)(!props.checked))
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let width = (props.label.chars().count() as u16 + 4).min(area.width);
        self.area = Rect { width, height: area.height.min(1), ..area };

        let mut style = Style::default();
        if props.disabled {
            style = style.fg(Color::DarkGray);
        } else if props.is_focused {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let line = checkbox_line(props.checked, props.label, style);
        frame.render_widget(Paragraph::new(line), self.area);
    }
}
