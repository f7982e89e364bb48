//! Modal dialog with up to three action buttons

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use serde::{Deserialize, Serialize};
use tui_controls_core::{Component, EventKind};

use crate::overlay::{centered_rect, render_backdrop, BackdropStyle};

const MIN_WIDTH: u16 = 30;
const MAX_WIDTH: u16 = 70;

/// Accent of the dialog border, title and positive button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogTheme {
    #[default]
    Default,
    Info,
    Warning,
    Danger,
}

impl DialogTheme {
    pub fn accent(self) -> Color {
        match self {
            DialogTheme::Default => Color::Cyan,
            DialogTheme::Info => Color::Blue,
            DialogTheme::Warning => Color::Yellow,
            DialogTheme::Danger => Color::Red,
        }
    }
}

/// Which button of the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    Negative,
    Neutral,
    Positive,
}

/// Props for Dialog component
pub struct DialogProps<'a, A> {
    pub id: &'a str,
    pub title: &'a str,
    pub theme: DialogTheme,
    /// Content between the title and the buttons
    pub body: Text<'a>,
    pub positive_label: Option<&'a str>,
    pub neutral_label: Option<&'a str>,
    pub negative_label: Option<&'a str>,
    /// Nothing is drawn and no event is handled while false
    pub is_visible: bool,
    /// Whether this component has focus
    pub is_focused: bool,
    pub on_positive: Option<fn() -> A>,
    pub on_neutral: Option<fn() -> A>,
    pub on_negative: Option<fn() -> A>,
}

impl<A> Default for DialogProps<'_, A> {
    fn default() -> Self {
        Self {
            id: "",
            title: "",
            theme: DialogTheme::Default,
            body: Text::default(),
            positive_label: None,
            neutral_label: None,
            negative_label: None,
            is_visible: false,
            is_focused: false,
            on_positive: None,
            on_neutral: None,
            on_negative: None,
        }
    }
}

impl<'a, A> DialogProps<'a, A> {
    fn label(&self, button: DialogButton) -> Option<&'a str> {
        let label = match button {
            DialogButton::Negative => self.negative_label,
            DialogButton::Neutral => self.neutral_label,
            DialogButton::Positive => self.positive_label,
        };
        label.filter(|label| !label.is_empty())
    }

    /// Buttons with a label, left to right
    fn buttons(&self) -> Vec<(DialogButton, &'a str)> {
        [DialogButton::Negative, DialogButton::Neutral, DialogButton::Positive]
            .into_iter()
            .filter_map(|button| self.label(button).map(|label| (button, label)))
            .collect()
    }

    fn activate(&self, button: DialogButton) -> Option<A> {
        let callback = match button {
            DialogButton::Negative => self.on_negative,
            DialogButton::Neutral => self.on_neutral,
            DialogButton::Positive => self.on_positive,
        };
        callback.map(|f| f())
    }
}

/// A centered box over a dimmed background
///
/// Left/Right/Tab/BackTab move the button focus and Enter activates it; a
/// left click activates the button under the pointer.
#[derive(Debug, Default)]
pub struct Dialog {
    focus: usize,
    button_areas: Vec<(DialogButton, Rect)>,
}

impl Dialog {
    /// Create a new Dialog
    pub fn new() -> Self {
        Self::default()
    }

    /// Button that keyboard activation would trigger
    pub fn focused_button<A>(&self, props: &DialogProps<'_, A>) -> Option<DialogButton> {
        let buttons = props.buttons();
        buttons.get(self.focus.min(buttons.len().saturating_sub(1))).map(|(button, _)| *button)
    }

    fn box_size<A>(props: &DialogProps<'_, A>, area: Rect) -> (u16, u16) {
        let buttons_width: usize = props
            .buttons()
            .iter()
            .map(|(_, label)| label.chars().count() + 3)
            .sum();
        let content_width = props
            .body
            .lines
            .iter()
            .map(Line::width)
            .chain([props.title.chars().count() + 2, buttons_width])
            .max()
            .unwrap_or_default();
        let width = (content_width as u16 + 4).clamp(MIN_WIDTH, MAX_WIDTH).min(area.width);

        let inner_width = usize::from(width.saturating_sub(4)).max(1);
        let body_height: usize = props
            .body
            .lines
            .iter()
            .map(|line| line.width().div_ceil(inner_width).max(1))
            .sum();
        (width, body_height as u16 + 4)
    }
}

impl<A> Component<A> for Dialog {
    type Props<'a> = DialogProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_visible {
            return None;
        }

        if let Some(pos) = event.left_click() {
            return self
                .button_areas
                .iter()
                .find(|(_, area)| area.contains(pos))
                .and_then(|(button, _)| props.activate(*button));
        }

        let EventKind::Key(key) = event else {
            return None;
        };
        if !props.is_focused {
            return None;
        }

        let count = props.buttons().len();
        if count == 0 {
            return None;
        }
        self.focus = self.focus.min(count - 1);
        match key.code {
            KeyCode::Right | KeyCode::Tab => {
                self.focus = (self.focus + 1) % count;
                None
            }
            KeyCode::Left | KeyCode::BackTab => {
                self.focus = (self.focus + count - 1) % count;
                None
            }
            KeyCode::Enter => self
                .focused_button(&props)
                .and_then(|button| props.activate(button)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.button_areas.clear();
        if !props.is_visible {
            return;
        }

        let accent = props.theme.accent();
        let (width, height) = Self::box_size(&props, area);
        let dialog_area = centered_rect(width, height, area);
        render_backdrop(frame, dialog_area, &BackdropStyle::default());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(Span::styled(
                format!(" {} ", props.title),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);
        if inner.height == 0 {
            return;
        }

        let body_area = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            height: inner.height.saturating_sub(2),
            ..inner
        };
        frame.render_widget(
            Paragraph::new(props.body.clone()).wrap(Wrap { trim: false }),
            body_area,
        );

        let buttons = props.buttons();
        let focused = self.focused_button(&props);
        let row = inner.bottom() - 1;
        let mut x = inner.right().saturating_sub(1);
        for (button, label) in buttons.iter().rev() {
            let text = format!(" {label} ");
            let button_width = text.chars().count() as u16;
            x = x.saturating_sub(button_width);
            if x < inner.x {
                break;
            }

            let mut style = match button {
                DialogButton::Positive => Style::default().fg(Color::Black).bg(accent),
                _ => Style::default().fg(Color::White).bg(Color::DarkGray),
            };
            if props.is_focused && focused == Some(*button) {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }

            let button_area = Rect::new(x, row, button_width, 1);
            frame.render_widget(Paragraph::new(Span::styled(text, style)), button_area);
            self.button_areas.push((*button, button_area));
            x = x.saturating_sub(1);
        }
    }
}
