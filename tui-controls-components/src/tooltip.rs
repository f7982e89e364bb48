//! Hover tooltip attached to an icon

use crossterm::event::MouseEventKind;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use serde::{Deserialize, Serialize};
use tui_controls_core::{Component, EventKind};

use crate::icons::Icon;
use crate::overlay::clamp_rect;

const MAX_WIDTH: u16 = 40;

/// Where the popup opens relative to the icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

/// Props for Tooltip component
pub struct TooltipProps<'a> {
    /// Popup text
    pub content: &'a str,
    /// Popup placement
    pub position: TooltipPosition,
    /// Trigger glyph
    pub icon: Icon,
    /// Show the popup regardless of hover
    pub is_focused: bool,
}

impl Default for TooltipProps<'_> {
    fn default() -> Self {
        Self {
            content: "",
            position: TooltipPosition::Top,
            icon: Icon::Info,
            is_focused: false,
        }
    }
}

/// An icon that shows its content while hovered
///
/// The hover flag is local state driven by mouse moves; the popup is drawn
/// over the rest of the frame and clamped to it.
#[derive(Debug, Default)]
pub struct Tooltip {
    icon_area: Rect,
    hovered: bool,
}

impl Tooltip {
    /// Create a new Tooltip
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pointer is over the icon
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Update hover state from a pointer event; returns true if it changed
    pub fn track_pointer(&mut self, event: &EventKind) -> bool {
        let EventKind::Mouse(mouse) = event else {
            return false;
        };
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Down(_)) {
            return false;
        }
        let hovered = event
            .position()
            .is_some_and(|pos| self.icon_area.contains(pos));
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }
}

/// Popup rectangle for `content` next to `anchor`, before clamping
fn popup_rect(anchor: Rect, content: &str, position: TooltipPosition) -> Rect {
    let inner_width = (content.chars().count() as u16).clamp(1, MAX_WIDTH);
    let lines = (content.chars().count() as u16).div_ceil(inner_width).max(1);
    let width = inner_width + 2;
    let height = lines + 2;

    let centered_x = (anchor.x + anchor.width / 2).saturating_sub(width / 2);
    let centered_y = (anchor.y + anchor.height / 2).saturating_sub(height / 2);
    match position {
        TooltipPosition::Top => {
            Rect::new(centered_x, anchor.y.saturating_sub(height), width, height)
        }
        TooltipPosition::Bottom => Rect::new(centered_x, anchor.bottom(), width, height),
        TooltipPosition::Left => {
            Rect::new(anchor.x.saturating_sub(width), centered_y, width, height)
        }
        TooltipPosition::Right => Rect::new(anchor.right(), centered_y, width, height),
    }
}

impl<A> Component<A> for Tooltip {
    type Props<'a> = TooltipProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        self.track_pointer(event);
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.icon_area = Rect { width: area.width.min(1), height: area.height.min(1), ..area };
        frame.render_widget(
            Paragraph::new(Line::from(props.icon.span(Style::default().fg(Color::Cyan)))),
            self.icon_area,
        );

        if props.content.is_empty() || !(self.hovered || props.is_focused) {
            return;
        }

        let popup = clamp_rect(
            popup_rect(self.icon_area, props.content, props.position),
            frame.area(),
        );
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(props.content)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(Color::White).bg(Color::Rgb(40, 40, 50)))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                ),
            popup,
        );
    }
}
