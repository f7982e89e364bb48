//! Dropdown component
//!
//! Single or multiple selection over a list of [`Item`]s, with optional
//! search, "select all" and "add option" rows. The options panel opens
//! below the trigger, or above it when there is not enough room.
//!
//! Selection, search text and panel state are local; the host hears about
//! changes through the `on_*` callbacks in [`DropdownProps`].

mod item;
mod search;
mod state;

pub use item::{DropdownValue, Item, ScrollMetrics, SearchInput};
pub use search::{SearchEdit, SearchField};
pub use state::{
    reduce, DropdownContext, DropdownMsg, DropdownOutput, DropdownState, Placement, Row, Viewport,
};

use std::fmt::Debug;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tui_controls_core::{
    Component, EventKind, EventMask, ListenerGuard, ListenerId, ListenerRegistry,
};

use crate::checkbox::checkbox_line;
use crate::icons::{divider, Icon};
use crate::overlay::clamp_rect;
use crate::tooltip::{Tooltip, TooltipProps};

/// Trigger box height including its border
const TRIGGER_HEIGHT: u16 = 3;

/// Props for Dropdown component
pub struct DropdownProps<'a, V, A> {
    /// Reported back in [`SearchInput::id`]
    pub id: &'a str,
    /// Options, already filtered by the host when searching
    pub items: &'a [Item<V>],
    /// Field label; also used in the generated texts
    pub label: &'a str,
    pub placeholder: &'a str,
    /// Shown as an info icon after the label
    pub tooltip: Option<&'a str>,
    pub disabled: bool,
    pub multiple: bool,
    /// Marks the label with `*`
    pub required: bool,
    /// Replace the trigger text with a search input
    pub searchable: bool,
    /// Offer "Add <text>" when a search finds nothing
    pub add_option: bool,
    /// Offer a row that selects every item (multiple only)
    pub enable_select_all: bool,
    /// Whether this component has focus
    pub is_focused: bool,
    /// Panel height cap in rows
    pub max_visible_rows: usize,
    /// Base style of the trigger box
    pub style: Style,
    pub on_change: Option<fn(DropdownValue<V>) -> A>,
    pub on_search_input_change: Option<fn(SearchInput) -> A>,
    pub on_scroll: Option<fn(ScrollMetrics) -> A>,
    pub add_option_handler: Option<fn(String) -> A>,
}

impl<V, A> Default for DropdownProps<'_, V, A> {
    fn default() -> Self {
        Self {
            id: "",
            items: &[],
            label: "",
            placeholder: "",
            tooltip: None,
            disabled: false,
            multiple: false,
            required: false,
            searchable: false,
            add_option: false,
            enable_select_all: false,
            is_focused: false,
            max_visible_rows: 6,
            style: Style::default(),
            on_change: None,
            on_search_input_change: None,
            on_scroll: None,
            add_option_handler: None,
        }
    }
}

impl<'a, V, A> DropdownProps<'a, V, A> {
    /// The subset of props the reducer works with
    pub fn context(&self) -> DropdownContext<'a, V> {
        DropdownContext {
            id: self.id,
            items: self.items,
            label: self.label,
            placeholder: self.placeholder,
            multiple: self.multiple,
            disabled: self.disabled,
            searchable: self.searchable,
            add_option: self.add_option,
            enable_select_all: self.enable_select_all,
            max_visible_rows: self.max_visible_rows,
        }
    }

    fn to_action(&self, output: DropdownOutput<V>) -> Option<A> {
        match output {
            DropdownOutput::Changed(value) => self.on_change.map(|f| f(value)),
            DropdownOutput::SearchChanged(input) => self.on_search_input_change.map(|f| f(input)),
            DropdownOutput::AddOption(text) => self.add_option_handler.map(|f| f(text)),
            DropdownOutput::Scrolled(metrics) => self.on_scroll.map(|f| f(metrics)),
        }
    }
}

/// A select box with a popup options panel
///
/// Give it focus for keyboard input. Once [`mounted`](Self::mounted), the
/// host should also route events the registry says it wants, so clicks
/// outside close the panel and resizes flip it.
#[derive(Debug)]
pub struct Dropdown<V> {
    state: DropdownState<V>,
    tooltip: Tooltip,
    trigger_area: Rect,
    panel_area: Option<Rect>,
    listener: Option<ListenerGuard>,
}

impl<V> Default for Dropdown<V> {
    fn default() -> Self {
        Self {
            state: DropdownState::default(),
            tooltip: Tooltip::new(),
            trigger_area: Rect::default(),
            panel_area: None,
            listener: None,
        }
    }
}

impl<V: Clone + PartialEq + Debug> Dropdown<V> {
    /// Create a new Dropdown with nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Dropdown with a mount-time selection
    pub fn with_value(value: DropdownValue<V>, items: &[Item<V>]) -> Self {
        Self {
            state: DropdownState::with_value(value, items),
            ..Self::default()
        }
    }

    /// Re-sync the selection with a host-owned value
    ///
    /// Values that match no selectable item in `items` are dropped. Emits
    /// nothing; the host already knows the value.
    pub fn set_value(&mut self, value: DropdownValue<V>, items: &[Item<V>]) {
        self.state.set_value(value, items);
    }

    /// Subscribe to pointer, key, scroll and resize events outside focus
    ///
    /// The subscription ends when the dropdown is dropped.
    pub fn mounted(mut self, registry: &ListenerRegistry) -> Self {
        let mask = EventMask::KEY | EventMask::MOUSE | EventMask::SCROLL | EventMask::RESIZE;
        self.listener = Some(registry.listen(mask));
        self
    }

    pub fn listener_id(&self) -> Option<ListenerId> {
        self.listener.as_ref().map(ListenerGuard::id)
    }

    pub fn state(&self) -> &DropdownState<V> {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Rows the dropdown needs, not counting the panel
    pub fn height(has_label: bool) -> u16 {
        TRIGGER_HEIGHT + u16::from(has_label)
    }

    /// Run one message through the reducer and turn outputs into actions
    pub fn dispatch<A>(&mut self, msg: DropdownMsg, props: &DropdownProps<'_, V, A>) -> Vec<A> {
        reduce(&mut self.state, msg, &props.context())
            .into_iter()
            .filter_map(|output| props.to_action(output))
            .collect()
    }

    fn message<A>(
        &self,
        event: &EventKind,
        props: &DropdownProps<'_, V, A>,
    ) -> Option<DropdownMsg> {
        match event {
            EventKind::Key(key) => self.key_message(key, props),
            EventKind::Mouse(_) => {
                let pos = event.left_click()?;
                if self.trigger_area.contains(pos) {
                    return Some(DropdownMsg::Toggle);
                }
                if let Some(panel) = self.panel_area.filter(|panel| panel.contains(pos)) {
                    return self.row_at(panel, pos).map(DropdownMsg::Pick);
                }
                self.is_open().then_some(DropdownMsg::Close)
            }
            EventKind::Scroll { column, row, delta } => {
                let pos = Position::new(*column, *row);
                self.panel_area
                    .is_some_and(|panel| panel.contains(pos))
                    .then_some(DropdownMsg::Scroll(*delta))
            }
            EventKind::Resize(width, height) => Some(DropdownMsg::Resize(Viewport {
                width: *width,
                height: *height,
            })),
            EventKind::Tick => None,
        }
    }

    fn key_message<A>(
        &self,
        key: &KeyEvent,
        props: &DropdownProps<'_, V, A>,
    ) -> Option<DropdownMsg> {
        let open = self.is_open();
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            return open.then_some(DropdownMsg::Close);
        }
        if !props.is_focused {
            return None;
        }

        let page = props.max_visible_rows.max(1) as isize;
        let edit = |edit: SearchEdit| props.searchable.then_some(DropdownMsg::Edit(edit));

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => edit(SearchEdit::Home),
                KeyCode::Char('e') => edit(SearchEdit::End),
                KeyCode::Char('u') => edit(SearchEdit::Clear),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Esc => open.then_some(DropdownMsg::Close),
            KeyCode::Enter => Some(if open {
                DropdownMsg::PickHighlighted
            } else {
                DropdownMsg::Open
            }),
            KeyCode::Down => Some(DropdownMsg::HighlightNext),
            KeyCode::Up => Some(DropdownMsg::HighlightPrev),
            KeyCode::PageDown => open.then_some(DropdownMsg::Scroll(page)),
            KeyCode::PageUp => open.then_some(DropdownMsg::Scroll(-page)),
            KeyCode::Char(' ') if !props.searchable => Some(if open {
                DropdownMsg::PickHighlighted
            } else {
                DropdownMsg::Open
            }),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                edit(SearchEdit::Insert(c))
            }
            KeyCode::Backspace => edit(SearchEdit::Backspace),
            KeyCode::Delete => edit(SearchEdit::Delete),
            KeyCode::Left => edit(SearchEdit::Left),
            KeyCode::Right => edit(SearchEdit::Right),
            KeyCode::Home => edit(SearchEdit::Home),
            KeyCode::End => edit(SearchEdit::End),
            _ => None,
        }
    }

    /// Row index under `pos`, if it is inside the panel border
    fn row_at(&self, panel: Rect, pos: Position) -> Option<usize> {
        let inner = Block::default().borders(Borders::ALL).inner(panel);
        inner
            .contains(pos)
            .then(|| self.state.scroll_offset() + usize::from(pos.y - inner.y))
    }

    fn render_label<A>(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        props: &DropdownProps<'_, V, A>,
    ) -> Option<Rect> {
        let mut spans = vec![Span::styled(
            format!(" {}", props.label),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if props.required {
            spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
        }
        let line = Line::from(spans);
        let width = line.width() as u16;
        frame.render_widget(Paragraph::new(line), area);

        props.tooltip.filter(|content| !content.is_empty())?;
        let x = area.x.saturating_add(width + 1);
        (x < area.right()).then(|| Rect::new(x, area.y, 1, 1))
    }

    fn render_trigger<A>(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        props: &DropdownProps<'_, V, A>,
    ) {
        let ctx = props.context();
        let border_style = if props.disabled {
            Style::default().fg(Color::DarkGray)
        } else if props.is_focused || self.is_open() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(props.style);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let hint = Style::default().fg(Color::DarkGray);
        let (text, style) = if props.disabled {
            ("Disabled".to_string(), hint)
        } else if props.searchable {
            let search = self.state.search();
            if search.is_empty() {
                (self.state.search_placeholder(&ctx), hint)
            } else {
                (search.text().to_string(), Style::default())
            }
        } else if self.state.selected().is_empty() {
            (self.state.display_text(&ctx), hint)
        } else {
            (self.state.display_text(&ctx), Style::default())
        };

        let text_area = Rect {
            width: inner.width.saturating_sub(2),
            ..inner
        };
        frame.render_widget(Paragraph::new(Span::styled(text, style)), text_area);

        let arrow = if self.is_open() { Icon::ArrowUp } else { Icon::ArrowDown };
        let arrow_area = Rect::new(inner.right() - 1, inner.y, 1, 1);
        frame.render_widget(Paragraph::new(Line::from(arrow.span(border_style))), arrow_area);

        if props.searchable && props.is_focused && !props.disabled {
            let column = (self.state.search().cursor_column() as u16).min(text_area.width);
            frame.set_cursor_position(Position::new(text_area.x + column, text_area.y));
        }
    }

    fn render_panel<A>(&mut self, frame: &mut Frame, props: &DropdownProps<'_, V, A>) {
        let ctx = props.context();
        let search = self.state.search().text();
        let rows = ctx.rows(search);
        let visible = ctx.visible_rows(rows.len());
        let height = visible as u16 + 2;
        let trigger = self.trigger_area;
        let y = match self.state.placement() {
            Placement::Below => trigger.bottom(),
            Placement::Above => trigger.y.saturating_sub(height),
        };
        let panel = clamp_rect(Rect::new(trigger.x, y, trigger.width, height), frame.area());
        self.panel_area = Some(panel);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(panel);
        frame.render_widget(Clear, panel);
        frame.render_widget(block, panel);

        let all_selected = self.state.is_all_selected(&ctx);
        // Items sit one level under their group headers
        let indent = ctx.items.iter().any(|item| item.is_group_label);
        let lines: Vec<Line> = rows
            .iter()
            .enumerate()
            .skip(self.state.scroll_offset())
            .take(visible)
            .map(|(index, row)| {
                let line = self.row_line(*row, &ctx, all_selected, indent, inner.width);
                if self.state.highlighted() == Some(index) {
                    line.patch_style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    line
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn row_line(
        &self,
        row: Row,
        ctx: &DropdownContext<'_, V>,
        all_selected: bool,
        indent: bool,
        width: u16,
    ) -> Line<'static> {
        let hint = Style::default().fg(Color::DarkGray);
        match row {
            Row::SelectAll => checkbox_line(all_selected, "All".to_string(), Style::default()),
            Row::Divider => Line::styled(divider(width), hint),
            Row::Item(index) => {
                let item = &ctx.items[index];
                let text = match &item.logo {
                    Some(logo) => format!("{logo} {}", item.text()),
                    None => item.text().to_string(),
                };
                if item.is_group_label {
                    return Line::styled(text, hint.add_modifier(Modifier::BOLD));
                }
                let mut line = if ctx.multiple {
                    checkbox_line(self.state.is_selected(item), text, Style::default())
                } else if self.state.is_selected(item) {
                    Line::styled(
                        text,
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Line::raw(text)
                };
                if indent {
                    line.spans.insert(0, Span::raw("  "));
                }
                line
            }
            Row::Empty => Line::styled(format!("No {} found", ctx.label), hint),
            Row::AddOption => {
                let green = Style::default().fg(Color::Green);
                Line::from(vec![
                    Icon::Add.span(green),
                    Span::styled(format!(" Add {}", self.state.search().text()), green),
                ])
            }
        }
    }
}

impl<V, A> Component<A> for Dropdown<V>
where
    V: Clone + PartialEq + Debug + 'static,
{
    type Props<'a> = DropdownProps<'a, V, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        self.tooltip.track_pointer(event);
        match self.message(event, &props) {
            Some(msg) => self.dispatch(msg, &props),
            None => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let ctx = props.context();
        self.state.normalize(&ctx);

        let has_label = !props.label.is_empty();
        let mut tooltip_area = None;
        let mut trigger_area = area;
        if has_label && area.height > 0 {
            tooltip_area = self.render_label(frame, Rect { height: 1, ..area }, &props);
            trigger_area = Rect {
                y: area.y + 1,
                height: area.height - 1,
                ..area
            };
        }
        trigger_area.height = trigger_area.height.min(TRIGGER_HEIGHT);

        self.trigger_area = trigger_area;
        self.state
            .set_layout(trigger_area, Viewport::from(frame.area()), &ctx);
        self.render_trigger(frame, trigger_area, &props);

        if self.is_open() && !props.disabled {
            self.render_panel(frame, &props);
        } else {
            self.panel_area = None;
        }

        if let (Some(icon_area), Some(content)) = (tooltip_area, props.tooltip) {
            let tooltip_props = TooltipProps {
                content,
                ..Default::default()
            };
            Component::<A>::render(&mut self.tooltip, frame, icon_area, tooltip_props);
        }
    }
}
