//! Dropdown state and its reducer
//!
//! Everything the dropdown remembers between frames lives in
//! [`DropdownState`]. It only changes through [`reduce`], which returns the
//! notifications the host should receive. The component maps terminal
//! events to [`DropdownMsg`]s and outputs to host actions.

use std::fmt::Debug;

use ratatui::layout::Rect;

use super::item::{DropdownValue, Item, ScrollMetrics, SearchInput};
use super::search::{SearchEdit, SearchField};

/// Terminal size as seen by the dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl From<Rect> for Viewport {
    fn from(area: Rect) -> Self {
        Self {
            width: area.width,
            height: area.height,
        }
    }
}

/// Which side of the trigger the panel opens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Below,
    Above,
}

impl Placement {
    /// Open upward when the panel would not fit under the trigger
    pub fn choose(viewport: Viewport, trigger: Rect, panel_height: u16) -> Self {
        if viewport.height == 0 {
            return Placement::Below;
        }
        let space_below = viewport.height.saturating_sub(trigger.bottom());
        if panel_height < space_below {
            Placement::Below
        } else {
            Placement::Above
        }
    }
}

/// One line of the options panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    /// Toggles every selectable item
    SelectAll,
    /// Rule under the select-all row
    Divider,
    /// Index into the items
    Item(usize),
    /// "No <label> found"
    Empty,
    /// "Add <search text>"
    AddOption,
}

/// Props the reducer needs, borrowed from the component props
#[derive(Debug)]
pub struct DropdownContext<'a, V> {
    pub id: &'a str,
    pub items: &'a [Item<V>],
    pub label: &'a str,
    pub placeholder: &'a str,
    pub multiple: bool,
    pub disabled: bool,
    pub searchable: bool,
    pub add_option: bool,
    pub enable_select_all: bool,
    pub max_visible_rows: usize,
}

impl<V: Clone + PartialEq> DropdownContext<'_, V> {
    /// Values of every selectable item, in item order without repeats
    pub fn selectable_values(&self) -> Vec<V> {
        let mut values: Vec<V> = Vec::new();
        for item in self.items.iter().filter(|item| item.is_selectable()) {
            if !values.contains(&item.value) {
                values.push(item.value.clone());
            }
        }
        values
    }

    fn shows_select_all(&self, search: &str) -> bool {
        self.multiple
            && self.enable_select_all
            && search.is_empty()
            && self.items.iter().any(Item::is_selectable)
    }

    /// Panel rows for the current search text
    pub fn rows(&self, search: &str) -> Vec<Row> {
        let mut rows = Vec::with_capacity(self.items.len() + 2);
        if self.shows_select_all(search) {
            rows.push(Row::SelectAll);
            rows.push(Row::Divider);
        }
        rows.extend((0..self.items.len()).map(Row::Item));
        if self.searchable && self.items.is_empty() {
            rows.push(Row::Empty);
            if self.add_option && !search.is_empty() {
                rows.push(Row::AddOption);
            }
        }
        rows
    }

    /// Whether a row reacts to being picked
    pub fn is_pickable(&self, row: Row) -> bool {
        match row {
            Row::SelectAll | Row::AddOption => true,
            Row::Item(index) => self.items.get(index).is_some_and(Item::is_selectable),
            Row::Divider | Row::Empty => false,
        }
    }

    /// Rows shown at once for `total` rows
    pub fn visible_rows(&self, total: usize) -> usize {
        total.min(self.max_visible_rows.max(1))
    }

    /// Panel height including its border
    pub fn panel_height(&self, search: &str) -> u16 {
        let rows = self.visible_rows(self.rows(search).len());
        u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
    }

    fn fallback_text(&self) -> String {
        if !self.placeholder.is_empty() {
            self.placeholder.to_string()
        } else if !self.label.is_empty() {
            format!("Choose {}", self.label)
        } else {
            String::new()
        }
    }
}

/// Input to [`reduce`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownMsg {
    Toggle,
    Open,
    Close,
    HighlightNext,
    HighlightPrev,
    /// Pick a row by index
    Pick(usize),
    PickHighlighted,
    Edit(SearchEdit),
    /// Scroll the panel by rows (positive = down)
    Scroll(isize),
    Resize(Viewport),
}

/// Notification produced by [`reduce`]
#[derive(Debug, Clone, PartialEq)]
pub enum DropdownOutput<V> {
    Changed(DropdownValue<V>),
    SearchChanged(SearchInput),
    AddOption(String),
    Scrolled(ScrollMetrics),
}

/// Local dropdown state
#[derive(Debug, Clone)]
pub struct DropdownState<V> {
    open: bool,
    search: SearchField,
    selected: Vec<V>,
    highlighted: Option<usize>,
    scroll_offset: usize,
    placement: Placement,
    viewport: Viewport,
    trigger: Rect,
}

impl<V> Default for DropdownState<V> {
    fn default() -> Self {
        Self {
            open: false,
            search: SearchField::default(),
            selected: Vec::new(),
            highlighted: None,
            scroll_offset: 0,
            placement: Placement::Below,
            viewport: Viewport::default(),
            trigger: Rect::default(),
        }
    }
}

impl<V: Clone + PartialEq> DropdownState<V> {
    /// State for a mount-time value, see [`set_value`](Self::set_value)
    pub fn with_value(value: DropdownValue<V>, items: &[Item<V>]) -> Self {
        let mut state = Self::default();
        state.set_value(value, items);
        state
    }

    /// Replace the selection with a host-provided value
    ///
    /// Only values of selectable items in `items` are kept. A single value
    /// also fills the search text with the item's text so searchable
    /// dropdowns show it; an unknown single value clears both.
    pub fn set_value(&mut self, value: DropdownValue<V>, items: &[Item<V>]) {
        let find = |value: &V| {
            items
                .iter()
                .find(|item| item.is_selectable() && item.value == *value)
        };

        self.selected.clear();
        match value {
            DropdownValue::Single(value) => match find(&value) {
                Some(item) => {
                    self.search.set(item.text());
                    self.selected.push(value);
                }
                None => self.search.set(String::new()),
            },
            DropdownValue::Multiple(values) => {
                for value in values {
                    if find(&value).is_some() && !self.selected.contains(&value) {
                        self.selected.push(value);
                    }
                }
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Selected values, in the order they were picked
    pub fn selected(&self) -> &[V] {
        &self.selected
    }

    pub fn search(&self) -> &SearchField {
        &self.search
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Record where the trigger was drawn and how big the frame is
    ///
    /// Re-evaluates placement when either moved while the panel is open.
    pub fn set_layout(&mut self, trigger: Rect, viewport: Viewport, ctx: &DropdownContext<'_, V>) {
        if trigger == self.trigger && viewport == self.viewport {
            return;
        }
        self.trigger = trigger;
        self.viewport = viewport;
        if self.open {
            self.refresh_placement(ctx);
        }
    }

    /// Keep highlight and scroll offset valid after the items changed
    pub fn normalize(&mut self, ctx: &DropdownContext<'_, V>) {
        let rows = ctx.rows(self.search.text());
        let visible = ctx.visible_rows(rows.len());
        self.scroll_offset = self.scroll_offset.min(rows.len().saturating_sub(visible));
        let valid = self
            .highlighted
            .and_then(|index| rows.get(index))
            .is_some_and(|row| ctx.is_pickable(*row));
        if !valid {
            self.highlighted = rows.iter().position(|row| ctx.is_pickable(*row));
        }
    }

    /// Whether every selectable item is selected
    pub fn is_all_selected(&self, ctx: &DropdownContext<'_, V>) -> bool {
        let total = ctx.selectable_values().len();
        total > 0 && self.selected_count(ctx) == total
    }

    /// Selected values that match a selectable item in `ctx`
    pub fn selected_count(&self, ctx: &DropdownContext<'_, V>) -> usize {
        ctx.selectable_values()
            .iter()
            .filter(|value| self.selected.contains(value))
            .count()
    }

    /// Whether the item is part of the selection
    pub fn is_selected(&self, item: &Item<V>) -> bool {
        item.is_selectable() && self.selected.contains(&item.value)
    }

    /// Text shown in the closed trigger
    pub fn display_text(&self, ctx: &DropdownContext<'_, V>) -> String {
        if !ctx.multiple {
            return self
                .selected
                .first()
                .and_then(|value| {
                    ctx.items
                        .iter()
                        .find(|item| item.is_selectable() && item.value == *value)
                })
                .map(|item| item.text())
                .filter(|text| !text.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| ctx.fallback_text());
        }

        if ctx.enable_select_all && self.is_all_selected(ctx) {
            return format!("All {} {} selected", self.selected_count(ctx), ctx.label);
        }

        let mut texts: Vec<&str> = Vec::new();
        for item in ctx.items.iter().filter(|item| self.is_selected(item)) {
            let text = item.text();
            if !text.is_empty() && !texts.contains(&text) {
                texts.push(text);
            }
        }
        if texts.is_empty() {
            ctx.fallback_text()
        } else {
            texts.join(", ")
        }
    }

    /// Placeholder of the search input
    pub fn search_placeholder(&self, ctx: &DropdownContext<'_, V>) -> String {
        let count = self.selected_count(ctx);
        if ctx.multiple && ctx.enable_select_all && count > 0 {
            if self.is_all_selected(ctx) {
                return format!("All {}(s) selected", ctx.label);
            }
            return format!("{count} {}(s) selected", ctx.label);
        }
        if ctx.placeholder.is_empty() {
            format!("Search {}", ctx.label)
        } else {
            ctx.placeholder.to_string()
        }
    }

    fn open(&mut self, ctx: &DropdownContext<'_, V>) {
        self.open = true;
        self.scroll_offset = 0;

        let rows = ctx.rows(self.search.text());
        let selected_row = self.selected.first().and_then(|value| {
            rows.iter().position(|row| match row {
                Row::Item(index) => {
                    let item = &ctx.items[*index];
                    item.is_selectable() && item.value == *value
                }
                _ => false,
            })
        });
        self.highlighted =
            selected_row.or_else(|| rows.iter().position(|row| ctx.is_pickable(*row)));
        if let Some(row) = self.highlighted {
            self.ensure_visible(row, ctx.visible_rows(rows.len()));
        }
        self.refresh_placement(ctx);
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn refresh_placement(&mut self, ctx: &DropdownContext<'_, V>) {
        let panel_height = ctx.panel_height(self.search.text());
        self.placement = Placement::choose(self.viewport, self.trigger, panel_height);
    }

    fn ensure_visible(&mut self, row: usize, visible: usize) {
        if visible == 0 {
            return;
        }
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + visible {
            self.scroll_offset = row + 1 - visible;
        }
    }

    fn metrics(&self, total: usize, visible: usize) -> ScrollMetrics {
        ScrollMetrics {
            offset: self.scroll_offset,
            visible,
            total,
        }
    }

    fn move_highlight(
        &mut self,
        ctx: &DropdownContext<'_, V>,
        forward: bool,
        out: &mut Vec<DropdownOutput<V>>,
    ) {
        let rows = ctx.rows(self.search.text());
        let pickable = |index: &usize| ctx.is_pickable(rows[*index]);
        let next = match (self.highlighted, forward) {
            (None, true) => (0..rows.len()).find(pickable),
            (None, false) => (0..rows.len()).rev().find(pickable),
            (Some(current), true) => (current + 1..rows.len()).find(pickable),
            (Some(current), false) => (0..current.min(rows.len())).rev().find(pickable),
        };
        let Some(next) = next else {
            return;
        };

        self.highlighted = Some(next);
        let visible = ctx.visible_rows(rows.len());
        let before = self.scroll_offset;
        self.ensure_visible(next, visible);
        if self.scroll_offset != before {
            out.push(DropdownOutput::Scrolled(self.metrics(rows.len(), visible)));
        }
    }

    fn scroll_by(
        &mut self,
        ctx: &DropdownContext<'_, V>,
        delta: isize,
        out: &mut Vec<DropdownOutput<V>>,
    ) {
        let total = ctx.rows(self.search.text()).len();
        let visible = ctx.visible_rows(total);
        let max = total.saturating_sub(visible);
        let offset = self.scroll_offset.saturating_add_signed(delta).min(max);
        if offset != self.scroll_offset {
            self.scroll_offset = offset;
            out.push(DropdownOutput::Scrolled(self.metrics(total, visible)));
        }
    }

    fn pick(
        &mut self,
        ctx: &DropdownContext<'_, V>,
        index: usize,
        out: &mut Vec<DropdownOutput<V>>,
    ) {
        let rows = ctx.rows(self.search.text());
        let Some(row) = rows.get(index).copied() else {
            return;
        };

        match row {
            Row::SelectAll => {
                if self.is_all_selected(ctx) {
                    self.selected.clear();
                } else {
                    self.selected = ctx.selectable_values();
                }
                self.highlighted = Some(index);
                out.push(DropdownOutput::Changed(DropdownValue::Multiple(self.selected.clone())));
            }
            Row::Item(item_index) => {
                let item = &ctx.items[item_index];
                if !item.is_selectable() {
                    return;
                }
                self.highlighted = Some(index);
                if ctx.multiple {
                    match self.selected.iter().position(|value| *value == item.value) {
                        Some(position) => {
                            self.selected.remove(position);
                        }
                        None => self.selected.push(item.value.clone()),
                    }
                    let value = DropdownValue::Multiple(self.selected.clone());
                    out.push(DropdownOutput::Changed(value));
                } else {
                    self.selected = vec![item.value.clone()];
                    self.search.set(item.text());
                    self.close();
                    out.push(DropdownOutput::Changed(DropdownValue::Single(item.value.clone())));
                }
            }
            Row::AddOption => {
                let text = self.search.take();
                self.highlighted = None;
                out.push(DropdownOutput::AddOption(text));
            }
            Row::Divider | Row::Empty => {}
        }
    }

    fn edit(
        &mut self,
        ctx: &DropdownContext<'_, V>,
        edit: SearchEdit,
        out: &mut Vec<DropdownOutput<V>>,
    ) {
        if !ctx.searchable || !self.search.apply(edit) {
            return;
        }
        self.open = true;
        self.scroll_offset = 0;
        self.highlighted = None;
        self.refresh_placement(ctx);
        out.push(DropdownOutput::SearchChanged(SearchInput {
            id: ctx.id.to_string(),
            text: self.search.text().to_string(),
        }));
    }
}

/// Apply `msg` to `state`, returning what the host should be told
///
/// Disabled dropdowns only react to `Close` and `Resize`.
pub fn reduce<V>(
    state: &mut DropdownState<V>,
    msg: DropdownMsg,
    ctx: &DropdownContext<'_, V>,
) -> Vec<DropdownOutput<V>>
where
    V: Clone + PartialEq + Debug,
{
    let mut out = Vec::new();
    if ctx.disabled && !matches!(msg, DropdownMsg::Close | DropdownMsg::Resize(_)) {
        return out;
    }

    match msg {
        DropdownMsg::Toggle => {
            if state.open {
                state.close();
            } else {
                state.open(ctx);
            }
        }
        DropdownMsg::Open => {
            if !state.open {
                state.open(ctx);
            }
        }
        DropdownMsg::Close => state.close(),
        DropdownMsg::HighlightNext => {
            if state.open {
                state.move_highlight(ctx, true, &mut out);
            } else {
                state.open(ctx);
            }
        }
        DropdownMsg::HighlightPrev => {
            if state.open {
                state.move_highlight(ctx, false, &mut out);
            }
        }
        DropdownMsg::Pick(index) => state.pick(ctx, index, &mut out),
        DropdownMsg::PickHighlighted => {
            if let Some(index) = state.highlighted.filter(|_| state.open) {
                state.pick(ctx, index, &mut out);
            }
        }
        DropdownMsg::Edit(edit) => state.edit(ctx, edit, &mut out),
        DropdownMsg::Scroll(delta) => {
            if state.open {
                state.scroll_by(ctx, delta, &mut out);
                state.refresh_placement(ctx);
            }
        }
        DropdownMsg::Resize(viewport) => {
            state.viewport = viewport;
            if state.open {
                state.refresh_placement(ctx);
            }
        }
    }

    if !out.is_empty() {
        tracing::debug!(id = ctx.id, ?msg, ?out, "dropdown");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruits() -> Vec<Item<u32>> {
        vec![
            Item::new("Apple", 1),
            Item::new("Banana", 2),
            Item::new("Cherry", 3),
        ]
    }

    fn ctx(items: &[Item<u32>]) -> DropdownContext<'_, u32> {
        DropdownContext {
            id: "fruit",
            items,
            label: "fruit",
            placeholder: "",
            multiple: false,
            disabled: false,
            searchable: false,
            add_option: false,
            enable_select_all: false,
            max_visible_rows: 6,
        }
    }

    fn multi(items: &[Item<u32>]) -> DropdownContext<'_, u32> {
        DropdownContext {
            multiple: true,
            enable_select_all: true,
            ..ctx(items)
        }
    }

    fn run(
        state: &mut DropdownState<u32>,
        ctx: &DropdownContext<'_, u32>,
        msgs: &[DropdownMsg],
    ) -> Vec<DropdownOutput<u32>> {
        msgs.iter().flat_map(|msg| reduce(state, *msg, ctx)).collect()
    }

    #[test]
    fn test_select_all_then_clear() {
        let items = fruits();
        let ctx = multi(&items);
        let mut state = DropdownState::default();

        let out = run(&mut state, &ctx, &[DropdownMsg::Open, DropdownMsg::Pick(0)]);
        assert_eq!(out, vec![DropdownOutput::Changed(DropdownValue::Multiple(vec![1, 2, 3]))]);
        assert!(state.is_all_selected(&ctx));
        assert_eq!(state.display_text(&ctx), "All 3 fruit selected");

        let out = run(&mut state, &ctx, &[DropdownMsg::Pick(0)]);
        assert_eq!(out, vec![DropdownOutput::Changed(DropdownValue::Multiple(vec![]))]);
        assert!(!state.is_all_selected(&ctx));
    }

    #[test]
    fn test_multi_toggle_keeps_click_order() {
        let items = fruits();
        let ctx = multi(&items);
        let mut state = DropdownState::default();

        // rows: SelectAll, Divider, Apple, Banana, Cherry
        run(&mut state, &ctx, &[DropdownMsg::Open, DropdownMsg::Pick(4), DropdownMsg::Pick(2)]);
        assert_eq!(state.selected(), &[3, 1]);
        assert!(state.is_open());
        assert_eq!(state.display_text(&ctx), "Apple, Cherry");

        let out = run(&mut state, &ctx, &[DropdownMsg::Pick(4)]);
        assert_eq!(out, vec![DropdownOutput::Changed(DropdownValue::Multiple(vec![1]))]);
    }

    #[test]
    fn test_single_pick_closes_and_fills_search() {
        let items = fruits();
        let ctx = DropdownContext {
            searchable: true,
            ..ctx(&items)
        };
        let mut state = DropdownState::default();

        let out = run(&mut state, &ctx, &[DropdownMsg::Toggle, DropdownMsg::Pick(1)]);
        assert_eq!(out, vec![DropdownOutput::Changed(DropdownValue::Single(2))]);
        assert!(!state.is_open());
        assert_eq!(state.search().text(), "Banana");
        assert_eq!(state.display_text(&ctx), "Banana");
    }

    #[test]
    fn test_group_labels_not_pickable() {
        let items = vec![
            Item::group("Citrus", 0),
            Item::new("Lemon", 1),
            Item::group("Berries", 10),
            Item::new("Raspberry", 11),
        ];
        let ctx = ctx(&items);
        let mut state = DropdownState::default();

        run(&mut state, &ctx, &[DropdownMsg::Open]);
        assert_eq!(state.highlighted(), Some(1));

        let out = run(&mut state, &ctx, &[DropdownMsg::Pick(0)]);
        assert!(out.is_empty());

        run(&mut state, &ctx, &[DropdownMsg::HighlightNext]);
        assert_eq!(state.highlighted(), Some(3));
        run(&mut state, &ctx, &[DropdownMsg::HighlightPrev]);
        assert_eq!(state.highlighted(), Some(1));
    }

    #[test]
    fn test_search_edit_opens_and_reports() {
        let items = fruits();
        let ctx = DropdownContext {
            searchable: true,
            ..multi(&items)
        };
        let mut state = DropdownState::default();

        let out = run(
            &mut state,
            &ctx,
            &[DropdownMsg::Edit(SearchEdit::Insert('a')), DropdownMsg::Edit(SearchEdit::Left)],
        );
        assert!(state.is_open());
        assert_eq!(
            out,
            vec![DropdownOutput::SearchChanged(SearchInput {
                id: "fruit".into(),
                text: "a".into(),
            })]
        );
        // Select all is hidden while searching
        assert_eq!(ctx.rows("a")[0], Row::Item(0));
    }

    #[test]
    fn test_add_option_row() {
        let items: Vec<Item<u32>> = Vec::new();
        let ctx = DropdownContext {
            searchable: true,
            add_option: true,
            ..ctx(&items)
        };
        let mut state = DropdownState::default();

        assert_eq!(ctx.rows(""), vec![Row::Empty]);
        for c in "xyz".chars() {
            reduce(&mut state, DropdownMsg::Edit(SearchEdit::Insert(c)), &ctx);
        }
        assert_eq!(ctx.rows("xyz"), vec![Row::Empty, Row::AddOption]);

        let out = run(&mut state, &ctx, &[DropdownMsg::Pick(1)]);
        assert_eq!(out, vec![DropdownOutput::AddOption("xyz".into())]);
        assert!(state.search().is_empty());
    }

    #[test]
    fn test_disabled_ignores_input() {
        let items = fruits();
        let ctx = DropdownContext {
            disabled: true,
            ..ctx(&items)
        };
        let mut state = DropdownState::default();

        let out = run(&mut state, &ctx, &[DropdownMsg::Toggle, DropdownMsg::Pick(0)]);
        assert!(out.is_empty());
        assert!(!state.is_open());
    }

    #[test]
    fn test_placement_flips_near_bottom() {
        let viewport = Viewport { width: 80, height: 24 };
        assert_eq!(Placement::choose(viewport, Rect::new(0, 2, 20, 3), 8), Placement::Below);
        assert_eq!(Placement::choose(viewport, Rect::new(0, 15, 20, 3), 8), Placement::Above);
        // Equal space is not enough
        assert_eq!(Placement::choose(viewport, Rect::new(0, 13, 20, 3), 8), Placement::Above);
    }

    #[test]
    fn test_placement_follows_layout() {
        let items = fruits();
        let ctx = ctx(&items);
        let mut state = DropdownState::default();
        let viewport = Viewport { width: 80, height: 24 };

        state.set_layout(Rect::new(0, 2, 20, 3), viewport, &ctx);
        run(&mut state, &ctx, &[DropdownMsg::Open]);
        assert_eq!(state.placement(), Placement::Below);

        state.set_layout(Rect::new(0, 19, 20, 3), viewport, &ctx);
        assert_eq!(state.placement(), Placement::Above);

        run(&mut state, &ctx, &[DropdownMsg::Resize(Viewport { width: 80, height: 60 })]);
        assert_eq!(state.placement(), Placement::Below);
    }

    #[test]
    fn test_scroll_emits_metrics() {
        let items: Vec<Item<u32>> = (0..10).map(|n| Item::new(format!("Item {n}"), n)).collect();
        let ctx = DropdownContext {
            max_visible_rows: 4,
            ..ctx(&items)
        };
        let mut state = DropdownState::default();

        let out = run(&mut state, &ctx, &[DropdownMsg::Open, DropdownMsg::Scroll(3)]);
        assert_eq!(
            out,
            vec![DropdownOutput::Scrolled(ScrollMetrics {
                offset: 3,
                visible: 4,
                total: 10,
            })]
        );

        let out = run(&mut state, &ctx, &[DropdownMsg::Scroll(100)]);
        assert_eq!(out.len(), 1);
        assert_eq!(state.scroll_offset(), 6);

        // Already at the end
        assert!(run(&mut state, &ctx, &[DropdownMsg::Scroll(1)]).is_empty());
    }

    #[test]
    fn test_highlight_scrolls_into_view() {
        let items: Vec<Item<u32>> = (0..5).map(|n| Item::new(format!("Item {n}"), n)).collect();
        let ctx = DropdownContext {
            max_visible_rows: 2,
            ..ctx(&items)
        };
        let mut state = DropdownState::default();

        let out = run(
            &mut state,
            &ctx,
            &[DropdownMsg::Open, DropdownMsg::HighlightNext, DropdownMsg::HighlightNext],
        );
        assert_eq!(state.highlighted(), Some(2));
        assert_eq!(state.scroll_offset(), 1);
        assert!(matches!(out.as_slice(), [DropdownOutput::Scrolled(_)]));
    }

    #[test]
    fn test_display_fallbacks() {
        let items = fruits();
        let state = DropdownState::<u32>::default();

        assert_eq!(state.display_text(&ctx(&items)), "Choose fruit");
        let with_placeholder = DropdownContext {
            placeholder: "Pick one",
            ..ctx(&items)
        };
        assert_eq!(state.display_text(&with_placeholder), "Pick one");
        let bare = DropdownContext { label: "", ..ctx(&items) };
        assert_eq!(state.display_text(&bare), "");

        // Unknown value falls back too
        let unknown = DropdownState::with_value(DropdownValue::Single(99), &items);
        assert_eq!(unknown.display_text(&ctx(&items)), "Choose fruit");
    }

    #[test]
    fn test_multi_display_item_order() {
        let items = fruits();
        let ctx = DropdownContext {
            enable_select_all: false,
            ..multi(&items)
        };
        let state = DropdownState::with_value(DropdownValue::Multiple(vec![3, 1, 3]), &items);

        assert_eq!(state.selected(), &[3, 1]);
        assert_eq!(state.display_text(&ctx), "Apple, Cherry");
    }

    #[test]
    fn test_search_placeholder() {
        let items = fruits();
        let ctx = multi(&items);

        let none = DropdownState::<u32>::default();
        assert_eq!(none.search_placeholder(&ctx), "Search fruit");

        let some = DropdownState::with_value(DropdownValue::Multiple(vec![2]), &items);
        assert_eq!(some.search_placeholder(&ctx), "1 fruit(s) selected");

        let all = DropdownState::with_value(DropdownValue::Multiple(vec![1, 2, 3]), &items);
        assert_eq!(all.search_placeholder(&ctx), "All fruit(s) selected");
    }

    #[test]
    fn test_mount_value_fills_search() {
        let items = fruits();
        let state = DropdownState::with_value(DropdownValue::Single(3), &items);
        assert_eq!(state.search().text(), "Cherry");
        assert!(!state.is_open());
    }

    #[test]
    fn test_group_label_mount_value_never_emitted() {
        let items = vec![Item::group("Citrus", 0), Item::new("Lemon", 1)];
        let ctx = multi(&items);
        let mut state = DropdownState::with_value(DropdownValue::Multiple(vec![0]), &items);
        assert!(state.selected().is_empty());

        // rows: SelectAll, Divider, Citrus, Lemon
        let out = run(&mut state, &ctx, &[DropdownMsg::Open, DropdownMsg::Pick(3)]);
        assert_eq!(out, vec![DropdownOutput::Changed(DropdownValue::Multiple(vec![1]))]);

        let single = DropdownState::with_value(DropdownValue::Single(0), &items);
        assert!(single.selected().is_empty());
        assert!(single.search().is_empty());
    }

    #[test]
    fn test_unknown_mount_values_not_counted() {
        let items = fruits();
        let ctx = multi(&items);
        let state = DropdownState::with_value(DropdownValue::Multiple(vec![1, 2, 3, 99]), &items);

        assert_eq!(state.selected(), &[1, 2, 3]);
        assert_eq!(state.display_text(&ctx), "All 3 fruit selected");
        assert_eq!(state.search_placeholder(&ctx), "All fruit(s) selected");
    }

    #[test]
    fn test_counts_follow_current_items() {
        let items = fruits();
        let state = DropdownState::with_value(DropdownValue::Multiple(vec![1, 2, 3]), &items);

        // Host narrowed the list to Banana and Cherry
        let narrowed = &items[1..];
        let ctx = multi(narrowed);
        assert_eq!(state.selected_count(&ctx), 2);
        assert_eq!(state.display_text(&ctx), "All 2 fruit selected");
        assert_eq!(state.selected(), &[1, 2, 3]);
    }

    #[test]
    fn test_set_value_resyncs_selection() {
        let items = fruits();
        let ctx = DropdownContext {
            searchable: true,
            ..ctx(&items)
        };
        let mut state = DropdownState::with_value(DropdownValue::Single(1), &items);
        assert_eq!(state.search().text(), "Apple");

        state.set_value(DropdownValue::Single(2), &items);
        assert_eq!(state.selected(), &[2]);
        assert_eq!(state.display_text(&ctx), "Banana");
        assert_eq!(state.search().text(), "Banana");

        state.set_value(DropdownValue::Single(99), &items);
        assert!(state.selected().is_empty());
        assert!(state.search().is_empty());
        assert_eq!(state.display_text(&ctx), "Choose fruit");
    }

    #[test]
    fn test_panel_height_saturates() {
        let items: Vec<Item<u32>> = (0..70_000).map(|n| Item::new("x", n)).collect();
        let ctx = DropdownContext {
            max_visible_rows: usize::MAX,
            ..ctx(&items)
        };
        assert_eq!(ctx.panel_height(""), u16::MAX);
    }
}
