//! Layout, component wiring and event routing for the gallery form

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};
use tui_controls::{
    format_key_for_display, Checkbox, CheckboxProps, Component, Dialog, DialogProps, DialogTheme,
    Dropdown, DropdownProps, DropdownValue, EventKind, Keybindings, ListenerRegistry, Tooltip,
    TooltipProps,
};

use crate::action::AppAction;
use crate::config::{DropdownSettings, GalleryConfig, GalleryContext};
use crate::state::{AppState, Focus};

const FORM_WIDTH: u16 = 48;

fn country_props<'a>(
    state: &'a AppState,
    settings: &DropdownSettings,
) -> DropdownProps<'a, u32, AppAction> {
    DropdownProps {
        id: "country",
        items: &state.visible_countries,
        label: "Country",
        tooltip: Some("Type to filter. Unknown names can be added."),
        required: true,
        searchable: settings.searchable,
        add_option: settings.add_option,
        max_visible_rows: settings.max_visible_rows,
        is_focused: state.focus == Focus::Country && !state.dialog_open,
        on_change: Some(AppAction::CountryChanged),
        on_search_input_change: Some(AppAction::CountrySearch),
        on_scroll: Some(AppAction::CountryScrolled),
        add_option_handler: Some(AppAction::CountryAdd),
        ..Default::default()
    }
}

fn toppings_props<'a>(
    state: &'a AppState,
    settings: &DropdownSettings,
) -> DropdownProps<'a, String, AppAction> {
    DropdownProps {
        id: "toppings",
        items: &state.visible_toppings,
        label: "Toppings",
        placeholder: "Pick toppings",
        multiple: true,
        searchable: settings.searchable,
        enable_select_all: settings.enable_select_all,
        max_visible_rows: settings.max_visible_rows,
        is_focused: state.focus == Focus::Toppings && !state.dialog_open,
        on_change: Some(AppAction::ToppingsChanged),
        on_search_input_change: Some(AppAction::ToppingsSearch),
        ..Default::default()
    }
}

fn region_props(state: &AppState) -> DropdownProps<'_, u32, AppAction> {
    DropdownProps {
        id: "region",
        items: &state.regions,
        label: "Region",
        tooltip: Some("Regions open once a country is chosen"),
        disabled: true,
        ..Default::default()
    }
}

fn newsletter_props(state: &AppState) -> CheckboxProps<'_, AppAction> {
    CheckboxProps {
        label: "Send me the newsletter",
        checked: state.newsletter,
        disabled: false,
        is_focused: state.focus == Focus::Newsletter && !state.dialog_open,
        on_change: AppAction::NewsletterToggled,
    }
}

fn dialog_props<'a>(state: &AppState, summary: &'a str) -> DialogProps<'a, AppAction> {
    DialogProps {
        id: "confirm-submit",
        title: "Submit form",
        theme: DialogTheme::Info,
        body: Text::raw(summary),
        positive_label: Some("Submit"),
        negative_label: Some("Back"),
        is_visible: state.dialog_open,
        is_focused: state.dialog_open,
        on_positive: Some(|| AppAction::DialogConfirm),
        on_negative: Some(|| AppAction::DialogCancel),
        ..Default::default()
    }
}

/// Component instances and the config they were built from
pub struct GalleryUi {
    country: Dropdown<u32>,
    toppings: Dropdown<String>,
    region: Dropdown<u32>,
    newsletter: Checkbox,
    title_tooltip: Tooltip,
    dialog: Dialog,
    registry: ListenerRegistry,
    keybindings: Keybindings<GalleryContext>,
    settings: DropdownSettings,
}

impl GalleryUi {
    pub fn new(config: GalleryConfig, state: &AppState) -> Self {
        let registry = ListenerRegistry::new();
        let toppings = Dropdown::with_value(
            DropdownValue::Multiple(state.selected_toppings.clone()),
            &state.toppings,
        );

        Self {
            country: Dropdown::new().mounted(&registry),
            toppings: toppings.mounted(&registry),
            region: Dropdown::new().mounted(&registry),
            newsletter: Checkbox::new(),
            title_tooltip: Tooltip::new(),
            dialog: Dialog::new(),
            registry,
            keybindings: config.keybindings,
            settings: config.dropdown,
        }
    }

    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    /// Route one event to the components and keybindings
    pub fn handle_event(&mut self, event: &EventKind, state: &AppState) -> Vec<AppAction> {
        if state.dialog_open {
            return self.handle_dialog_event(event, state);
        }

        let mut actions = Vec::new();
        let settings = &self.settings;

        let country = country_props(state, settings);
        if country.is_focused || self.wants(self.country.listener_id(), event) {
            actions.extend(self.country.handle_event(event, country));
        }
        let toppings = toppings_props(state, settings);
        if toppings.is_focused || self.wants(self.toppings.listener_id(), event) {
            actions.extend(self.toppings.handle_event(event, toppings));
        }
        if self.wants(self.region.listener_id(), event) {
            actions.extend(self.region.handle_event(event, region_props(state)));
        }
        actions.extend(self.newsletter.handle_event(event, newsletter_props(state)));
        self.title_tooltip.track_pointer(event);

        if let EventKind::Key(key) = event {
            match self.keybindings.command(key, GalleryContext::Form) {
                Some("quit") => actions.push(AppAction::Quit),
                Some("focus_next") => actions.push(AppAction::FocusNext),
                Some("focus_prev") => actions.push(AppAction::FocusPrev),
                Some("submit") => actions.push(AppAction::FormSubmit),
                Some(other) => tracing::trace!(command = other, "Unhandled form command"),
                None => {}
            }
        }
        actions
    }

    fn handle_dialog_event(&mut self, event: &EventKind, state: &AppState) -> Vec<AppAction> {
        let summary = state.summary();
        let mut actions: Vec<AppAction> = self
            .dialog
            .handle_event(event, dialog_props(state, &summary))
            .into_iter()
            .collect();

        if let EventKind::Key(key) = event {
            match self.keybindings.command(key, GalleryContext::Dialog) {
                Some("confirm") => actions.push(AppAction::DialogConfirm),
                Some("cancel") => actions.push(AppAction::DialogCancel),
                Some("quit") => actions.push(AppAction::Quit),
                _ => {}
            }
        }
        actions
    }

    fn wants(&self, id: Option<tui_controls::ListenerId>, event: &EventKind) -> bool {
        id.is_some_and(|id| self.registry.wants(id, event))
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let area = frame.area();
        let [_, column, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(FORM_WIDTH),
            Constraint::Fill(1),
        ])
        .areas(area);

        let field = Dropdown::<u32>::height(true);
        let [
            title_area,
            country_area,
            toppings_area,
            region_area,
            newsletter_area,
            _,
            status_area,
            help_area,
        ] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(field),
            Constraint::Length(field),
            Constraint::Length(field),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(column);

        self.render_title(frame, title_area);

        let newsletter = newsletter_props(state);
        self.newsletter.render(frame, newsletter_area, newsletter);
        frame.render_widget(
            Paragraph::new(Span::styled(&state.status, Style::default().fg(Color::Green))),
            status_area,
        );
        frame.render_widget(
            Paragraph::new(self.help_line()).style(Style::default().fg(Color::DarkGray)),
            help_area,
        );

        // Open panels overlap the fields below, so they draw last
        let settings = &self.settings;
        self.region.render(frame, region_area, region_props(state));
        if !self.toppings.is_open() {
            self.toppings.render(frame, toppings_area, toppings_props(state, settings));
        }
        if !self.country.is_open() {
            self.country.render(frame, country_area, country_props(state, settings));
        }
        if self.toppings.is_open() {
            self.toppings.render(frame, toppings_area, toppings_props(state, settings));
        }
        if self.country.is_open() {
            self.country.render(frame, country_area, country_props(state, settings));
        }

        let summary = state.summary();
        self.dialog.render(frame, area, dialog_props(state, &summary));
    }

    fn render_title(&mut self, frame: &mut Frame, area: Rect) {
        let title = " Order form ";
        let line = Line::from(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), Rect { height: 1, ..area });

        let icon_area = Rect::new(area.x + title.len() as u16, area.y, 1, 1);
        let props = TooltipProps {
            content: "Fields marked * are required",
            position: self.settings.tooltip_position,
            ..Default::default()
        };
        Component::<AppAction>::render(&mut self.title_tooltip, frame, icon_area, props);
    }

    fn help_line(&self) -> String {
        let hint = |command: &str, context| {
            self.keybindings
                .hint(command, context)
                .map(format_key_for_display)
                .unwrap_or_else(|| "-".to_string())
        };
        format!(
            "{} next  {} submit  {} quit",
            hint("focus_next", GalleryContext::Form),
            hint("submit", GalleryContext::Form),
            hint("quit", GalleryContext::Form),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_controls::testing::{find_row, key, left_click, RenderHarness};
    use tui_controls::Item;

    use crate::reducer::reducer;

    fn setup() -> (GalleryUi, AppState) {
        let state = AppState::new(vec![
            Item::new("France", 33),
            Item::new("Germany", 49),
        ]);
        let ui = GalleryUi::new(GalleryConfig::builtin(), &state);
        (ui, state)
    }

    fn apply(ui: &mut GalleryUi, state: &mut AppState, event: EventKind) -> Vec<AppAction> {
        let actions = ui.handle_event(&event, state);
        for action in &actions {
            reducer(state, action.clone());
        }
        actions
    }

    #[test]
    fn test_every_dropdown_listens() {
        let (ui, _) = setup();
        assert_eq!(ui.registry().len(), 3);
    }

    #[test]
    fn test_renders_form() {
        let (mut ui, state) = setup();
        let mut harness = RenderHarness::new(60, 24);
        let output = harness.render_to_string_plain(|frame| ui.render(frame, &state));

        assert!(output.contains("Order form"));
        assert!(output.contains("Country *"));
        assert!(output.contains("1 Toppings(s) selected"));
        assert!(output.contains("Disabled"));
        assert!(output.contains("[ ] Send me the newsletter"));
        assert!(output.contains("Tab next"));
    }

    #[test]
    fn test_tab_moves_focus() {
        let (mut ui, mut state) = setup();
        let actions = apply(&mut ui, &mut state, EventKind::Key(key("tab")));
        assert_eq!(actions, vec![AppAction::FocusNext]);
        assert_eq!(state.focus, Focus::Toppings);
    }

    #[test]
    fn test_search_then_pick_country() {
        let (mut ui, mut state) = setup();
        let mut harness = RenderHarness::new(60, 24);
        harness.render(|frame| ui.render(frame, &state));

        apply(&mut ui, &mut state, EventKind::Key(key("g")));
        assert_eq!(state.country_query, "g");
        assert_eq!(state.visible_countries.len(), 1);

        let output = harness.render_to_string_plain(|frame| ui.render(frame, &state));
        let row = find_row(&output, "Germany").unwrap();
        let line = output.lines().nth(usize::from(row)).unwrap();
        let column = line[..line.find("Germany").unwrap()].chars().count() as u16;

        apply(&mut ui, &mut state, left_click(column, row));
        assert_eq!(state.country, Some(49));
    }

    #[test]
    fn test_submit_opens_dialog_and_y_confirms() {
        let (mut ui, mut state) = setup();
        apply(&mut ui, &mut state, EventKind::Key(key("ctrl+s")));
        assert!(state.dialog_open);

        // Typing goes to the dialog, not the country search
        apply(&mut ui, &mut state, EventKind::Key(key("y")));
        assert!(!state.dialog_open);
        assert!(state.country_query.is_empty());
        assert!(state.status.starts_with("Submitted"));
    }

    #[test]
    fn test_esc_cancels_dialog() {
        let (mut ui, mut state) = setup();
        apply(&mut ui, &mut state, EventKind::Key(key("ctrl+s")));
        let actions = apply(&mut ui, &mut state, EventKind::Key(key("esc")));
        assert_eq!(actions, vec![AppAction::DialogCancel]);
        assert!(!state.dialog_open);
    }

    #[test]
    fn test_ctrl_q_quits() {
        let (mut ui, mut state) = setup();
        let actions = apply(&mut ui, &mut state, EventKind::Key(key("ctrl+q")));
        assert!(actions.contains(&AppAction::Quit));
    }
}
