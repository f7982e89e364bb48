//! Host-level scenarios: a store owns the items and applies dropdown actions

use tui_controls::testing::{find_row, left_click, type_text, RenderHarness};
use tui_controls::{
    count_emitted, Action, Component, Dialog, DialogProps, Dropdown, DropdownProps, DropdownValue,
    EventKind, Item, ListenerRegistry, Rect, SearchInput, Store,
};

#[derive(Action, Clone, Debug, PartialEq)]
enum HostAction {
    Changed(DropdownValue<u32>),
    Search(SearchInput),
    AddOption(String),
}

#[derive(Default)]
struct HostState {
    all: Vec<Item<u32>>,
    visible: Vec<Item<u32>>,
    value: Option<DropdownValue<u32>>,
}

fn reducer(state: &mut HostState, action: HostAction) -> bool {
    match action {
        HostAction::Changed(value) => {
            state.value = Some(value);
            true
        }
        HostAction::Search(input) => {
            let needle = input.text.to_lowercase();
            state.visible = state
                .all
                .iter()
                .filter(|item| item.text().to_lowercase().contains(&needle))
                .cloned()
                .collect();
            true
        }
        HostAction::AddOption(text) => {
            let value = 100 + state.all.len() as u32;
            state.all.push(Item::new(text, value));
            state.visible = state.all.clone();
            true
        }
    }
}

fn store(items: Vec<Item<u32>>) -> Store<HostState, HostAction> {
    Store::new(
        HostState {
            visible: items.clone(),
            all: items,
            value: None,
        },
        reducer,
    )
}

fn props(
    state: &HostState,
    multiple: bool,
    searchable: bool,
) -> DropdownProps<'_, u32, HostAction> {
    DropdownProps {
        id: "letters",
        items: &state.visible,
        label: "letter",
        multiple,
        searchable,
        add_option: searchable,
        is_focused: true,
        on_change: Some(HostAction::Changed),
        on_search_input_change: Some(HostAction::Search),
        add_option_handler: Some(HostAction::AddOption),
        ..Default::default()
    }
}

fn ab() -> Vec<Item<u32>> {
    vec![Item::new("A", 1), Item::new("B", 2)]
}

const AREA: Rect = Rect::new(0, 0, 30, 4);

fn render(
    harness: &mut RenderHarness,
    dropdown: &mut Dropdown<u32>,
    props: DropdownProps<'_, u32, HostAction>,
) -> String {
    harness.render_to_string_plain(|frame| dropdown.render(frame, AREA, props))
}

fn click(
    store: &mut Store<HostState, HostAction>,
    dropdown: &mut Dropdown<u32>,
    event: EventKind,
    multiple: bool,
    searchable: bool,
) -> Vec<HostAction> {
    let actions: Vec<_> = dropdown
        .handle_event(&event, props(store.state(), multiple, searchable))
        .into_iter()
        .collect();
    for action in actions.clone() {
        store.dispatch(action);
    }
    actions
}

/// Row of the first panel line that contains `text`, below the trigger
fn panel_row(output: &str, text: &str) -> u16 {
    let below_trigger: String = output.lines().skip(4).collect::<Vec<_>>().join("\n");
    find_row(&below_trigger, text).map(|row| row + 4).unwrap()
}

#[test]
fn single_select_click_b() {
    let mut harness = RenderHarness::new(30, 12);
    let mut store = store(ab());
    let mut dropdown = Dropdown::new();

    render(&mut harness, &mut dropdown, props(store.state(), false, false));
    click(&mut store, &mut dropdown, left_click(3, 2), false, false);
    let output = render(&mut harness, &mut dropdown, props(store.state(), false, false));

    let row = panel_row(&output, "B");
    let actions = click(&mut store, &mut dropdown, left_click(3, row), false, false);
    assert_eq!(actions, vec![HostAction::Changed(DropdownValue::Single(2))]);

    let output = render(&mut harness, &mut dropdown, props(store.state(), false, false));
    assert_eq!(output.lines().nth(2).map(|line| line.contains("B")), Some(true));
    assert_eq!(dropdown.state().display_text(&props(store.state(), false, false).context()), "B");
}

#[test]
fn single_value_displays_item_text() {
    let items = vec![Item::new("Alpha", 1), Item::new("Beta", 2), Item::new("Gamma", 3)];
    let mut harness = RenderHarness::new(30, 12);
    let store = store(items.clone());

    for item in &items {
        let mut dropdown = Dropdown::with_value(DropdownValue::Single(item.value), &items);
        let output = render(&mut harness, &mut dropdown, props(store.state(), false, false));
        assert!(output.lines().nth(2).unwrap().contains(item.text()));
    }
}

#[test]
fn multi_select_click_order_and_toggle() {
    let mut harness = RenderHarness::new(30, 12);
    let mut store = store(ab());
    let mut dropdown = Dropdown::new();

    render(&mut harness, &mut dropdown, props(store.state(), true, false));
    click(&mut store, &mut dropdown, left_click(3, 2), true, false);
    let output = render(&mut harness, &mut dropdown, props(store.state(), true, false));
    let row_a = panel_row(&output, "A");
    let row_b = panel_row(&output, "B");

    click(&mut store, &mut dropdown, left_click(3, row_a), true, false);
    click(&mut store, &mut dropdown, left_click(3, row_b), true, false);
    assert_eq!(store.state().value, Some(DropdownValue::Multiple(vec![1, 2])));

    let actions = click(&mut store, &mut dropdown, left_click(3, row_a), true, false);
    assert_eq!(actions, vec![HostAction::Changed(DropdownValue::Multiple(vec![2]))]);
    assert!(dropdown.is_open());
}

#[test]
fn select_all_twice() {
    let items: Vec<Item<u32>> = std::iter::once(Item::group("Vowels", 0))
        .chain((1..=5).map(|n| Item::new(format!("Letter {n}"), n)))
        .collect();
    let mut harness = RenderHarness::new(30, 16);
    let mut store = store(items);
    let mut dropdown = Dropdown::new();
    fn with_all(state: &HostState) -> DropdownProps<'_, u32, HostAction> {
        DropdownProps {
            enable_select_all: true,
            max_visible_rows: 10,
            ..props(state, true, false)
        }
    }

    render(&mut harness, &mut dropdown, with_all(store.state()));
    dropdown.handle_event(&left_click(3, 2), with_all(store.state()));
    let output = render(&mut harness, &mut dropdown, with_all(store.state()));
    let row = panel_row(&output, "All");

    let actions: Vec<_> = dropdown
        .handle_event(&left_click(3, row), with_all(store.state()))
        .into_iter()
        .collect();
    assert_eq!(actions, vec![HostAction::Changed(DropdownValue::Multiple(vec![1, 2, 3, 4, 5]))]);

    let actions: Vec<_> = dropdown
        .handle_event(&left_click(3, row), with_all(store.state()))
        .into_iter()
        .collect();
    assert_eq!(actions, vec![HostAction::Changed(DropdownValue::Multiple(vec![]))]);
}

#[test]
fn search_without_matches_offers_add() {
    let mut harness = RenderHarness::new(30, 12);
    let mut store = store(ab());
    let mut dropdown = Dropdown::new();

    render(&mut harness, &mut dropdown, props(store.state(), false, true));
    let mut searches = Vec::new();
    for event in type_text("xyz") {
        searches.extend(click(&mut store, &mut dropdown, event, false, true));
    }
    assert_eq!(count_emitted!(searches, HostAction::Search(_)), 3);
    assert!(store.state().visible.is_empty());

    let output = render(&mut harness, &mut dropdown, props(store.state(), false, true));
    assert!(output.contains("Add xyz"));
    assert!(output.contains("No letter found"));

    let row = panel_row(&output, "Add xyz");
    let actions = click(&mut store, &mut dropdown, left_click(3, row), false, true);
    assert_eq!(actions, vec![HostAction::AddOption("xyz".into())]);
    assert!(dropdown.state().search().is_empty());

    let output = render(&mut harness, &mut dropdown, props(store.state(), false, true));
    assert!(output.contains("xyz"));
    assert!(!output.contains("Add xyz"));
}

#[test]
fn listeners_follow_mounts() {
    let registry = ListenerRegistry::new();
    let dropdowns: Vec<Dropdown<u32>> = (0..3)
        .map(|_| Dropdown::new().mounted(&registry))
        .collect();
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.listeners_for(&left_click(0, 0)).len(), 3);

    drop(dropdowns);
    assert!(registry.is_empty());
}

#[test]
fn hidden_dialog_renders_nothing() {
    let mut harness = RenderHarness::new(40, 10);
    let mut dialog = Dialog::new();

    let output = harness.render_to_string_plain(|frame| {
        let props: DialogProps<'_, HostAction> = DialogProps {
            title: "simple",
            positive_label: Some("Delete"),
            negative_label: Some("Cancel"),
            is_visible: false,
            ..Default::default()
        };
        dialog.render(frame, frame.area(), props)
    });
    assert!(output.trim().is_empty());
}
