use tui_controls::DropdownValue;

use crate::action::AppAction;
use crate::state::{filter_items, AppState, Focus};

/// Apply an action; returns true when the state changed
pub fn reducer(state: &mut AppState, action: AppAction) -> bool {
    match action {
        AppAction::CountryChanged(value) => {
            let country = match value {
                DropdownValue::Single(value) => Some(value),
                DropdownValue::Multiple(values) => values.first().copied(),
            };
            state.country = country;
            state.status = format!("Country: {}", state.country_name().unwrap_or("none"));
            true
        }
        AppAction::CountrySearch(input) => {
            state.visible_countries = filter_items(&state.countries, &input.text);
            state.country_query = input.text;
            true
        }
        AppAction::CountryAdd(name) => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return false;
            }
            state.add_country(name.clone());
            state.country_query.clear();
            state.visible_countries = state.countries.clone();
            state.status = format!("Added {name}");
            true
        }
        AppAction::CountryScrolled(metrics) => {
            if state.country_scroll == metrics {
                return false;
            }
            if metrics.at_end() {
                tracing::debug!(total = metrics.total, "Country list scrolled to the end");
            }
            state.country_scroll = metrics;
            true
        }
        AppAction::ToppingsChanged(value) => {
            state.selected_toppings = value.as_slice().to_vec();
            state.status = format!("{} topping(s) selected", state.selected_toppings.len());
            true
        }
        AppAction::ToppingsSearch(input) => {
            state.visible_toppings = filter_items(&state.toppings, &input.text);
            true
        }
        AppAction::NewsletterToggled(checked) => {
            state.newsletter = checked;
            true
        }
        AppAction::FormSubmit => {
            if state.dialog_open {
                return false;
            }
            state.dialog_open = true;
            true
        }
        AppAction::DialogConfirm => {
            if !state.dialog_open {
                return false;
            }
            state.dialog_open = false;
            state.status = format!("Submitted. {}", state.summary());
            tracing::info!(summary = %state.summary(), "Form submitted");
            true
        }
        AppAction::DialogCancel => {
            let changed = state.dialog_open;
            state.dialog_open = false;
            changed
        }
        AppAction::FocusNext | AppAction::FocusPrev if state.dialog_open => false,
        AppAction::FocusNext => {
            state.focus = state.focus.next();
            true
        }
        AppAction::FocusPrev => {
            state.focus = state.focus.prev();
            true
        }
        AppAction::Quit => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_controls::{Item, SearchInput};

    fn state() -> AppState {
        AppState::new(vec![
            Item::new("France", 33),
            Item::new("Germany", 49),
            Item::new("Finland", 358),
        ])
    }

    fn search(text: &str) -> AppAction {
        AppAction::CountrySearch(SearchInput {
            id: "country".into(),
            text: text.into(),
        })
    }

    #[test]
    fn test_search_filters_visible_items() {
        let mut state = state();
        assert!(reducer(&mut state, search("f")));
        assert_eq!(state.visible_countries.len(), 2);
        assert_eq!(state.countries.len(), 3);

        reducer(&mut state, search(""));
        assert_eq!(state.visible_countries.len(), 3);
    }

    #[test]
    fn test_add_country_resets_query() {
        let mut state = state();
        reducer(&mut state, search("Peru"));
        assert!(state.visible_countries.is_empty());

        assert!(reducer(&mut state, AppAction::CountryAdd("Peru".into())));
        assert!(state.country_query.is_empty());
        assert_eq!(state.visible_countries.len(), 4);
        assert!(!reducer(&mut state, AppAction::CountryAdd("  ".into())));
    }

    #[test]
    fn test_country_change_updates_status() {
        let mut state = state();
        reducer(&mut state, AppAction::CountryChanged(DropdownValue::Single(49)));
        assert_eq!(state.country, Some(49));
        assert_eq!(state.status, "Country: Germany");
    }

    #[test]
    fn test_submit_confirm_flow() {
        let mut state = state();
        reducer(&mut state, AppAction::ToppingsChanged(DropdownValue::Multiple(vec![])));
        assert!(reducer(&mut state, AppAction::FormSubmit));
        assert!(state.dialog_open);

        assert!(!reducer(&mut state, AppAction::FocusNext));
        assert_eq!(state.focus, Focus::Country);

        assert!(reducer(&mut state, AppAction::DialogConfirm));
        assert!(!state.dialog_open);
        assert!(state.status.contains("no toppings"));
        assert!(!reducer(&mut state, AppAction::DialogCancel));
    }

    #[test]
    fn test_repeated_scroll_is_not_a_change() {
        let mut state = state();
        let metrics = tui_controls::ScrollMetrics {
            offset: 1,
            visible: 2,
            total: 3,
        };
        assert!(reducer(&mut state, AppAction::CountryScrolled(metrics)));
        assert!(!reducer(&mut state, AppAction::CountryScrolled(metrics)));
    }
}
