use tui_controls::{Action, DropdownValue, ScrollMetrics, SearchInput};

/// Everything that can happen in the gallery
#[derive(Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
pub enum AppAction {
    // Country dropdown
    CountryChanged(DropdownValue<u32>),
    CountrySearch(SearchInput),
    CountryAdd(String),
    CountryScrolled(ScrollMetrics),

    // Toppings dropdown
    ToppingsChanged(DropdownValue<String>),
    ToppingsSearch(SearchInput),

    NewsletterToggled(bool),

    FormSubmit,
    DialogConfirm,
    DialogCancel,

    FocusNext,
    FocusPrev,
    Quit,
}
