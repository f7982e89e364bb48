//! Tests for #[derive(Action)] and #[derive(BindingContext)]

#![allow(dead_code)]

use tui_controls::{Action, ActionCategory, BindingContext, DropdownValue, Keybindings};

#[derive(Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
enum FormAction {
    CountryChanged(DropdownValue<u32>),
    CountrySearch { text: String },
    DialogConfirm,
    DialogCancel,
    #[action(category = "dialog")]
    Dismiss,
    #[action(skip_category)]
    NewsletterToggled(bool),
    FocusNext,
    Quit,
}

#[test]
fn test_names() {
    assert_eq!(FormAction::CountryChanged(DropdownValue::Single(1)).name(), "CountryChanged");
    assert_eq!(
        FormAction::CountrySearch {
            text: "fr".into()
        }
        .name(),
        "CountrySearch"
    );
    assert_eq!(FormAction::Quit.name(), "Quit");
}

#[test]
fn test_inferred_categories() {
    assert_eq!(
        FormAction::CountryChanged(DropdownValue::Multiple(vec![])).category(),
        Some("country")
    );
    assert_eq!(FormAction::DialogConfirm.category(), Some("dialog"));
    assert_eq!(FormAction::FocusNext.category(), None);
    assert_eq!(FormAction::Quit.category(), None);
}

#[test]
fn test_category_overrides() {
    assert_eq!(FormAction::Dismiss.category(), Some("dialog"));
    assert_eq!(FormAction::NewsletterToggled(true).category(), None);
}

#[test]
fn test_predicates() {
    assert!(FormAction::DialogCancel.is_dialog());
    assert!(FormAction::Dismiss.is_dialog());
    assert!(!FormAction::Quit.is_dialog());
    assert!(FormAction::CountrySearch { text: String::new() }.is_country());
}

#[test]
fn test_category_trait() {
    fn category_of<A: ActionCategory>(action: &A) -> Option<&'static str> {
        action.category()
    }
    assert_eq!(category_of(&FormAction::DialogConfirm), Some("dialog"));
}

#[derive(BindingContext, Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum GalleryContext {
    Form,
    Dropdown,
    ConfirmDialog,
}

#[test]
fn test_binding_context_names() {
    assert_eq!(GalleryContext::Form.name(), "form");
    assert_eq!(GalleryContext::ConfirmDialog.name(), "confirm_dialog");
    assert_eq!(
        GalleryContext::from_name("dropdown"),
        Some(GalleryContext::Dropdown)
    );
    assert_eq!(GalleryContext::from_name("nope"), None);
    assert_eq!(GalleryContext::all().len(), 3);
}

#[test]
fn test_binding_context_in_keybindings() {
    let mut bindings: Keybindings<GalleryContext> = Keybindings::new();
    bindings.add_global("quit", vec!["q".into()]);
    bindings.add(
        GalleryContext::ConfirmDialog,
        "confirm",
        vec!["y".into(), "enter".into()],
    );

    let y = tui_controls::key("y");
    assert_eq!(bindings.command(&y, GalleryContext::ConfirmDialog), Some("confirm"));
    assert_eq!(bindings.command(&y, GalleryContext::Form), None);

    let q = tui_controls::key("q");
    assert_eq!(bindings.command(&q, GalleryContext::Form), Some("quit"));
}
