//! Action traits for host applications

use std::fmt::Debug;

/// Marker trait for actions a host builds from component callbacks
///
/// Components never mutate host data. They return actions built through
/// the callback props (`on_change`, `on_positive`, ...) and the host
/// dispatches them to its store.
///
/// Use `#[derive(Action)]` from `tui-controls-macros` to implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Variant name, used for logging
    fn name(&self) -> &'static str;
}

/// Actions grouped by a category (e.g. every `Dropdown*` variant)
///
/// Generated by `#[derive(Action)]` with `#[action(infer_categories)]`.
pub trait ActionCategory: Action {
    /// Category of this action, if it has one
    fn category(&self) -> Option<&'static str>;
}
