//! Component trait for props-driven UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from props and reports user intent as actions
///
/// Rules every component in this library follows:
/// 1. Props carry all host-owned data (items, labels, selected value)
/// 2. `handle_event` returns actions built from callback props; it never
///    touches host state
/// 3. Local interaction state (open flag, search text, button focus, last
///    rendered hit areas) lives in `&mut self`
///
/// Components receive the bare [`EventKind`]. Focus is passed through props
/// so that components stay independent of how the host tracks focus.
///
/// # Example
///
/// ```ignore
/// use tui_controls::{Component, EventKind, Frame, Rect};
///
/// struct Badge;
///
/// struct BadgeProps<'a> {
///     text: &'a str,
///     is_focused: bool,
///     on_press: fn() -> AppAction,
/// }
///
/// impl Component<AppAction> for Badge {
///     type Props<'a> = BadgeProps<'a>;
///
///     fn handle_event(
///         &mut self,
///         event: &EventKind,
///         props: Self::Props<'_>,
///     ) -> impl IntoIterator<Item = AppAction> {
///         match event {
///             EventKind::Key(key) if props.is_focused && key.code == KeyCode::Enter => {
///                 Some((props.on_press)())
///             }
///             _ => None,
///         }
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         frame.render_widget(Paragraph::new(props.text), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return the actions the host should dispatch
    ///
    /// Returns anything implementing `IntoIterator<Item = A>`:
    /// `None` for nothing, `Some(action)` for one, a `Vec` for several.
    ///
    /// Render-only components keep the default, which emits nothing.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
