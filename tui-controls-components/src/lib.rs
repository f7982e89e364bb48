//! Pre-built UI components for tui-controls
//!
//! Components implement the `Component<A>` trait: the host passes props in
//! on every frame and receives actions built from the callback props.
//!
//! # Components
//!
//! - [`Dialog`] - Centered modal with positive/neutral/negative buttons
//! - [`Dropdown`] - Single or multiple selection with search and drop-up
//! - [`Checkbox`] - `[x] label` toggle
//! - [`Tooltip`] - Icon that shows a popup while hovered
//!
//! # Example
//!
//! ```ignore
//! use tui_controls_components::{Dropdown, DropdownProps, DropdownValue, Item};
//!
//! let mut country = Dropdown::with_value(DropdownValue::Single(33), &items);
//!
//! // In your render function:
//! country.render(frame, area, DropdownProps {
//!     id: "country",
//!     items: &state.visible_countries,
//!     label: "Country",
//!     searchable: true,
//!     is_focused: state.focus == Focus::Country,
//!     on_change: Some(Action::CountryChanged),
//!     on_search_input_change: Some(Action::CountrySearch),
//!     ..Default::default()
//! });
//! ```

mod checkbox;
mod dialog;
pub mod dropdown;
mod icons;
mod overlay;
mod tooltip;

pub use checkbox::{checkbox_line, Checkbox, CheckboxProps};
pub use dialog::{Dialog, DialogButton, DialogProps, DialogTheme};
pub use dropdown::{
    Dropdown, DropdownMsg, DropdownProps, DropdownState, DropdownValue, Item, Placement,
    ScrollMetrics, SearchInput,
};
pub use icons::{divider, Icon};
pub use overlay::{centered_rect, clamp_rect, dim_buffer, render_backdrop, BackdropStyle};
pub use tooltip::{Tooltip, TooltipPosition, TooltipProps};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Checkbox, CheckboxProps, Dialog, DialogProps, DialogTheme, Dropdown, DropdownProps,
        DropdownValue, Icon, Item, ScrollMetrics, SearchInput, Tooltip, TooltipPosition,
        TooltipProps,
    };
}
