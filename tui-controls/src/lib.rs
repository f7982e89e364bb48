//! tui-controls: dialogs, dropdowns and other form controls for ratatui apps
//!
//! Components take props every frame and hand back actions built from the
//! callbacks in those props. The host keeps the data; components keep only
//! interaction state such as an open panel or the search text.
//!
//! # Example
//! ```ignore
//! use tui_controls::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(infer_categories)]
//! enum AppAction {
//!     CountryChanged(DropdownValue<u32>),
//!     CountrySearch(SearchInput),
//!     DialogConfirm,
//!     DialogCancel,
//! }
//!
//! let registry = ListenerRegistry::new();
//! let mut country = Dropdown::<u32>::new().mounted(&registry);
//!
//! let actions: Vec<AppAction> = country
//!     .handle_event(&event, DropdownProps {
//!         id: "country",
//!         items: &state.countries,
//!         label: "Country",
//!         is_focused: true,
//!         on_change: Some(AppAction::CountryChanged),
//!         ..Default::default()
//!     })
//!     .into_iter()
//!     .collect();
//! ```

// Re-export everything from core
pub use tui_controls_core::*;

// Re-export derive macros
pub use tui_controls_macros::{Action, BindingContext};

/// Components
pub use tui_controls_components as components;
pub use tui_controls_components::{
    Checkbox, CheckboxProps, Dialog, DialogButton, DialogProps, DialogTheme, Dropdown,
    DropdownProps, DropdownValue, Icon, Item, ScrollMetrics, SearchInput, Tooltip,
    TooltipPosition, TooltipProps,
};

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use tui_controls_core::{Action, ActionCategory, BindingContext, Component};

    // Events and listeners
    pub use tui_controls_core::{
        process_raw_event, spawn_event_poller, EventKind, EventMask, EventType, ListenerGuard,
        ListenerId, ListenerRegistry, RawEvent,
    };

    // Keybindings
    pub use tui_controls_core::{format_key_for_display, parse_key_string, Keybindings};

    // Store
    pub use tui_controls_core::{
        LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, StoreWithMiddleware,
    };

    // Components
    pub use tui_controls_components::prelude::*;

    // Derive macros
    pub use tui_controls_macros::{Action, BindingContext};

    // Ratatui re-exports
    pub use tui_controls_core::{Color, Frame, Line, Modifier, Rect, Span, Style, Text};
}
