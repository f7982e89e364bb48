//! Core traits and types for tui-controls
//!
//! The building blocks shared by every component and by host applications:
//!
//! - **Component**: props in, actions out, local UI state in `&mut self`
//! - **Action**: host-defined intents built from component callbacks
//! - **EventKind**: keyboard, mouse, scroll, resize and tick events
//! - **ListenerRegistry**: scoped subscriptions for events outside a
//!   component's own area, released when the guard drops
//! - **Store**: host state container with the reducer pattern
//! - **Keybindings**: context-aware key mapping loadable from config
//!
//! # Host loop
//!
//! ```ignore
//! use tui_controls_core::prelude::*;
//!
//! let registry = ListenerRegistry::new();
//! let mut country = Dropdown::<u32>::new().mounted(&registry);
//!
//! loop {
//!     let event = process_raw_event(event_rx.recv().await?);
//!
//!     // Focused component gets everything, listeners get the rest
//!     let wants = focus == Focus::Country || registry.wants(country.listener_id()?, &event);
//!     if wants {
//!         for action in country.handle_event(&event, country_props(&state)) {
//!             store.dispatch(action);
//!         }
//!     }
//! }
//! ```

pub mod action;
pub mod component;
pub mod event;
pub mod keybindings;
pub mod listeners;
pub mod store;
pub mod testing;

pub use action::{Action, ActionCategory};
pub use component::Component;
pub use event::{EventKind, EventMask, EventType};
pub use keybindings::{format_key_for_display, parse_key_string, BindingContext, Keybindings};
pub use listeners::{
    process_raw_event, spawn_event_poller, ListenerGuard, ListenerId, ListenerRegistry, RawEvent,
};
pub use store::{LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, StoreWithMiddleware};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

pub use testing::{buffer_to_string_plain, char_key, key, left_click, RenderHarness};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionCategory};
    pub use crate::component::Component;
    pub use crate::event::{EventKind, EventMask, EventType};
    pub use crate::keybindings::{
        format_key_for_display, parse_key_string, BindingContext, Keybindings,
    };
    pub use crate::listeners::{
        process_raw_event, spawn_event_poller, ListenerGuard, ListenerId, ListenerRegistry,
        RawEvent,
    };
    pub use crate::store::{
        LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, StoreWithMiddleware,
    };

    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
