//! Host-side state store with the reducer pattern
//!
//! Components report intent through actions; hosts fold those actions into
//! their own state here.

use crate::Action;
use std::marker::PhantomData;

/// A reducer function that applies an action to state
///
/// Returns `true` if the state changed and a re-render is needed.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// State container with a single mutation entry point
///
/// # Example
/// ```ignore
/// #[derive(Default)]
/// struct FormState {
///     country: Option<u32>,
/// }
///
/// #[derive(Action, Clone, Debug)]
/// enum FormAction {
///     CountryChange(DropdownValue<u32>),
/// }
///
/// fn reducer(state: &mut FormState, action: FormAction) -> bool {
///     match action {
///         FormAction::CountryChange(DropdownValue::Single(id)) => {
///             state.country = Some(id);
///             true
///         }
///         FormAction::CountryChange(_) => false,
///     }
/// }
///
/// let mut store = Store::new(FormState::default(), reducer);
/// store.dispatch(FormAction::CountryChange(DropdownValue::Single(7)));
/// ```
pub struct Store<S, A: Action> {
    state: S,
    reducer: Reducer<S, A>,
    _marker: PhantomData<A>,
}

impl<S, A: Action> Store<S, A> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Apply an action; returns `true` if a re-render is needed
    pub fn dispatch(&mut self, action: A) -> bool {
        (self.reducer)(&mut self.state, action)
    }

    /// Current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Mutable state, for initialization outside the action flow
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }
}

/// Store that runs middleware around every dispatch
pub struct StoreWithMiddleware<S, A: Action, M: Middleware<A>> {
    store: Store<S, A>,
    middleware: M,
}

impl<S, A: Action, M: Middleware<A>> StoreWithMiddleware<S, A, M> {
    /// Create a new store with middleware
    pub fn new(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            store: Store::new(state, reducer),
            middleware,
        }
    }

    /// Dispatch an action through middleware and store
    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action);
        let changed = self.store.dispatch(action.clone());
        self.middleware.after(&action, changed);
        changed
    }

    /// Current state
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Mutable state
    pub fn state_mut(&mut self) -> &mut S {
        self.store.state_mut()
    }

    /// The middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}

/// Hook run before and after each dispatch
pub trait Middleware<A: Action> {
    /// Called before the reducer sees the action
    fn before(&mut self, action: &A);

    /// Called after the reducer processed the action
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Middleware that traces every action
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Log before dispatch
    pub log_before: bool,
    /// Log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Log after dispatch only
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Log before and after dispatch
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.name(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                state_changed,
                "Action processed"
            );
        }
    }
}
