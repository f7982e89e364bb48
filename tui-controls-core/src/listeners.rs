//! Scoped event listeners and the terminal event poller
//!
//! Some components need events that happen outside their own area: a
//! dropdown closes when the user clicks elsewhere or presses Tab, and it
//! re-evaluates its placement when the terminal is resized. Instead of a
//! process-wide handler, such a component acquires a [`ListenerGuard`] from
//! a [`ListenerRegistry`]. The host asks the registry which listeners want
//! an event and forwards it to them. Dropping the guard removes the entry.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crossterm::event::{self, MouseEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::event::{EventKind, EventMask};

/// Identity of a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw numeric id
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct RegistryInner {
    listeners: HashMap<ListenerId, EventMask>,
    next_id: u64,
}

/// Shared table of mounted listeners
///
/// Cloning the registry is cheap and every clone sees the same table.
/// The registry lives on the UI thread; it is not `Send`.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl ListenerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for the event types in `mask`
    ///
    /// The listener stays registered until the returned guard is dropped.
    pub fn listen(&self, mask: EventMask) -> ListenerGuard {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.insert(id, mask);
        debug!(listener = id.0, ?mask, "Listener registered");

        ListenerGuard {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Listeners that should receive `event`, in registration order
    pub fn listeners_for(&self, event: &EventKind) -> Vec<ListenerId> {
        let wanted = EventMask::from(event.event_type());
        let inner = self.inner.borrow();
        let mut ids: Vec<_> = inner
            .listeners
            .iter()
            .filter(|(_, mask)| mask.intersects(wanted))
            .map(|(&id, _)| id)
            .collect();
        ids.sort();
        ids
    }

    /// Whether `id` is registered and wants `event`
    pub fn wants(&self, id: ListenerId, event: &EventKind) -> bool {
        let wanted = EventMask::from(event.event_type());
        self.inner
            .borrow()
            .listeners
            .get(&id)
            .is_some_and(|mask| mask.intersects(wanted))
    }

    /// Whether `id` is still registered
    pub fn contains(&self, id: ListenerId) -> bool {
        self.inner.borrow().listeners.contains_key(&id)
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Whether no listener is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registration handle; deregisters on drop
#[derive(Debug)]
pub struct ListenerGuard {
    id: ListenerId,
    registry: Weak<RefCell<RegistryInner>>,
}

impl ListenerGuard {
    /// Id of this listener
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        // Registry may already be gone during teardown
        if let Some(inner) = self.registry.upgrade() {
            inner.borrow_mut().listeners.remove(&self.id);
            debug!(listener = self.id.0, "Listener released");
        }
    }
}

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
}

/// Spawn the crossterm polling task
///
/// Polls up to a small batch of events per cycle and forwards them through
/// `tx`. Cancelling `cancel_token` drains crossterm's buffer and stops the task.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut processed = 0;
                    while processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        processed += 1;
                        let raw = match event::read() {
                            Ok(event::Event::Key(key)) => RawEvent::Key(key),
                            Ok(event::Event::Mouse(mouse)) => RawEvent::Mouse(mouse),
                            Ok(event::Event::Resize(w, h)) => RawEvent::Resize(w, h),
                            Ok(_) => continue,
                            Err(err) => {
                                debug!(%err, "Failed to read terminal event");
                                continue;
                            }
                        };
                        trace!(?raw, "Polled event");
                        if tx.send(raw).is_err() {
                            debug!("Event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Process a raw event into an [`EventKind`]
///
/// Wheel events become `EventKind::Scroll` with a delta of one row.
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: 1,
            },
            MouseEventKind::ScrollUp => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: -1,
            },
            _ => EventKind::Mouse(mouse),
        },
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key, left_click};

    #[test]
    fn test_listen_and_release() {
        let registry = ListenerRegistry::new();
        let guard = registry.listen(EventMask::MOUSE | EventMask::KEY);
        let id = guard.id();

        assert!(registry.contains(id));
        assert_eq!(registry.len(), 1);

        drop(guard);
        assert!(!registry.contains(id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_listeners_filtered_by_mask() {
        let registry = ListenerRegistry::new();
        let keys = registry.listen(EventMask::KEY);
        let mouse = registry.listen(EventMask::MOUSE | EventMask::RESIZE);

        let key_event = EventKind::Key(key("tab"));
        assert_eq!(registry.listeners_for(&key_event), vec![keys.id()]);

        let click = left_click(3, 4);
        assert_eq!(registry.listeners_for(&click), vec![mouse.id()]);
        assert!(registry.wants(mouse.id(), &EventKind::Resize(80, 24)));
        assert!(!registry.wants(keys.id(), &EventKind::Resize(80, 24)));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let registry = ListenerRegistry::new();
        let first = registry.listen(EventMask::KEY).id();
        let second = registry.listen(EventMask::KEY).id();
        assert_ne!(first, second);
    }

    #[test]
    fn test_guard_outlives_registry() {
        let registry = ListenerRegistry::new();
        let guard = registry.listen(EventMask::KEY);
        drop(registry);
        // Dropping after the registry is gone must not panic
        drop(guard);
    }

    #[test]
    fn test_many_mounts_do_not_leak() {
        let registry = ListenerRegistry::new();
        for _ in 0..100 {
            let _guard = registry.listen(EventMask::all());
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_process_raw_event_scroll() {
        use crossterm::event::{KeyModifiers, MouseEvent};

        let scroll_up = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 10,
            row: 20,
            modifiers: KeyModifiers::NONE,
        };

        match process_raw_event(RawEvent::Mouse(scroll_up)) {
            EventKind::Scroll { column, row, delta } => {
                assert_eq!((column, row, delta), (10, 20, -1));
            }
            other => panic!("Expected Scroll event, got {:?}", other),
        }
    }

    #[test]
    fn test_process_raw_event_resize() {
        let kind = process_raw_event(RawEvent::Resize(80, 24));
        assert!(matches!(kind, EventKind::Resize(80, 24)));
    }
}
