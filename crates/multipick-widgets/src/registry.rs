//! Coordination between sibling dropdowns.
//!
//! A [`Registry`] is created once by the host and handed to every
//! [`MultiSelect`](crate::multi_select::MultiSelect) it builds. It keeps at
//! most one dropdown open: opening one closes the others, and a click that
//! lands outside every dropdown closes them all.
//!
//! ```rust,ignore
//! let registry = Registry::new();
//! let regions = MultiSelect::builder("regions").with_options(regions).build(&registry)?;
//! let teams = MultiSelect::builder("teams").with_options(teams).build(&registry)?;
//!
//! // in the host's event handling:
//! if let Some(mouse) = mouse_event {
//!     registry.handle_pointer(&mouse);
//! }
//! ```
//!
//! Siblings are told apart by their registration, not by their id: two
//! dropdowns built with the same id still close each other.

use crossterm::event::{MouseEvent, MouseEventKind};
use parking_lot::Mutex;
use ratatui::layout::{Position, Rect};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct Slot {
    id: String,
    open: AtomicBool,
    areas: Mutex<Vec<Rect>>,
}

impl Slot {
    /// Mark closed and forget the list area, keeping only the button.
    fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
        self.areas.lock().truncate(1);
    }
}

#[derive(Default)]
struct Inner {
    slots: Vec<Arc<Slot>>,
    listening: bool,
}

/// Shared handle tracking every mounted dropdown. Cloning is cheap and all
/// clones see the same set.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<Mutex<Inner>>,
}

/// A dropdown's entry in a [`Registry`]: its id, open flag and the screen
/// areas it last rendered to.
pub struct Registration {
    slot: Arc<Slot>,
    registry: Registry,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a new dropdown. The first registration turns on outside-click
    /// dismissal for the whole registry.
    pub fn register(&self, id: impl Into<String>) -> Registration {
        let slot = Arc::new(Slot {
            id: id.into(),
            open: AtomicBool::new(false),
            areas: Mutex::new(Vec::new()),
        });

        let mut inner = self.inner.lock();
        inner.slots.push(slot.clone());
        if !inner.listening {
            inner.listening = true;
            tracing::debug!("dropdown pointer listener installed");
        }
        tracing::debug!(id = %slot.id, count = inner.slots.len(), "dropdown registered");
        drop(inner);

        Registration {
            slot,
            registry: self.clone(),
        }
    }

    /// Close every tracked dropdown except `caller`.
    pub fn open(&self, caller: &Registration) {
        let inner = self.inner.lock();
        for slot in inner.slots.iter().filter(|s| !Arc::ptr_eq(s, &caller.slot)) {
            slot.close();
        }
        tracing::debug!(id = %caller.slot.id, "dropdown opened, siblings closed");
    }

    /// Close every tracked dropdown.
    pub fn close_all(&self) {
        for slot in &self.inner.lock().slots {
            slot.close();
        }
    }

    /// Outside-click dismissal.
    ///
    /// A mouse button press that hits none of the areas the dropdowns last
    /// rendered to closes all of them; returns whether that happened. Other
    /// mouse events, and any event before the first registration, are
    /// ignored.
    pub fn handle_pointer(&self, event: &MouseEvent) -> bool {
        if !matches!(event.kind, MouseEventKind::Down(_)) {
            return false;
        }

        {
            let inner = self.inner.lock();
            if !inner.listening {
                return false;
            }
            let position = Position::new(event.column, event.row);
            let inside = inner
                .slots
                .iter()
                .any(|slot| slot.areas.lock().iter().any(|area| area.contains(position)));
            if inside {
                return false;
            }
        }

        self.close_all();
        tracing::debug!(column = event.column, row = event.row, "outside click closed dropdowns");
        true
    }

    /// Whether outside-click dismissal is active.
    pub fn is_listening(&self) -> bool {
        self.inner.lock().listening
    }

    /// Number of tracked dropdowns.
    pub fn len(&self) -> usize {
        self.inner.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of the dropdowns that are currently open, in registration order.
    pub fn open_ids(&self) -> Vec<String> {
        self.inner
            .lock()
            .slots
            .iter()
            .filter(|slot| slot.open.load(Ordering::SeqCst))
            .map(|slot| slot.id.clone())
            .collect()
    }

    fn unregister(&self, slot: &Arc<Slot>) {
        let mut inner = self.inner.lock();
        inner.slots.retain(|s| !Arc::ptr_eq(s, slot));
        tracing::debug!(id = %slot.id, count = inner.slots.len(), "dropdown unregistered");
    }
}

impl Registration {
    pub fn id(&self) -> &str {
        &self.slot.id
    }

    pub fn is_open(&self) -> bool {
        self.slot.open.load(Ordering::SeqCst)
    }

    pub fn set_open(&self, open: bool) {
        self.slot.open.store(open, Ordering::SeqCst);
    }

    /// Close this entry and drop its list area, so a click where the list
    /// was no longer counts as inside the dropdown.
    pub fn close(&self) {
        self.slot.close();
    }

    /// Record where the dropdown was drawn, for outside-click hit testing.
    pub fn set_areas(&self, areas: &[Rect]) {
        let mut current = self.slot.areas.lock();
        current.clear();
        current.extend_from_slice(areas);
    }

    /// Areas recorded by the last [`set_areas`](Registration::set_areas).
    pub fn areas(&self) -> Vec<Rect> {
        self.slot.areas.lock().clone()
    }

    /// The registry this entry belongs to.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.registry.unregister(&self.slot);
    }
}
