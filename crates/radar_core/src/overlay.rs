//! Detail overlay shown when a marker is activated.
//!
//! At most one overlay is open. Each open overlay owns the subscription for
//! its dismissal listeners, so closing it (or replacing it) drops the
//! listeners with it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;

use crate::layout::Point;
use crate::scene::Marker;

pub const OVERLAY_ID: &str = "radar-tooltip";
pub const NO_DESCRIPTION: &str = "No description available";
/// Offset between the activation point and the overlay's top-left corner.
pub const ANCHOR_OFFSET: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailOverlay {
    pub number: usize,
    pub title: String,
    /// Ring as the entry spelled it, uppercased.
    pub level: String,
    pub description: String,
    pub anchor: Point,
}

impl DetailOverlay {
    /// `activated_at` is where the activation happened (pointer position,
    /// or the marker itself for keyboard activation).
    pub fn for_marker(marker: &Marker, activated_at: Point) -> Self {
        let entry = &marker.entry;
        Self {
            number: entry.number,
            title: entry.label.clone(),
            level: entry.ring_reference.to_uppercase(),
            description: entry
                .description
                .clone()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            anchor: activated_at.offset(ANCHOR_OFFSET, ANCHOR_OFFSET),
        }
    }

    pub fn level_line(&self) -> String {
        format!("Level: {}", self.level)
    }
}

/// Keys that activate a focused marker, as reported by `KeyboardEvent.key`.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DismissTrigger {
    DocumentClick,
    Escape,
}

impl DismissTrigger {
    pub const ALL: [Self; 2] = [Self::DocumentClick, Self::Escape];

    pub fn from_key(key: &str) -> Option<Self> {
        matches!(key, "Escape" | "Esc").then_some(Self::Escape)
    }
}

#[derive(Debug)]
struct OpenOverlay<S> {
    overlay: DetailOverlay,
    _subscription: S,
}

/// Owns the single open overlay together with its dismissal subscription.
#[derive(Debug)]
pub struct OverlayController<S> {
    current: Option<OpenOverlay<S>>,
}

impl<S> Default for OverlayController<S> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<S> OverlayController<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any open overlay. The previous subscription is dropped
    /// before `subscribe` runs, so listeners never stack up.
    pub fn open(&mut self, overlay: DetailOverlay, subscribe: impl FnOnce() -> S) -> &DetailOverlay {
        self.close();
        let subscription = subscribe();
        let open = self.current.insert(OpenOverlay {
            overlay,
            _subscription: subscription,
        });
        &open.overlay
    }

    /// Returns whether an overlay was open. Safe to call repeatedly.
    pub fn close(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Any dismissal trigger closes the open overlay.
    pub fn dismiss(&mut self, trigger: DismissTrigger) -> bool {
        log::debug!("Overlay dismissed by {trigger:?}");
        self.close()
    }

    pub fn current(&self) -> Option<&DetailOverlay> {
        self.current.as_ref().map(|open| &open.overlay)
    }

    pub const fn is_open(&self) -> bool {
        self.current.is_some()
    }
}

type Listeners = BTreeMap<u64, DismissTrigger>;

/// In-process listener table for backends without a DOM.
///
/// Cloning shares the table.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<RegistryState>>,
}

#[derive(Debug, Default)]
struct RegistryState {
    next_id: u64,
    listeners: Listeners,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one listener per trigger; dropping the guard removes them.
    pub fn subscribe(&self, triggers: &[DismissTrigger]) -> ListenerGuard {
        let mut state = self.inner.borrow_mut();
        let ids = triggers
            .iter()
            .map(|trigger| {
                let id = state.next_id;
                state.next_id += 1;
                state.listeners.insert(id, *trigger);
                id
            })
            .collect();

        ListenerGuard {
            registry: Rc::clone(&self.inner),
            ids,
        }
    }

    pub fn is_listening(&self, trigger: DismissTrigger) -> bool {
        self.inner
            .borrow()
            .listeners
            .values()
            .any(|registered| *registered == trigger)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cancelable subscription handed out by [`ListenerRegistry::subscribe`].
#[derive(Debug)]
pub struct ListenerGuard {
    registry: Rc<RefCell<RegistryState>>,
    ids: Vec<u64>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let mut state = self.registry.borrow_mut();
        for id in &self.ids {
            state.listeners.remove(id);
        }
    }
}
