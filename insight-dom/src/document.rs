//! Document-level keyboard channel.
//!
//! There is exactly one key stream per terminal. Components that need keys
//! regardless of focus (a modal's Escape handling) register a listener here
//! and hold the returned [`ListenerGuard`]; dropping the guard removes the
//! listener. There is no other way to remove one, so a listener can never
//! outlive the component that owns its guard.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use log::{debug, trace};

use crate::event::KeyEvent;

type KeyListener = Arc<dyn Fn(&KeyEvent) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, KeyListener)>,
    attached: u64,
    detached: u64,
}

impl Registry {
    fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|(lid, _)| *lid == id)
    }
}

/// Shared handle to the key listener registry. Clones refer to the same document.
#[derive(Clone, Default)]
pub struct Document {
    registry: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a key listener. It stays registered until the guard is dropped.
    #[must_use = "dropping the guard immediately removes the listener"]
    pub fn add_key_listener(
        &self,
        listener: impl Fn(&KeyEvent) + Send + Sync + 'static,
    ) -> ListenerGuard {
        let mut registry = self.lock();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));
        registry.attached += 1;
        debug!(
            "Key listener {:?} attached ({} active)",
            id,
            registry.listeners.len()
        );
        ListenerGuard {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver a key event to every registered listener.
    ///
    /// Listeners run without the registry lock held, so a listener may add or
    /// drop guards. A listener removed while the dispatch is in progress is
    /// not invoked afterwards.
    pub fn dispatch_key(&self, event: &KeyEvent) -> usize {
        let snapshot: Vec<(ListenerId, KeyListener)> = self.lock().listeners.clone();
        let mut delivered = 0;
        for (id, listener) in snapshot {
            if !self.lock().contains(id) {
                trace!("Skipping listener {:?} removed during dispatch", id);
                continue;
            }
            listener(event);
            delivered += 1;
        }
        trace!("Key {:?} delivered to {} listener(s)", event.key, delivered);
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Total number of listeners ever attached to this document.
    pub fn attach_count(&self) -> u64 {
        self.lock().attached
    }

    /// Total number of listeners ever detached from this document.
    pub fn detach_count(&self) -> u64 {
        self.lock().detached
    }
}

/// Owns one registered listener. Dropping it detaches the listener.
#[derive(Debug)]
pub struct ListenerGuard {
    id: ListenerId,
    registry: Weak<Mutex<Registry>>,
}

impl ListenerGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        // Document already gone: nothing left to detach from.
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.lock().unwrap_or_else(|e| e.into_inner());
        let before = registry.listeners.len();
        registry.listeners.retain(|(id, _)| *id != self.id);
        if registry.listeners.len() < before {
            registry.detached += 1;
            debug!(
                "Key listener {:?} detached ({} active)",
                self.id,
                registry.listeners.len()
            );
        }
    }
}
