// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use confab_domain::Conflict;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Events emitted by the conflict detection engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A validation produced at least one conflict.
    ConflictDetected {
        /// The conflicts that were detected.
        conflicts: Vec<Conflict>,
    },
    /// A validation completed with no conflicts.
    ConflictResolved,
    /// The pool of videoconferencing accounts changed; cached validations
    /// were invalidated.
    CapacityUpdated {
        /// The new number of accounts in the pool.
        total_accounts: usize,
    },
}

/// Handle returned by `subscribe`; pass it to `unsubscribe` to remove the
/// listener without affecting others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn Fn(&EngineEvent) + Send + Sync>;

/// Per-engine listener registry.
///
/// Each engine instance owns its own set of listeners; there is no global
/// event bus.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(u64, Handler)>>,
}

impl ListenerRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
    {
        let id: u64 = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        listeners.push((id, Box::new(handler)));
        SubscriptionId(id)
    }

    /// Removes one listener. Returns whether it was registered.
    pub(crate) fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before: usize = listeners.len();
        listeners.retain(|(id, _)| *id != subscription.0);
        listeners.len() != before
    }

    pub(crate) fn emit(&self, event: &EngineEvent) {
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for (_, handler) in &*listeners {
            handler(event);
        }
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count: usize = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("ListenerRegistry")
            .field("listeners", &count)
            .finish()
    }
}
