//! # Identity-keyed listener registry.
//!
//! Storage layer for the emitter: an ordered listener table per event name,
//! plus the ordered list of registration hooks. No locking here; the
//! emitter wraps the whole registry in one mutex and snapshots before
//! dispatch.
//!
//! ## Rules
//! - An event key exists only while it holds at least one entry; a removal
//!   that empties a table drops the key.
//! - Insertion order is invocation order; removal never reorders survivors.
//! - Re-inserting a registered listener overwrites its entry in place: the
//!   original position is kept, no duplicate is created.

use std::collections::HashMap;

use super::listener::{Listener, ListenerKey, NewListenerHook};

/// One registered listener.
///
/// `listener` is what the caller handed over and what introspection
/// reports; `invoke` is what dispatch actually calls (the listener itself,
/// or a self-removing one-shot wrapper).
pub(crate) struct Entry<T> {
    pub(crate) key: ListenerKey,
    pub(crate) listener: Listener<T>,
    pub(crate) invoke: Listener<T>,
}

/// Event name → ordered listeners, plus registration hooks.
pub(crate) struct Registry<T> {
    events: HashMap<String, Vec<Entry<T>>>,
    hooks: Vec<(ListenerKey, NewListenerHook<T>)>,
}

impl<T> Registry<T> {
    pub(crate) fn new() -> Self {
        Self {
            events: HashMap::new(),
            hooks: Vec::new(),
        }
    }

    /// Inserts an entry, overwriting in place if the listener is already
    /// registered for `event`.
    pub(crate) fn insert(&mut self, event: &str, entry: Entry<T>) {
        let entries = self.events.entry(event.to_string()).or_default();
        match entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
    }

    /// Removes the listener keyed by `key` from `event`, dropping the event
    /// key entirely when its table empties. Returns whether an entry was
    /// removed.
    pub(crate) fn remove(&mut self, event: &str, key: ListenerKey) -> bool {
        let Some(entries) = self.events.get_mut(event) else {
            return false;
        };
        let Some(pos) = entries.iter().position(|e| e.key == key) else {
            return false;
        };
        entries.remove(pos);
        if entries.is_empty() {
            self.events.remove(event);
        }
        true
    }

    /// Drops the whole table for `event`.
    pub(crate) fn remove_event(&mut self, event: &str) {
        self.events.remove(event);
    }

    /// Drops every listener table. Hooks survive.
    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }

    /// Snapshot of the invocables for `event`, in registration order.
    pub(crate) fn invocables(&self, event: &str) -> Vec<Listener<T>> {
        self.events
            .get(event)
            .map(|entries| entries.iter().map(|e| e.invoke.clone()).collect())
            .unwrap_or_default()
    }

    /// Snapshot of the original listeners for `event`, in registration order.
    pub(crate) fn originals(&self, event: &str) -> Vec<Listener<T>> {
        self.events
            .get(event)
            .map(|entries| entries.iter().map(|e| e.listener.clone()).collect())
            .unwrap_or_default()
    }

    /// Sorted names of events holding at least one listener.
    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.events.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Number of listeners registered for `event`.
    pub(crate) fn count(&self, event: &str) -> usize {
        self.events.get(event).map_or(0, |entries| entries.len())
    }

    /// Registers a hook, overwriting in place if already registered.
    pub(crate) fn add_hook(&mut self, key: ListenerKey, hook: NewListenerHook<T>) {
        match self.hooks.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = hook,
            None => self.hooks.push((key, hook)),
        }
    }

    /// Removes a hook by key. Returns whether one was removed.
    pub(crate) fn remove_hook(&mut self, key: ListenerKey) -> bool {
        let Some(pos) = self.hooks.iter().position(|(k, _)| *k == key) else {
            return false;
        };
        self.hooks.remove(pos);
        true
    }

    /// Snapshot of the hooks, in registration order.
    pub(crate) fn hooks(&self) -> Vec<NewListenerHook<T>> {
        self.hooks.iter().map(|(_, hook)| hook.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::listener::listener;
    use std::sync::Arc;

    fn probe() -> Listener<u32> {
        listener(|_n: &u32| Ok(()))
    }

    fn entry_for(l: &Listener<u32>) -> Entry<u32> {
        Entry {
            key: ListenerKey::of(l),
            listener: l.clone(),
            invoke: l.clone(),
        }
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut registry: Registry<u32> = Registry::new();
        let (a, b, c) = (probe(), probe(), probe());
        registry.insert("tick", entry_for(&a));
        registry.insert("tick", entry_for(&b));
        registry.insert("tick", entry_for(&c));

        let snap = registry.originals("tick");
        assert_eq!(snap.len(), 3);
        assert!(Arc::ptr_eq(&snap[0], &a));
        assert!(Arc::ptr_eq(&snap[1], &b));
        assert!(Arc::ptr_eq(&snap[2], &c));
    }

    #[test]
    fn test_reinsert_overwrites_in_place() {
        let mut registry: Registry<u32> = Registry::new();
        let (a, b) = (probe(), probe());
        registry.insert("tick", entry_for(&a));
        registry.insert("tick", entry_for(&b));

        let replacement = probe();
        let mut entry = entry_for(&a);
        entry.invoke = replacement.clone();
        registry.insert("tick", entry);

        assert_eq!(registry.count("tick"), 2, "overwrite must not duplicate");
        let invocables = registry.invocables("tick");
        assert!(
            Arc::ptr_eq(&invocables[0], &replacement),
            "overwritten entry keeps its slot"
        );
        assert!(Arc::ptr_eq(&invocables[1], &b));
    }

    #[test]
    fn test_removal_keeps_survivor_order() {
        let mut registry: Registry<u32> = Registry::new();
        let (a, b, c) = (probe(), probe(), probe());
        registry.insert("tick", entry_for(&a));
        registry.insert("tick", entry_for(&b));
        registry.insert("tick", entry_for(&c));

        assert!(registry.remove("tick", ListenerKey::of(&b)));
        let snap = registry.originals("tick");
        assert_eq!(snap.len(), 2);
        assert!(Arc::ptr_eq(&snap[0], &a));
        assert!(Arc::ptr_eq(&snap[1], &c));
    }

    #[test]
    fn test_remove_prunes_empty_event() {
        let mut registry: Registry<u32> = Registry::new();
        let a = probe();
        registry.insert("tick", entry_for(&a));

        assert!(registry.remove("tick", ListenerKey::of(&a)));
        assert!(registry.names().is_empty(), "emptied event must drop its key");
        assert!(
            !registry.remove("tick", ListenerKey::of(&a)),
            "second removal reports false"
        );
    }

    #[test]
    fn test_names_sorted() {
        let mut registry: Registry<u32> = Registry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.insert(name, entry_for(&probe()));
        }
        assert_eq!(registry.names(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_hooks_are_identity_keyed() {
        let mut registry: Registry<u32> = Registry::new();
        let hook: NewListenerHook<u32> = Arc::new(|_e: &str, _l: &Listener<u32>| {});
        registry.add_hook(ListenerKey::of(&hook), hook.clone());
        registry.add_hook(ListenerKey::of(&hook), hook.clone());

        assert_eq!(registry.hooks().len(), 1, "re-adding a hook must overwrite");
        assert!(registry.remove_hook(ListenerKey::of(&hook)));
        assert!(registry.hooks().is_empty());
    }
}
