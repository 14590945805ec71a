//! Listener registries with scoped deregistration.
//!
//! Registering hands out a [`Subscription`] guard. Dropping the guard
//! removes the registration immediately, so an unmounted effect can never
//! leave a listener behind.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

#[derive(Debug, Default)]
struct Slots {
    next_id: u64,
    live: BTreeSet<u64>,
}

/// Set of live registrations.
#[derive(Debug, Default)]
pub struct Registry {
    slots: Rc<RefCell<Slots>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registration, live until the returned guard is dropped.
    pub fn register(&self) -> Subscription {
        let mut slots = self.slots.borrow_mut();
        let id = slots.next_id;
        slots.next_id += 1;
        slots.live.insert(id);
        Subscription {
            id,
            slots: Rc::downgrade(&self.slots),
        }
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.slots.borrow().live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Guard for one registration.
#[derive(Debug)]
#[must_use = "dropping a subscription deregisters it immediately"]
pub struct Subscription {
    id: u64,
    slots: Weak<RefCell<Slots>>,
}

impl Subscription {
    /// False once the owning registry is gone.
    pub fn is_active(&self) -> bool {
        self.slots
            .upgrade()
            .is_some_and(|slots| slots.borrow().live.contains(&self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(slots) = self.slots.upgrade() {
            slots.borrow_mut().live.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_deregisters() {
        let registry = Registry::new();
        let a = registry.register();
        let b = registry.register();
        assert_eq!(registry.len(), 2);
        drop(a);
        assert_eq!(registry.len(), 1);
        assert!(b.is_active());
        drop(b);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_subscription_outliving_registry() {
        let registry = Registry::new();
        let sub = registry.register();
        assert!(sub.is_active());
        drop(registry);
        assert!(!sub.is_active());
        // dropping after the registry is gone must not panic
        drop(sub);
    }

    #[test]
    fn test_registries_are_independent() {
        let a = Registry::new();
        let b = Registry::new();
        let _sub = a.register();
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }
}
