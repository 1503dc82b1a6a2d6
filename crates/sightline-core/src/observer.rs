//! Result observers
//!
//! Observers are held until explicitly unregistered with the token returned
//! at registration. Unregistering leaves a tombstone that delivery skips; the
//! tombstones are swept after the next broadcast.

use std::sync::Arc;

use crate::engine::OrientationResult;

/// Receives every broadcast result
pub trait OrientationObserver: Send + Sync {
    fn on_orientation_changed(&self, result: &OrientationResult);
}

impl<F> OrientationObserver for F
where
    F: Fn(&OrientationResult) + Send + Sync,
{
    fn on_orientation_changed(&self, result: &OrientationResult) {
        self(result)
    }
}

/// Token for a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Entry {
    id: SubscriptionId,
    observer: Option<Arc<dyn OrientationObserver>>,
}

/// Observers in registration order
#[derive(Default)]
pub struct ObserverRegistry {
    entries: Vec<Entry>,
    next_id: u64,
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("active", &self.len())
            .field("slots", &self.entries.len())
            .finish()
    }
}

fn same_observer(a: &Arc<dyn OrientationObserver>, b: &Arc<dyn OrientationObserver>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Registering the same `Arc` again returns the
    /// existing token.
    pub fn register(&mut self, observer: Arc<dyn OrientationObserver>) -> SubscriptionId {
        let existing = self.entries.iter().find(|entry| {
            entry
                .observer
                .as_ref()
                .is_some_and(|current| same_observer(current, &observer))
        });
        if let Some(entry) = existing {
            return entry.id;
        }

        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            observer: Some(observer),
        });
        id
    }

    /// Stop delivering to `id`. Returns false for unknown or already removed
    /// tokens.
    pub fn unregister(&mut self, id: SubscriptionId) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id && entry.observer.is_some())
        {
            Some(entry) => {
                entry.observer = None;
                true
            }
            None => false,
        }
    }

    pub fn is_registered(&self, id: SubscriptionId) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.id == id && entry.observer.is_some())
    }

    /// Number of live registrations
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.observer.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `result` to every live observer in registration order, then
    /// sweep tombstones. Returns how many observers were called.
    pub fn broadcast(&mut self, result: &OrientationResult) -> usize {
        let mut delivered = 0;
        for observer in self.entries.iter().filter_map(|entry| entry.observer.as_ref()) {
            observer.on_orientation_changed(result);
            delivered += 1;
        }
        self.entries.retain(|entry| entry.observer.is_some());
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SourceTag;
    use crate::spatial::{Point3, Vector3};
    use std::sync::Mutex;

    fn sample_result() -> OrientationResult {
        OrientationResult {
            source: SourceTag::Raw,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            azimuth: 0.5,
            inclination: 0.1,
            self_check: 0.0,
            projection: Point3::ORIGIN,
            target_vector: Vector3::X,
        }
    }

    fn recorder(
        log: &Arc<Mutex<Vec<&'static str>>>,
        name: &'static str,
    ) -> Arc<dyn OrientationObserver> {
        let log = Arc::clone(log);
        Arc::new(move |_: &OrientationResult| log.lock().unwrap().push(name))
    }

    #[test]
    fn test_delivers_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::new();
        registry.register(recorder(&log, "first"));
        registry.register(recorder(&log, "second"));
        registry.register(recorder(&log, "third"));

        assert_eq!(registry.broadcast(&sample_result()), 3);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unregistered_observer_is_skipped() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::new();
        let a = registry.register(recorder(&log, "a"));
        registry.register(recorder(&log, "b"));

        assert!(registry.unregister(a));
        assert!(!registry.unregister(a));
        assert!(!registry.is_registered(a));
        assert_eq!(registry.len(), 1);

        registry.broadcast(&sample_result());
        assert_eq!(*log.lock().unwrap(), vec!["b"]);
    }

    #[test]
    fn test_duplicate_registration_returns_same_token() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let observer = recorder(&log, "once");
        let mut registry = ObserverRegistry::new();
        let first = registry.register(Arc::clone(&observer));
        let second = registry.register(observer);

        assert_eq!(first, second);
        registry.broadcast(&sample_result());
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_tokens_are_not_reused() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::new();
        let a = registry.register(recorder(&log, "a"));
        registry.unregister(a);
        registry.broadcast(&sample_result());
        let b = registry.register(recorder(&log, "b"));
        assert_ne!(a, b);
        assert!(b > a);
    }
}
