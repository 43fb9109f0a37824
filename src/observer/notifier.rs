use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use tracing::{debug, trace, warn};

use super::{
    same_observer, FailurePolicy, NotifyReport, ObserverFailure, SharedObserver, Subject,
    SubjectLink,
};
use crate::error::NotifyError;

/// Subject owning a single value of type `T`.
///
/// Every call to [`set_state`](Self::set_state) or
/// [`update_state`](Self::update_state) counts as a change, even when the new
/// value equals the old one, and triggers a notification round.
///
/// A notification round works on a snapshot of the registry taken when the
/// round begins. Observers registered or removed from inside `update()` only
/// affect later rounds. The registry lock is released before the round starts
/// and registration never takes an observer's own lock, so from `update()` an
/// observer may read the state, register or remove itself or others, and
/// register with another subject. It must not change the state from there,
/// because that would notify it again while it is still locked.
pub struct ChangeNotifier<T> {
    state: RwLock<T>,
    observers: Mutex<Vec<SharedObserver<T>>>,
    policy: FailurePolicy,
    this: Weak<ChangeNotifier<T>>,
}

impl<T> ChangeNotifier<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T) -> Arc<Self> {
        Self::with_policy(initial, FailurePolicy::default())
    }

    pub fn with_policy(initial: T, policy: FailurePolicy) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            state: RwLock::new(initial),
            observers: Mutex::new(Vec::new()),
            policy,
            this: this.clone(),
        })
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Replace the state and notify every registered observer.
    pub fn set_state(&self, value: T) -> Result<NotifyReport, NotifyError> {
        *self.write_state() = value;
        self.notify_observers()
    }

    /// Derive the next state from the current one, then notify.
    pub fn update_state<F>(&self, next: F) -> Result<NotifyReport, NotifyError>
    where
        F: FnOnce(&T) -> T,
    {
        {
            let mut state = self.write_state();
            let value = next(&state);
            *state = value;
        }
        self.notify_observers()
    }

    pub fn observer_count(&self) -> usize {
        self.registry().len()
    }

    pub fn is_registered(&self, observer: &SharedObserver<T>) -> bool {
        self.registry().iter().any(|o| same_observer(o, observer))
    }

    fn link(&self) -> SubjectLink<T> {
        let weak: Weak<dyn Subject<T>> = self.this.clone();
        SubjectLink::new(weak)
    }

    fn registry(&self) -> MutexGuard<'_, Vec<SharedObserver<T>>> {
        self.observers.lock().unwrap_or_else(|poisoned| {
            warn!("observer registry lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn read_state(&self) -> RwLockReadGuard<'_, T> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, T> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Subject<T> for ChangeNotifier<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn register_observer(&self, observer: SharedObserver<T>) {
        observer.bind(self.link());

        let mut registry = self.registry();
        registry.push(observer);
        debug!(registered = registry.len(), "observer registered");
    }

    fn remove_observer(&self, observer: &SharedObserver<T>) {
        let mut registry = self.registry();
        let before = registry.len();
        registry.retain(|o| !same_observer(o, observer));
        debug!(
            removed = before - registry.len(),
            registered = registry.len(),
            "observer removed"
        );
    }

    fn notify_observers(&self) -> Result<NotifyReport, NotifyError> {
        let snapshot: Vec<SharedObserver<T>> = self.registry().clone();
        trace!(observers = snapshot.len(), "notifying observers");

        let mut report = NotifyReport::default();
        for observer in &snapshot {
            let link = observer.link();
            let mut guard = observer.lock();
            let Err(error) = guard.update(&link) else {
                report.notified += 1;
                continue;
            };

            let name = guard.name().to_string();
            match self.policy {
                FailurePolicy::FailFast => {
                    return Err(NotifyError::ObserverFailed {
                        observer: name,
                        delivered: report.notified,
                        source: error,
                    });
                }
                FailurePolicy::IsolateAndContinue => {
                    warn!(observer = %name, %error, "observer update failed, continuing");
                    report.failures.push(ObserverFailure {
                        observer: name,
                        error,
                    });
                }
            }
        }

        Ok(report)
    }

    fn get_state(&self) -> T {
        self.read_state().clone()
    }
}

// ============================================================================
// Tests
// ============================================================================
