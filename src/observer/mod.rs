//! # Observer Pattern
//!
//! Publisher + subscriber. The subject owns a piece of state and a list of
//! observers; whenever the state changes it pushes a notification to every
//! registered observer, which then pulls whatever it needs back through a
//! non-owning link to the subject.
//!
//! - [`ChangeNotifier`] is the concrete subject.
//! - [`PeriodicTicker`] drives a notifier from a tokio interval.
//! - [`WeatherApp`] is the demo observer printing temperature updates.

mod notifier;
mod ticker;
mod weather;

pub use notifier::ChangeNotifier;
pub use ticker::{PeriodicTicker, TickerHandle};
pub use weather::{run_weather_station, WeatherApp, WeatherStation};

use serde::Deserialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use tracing::warn;

use crate::error::{NotifyError, ObserverError};

/// Observers are shared between the subject and whoever created them.
pub type SharedObserver<T> = Arc<ObserverSlot<T, dyn Observer<T>>>;

// ============================================================================
// Capabilities
// ============================================================================

/// Anything that wants to hear about changes of a `Subject<T>`.
pub trait Observer<T>: Send {
    /// Called once per notification, in registration order. `subject` is the
    /// back-reference set by the most recent registration.
    fn update(&mut self, subject: &SubjectLink<T>) -> Result<(), ObserverError>;

    fn name(&self) -> &str {
        "observer"
    }
}

/// Anything that owns observable state and a list of observers.
pub trait Subject<T>: Send + Sync {
    fn register_observer(&self, observer: SharedObserver<T>);

    /// Removes every registration of `observer`. Unknown observers are ignored.
    fn remove_observer(&self, observer: &SharedObserver<T>);

    fn notify_observers(&self) -> Result<NotifyReport, NotifyError>;

    fn get_state(&self) -> T;
}

// ============================================================================
// Back-reference from observer to subject
// ============================================================================

/// Non-owning link an observer keeps to its subject.
pub struct SubjectLink<T> {
    subject: Option<Weak<dyn Subject<T>>>,
}

impl<T: 'static> SubjectLink<T> {
    pub fn new(subject: Weak<dyn Subject<T>>) -> Self {
        Self {
            subject: Some(subject),
        }
    }

    pub fn unbound() -> Self {
        Self { subject: None }
    }

    pub fn is_bound(&self) -> bool {
        self.subject.is_some()
    }

    pub fn subject(&self) -> Option<Arc<dyn Subject<T>>> {
        self.subject.as_ref().and_then(Weak::upgrade)
    }

    /// Pull the subject's current state.
    pub fn state(&self) -> Result<T, ObserverError> {
        let weak = self.subject.as_ref().ok_or(ObserverError::Unbound)?;
        let subject = weak.upgrade().ok_or(ObserverError::SubjectDropped)?;
        Ok(subject.get_state())
    }
}

impl<T: 'static> Default for SubjectLink<T> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<T> Clone for SubjectLink<T> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject.clone(),
        }
    }
}

/// An observer together with its settable back-reference.
///
/// The link lives beside the observer's mutex rather than inside it, so a
/// subject can bind an observer that is busy in `update()`, including one
/// registering itself.
pub struct ObserverSlot<T, O: ?Sized> {
    link: RwLock<SubjectLink<T>>,
    observer: Mutex<O>,
}

impl<T: 'static, O> ObserverSlot<T, O> {
    pub fn new(observer: O) -> Arc<Self> {
        Arc::new(Self {
            link: RwLock::new(SubjectLink::unbound()),
            observer: Mutex::new(observer),
        })
    }
}

impl<T: 'static, O: ?Sized> ObserverSlot<T, O> {
    pub fn lock(&self) -> MutexGuard<'_, O> {
        self.observer.lock().unwrap_or_else(|poisoned| {
            warn!("observer lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn link(&self) -> SubjectLink<T> {
        self.link.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Overwrites any previous binding, so registering with a second subject
    /// rebinds the observer.
    pub fn bind(&self, subject: SubjectLink<T>) {
        *self.link.write().unwrap_or_else(PoisonError::into_inner) = subject;
    }
}

/// Identity of a shared observer is the address of its allocation.
pub(crate) fn same_observer<T>(a: &SharedObserver<T>, b: &SharedObserver<T>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

// ============================================================================
// Failure handling
// ============================================================================

/// What `notify_observers` does when an observer's `update()` fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum FailurePolicy {
    /// Log the failure, keep notifying the rest.
    #[default]
    #[serde(rename = "isolate")]
    IsolateAndContinue,
    /// Stop at the first failure and return it to the caller.
    #[serde(rename = "fail-fast")]
    FailFast,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverFailure {
    pub observer: String,
    pub error: ObserverError,
}

/// Outcome of one notification round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotifyReport {
    pub notified: usize,
    pub failures: Vec<ObserverFailure>,
}

impl NotifyReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_link_reports_unbound() {
        let link: SubjectLink<i64> = SubjectLink::unbound();
        assert!(!link.is_bound());
        assert_eq!(link.state(), Err(ObserverError::Unbound));
    }

    #[test]
    fn test_link_outlived_by_observer() {
        let notifier = ChangeNotifier::new(7_i64);
        let subject: Arc<dyn Subject<i64>> = notifier.clone();
        let link = SubjectLink::new(Arc::downgrade(&subject));
        drop(subject);
        assert_eq!(link.state(), Ok(7));

        drop(notifier);
        assert!(link.is_bound());
        assert_eq!(link.state(), Err(ObserverError::SubjectDropped));
    }

    #[test]
    fn test_failure_policy_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: FailurePolicy,
        }

        let parsed: Wrapper = toml::from_str(r#"policy = "fail-fast""#).unwrap();
        assert_eq!(parsed.policy, FailurePolicy::FailFast);

        let parsed: Wrapper = toml::from_str(r#"policy = "isolate""#).unwrap();
        assert_eq!(parsed.policy, FailurePolicy::IsolateAndContinue);
    }

    #[test]
    fn test_report_is_clean() {
        let mut report = NotifyReport::default();
        assert!(report.is_clean());
        report.failures.push(ObserverFailure {
            observer: "x".to_string(),
            error: ObserverError::Unbound,
        });
        assert!(!report.is_clean());
    }
}
