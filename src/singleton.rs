//! # Singleton Pattern
//!
//! Ensure a type has only one instance and provide a global point of access
//! to it. `OnceLock` initialises on first use, and concurrent first callers
//! all observe the same, single construction.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tracing::debug;

static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

pub struct Registry {
    created_at: Instant,
    visits: AtomicU64,
}

impl Registry {
    pub fn instance() -> &'static Registry {
        static INSTANCE: OnceLock<Registry> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
            debug!("registry singleton initialised");
            Registry {
                created_at: Instant::now(),
                visits: AtomicU64::new(0),
            }
        })
    }

    /// How many times the initialiser ran in this process.
    pub fn constructions() -> usize {
        CONSTRUCTIONS.load(Ordering::SeqCst)
    }

    /// Record a visit and return the new total.
    pub fn visit(&self) -> u64 {
        self.visits.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn visits(&self) -> u64 {
        self.visits.load(Ordering::SeqCst)
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

/// Runs the demo and returns its console lines.
pub fn run() -> Vec<String> {
    let first = Registry::instance();
    first.visit();
    let second = Registry::instance();
    let total = second.visit();

    vec![
        format!("Same instance: {}", std::ptr::eq(first, second)),
        format!("Visits recorded: {}", total),
        format!("Constructions: {}", Registry::constructions()),
    ]
}
