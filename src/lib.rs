// Design Patterns Catalog
// Adapter, Factory, Mediator, Observer, Singleton and Strategy, each runnable
// on its own:
//
//   cargo run --bin adapter
//   cargo run --bin factory
//   cargo run --bin mediator
//   cargo run --bin observer [config.toml]
//   cargo run --bin singleton
//   cargo run --bin strategy
//
// Every binary accepts an optional TOML config path; see `config::DemoConfig`.

pub mod adapter;
pub mod config;
pub mod console;
pub mod error;
pub mod factory;
pub mod logging;
pub mod mediator;
pub mod observer;
pub mod singleton;
pub mod strategy;

pub use error::{ConfigError, NotifyError, ObserverError, PatternError};
pub use observer::{
    ChangeNotifier, FailurePolicy, Observer, ObserverSlot, SharedObserver, Subject, SubjectLink,
};
