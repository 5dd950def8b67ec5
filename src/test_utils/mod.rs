//! Test utilities for the component builder.
//!
//! - [`init_test_logging`] - `Once`-guarded tracing setup
//! - [`CountingAliasResolver`] - wraps a resolver and records every lookup
//! - [`fixtures`] - sample run files and a temporary project directory

pub mod fixtures;

pub use fixtures::{RunFixture, TestProject};

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::alias::{AliasData, AliasKind, AliasResolver};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging
/// stays off. Only the first call has any effect.
///
/// ```bash
/// RUST_LOG=component_builder=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// An [`AliasResolver`] that records each lookup before delegating.
#[derive(Debug, Default)]
pub struct CountingAliasResolver<R> {
    inner: R,
    calls: RefCell<Vec<(AliasKind, String)>>,
}

impl<R: AliasResolver> CountingAliasResolver<R> {
    /// Wrap `inner`.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// How often `name` of `kind` was looked up.
    pub fn calls(&self, name: &str, kind: AliasKind) -> usize {
        self.calls.borrow().iter().filter(|(k, n)| *k == kind && n == name).count()
    }

    /// Every lookup in order, as `kind:name`.
    pub fn order(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(kind, name)| format!("{kind}:{name}")).collect()
    }

    /// Lookup counts per `kind:name`.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for key in self.order() {
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }
}

impl<R: AliasResolver> AliasResolver for CountingAliasResolver<R> {
    fn get(&self, name: &str, kind: AliasKind, view: &str) -> Option<AliasData> {
        self.calls.borrow_mut().push((kind, name.to_string()));
        self.inner.get(name, kind, view)
    }
}
