// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The table of known feature gates.
//!
//! A [`Registry`] maps gate names to [`FeatureGate`] descriptors. Built-in
//! gates and gates added later (from configuration, tests, or extension code)
//! go through the same [`Registry::register`] path, so a later registration
//! always replaces an earlier one of the same name, whatever its origin.
//!
//! Every access, reads included, is serialized by one mutex. Descriptors are
//! cloned out of the table, so usage checks never run with the lock held.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use slog::{debug, o, Logger};

use crate::gate::FeatureGate;

/// A mutex-guarded table of feature gates keyed by name.
pub struct Registry {
    gates: Mutex<BTreeMap<String, FeatureGate>>,
    pub(crate) log: Logger,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new(log: Logger) -> Self {
        Self {
            gates: Mutex::new(BTreeMap::new()),
            log: log.new(o!("component" => "featuregate_registry")),
        }
    }

    /// Creates a registry pre-populated with the built-in gate table.
    pub fn with_builtin_gates(log: Logger) -> Self {
        let registry = Self::new(log);
        for gate in crate::builtin::builtin_gates() {
            registry.register(gate);
        }
        registry
    }

    // The table is only ever mutated by single map operations, so it is
    // consistent even if a holder of the lock panicked.
    fn table(&self) -> MutexGuard<'_, BTreeMap<String, FeatureGate>> {
        self.gates.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds `gate` to the registry, replacing any gate with the same name.
    ///
    /// If the gate has no message, one is derived from its name and state
    /// before it is stored.
    pub fn register(&self, mut gate: FeatureGate) {
        gate.fill_default_message();
        let name = gate.name().to_owned();
        let state = gate.state();
        let replaced = self.table().insert(name.clone(), gate).is_some();
        debug!(self.log, "registered feature gate";
            "name" => name,
            "state" => %state,
            "replaced" => replaced,
        );
    }

    /// Removes the gate named `name`. Removing an unknown gate does nothing.
    pub fn unregister(&self, name: &str) {
        if self.table().remove(name).is_some() {
            debug!(self.log, "unregistered feature gate"; "name" => name);
        }
    }

    /// Returns the gate registered under `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<FeatureGate> {
        self.table().get(name).cloned()
    }

    /// Names of all registered gates, sorted.
    pub fn names(&self) -> Vec<String> {
        self.table().keys().cloned().collect()
    }

    /// A snapshot of every registered gate, sorted by name.
    pub fn gates(&self) -> Vec<FeatureGate> {
        self.table().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }
}
