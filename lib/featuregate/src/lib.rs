// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tracks feature gates that have left active development and checks
//! configuration against them.
//!
//! A feature gate that reached general availability, was deprecated, or was
//! discontinued no longer needs to be listed in configuration. This crate
//! keeps a [`Registry`] of such gates so that the admission path can
//!
//! - warn operators who still list them ([`Registry::config_warnings`],
//!   [`Registry::spec_warnings`]), and
//! - reject instance specs that still use the API of a discontinued gate
//!   ([`Registry::validate`]).
//!
//! Callers that want an isolated table (tests, tools) construct their own
//! [`Registry`]. The free functions in this module operate on a process-wide
//! registry that is populated with the built-in gates on first use.

use lazy_static::lazy_static;

use featuregate_api_types::{StatusCause, VmInstanceSpec};

mod builtin;
mod gate;
mod registry;
mod state;
pub mod usage;
mod validate;
mod warnings;

pub use builtin::*;
pub use gate::FeatureGate;
pub use registry::Registry;
pub use state::{default_message, State};
pub use usage::SpecUsage;

lazy_static! {
    static ref REGISTRY: Registry = Registry::with_builtin_gates(
        slog::Logger::root(slog::Discard, slog::o!())
    );
}

/// The process-wide registry.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Registers `gate` with the process-wide registry, replacing any gate of the
/// same name.
pub fn register_feature_gate(gate: FeatureGate) {
    REGISTRY.register(gate);
}

/// Removes a gate from the process-wide registry.
pub fn unregister_feature_gate(name: &str) {
    REGISTRY.unregister(name);
}

/// Looks a gate up in the process-wide registry.
pub fn feature_gate_info(name: &str) -> Option<FeatureGate> {
    REGISTRY.lookup(name)
}

/// Validates `spec` against the enabled gates `names` using the process-wide
/// registry. See [`Registry::validate`].
pub fn validate_feature_gates<S: AsRef<str>>(
    names: &[S],
    spec: &VmInstanceSpec,
) -> Vec<StatusCause> {
    REGISTRY.validate(names, spec)
}
