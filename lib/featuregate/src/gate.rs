// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::sync::Arc;

use featuregate_api_types::VmInstanceSpec;

use crate::state::State;
use crate::usage::SpecUsage;

/// Describes one feature gate tracked by a [`crate::Registry`].
///
/// The gate's state cannot change once constructed; moving a gate to a new
/// state means registering a new descriptor under the same name.
#[derive(Clone)]
pub struct FeatureGate {
    name: String,
    state: State,
    message: String,
    vmi_spec_used: Option<Arc<dyn SpecUsage>>,
}

impl FeatureGate {
    /// Creates a descriptor without a usage check. An empty `message` is
    /// replaced with [`crate::default_message`] when the gate is registered.
    pub fn new(
        name: impl Into<String>,
        state: State,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            state,
            message: message.into(),
            vmi_spec_used: None,
        }
    }

    /// Attaches a check reporting whether a spec uses this gate's API.
    pub fn with_usage_check<U>(mut self, check: U) -> Self
    where
        U: SpecUsage + 'static,
    {
        self.vmi_spec_used = Some(Arc::new(check));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn has_usage_check(&self) -> bool {
        self.vmi_spec_used.is_some()
    }

    /// Runs the usage check against `spec`. Gates without a check are never
    /// considered used.
    pub fn is_used_by(&self, spec: &VmInstanceSpec) -> bool {
        self.vmi_spec_used.as_ref().is_some_and(|check| check.is_used(spec))
    }

    pub(crate) fn fill_default_message(&mut self) {
        if self.message.is_empty() {
            self.message =
                crate::state::default_message(&self.name, self.state);
        }
    }
}

impl fmt::Debug for FeatureGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureGate")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("message", &self.message)
            .field("has_usage_check", &self.has_usage_check())
            .finish()
    }
}

/// Two descriptors are equal when their name, state and message match and
/// they share the same usage check (or both have none).
impl PartialEq for FeatureGate {
    fn eq(&self, other: &Self) -> bool {
        let same_check = match (&self.vmi_spec_used, &other.vmi_spec_used) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.name == other.name
            && self.state == other.state
            && self.message == other.message
            && same_check
    }
}
