// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Checks that decide whether an instance spec still relies on a gate's
//! capability.

use featuregate_api_types::VmInstanceSpec;

/// Reports whether an instance spec uses the API surface guarded by a feature
/// gate.
///
/// Implementations must be cheap and side-effect free: they run on the
/// admission path once per enabled gate.
pub trait SpecUsage: Send + Sync {
    fn is_used(&self, spec: &VmInstanceSpec) -> bool;
}

impl<F> SpecUsage for F
where
    F: Fn(&VmInstanceSpec) -> bool + Send + Sync,
{
    fn is_used(&self, spec: &VmInstanceSpec) -> bool {
        self(spec)
    }
}

/// Any interface bound with the removed macvtap binding.
pub fn macvtap_api_used(spec: &VmInstanceSpec) -> bool {
    spec.interfaces().any(|iface| iface.binding_method.macvtap.is_some())
}

/// Any interface bound with the removed in-tree passt binding.
pub fn passt_api_used(spec: &VmInstanceSpec) -> bool {
    spec.interfaces().any(|iface| iface.binding_method.passt.is_some())
}

/// Any filesystem shared through virtiofs.
pub fn virtiofs_api_used(spec: &VmInstanceSpec) -> bool {
    spec.filesystems().any(|fs| fs.virtiofs.is_some())
}
