// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Non-fatal diagnostics for operators who still reference tracked gates.

use featuregate_api_types::VmInstanceSpec;

use crate::registry::Registry;
use crate::state::State;

impl Registry {
    /// Warnings for a configured gate list.
    ///
    /// Every registered gate is GA, deprecated or discontinued, so listing
    /// any of them is redundant; each such name yields its gate's message.
    pub fn config_warnings<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        names
            .iter()
            .filter_map(|name| self.lookup(name.as_ref()))
            .map(|gate| gate.message().to_owned())
            .collect()
    }

    /// Warnings for a spec that still uses the API of an enabled, deprecated
    /// gate.
    pub fn spec_warnings<S: AsRef<str>>(
        &self,
        names: &[S],
        spec: &VmInstanceSpec,
    ) -> Vec<String> {
        names
            .iter()
            .filter_map(|name| self.lookup(name.as_ref()))
            .filter(|gate| {
                gate.state() == State::Deprecated && gate.is_used_by(spec)
            })
            .map(|gate| gate.message().to_owned())
            .collect()
    }
}
