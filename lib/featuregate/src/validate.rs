// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use featuregate_api_types::{CauseType, StatusCause, VmInstanceSpec};
use slog::info;

use crate::registry::Registry;
use crate::state::State;

impl Registry {
    /// Checks an instance spec against the enabled feature gates.
    ///
    /// Returns one cause for every enabled gate that is discontinued and whose
    /// usage check reports that `spec` still uses the removed API. Causes
    /// follow the order of `names`, duplicates included. Names that are not
    /// registered are ignored.
    pub fn validate<S: AsRef<str>>(
        &self,
        names: &[S],
        spec: &VmInstanceSpec,
    ) -> Vec<StatusCause> {
        let mut causes = Vec::new();
        for name in names {
            let Some(gate) = self.lookup(name.as_ref()) else {
                continue;
            };
            if gate.state() != State::Discontinued || !gate.is_used_by(spec) {
                continue;
            }

            info!(self.log, "spec uses discontinued feature gate";
                "name" => gate.name(),
            );
            causes.push(StatusCause::new(
                CauseType::FieldValueNotSupported,
                gate.message(),
            ));
        }
        causes
    }
}
