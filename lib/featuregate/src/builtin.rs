// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gates registered in every registry built with
//! [`crate::Registry::with_builtin_gates`].

use crate::gate::FeatureGate;
use crate::state::State;
use crate::usage;

pub const LIVE_MIGRATION: &str = "LiveMigration";
pub const SRIOV_LIVE_MIGRATION: &str = "SRIOVLiveMigration";
pub const NON_ROOT: &str = "NonRoot";
pub const PSA: &str = "PSA";
pub const CPU_NODE_DISCOVERY: &str = "CPUNodeDiscovery";
pub const NUMA: &str = "NUMA";
pub const COMMON_INSTANCETYPES_DEPLOYMENT: &str =
    "CommonInstancetypesDeploymentGate";
pub const HOTPLUG_NICS: &str = "HotplugNICs";
pub const GPU: &str = "GPU";
pub const HOST_DEVICES: &str = "HostDevices";
pub const DATA_VOLUMES: &str = "DataVolumes";

pub const VIRTIOFS: &str = "ExperimentalVirtiofsSupport";

pub const MACVTAP: &str = "Macvtap";
pub const PASST: &str = "Passt";

const GA_GATES: &[&str] = &[
    LIVE_MIGRATION,
    SRIOV_LIVE_MIGRATION,
    NON_ROOT,
    PSA,
    CPU_NODE_DISCOVERY,
    NUMA,
    COMMON_INSTANCETYPES_DEPLOYMENT,
    HOTPLUG_NICS,
    GPU,
    HOST_DEVICES,
    DATA_VOLUMES,
];

const MACVTAP_DISCONTINUED_MESSAGE: &str = "Macvtap network binding is \
    discontinued since v1.3. Please refer to Kubevirt user guide for \
    alternatives.";

const PASST_DISCONTINUED_MESSAGE: &str = "Passt network binding is \
    discontinued since v1.3. Please refer to Kubevirt user guide for \
    alternatives.";

/// The built-in gate table.
pub fn builtin_gates() -> Vec<FeatureGate> {
    let mut gates: Vec<FeatureGate> = GA_GATES
        .iter()
        .map(|name| FeatureGate::new(*name, State::GeneralAvailability, ""))
        .collect();

    gates.push(
        FeatureGate::new(VIRTIOFS, State::Deprecated, "")
            .with_usage_check(usage::virtiofs_api_used),
    );
    gates.push(
        FeatureGate::new(
            MACVTAP,
            State::Discontinued,
            MACVTAP_DISCONTINUED_MESSAGE,
        )
        .with_usage_check(usage::macvtap_api_used),
    );
    gates.push(
        FeatureGate::new(PASST, State::Discontinued, PASST_DISCONTINUED_MESSAGE)
            .with_usage_check(usage::passt_api_used),
    );

    gates
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn names_are_unique() {
        let gates = builtin_gates();
        let names: BTreeSet<_> = gates.iter().map(|g| g.name()).collect();
        assert_eq!(names.len(), gates.len());
    }

    #[test]
    fn discontinued_gates_have_usage_checks() {
        for gate in builtin_gates() {
            if gate.state() == State::Discontinued {
                assert!(gate.has_usage_check(), "{}", gate.name());
                assert!(!gate.message().is_empty(), "{}", gate.name());
            }
        }
    }

    #[test]
    fn removed_binding_messages() {
        let gates = builtin_gates();
        let macvtap = gates.iter().find(|g| g.name() == MACVTAP).unwrap();
        assert!(macvtap
            .message()
            .starts_with("Macvtap network binding is discontinued since v1.3."));
        let passt = gates.iter().find(|g| g.name() == PASST).unwrap();
        assert!(passt.message().ends_with("for alternatives."));
    }
}
