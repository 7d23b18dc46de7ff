// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turns feature-gate checks into an admission verdict.

use featuregate::{FeatureGate, Registry, State};
use featuregate_api_types::{AdmissionResponse, VmInstanceSpec};
use serde_derive::Serialize;
use slog::{info, warn, Logger};

/// Decides whether an instance spec is admitted with the feature gates
/// `names` enabled.
///
/// The spec is rejected if it still uses the API of an enabled discontinued
/// gate. Uses of deprecated APIs are reported as warnings on the response
/// either way. Redundant gate references are a property of the configuration
/// and are reported when it is loaded, not here.
pub fn admit<S: AsRef<str>>(
    registry: &Registry,
    names: &[S],
    spec: &VmInstanceSpec,
    log: &Logger,
) -> AdmissionResponse {
    let causes = registry.validate(names, spec);

    let warnings = registry.spec_warnings(names, spec);
    for warning in &warnings {
        warn!(log, "{}", warning);
    }

    let response = AdmissionResponse::from_causes(causes, warnings);
    info!(log, "admission decided";
        "allowed" => response.allowed,
        "causes" => response.causes.len(),
        "warnings" => response.warnings.len(),
    );
    response
}

/// One row of the `list` output.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct GateInfo {
    pub name: String,
    pub state: State,
    pub message: String,
    pub checks_spec: bool,
}

impl From<&FeatureGate> for GateInfo {
    fn from(gate: &FeatureGate) -> Self {
        Self {
            name: gate.name().to_owned(),
            state: gate.state(),
            message: gate.message().to_owned(),
            checks_spec: gate.has_usage_check(),
        }
    }
}

/// Every gate in `registry`, sorted by name.
pub fn list(registry: &Registry) -> Vec<GateInfo> {
    registry.gates().iter().map(GateInfo::from).collect()
}

#[cfg(test)]
mod tests {
    use featuregate_api_types::instance_spec;

    use super::*;

    fn test_logger() -> slog::Logger {
        slog::Logger::root(slog::Discard, slog::o!())
    }

    const MACVTAP_VM: &str = r#"{
  "domain": {
    "devices": {
      "interfaces": [ { "name": "red", "macvtap": {} } ],
      "filesystems": [ { "name": "share", "virtiofs": {} } ]
    }
  },
  "networks": [ { "name": "red", "multus": { "networkName": "red-net" } } ]
}"#;

    #[test]
    fn discontinued_gate_in_use_is_rejected() {
        let registry = Registry::with_builtin_gates(test_logger());
        let spec = instance_spec::from_str(MACVTAP_VM).unwrap();

        let response = admit(
            &registry,
            &[featuregate::MACVTAP],
            &spec,
            &test_logger(),
        );
        assert!(!response.allowed);
        assert_eq!(response.causes.len(), 1);
        assert!(response.warnings.is_empty());
    }

    #[test]
    fn deprecated_gate_in_use_only_warns() {
        let registry = Registry::with_builtin_gates(test_logger());
        let spec = instance_spec::from_str(MACVTAP_VM).unwrap();

        let response = admit(
            &registry,
            &[featuregate::VIRTIOFS],
            &spec,
            &test_logger(),
        );
        assert!(response.allowed);
        assert!(response.causes.is_empty());
        assert_eq!(response.warnings.len(), 1);
        let prefix = "feature gate ExperimentalVirtiofsSupport is deprecated";
        assert!(response.warnings[0].starts_with(prefix));
    }

    #[test]
    fn deprecated_api_warns_once() {
        let registry = Registry::new(test_logger());
        registry.register(
            FeatureGate::new("test-deprecated", State::Deprecated, "")
                .with_usage_check(|_: &VmInstanceSpec| true),
        );

        let response = admit(
            &registry,
            &["test-deprecated"],
            &VmInstanceSpec::default(),
            &test_logger(),
        );
        assert!(response.allowed);
        assert_eq!(response.warnings.len(), 1);
        assert!(response.warnings[0]
            .starts_with("feature gate test-deprecated is deprecated"));
    }

    #[test]
    fn generally_available_gate_does_not_warn() {
        let registry = Registry::with_builtin_gates(test_logger());
        let spec = instance_spec::from_str(MACVTAP_VM).unwrap();

        let response =
            admit(&registry, &[featuregate::NUMA], &spec, &test_logger());
        assert_eq!(response, AdmissionResponse::from_causes(vec![], vec![]));
    }

    #[test]
    fn unrelated_gates_are_allowed_silently() {
        let registry = Registry::with_builtin_gates(test_logger());
        let spec = instance_spec::from_str(MACVTAP_VM).unwrap();

        let response =
            admit(&registry, &["SomeAlphaGate"], &spec, &test_logger());
        assert_eq!(response, AdmissionResponse::from_causes(vec![], vec![]));
    }

    #[test]
    fn list_reports_builtin_table() {
        let registry = Registry::with_builtin_gates(test_logger());
        let rows = list(&registry);
        assert_eq!(rows.len(), registry.len());

        let passt =
            rows.iter().find(|r| r.name == featuregate::PASST).unwrap();
        assert_eq!(passt.state, State::Discontinued);
        assert!(passt.checks_spec);

        let json = serde_json::to_value(passt).unwrap();
        assert_eq!(json["state"], "Discontinued");
    }
}
