// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// These tests share the process-wide registry and run concurrently, so each
// one works with gate names no other test touches.

use featuregate::{
    default_message, feature_gate_info, register_feature_gate,
    unregister_feature_gate, validate_feature_gates, FeatureGate, State,
};
use featuregate_api_types::{
    instance_spec, CauseType, StatusCause, VmInstanceSpec,
};

struct Unregister(&'static str);

impl Drop for Unregister {
    fn drop(&mut self) {
        unregister_feature_gate(self.0);
    }
}

#[test]
fn builtin_gates_are_present() {
    let gate = feature_gate_info(featuregate::LIVE_MIGRATION).unwrap();
    assert_eq!(gate.state(), State::GeneralAvailability);

    let gate = feature_gate_info(featuregate::MACVTAP).unwrap();
    assert_eq!(gate.state(), State::Discontinued);
    assert!(gate.has_usage_check());
}

#[test]
fn default_message_for_registered_gate() {
    let _cleanup = Unregister("global-my-fg");
    register_feature_gate(FeatureGate::new(
        "global-my-fg",
        State::GeneralAvailability,
        "",
    ));

    let gate = feature_gate_info("global-my-fg").unwrap();
    assert_eq!(
        gate.message(),
        default_message("global-my-fg", State::GeneralAvailability)
    );
}

#[test]
fn override_then_unregister() {
    let _cleanup = Unregister("global-override");
    register_feature_gate(FeatureGate::new(
        "global-override",
        State::Deprecated,
        "first",
    ));
    register_feature_gate(FeatureGate::new(
        "global-override",
        State::Deprecated,
        "second",
    ));
    assert_eq!(
        feature_gate_info("global-override").unwrap().message(),
        "second"
    );

    unregister_feature_gate("global-override");
    assert!(feature_gate_info("global-override").is_none());
}

#[test]
fn discontinued_gate_rejects_spec() {
    let _cleanup = Unregister("global-test");
    register_feature_gate(
        FeatureGate::new("global-test", State::Discontinued, "test warning")
            .with_usage_check(|_: &VmInstanceSpec| true),
    );

    let causes =
        validate_feature_gates(&["global-test"], &VmInstanceSpec::default());
    assert_eq!(
        causes,
        [StatusCause::new(CauseType::FieldValueNotSupported, "test warning")]
    );
}

#[test]
fn generally_available_gate_never_rejects() {
    let _cleanup = Unregister("global-ga");
    register_feature_gate(
        FeatureGate::new("global-ga", State::GeneralAvailability, "")
            .with_usage_check(|_: &VmInstanceSpec| true),
    );

    assert!(validate_feature_gates(&["global-ga"], &VmInstanceSpec::default())
        .is_empty());
}

#[test]
fn builtin_passt_rejects_passt_document() {
    let spec = instance_spec::from_str(
        r#"{
  "domain": {
    "devices": {
      "interfaces": [ { "name": "default", "passt": {} } ]
    }
  },
  "networks": [ { "name": "default", "pod": {} } ]
}"#,
    )
    .unwrap();

    let causes = validate_feature_gates(
        &[featuregate::NUMA, featuregate::PASST, featuregate::MACVTAP],
        &spec,
    );
    assert_eq!(causes.len(), 1);
    assert_eq!(
        causes[0].message,
        feature_gate_info(featuregate::PASST).unwrap().message()
    );
}
