// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lifecycle states of a feature gate and the default warning text derived
//! from them.

use serde::{Deserialize, Serialize};

/// Where a feature gate is in its lifecycle.
///
/// Only gates that no longer need to be listed explicitly are tracked, so
/// every state here means "referencing this gate is redundant".
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
pub enum State {
    /// The capability is always enabled.
    #[serde(rename = "General Availability", alias = "ga", alias = "GA")]
    #[strum(serialize = "General Availability")]
    GeneralAvailability,

    /// The capability still works but is scheduled for removal.
    #[serde(alias = "deprecated")]
    Deprecated,

    /// The capability has been removed; specs that still use it are
    /// rejected.
    #[serde(alias = "discontinued")]
    Discontinued,
}

const DEPRECATION_DOC_URL: &str =
    "https://github.com/kubevirt/kubevirt/blob/main/docs/deprecation.md";

/// Renders the warning attached to a gate registered without a message of
/// its own.
pub fn default_message(name: &str, state: State) -> String {
    format!(
        "feature gate {name} is deprecated (feature state is \"{state}\"), \
         therefore it can be safely removed and is redundant. For more info, \
         please look at: {DEPRECATION_DOC_URL}"
    )
}
