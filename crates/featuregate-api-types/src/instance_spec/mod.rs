// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! VM instance spec documents as seen by the admission path.
//!
//! These types only model the parts of a VM instance spec that feature-gate
//! usage checks need to look at: the guest's network interfaces (and the
//! binding method each one uses), the networks they attach to, and shared
//! filesystems. Any other field present in a submitted document is ignored
//! on deserialization, so a full spec can be handed to [`parse`] unchanged.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod components;

use components::{
    devices::{Filesystem, Interface},
    networks::Network,
};

/// Errors that can arise while loading an instance spec document.
#[derive(Debug, Error)]
pub enum SpecLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot parse instance spec: {0}")]
    Json(#[from] serde_json::Error),
}

/// The desired configuration of a VM instance.
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct VmInstanceSpec {
    #[serde(default)]
    pub domain: DomainSpec,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<Network>,
}

impl VmInstanceSpec {
    /// Iterates over every network interface configured in the guest.
    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.domain.devices.interfaces.iter()
    }

    /// Iterates over every filesystem shared into the guest.
    pub fn filesystems(&self) -> impl Iterator<Item = &Filesystem> {
        self.domain.devices.filesystems.iter()
    }
}

#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct DomainSpec {
    #[serde(default)]
    pub devices: Devices,
}

/// The guest-visible devices of an instance.
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct Devices {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<Interface>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filesystems: Vec<Filesystem>,
}

/// Parses a JSON instance spec document from a string.
pub fn from_str(raw: &str) -> Result<VmInstanceSpec, SpecLoadError> {
    Ok(serde_json::from_str(raw)?)
}

/// Reads and parses a JSON instance spec document from `path`.
pub fn parse<P: AsRef<Path>>(
    path: P,
) -> Result<VmInstanceSpec, SpecLoadError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    from_str(&contents)
}
