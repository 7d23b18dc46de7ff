// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device configuration data: components that define VM properties that are
//! visible to a VM's guest software.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A network interface presented to the guest.
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    /// The name of the interface. Must match the name of a
    /// [`super::networks::Network`] in the same spec.
    pub name: String,

    /// How the interface is connected to its network.
    #[serde(flatten)]
    pub binding_method: InterfaceBindingMethod,

    /// A network binding plugin to use instead of a built-in binding method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<PluginBinding>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
}

/// The built-in binding methods. At most one is expected to be set on a given
/// interface; the admission path does not enforce that here.
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceBindingMethod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge: Option<InterfaceBridge>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slirp: Option<InterfaceSlirp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masquerade: Option<InterfaceMasquerade>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sriov: Option<InterfaceSriov>,

    /// Removed binding; kept so that old specs still deserialize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macvtap: Option<InterfaceMacvtap>,

    /// Removed binding; kept so that old specs still deserialize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passt: Option<InterfacePasst>,
}

/// Connects to a network through a linux bridge.
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
pub struct InterfaceBridge {}

/// Connects to a network using QEMU user networking mode.
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
pub struct InterfaceSlirp {}

/// Connects to a network using NAT.
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
pub struct InterfaceMasquerade {}

/// Passes an SR-IOV virtual function through to the guest.
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
pub struct InterfaceSriov {}

/// Extends a node's L2 network into the guest via a macvtap interface.
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
pub struct InterfaceMacvtap {}

/// Connects to a network using the in-tree passt binding.
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
pub struct InterfacePasst {}

/// Selects a registered network binding plugin by name.
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
pub struct PluginBinding {
    pub name: String,
}

/// A host directory or volume shared with the guest.
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
pub struct Filesystem {
    /// The name of the volume backing this filesystem.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtiofs: Option<FilesystemVirtiofs>,
}

#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
pub struct FilesystemVirtiofs {}
