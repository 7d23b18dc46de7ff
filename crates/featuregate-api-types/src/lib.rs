// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Definitions for the types exchanged with the feature-gate admission path:
//! the VM instance spec documents it inspects and the cause records it
//! produces.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod instance_spec;

pub use instance_spec::VmInstanceSpec;

/// The kind of problem a [`StatusCause`] describes.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Serialize,
    PartialEq,
    Eq,
    JsonSchema,
    strum::Display,
)]
pub enum CauseType {
    /// The value supplied for a field is not supported (any longer).
    FieldValueNotSupported,
}

/// One reason a configuration change was rejected.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, JsonSchema)]
pub struct StatusCause {
    #[serde(rename = "type")]
    pub cause_type: CauseType,

    /// Path of the offending field, if the cause refers to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    pub message: String,
}

impl StatusCause {
    /// Creates a cause that does not point at a specific field.
    pub fn new(cause_type: CauseType, message: impl Into<String>) -> Self {
        Self { cause_type, field: None, message: message.into() }
    }
}

impl fmt::Display for StatusCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => {
                write!(f, "{}: {} ({})", self.cause_type, self.message, field)
            }
            None => write!(f, "{}: {}", self.cause_type, self.message),
        }
    }
}

/// The verdict returned to whoever submitted a configuration change.
#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
pub struct AdmissionResponse {
    pub allowed: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<StatusCause>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AdmissionResponse {
    /// Builds a response that is allowed iff `causes` is empty.
    pub fn from_causes(
        causes: Vec<StatusCause>,
        warnings: Vec<String>,
    ) -> Self {
        Self { allowed: causes.is_empty(), causes, warnings }
    }
}
