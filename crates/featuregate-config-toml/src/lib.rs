// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! TOML configuration for the feature-gate admission path.
//!
//! A configuration file names the feature gates an operator has enabled and
//! may define additional gates (or redefine built-in ones) to register at
//! start-up:
//!
//! ```toml
//! [developer]
//! feature_gates = ["LiveMigration", "Macvtap"]
//!
//! [gate.my-fg]
//! state = "deprecated"
//! message = "my-fg will go away in the next release"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use featuregate::{FeatureGate, Registry, State};
use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the feature-gate admission path.
#[derive(Default, Serialize, Deserialize, Debug, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub developer: DeveloperConfiguration,

    #[serde(default, rename = "gate")]
    pub gates: BTreeMap<String, GateDefinition>,
}

/// Operator-facing knobs, in particular the list of enabled feature gates.
#[derive(Default, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct DeveloperConfiguration {
    #[serde(default)]
    pub feature_gates: Vec<String>,
}

/// A feature gate defined in configuration rather than compiled in.
///
/// Gates defined this way never carry a usage check, so a definition that
/// shadows a built-in discontinued gate also turns off the rejection of specs
/// that still use it.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct GateDefinition {
    pub state: State,

    #[serde(default)]
    pub message: String,
}

/// Errors which may be returned when parsing the configuration.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Cannot parse toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Gate definitions must have a non-empty name")]
    EmptyGateName,
}

impl Config {
    /// The enabled feature gates, in the order they were configured.
    pub fn feature_gates(&self) -> &[String] {
        &self.developer.feature_gates
    }

    /// Registers every `[gate.*]` definition with `registry`, replacing any
    /// existing gate of the same name.
    pub fn register_gates(&self, registry: &Registry) {
        for (name, def) in &self.gates {
            registry.register(FeatureGate::new(
                name.clone(),
                def.state,
                def.message.clone(),
            ));
        }
    }

    fn check(&self) -> Result<(), ParseError> {
        if self.gates.keys().any(|name| name.is_empty()) {
            return Err(ParseError::EmptyGateName);
        }
        Ok(())
    }
}

/// Parses a TOML string into a configuration object.
pub fn from_str(raw: &str) -> Result<Config, ParseError> {
    let cfg = toml::from_str::<Config>(raw)?;
    cfg.check()?;
    Ok(cfg)
}

/// Parses a TOML file into a configuration object.
pub fn parse<P: AsRef<Path>>(path: P) -> Result<Config, ParseError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    from_str(&contents)
}
