// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Describes a checker config which may be parsed from a TOML file.

use std::path::Path;

use featuregate::Registry;
use slog::{info, warn, Logger};

pub use featuregate_config_toml::*;

/// Loads the optional config file at `path` (an absent path means an empty
/// configuration) and builds a registry holding the built-in gates plus any
/// gates the configuration defines.
///
/// Enabled gates that no longer need enabling are logged as warnings.
pub fn load(
    path: Option<&Path>,
    log: &Logger,
) -> Result<(Config, Registry), ParseError> {
    let config = match path {
        Some(path) => {
            info!(log, "loading configuration"; "path" => %path.display());
            parse(path)?
        }
        None => Config::default(),
    };

    let registry = Registry::with_builtin_gates(log.clone());
    config.register_gates(&registry);
    info!(log, "feature gate registry ready";
        "gates" => registry.len(),
        "configured_gates" => config.gates.len(),
    );
    for warning in gate_warnings(&config, &registry) {
        warn!(log, "{}", warning);
    }
    Ok((config, registry))
}

/// Warnings for every gate `config` enables that is already GA, deprecated
/// or discontinued, and so can be removed from the configuration.
pub fn gate_warnings(config: &Config, registry: &Registry) -> Vec<String> {
    registry.config_warnings(config.feature_gates())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use featuregate::State;

    use super::*;

    fn test_logger() -> slog::Logger {
        slog::Logger::root(slog::Discard, slog::o!())
    }

    #[test]
    fn no_config_means_builtin_gates_only() {
        let (config, registry) = load(None, &test_logger()).unwrap();
        assert!(config.feature_gates().is_empty());
        assert_eq!(registry.len(), featuregate::builtin_gates().len());
    }

    #[test]
    fn configured_gates_are_registered() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[developer]
feature_gates = ["my-fg"]

[gate.my-fg]
state = "discontinued"
"#,
        )
        .unwrap();

        let (config, registry) =
            load(Some(file.path()), &test_logger()).unwrap();
        assert_eq!(config.feature_gates(), ["my-fg"]);
        let gate = registry.lookup("my-fg").unwrap();
        assert_eq!(gate.state(), State::Discontinued);
    }

    #[test]
    fn redundant_gates_warn_at_load() {
        let config = from_str(
            r#"
[developer]
feature_gates = ["NUMA", "SomeAlphaGate"]
"#,
        )
        .unwrap();
        let registry = Registry::with_builtin_gates(test_logger());

        let warnings = gate_warnings(&config, &registry);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("feature gate NUMA is deprecated"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let missing = Path::new("/nonexistent/featuregate.toml");
        assert!(matches!(
            load(Some(missing), &test_logger()),
            Err(ParseError::Io(_))
        ));
    }
}
