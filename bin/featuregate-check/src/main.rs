// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use featuregate_api_types::{instance_spec, AdmissionResponse, VmInstanceSpec};
use featuregate_check::{admission, config};
use slog::{debug, info};

fn parse_log_level(s: &str) -> anyhow::Result<slog::Level> {
    s.parse().map_err(|_| anyhow::anyhow!("Invalid log level"))
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum LogFormat {
    Term,
    Bunyan,
}

#[derive(Debug, Parser)]
#[clap(about, version)]
/// Checks VM instance specs against the configured feature gates
struct Args {
    /// Logging level
    #[clap(long, default_value_t = slog::Level::Info, value_parser = parse_log_level)]
    log_level: slog::Level,

    /// Log output format. Defaults to `term` when stderr is a terminal and
    /// `bunyan` otherwise.
    #[clap(long, value_enum)]
    log_format: Option<LogFormat>,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Lists the registered feature gates as JSON lines.
    List {
        /// TOML configuration defining additional gates.
        #[clap(long, action)]
        config: Option<PathBuf>,
    },

    /// Decides whether an instance spec is admitted and prints the verdict.
    Check {
        /// JSON instance spec document to check.
        #[clap(long, action)]
        spec: PathBuf,

        /// TOML configuration naming the enabled feature gates.
        #[clap(long, action)]
        config: Option<PathBuf>,

        /// Additional enabled feature gate. May be repeated.
        #[clap(long = "feature-gate", action)]
        feature_gates: Vec<String>,
    },

    /// Prints the JSON schema of the instance spec and verdict documents.
    Schema,
}

fn build_logger(
    level: slog::Level,
    format: Option<LogFormat>,
) -> (slog::Logger, slog_async::AsyncGuard) {
    use slog::Drain;

    let format = format.unwrap_or(if atty::is(atty::Stream::Stderr) {
        LogFormat::Term
    } else {
        LogFormat::Bunyan
    });

    let (drain, guard) = match format {
        LogFormat::Term => {
            let decorator = slog_term::TermDecorator::new().stderr().build();
            let drain = slog_term::FullFormat::new(decorator).build().fuse();
            slog_async::Async::new(drain)
                .overflow_strategy(slog_async::OverflowStrategy::Block)
                .build_with_guard()
        }
        LogFormat::Bunyan => {
            let drain =
                slog_bunyan::with_name("featuregate-check", std::io::stderr())
                    .build()
                    .fuse();
            slog_async::Async::new(drain)
                .overflow_strategy(slog_async::OverflowStrategy::Block)
                .build_with_guard()
        }
    };

    let filtered = slog::LevelFilter::new(drain, level);
    (slog::Logger::root(filtered.fuse(), slog::o!()), guard)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn run_list(
    config_path: Option<PathBuf>,
    log: &slog::Logger,
) -> anyhow::Result<()> {
    let (_, registry) = config::load(config_path.as_deref(), log)
        .context("failed to load configuration")?;
    for row in admission::list(&registry) {
        print_json(&row)?;
    }
    Ok(())
}

fn run_check(
    spec_path: PathBuf,
    config_path: Option<PathBuf>,
    extra_gates: Vec<String>,
    log: &slog::Logger,
) -> anyhow::Result<()> {
    let (config, registry) = config::load(config_path.as_deref(), log)
        .context("failed to load configuration")?;

    let spec = instance_spec::parse(&spec_path).with_context(|| {
        format!("failed to load instance spec {}", spec_path.display())
    })?;
    debug!(log, "loaded instance spec";
        "path" => %spec_path.display(),
        "interfaces" => spec.interfaces().count(),
        "filesystems" => spec.filesystems().count(),
    );

    let mut gates = config.feature_gates().to_vec();
    gates.extend(extra_gates);
    info!(log, "checking instance spec"; "feature_gates" => ?gates);

    let response = admission::admit(&registry, &gates, &spec, log);
    print_json(&response)?;

    if response.allowed {
        Ok(())
    } else {
        Err(anyhow!(
            "instance spec rejected with {} cause(s)",
            response.causes.len()
        ))
    }
}

fn run_schema() -> anyhow::Result<()> {
    print_json(&schemars::schema_for!(VmInstanceSpec))?;
    print_json(&schemars::schema_for!(AdmissionResponse))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (log, _guard) = build_logger(args.log_level, args.log_format);

    match args.cmd {
        Command::List { config } => run_list(config, &log),
        Command::Check { spec, config, feature_gates } => {
            run_check(spec, config, feature_gates, &log)
        }
        Command::Schema => run_schema(),
    }
}
