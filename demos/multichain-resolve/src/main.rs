//! Lists and resolves deploy targets from a registry definition.
//!
//! ```text
//! multichain-resolve --registry demos/multichain-resolve/networks.toml list
//! DEPLOY_SECRET_PK=0x.. DEPLOY_SECRET_API_KEY=.. multichain-resolve resolve bsc base
//! multichain-resolve --secrets .secret.json resolve-all
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use deploy_profiles::registry::ProfileRegistry;
use deploy_profiles::resolver::{ResolvedProfile, Resolver};
use deploy_profiles::secrets::{
    DEFAULT_ENV_PREFIX, EnvSecretProvider, JsonFileSecretProvider, LayeredSecretProvider,
    SecretProvider,
};
use deploy_profiles::telemetry::{TelemetryConfig, init_tracing};
use serde_json::json;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "multichain-resolve", version, about)]
struct Cli {
    /// Registry definition file (.toml or .json).
    #[arg(
        long,
        env = "DEPLOY_REGISTRY",
        default_value = "demos/multichain-resolve/networks.toml"
    )]
    registry: PathBuf,

    /// JSON secrets file consulted after the environment.
    #[arg(long, env = "DEPLOY_SECRETS_FILE")]
    secrets: Option<PathBuf>,

    /// Prefix for environment-backed secrets.
    #[arg(long, default_value = DEFAULT_ENV_PREFIX)]
    env_prefix: String,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print target names in registry order.
    List,
    /// Print a target's declared profile (references only).
    Show {
        /// Target name.
        target: String,
    },
    /// Resolve targets against live secrets and print redacted profiles.
    Resolve {
        /// Target names; the registry default is used when omitted.
        targets: Vec<String>,
    },
    /// Resolve every registered target.
    ResolveAll,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&TelemetryConfig::default().with_default_filter(cli.log_level.clone()))?;

    let registry = ProfileRegistry::load(&cli.registry)
        .with_context(|| format!("loading {}", cli.registry.display()))?;
    info!(targets = registry.len(), "registry loaded");

    match cli.command {
        Command::List => {
            let default = registry.default_target().cloned();
            for name in registry.names() {
                let marker = if Some(name) == default.as_ref() { " (default)" } else { "" };
                println!("{name}{marker}");
            }
        }
        Command::Show { target } => {
            let profile = registry.get(&target)?;
            println!("{}", serde_json::to_string_pretty(profile)?);
        }
        Command::Resolve { targets } => {
            let resolver = resolver(registry, cli.secrets.as_deref(), &cli.env_prefix);
            if targets.is_empty() {
                let resolved = resolver.resolve_default().await?;
                println!("{}", serde_json::to_string_pretty(&redacted(&resolved))?);
            } else {
                report(resolver.resolve_many(&targets).await)?;
            }
        }
        Command::ResolveAll => {
            let resolver = resolver(registry, cli.secrets.as_deref(), &cli.env_prefix);
            report(resolver.resolve_all().await)?;
        }
    }

    Ok(())
}

fn resolver(registry: ProfileRegistry, secrets: Option<&Path>, env_prefix: &str) -> Resolver {
    let mut provider =
        LayeredSecretProvider::new().with_layer(Arc::new(EnvSecretProvider::with_prefix(env_prefix)));
    if let Some(path) = secrets {
        provider = provider.with_layer(Arc::new(JsonFileSecretProvider::new(path)));
    }
    let provider: Arc<dyn SecretProvider> = Arc::new(provider);
    Resolver::new(Arc::new(registry), provider)
}

fn report(
    results: Vec<(String, deploy_profiles::resolver::ResolveResult<ResolvedProfile>)>,
) -> Result<()> {
    let mut failures = 0usize;
    for (name, result) in results {
        match result {
            Ok(resolved) => println!("{}", serde_json::to_string_pretty(&redacted(&resolved))?),
            Err(err) => {
                failures += 1;
                eprintln!("{name}: {err}");
            }
        }
    }
    if failures > 0 {
        bail!("{failures} target(s) failed to resolve");
    }
    Ok(())
}

fn redacted(resolved: &ResolvedProfile) -> serde_json::Value {
    let build = resolved.build();
    json!({
        "name": resolved.name().as_str(),
        "endpoint": resolved.display_endpoint(),
        "chain_id": resolved.chain_id(),
        "credential": "<redacted>",
        "explorer_key": resolved.explorer_key().map(|_| "<redacted>"),
        "build": {
            "compiler_version": build.compiler_version(),
            "optimizer_enabled": build.optimizer_enabled(),
            "optimizer_runs": build.optimizer_runs(),
            "output_selection": build.output_selection(),
        },
    })
}
