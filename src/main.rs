use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use param_resolver::config::{ResolverConfig, StoreConfig, StoreKind};
use param_resolver::engine::SchemaMode;
use param_resolver::{cli, logging, wire};
use tracing::{info, warn};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(logging::Verbosity::from_flags(args.verbose, args.quiet));
    args.validate().context("Invalid arguments")?;

    let mut config = match args.config {
        Some(ref path) => ResolverConfig::load(path).context("Invalid resolver config")?,
        // References must outlive this process.
        None => {
            let mut config = ResolverConfig {
                store: StoreConfig {
                    kind: StoreKind::Local,
                    root: None,
                },
                ..ResolverConfig::default()
            };
            config.apply_env();
            config
        }
    };
    if let Some(ref root) = args.store {
        config.store.kind = StoreKind::Local;
        config.store.root = Some(root.clone());
    }
    if let Some(ref dir) = args.download_dir {
        config.download_dir = Some(dir.clone());
    }
    if args.strict {
        config.schema_mode = SchemaMode::Strict;
    }

    if config.store.kind == StoreKind::Memory {
        warn!("memory store selected; references produced by this run cannot be fetched later");
    }

    let store = config.build_store().context("Failed to open backing store")?;
    let resolver = config
        .build_resolver(store)
        .context("Failed to build resolver")?;

    let definitions = match args.definitions {
        Some(ref path) => cli::read_definitions(path)?,
        None => Vec::new(),
    };
    let raw = cli::read_values(&args.values)?;
    let values = wire::decode(&raw, &definitions).context("Failed to decode values")?;

    info!(
        direction = %args.direction,
        parameters = values.len(),
        strategies = ?resolver.registry().strategy_names(),
        "resolving parameters"
    );
    let resolved = resolver
        .resolve(&values, &definitions, args.direction)
        .context("Failed to resolve parameters")?;

    let output = serde_json::to_string_pretty(&wire::encode(&resolved))?;
    match args.output_file {
        Some(ref path) => std::fs::write(path, output)
            .with_context(|| format!("Cannot write output: {}", path.display()))?,
        None => println!("{output}"),
    }

    Ok(())
}
