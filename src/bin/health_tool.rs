use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use clusterhealth::{
    CodecLimits, IndexHealth, IndexMetadata, IndexRoutingTable, decode_index_health_with_limits,
    encode_index_health,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "health-tool")]
#[command(about = "Derive, encode and inspect index health snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derive index health from a JSON routing description
    Derive {
        #[arg(long)]
        routing: PathBuf,
        /// Write the binary encoding of the snapshot here
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Decode a binary snapshot and print it as JSON
    Decode {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        max_shards: Option<u32>,
        /// Fail if totals or status disagree with the shard entries
        #[arg(long)]
        check: bool,
    },
}

/// Routing description accepted by `derive`.
#[derive(Deserialize)]
struct RoutingInput {
    metadata: IndexMetadata,
    routing: IndexRoutingTable,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Derive { routing, out } => derive(&routing, out.as_deref()),
        Command::Decode {
            input,
            max_shards,
            check,
        } => decode(&input, max_shards, check),
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create parent directory '{}'", parent.display()))?;
    }
    Ok(())
}

fn derive(routing: &Path, out: Option<&Path>) -> Result<()> {
    let raw = fs::read_to_string(routing)
        .with_context(|| format!("Failed to read routing description '{}'", routing.display()))?;
    let input: RoutingInput = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse routing description '{}'", routing.display()))?;
    input.metadata.validate()?;

    let health = IndexHealth::from_routing(&input.metadata, &input.routing);
    println!("{}", serde_json::to_string_pretty(&health)?);

    if let Some(out) = out {
        ensure_parent_dir(out)?;
        fs::write(out, encode_index_health(&health))
            .with_context(|| format!("Failed to write snapshot to '{}'", out.display()))?;
        eprintln!("Wrote snapshot: {}", out.display());
    }
    Ok(())
}

fn decode(input: &Path, max_shards: Option<u32>, check: bool) -> Result<()> {
    let raw = fs::read(input)
        .with_context(|| format!("Failed to read snapshot '{}'", input.display()))?;

    let mut limits = CodecLimits::default();
    if let Some(max) = max_shards {
        limits = limits.max_shards(max);
    }

    let health = decode_index_health_with_limits(raw, &limits)
        .with_context(|| format!("Failed to decode snapshot '{}'", input.display()))?;
    if check {
        health
            .check_consistency()
            .map_err(|e| anyhow!("Snapshot '{}' is inconsistent: {}", input.display(), e))?;
    }

    println!("{}", serde_json::to_string_pretty(&health)?);
    Ok(())
}
