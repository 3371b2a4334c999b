//! partreg - Inspect a part catalog: next names, sub-part names and near-duplicates.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use part_registry::catalog::{
    duplicate_names, find_by_name, load_catalog, parts_of_type, sub_parts_of,
};
use part_registry::{
    validate_dimensions, Allocator, Dimensions, InMemoryStore, Matcher, NumberingMode,
    PartType, RegistryConfig, MATCH_THRESHOLD,
};

/// Part identifier allocation and duplicate detection over a JSON catalog.
#[derive(Parser, Debug)]
#[command(name = "partreg")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Catalog file (JSON array of parts)
    #[arg(short, long)]
    catalog: PathBuf,

    /// Similarity a part must strictly exceed to be suggested
    #[arg(long, default_value_t = MATCH_THRESHOLD)]
    threshold: f64,

    /// Number parts from an atomic per-prefix sequence instead of scanning names
    #[arg(long)]
    sequence: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the next name for a part type
    Next {
        #[arg(short = 't', long = "type")]
        part_type: PartType,
    },
    /// Show the next sub-part name for a parent part
    SubName {
        /// Parent part name
        #[arg(short, long)]
        parent: String,
    },
    /// Find the closest existing part for a set of dimensions
    Match {
        #[arg(short = 't', long = "type")]
        part_type: PartType,
        /// Dimension as key=value (repeatable)
        #[arg(short, long = "dim", value_parser = parse_dim)]
        dims: Vec<(String, String)>,
    },
    /// Check dimensions against the required fields for a type
    Validate {
        #[arg(short = 't', long = "type")]
        part_type: PartType,
        #[arg(short, long = "dim", value_parser = parse_dim)]
        dims: Vec<(String, String)>,
    },
    /// Verify that every part name in the catalog is unique
    Check,
}

fn parse_dim(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing dimension name in '{}'", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let parts = load_catalog(&args.catalog)
        .with_context(|| format!("Failed to load {}", args.catalog.display()))?;
    info!("Loaded {} part(s)", parts.len());

    let numbering = if args.sequence {
        NumberingMode::AtomicSequence
    } else {
        NumberingMode::ScanMax
    };
    let config = RegistryConfig::new(numbering).with_threshold(args.threshold);

    match args.command {
        Command::Next { part_type } => {
            let highest = parts_of_type(&parts, part_type)
                .filter_map(|p| p.number())
                .max();
            match highest {
                Some(n) => info!("Highest {} number in catalog: {}", part_type, n),
                None => info!("No numbered {} parts yet", part_type),
            }
            let store = InMemoryStore::from_parts(parts).with_sequences();
            let proposal = Allocator::with_config(&store, config).propose_name(part_type)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&proposal)?);
            } else {
                println!("{}", proposal.name);
            }
        }
        Command::SubName { parent } => {
            let parent_id = find_by_name(&parts, &parent)
                .map(|p| p.id)
                .with_context(|| format!("No part named {}", parent))?;
            info!(
                "{} has {} sub-part(s)",
                parent,
                sub_parts_of(&parts, parent_id).count()
            );
            let store = InMemoryStore::from_parts(parts);
            let proposal = Allocator::with_config(&store, config).propose_sub_part_name(parent_id)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&proposal)?);
            } else {
                println!("{}", proposal.name);
            }
        }
        Command::Match { part_type, dims } => {
            let dimensions: Dimensions = dims.into_iter().collect();
            let matcher = Matcher::new(config.match_threshold);
            let ranked = matcher.rank(part_type, &dimensions, &parts);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else if let Some(best) = ranked.first() {
                println!("{} ({:.1}% similar)", best.part.name, best.score);
                for other in &ranked[1..] {
                    println!("  also {} ({:.1}%)", other.part.name, other.score);
                }
            } else {
                println!("No existing {} above {}%", part_type, matcher.threshold());
            }
        }
        Command::Validate { part_type, dims } => {
            let dimensions: Dimensions = dims.into_iter().collect();
            let result = validate_dimensions(part_type, &dimensions);
            for warning in &result.warnings {
                warn!("{}", warning);
            }
            for err in &result.errors {
                error!("{}", err);
            }
            if !result.passed {
                anyhow::bail!("Validation failed");
            }
            info!("Validation passed");
        }
        Command::Check => {
            let duplicates = duplicate_names(&parts);
            if !duplicates.is_empty() {
                for name in &duplicates {
                    error!("Name {} is used by more than one part", name);
                }
                anyhow::bail!("{} duplicate name(s)", duplicates.len());
            }
            info!("All {} names are unique", parts.len());
        }
    }

    Ok(())
}
