//! Find the offsets of keys in a JSON file.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use findkey::{find_keys_with, read_key_list, Algorithm, Bounded, Match, Options, Partition, Verify};
use memmap2::Mmap;
use std::{
    fs::File,
    path::{Path, PathBuf},
    time::Instant,
};

/// The default number of results kept for printing
const DEFAULT_LIMIT: usize = 1024 * 1024;

#[derive(Debug, Parser)]
#[command(name = "findkey")]
#[command(about = "Find the offsets of selected keys in a JSON document", long_about = None)]
#[command(version)]
struct Cli {
    /// File with one key per line
    #[arg(long)]
    keys: PathBuf,

    /// JSON document to search
    #[arg(long)]
    data: PathBuf,

    /// Matching engine (scalar, teddy, baseline)
    #[arg(long, default_value = "scalar")]
    algo: Algorithm,

    /// Print the position and key of each match
    #[arg(long)]
    print_positions: bool,

    /// Maximum number of matches to keep
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Print the results as a JSON object
    #[arg(long)]
    json: bool,

    /// How keys are grouped for the Teddy engines
    #[arg(long, default_value = "auto")]
    partition: PartitionArg,

    /// How Teddy candidates are confirmed
    #[arg(long, default_value = "span")]
    verify: VerifyArg,
}

#[derive(Debug, Clone, ValueEnum)]
enum PartitionArg {
    /// Merge small key sets, hash large ones
    Auto,
    /// Greedily merge groups with similar nibbles
    Merge,
    /// Hash key suffixes into buckets
    Bucket,
}

impl From<PartitionArg> for Partition {
    fn from(arg: PartitionArg) -> Self {
        match arg {
            PartitionArg::Auto => Partition::Auto,
            PartitionArg::Merge => Partition::Merge,
            PartitionArg::Bucket => Partition::Bucket,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum VerifyArg {
    /// Look up the string ending at each candidate
    Span,
    /// Compare each key in the groups that hit
    Group,
}

impl From<VerifyArg> for Verify {
    fn from(arg: VerifyArg) -> Self {
        match arg {
            VerifyArg::Span => Verify::Span,
            VerifyArg::Group => Verify::Group,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let keys = read_key_list(&cli.keys)
        .with_context(|| format!("Failed to read keys file: {}", cli.keys.display()))?;

    let data = map_data(&cli.data)?;
    let input: &[u8] = data.as_deref().unwrap_or(&[]);

    let options = Options {
        partition: cli.partition.into(),
        verify: cli.verify.into(),
    };

    let mut out = vec![Match::default(); cli.limit];
    let mut sink = Bounded::new(&mut out);

    let start = Instant::now();
    find_keys_with(input, &keys, cli.algo, options, &mut sink)
        .with_context(|| format!("Failed to search with the {} engine", cli.algo))?;
    let elapsed = start.elapsed();

    let found = sink.found();
    let matches = sink.as_slice();

    let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
    let mib = input.len() as f64 / (1024.0 * 1024.0);
    let throughput = if elapsed_ms > 0.0 {
        mib / (elapsed_ms / 1000.0)
    } else {
        0.0
    };

    if cli.json {
        let matches: Vec<serde_json::Value> = matches
            .iter()
            .map(|m| {
                let mut value = m.to_value();
                value["key"] = String::from_utf8_lossy(&keys[m.key_id as usize]).into();
                value
            })
            .collect();

        let report = serde_json::json!({
            "algorithm": cli.algo.to_string(),
            "found": found,
            "truncated": found > matches.len(),
            "matches": matches,
            "elapsed_ms": elapsed_ms,
            "bytes": input.len(),
        });

        println!("{}", serde_json::to_string_pretty(&report)?);

        return Ok(());
    }

    println!("Algorithm used: {}", cli.algo);
    println!("Total key-value pairs found: {}", found);

    if cli.print_positions {
        for m in matches {
            println!("\tPosition: {}", m.position);
            println!(
                "\tKey: \"{}\"",
                String::from_utf8_lossy(&keys[m.key_id as usize])
            );
        }

        if found > matches.len() {
            println!("  ... and {} more", found - matches.len());
        }
    }

    println!("Time taken: {:.2} ms", elapsed_ms);
    println!("Data size: {:.2} MiB", mib);
    println!("Throughput: {:.2} MiB/s", throughput);

    Ok(())
}

/// Map the data file read-only. Empty files can't be mapped, so they're read as nothing.
fn map_data(path: &Path) -> Result<Option<Mmap>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open data file: {}", path.display()))?;

    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat data file: {}", path.display()))?
        .len();

    if len == 0 {
        return Ok(None);
    }

    // SAFETY: The file is only read, and isn't expected to change while it's mapped
    let map = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to map data file: {}", path.display()))?;

    Ok(Some(map))
}
