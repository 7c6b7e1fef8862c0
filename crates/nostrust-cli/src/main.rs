// crates/nostrust-cli/src/main.rs
//
// CLI entrypoint for nostrust.
//
// Computes the web of trust as seen from one seed key, prints the ranked
// ratings, optionally reports the benchmark keys separately, then drops into
// an interactive lookup prompt.

mod backend;
mod config;
mod interactive;
mod output;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::{CliConfig, DEFAULT_CONFIG_PATH};
use nostrust_core::{Identity, NameResolver};
use nostrust_reputation::ranker::{rank, resolve_names};
use nostrust_reputation::{Ledger, TrustEngine};
use output::OutputFormat;

/// Nostr web-of-trust scores from one key's point of view.
#[derive(Parser, Debug)]
#[command(name = "nostrust", version = "0.1.0", about = "Nostr web-of-trust scoring")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Seed key (npub or hex). Overrides `default_npub`.
    #[arg(long)]
    npub: Option<String>,

    /// Follow traversal depth. Overrides `engine.follow_ttl`.
    #[arg(long)]
    depth: Option<u32>,

    /// Relay websocket URL. Overrides `relay_url`.
    #[arg(long)]
    relay: Option<String>,

    /// Read the graph from a JSON snapshot instead of a relay.
    #[arg(long)]
    graph: Option<PathBuf>,

    /// Also report the benchmark keys with untrusted reports applied.
    #[arg(long)]
    benchmark: bool,

    /// Exit once the ratings are printed.
    #[arg(long)]
    no_interactive: bool,

    /// Print debug information.
    #[arg(short, long)]
    verbose: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Print npubs instead of looking up display names.
    #[arg(long)]
    no_names: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load before tracing starts so the file can pick the log level; report
    // the outcome once the subscriber is up.
    let loaded = CliConfig::load(&args.config);
    let mut cli_config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => CliConfig::default(),
    };

    let level = if args.verbose { "debug" } else { cli_config.log_level.as_str() };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();

    match &loaded {
        Ok(_) => tracing::info!("Loaded configuration from {}", args.config),
        Err(e) => tracing::warn!("Could not load config from {}: {}. Using defaults.", args.config, e),
    }

    // CLI flags override the config file values.
    if let Some(npub) = &args.npub {
        cli_config.default_npub = npub.clone();
    }
    if let Some(depth) = args.depth {
        cli_config.engine.follow_ttl = depth;
    }
    if let Some(relay) = &args.relay {
        cli_config.relay_url = relay.clone();
    }

    let seed: Identity = cli_config.default_npub.parse()?;
    let source = backend::open(&cli_config, args.graph.as_deref())?;
    let engine = TrustEngine::new(cli_config.engine.clone(), source.clone())?;
    let minimum = engine.config().minimum_trust_score;
    let concurrency = engine.config().fetch_concurrency;

    tracing::info!("Computing trust from {}", seed.to_npub());
    let ledger = engine.run(seed).await?;

    let resolver = (!args.no_names).then(|| source.as_ref());
    println!("{}", ranked_report(&ledger, resolver, concurrency, args.format, minimum).await);

    if args.benchmark {
        println!("Applying untrusted reports and displaying scores for benchmark pubkeys.");
        let keys = benchmark_keys(&cli_config.benchmark_npubs);
        let subset = engine.benchmark(&ledger, &keys).await;
        println!("{}", ranked_report(&subset, resolver, concurrency, args.format, minimum).await);
    }

    if !args.no_interactive {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        interactive::run(&engine, source.as_ref(), &ledger, stdin.lock(), &mut stdout, !args.no_names).await?;
    }

    Ok(())
}

/// Rank `ledger`, name the entries if a resolver is given, and render.
async fn ranked_report<R: NameResolver + ?Sized>(
    ledger: &Ledger,
    resolver: Option<&R>,
    concurrency: usize,
    format: OutputFormat,
    minimum_trust_score: f64,
) -> String {
    let mut entries = rank(ledger);
    if let Some(resolver) = resolver {
        resolve_names(&mut entries, resolver, concurrency).await;
    }
    output::render(&entries, format, minimum_trust_score)
}

/// Decode the configured benchmark keys, skipping any that are malformed.
fn benchmark_keys(npubs: &[String]) -> Vec<Identity> {
    npubs
        .iter()
        .filter_map(|npub| match npub.parse::<Identity>() {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::warn!("Skipping benchmark key {}: {}", npub, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse() {
        let args = Args::try_parse_from([
            "nostrust",
            "--npub",
            "abc",
            "--depth",
            "3",
            "--benchmark",
            "--no-interactive",
            "-v",
            "--format",
            "json",
            "--no-names",
            "--graph",
            "g.json",
        ])
        .unwrap();
        assert_eq!(args.npub.as_deref(), Some("abc"));
        assert_eq!(args.depth, Some(3));
        assert!(args.benchmark && args.no_interactive && args.verbose && args.no_names);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.graph, Some(PathBuf::from("g.json")));
        assert_eq!(args.config, DEFAULT_CONFIG_PATH);
    }

    #[test]
    fn defaults_are_interactive_plain() {
        let args = Args::try_parse_from(["nostrust"]).unwrap();
        assert!(!args.no_interactive);
        assert_eq!(args.format, OutputFormat::Plain);
        assert!(args.relay.is_none());
    }

    #[tokio::test]
    async fn report_without_resolver_prints_npubs() {
        let seed = Identity::from_bytes([1; 32]);
        let ledger = Ledger::seeded(seed);
        let out = ranked_report::<nostrust_core::NpubResolver>(&ledger, None, 1, OutputFormat::Plain, 0.5).await;
        assert!(out.ends_with(&format!("{}  1.0000000000  {}\n", seed.to_npub(), seed.to_npub())));
        assert!(out.contains("above threshold 0.5:"));
    }

    #[test]
    fn malformed_benchmark_keys_are_skipped() {
        let good = Identity::from_bytes([7; 32]);
        let keys = benchmark_keys(&[good.to_npub(), "npub1bogus".to_string(), good.to_hex()]);
        assert_eq!(keys, vec![good, good]);
    }
}
