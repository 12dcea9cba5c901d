//! SuiTruth CLI - resolve addresses from the command line
//!
//! Usage:
//!   sui_truth <address|coin type|name.sui>...
//!
//! Every argument is resolved in one batch; each profile is printed as one
//! JSON line on stdout. `.sui` names are looked up first and resolved as
//! the address they point to. Logs go to stderr.

use eyre::Result;
use std::sync::Arc;
use tracing::{info, warn};

use sui_truth::utils::constants::{APP_NAME, APP_VERSION, SUINS_SUFFIX};
use sui_truth::{init_tracing, Resolver, ResolverConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{} v{}", APP_NAME, APP_VERSION);
        eprintln!("Usage: sui_truth <address|coin type|name.sui>...");
        std::process::exit(2);
    }

    let config = ResolverConfig::from_env()?;
    let resolver = Arc::new(Resolver::new(&config)?);

    let mut inputs = Vec::with_capacity(args.len());
    for arg in &args {
        if arg.trim().to_lowercase().ends_with(SUINS_SUFFIX) {
            match resolver.resolve_name(arg).await {
                Some(address) => {
                    info!("🔗 {} -> {}", arg.trim(), address);
                    inputs.push(address);
                }
                None => warn!("⚠️ {} did not resolve to an address", arg.trim()),
            }
        } else {
            inputs.push(arg.clone());
        }
    }

    let profiles = resolver.resolve_many(&inputs).await;

    // Print in argument order; the batch map itself is unordered
    let mut printed = std::collections::HashSet::new();
    for input in &inputs {
        let key = input.trim().to_lowercase();
        if let Some(profile) = profiles.get(&key) {
            if printed.insert(key) {
                info!("{}", profile.summary());
                println!("{}", serde_json::to_string(profile)?);
            }
        }
    }

    let stats = resolver.stats();
    if stats.breaker_open {
        warn!(
            "⏸️ Upstream rate limited, breaker open for another {}ms",
            stats.breaker_remaining_ms
        );
    }

    Ok(())
}
