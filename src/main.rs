//! Ewire - electric network inspector
//!
//! Loads a `.ewdata` save file, applies toggles and prints the settled state
//! of every component.
//!
//! # Usage
//!
//! ```bash
//! ewire bench.ewdata --toggle 0 --toggle 3 --save bench_after.ewdata
//! ```

use std::path::PathBuf;

use clap::Parser;
use ewire_core::{
    error::Result,
    inspect::render_table,
    network::{has_cycle, validate_network, ComponentId},
    persist::{self, Registry},
    CyclePolicy, EngineConfig, LoadPolicy, Network, DEFAULT_MAX_DEPTH, DEFAULT_MAX_VISITS,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Electric network inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the save file (.ewdata)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Toggle the source or switch with this component handle (repeatable)
    #[arg(short, long, value_name = "N")]
    toggle: Vec<usize>,

    /// Write the resulting network to this file
    #[arg(short, long, value_name = "OUT")]
    save: Option<PathBuf>,

    /// Accept wires that close a loop
    #[arg(long)]
    allow_cycles: bool,

    /// Skip records that cannot be placed instead of aborting the load
    #[arg(long)]
    skip_bad_records: bool,

    /// Component visits allowed in one propagation pass
    #[arg(long, default_value_t = DEFAULT_MAX_VISITS)]
    max_visits: usize,

    /// Recursion depth allowed in one propagation pass
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        let cycle_policy = if self.allow_cycles {
            CyclePolicy::Allow
        } else {
            CyclePolicy::Reject
        };
        let load_policy = if self.skip_bad_records {
            LoadPolicy::SkipRecord
        } else {
            LoadPolicy::Abort
        };
        EngineConfig::new()
            .with_max_visits(self.max_visits)
            .with_max_depth(self.max_depth)
            .with_cycle_policy(cycle_policy)
            .with_load_policy(load_policy)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Load and settle
    let text = persist::read_file(&args.file)?;
    let mut network = Network::with_config(args.engine_config());
    let report = persist::load_network(&mut network, &text, &Registry::default())?;
    for skipped in &report.skipped {
        warn!(error = %skipped, "record skipped");
    }
    info!(components = report.components, wires = report.wires, "loaded");
    validate_network(&network)?;
    if has_cycle(&network) {
        warn!("network contains a feedback loop");
    }

    for &id in &args.toggle {
        let on = network.toggle(ComponentId(id))?;
        info!(component = %ComponentId(id), on, "toggled");
    }

    print!("{}", render_table(&network));

    if let Some(out) = &args.save {
        let text = persist::save_network(&network)?;
        persist::write_file(out, &text)?;
        info!(path = %out.display(), "saved");
    }

    Ok(())
}
