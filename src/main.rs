//! commute-planner CLI
//!
//! Reads a home/work/day CSV and prints the shortest daily round trip for
//! every day, plus a per-day distance summary.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use commute_planner::cache::{CachedGeocoder, CachedRoutes};
use commute_planner::haversine::HaversineRoutes;
use commute_planner::input::load_day_groups;
use commute_planner::nominatim::{NominatimClient, NominatimConfig};
use commute_planner::optimizer::{DEFAULT_EXACT_SEARCH_LIMIT, FallbackPolicy, SearchOptions};
use commute_planner::osrm::{OsrmClient, OsrmConfig};
use commute_planner::rate_limit::{RateLimiter, Throttled};
use commute_planner::report::{DaySummary, write_summary_csv};
use commute_planner::{Planner, PlannerConfig, RouteProvider, Strategy};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Fallback {
    /// Greedy approximate tour
    NearestNeighbor,
    /// Report the day as not computable
    Reject,
}

impl From<Fallback> for FallbackPolicy {
    fn from(fallback: Fallback) -> Self {
        match fallback {
            Fallback::NearestNeighbor => FallbackPolicy::NearestNeighbor,
            Fallback::Reject => FallbackPolicy::Reject,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "Shortest daily home → work → home round trips from a CSV", long_about = None)]
struct Cli {
    /// CSV with home/work/day (or CASA/LAVORO/GIORNO) columns
    #[arg(value_name = "INPUT_FILE")]
    input: PathBuf,

    /// Write the per-day summary as CSV to this file
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<PathBuf>,

    /// Field delimiter (detected from the header when omitted)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Use straight-line distances instead of the OSRM road network
    #[arg(long)]
    offline: bool,

    /// Assumed speed for straight-line durations, km/h
    #[arg(long, default_value_t = 40.0)]
    speed_kmh: f64,

    /// OSRM server base URL
    #[arg(long, default_value_t = OsrmConfig::default().base_url)]
    osrm_url: String,

    /// OSRM routing profile
    #[arg(long, default_value_t = OsrmConfig::default().profile)]
    osrm_profile: String,

    /// Nominatim server base URL
    #[arg(long, default_value_t = NominatimConfig::default().base_url)]
    nominatim_url: String,

    /// Minimum delay between calls to external services, milliseconds
    #[arg(long, default_value_t = 1000)]
    min_delay_ms: u64,

    /// Largest number of stops solved by exhaustive search
    #[arg(long, default_value_t = DEFAULT_EXACT_SEARCH_LIMIT)]
    exact_limit: usize,

    /// What to do with days that have more stops than --exact-limit
    #[arg(long, value_enum, default_value = "nearest-neighbor")]
    fallback: Fallback,

    /// 2-opt passes applied to nearest-neighbor tours
    #[arg(long, default_value_t = 0)]
    two_opt_iterations: usize,

    /// Visit stops in input order instead of optimizing
    #[arg(long)]
    in_order: bool,

    /// Give up on a day after this many seconds
    #[arg(long)]
    day_timeout_secs: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "commute_planner=debug"
    } else {
        "commute_planner=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(io::stderr)
        .init();

    let delimiter = match cli.delimiter {
        Some(c) if c.is_ascii() => Some(c as u8),
        Some(c) => anyhow::bail!("delimiter must be a single ASCII character, got {c:?}"),
        None => None,
    };
    let groups = load_day_groups(&cli.input, delimiter)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    let limiter = RateLimiter::shared(Duration::from_millis(cli.min_delay_ms));

    let nominatim = NominatimClient::new(NominatimConfig {
        base_url: cli.nominatim_url.clone(),
        ..NominatimConfig::default()
    })
    .context("failed to build geocoding client")?;
    let geocoder = CachedGeocoder::new(Throttled::new(nominatim, limiter.clone()));

    let provider: Box<dyn RouteProvider> = if cli.offline {
        Box::new(HaversineRoutes::new(cli.speed_kmh))
    } else {
        let osrm = OsrmClient::new(OsrmConfig {
            base_url: cli.osrm_url.clone(),
            profile: cli.osrm_profile.clone(),
            ..OsrmConfig::default()
        })
        .context("failed to build routing client")?;
        Box::new(Throttled::new(osrm, limiter.clone()))
    };
    let routes = CachedRoutes::new(provider);

    let config = PlannerConfig {
        search: SearchOptions {
            exact_search_limit: cli.exact_limit,
            fallback: cli.fallback.into(),
            local_search_iterations: cli.two_opt_iterations,
        },
        strategy: if cli.in_order {
            Strategy::InOrder
        } else {
            Strategy::Optimize
        },
        day_timeout: cli.day_timeout_secs.map(Duration::from_secs),
    };

    let planner = Planner::new(&geocoder, &routes, config);
    let outcomes = planner.plan_days(&groups);

    for outcome in &outcomes {
        println!("== Day {}", outcome.day);
        match &outcome.result {
            Ok(report) => println!("{report}"),
            Err(err) => println!("Not computable: {err}"),
        }
        println!();
    }

    let summaries: Vec<DaySummary> = outcomes.iter().map(|outcome| outcome.summary()).collect();
    write_summary_csv(io::stdout().lock(), &summaries).context("failed to print summary")?;

    if let Some(path) = &cli.output {
        let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        write_summary_csv(BufWriter::new(file), &summaries)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    tracing::debug!(
        geocoded = geocoder.len(),
        routed = routes.len(),
        "lookup caches at exit"
    );

    Ok(())
}
