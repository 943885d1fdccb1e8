//! Demo runner for the livegrid feed.
//!
//! Owns the pieces a table UI would own: builds a feed from rows/cols/freq,
//! starts the ticker, polls for fresh revisions, and prints each fresh
//! snapshot as one JSON line. `resize-demo` walks the reconfiguration path:
//! stop the ticker, rebuild the feed, start a fresh one.

use std::process;
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use tracing::info;

use livegrid::feed::{Feed, FeedConfig};
use livegrid::observer::{FeedAdapter, RevisionWatch};
use livegrid::prng::Prng;
use livegrid::stats::RateMeter;
use livegrid::ticker::{interval_for, Ticker};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut cfg = FeedConfig::default();
    let mut seed: Option<u64> = None;
    let mut duration_secs: f64 = 5.0;
    let mut command: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            "--rows" => cfg.rows = parse_value(&mut args, "--rows"),
            "--cols" => cfg.cols = parse_value(&mut args, "--cols"),
            "--freq" => cfg.freq_hz = parse_value(&mut args, "--freq"),
            "--seed" => seed = Some(parse_value(&mut args, "--seed")),
            "--duration" => duration_secs = parse_value(&mut args, "--duration"),
            "run" | "resize-demo" if command.is_none() => command = Some(arg),
            other => {
                eprintln!("Unknown argument: {other}");
                print_help();
                process::exit(2);
            }
        }
    }

    let seed = seed.unwrap_or_else(Prng::entropy_seed);
    let duration = Duration::try_from_secs_f64(duration_secs.max(0.0)).unwrap_or_default();

    match command.as_deref() {
        Some("resize-demo") => resize_demo(seed),
        _ => run(cfg, seed, duration),
    }
}

fn print_help() {
    println!("livegrid (bounded numeric grid with a randomized live-feed ticker)");
    println!("usage:");
    println!("  cargo run");
    println!("  cargo run -- run --rows 10 --cols 3 --freq 1 --duration 5");
    println!("  cargo run -- run --seed 42");
    println!("  cargo run -- resize-demo");
    println!("  cargo run -- --help");
}

fn parse_value<T: std::str::FromStr>(args: &mut impl Iterator<Item = String>, flag: &str) -> T {
    let Some(raw) = args.next() else {
        eprintln!("{flag} needs a value");
        process::exit(2);
    };
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("{flag}: invalid value {raw:?}");
            process::exit(2);
        }
    }
}

fn run(cfg: FeedConfig, seed: u64, duration: Duration) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        rows = cfg.rows(),
        cols = cfg.cols(),
        freq_hz = cfg.freq_hz,
        seed,
        "starting feed"
    );

    let feed = Arc::new(RwLock::new(Feed::from_config(&cfg, seed)));

    let Some(period) = interval_for(cfg.freq_hz) else {
        // Disabled ticker: the one frame of zeros is all there is to show.
        let snapshot = {
            let feed = feed.read().map_err(|_| "feed lock poisoned")?;
            FeedAdapter::new(&feed).snapshot()
        };
        println!("{}", serde_json::to_string(&snapshot)?);
        info!("ticker disabled; nothing further to do");
        return Ok(());
    };

    let ticker = Ticker::start(Arc::clone(&feed), cfg.freq_hz);

    // Poll faster than the tick rate; the freshness watch dedupes.
    let poll = (period / 4).clamp(Duration::from_millis(5), Duration::from_millis(200));
    let mut watch = RevisionWatch::new();
    let mut meter = RateMeter::default();

    let deadline = Instant::now() + duration;
    while Instant::now() < deadline {
        thread::sleep(poll);
        let fresh = {
            let feed = feed.read().map_err(|_| "feed lock poisoned")?;
            watch.poll(&feed)
        };
        if let Some(snapshot) = fresh {
            meter.record(Instant::now());
            println!("{}", serde_json::to_string(&snapshot)?);
        }
    }

    ticker.stop();
    info!(
        target_hz = cfg.freq_hz,
        measured_hz = meter.ticks_per_sec(),
        "feed stopped"
    );
    Ok(())
}

fn resize_demo(seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = FeedConfig::new(4, 3, 20.0);
    let feed = Arc::new(RwLock::new(Feed::from_config(&cfg, seed)));

    let ticker = Ticker::start(Arc::clone(&feed), cfg.freq_hz);
    thread::sleep(Duration::from_millis(500));
    ticker.stop();
    {
        let feed = feed.read().map_err(|_| "feed lock poisoned")?;
        println!("{}", serde_json::to_string(&FeedAdapter::new(&feed).snapshot())?);
    }

    // Shape changes reconstruct: stop the old ticker first so no stale tick
    // lands on the new grid, then rebuild and restart.
    info!("reconfiguring 4x3 -> 2x5");
    feed.write()
        .map_err(|_| "feed lock poisoned")?
        .reconfigure(2, 5);

    let ticker = Ticker::start(Arc::clone(&feed), cfg.freq_hz);
    thread::sleep(Duration::from_millis(500));
    ticker.stop();

    let feed = feed.read().map_err(|_| "feed lock poisoned")?;
    println!("{}", serde_json::to_string(&FeedAdapter::new(&feed).snapshot())?);
    Ok(())
}
