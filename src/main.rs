//! Air Quality Collection Service - Main Entry Point
//!
//! A collector that periodically:
//! 1. Fetches air quality data from the WAQI feed (or synthesizes
//!    placeholder data when no API token is configured)
//! 2. Normalizes and validates the measurement
//! 3. Stores it in PostgreSQL with retried, verified writes
//!
//! Usage:
//!   cargo run --release -- --mode once     # run the pipeline a single time
//!   cargo run --release -- --mode monitor  # run forever on the interval
//!   cargo run --release -- --mode test     # 3 diagnostic rounds (default)
//!
//! Flags override environment configuration:
//!   --city NAME        city to monitor
//!   --api-key TOKEN    WAQI API token
//!   --interval HOURS   hours between collections (monitor mode)
//!
//! Environment:
//!   DATABASE_URL - PostgreSQL connection string
//!   AQ_CITY, AQ_API_KEY, AQ_INTERVAL_HOURS, AQ_RETRY_ATTEMPTS,
//!   AQ_RETRY_BACKOFF_SECS

use aqmon_service::config::CollectorConfig;
use aqmon_service::daemon::{Collector, Daemon, DaemonConfig};
use aqmon_service::db;
use std::env;
use std::process;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Once,
    Monitor,
    Test,
}

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} [--mode once|monitor|test] [--city NAME] [--api-key TOKEN] [--interval HOURS]",
        program
    );
    process::exit(1);
}

/// The value following a flag, or usage-and-exit when it is missing.
fn flag_value(args: &[String], index: usize) -> &str {
    match args.get(index + 1) {
        Some(value) => value,
        None => {
            eprintln!("Error: {} requires a value", args[index]);
            usage(&args[0]);
        }
    }
}

fn main() {
    println!("🌫  Air Quality Collection Service");
    println!("==================================\n");

    // Environment first, flags on top (flags win).
    let mut config = match CollectorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}\n", e);
            process::exit(1);
        }
    };

    let args: Vec<String> = env::args().collect();
    let mut mode = Mode::Test;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                mode = match flag_value(&args, i) {
                    "once" => Mode::Once,
                    "monitor" => Mode::Monitor,
                    "test" => Mode::Test,
                    other => {
                        eprintln!("Unknown mode: {}", other);
                        usage(&args[0]);
                    }
                };
                i += 2;
            }
            "--city" => {
                config.city = flag_value(&args, i).to_string();
                i += 2;
            }
            "--api-key" => {
                config.api_token = Some(flag_value(&args, i).to_string());
                i += 2;
            }
            "--interval" => {
                config.interval_hours = match flag_value(&args, i).parse::<u64>() {
                    Ok(hours) if hours > 0 => hours,
                    _ => {
                        eprintln!("Error: --interval must be a positive number of hours");
                        usage(&args[0]);
                    }
                };
                i += 2;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                usage(&args[0]);
            }
        }
    }

    if config.synthetic_mode() {
        println!("⚠  No API token configured - running in synthetic mode\n");
    }

    // An unusable storage location is the one unrecoverable startup failure.
    println!("📊 Preparing storage...");
    let database_url = match db::database_url() {
        Ok(url) => url,
        Err(e) => {
            eprintln!("\n❌ {}\n", e);
            process::exit(1);
        }
    };
    if let Err(e) = db::connect_and_prepare() {
        eprintln!("\n❌ {}\n", e);
        process::exit(1);
    }
    println!("✓ Storage ready\n");

    let mut collector = Collector::new(config.clone(), database_url);

    match mode {
        Mode::Once => {
            println!("▶ Running one collection for {}\n", config.city);
            match collector.collect_once() {
                Ok(_) => println!("\nCollection succeeded"),
                Err(e) => println!("\nCollection failed: {}", e),
            }
            println!();
            collector.print_stats();
        }

        Mode::Test => {
            // Diagnostic mode: a few quick rounds to validate error handling
            // without waiting out real intervals.
            println!("▶ Test mode: 3 collection rounds for {}\n", config.city);
            for round in 1..=3 {
                println!("--- Round {} ---", round);
                match collector.collect_once() {
                    Ok(_) => println!("Result: success"),
                    Err(e) => println!("Result: failure ({})", e),
                }
                collector.print_stats();
                println!();
                if round < 3 {
                    thread::sleep(Duration::from_secs(2));
                }
            }
        }

        Mode::Monitor => {
            println!("▶ Monitoring {} every {} hour(s)", config.city, config.interval_hours);
            println!("   Press Ctrl+C to stop\n");
            let daemon_config = DaemonConfig {
                interval_hours: config.interval_hours,
                ..DaemonConfig::default()
            };
            let mut daemon = Daemon::new(collector, daemon_config);
            daemon.run();
        }
    }
}
