//! VayuIO - environmental sampling and broadcast daemon
//!
//! Reads a temperature/humidity sensor on a fixed cadence from a dedicated
//! thread and fans each reading out to the process log and to every client
//! connected to the TCP broadcast port (one UTF-8 text line per reading).

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use vayu_io::config::Config;
use vayu_io::devices::create_sensor;
use vayu_io::error::{Error, Result};
use vayu_io::observers::{BroadcastSink, LogSink, ObserverRegistry};
use vayu_io::sampler::Sampler;
use vayu_io::streaming::TcpBroadcaster;

/// Parse config path from command line arguments.
///
/// Supports:
/// - `vayu-io <path>` (positional)
/// - `vayu-io --config <path>` (flag-based)
/// - `vayu-io -c <path>` (short flag)
///
/// Defaults to `/etc/vayu-io.toml` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    "/etc/vayu-io.toml".to_string()
}

fn main() -> Result<()> {
    let config_path = parse_config_path();
    let config = Config::load(&config_path)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.logging.level),
    )
    .init();

    log::info!("VayuIO v{} starting...", env!("CARGO_PKG_VERSION"));
    log::info!("Using config: {}", config_path);
    log::info!(
        "Sensor: {} (sampling every {}s)",
        config.sensor.kind,
        config.sampling.interval_secs
    );

    // The sensor is constructed once and handed to the sampler; nothing else
    // can reach the hardware channel.
    let sensor = create_sensor(&config)?;

    // Network join: bind the broadcast listener, retrying for slow interfaces
    let mut broadcaster = TcpBroadcaster::bind_with_retry(
        &config.network.bind_address,
        config.network.bind_retry_max,
        config.network.bind_retry_delay(),
    )?;
    log::info!(
        "Broadcasting readings at tcp://{}",
        broadcaster.local_addr()?
    );

    // Registry population happens entirely before the sampler starts; a full
    // registry is a setup error, not a silent drop.
    let mut registry = ObserverRegistry::new();
    registry.register(Box::new(LogSink::new()))?;
    registry.register(Box::new(BroadcastSink::new(broadcaster.handle())))?;

    // Shutdown flag shared by both threads
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    // Background thread: periodic sampling and fan-out
    let sampler = Sampler::new(sensor, registry, config.sampling.interval());
    let sampler_handle = sampler.spawn(Arc::clone(&running))?;

    log::info!("VayuIO running. Press Ctrl-C to stop.");

    // Foreground thread: service the broadcaster until shutdown
    broadcaster.service_loop(&running);

    log::info!("Shutting down...");
    if sampler_handle.join().is_err() {
        log::error!("Sampler thread panicked");
    }
    log::info!("VayuIO stopped");
    Ok(())
}
