//! Sewage Monitor host entry point
//!
//! Hexagonal layout: the controller is pure logic, everything that touches
//! the outside world sits behind a port.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  GpioActuators     LogEventSink   MonotonicClock   stdin       │
//! │  (ActuatorPort)    (EventSink)    (TimePort)       (Commands)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Controller (pure logic)                   │    │
//! │  │  Simulator · Faults · Control · Event log              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (delegate-driven)                                   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `sewage-monitor [config.json]`. Commands are read one per line from
//! stdin, e.g. `fault overflow`, `manual on`, `relay off`.
#![deny(unused_must_use)]

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use sewage_monitor::adapters::gpio::{GpioActuators, SimPin};
use sewage_monitor::adapters::log_sink::LogEventSink;
use sewage_monitor::adapters::time::MonotonicClock;
use sewage_monitor::app::commands::Command;
use sewage_monitor::app::service::Controller;
use sewage_monitor::config::SystemConfig;
use sewage_monitor::scheduler::Scheduler;

/// Main loop poll interval.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Sewage Monitor v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config (file or defaults) ──────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path)?,
        None => {
            info!("No config file given, using defaults");
            SystemConfig::default()
        }
    };

    // ── 3. Construct adapters + controller ────────────────────
    let mut sched = Scheduler::new(config.tick_period_ms);
    let mut controller = Controller::new(config, SmallRng::from_os_rng(), MonotonicClock::new())
        .context("controller start-up")?;
    let mut hw = GpioActuators::new(SimPin::new(), SimPin::new());
    let mut log_sink = LogEventSink::new();

    // Start-up state goes out before the first tick.
    controller.apply_actuators(&mut hw);
    controller.publish(&mut log_sink);

    // ── 4. Command reader ─────────────────────────────────────
    let (tx, rx) = mpsc::channel::<Command>();
    thread::Builder::new()
        .name("stdin-commands".into())
        .spawn(move || read_commands(tx))
        .context("spawning command reader")?;

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    let mut last = Instant::now();
    loop {
        let mut changed = false;
        while let Ok(cmd) = rx.try_recv() {
            info!("Command: {:?}", cmd);
            controller.handle_command(cmd);
            changed = true;
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last);
        last = now;
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let ticks = sched.advance(elapsed_ms, &mut controller);

        if changed || ticks > 0 {
            controller.apply_actuators(&mut hw);
            controller.publish(&mut log_sink);
        }

        thread::sleep(POLL_INTERVAL);
    }
}

fn load_config(path: &str) -> Result<SystemConfig> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading config '{}'", path))?;
    let config = SystemConfig::from_json(&text)
        .map_err(sewage_monitor::error::Error::from)
        .with_context(|| format!("loading config '{}'", path))?;
    info!("Config loaded from {}", path);
    Ok(config)
}

/// Forward parsed stdin lines to the control loop until stdin closes or the
/// loop goes away.
fn read_commands(tx: mpsc::Sender<Command>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!("stdin read failed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(cmd) => {
                if tx.send(cmd).is_err() {
                    break;
                }
            }
            Err(e) => warn!(
                "'{}': {} (try: fault none|overflow|gas, manual on|off, relay on|off)",
                line.trim(),
                e
            ),
        }
    }
    info!("Command reader finished");
}
