//! PinSet simulator: host entry point.
//!
//! Runs the pin state machine against the logging output adapter and the
//! host clock, the same way a board's main loop would drive it:
//!
//! ```text
//!   config (JSON file or defaults)
//!        │
//!        ▼
//!   PinSet<LogOutput, SystemClock> ──▶ update() every POLL_INTERVAL
//!        │
//!        └──▶ OUT | pin N ...   (one log line per change)
//! ```
//!
//! Usage: `pinset-sim [config.json]`

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};

use pinset::adapters::log_output::LogOutput;
use pinset::adapters::time::SystemClock;
use pinset::{Level, PinId, PinSet, PinSetConfig};

const DEFAULT_PINS: [PinId; 3] = [2, 4, 6];
const POLL_INTERVAL: Duration = Duration::from_millis(10);
const SIM_TIMEOUT: Duration = Duration::from_secs(30);

fn load_config() -> Result<PinSetConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            let config: PinSetConfig =
                serde_json::from_str(&raw).with_context(|| format!("parsing config {path}"))?;
            info!("Config loaded from {}", path);
            Ok(config)
        }
        None => {
            info!("No config given, using default pins {:?}", DEFAULT_PINS);
            Ok(PinSetConfig::new(&DEFAULT_PINS)?)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("PinSet simulator v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    let mut set = PinSet::new(&config, LogOutput::new(), SystemClock::new())?;
    let pins: Vec<PinId> = set.pins().collect();

    // ── Demo programme ────────────────────────────────────────
    if let Some(&pin) = pins.first() {
        set.set_digital_timed(
            pin,
            Level::High,
            2,
            Some(Box::new(|pin: PinId| info!("DONE | pin {} pulse finished", pin))),
        );
    }
    if let Some(&pin) = pins.get(1) {
        set.set_pwm_timed(
            pin,
            0,
            1,
            Some(Box::new(|pin: PinId| info!("DONE | pin {} pwm revert", pin))),
        );
    }
    if let Some(&pin) = pins.get(2) {
        set.set_fade_with_hold(
            pin,
            255,
            0,
            1,
            Some(Box::new(|pin: PinId| info!("DONE | pin {} fade finished", pin))),
        );
    }

    // ── Poll loop ─────────────────────────────────────────────
    let started = Instant::now();
    while set.pending_count() > 0 {
        if started.elapsed() > SIM_TIMEOUT {
            warn!("Simulation timed out with {} action(s) pending", set.pending_count());
            break;
        }
        set.update();
        std::thread::sleep(POLL_INTERVAL);
    }

    info!("STATUS | {}", set.status_json());
    for pin in &pins {
        info!("STATUS | pin {} {}", pin, set.pin_status_json(*pin));
    }
    info!(
        "Simulation finished after {} ms, {} write(s)",
        started.elapsed().as_millis(),
        set.output().write_count()
    );
    Ok(())
}
