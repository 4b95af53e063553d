//! # homesim: home automation simulator
//!
//! Composition root that wires the controller, its timers and the
//! notification sinks together, then runs the demo scenario.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize `tracing`
//! - Construct the controller on the tokio scheduler
//! - Attach the event log, console display and tracing sinks
//! - Run the scenario, optionally wait for timers, dump the log
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;
mod demo;

use std::sync::Arc;

use homesim_adapter_console::{ConsoleDisplay, EventLog, TracingSink};
use homesim_app::controller::HomeController;
use homesim_app::scheduler::TokioScheduler;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    // Controller
    let scheduler = Arc::new(TokioScheduler::current()?);
    let mut home = HomeController::new(scheduler).with_timing(config.timing());

    // Sinks
    let log = Arc::new(if config.demo.echo_log {
        EventLog::with_echo(std::io::stdout())
    } else {
        EventLog::new()
    });
    home.add_listener(log.clone());
    if config.demo.display {
        home.add_listener(Arc::new(ConsoleDisplay::default()));
    }
    home.add_listener(Arc::new(TracingSink));

    let demo = demo::run(&mut home)?;
    tracing::debug!(
        motion = demo.motion_light().is_motion_detected(),
        "scenario finished"
    );

    if config.demo.wait_for_timers {
        demo.wait_for_timers().await;
    }

    println!("\n--- System logs ---");
    for entry in log.entries() {
        println!("{entry}");
    }

    Ok(())
}
