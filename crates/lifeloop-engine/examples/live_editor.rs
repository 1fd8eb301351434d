//! lifeloop live editor — a running simulation edited from another thread.
//!
//! Demonstrates:
//!   1. Building a Simulation with a ChannelViewPort
//!   2. Rendering published generations on a renderer thread
//!   3. Drawing gliders through the EditPort while the tick thread runs
//!   4. Pausing, stepping by hand, and resetting
//!
//! Run with:
//!   RUST_LOG=lifeloop_engine=debug cargo run --example live_editor

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lifeloop_core::{CellState, EdgeBehavior, Generation};
use lifeloop_engine::{ChannelViewPort, EditPort, SimConfig, Simulation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ─── Grid parameters ────────────────────────────────────────────

const WIDTH: u32 = 40;
const HEIGHT: u32 = 20;
const PERIOD: Duration = Duration::from_millis(100);

// ─── Drawing ────────────────────────────────────────────────────

const GLIDER: [(i32, i32); 5] = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

fn draw_glider(port: &dyn EditPort, ox: i32, oy: i32) -> Result<(), Box<dyn std::error::Error>> {
    for (x, y) in GLIDER {
        port.edit(ox + x, oy + y, CellState::Alive)?;
    }
    Ok(())
}

fn render(generation: &Generation) {
    println!(
        "generation {} (revision {}, {} alive)\n{}\n",
        generation.id(),
        generation.revision(),
        generation.alive_count(),
        generation.grid()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let (viewport, rx) = ChannelViewPort::bounded(8);
    let config = SimConfig {
        edge: EdgeBehavior::Wrap,
        ..SimConfig::new(WIDTH, HEIGHT, PERIOD)
    };
    let sim = Arc::new(Simulation::with_config(config, Arc::new(viewport))?);

    let renderer = thread::spawn(move || {
        let mut shown = 0;
        for generation in rx.iter() {
            // Print every fifth frame so the output stays readable.
            if generation.id().0 % 5 == 0 {
                render(&generation);
            }
            shown += 1;
        }
        shown
    });

    tracing::info!(width = WIDTH, height = HEIGHT, "starting live editor");
    sim.start()?;

    // An "input" thread drops a new glider every half second.
    let editor = {
        let sim = Arc::clone(&sim);
        thread::spawn(move || -> Result<(), String> {
            for i in 0..4 {
                draw_glider(sim.as_ref(), 4 + i * 8, 2 + (i % 2) * 8).map_err(|e| e.to_string())?;
                thread::sleep(Duration::from_millis(500));
            }
            Ok(())
        })
    };
    editor.join().map_err(|_| "editor thread panicked")??;
    thread::sleep(Duration::from_secs(1));

    // Pause, inspect, then step by hand.
    assert_eq!(sim.toggle_running()?, lifeloop_engine::RunState::Stopped);
    let metrics = sim.last_metrics();
    tracing::info!(
        generation = %metrics.generation,
        alive = metrics.alive,
        ticks = metrics.ticks_completed,
        overruns = metrics.overruns,
        "paused"
    );
    for _ in 0..3 {
        let generation = sim.step_once()?;
        tracing::info!(generation = %generation.id(), "stepped by hand");
    }

    sim.reset()?;
    render(&sim.snapshot());

    // Dropping the last simulation handle drops the viewport sender and
    // ends the renderer loop.
    drop(sim);
    let shown = renderer.join().map_err(|_| "renderer thread panicked")?;
    tracing::info!(frames = shown, "done");
    Ok(())
}
