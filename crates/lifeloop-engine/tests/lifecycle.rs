//! Integration test: run-state transitions, reset and load under load.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use lifeloop_core::{CellState, EdgeBehavior, GenerationId, ViewPort};
use lifeloop_engine::{ChannelViewPort, RunState, SimConfig, Simulation};
use lifeloop_test_utils::{patterns, wait_until, RecordingViewPort};

#[test]
fn reset_mid_run_always_blanks_the_grid() {
    let sim = Simulation::new(256, 256, Duration::from_millis(1)).unwrap();
    for round in 0..5 {
        sim.seed_random(0.35, round).unwrap();
        sim.start().unwrap();
        assert!(wait_until(Duration::from_secs(5), || {
            sim.snapshot().id() >= GenerationId(1)
        }));
        sim.reset().unwrap();

        let snap = sim.snapshot();
        assert_eq!(sim.run_state(), RunState::Stopped);
        assert_eq!(snap.grid().dimensions(), (256, 256));
        assert!(snap.grid().is_empty(), "round {round}");
        assert_eq!(snap.id(), GenerationId(0));
    }
}

fn recorded(width: u32, height: u32, period: Duration) -> (Simulation, Arc<RecordingViewPort>) {
    let viewport = Arc::new(RecordingViewPort::new());
    let sim = Simulation::with_config(
        SimConfig::new(width, height, period),
        Arc::clone(&viewport) as Arc<dyn ViewPort>,
    )
    .unwrap();
    (sim, viewport)
}

#[test]
fn reset_right_after_start_has_the_last_word() {
    // With a 1 ns period the tick thread is always about to begin a tick,
    // so every reset lands in the window between start and the first step.
    let (sim, viewport) = recorded(3, 3, Duration::from_nanos(1));
    for round in 0..500 {
        sim.start().unwrap();
        thread::yield_now();
        sim.reset().unwrap();

        let snap = sim.snapshot();
        assert_eq!(snap.id(), GenerationId(0), "round {round}");
        let last = viewport.latest().unwrap();
        assert!(Arc::ptr_eq(&last, &snap), "round {round}");
    }
}

#[test]
fn load_while_running_publishes_in_revision_order() {
    let (sim, viewport) = recorded(5, 5, Duration::from_nanos(1));
    sim.start().unwrap();
    for round in 0..200u64 {
        if round % 2 == 0 {
            sim.load(patterns::blinker()).unwrap();
        } else {
            sim.seed_random(0.4, round).unwrap();
        }
        assert!(sim.is_running(), "round {round}");
    }
    sim.pause().unwrap();

    let published = viewport.published();
    assert!(published.len() >= 200);
    for pair in published.windows(2) {
        assert!(
            pair[1].revision() > pair[0].revision(),
            "revision {} published after {}",
            pair[1].revision(),
            pair[0].revision()
        );
    }
    assert!(Arc::ptr_eq(published.last().unwrap(), &sim.snapshot()));
}

#[test]
fn pause_takes_effect_within_a_period() {
    let period = Duration::from_millis(50);
    let sim = Simulation::new(32, 32, period).unwrap();
    sim.seed_random(0.4, 3).unwrap();
    sim.start().unwrap();
    assert!(wait_until(Duration::from_secs(5), || {
        sim.snapshot().id() >= GenerationId(1)
    }));

    let start = Instant::now();
    sim.pause().unwrap();
    // Generous bound for slow CI runners; the loop wakes on disconnect.
    assert!(start.elapsed() < period * 20);

    let frozen = sim.snapshot().id();
    thread::sleep(period * 3);
    assert_eq!(sim.snapshot().id(), frozen);
}

#[test]
fn restart_continues_from_the_paused_generation() {
    let sim = Simulation::new(5, 5, Duration::from_millis(2)).unwrap();
    sim.load(patterns::blinker()).unwrap();
    sim.start().unwrap();
    assert!(wait_until(Duration::from_secs(5), || {
        sim.snapshot().id() >= GenerationId(2)
    }));
    sim.pause().unwrap();
    let paused = sim.snapshot().id();

    sim.start().unwrap();
    assert!(wait_until(Duration::from_secs(5), || {
        sim.snapshot().id() > paused
    }));
    sim.pause().unwrap();
    assert_eq!(sim.snapshot().alive_count(), 3);
    assert!(sim.history(sim.snapshot().id()).is_some());
}

#[test]
fn channel_viewport_feeds_a_renderer_thread() {
    let (viewport, rx) = ChannelViewPort::bounded(64);
    let config = SimConfig {
        edge: EdgeBehavior::Wrap,
        ..SimConfig::new(12, 12, Duration::from_millis(2))
    };
    let sim = Simulation::with_config(config, Arc::new(viewport)).unwrap();
    sim.load(patterns::glider(12, 12, 0, 0)).unwrap();

    let renderer = thread::spawn(move || {
        let mut ids = Vec::new();
        while let Ok(generation) = rx.recv_timeout(Duration::from_secs(5)) {
            assert_eq!(generation.alive_count(), 5);
            ids.push(generation.id());
            if ids.len() == 20 {
                break;
            }
        }
        ids
    });
    sim.start().unwrap();
    let ids = renderer.join().unwrap();
    sim.pause().unwrap();

    assert_eq!(ids.len(), 20);
    assert_eq!(ids[0], GenerationId(0));
    for pair in ids.windows(2) {
        assert!(pair[1] > pair[0]);
    }
}

#[test]
fn edits_while_stopped_feed_step_once() {
    let sim = Simulation::new(5, 5, Duration::from_millis(100)).unwrap();
    sim.edit(1, 2, CellState::Alive).unwrap();
    sim.edit(2, 2, CellState::Alive).unwrap();
    sim.edit(3, 2, CellState::Alive).unwrap();
    let next = sim.step_once().unwrap();
    assert_eq!(next.get(2, 1), Ok(CellState::Alive));
    assert_eq!(next.get(1, 2), Ok(CellState::Dead));
    let back = sim.step_once().unwrap();
    assert_eq!(*back.grid(), patterns::blinker());
}
