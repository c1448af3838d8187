//! Integration tests: every way a run can stop early.
//!
//! Each case checks the returned error, the terminal [`RunState`], and
//! that the grid is left at the last completed timestep.

use std::thread;
use std::time::Duration;

use grayscott_core::{Field, GridState, SinkError, Species, StateError, StepError};
use grayscott_engine::{
    from_fn, ConfigError, DivergencePolicy, RunState, Simulation, SimulationConfig,
};
use grayscott_test_utils::{FailingSink, RecordingSink};

fn quiet(grid: usize, timesteps: u64, out_freq: u64) -> SimulationConfig {
    SimulationConfig {
        h: 1.0,
        grid,
        perturb_count: 0,
        timesteps,
        out_freq,
        du: 0.0,
        dv: 0.0,
        feed: 0.0,
        kill: 0.0,
        ..SimulationConfig::default()
    }
}

fn poisoned(n: usize, cell: usize) -> GridState {
    let mut u = Field::filled(n, 1.0).unwrap();
    u.as_mut_slice()[cell] = f64::NAN;
    GridState::new(u, Field::zeros(n).unwrap()).unwrap()
}

// ── Construction ────────────────────────────────────────────────────

#[test]
fn oversized_grid_fails_at_construction() {
    let n = 1usize << 32;
    let result = std::panic::catch_unwind(|| Simulation::new(quiet(n, 2, 1)).map(|_| ()));
    match result {
        Ok(Err(ConfigError::State(StateError::TooLarge { n: side }))) => assert_eq!(side, n),
        Ok(other) => panic!("expected TooLarge, got {other:?}"),
        Err(_) => panic!("construction panicked on an oversized grid"),
    }
}

// ── Sink failure ────────────────────────────────────────────────────

#[test]
fn sink_failure_aborts_the_run() {
    let mut sim = Simulation::new(quiet(4, 10, 1)).unwrap();
    let mut sink = FailingSink::new(1);
    match sim.run(&mut sink, ()) {
        Err(StepError::SinkFailed { timestep, reason }) => {
            assert_eq!(timestep, 2);
            assert!(reason.reason.contains("deliberate"));
        }
        other => panic!("expected SinkFailed, got {other:?}"),
    }
    assert_eq!(sink.calls(), 2);
    assert_eq!(sim.run_state(), RunState::Aborted);
    assert!(sim.run_state().is_terminal());
}

#[test]
fn closure_sink_errors_propagate() {
    let mut sim = Simulation::new(quiet(4, 10, 3)).unwrap();
    let err = sim
        .run(from_fn(|_| Err(SinkError::new("encoder exited"))), ())
        .unwrap_err();
    assert_eq!(
        err,
        StepError::SinkFailed {
            timestep: 3,
            reason: SinkError::new("encoder exited"),
        }
    );
}

// ── Cancellation ────────────────────────────────────────────────────

#[test]
fn cancelled_before_start_runs_nothing() {
    let mut sim = Simulation::new(quiet(4, 10, 1)).unwrap();
    let before = sim.state().clone();
    sim.cancel_token().cancel();
    let mut sink = RecordingSink::new();
    assert_eq!(
        sim.run(&mut sink, ()),
        Err(StepError::Cancelled { timestep: 0 })
    );
    assert!(sink.snapshots.is_empty());
    assert_eq!(sim.state(), &before);
    assert_eq!(sim.run_state(), RunState::Aborted);
}

#[test]
fn cancel_from_sink_stops_at_next_timestep() {
    let mut sim = Simulation::new(quiet(4, 100, 2)).unwrap();
    let token = sim.cancel_token();
    let mut seen = Vec::new();
    let result = sim.run(
        from_fn(|s| {
            seen.push(s.timestep);
            token.cancel();
            Ok(())
        }),
        (),
    );
    assert_eq!(result, Err(StepError::Cancelled { timestep: 2 }));
    assert_eq!(seen, vec![2]);
    assert!(sim.run_state().is_terminal());
}

// ── Timeout ─────────────────────────────────────────────────────────

#[test]
fn timeout_stops_the_loop() {
    let mut cfg = quiet(4, 1_000, 1);
    cfg.timeout = Some(Duration::from_millis(1));
    let mut sim = Simulation::new(cfg).unwrap();
    let result = sim.run(
        from_fn(|_| {
            thread::sleep(Duration::from_millis(5));
            Ok(())
        }),
        (),
    );
    match result {
        Err(StepError::TimedOut { timestep, elapsed }) => {
            assert_eq!(timestep, 1);
            assert!(elapsed >= Duration::from_millis(1));
        }
        other => panic!("expected TimedOut, got {other:?}"),
    }
    assert_eq!(sim.run_state(), RunState::Aborted);
    assert!(sim.run_state().is_terminal());
}

// ── Divergence ──────────────────────────────────────────────────────

#[test]
fn divergence_abort_reports_species_and_timestep() {
    let mut cfg = quiet(4, 5, 2);
    cfg.divergence = DivergencePolicy::Abort;
    let mut sim = Simulation::from_state(cfg, poisoned(4, 5)).unwrap();
    let mut sink = RecordingSink::new();
    match sim.run(&mut sink, ()) {
        Err(StepError::NumericDivergence {
            species, timestep, ..
        }) => {
            assert_eq!(species, Species::U);
            assert_eq!(timestep, 2);
        }
        other => panic!("expected NumericDivergence, got {other:?}"),
    }
    // The diverged field was not handed to the sink.
    assert!(sink.snapshots.is_empty());
    assert_eq!(sim.run_state(), RunState::Aborted);
}

#[test]
fn divergence_warn_keeps_running() {
    let mut cfg = quiet(4, 5, 2);
    cfg.divergence = DivergencePolicy::Warn;
    let mut sim = Simulation::from_state(cfg, poisoned(4, 5)).unwrap();
    let mut sink = RecordingSink::new();
    let summary = sim.run(&mut sink, ()).unwrap();
    assert_eq!(summary.snapshots_emitted, 2);
    assert!(sim.state().u().first_non_finite().is_some());
    assert_eq!(sim.run_state(), RunState::Completed);
}

#[test]
fn divergence_ignore_never_scans() {
    let mut cfg = quiet(4, 5, 2);
    cfg.divergence = DivergencePolicy::Ignore;
    let mut sim = Simulation::from_state(cfg, poisoned(4, 0)).unwrap();
    assert!(sim.run(RecordingSink::new(), ()).is_ok());
    assert!(sim.run_state().is_terminal());
}
