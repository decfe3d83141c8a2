//! Frame driver
//!
//! Owns the run, turns wall-clock timestamps into bounded simulation steps,
//! and publishes a HUD snapshot only when something visible changed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::best_time::BestTime;
use crate::consts::*;
use crate::input::{Action, InputSignal};
use crate::sim::{Level, SimulationState, Status, follow, step};

/// What the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    /// Seconds left, rounded to 0.1
    pub time: f32,
    pub coins: u32,
    pub total_coins: u32,
    pub status: Status,
}

impl HudSnapshot {
    pub fn from_state(state: &SimulationState) -> Self {
        Self {
            time: ((state.time_remaining * 10.0).round() / 10.0).max(0.0),
            coins: state.coins_collected,
            total_coins: state.total_coins() as u32,
            status: state.status,
        }
    }

    pub fn time_text(&self) -> String {
        format!("{:.1}", self.time)
    }
}

/// Remembers the last published snapshot and reports only changes
#[derive(Debug, Default)]
pub struct SnapshotPublisher {
    last: Option<HudSnapshot>,
}

impl SnapshotPublisher {
    /// Returns the snapshot if it differs from the last one published
    pub fn publish(&mut self, next: HudSnapshot) -> Option<HudSnapshot> {
        if self.last == Some(next) {
            return None;
        }
        self.last = Some(next);
        Some(next)
    }

    pub fn latest(&self) -> Option<HudSnapshot> {
        self.last
    }
}

/// Drives one run at a time
pub struct FrameDriver {
    level: Level,
    state: Option<SimulationState>,
    input: InputSignal,
    viewport: Vec2,
    last_timestamp: Option<f64>,
    publisher: SnapshotPublisher,
    best_time: BestTime,
}

impl FrameDriver {
    /// Start a run on the given level
    pub fn new(level: Level) -> Self {
        let state = SimulationState::new(&level);
        log::info!(
            "Run started: {} coins, {:.0}s on the clock",
            state.total_coins(),
            state.time_remaining
        );
        Self {
            level,
            state: Some(state),
            input: InputSignal::default(),
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            last_timestamp: None,
            publisher: SnapshotPublisher::default(),
            best_time: BestTime::new(),
        }
    }

    /// Advance one display frame. `timestamp_ms` is the host's monotonic
    /// frame clock. Returns the HUD snapshot when it changed.
    pub fn frame(&mut self, timestamp_ms: f64) -> Option<HudSnapshot> {
        let dt = self.delta_seconds(timestamp_ms);

        let Some(state) = self.state.as_mut() else {
            log::debug!("No simulation state, skipping frame");
            return None;
        };

        if state.status == Status::InProgress {
            step(state, dt, &mut self.input);
            follow(state, self.viewport.x, self.viewport.y);

            match state.status {
                Status::Won => {
                    let elapsed = state.elapsed();
                    log::info!(
                        "Goal reached in {:.2}s with {}/{} coins",
                        elapsed,
                        state.coins_collected,
                        state.total_coins()
                    );
                    if self.best_time.record(elapsed) {
                        log::info!("New best time: {}", self.best_time.display());
                    }
                }
                Status::Lost => {
                    if state.time_remaining <= 0.0 {
                        log::info!("Out of time");
                    } else {
                        log::info!("Fell out of the world");
                    }
                }
                Status::InProgress => {}
            }
        }

        self.publisher.publish(HudSnapshot::from_state(state))
    }

    /// Bounded step size for this frame. The first frame steps by zero.
    fn delta_seconds(&mut self, timestamp_ms: f64) -> f32 {
        let raw = match self.last_timestamp {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);
        raw.clamp(0.0, MAX_FRAME_DELTA)
    }

    /// Throw the current run away and start a fresh one
    pub fn reset(&mut self) {
        self.state = Some(SimulationState::new(&self.level));
        self.input.clear_edges();
        log::info!("Run reset");
    }

    /// Discard the run. Frames are skipped until the next `reset`.
    pub fn teardown(&mut self) {
        self.state = None;
        self.input.release_all();
        self.publisher = SnapshotPublisher::default();
        log::debug!("Frame driver torn down");
    }

    /// Route a key-down; reset bypasses the simulation
    pub fn key_down(&mut self, action: Action) {
        if self.input.key_down(action) {
            self.reset();
        }
    }

    pub fn key_up(&mut self, action: Action) {
        self.input.key_up(action);
    }

    /// Viewport size in world units, used by the camera
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut SimulationState> {
        self.state.as_mut()
    }

    pub fn input_mut(&mut self) -> &mut InputSignal {
        &mut self.input
    }

    /// Read the run while writing input, e.g. for an autopilot
    pub fn state_and_input(&mut self) -> (Option<&SimulationState>, &mut InputSignal) {
        (self.state.as_ref(), &mut self.input)
    }

    pub fn best_time(&self) -> BestTime {
        self.best_time
    }

    /// Last snapshot handed to the presentation layer
    pub fn latest_snapshot(&self) -> Option<HudSnapshot> {
        self.publisher.latest()
    }
}
