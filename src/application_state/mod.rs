//! # Application State Management
//!
//! This module handles the application's state management, including:
//! - Input latching between ticks
//! - Driving the engine one tick at a time
//! - Granting pointer capture when the engine asks for it
//! - Scripted input sources for running without a window
//!
//! A windowed front end feeds `InputManager` from winit events and owns its own
//! render sink. `HeadlessApplication` does the same job with an `InputScript`
//! in place of the window and `HeadlessVisuals` in place of a renderer.

pub mod input_manager;
pub mod input_state;

use cgmath::Point3;
use winit::{event::MouseButton, keyboard::KeyCode};

use input_manager::InputManager;

use crate::{
    config::SandboxConfig,
    engine_state::{
        interaction::handler::InteractionOutcome, rendering::HeadlessVisuals, EngineState,
    },
};

/// A source of input events for a session without a window.
pub trait InputScript {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Feeds the input manager for the tick about to run.
    ///
    /// # Arguments
    /// * `tick` - Index of the upcoming tick, starting at 0
    /// * `input` - The manager to feed events into
    fn drive(&mut self, tick: u64, input: &mut InputManager);
}

/// Does nothing; the player just falls and settles.
#[derive(Debug, Default)]
pub struct IdleScript;

impl InputScript for IdleScript {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn drive(&mut self, _tick: u64, _input: &mut InputManager) {}
}

/// Walks forward, turning now and then and hopping every second.
#[derive(Debug, Default)]
pub struct WalkScript;

impl InputScript for WalkScript {
    fn name(&self) -> &'static str {
        "walk"
    }

    fn drive(&mut self, tick: u64, input: &mut InputManager) {
        match tick {
            // The first click only captures the pointer
            0 => {
                input.intake_mouse_button(MouseButton::Left, true);
                input.intake_mouse_button(MouseButton::Left, false);
                input.intake_key(KeyCode::KeyW, true);
            }
            t if t % 60 == 30 => input.intake_key(KeyCode::Space, true),
            t if t % 60 == 32 => input.intake_key(KeyCode::Space, false),
            t if t % 90 == 45 => input.intake_mouse_motion((120.0, 0.0)),
            _ => {}
        }
    }
}

/// Lands, looks at the ground and edits it: places, switches block, places, removes.
#[derive(Debug, Default)]
pub struct BuildScript;

impl BuildScript {
    fn click(input: &mut InputManager, button: MouseButton) {
        input.intake_mouse_button(button, true);
        input.intake_mouse_button(button, false);
    }
}

impl InputScript for BuildScript {
    fn name(&self) -> &'static str {
        "build"
    }

    fn drive(&mut self, tick: u64, input: &mut InputManager) {
        match tick {
            0 => Self::click(input, MouseButton::Left),
            // Look steeply down
            1 => input.intake_mouse_motion((0.0, 600.0)),
            120 => Self::click(input, MouseButton::Right),
            130 => input.intake_key(KeyCode::Digit2, true),
            131 => input.intake_key(KeyCode::Digit2, false),
            140 => Self::click(input, MouseButton::Right),
            160 => Self::click(input, MouseButton::Left),
            _ => {}
        }
    }
}

/// Interaction outcomes counted over a headless run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub placed: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub out_of_reach: usize,
    pub missed: usize,
    pub info_pages: usize,
}

impl OutcomeCounts {
    fn record(&mut self, outcome: &InteractionOutcome) {
        match outcome {
            InteractionOutcome::Placed { .. } => self.placed += 1,
            InteractionOutcome::Removed { .. } => self.removed += 1,
            InteractionOutcome::Unchanged { .. } => self.unchanged += 1,
            InteractionOutcome::OutOfReach { .. } => self.out_of_reach += 1,
            InteractionOutcome::Missed => self.missed += 1,
            InteractionOutcome::OpenInfoPage { url } => {
                log::info!("Would open {}", url);
                self.info_pages += 1;
            }
        }
    }
}

/// Totals gathered over a headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub outcomes: OutcomeCounts,
    pub final_position: Point3<f32>,
    pub block_count: usize,
    pub live_visuals: usize,
    pub elapsed: web_time::Duration,
}

/// Runs a sandbox session without a window.
pub struct HeadlessApplication {
    /// The core game engine state and logic
    pub engine_state: EngineState<HeadlessVisuals>,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    script: Box<dyn InputScript>,

    /// Timestamp of the last frame for delta time calculations
    last_wait_time: web_time::Instant,
}

impl HeadlessApplication {
    /// Builds the world from `config` and prepares to run `script`.
    pub fn new(config: &SandboxConfig, script: Box<dyn InputScript>) -> Self {
        Self {
            engine_state: EngineState::new(config, HeadlessVisuals::new()),
            input_manager: InputManager::new(),
            script,
            last_wait_time: web_time::Instant::now(),
        }
    }

    /// Runs `ticks` frames and returns what happened.
    pub fn run(&mut self, ticks: u64) -> RunSummary {
        log::info!("Running {} ticks with the {} script", ticks, self.script.name());
        let started = web_time::Instant::now();
        let mut outcomes = OutcomeCounts::default();

        for _ in 0..ticks {
            self.run_frame(&mut outcomes);
        }

        RunSummary {
            ticks,
            outcomes,
            final_position: self.engine_state.player.position,
            block_count: self.engine_state.store.len(),
            live_visuals: self.engine_state.render_sync().sink().live_count(),
            elapsed: started.elapsed(),
        }
    }

    /// Feeds the script, ticks the engine once and reacts to the report.
    fn run_frame(&mut self, outcomes: &mut OutcomeCounts) {
        let now = web_time::Instant::now();
        let frame_time = now - self.last_wait_time;
        self.last_wait_time = now;

        let tick = self.engine_state.tick_count();
        self.script.drive(tick, &mut self.input_manager);

        let processed_input = self.input_manager.get_and_reset_processed_input();
        let report = self.engine_state.tick(processed_input);

        if report.capture_requested {
            self.input_manager.set_pointer_captured(true);
        }

        for outcome in &report.outcomes {
            outcomes.record(outcome);
        }

        log::trace!("Tick {} took {:?}", tick, frame_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainMethod;

    fn flat_config() -> SandboxConfig {
        let mut config = SandboxConfig::default();
        config.terrain.method = TerrainMethod::Flat;
        config.terrain.size = 8;
        config
    }

    #[test]
    fn test_idle_run_settles_on_terrain() {
        let mut app = HeadlessApplication::new(&flat_config(), Box::new(IdleScript));
        let summary = app.run(200);
        assert_eq!(summary.ticks, 200);
        assert!(app.engine_state.player.on_ground);
        assert!((summary.final_position.y - 4.8).abs() < 1e-5);
        assert_eq!(summary.live_visuals, summary.block_count);
    }

    #[test]
    fn test_build_script_edits_the_ground() {
        let config = flat_config();
        let mut app = HeadlessApplication::new(&config, Box::new(BuildScript));
        let before = app.engine_state.store.len();
        let summary = app.run(200);

        assert!(app.input_manager.is_pointer_captured());
        assert_eq!(summary.outcomes.placed, 2);
        assert_eq!(summary.outcomes.removed, 1);
        assert_eq!(summary.block_count, before + 1);
        assert_eq!(summary.live_visuals, summary.block_count);
    }
}
