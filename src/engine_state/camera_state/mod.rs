//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Camera position and orientation tracking
//! - Player look input processing
//! - Publishing the per-tick camera pose
//!
//! ## Core Components
//! - `Camera`: The published eye position and orientation
//! - `CameraController`: Latches pointer deltas and applies them to the player
//!
//! ## Key Features
//! - First-person mouse look with clamped pitch
//! - A pose that always equals the player's eye after the tick

use crate::engine_state::{player_state::PlayerState, PlayerAction};

pub mod camera;

/// Manages the camera pose and the look controller.
pub struct CameraState {
    /// The pose published at the end of the last tick
    pub camera: camera::Camera,
    /// Handles pointer input for looking around
    pub camera_controller: camera::CameraController,
}

impl CameraState {
    /// Creates a camera state looking out from the player's eye.
    ///
    /// # Arguments
    /// * `player` - The player the camera is attached to
    /// * `sensitivity` - Radians of rotation per unit of pointer movement
    pub fn new(player: &PlayerState, sensitivity: f32) -> Self {
        CameraState {
            camera: camera::Camera::from_player(player),
            camera_controller: camera::CameraController::new(sensitivity),
        }
    }

    /// Processes player input actions and updates the controller state.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        self.camera_controller.intake_actions(actions);
    }

    /// Applies any pending look rotation to the player.
    ///
    /// # Returns
    /// `true` if the orientation changed
    pub fn apply_look(&mut self, player: &mut PlayerState) -> bool {
        if self.camera_controller.has_updates() {
            self.camera_controller.apply_and_reset(player);
            return true;
        }
        false
    }

    /// Publishes the camera pose for the player's current state.
    pub fn update(&mut self, player: &PlayerState) -> camera::Camera {
        self.camera = camera::Camera::from_player(player);
        self.camera
    }
}
