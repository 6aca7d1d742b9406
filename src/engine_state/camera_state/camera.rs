//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - The published camera pose (eye position and orientation)
//! - The yaw/pitch basis used for movement and picking
//! - The look controller that turns pointer deltas into orientation
//!
//! ## Conventions
//! - Y is up
//! - With yaw and pitch at zero the camera looks down negative Z
//! - Yaw rotates about Y first, then pitch about the rotated X axis

use cgmath::*;
use std::f32::consts::FRAC_PI_2;

use crate::engine_state::{player_state::PlayerState, PlayerAction};

/// Returns the unit view direction for a yaw/pitch pair.
///
/// # Arguments
/// * `yaw` - Rotation around the Y axis
/// * `pitch` - Rotation above (positive) or below the horizon
pub fn forward_vector(yaw: Rad<f32>, pitch: Rad<f32>) -> Vector3<f32> {
    let (yaw_sin, yaw_cos) = yaw.0.sin_cos();
    let (pitch_sin, pitch_cos) = pitch.0.sin_cos();
    Vector3::new(-yaw_sin * pitch_cos, pitch_sin, -yaw_cos * pitch_cos)
}

/// Returns the horizontal forward and right axes for a yaw angle.
///
/// These are the axes movement intent is applied along; pitch never tilts them.
pub fn horizontal_basis(yaw: Rad<f32>) -> (Vector3<f32>, Vector3<f32>) {
    let (yaw_sin, yaw_cos) = yaw.0.sin_cos();
    let forward = Vector3::new(-yaw_sin, 0.0, -yaw_cos);
    let right = Vector3::new(yaw_cos, 0.0, -yaw_sin);
    (forward, right)
}

/// The camera pose published after every tick.
///
/// The camera sits at the player's eye; it is a read-only view of the player
/// state for render and pick collaborators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation (around the camera's X axis) in radians
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space
    /// * `yaw` - Initial yaw. Can be any type that converts to `Rad<f32>`.
    /// * `pitch` - Initial pitch. Can be any type that converts to `Rad<f32>`.
    ///
    /// # Example
    /// ```rust
    /// use cgmath::{Deg, Point3};
    /// use voxel_sandbox::engine_state::camera_state::camera::Camera;
    ///
    /// let camera = Camera::new(Point3::new(0.0, 10.0, 0.0), Deg(0.0), Deg(0.0));
    /// assert!((camera.get_view_vec().z + 1.0).abs() < 1e-6);
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    /// Builds the camera pose for a player state.
    pub fn from_player(player: &PlayerState) -> Self {
        Self::new(player.position, player.yaw, player.pitch)
    }

    /// Gets the camera's forward direction vector.
    ///
    /// # Returns
    /// A normalized 3D vector representing the camera's forward direction
    pub fn get_view_vec(&self) -> Vector3<f32> {
        forward_vector(self.yaw, self.pitch)
    }

    /// Calculates the view matrix for this camera.
    ///
    /// Render collaborators use this to transform world coordinates into view space.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.get_view_vec(), Vector3::unit_y())
    }
}

/// Turns pointer movement into camera orientation.
///
/// Deltas are latched by `intake_actions` and applied by
/// `apply_and_reset`; orientation is not simulated, it changes immediately.
#[derive(Debug)]
pub struct CameraController {
    // Accumulated pointer movement since the last application
    rotate_horizontal: f32,
    rotate_vertical: f32,

    // Configuration
    sensitivity: f32,
}

impl CameraController {
    /// Creates a new controller.
    ///
    /// # Arguments
    /// * `sensitivity` - Radians of rotation per unit of pointer movement
    pub fn new(sensitivity: f32) -> Self {
        Self {
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            sensitivity,
        }
    }

    /// Latches the look delta carried by the player's actions.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        if let Some((delta_x, delta_y)) = actions.rotate_view {
            self.rotate_horizontal += delta_x as f32;
            self.rotate_vertical += delta_y as f32;
        }
    }

    /// Checks if there is pending rotation.
    pub fn has_updates(&self) -> bool {
        self.rotate_horizontal != 0.0 || self.rotate_vertical != 0.0
    }

    /// Applies the latched rotation to the player and clears it.
    ///
    /// Pointer deltas are subtracted from yaw and pitch. Pitch is clamped to
    /// straight up and straight down.
    pub fn apply_and_reset(&mut self, player: &mut PlayerState) {
        player.yaw -= Rad(self.rotate_horizontal * self.sensitivity);
        player.pitch -= Rad(self.rotate_vertical * self.sensitivity);

        if player.pitch < -Rad(FRAC_PI_2) {
            player.pitch = -Rad(FRAC_PI_2);
        } else if player.pitch > Rad(FRAC_PI_2) {
            player.pitch = Rad(FRAC_PI_2);
        }

        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;
    }
}
