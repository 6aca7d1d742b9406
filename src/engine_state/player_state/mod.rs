//! # Player State
//!
//! The player's kinematic state and the controller that advances it one fixed
//! step at a time.
//!
//! The state is owned by the game session, never by the voxel store. The
//! controller only reads the store, through `WorldQuery`.

use cgmath::{Point3, Rad, Vector3};

pub mod controller;

/// Position, velocity and orientation of the player.
///
/// `position` is the eye (and camera) position; the player's feet rest
/// `eye_height` below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    /// Eye position in world space
    pub position: Point3<f32>,
    /// Velocity in world units per step
    pub velocity: Vector3<f32>,
    /// Horizontal look angle
    pub yaw: Rad<f32>,
    /// Vertical look angle, within `[-π/2, π/2]`
    pub pitch: Rad<f32>,
    /// Whether the last step ended resting on a surface
    pub on_ground: bool,
}

impl PlayerState {
    /// Creates a motionless player at `position`, looking down negative Z.
    pub fn at(position: Point3<f32>) -> Self {
        PlayerState {
            position,
            velocity: Vector3::new(0.0, 0.0, 0.0),
            yaw: Rad(0.0),
            pitch: Rad(0.0),
            on_ground: false,
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::at(Point3::new(0.0, 10.0, 0.0))
    }
}
