//! Player physics - movement intent, gravity, jumping, collision and ground resolution

use cgmath::Point3;

use super::PlayerState;
use crate::config::PhysicsConfig;
use crate::engine_state::{
    camera_state::camera::horizontal_basis, voxels::queries::WorldQuery, PlayerAction,
};

/// What happened during one controller step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// A jump impulse was applied
    pub jumped: bool,
    /// The X move was rejected by a collision
    pub blocked_x: bool,
    /// The Z move was rejected by a collision
    pub blocked_z: bool,
    /// The player came to rest this step after being airborne
    pub landed: bool,
}

/// Fixed-step player physics, run once per frame.
///
/// Velocities are in world units per step; there is no delta time. Collision is a
/// discrete post-hoc correction, so a fall faster than one cell per step can pass
/// through a thin floor unless `max_fall_speed` is set.
#[derive(Debug, Clone)]
pub struct PlayerController {
    config: PhysicsConfig,
}

impl PlayerController {
    /// Creates a controller with the given constants.
    pub fn new(config: PhysicsConfig) -> Self {
        PlayerController { config }
    }

    /// The constants this controller runs with.
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// The Y the eye settles at above the column under `(x, z)`.
    pub fn resting_height(&self, world: &WorldQuery, x: f32, z: f32) -> f32 {
        world.ground_height(x, z) as f32 + self.config.eye_height
    }

    /// Advances the player by one step.
    ///
    /// Orientation must already be up to date: movement intent is applied along the
    /// player's current yaw.
    pub fn step(
        &self,
        player: &mut PlayerState,
        actions: &PlayerAction,
        world: &WorldQuery,
    ) -> StepReport {
        let config = &self.config;
        let mut report = StepReport::default();

        // Horizontal intent. Keys add up, so diagonals are faster than axes.
        let (forward, right) = horizontal_basis(player.yaw);
        if actions.move_forward {
            player.velocity += forward * config.move_speed;
        }
        if actions.move_backward {
            player.velocity -= forward * config.move_speed;
        }
        if actions.move_left {
            player.velocity -= right * config.move_speed;
        }
        if actions.move_right {
            player.velocity += right * config.move_speed;
        }

        // Jump, only from the ground
        if actions.jump && player.on_ground {
            player.velocity.y = config.jump_impulse;
            player.on_ground = false;
            report.jumped = true;
            log::debug!("Player jumped at {:?}", player.position);
        }

        // Gravity
        player.velocity.y -= config.gravity;
        if let Some(cap) = config.max_fall_speed {
            player.velocity.y = player.velocity.y.max(-cap);
        }

        // Horizontal movement, X then Z, tested against the four-point footprint at the current eye height
        let new_x = player.position.x + player.velocity.x;
        let candidate = Point3::new(new_x, player.position.y, player.position.z);
        if world.collides_at(candidate, config.player_radius) {
            player.velocity.x = 0.0;
            report.blocked_x = true;
        } else {
            player.position.x = new_x;
        }

        let new_z = player.position.z + player.velocity.z;
        let candidate = Point3::new(player.position.x, player.position.y, new_z);
        if world.collides_at(candidate, config.player_radius) {
            player.velocity.z = 0.0;
            report.blocked_z = true;
        } else {
            player.position.z = new_z;
        }

        // Vertical movement, then snap onto the resting surface
        let was_on_ground = player.on_ground;
        player.position.y += player.velocity.y;
        let rest = self.resting_height(world, player.position.x, player.position.z);
        if player.position.y <= rest {
            player.position.y = rest;
            player.velocity.y = 0.0;
            player.on_ground = true;
            if !was_on_ground {
                report.landed = true;
                log::debug!("Player landed at {:?}", player.position);
            }
        } else {
            player.on_ground = false;
        }

        // Drag, applied in the air too
        player.velocity.x *= config.damping;
        player.velocity.z *= config.damping;

        log::trace!(
            "Player step: pos {:?} vel {:?} grounded {}",
            player.position,
            player.velocity,
            player.on_ground
        );

        report
    }
}
