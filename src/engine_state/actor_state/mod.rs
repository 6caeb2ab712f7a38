//! # Actor State Management
//!
//! The first-person actor: where it is, where it is going, and how it is shaped.
//!
//! ## Core Components
//! - `Actor`: target position, vertical velocity, intents, and the smoothed `Camera`
//! - `ActorExtents`: the asymmetric bounding box around the eye point
//! - `MotionSettings`: speeds and accelerations applied during integration
//! - `collision`: resolves the actor against nearby voxels after each integration step
//!
//! The target position is what input drives and what collision corrects. The camera
//! trails it and is only used to render and to aim; grid edits never read it.

use cgmath::{Point3, Rad};
use serde::{Deserialize, Serialize};

use camera::Camera;

pub mod camera;
pub mod collision;

/// Half-extents of the actor's bounding box around its eye point.
///
/// The eye sits near the top of the box: the box reaches `half_height_top` above it
/// and the larger `half_height_bottom` below it, down to the feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorExtents {
    /// Half-width along X and Z
    pub half_width: f32,
    /// Distance from the eye up to the top of the head
    pub half_height_top: f32,
    /// Distance from the eye down to the feet
    pub half_height_bottom: f32,
}

impl Default for ActorExtents {
    fn default() -> Self {
        ActorExtents {
            half_width: 0.4,
            half_height_top: 0.2,
            half_height_bottom: 1.6,
        }
    }
}

/// Movement intents, each one of -1, 0, or 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntent {
    /// 1 walks toward the view direction, -1 away from it
    pub forward: i8,
    /// 1 strafes right, -1 left
    pub sideward: i8,
    /// 1 rises, -1 sinks; only set while gravity is off
    pub upward: i8,
}

/// Speeds and accelerations used by `Actor::integrate`, all per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSettings {
    /// Horizontal walking speed
    pub move_speed: f32,
    /// Vertical speed from the upward intent
    pub fly_speed: f32,
    /// Downward acceleration while gravity is enabled
    pub gravity: f32,
    /// Vertical velocity given by a jump
    pub jump_speed: f32,
    /// Camera smoothing coefficient
    pub camera_smoothing: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        MotionSettings {
            move_speed: 7.5,
            fly_speed: 7.5,
            gravity: 37.5,
            jump_speed: 11.25,
            camera_smoothing: 7.425,
        }
    }
}

/// The player-controlled actor.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Position driven by input and corrected by collision
    pub position: Point3<f32>,
    /// Smoothed eye and view orientation
    pub camera: Camera,
    /// Vertical velocity, positive up
    pub vertical_velocity: f32,
    /// Current movement intents
    pub intent: MovementIntent,
    /// Bounding box shape
    pub extents: ActorExtents,
    /// Whether the last tick ended standing on a voxel
    pub grounded: bool,
}

impl Actor {
    /// Creates an actor at rest at `position`, looking along -Z.
    ///
    /// The camera starts at the target position.
    pub fn new(position: Point3<f32>, extents: ActorExtents) -> Self {
        Actor {
            position,
            camera: Camera::new(position, Rad(0.0f32), Rad(0.0f32)),
            vertical_velocity: 0.0,
            intent: MovementIntent::default(),
            extents,
            grounded: false,
        }
    }

    /// Snaps the camera onto the target position.
    pub fn reset_camera(&mut self) {
        self.camera.position = self.position;
    }

    /// Starts a jump if the actor is standing on a voxel.
    ///
    /// # Returns
    /// `true` if the jump happened.
    pub fn try_jump(&mut self, jump_speed: f32) -> bool {
        if self.grounded {
            self.vertical_velocity = jump_speed;
            true
        } else {
            false
        }
    }

    /// Advances the actor by `dt` seconds, before collision.
    ///
    /// Gravity (when enabled) is applied to the vertical velocity first, then the
    /// target position moves by the intents and the velocity, and finally the camera
    /// is smoothed toward the new target.
    ///
    /// # Arguments
    /// * `dt` - Elapsed time in seconds
    /// * `settings` - Speeds and accelerations
    /// * `gravity_enabled` - Whether gravity acts this tick
    pub fn integrate(&mut self, dt: f32, settings: &MotionSettings, gravity_enabled: bool) {
        if gravity_enabled {
            self.vertical_velocity -= settings.gravity * dt;
        }

        let mut step = settings.move_speed * dt;
        if self.intent.forward != 0 && self.intent.sideward != 0 {
            step /= std::f32::consts::SQRT_2;
        }

        let (yaw_sin, yaw_cos) = self.camera.yaw.0.sin_cos();
        let forward = self.intent.forward as f32;
        let sideward = self.intent.sideward as f32;

        self.position.x += step * (forward * yaw_sin + sideward * yaw_cos);
        self.position.z += step * (-forward * yaw_cos + sideward * yaw_sin);

        self.position.y += settings.fly_speed * dt * self.intent.upward as f32;
        self.position.y += self.vertical_velocity * dt;

        self.camera
            .smooth_toward(self.position, settings.camera_smoothing * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    fn actor() -> Actor {
        Actor::new(Point3::new(0.0, 0.0, 0.0), ActorExtents::default())
    }

    #[test]
    fn forward_follows_yaw() {
        let settings = MotionSettings::default();
        let mut a = actor();
        a.intent.forward = 1;
        a.integrate(0.1, &settings, false);
        assert!((a.position.z + 0.75).abs() < 1e-5);
        assert!(a.position.x.abs() < 1e-6);

        let mut b = actor();
        b.camera.yaw = Rad(std::f32::consts::FRAC_PI_2);
        b.intent.sideward = 1;
        b.integrate(0.1, &settings, false);
        assert!((b.position.z - 0.75).abs() < 1e-5);
    }

    #[test]
    fn diagonal_movement_is_not_faster() {
        let settings = MotionSettings::default();
        let mut a = actor();
        a.intent.forward = 1;
        a.intent.sideward = -1;
        a.integrate(0.1, &settings, false);
        let travelled = (a.position - Point3::new(0.0, 0.0, 0.0)).magnitude();
        assert!((travelled - 0.75).abs() < 1e-5);
    }

    #[test]
    fn gravity_only_when_enabled() {
        let settings = MotionSettings::default();
        let mut a = actor();
        a.integrate(0.1, &settings, false);
        assert_eq!(a.vertical_velocity, 0.0);
        assert_eq!(a.position.y, 0.0);

        a.integrate(0.1, &settings, true);
        assert!((a.vertical_velocity + 3.75).abs() < 1e-5);
        assert!(a.position.y < 0.0);
    }

    #[test]
    fn upward_intent_flies() {
        let settings = MotionSettings::default();
        let mut a = actor();
        a.intent.upward = -1;
        a.integrate(0.2, &settings, false);
        assert!((a.position.y + 1.5).abs() < 1e-5);
    }

    #[test]
    fn camera_trails_target() {
        let settings = MotionSettings::default();
        let mut a = actor();
        a.intent.forward = 1;
        a.integrate(0.02, &settings, false);
        let lag = a.position - a.camera.position;
        assert!(lag.magnitude() > 0.0);
        assert!(lag.dot(Vector3::new(0.0, 0.0, -1.0)) > 0.0);
    }

    #[test]
    fn jump_requires_ground() {
        let mut a = actor();
        assert!(!a.try_jump(5.0));
        assert_eq!(a.vertical_velocity, 0.0);
        a.grounded = true;
        assert!(a.try_jump(5.0));
        assert_eq!(a.vertical_velocity, 5.0);
    }
}
