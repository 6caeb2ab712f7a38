//! # Camera Implementation
//!
//! The actor's eye: a smoothed position that trails the actor's target position,
//! plus the yaw/pitch pair that defines where the actor is looking.
//!
//! ## Conventions
//! - Yaw (alpha) rotates around the vertical axis; yaw 0 looks along -Z and positive
//!   yaw turns toward +X
//! - Pitch (beta) tilts the forward vector; positive pitch looks up, `-π/2` looks
//!   straight down

use cgmath::*;
use std::f32::consts::FRAC_PI_2;

use crate::engine_state::rendering::Ray;

/// Represents the actor's first-person camera in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The smoothed eye position used for rendering and the view ray
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation in radians, within `[-π/2, π/2]`
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial eye position. Can be any type that converts to `Point3<f32>`.
    /// * `yaw` - Initial yaw. Can be any type that converts to `Rad<f32>`.
    /// * `pitch` - Initial pitch. Can be any type that converts to `Rad<f32>`.
    ///
    /// # Example
    /// ```rust
    /// use cgmath::{Deg, Point3};
    /// use voxel_sandbox::engine_state::actor_state::camera::Camera;
    ///
    /// let camera = Camera::new(Point3::new(0.0f32, 0.0, 5.0), Deg(0.0f32), Deg(0.0f32));
    /// let view = camera.get_view_vec();
    /// assert!((view.z + 1.0).abs() < 1e-6);
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

    /// Gets the camera's forward direction vector.
    ///
    /// # Returns
    /// A normalized 3D vector pointing where the camera looks
    pub fn get_view_vec(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(yaw_sin * pitch_cos, pitch_sin, -yaw_cos * pitch_cos).normalize()
    }

    /// The view ray from the eye through the crosshair.
    pub fn view_ray(&self) -> Ray {
        Ray::new(self.position, self.get_view_vec())
    }

    /// Applies yaw and pitch deltas, clamping pitch to straight up/down.
    ///
    /// # Arguments
    /// * `delta_yaw` - Change in yaw, radians
    /// * `delta_pitch` - Change in pitch, radians
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += Rad(delta_yaw);
        self.pitch = Rad((self.pitch.0 + delta_pitch).clamp(-FRAC_PI_2, FRAC_PI_2));
    }

    /// Moves the eye toward `target` by an exponential smoothing step.
    ///
    /// # Arguments
    /// * `target` - The actor's target position
    /// * `factor` - Smoothing coefficient times elapsed time; clamped to 1
    pub fn smooth_toward(&mut self, target: Point3<f32>, factor: f32) {
        let factor = factor.clamp(0.0, 1.0);
        self.position += (target - self.position) * factor;
    }
}
