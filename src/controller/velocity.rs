//! Per-camera motion velocities, read by input smoothing outside this crate.

use bevy_reflect::prelude::*;

use crate::math;

/// Largest zoom velocity. A zoom step keeps at least 1% of the distance.
pub const MAX_ZOOM_VELOCITY: f32 = 0.99;

/// Translation, rotation and zoom velocities of a camera.
///
/// These are never changed by camera motion itself, only by
/// [`CameraRig::set_velocities`](crate::controller::component::CameraRig::set_velocities).
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocities {
    /// Translation velocity, in `[0, ∞)`.
    pub trans: f32,
    /// Rotation velocity, in `[0, ∞)`.
    pub rot: f32,
    /// Zoom velocity, in `[0, 0.99]`.
    pub zoom: f32,
}

impl Default for Velocities {
    fn default() -> Self {
        Self {
            trans: 1.0,
            rot: 1.0,
            zoom: 0.1,
        }
    }
}

impl Velocities {
    /// A copy with every velocity clamped into its valid range.
    pub fn clamped(&self) -> Self {
        Self {
            trans: math::clamp(self.trans, 0.0, f32::INFINITY),
            rot: math::clamp(self.rot, 0.0, f32::INFINITY),
            zoom: math::clamp(self.zoom, 0.0, MAX_ZOOM_VELOCITY),
        }
    }
}
