//! Parameter blocks for the setup operations of each movement model.
//!
//! Every field is optional or has a neutral default, so call sites can spell out only what they
//! need:
//!
//! ```
//! # use bevy_math::Vec3;
//! # use bevy_rig_cam::prelude::*;
//! let params = TargetParams {
//!     pivot: Some(Vec3::ZERO),
//!     distance_limits: Some(DistanceLimits::new(2.0, 10.0)),
//!     ..Default::default()
//! };
//! ```

use bevy_math::Vec3;

use crate::{
    error::{CameraError, LimitKind},
    limits::{
        DistanceLimits, HorizontalRotationLimits, HoverAngleLimits, PivotLimits,
        TranslationLimits, VerticalRotationLimits,
    },
    math,
};

/// Setup of a camera without interactive movement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticParams {
    /// Camera position. `None` keeps the current one.
    pub pos: Option<Vec3>,
    /// Point to look at. `None` keeps the current orientation.
    pub look_at: Option<Vec3>,
}

/// Setup of a free-look camera.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct EyeParams {
    /// Camera position. `None` keeps the current one.
    pub pos: Option<Vec3>,
    /// Point to look at. `None` keeps the current orientation.
    pub look_at: Option<Vec3>,
    /// Azimuth limits.
    pub horizontal_limits: Option<HorizontalRotationLimits>,
    /// Elevation limits.
    pub vertical_limits: Option<VerticalRotationLimits>,
}

/// Setup of a camera orbiting a pivot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetParams {
    /// Camera position. `None` keeps the current one.
    pub pos: Option<Vec3>,
    /// Pivot point. `None` puts it one unit ahead of the camera.
    pub pivot: Option<Vec3>,
    /// Azimuth limits.
    pub horizontal_limits: Option<HorizontalRotationLimits>,
    /// Elevation limits.
    pub vertical_limits: Option<VerticalRotationLimits>,
    /// Limits on the distance to the pivot.
    pub distance_limits: Option<DistanceLimits>,
    /// Limits on the pivot height.
    pub pivot_limits: Option<PivotLimits>,
    /// Allow panning the pivot.
    pub use_panning: bool,
}

impl TargetParams {
    pub(crate) fn validate(&self) -> Result<Self, CameraError> {
        Ok(Self {
            horizontal_limits: self
                .horizontal_limits
                .map(|limits| limits.validate())
                .transpose()?,
            vertical_limits: self
                .vertical_limits
                .map(|limits| limits.validate())
                .transpose()?,
            distance_limits: self
                .distance_limits
                .map(|limits| limits.validate())
                .transpose()?,
            pivot_limits: self
                .pivot_limits
                .map(|limits| limits.validate())
                .transpose()?,
            ..*self
        })
    }
}

impl EyeParams {
    pub(crate) fn validate(&self) -> Result<Self, CameraError> {
        Ok(Self {
            horizontal_limits: self
                .horizontal_limits
                .map(|limits| limits.validate())
                .transpose()?,
            vertical_limits: self
                .vertical_limits
                .map(|limits| limits.validate())
                .transpose()?,
            ..*self
        })
    }
}

/// Setup of a camera hovering over a ground plane.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct HoverParams {
    /// Camera position. `None` keeps the current one.
    pub pos: Option<Vec3>,
    /// Pivot point on the ground.
    pub pivot: Vec3,
    /// Limits on the distance to the pivot. `None` fixes the distance at the current one.
    pub distance_limits: Option<DistanceLimits>,
    /// Elevation limits. `None` fixes the elevation at the current one.
    pub angle_limits: Option<HoverAngleLimits>,
    /// Limits on the pivot's X coordinate.
    pub horizontal_trans_limits: Option<TranslationLimits>,
    /// Limits on the pivot's Y coordinate.
    pub vertical_trans_limits: Option<TranslationLimits>,
    /// Allow rotating around the pivot.
    pub enable_horiz_rot: bool,
}

impl HoverParams {
    pub(crate) fn validate(&self) -> Result<Self, CameraError> {
        Ok(Self {
            distance_limits: self
                .distance_limits
                .map(|limits| limits.validate())
                .transpose()?,
            angle_limits: self
                .angle_limits
                .map(|limits| limits.validate())
                .transpose()?,
            horizontal_trans_limits: self
                .horizontal_trans_limits
                .map(|limits| limits.validate(LimitKind::HorizontalTranslation))
                .transpose()?,
            vertical_trans_limits: self
                .vertical_trans_limits
                .map(|limits| limits.validate(LimitKind::VerticalTranslation))
                .transpose()?,
            ..*self
        })
    }
}

/// Setup of a hover camera whose limits are a window around its initial placement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct HoverRelParams {
    /// Camera position. `None` keeps the current one.
    pub pos: Option<Vec3>,
    /// Pivot point on the ground.
    pub pivot: Vec3,
    /// Width of the distance window. Negative values count as 0.
    pub dist_interval: f32,
    /// Width of the elevation window, in radians. Negative values count as 0.
    pub angle_interval: f32,
    /// Where the initial placement sits in the windows: 0 is fully zoomed in, 1 fully zoomed
    /// out. Clamped to `[0, 1]`.
    pub t: f32,
}

impl Default for HoverRelParams {
    fn default() -> Self {
        Self {
            pos: None,
            pivot: Vec3::ZERO,
            dist_interval: 0.0,
            angle_interval: 0.0,
            t: 0.5,
        }
    }
}

impl HoverRelParams {
    /// Distance and elevation limits around the given placement.
    pub fn windows(&self, distance: f32, angle: f32) -> (DistanceLimits, HoverAngleLimits) {
        let dist_interval = math::clamp(self.dist_interval, 0.0, f32::INFINITY);
        let angle_interval = math::clamp(self.angle_interval, 0.0, f32::INFINITY);
        let t = math::clamp(self.t, 0.0, 1.0);

        let distance_limits = DistanceLimits {
            min: (distance - t * dist_interval).max(0.0),
            max: distance + (1.0 - t) * dist_interval,
        };
        let half_pi = std::f32::consts::FRAC_PI_2;
        let angle_limits = HoverAngleLimits {
            down: math::clamp(angle + t * angle_interval, -half_pi, 0.0),
            up: math::clamp(angle - (1.0 - t) * angle_interval, -half_pi, 0.0),
        };
        (distance_limits, angle_limits)
    }
}
