//! Limit objects that constrain camera motion, and the arcs used to clamp angles.
//!
//! Limit values are plain input data. `validate` never touches the value it is called on: it
//! returns a checked, normalized copy, or [`CameraError::InvalidLimits`].

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy_reflect::Reflect;

use crate::{
    error::{CameraError, LimitKind},
    math,
};

fn check_interval(min: f32, max: f32, kind: LimitKind) -> Result<(), CameraError> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(CameraError::InvalidLimits(kind))
    }
}

/// Bounds on the distance between a camera and its pivot.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceLimits {
    /// Closest allowed distance.
    pub min: f32,
    /// Farthest allowed distance.
    pub max: f32,
}

impl DistanceLimits {
    /// Distance limits over `[min, max]`.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Check that `min <= max`. Both bounds of the returned copy are floored at 0.
    pub fn validate(&self) -> Result<Self, CameraError> {
        check_interval(self.min, self.max, LimitKind::Distance)?;
        Ok(Self {
            min: self.min.max(0.0),
            max: self.max.max(0.0),
        })
    }

    /// Project `distance` into the interval.
    pub fn clamp(&self, distance: f32) -> f32 {
        math::clamp(distance, self.min, self.max)
    }
}

/// Bounds on the world height (Z) of a target camera's pivot.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct PivotLimits {
    /// Lowest allowed pivot height.
    pub min_z: f32,
    /// Highest allowed pivot height.
    pub max_z: f32,
}

impl PivotLimits {
    /// Pivot limits over `[min_z, max_z]`.
    pub fn new(min_z: f32, max_z: f32) -> Self {
        Self { min_z, max_z }
    }

    /// Check that `min_z <= max_z`.
    pub fn validate(&self) -> Result<Self, CameraError> {
        check_interval(self.min_z, self.max_z, LimitKind::Pivot)?;
        Ok(*self)
    }

    /// Project a height into the interval.
    pub fn clamp(&self, z: f32) -> f32 {
        math::clamp(z, self.min_z, self.max_z)
    }
}

/// Bounds on one ground-plane coordinate of a hover camera's pivot.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TranslationLimits {
    /// Lowest allowed coordinate.
    pub min: f32,
    /// Highest allowed coordinate.
    pub max: f32,
}

impl TranslationLimits {
    /// Translation limits over `[min, max]`.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Check that `min <= max`. `kind` names the axis in the error.
    pub fn validate(&self, kind: LimitKind) -> Result<Self, CameraError> {
        check_interval(self.min, self.max, kind)?;
        Ok(*self)
    }

    /// Project a coordinate into the interval.
    pub fn clamp(&self, value: f32) -> f32 {
        math::clamp(value, self.min, self.max)
    }
}

/// Elevation bounds of a hover camera, inside `[-π/2, 0]`.
///
/// `down` must be greater than or equal to `up`: `down` is the shallow bound, closest to the
/// horizon, and `up` the steep one, closest to looking straight down.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct HoverAngleLimits {
    /// Shallow elevation bound.
    pub down: f32,
    /// Steep elevation bound.
    pub up: f32,
}

impl HoverAngleLimits {
    /// Hover angle limits between `down` and `up`.
    pub fn new(down: f32, up: f32) -> Self {
        Self { down, up }
    }

    /// Check that `down >= up`. The copy is wrapped to `[-π, π]` and clamped to `[-π/2, 0]`.
    pub fn validate(&self) -> Result<Self, CameraError> {
        let invalid = CameraError::InvalidLimits(LimitKind::HoverAngle);
        if !self.down.is_finite() || !self.up.is_finite() || self.down < self.up {
            return Err(invalid);
        }
        let down = math::clamp(math::wrap_pi(self.down), -FRAC_PI_2, 0.0);
        let up = math::clamp(math::wrap_pi(self.up), -FRAC_PI_2, 0.0);
        if down < up {
            return Err(invalid);
        }
        Ok(Self { down, up })
    }

    /// Project an elevation into `[up, down]`.
    pub fn clamp(&self, theta: f32) -> f32 {
        math::clamp(theta, self.up, self.down)
    }

    /// Where `theta` sits between `down` (0) and `up` (1). `None` when the bounds coincide.
    pub fn fraction(&self, theta: f32) -> Option<f32> {
        let span = self.down - self.up;
        (span > math::EPSILON).then(|| math::clamp((self.down - theta) / span, 0.0, 1.0))
    }
}

/// Elevation bounds for target and eye cameras.
///
/// The allowed arc runs counterclockwise from `down` to `up`.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct VerticalRotationLimits {
    /// Bound on downward rotation.
    pub down: f32,
    /// Bound on upward rotation.
    pub up: f32,
    /// The bounds are relative to the camera's elevation at the time they are set.
    pub camera_space: bool,
}

impl VerticalRotationLimits {
    /// World space limits between `down` and `up`.
    pub fn new(down: f32, up: f32) -> Self {
        Self {
            down,
            up,
            camera_space: false,
        }
    }

    /// Mark the limits as relative to the camera's current elevation.
    #[must_use]
    pub fn in_camera_space(mut self) -> Self {
        self.camera_space = true;
        self
    }

    /// Check that both bounds are finite.
    pub fn validate(&self) -> Result<Self, CameraError> {
        if self.down.is_finite() && self.up.is_finite() {
            Ok(*self)
        } else {
            Err(CameraError::InvalidLimits(LimitKind::VerticalRotation))
        }
    }

    /// Fix the limits against the camera's current elevation.
    pub fn resolve(&self, current_theta: f32) -> AngularLimits {
        AngularLimits::resolve(self.down, self.up, self.camera_space, current_theta)
    }
}

/// Azimuth bounds for target and eye cameras.
///
/// The allowed arc runs counterclockwise from `right` to `left`, turning left increases `phi`.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct HorizontalRotationLimits {
    /// Bound on leftward rotation.
    pub left: f32,
    /// Bound on rightward rotation.
    pub right: f32,
    /// The bounds are relative to the camera's azimuth at the time they are set.
    pub camera_space: bool,
}

impl HorizontalRotationLimits {
    /// World space limits between `left` and `right`.
    pub fn new(left: f32, right: f32) -> Self {
        Self {
            left,
            right,
            camera_space: false,
        }
    }

    /// Mark the limits as relative to the camera's current azimuth.
    #[must_use]
    pub fn in_camera_space(mut self) -> Self {
        self.camera_space = true;
        self
    }

    /// Check that both bounds are finite.
    pub fn validate(&self) -> Result<Self, CameraError> {
        if self.left.is_finite() && self.right.is_finite() {
            Ok(*self)
        } else {
            Err(CameraError::InvalidLimits(LimitKind::HorizontalRotation))
        }
    }

    /// Fix the limits against the camera's current azimuth.
    pub fn resolve(&self, current_phi: f32) -> AngularLimits {
        AngularLimits::resolve(self.right, self.left, self.camera_space, current_phi)
    }
}

/// Rotation limits as stored on a camera: a counterclockwise arc from `start` to `end` in world
/// space, plus the camera angle the camera-space form is measured from.
///
/// The reference angle is captured when the limits are set, so rotating the camera afterwards
/// never changes what a camera-space limit means.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct AngularLimits {
    /// Arc start in world space (`down` or `right`).
    pub start: f32,
    /// Arc end in world space (`up` or `left`).
    pub end: f32,
    /// Camera angle at the time the limits were set.
    pub reference: f32,
}

impl AngularLimits {
    /// Store a `start..end` pair given either in world space or relative to `current`.
    pub fn resolve(start: f32, end: f32, camera_space: bool, current: f32) -> Self {
        let offset = if camera_space { current } else { 0.0 };
        Self {
            start: start + offset,
            end: end + offset,
            reference: current,
        }
    }

    /// The `(start, end)` bounds in world space, or relative to the reference angle.
    pub fn bounds(&self, camera_space: bool) -> (f32, f32) {
        if camera_space {
            (self.start - self.reference, self.end - self.reference)
        } else {
            (self.start, self.end)
        }
    }

    /// Read back as vertical limits, bounds in `[-π, π]`.
    pub fn vertical(&self, camera_space: bool) -> VerticalRotationLimits {
        let (down, up) = self.bounds(camera_space);
        VerticalRotationLimits {
            down: math::wrap_pi(down),
            up: math::wrap_pi(up),
            camera_space,
        }
    }

    /// Read back as horizontal limits, bounds in `[0, 2π)`.
    pub fn horizontal(&self, camera_space: bool) -> HorizontalRotationLimits {
        let (right, left) = self.bounds(camera_space);
        HorizontalRotationLimits {
            left: math::wrap_two_pi(left),
            right: math::wrap_two_pi(right),
            camera_space,
        }
    }

    /// The allowed arc.
    pub fn arc(&self) -> AngleArc {
        AngleArc {
            start: self.start,
            length: math::wrap_two_pi(self.end - self.start),
        }
    }
}

/// A counterclockwise arc of the circle, `length` in `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleArc {
    /// Where the arc begins.
    pub start: f32,
    /// Angular length of the arc.
    pub length: f32,
}

impl AngleArc {
    /// Position of `angle` along the arc. Angles outside snap to the nearer end.
    fn offset(&self, angle: f32) -> f32 {
        let offset = math::wrap_two_pi(angle - self.start);
        if offset <= self.length {
            return offset;
        }
        let past_end = offset - self.length;
        let before_start = TAU - offset;
        if past_end <= before_start {
            self.length
        } else {
            0.0
        }
    }

    /// Whether `angle` lies on the arc.
    pub fn contains(&self, angle: f32) -> bool {
        math::wrap_two_pi(angle - self.start) <= self.length
    }

    /// The arc angle closest to `angle`. Not wrapped.
    pub fn clamp(&self, angle: f32) -> f32 {
        self.start + self.offset(angle)
    }

    /// Move from `current` by `delta` along the arc, stopping at its ends. Not wrapped.
    ///
    /// The motion is linear: a delta larger than a full turn ends at the arc end it moves
    /// toward instead of wrapping around.
    pub fn step(&self, current: f32, delta: f32) -> f32 {
        self.start + math::clamp(self.offset(current) + delta, 0.0, self.length)
    }
}

/// The next value of a camera angle after a rotation request.
///
/// An absolute request sets the angle, a relative one adds to it. Either way the result is kept
/// on `arc` when there is one.
pub fn next_angle(current: f32, request: f32, absolute: bool, arc: Option<AngleArc>) -> f32 {
    match (arc, absolute) {
        (Some(arc), true) => arc.clamp(request),
        (Some(arc), false) => arc.step(current, request),
        (None, true) => request,
        (None, false) => current + request,
    }
}
