//! Allocation-free vector and quaternion helpers on top of [`bevy_math`].
//!
//! Everything here is pure. The batch transforms write into a caller-provided slice so hot
//! per-frame paths never allocate; the destination is only borrowed for the duration of the
//! call.

use std::{
    f32::consts::{PI, TAU},
    ops::{Add, Mul},
};

use bevy_math::{Quat, Vec3, Vec4};

use crate::tsr::Tsr;

/// World/local X axis.
pub const AXIS_X: Vec3 = Vec3::X;
/// World/local Y axis. The local up axis of a camera.
pub const AXIS_Y: Vec3 = Vec3::Y;
/// World/local Z axis. The world vertical axis.
pub const AXIS_Z: Vec3 = Vec3::Z;
/// Negative Z axis. The local view axis of a camera.
pub const AXIS_MZ: Vec3 = Vec3::NEG_Z;

/// Tolerance for degenerate geometry: zero-length vectors, parallel axes, coincident points.
pub const EPSILON: f32 = 1e-6;

/// Wrap an angle into `[0, 2π)`. A negative zero comes back as `+0.0`.
pub fn wrap_two_pi(angle: f32) -> f32 {
    // -0.0 + 0.0 == +0.0
    if (0.0..TAU).contains(&angle) {
        return angle + 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds up to TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped + 0.0
    }
}

/// Wrap an angle into `[-π, π]`.
pub fn wrap_pi(angle: f32) -> f32 {
    if (-PI..=PI).contains(&angle) {
        return angle;
    }
    wrap_two_pi(angle + PI) - PI
}

/// Clamp `value` into `[min, max]`. A NaN `value` maps to `min`.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Linear interpolation that returns `a` and `b` exactly at `t = 0` and `t = 1`.
pub fn lerp_exact<T>(a: T, b: T, t: f32) -> T
where
    T: Mul<f32, Output = T> + Add<Output = T>,
{
    a * (1.0 - t) + b * t
}

/// Spherical linear interpolation along the shortest arc.
///
/// Falls back to linear weights when the two rotations are nearly identical, where `acos`
/// loses precision. The result is renormalized.
pub fn slerp(a: Quat, b: Quat, t: f32) -> Quat {
    let mut b = b;
    let mut cos_omega = a.dot(b);
    if cos_omega < 0.0 {
        cos_omega = -cos_omega;
        b = -b;
    }

    let (weight_a, weight_b) = if 1.0 - cos_omega > EPSILON {
        let omega = cos_omega.min(1.0).acos();
        let sin_omega = omega.sin();
        (
            ((1.0 - t) * omega).sin() / sin_omega,
            (t * omega).sin() / sin_omega,
        )
    } else {
        (1.0 - t, t)
    };

    (a * weight_a + b * weight_b).normalize()
}

/// Rotate a local axis into world space.
pub fn quat_to_dir(rotation: Quat, axis: Vec3) -> Vec3 {
    rotation * axis
}

/// The shortest-arc rotation taking unit vector `from` onto unit vector `to`.
///
/// For antiparallel inputs there is no unique shortest arc; a half turn about an axis
/// orthogonal to `from` is returned, picked deterministically from the world axes.
pub fn rotation_to_stable(from: Vec3, to: Vec3) -> Quat {
    if from.dot(to) < -1.0 + EPSILON {
        let mut axis = AXIS_X.cross(from);
        if axis.length_squared() < EPSILON {
            axis = AXIS_Y.cross(from);
        }
        return Quat::from_axis_angle(axis.normalize(), PI);
    }
    Quat::from_rotation_arc(from, to)
}

/// Transform `points` by `tsr`, writing into `dest`. Only the common prefix is written.
pub fn transform_points_into(points: &[Vec3], tsr: &Tsr, dest: &mut [Vec3]) {
    for (out, point) in dest.iter_mut().zip(points) {
        *out = tsr.transform_point(*point);
    }
}

/// Transform direction vectors by `tsr` (no translation), writing into `dest`.
pub fn transform_directions_into(directions: &[Vec3], tsr: &Tsr, dest: &mut [Vec3]) {
    for (out, direction) in dest.iter_mut().zip(directions) {
        *out = tsr.transform_direction(*direction);
    }
}

/// Rotate 4-component tangents by `tsr`, writing into `dest`.
///
/// Only the rotation applies to a tangent; `w` carries the bitangent handedness and is kept.
pub fn transform_tangents_into(tangents: &[Vec4], tsr: &Tsr, dest: &mut [Vec4]) {
    for (out, tangent) in dest.iter_mut().zip(tangents) {
        *out = (tsr.rotation * tangent.truncate()).extend(tangent.w);
    }
}
