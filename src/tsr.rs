//! Provides [`Tsr`], the compact translation + uniform scale + rotation transform.

use std::ops::Mul;

use bevy_math::{Mat4, Quat, Vec3};
use bevy_reflect::Reflect;
use bevy_transform::prelude::*;

use crate::math;

/// A rigid transform with uniform scale, packed into eight scalars.
///
/// Points are mapped as `translation + scale * (rotation * p)`. The rotation is kept unit
/// length: every constructor and setter renormalizes it, getters return it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Tsr {
    /// Translation.
    pub translation: Vec3,
    /// Uniform scale, expected to be positive.
    pub scale: f32,
    /// Unit rotation quaternion.
    pub rotation: Quat,
}

impl Default for Tsr {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Tsr {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        scale: 1.0,
        rotation: Quat::IDENTITY,
    };

    /// The identity transform.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Build a transform from its eight scalars.
    #[allow(clippy::too_many_arguments)]
    pub fn from_values(
        x: f32,
        y: f32,
        z: f32,
        scale: f32,
        qx: f32,
        qy: f32,
        qz: f32,
        qw: f32,
    ) -> Self {
        Self::from_parts(
            Vec3::new(x, y, z),
            scale,
            Quat::from_xyzw(qx, qy, qz, qw),
        )
    }

    /// Build a transform from separate translation, scale and rotation.
    pub fn from_parts(translation: Vec3, scale: f32, rotation: Quat) -> Self {
        Self {
            translation,
            scale,
            rotation: rotation.normalize(),
        }
    }

    /// Build a transform from the packed `[tx, ty, tz, s, qx, qy, qz, qw]` layout.
    pub fn from_array(values: [f32; 8]) -> Self {
        let [x, y, z, s, qx, qy, qz, qw] = values;
        Self::from_values(x, y, z, s, qx, qy, qz, qw)
    }

    /// The packed `[tx, ty, tz, s, qx, qy, qz, qw]` layout.
    pub fn to_array(&self) -> [f32; 8] {
        let t = self.translation;
        let q = self.rotation;
        [t.x, t.y, t.z, self.scale, q.x, q.y, q.z, q.w]
    }

    /// Replace the translation.
    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    /// Replace the scale.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Replace the rotation. The quaternion is renormalized.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation.normalize();
    }

    /// Apply `other` inside this transform's frame, i.e. `self * other`.
    pub fn compose(&self, other: &Tsr) -> Tsr {
        Tsr {
            translation: self.translation + self.scale * (self.rotation * other.translation),
            scale: self.scale * other.scale,
            rotation: (self.rotation * other.rotation).normalize(),
        }
    }

    /// The inverse transform. `t.invert().compose(&t)` is the identity.
    pub fn invert(&self) -> Tsr {
        let scale = self.scale.recip();
        let rotation = self.rotation.inverse();
        Tsr {
            translation: -scale * (rotation * self.translation),
            scale,
            rotation,
        }
    }

    /// Interpolate towards `other`: linear on translation and scale, spherical on rotation.
    ///
    /// Translation and scale hit the end points exactly at `factor` 0 and 1.
    pub fn interpolate(&self, other: &Tsr, factor: f32) -> Tsr {
        Tsr {
            translation: math::lerp_exact(self.translation, other.translation, factor),
            scale: math::lerp_exact(self.scale, other.scale, factor),
            rotation: math::slerp(self.rotation, other.rotation, factor),
        }
    }

    /// The equivalent affine matrix.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.translation,
        )
    }

    /// Decompose an affine matrix. Non-uniform scale is averaged.
    pub fn from_matrix(matrix: &Mat4) -> Tsr {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Tsr::from_parts(translation, uniform_scale(scale), rotation)
    }

    /// Map a point.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.scale * (self.rotation * point)
    }

    /// Map a point through the inverse transform.
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        (self.rotation.inverse() * (point - self.translation)) / self.scale
    }

    /// Map a direction: scale and rotation apply, translation does not.
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.scale * (self.rotation * direction)
    }

    /// Move by `delta` in world space.
    pub fn translate(&mut self, delta: Vec3) {
        self.translation += delta;
    }
}

impl Mul for Tsr {
    type Output = Tsr;

    fn mul(self, rhs: Tsr) -> Tsr {
        self.compose(&rhs)
    }
}

fn uniform_scale(scale: Vec3) -> f32 {
    (scale.x + scale.y + scale.z) / 3.0
}

impl From<Transform> for Tsr {
    fn from(transform: Transform) -> Self {
        Tsr::from_parts(
            transform.translation,
            uniform_scale(transform.scale),
            transform.rotation,
        )
    }
}

impl From<Tsr> for Transform {
    fn from(tsr: Tsr) -> Self {
        Transform {
            translation: tsr.translation,
            rotation: tsr.rotation,
            scale: Vec3::splat(tsr.scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    const EPS: f32 = 1e-4;

    fn random_tsr(rng: &mut StdRng) -> Tsr {
        let axis = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        )
        .try_normalize()
        .unwrap_or(Vec3::Z);
        Tsr::from_parts(
            Vec3::new(
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
            ),
            rng.gen_range(0.25..4.0),
            Quat::from_axis_angle(axis, rng.gen_range(-3.0..3.0)),
        )
    }

    fn assert_tsr_eq(a: &Tsr, b: &Tsr) {
        assert!(
            a.translation.distance(b.translation) < EPS,
            "translation {a:?} != {b:?}"
        );
        assert!((a.scale - b.scale).abs() < EPS, "scale {a:?} != {b:?}");
        assert!(
            a.rotation.dot(b.rotation).abs() > 1.0 - EPS,
            "rotation {a:?} != {b:?}"
        );
    }

    #[test]
    fn identity_is_neutral() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let a = random_tsr(&mut rng);
            assert_tsr_eq(&a.compose(&Tsr::IDENTITY), &a);
            assert_tsr_eq(&Tsr::identity().compose(&a), &a);
        }
    }

    #[test]
    fn inverse_of_composition_cancels() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let a = random_tsr(&mut rng);
            let b = random_tsr(&mut rng);
            let ab = a * b;
            assert_tsr_eq(&(ab.invert() * ab), &Tsr::IDENTITY);
            assert_tsr_eq(&(ab * ab.invert()), &Tsr::IDENTITY);
        }
    }

    #[test]
    fn interpolation_hits_end_points() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let a = random_tsr(&mut rng);
            let b = random_tsr(&mut rng);
            let start = a.interpolate(&b, 0.0);
            let end = a.interpolate(&b, 1.0);
            assert_eq!(start.translation, a.translation);
            assert_eq!(start.scale, a.scale);
            assert_eq!(end.translation, b.translation);
            assert_eq!(end.scale, b.scale);
            assert!(start.rotation.dot(a.rotation).abs() > 1.0 - EPS);
            assert!(end.rotation.dot(b.rotation).abs() > 1.0 - EPS);
            assert!((a.interpolate(&b, 0.37).rotation.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn matrix_round_trip() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let a = random_tsr(&mut rng);
            let back = Tsr::from_matrix(&a.to_matrix());
            assert_tsr_eq(&back, &a);

            let p = Vec3::new(0.3, -1.2, 4.0);
            assert!(a.to_matrix().transform_point3(p).distance(a.transform_point(p)) < 1e-3);
        }
    }

    #[test]
    fn point_and_direction_mapping() {
        let t = Tsr::from_parts(Vec3::new(1.0, 0.0, 0.0), 2.0, Quat::from_rotation_z(FRAC_PI_2));
        assert!(t.transform_point(Vec3::X).distance(Vec3::new(1.0, 2.0, 0.0)) < 1e-6);
        assert!(t.transform_direction(Vec3::X).distance(Vec3::new(0.0, 2.0, 0.0)) < 1e-6);
        let p = Vec3::new(-3.0, 0.5, 2.0);
        assert!(t.inverse_transform_point(t.transform_point(p)).distance(p) < 1e-5);

        let mut moved = t;
        moved.translate(Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(moved.translation, Vec3::new(1.0, 0.0, 5.0));
        assert_eq!(moved.rotation, t.rotation);
    }

    #[test]
    fn constructors_renormalize_on_write() {
        let t = Tsr::from_values(1.0, 2.0, 3.0, 1.5, 0.0, 0.0, 2.0, 0.0);
        assert!((t.rotation.length() - 1.0).abs() < 1e-6);
        assert_eq!(t.to_array(), [1.0, 2.0, 3.0, 1.5, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(Tsr::from_array(t.to_array()), t);

        let mut raw = Tsr::IDENTITY;
        raw.set_rotation(Quat::from_xyzw(0.0, 0.0, 0.0, 3.0));
        assert_eq!(raw.rotation, Quat::IDENTITY);
    }

    #[test]
    fn transform_bridge_keeps_uniform_scale() {
        let tsr = Tsr::from_parts(Vec3::ONE, 3.0, Quat::from_rotation_x(0.4));
        let transform = Transform::from(tsr);
        assert_eq!(transform.scale, Vec3::splat(3.0));
        assert_tsr_eq(&Tsr::from(transform), &tsr);
    }
}
