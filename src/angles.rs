//! Conversions between view directions, rotations and `(phi, theta)` camera angles.
//!
//! The world is Z-up. A camera looks along its local `-Z` axis with `+Y` as its local up, so the
//! identity rotation looks straight down. `phi` is the azimuth, measured counterclockwise from
//! `+Y` when seen from above, and `theta` is the elevation, negative when looking down:
//!
//! ```text
//! view(phi, theta) = (-cos θ sin φ, cos θ cos φ, sin θ)
//! ```

use std::f32::consts::FRAC_PI_2;

use bevy_math::{Quat, Vec3};

use crate::math::{self, AXIS_MZ, AXIS_Y, AXIS_Z, EPSILON};

/// The unit view direction for the given camera angles.
pub fn angles_to_direction(phi: f32, theta: f32) -> Vec3 {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(-cos_theta * sin_phi, cos_theta * cos_phi, sin_theta)
}

/// The camera angles of a view direction, `phi` in `[0, 2π)` and `theta` in `[-π/2, π/2]`.
///
/// The azimuth of a vertical direction is undefined. It is then taken from `previous_phi` when
/// given, otherwise it is 0. A zero vector yields `(previous_phi or 0, 0)`.
pub fn direction_to_angles(direction: Vec3, previous_phi: Option<f32>) -> (f32, f32) {
    let fallback_phi = previous_phi.map_or(0.0, math::wrap_two_pi);
    let Some(direction) = direction.try_normalize() else {
        return (fallback_phi, 0.0);
    };

    let theta = direction.z.clamp(-1.0, 1.0).asin();
    let phi = if direction.x.hypot(direction.y) < EPSILON {
        fallback_phi
    } else {
        math::wrap_two_pi((-direction.x).atan2(direction.y))
    };
    (phi, theta)
}

/// The up-corrected camera rotation for the given angles.
///
/// A `theta` beyond `±π/2` gives an upside-down camera.
pub fn angles_to_rotation(phi: f32, theta: f32) -> Quat {
    Quat::from_rotation_z(phi) * Quat::from_rotation_x(FRAC_PI_2 + theta)
}

/// The camera angles of a rotation, `phi` in `[0, 2π)` and `theta` in `[-π, π]`.
///
/// The heading is read from a combination of the view and up vectors, which stays defined when
/// the camera looks straight up or down.
pub fn rotation_to_angles(rotation: Quat) -> (f32, f32) {
    let view = rotation * AXIS_MZ;
    let up = rotation * AXIS_Y;

    let theta = view.z.atan2(up.z);
    let (sin_theta, cos_theta) = theta.sin_cos();
    let forward = view * cos_theta - up * sin_theta;
    let phi = math::wrap_two_pi((-forward.x).atan2(forward.y));
    (phi, theta)
}

/// Roll `rotation` about its view axis by the smallest angle that brings the local up vector
/// into the plane spanned by the view direction and `axis`.
///
/// With `strict` the up vector always ends on the `axis` side of the plane. Otherwise the
/// opposite side is accepted when it is closer, so an upside-down camera stays upside down.
/// Nothing changes when the view direction is parallel to `axis`.
pub fn correct_up(rotation: Quat, axis: Vec3, strict: bool) -> Quat {
    let view = rotation * AXIS_MZ;
    let up = rotation * AXIS_Y;

    let Some(mut target_up) = (axis - view * axis.dot(view)).try_normalize() else {
        return rotation;
    };
    if !strict && target_up.dot(up) < 0.0 {
        target_up = -target_up;
    }

    let roll = view.dot(up.cross(target_up)).atan2(up.dot(target_up));
    (Quat::from_axis_angle(view, roll) * rotation).normalize()
}

/// A rotation for a camera at `eye` looking at `target`, strictly up-corrected against
/// `vertical_axis`. `None` when the two points coincide.
pub fn look_at_rotation(eye: Vec3, target: Vec3, vertical_axis: Vec3) -> Option<Quat> {
    let direction = (target - eye).try_normalize()?;
    let rotation = math::rotation_to_stable(AXIS_MZ, direction);
    Some(correct_up(rotation, vertical_axis, true))
}

/// The angles of an up-corrected camera looking along `direction`.
pub fn camera_angles_dir(direction: Vec3) -> (f32, f32) {
    let Some(direction) = direction.try_normalize() else {
        return (0.0, 0.0);
    };
    let rotation = correct_up(math::rotation_to_stable(AXIS_MZ, direction), AXIS_Z, true);
    rotation_to_angles(rotation)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{PI, TAU};

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    fn random_unit(rng: &mut StdRng) -> Vec3 {
        loop {
            let v = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if let Some(v) = v.try_normalize() {
                if v.z.abs() < 0.999 {
                    return v;
                }
            }
        }
    }

    #[test]
    fn direction_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let v = random_unit(&mut rng);
            let (phi, theta) = direction_to_angles(v, None);
            assert!((0.0..TAU).contains(&phi));
            assert!(angles_to_direction(phi, theta).distance(v) < 1e-4, "{v}");
        }
    }

    #[test]
    fn vertical_direction_keeps_previous_azimuth() {
        let (phi, theta) = direction_to_angles(Vec3::Z, None);
        assert_eq!(phi, 0.0);
        assert!((theta - FRAC_PI_2).abs() < 1e-6);
        let (phi, theta) = direction_to_angles(-Vec3::Z, Some(1.25));
        assert_eq!(phi, 1.25);
        assert!((theta + FRAC_PI_2).abs() < 1e-6);
        let (phi, _) = direction_to_angles(Vec3::Z * 3.0, Some(-FRAC_PI_2));
        assert!((phi - 3.0 * FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn rotation_matches_direction() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..300 {
            let phi = rng.gen_range(-TAU..TAU);
            let theta = rng.gen_range(-1.5..1.5);
            let rotation = angles_to_rotation(phi, theta);
            assert!((rotation * AXIS_MZ).distance(angles_to_direction(phi, theta)) < 1e-5);

            let (phi_back, theta_back) = rotation_to_angles(rotation);
            assert!((theta_back - theta).abs() < 1e-4);
            assert!(math::wrap_pi(phi_back - phi).abs() < 1e-4);
        }
    }

    #[test]
    fn rotation_angles_survive_looking_straight_down() {
        let (phi, theta) = rotation_to_angles(angles_to_rotation(2.0, -FRAC_PI_2));
        assert!((phi - 2.0).abs() < 1e-4);
        assert!((theta + FRAC_PI_2).abs() < 1e-4);

        let (phi, theta) = rotation_to_angles(Quat::IDENTITY);
        assert!(phi.abs() < 1e-6);
        assert!((theta + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn upside_down_rotation_reports_large_theta() {
        let (_, theta) = rotation_to_angles(angles_to_rotation(0.0, 2.5));
        assert!((theta - 2.5).abs() < 1e-4);
        assert!(theta <= PI);
    }

    #[test]
    fn correct_up_removes_roll() {
        let level = angles_to_rotation(0.7, -0.3);
        let view = level * AXIS_MZ;
        let rolled = Quat::from_axis_angle(view, 0.4) * level;

        let corrected = correct_up(rolled, AXIS_Z, false);
        assert!((corrected * AXIS_Y).distance(level * AXIS_Y) < 1e-5);
        assert!((corrected * AXIS_MZ).distance(view) < 1e-5);
    }

    #[test]
    fn strict_correction_flips_upside_down_camera() {
        let level = angles_to_rotation(0.0, 0.0);
        let flipped = Quat::from_axis_angle(level * AXIS_MZ, PI) * level;
        assert!((flipped * AXIS_Y).z < -0.99);

        let loose = correct_up(flipped, AXIS_Z, false);
        assert!((loose * AXIS_Y).z < -0.99);

        let strict = correct_up(flipped, AXIS_Z, true);
        assert!((strict * AXIS_Y).distance(AXIS_Z) < 1e-5);
    }

    #[test]
    fn correct_up_ignores_parallel_view() {
        let down = Quat::from_rotation_z(0.3);
        assert_eq!(correct_up(down, AXIS_Z, true), down);
    }

    #[test]
    fn look_at_points_view_axis_at_target() {
        let eye = Vec3::new(0.0, -10.0, 5.0);
        let rotation = look_at_rotation(eye, Vec3::ZERO, AXIS_Z).unwrap();
        assert!((rotation * AXIS_MZ).distance((Vec3::ZERO - eye).normalize()) < 1e-5);
        assert!((rotation * AXIS_Y).z > 0.0);
        assert!((rotation * Vec3::X).z.abs() < 1e-5);

        assert!(look_at_rotation(eye, eye, AXIS_Z).is_none());
    }

    #[test]
    fn camera_angles_of_direction() {
        let (phi, theta) = camera_angles_dir(Vec3::new(0.0, 1.0, 1.0));
        assert!(phi.abs() < 1e-5 || (phi - TAU).abs() < 1e-5);
        assert!((theta - PI / 4.0).abs() < 1e-5);

        let (phi, theta) = camera_angles_dir(-Vec3::Z);
        assert!(phi.abs() < 1e-5);
        assert!((theta + FRAC_PI_2).abs() < 1e-5);
    }
}
