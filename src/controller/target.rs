//! The TARGET movement model: a camera orbiting a pivot point it always looks at.

use bevy_log::prelude::*;
use bevy_math::Vec3;
use bevy_reflect::prelude::*;

use super::{params::TargetParams, projection::Lens};
use crate::{
    angles,
    error::CameraError,
    limits::{
        self, AngularLimits, DistanceLimits, HorizontalRotationLimits, PivotLimits,
        VerticalRotationLimits,
    },
    math::{self, AXIS_MZ, EPSILON},
    tsr::Tsr,
};

/// State of a target camera.
///
/// The camera sits at `pivot - distance * view`, so its angles describe where it looks from.
/// Pivot height limits are applied after every pivot change and the camera follows the pivot by
/// the delta that was actually applied.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct TargetModel {
    pivot: Vec3,
    horizontal_limits: Option<AngularLimits>,
    vertical_limits: Option<AngularLimits>,
    distance_limits: Option<DistanceLimits>,
    pivot_limits: Option<PivotLimits>,
    use_panning: bool,
}

impl TargetModel {
    /// Install a target model on `pose`. `params` must already be validated.
    pub(crate) fn setup(params: &TargetParams, pose: &mut Tsr, vertical_axis: Vec3) -> Self {
        let pos = params.pos.unwrap_or(pose.translation);
        let pivot = params
            .pivot
            .unwrap_or_else(|| pos + pose.rotation * AXIS_MZ);

        let mut model = Self {
            pivot,
            horizontal_limits: None,
            vertical_limits: None,
            distance_limits: params.distance_limits,
            pivot_limits: params.pivot_limits,
            use_panning: params.use_panning,
        };
        model.clamp_pivot();
        pose.translation = pos;
        model.look_at_pivot(pose, vertical_axis);

        let (phi, theta) = angles::rotation_to_angles(pose.rotation);
        model.horizontal_limits = params.horizontal_limits.map(|l| l.resolve(phi));
        model.vertical_limits = params.vertical_limits.map(|l| l.resolve(theta));
        model.enforce(pose);
        model
    }

    /// The orbited point.
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    /// Whether panning is enabled.
    pub fn use_panning(&self) -> bool {
        self.use_panning
    }

    /// Distance from the camera to its pivot.
    pub fn distance(&self, pose: &Tsr) -> f32 {
        pose.translation.distance(self.pivot)
    }

    /// Distance limits, if any.
    pub fn distance_limits(&self) -> Option<DistanceLimits> {
        self.distance_limits
    }

    /// Pivot height limits, if any.
    pub fn pivot_limits(&self) -> Option<PivotLimits> {
        self.pivot_limits
    }

    /// Elevation limits, in world space or relative to the elevation they were set at.
    pub fn vertical_limits(&self, camera_space: bool) -> Option<VerticalRotationLimits> {
        self.vertical_limits.map(|l| l.vertical(camera_space))
    }

    /// Azimuth limits, in world space or relative to the azimuth they were set at.
    pub fn horizontal_limits(&self, camera_space: bool) -> Option<HorizontalRotationLimits> {
        self.horizontal_limits.map(|l| l.horizontal(camera_space))
    }

    pub(crate) fn has_vertical_limits(&self) -> bool {
        self.vertical_limits.is_some()
    }

    pub(crate) fn has_horizontal_limits(&self) -> bool {
        self.horizontal_limits.is_some()
    }

    fn clamp_pivot(&mut self) {
        if let Some(limits) = self.pivot_limits {
            self.pivot.z = limits.clamp(self.pivot.z);
        }
    }

    fn clamp_distance(&self, distance: f32) -> f32 {
        self.distance_limits
            .map_or(distance, |limits| limits.clamp(distance))
            .max(0.0)
    }

    fn look_at_pivot(&self, pose: &mut Tsr, vertical_axis: Vec3) {
        match angles::look_at_rotation(pose.translation, self.pivot, vertical_axis) {
            Some(rotation) => pose.rotation = rotation,
            None => warn_once!("Target camera placed on its pivot, keeping its orientation."),
        }
    }

    /// Place the camera around the pivot at the given angles and distance.
    fn orbit(&self, pose: &mut Tsr, phi: f32, theta: f32, distance: f32) {
        pose.rotation = angles::angles_to_rotation(math::wrap_two_pi(phi), math::wrap_pi(theta));
        pose.translation = self.pivot - distance * (pose.rotation * AXIS_MZ);
    }

    /// Re-apply every limit to the current placement.
    pub(crate) fn enforce(&mut self, pose: &mut Tsr) {
        self.clamp_pivot();
        let (phi, theta) = angles::rotation_to_angles(pose.rotation);
        let phi = self.horizontal_limits.map_or(phi, |l| l.arc().clamp(phi));
        let theta = self.vertical_limits.map_or(theta, |l| l.arc().clamp(theta));
        let distance = self.clamp_distance(self.distance(pose));
        self.orbit(pose, phi, theta, distance);
    }

    pub(crate) fn rotate(&mut self, pose: &mut Tsr, phi: f32, theta: f32, absolute: bool) {
        let (current_phi, current_theta) = angles::rotation_to_angles(pose.rotation);
        let phi = limits::next_angle(
            current_phi,
            phi,
            absolute,
            self.horizontal_limits.map(|l| l.arc()),
        );
        let theta = limits::next_angle(
            current_theta,
            theta,
            absolute,
            self.vertical_limits.map(|l| l.arc()),
        );
        let distance = self.distance(pose);
        self.orbit(pose, phi, theta, distance);
    }

    /// Move along the view axis to `distance`, clamped to the limits and to 0.
    pub(crate) fn set_distance(&mut self, pose: &mut Tsr, distance: f32) {
        let distance = self.clamp_distance(distance);
        pose.translation = self.pivot - distance * (pose.rotation * AXIS_MZ);
    }

    /// Move the pivot, carrying the camera along by the applied delta.
    pub(crate) fn move_pivot(&mut self, pose: &mut Tsr, pivot: Vec3) {
        let previous = self.pivot;
        self.pivot = pivot;
        self.clamp_pivot();
        pose.translation += self.pivot - previous;
    }

    /// Pan the pivot and the camera in the camera's screen plane. No-op unless panning is on.
    pub(crate) fn pan_pivot(&mut self, pose: &mut Tsr, horizontal: f32, vertical: f32) {
        if !self.use_panning {
            return;
        }
        let delta = pose.rotation * Vec3::new(horizontal, vertical, 0.0);
        self.move_pivot(pose, self.pivot + delta);
    }

    /// Replace the camera position and the pivot, then look at the pivot.
    pub(crate) fn set_trans_pivot(
        &mut self,
        pose: &mut Tsr,
        translation: Option<Vec3>,
        pivot: Option<Vec3>,
        vertical_axis: Vec3,
    ) {
        if let Some(translation) = translation {
            pose.translation = translation;
        }
        if let Some(pivot) = pivot {
            self.pivot = pivot;
        }
        self.clamp_pivot();
        self.look_at_pivot(pose, vertical_axis);
        self.enforce(pose);
    }

    /// Frame a sphere: pivot on its center, then back off until it fills the view.
    pub(crate) fn zoom_sphere(
        &mut self,
        pose: &mut Tsr,
        lens: &mut Lens,
        center: Vec3,
        radius: f32,
        vertical_axis: Vec3,
    ) -> Result<(), CameraError> {
        let radius = radius.max(0.0);
        let distance = match lens {
            Lens::Perspective { fov } => {
                let sin_half_fov = (*fov * 0.5).sin();
                if sin_half_fov.abs() < EPSILON {
                    return Err(CameraError::UnsupportedConversion(
                        "framing with a zero field of view",
                    ));
                }
                Some(radius / sin_half_fov)
            }
            Lens::Orthographic { .. } => None,
        };

        self.set_trans_pivot(pose, None, Some(center), vertical_axis);
        match distance {
            Some(distance) => self.set_distance(pose, distance),
            None => lens.set_ortho_scale(2.0 * radius, Some(self.distance(pose)))?,
        }
        Ok(())
    }

    pub(crate) fn set_distance_limits(
        &mut self,
        pose: &mut Tsr,
        limits: Option<DistanceLimits>,
    ) -> Result<(), CameraError> {
        self.distance_limits = limits.map(|l| l.validate()).transpose()?;
        self.enforce(pose);
        Ok(())
    }

    pub(crate) fn set_pivot_limits(
        &mut self,
        pose: &mut Tsr,
        limits: Option<PivotLimits>,
    ) -> Result<(), CameraError> {
        self.pivot_limits = limits.map(|l| l.validate()).transpose()?;
        let unclamped = self.pivot;
        self.move_pivot(pose, unclamped);
        self.enforce(pose);
        Ok(())
    }

    pub(crate) fn set_vertical_limits(
        &mut self,
        pose: &mut Tsr,
        limits: Option<VerticalRotationLimits>,
    ) -> Result<(), CameraError> {
        let limits = limits.map(|l| l.validate()).transpose()?;
        let (_, theta) = angles::rotation_to_angles(pose.rotation);
        self.vertical_limits = limits.map(|l| l.resolve(theta));
        self.enforce(pose);
        Ok(())
    }

    pub(crate) fn set_horizontal_limits(
        &mut self,
        pose: &mut Tsr,
        limits: Option<HorizontalRotationLimits>,
    ) -> Result<(), CameraError> {
        let limits = limits.map(|l| l.validate()).transpose()?;
        let (phi, _) = angles::rotation_to_angles(pose.rotation);
        self.horizontal_limits = limits.map(|l| l.resolve(phi));
        self.enforce(pose);
        Ok(())
    }

    pub(crate) fn switch_panning(&mut self, enable: bool) {
        self.use_panning = enable;
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use bevy_math::Quat;

    use super::*;
    use crate::math::AXIS_Z;

    fn target(params: TargetParams) -> (TargetModel, Tsr) {
        let mut pose = Tsr::IDENTITY;
        let params = params.validate().unwrap();
        let model = TargetModel::setup(&params, &mut pose, AXIS_Z);
        (model, pose)
    }

    fn looks_at_pivot(model: &TargetModel, pose: &Tsr) -> bool {
        let to_pivot = (model.pivot() - pose.translation).normalize();
        (pose.rotation * AXIS_MZ).distance(to_pivot) < 1e-4
    }

    #[test]
    fn setup_looks_at_pivot() {
        let (model, pose) = target(TargetParams {
            pos: Some(Vec3::new(0.0, -10.0, 5.0)),
            pivot: Some(Vec3::ZERO),
            ..Default::default()
        });
        assert!(looks_at_pivot(&model, &pose));
        assert!((model.distance(&pose) - 125f32.sqrt()).abs() < 1e-4);
        assert!(pose.translation.distance(Vec3::new(0.0, -10.0, 5.0)) < 1e-4);
    }

    #[test]
    fn default_pivot_is_one_unit_ahead() {
        let mut pose = Tsr::from_parts(Vec3::new(1.0, 2.0, 3.0), 1.0, Quat::IDENTITY);
        let model = TargetModel::setup(&TargetParams::default(), &mut pose, AXIS_Z);
        assert!(model.pivot().distance(Vec3::new(1.0, 2.0, 2.0)) < 1e-6);
        assert!((model.distance(&pose) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn distance_is_clamped_to_limits() {
        let (mut model, mut pose) = target(TargetParams {
            pos: Some(Vec3::new(0.0, -5.0, 0.0)),
            pivot: Some(Vec3::ZERO),
            distance_limits: Some(DistanceLimits::new(2.0, 10.0)),
            ..Default::default()
        });
        model.set_distance(&mut pose, 100.0);
        assert!((model.distance(&pose) - 10.0).abs() < 1e-4);
        model.set_distance(&mut pose, -5.0);
        assert!((model.distance(&pose) - 2.0).abs() < 1e-4);
        assert!(looks_at_pivot(&model, &pose));
    }

    #[test]
    fn negative_distance_without_limits_lands_on_pivot() {
        let (mut model, mut pose) = target(TargetParams {
            pos: Some(Vec3::new(0.0, -5.0, 0.0)),
            pivot: Some(Vec3::ZERO),
            ..Default::default()
        });
        let rotation = pose.rotation;
        model.set_distance(&mut pose, -5.0);
        assert!(pose.translation.length() < 1e-6);
        assert_eq!(pose.rotation, rotation);
    }

    #[test]
    fn rotation_keeps_distance_and_respects_limits() {
        let (mut model, mut pose) = target(TargetParams {
            pos: Some(Vec3::new(0.0, -10.0, 0.0)),
            pivot: Some(Vec3::ZERO),
            vertical_limits: Some(VerticalRotationLimits::new(-1.0, 0.0)),
            ..Default::default()
        });
        model.rotate(&mut pose, 0.5, -0.4, false);
        let (phi, theta) = angles::rotation_to_angles(pose.rotation);
        assert!((phi - 0.5).abs() < 1e-4);
        assert!((theta + 0.4).abs() < 1e-4);
        assert!((model.distance(&pose) - 10.0).abs() < 1e-4);
        assert!(looks_at_pivot(&model, &pose));

        model.rotate(&mut pose, 0.0, -10.0, false);
        let (_, theta) = angles::rotation_to_angles(pose.rotation);
        assert!((theta + 1.0).abs() < 1e-4);

        // Looking down at the pivot puts the camera above it.
        assert!(pose.translation.z > 0.0);
    }

    #[test]
    fn pivot_height_limits_move_the_camera_by_the_applied_delta() {
        let (mut model, mut pose) = target(TargetParams {
            pos: Some(Vec3::new(0.0, -10.0, 0.0)),
            pivot: Some(Vec3::ZERO),
            pivot_limits: Some(PivotLimits::new(-1.0, 1.0)),
            use_panning: true,
            ..Default::default()
        });
        model.move_pivot(&mut pose, Vec3::new(2.0, 0.0, 5.0));
        assert!(model.pivot().distance(Vec3::new(2.0, 0.0, 1.0)) < 1e-6);
        assert!(pose.translation.distance(Vec3::new(2.0, -10.0, 1.0)) < 1e-4);

        // Camera looks along +Y, so its screen up is world +Z.
        model.pan_pivot(&mut pose, 1.0, 5.0);
        assert!(model.pivot().distance(Vec3::new(3.0, 0.0, 1.0)) < 1e-4);
        assert!(pose.translation.distance(Vec3::new(3.0, -10.0, 1.0)) < 1e-4);
    }

    #[test]
    fn panning_can_be_switched_off() {
        let (mut model, mut pose) = target(TargetParams {
            pos: Some(Vec3::new(0.0, -10.0, 0.0)),
            pivot: Some(Vec3::ZERO),
            ..Default::default()
        });
        let before = pose;
        model.pan_pivot(&mut pose, 1.0, 1.0);
        assert_eq!(pose, before);
        model.switch_panning(true);
        model.pan_pivot(&mut pose, 1.0, 0.0);
        assert!(model.pivot().distance(Vec3::X) < 1e-4);
    }

    #[test]
    fn camera_space_limits_do_not_follow_later_rotation() {
        let (mut model, mut pose) = target(TargetParams {
            pos: Some(Vec3::new(0.0, -10.0, 0.0)),
            pivot: Some(Vec3::ZERO),
            ..Default::default()
        });
        model
            .set_horizontal_limits(
                &mut pose,
                Some(HorizontalRotationLimits::new(0.5, -0.5).in_camera_space()),
            )
            .unwrap();
        let before = model.horizontal_limits(false).unwrap();
        model.rotate(&mut pose, 0.3, 0.0, false);
        assert_eq!(model.horizontal_limits(false).unwrap(), before);
        let local = model.horizontal_limits(true).unwrap();
        assert!((local.left - 0.5).abs() < 1e-5);

        model.rotate(&mut pose, 10.0, 0.0, false);
        let (phi, _) = angles::rotation_to_angles(pose.rotation);
        assert!((phi - 0.5).abs() < 1e-4);
    }

    #[test]
    fn sphere_fills_the_view() {
        let (mut model, mut pose) = target(TargetParams {
            pos: Some(Vec3::new(0.0, -10.0, 0.0)),
            pivot: Some(Vec3::ZERO),
            ..Default::default()
        });
        let mut lens = Lens::Perspective { fov: FRAC_PI_2 };
        let center = Vec3::new(5.0, 5.0, 0.0);
        model
            .zoom_sphere(&mut pose, &mut lens, center, 2.0, AXIS_Z)
            .unwrap();
        assert_eq!(model.pivot(), center);
        assert!((model.distance(&pose) - 2.0 / (FRAC_PI_2 * 0.5).sin()).abs() < 1e-4);
        assert!(looks_at_pivot(&model, &pose));

        let mut ortho = Lens::orthographic(1.0);
        model
            .zoom_sphere(&mut pose, &mut ortho, Vec3::ZERO, 3.0, AXIS_Z)
            .unwrap();
        assert_eq!(ortho.ortho_scale(), Ok(6.0));
    }

}
