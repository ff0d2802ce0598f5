//! The EYE movement model: free look from a fixed position.

use bevy_log::prelude::*;
use bevy_math::Vec3;
use bevy_reflect::prelude::*;

use super::params::EyeParams;
use crate::{
    angles,
    error::CameraError,
    limits::{self, AngularLimits, HorizontalRotationLimits, VerticalRotationLimits},
    math,
    tsr::Tsr,
};

/// State of an eye camera: only its optional rotation limits. Rotation never moves the camera.
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct EyeModel {
    horizontal_limits: Option<AngularLimits>,
    vertical_limits: Option<AngularLimits>,
}

impl EyeModel {
    /// Install an eye model on `pose`. `params` must already be validated.
    pub(crate) fn setup(params: &EyeParams, pose: &mut Tsr, vertical_axis: Vec3) -> Self {
        let mut model = Self::default();
        model.set_look_at(
            pose,
            params.pos.unwrap_or(pose.translation),
            params.look_at,
            vertical_axis,
        );

        let (phi, theta) = angles::rotation_to_angles(pose.rotation);
        model.horizontal_limits = params.horizontal_limits.map(|l| l.resolve(phi));
        model.vertical_limits = params.vertical_limits.map(|l| l.resolve(theta));
        model.enforce(pose);
        model
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

    /// Re-apply the rotation limits. An unlimited camera keeps its exact rotation, roll included.
    pub(crate) fn enforce(&self, pose: &mut Tsr) {
        if self.horizontal_limits.is_none() && self.vertical_limits.is_none() {
            return;
        }
        let (phi, theta) = angles::rotation_to_angles(pose.rotation);
        let phi = self.horizontal_limits.map_or(phi, |l| l.arc().clamp(phi));
        let theta = self.vertical_limits.map_or(theta, |l| l.arc().clamp(theta));
        pose.rotation =
            angles::angles_to_rotation(math::wrap_two_pi(phi), math::wrap_pi(theta));
    }

    pub(crate) fn rotate(&self, pose: &mut Tsr, phi: f32, theta: f32, absolute: bool) {
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
        pose.rotation =
            angles::angles_to_rotation(math::wrap_two_pi(phi), math::wrap_pi(theta));
    }

    /// Move to `pos` and, when given, look at `look_at` with a strictly upright camera.
    pub(crate) fn set_look_at(
        &self,
        pose: &mut Tsr,
        pos: Vec3,
        look_at: Option<Vec3>,
        vertical_axis: Vec3,
    ) {
        pose.translation = pos;
        if let Some(look_at) = look_at {
            match angles::look_at_rotation(pos, look_at, vertical_axis) {
                Some(rotation) => pose.rotation = rotation,
                None => warn_once!("Eye camera asked to look at its own position."),
            }
        }
        self.enforce(pose);
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{AXIS_MZ, AXIS_Z};

    fn eye(params: EyeParams) -> (EyeModel, Tsr) {
        let mut pose = Tsr::IDENTITY;
        let model = EyeModel::setup(&params.validate().unwrap(), &mut pose, AXIS_Z);
        (model, pose)
    }

    #[test]
    fn huge_vertical_delta_stops_at_the_limit() {
        let (model, mut pose) = eye(EyeParams {
            pos: Some(Vec3::new(1.0, 2.0, 3.0)),
            look_at: Some(Vec3::new(1.0, 10.0, 3.0)),
            vertical_limits: Some(VerticalRotationLimits::new(-0.5, 0.5)),
            ..Default::default()
        });
        model.rotate(&mut pose, 0.0, 10.0, false);
        let (_, theta) = angles::rotation_to_angles(pose.rotation);
        assert!((theta - 0.5).abs() < 1e-5);
        assert_eq!(pose.translation, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn setup_clamps_the_initial_rotation() {
        // The identity rotation looks straight down, far below the allowed arc.
        let (_, pose) = eye(EyeParams {
            vertical_limits: Some(VerticalRotationLimits::new(-0.5, 0.5)),
            ..Default::default()
        });
        let (_, theta) = angles::rotation_to_angles(pose.rotation);
        assert!((theta + 0.5).abs() < 1e-5);
    }

    #[test]
    fn absolute_rotation_without_limits() {
        let (model, mut pose) = eye(EyeParams::default());
        model.rotate(&mut pose, 1.0, 0.25, true);
        let (phi, theta) = angles::rotation_to_angles(pose.rotation);
        assert!((phi - 1.0).abs() < 1e-5);
        assert!((theta - 0.25).abs() < 1e-5);
        assert_eq!(pose.translation, Vec3::ZERO);
    }

    #[test]
    fn look_at_is_upright() {
        let (model, mut pose) = eye(EyeParams::default());
        model.set_look_at(&mut pose, Vec3::ZERO, Some(Vec3::new(3.0, 4.0, 1.0)), AXIS_Z);
        let view = pose.rotation * AXIS_MZ;
        assert!(view.distance(Vec3::new(3.0, 4.0, 1.0).normalize()) < 1e-5);
        assert!((pose.rotation * Vec3::Y).z > 0.0);

        let before = pose;
        model.set_look_at(&mut pose, Vec3::ZERO, Some(Vec3::ZERO), AXIS_Z);
        assert_eq!(pose, before);
    }

    #[test]
    fn clearing_limits_frees_rotation() {
        let (mut model, mut pose) = eye(EyeParams {
            look_at: Some(Vec3::Y),
            horizontal_limits: Some(HorizontalRotationLimits::new(0.1, -0.1)),
            ..Default::default()
        });
        assert!(model.has_horizontal_limits());
        model.set_horizontal_limits(&mut pose, None).unwrap();
        assert!(!model.has_horizontal_limits());
        model.rotate(&mut pose, 2.0, 0.0, false);
        let (phi, _) = angles::rotation_to_angles(pose.rotation);
        assert!((phi - 2.0).abs() < 1e-4);
    }
}
