//! The HOVER movement model: a camera gliding over a ground plane around a pivot.
//!
//! Distance and elevation are linked. With `s` the position of the elevation between the
//! `down` bound (0) and the `up` bound (1), the distance is `min + s * (max - min)`: tilting the
//! camera toward the ground zooms it out. When the elevation bounds coincide the distance is
//! free within its own limits.

use std::f32::consts::FRAC_PI_2;

use bevy_math::Vec3;
use bevy_reflect::prelude::*;

use super::params::{HoverParams, HoverRelParams};
use crate::{
    angles,
    error::{CameraError, LimitKind},
    limits::{DistanceLimits, HoverAngleLimits, TranslationLimits},
    math::{self, AXIS_MZ, EPSILON},
    tsr::Tsr,
};

/// State of a hover camera.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct HoverModel {
    pivot: Vec3,
    distance_limits: DistanceLimits,
    angle_limits: HoverAngleLimits,
    horizontal_trans_limits: Option<TranslationLimits>,
    vertical_trans_limits: Option<TranslationLimits>,
    enable_horiz_rot: bool,
}

/// Azimuth, elevation and distance of a camera relative to a pivot it looks at.
fn placement(pos: Vec3, pivot: Vec3, previous_phi: f32) -> (f32, f32, f32) {
    let offset = pivot - pos;
    let (phi, theta) = angles::direction_to_angles(offset, Some(previous_phi));
    (phi, math::clamp(theta, -FRAC_PI_2, 0.0), offset.length())
}

impl HoverModel {
    /// Install a hover model on `pose`. `params` must already be validated.
    ///
    /// Missing distance or elevation limits are fixed at the values of the given placement.
    pub(crate) fn setup(params: &HoverParams, pose: &mut Tsr) -> Self {
        let pos = params.pos.unwrap_or(pose.translation);
        let (current_phi, _) = angles::rotation_to_angles(pose.rotation);
        let (phi, theta, distance) = placement(pos, params.pivot, current_phi);

        let mut model = Self {
            pivot: params.pivot,
            distance_limits: params
                .distance_limits
                .unwrap_or(DistanceLimits::new(distance, distance)),
            angle_limits: params
                .angle_limits
                .unwrap_or(HoverAngleLimits::new(theta, theta)),
            horizontal_trans_limits: params.horizontal_trans_limits,
            vertical_trans_limits: params.vertical_trans_limits,
            enable_horiz_rot: params.enable_horiz_rot,
        };
        model.place(pose, phi, theta, distance);
        model
    }

    /// Install a hover model whose limits are windows around the given placement.
    pub(crate) fn setup_rel(params: &HoverRelParams, pose: &mut Tsr) -> Self {
        let mut model = Self::setup(
            &HoverParams {
                pos: params.pos,
                pivot: params.pivot,
                ..Default::default()
            },
            pose,
        );
        let (_, theta) = angles::rotation_to_angles(pose.rotation);
        let (distance_limits, angle_limits) = params.windows(model.distance(pose), theta);
        model.distance_limits = distance_limits;
        model.angle_limits = angle_limits;
        model.enforce(pose);
        model
    }

    /// The point the camera hovers around.
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    /// Distance from the camera to its pivot.
    pub fn distance(&self, pose: &Tsr) -> f32 {
        pose.translation.distance(self.pivot)
    }

    /// Distance limits.
    pub fn distance_limits(&self) -> DistanceLimits {
        self.distance_limits
    }

    /// Elevation limits.
    pub fn angle_limits(&self) -> HoverAngleLimits {
        self.angle_limits
    }

    /// Limits on the pivot's X coordinate.
    pub fn horizontal_trans_limits(&self) -> Option<TranslationLimits> {
        self.horizontal_trans_limits
    }

    /// Limits on the pivot's Y coordinate.
    pub fn vertical_trans_limits(&self) -> Option<TranslationLimits> {
        self.vertical_trans_limits
    }

    /// Whether the camera may rotate around the pivot.
    pub fn horizontal_rotation_enabled(&self) -> bool {
        self.enable_horiz_rot
    }

    /// Put the camera at the given angles around the pivot, applying every limit.
    ///
    /// The elevation decides the distance unless its bounds coincide, then `distance` is only
    /// clamped.
    fn place(&mut self, pose: &mut Tsr, phi: f32, theta: f32, distance: f32) {
        if let Some(limits) = self.horizontal_trans_limits {
            self.pivot.x = limits.clamp(self.pivot.x);
        }
        if let Some(limits) = self.vertical_trans_limits {
            self.pivot.y = limits.clamp(self.pivot.y);
        }

        let theta = self.angle_limits.clamp(theta);
        let DistanceLimits { min, max } = self.distance_limits;
        let distance = match self.angle_limits.fraction(theta) {
            Some(s) => math::lerp_exact(min, max, s),
            None => self.distance_limits.clamp(distance),
        };

        pose.rotation = angles::angles_to_rotation(math::wrap_two_pi(phi), theta);
        pose.translation = self.pivot - distance * (pose.rotation * AXIS_MZ);
    }

    /// Re-apply every limit to the current placement.
    pub(crate) fn enforce(&mut self, pose: &mut Tsr) {
        let (phi, theta) = angles::rotation_to_angles(pose.rotation);
        let distance = self.distance(pose);
        self.place(pose, phi, theta, distance);
    }

    pub(crate) fn rotate(&mut self, pose: &mut Tsr, phi: f32, theta: f32, absolute: bool) {
        let (current_phi, current_theta) = angles::rotation_to_angles(pose.rotation);
        let phi = match (self.enable_horiz_rot, absolute) {
            (false, _) => current_phi,
            (true, true) => phi,
            (true, false) => current_phi + phi,
        };
        let theta = if absolute { theta } else { current_theta + theta };
        let distance = self.distance(pose);
        self.place(pose, phi, theta, distance);
    }

    /// Zoom to `distance`, tilting along the elevation window to match.
    pub(crate) fn set_distance(&mut self, pose: &mut Tsr, distance: f32) {
        let (phi, mut theta) = angles::rotation_to_angles(pose.rotation);
        let DistanceLimits { min, max } = self.distance_limits;
        let distance = self.distance_limits.clamp(distance).max(0.0);
        if max - min > EPSILON {
            let s = (distance - min) / (max - min);
            let HoverAngleLimits { down, up } = self.angle_limits;
            theta = down - s * (down - up);
        }
        self.place(pose, phi, theta, distance);
    }

    /// Move the pivot. The camera follows, keeping its angles and distance.
    pub(crate) fn set_pivot_translation(&mut self, pose: &mut Tsr, pivot: Vec3) {
        let (phi, theta) = angles::rotation_to_angles(pose.rotation);
        let distance = self.distance(pose);
        self.pivot = pivot;
        self.place(pose, phi, theta, distance);
    }

    pub(crate) fn set_angle_limits(
        &mut self,
        pose: &mut Tsr,
        limits: HoverAngleLimits,
    ) -> Result<(), CameraError> {
        self.angle_limits = limits.validate()?;
        self.enforce(pose);
        Ok(())
    }

    pub(crate) fn set_distance_limits(
        &mut self,
        pose: &mut Tsr,
        limits: DistanceLimits,
    ) -> Result<(), CameraError> {
        self.distance_limits = limits.validate()?;
        self.enforce(pose);
        Ok(())
    }

    pub(crate) fn set_horizontal_trans_limits(
        &mut self,
        pose: &mut Tsr,
        limits: Option<TranslationLimits>,
    ) -> Result<(), CameraError> {
        self.horizontal_trans_limits = limits
            .map(|l| l.validate(LimitKind::HorizontalTranslation))
            .transpose()?;
        self.enforce(pose);
        Ok(())
    }

    pub(crate) fn set_vertical_trans_limits(
        &mut self,
        pose: &mut Tsr,
        limits: Option<TranslationLimits>,
    ) -> Result<(), CameraError> {
        self.vertical_trans_limits = limits
            .map(|l| l.validate(LimitKind::VerticalTranslation))
            .transpose()?;
        self.enforce(pose);
        Ok(())
    }

    pub(crate) fn switch_horiz_rotation(&mut self, enable: bool) {
        self.enable_horiz_rot = enable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hover(params: HoverParams) -> (HoverModel, Tsr) {
        let mut pose = Tsr::IDENTITY;
        let model = HoverModel::setup(&params.validate().unwrap(), &mut pose);
        (model, pose)
    }

    fn elevation(pose: &Tsr) -> f32 {
        angles::rotation_to_angles(pose.rotation).1
    }

    #[test]
    fn relative_setup_widens_limits_around_placement() {
        let mut pose = Tsr::IDENTITY;
        let model = HoverModel::setup_rel(
            &HoverRelParams {
                pos: Some(Vec3::new(0.0, -10.0, 0.0)),
                pivot: Vec3::ZERO,
                dist_interval: 4.0,
                t: 0.5,
                ..Default::default()
            },
            &mut pose,
        );
        let limits = model.distance_limits();
        assert!((limits.min - 8.0).abs() < 1e-4);
        assert!((limits.max - 12.0).abs() < 1e-4);
        assert!((model.distance(&pose) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn setup_without_limits_fixes_the_placement() {
        let (mut model, mut pose) = hover(HoverParams {
            pos: Some(Vec3::new(0.0, -6.0, 6.0)),
            pivot: Vec3::ZERO,
            ..Default::default()
        });
        let expected = 72f32.sqrt();
        assert!((model.distance(&pose) - expected).abs() < 1e-4);
        assert!((model.angle_limits().down + FRAC_PI_2 / 2.0).abs() < 1e-4);
        assert_eq!(model.angle_limits().down, model.angle_limits().up);

        model.rotate(&mut pose, 0.0, 0.3, false);
        model.set_distance(&mut pose, 100.0);
        assert!((model.distance(&pose) - expected).abs() < 1e-4);
        assert!((elevation(&pose) + FRAC_PI_2 / 2.0).abs() < 1e-4);
    }

    #[test]
    fn elevation_drives_distance() {
        let (mut model, mut pose) = hover(HoverParams {
            pos: Some(Vec3::new(0.0, -10.0, 0.0)),
            pivot: Vec3::ZERO,
            distance_limits: Some(DistanceLimits::new(10.0, 20.0)),
            angle_limits: Some(HoverAngleLimits::new(0.0, -1.0)),
            ..Default::default()
        });
        assert!((model.distance(&pose) - 10.0).abs() < 1e-4);

        model.rotate(&mut pose, 0.0, -0.5, true);
        assert!((elevation(&pose) + 0.5).abs() < 1e-4);
        assert!((model.distance(&pose) - 15.0).abs() < 1e-3);

        model.rotate(&mut pose, 0.0, -10.0, false);
        assert!((elevation(&pose) + 1.0).abs() < 1e-4);
        assert!((model.distance(&pose) - 20.0).abs() < 1e-3);

        model.set_distance(&mut pose, 12.5);
        assert!((elevation(&pose) + 0.25).abs() < 1e-4);
        assert!((model.distance(&pose) - 12.5).abs() < 1e-3);
    }

    #[test]
    fn horizontal_rotation_needs_to_be_enabled() {
        let (mut model, mut pose) = hover(HoverParams {
            pos: Some(Vec3::new(0.0, -10.0, 5.0)),
            pivot: Vec3::ZERO,
            ..Default::default()
        });
        let (phi, _) = angles::rotation_to_angles(pose.rotation);
        model.rotate(&mut pose, 1.0, 0.0, false);
        assert!(math::wrap_pi(angles::rotation_to_angles(pose.rotation).0 - phi).abs() < 1e-4);

        model.switch_horiz_rotation(true);
        model.rotate(&mut pose, 1.0, 0.0, true);
        assert!((angles::rotation_to_angles(pose.rotation).0 - 1.0).abs() < 1e-4);
        assert!(model.pivot().distance(Vec3::ZERO) < 1e-6);
    }

    #[test]
    fn translation_limits_clamp_the_pivot_on_the_ground() {
        let (mut model, mut pose) = hover(HoverParams {
            pos: Some(Vec3::new(0.0, -10.0, 5.0)),
            pivot: Vec3::ZERO,
            horizontal_trans_limits: Some(TranslationLimits::new(-1.0, 1.0)),
            vertical_trans_limits: Some(TranslationLimits::new(-2.0, 2.0)),
            ..Default::default()
        });
        let offset = pose.translation - model.pivot();
        model.set_pivot_translation(&mut pose, Vec3::new(5.0, -5.0, 0.5));
        assert!(model.pivot().distance(Vec3::new(1.0, -2.0, 0.5)) < 1e-6);
        assert!((pose.translation - model.pivot()).distance(offset) < 1e-4);
    }

    #[test]
    fn invalid_limits_leave_the_model_untouched() {
        let (mut model, mut pose) = hover(HoverParams {
            pos: Some(Vec3::new(0.0, -10.0, 5.0)),
            pivot: Vec3::ZERO,
            ..Default::default()
        });
        let (before_model, before_pose) = (model.clone(), pose);
        assert_eq!(
            model.set_angle_limits(&mut pose, HoverAngleLimits::new(-1.0, 0.0)),
            Err(CameraError::InvalidLimits(LimitKind::HoverAngle))
        );
        assert_eq!(model, before_model);
        assert_eq!(pose, before_pose);
    }
}
