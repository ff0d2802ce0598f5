//! The primary [`Component`] of the controller, [`CameraRig`].

use std::fmt;

use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_math::{Quat, Vec3};
use bevy_reflect::prelude::*;

use super::{
    eye::EyeModel,
    hover::HoverModel,
    params::{EyeParams, HoverParams, HoverRelParams, StaticParams, TargetParams},
    projection::Lens,
    target::TargetModel,
    velocity::Velocities,
};
use crate::{
    angles,
    error::CameraError,
    limits::{
        DistanceLimits, HorizontalRotationLimits, HoverAngleLimits, PivotLimits,
        TranslationLimits, VerticalRotationLimits,
    },
    math::{self, AXIS_MZ, AXIS_Z},
    tsr::Tsr,
};

const ORBITING: &str = "TARGET or HOVER";
const ROTATING: &str = "TARGET, EYE or HOVER";

/// The movement model of a camera, without its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveStyleKind {
    /// Not interactive.
    Static,
    /// Orbits a pivot.
    Target,
    /// Free look.
    Eye,
    /// Hovers over a ground plane.
    Hover,
}

impl fmt::Display for MoveStyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveStyleKind::Static => "STATIC",
            MoveStyleKind::Target => "TARGET",
            MoveStyleKind::Eye => "EYE",
            MoveStyleKind::Hover => "HOVER",
        };
        f.write_str(name)
    }
}

/// The active movement model of a camera, carrying that model's state.
///
/// Installing a model replaces the previous one, pivot and limits included.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub enum MoveStyle {
    /// A camera that only moves when told to.
    Static,
    /// A camera orbiting a pivot.
    Target(TargetModel),
    /// A free-look camera.
    Eye(EyeModel),
    /// A camera hovering over a ground plane.
    Hover(HoverModel),
}

impl MoveStyle {
    /// Which movement model this is.
    pub fn kind(&self) -> MoveStyleKind {
        match self {
            MoveStyle::Static => MoveStyleKind::Static,
            MoveStyle::Target(_) => MoveStyleKind::Target,
            MoveStyle::Eye(_) => MoveStyleKind::Eye,
            MoveStyle::Hover(_) => MoveStyleKind::Hover,
        }
    }
}

/// Camera attributes: the movement model and its state, velocities, vertical axis and lens.
///
/// The pose itself is not stored here. Every operation takes the camera's current [`Tsr`] and
/// updates it in place; [`CameraControl`](crate::api::CameraControl) wraps these operations so
/// that a failed call changes nothing and a successful one is committed and announced.
///
/// No movement model is installed until one of the `*_setup` operations runs.
#[derive(Debug, Clone, PartialEq, Reflect, Component)]
pub struct CameraRig {
    move_style: Option<MoveStyle>,
    velocity: Velocities,
    vertical_axis: Vec3,
    lens: Lens,
    /// The camera renders a reflection, projection changes use the reflected update hook.
    pub reflected: bool,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            move_style: None,
            velocity: Velocities::default(),
            vertical_axis: AXIS_Z,
            lens: Lens::default(),
            reflected: false,
        }
    }
}

impl CameraRig {
    /// Use the given lens.
    #[must_use = "with_lens returns a modified CameraRig"]
    pub fn with_lens(self, lens: Lens) -> Self {
        Self { lens, ..self }
    }

    /// Use the given vertical axis for up correction and look-at.
    ///
    /// TARGET and HOVER orbits always keep world Z as their vertical.
    #[must_use = "with_vertical_axis returns a modified CameraRig"]
    pub fn with_vertical_axis(self, vertical_axis: Vec3) -> Self {
        Self {
            vertical_axis: vertical_axis.try_normalize().unwrap_or(AXIS_Z),
            ..self
        }
    }

    /// Use the given velocities, clamped into their valid ranges.
    #[must_use = "with_velocities returns a modified CameraRig"]
    pub fn with_velocities(self, velocity: Velocities) -> Self {
        Self {
            velocity: velocity.clamped(),
            ..self
        }
    }

    /// The installed movement model and its state.
    pub fn move_style(&self) -> Option<&MoveStyle> {
        self.move_style.as_ref()
    }

    /// The lens.
    pub fn lens(&self) -> &Lens {
        &self.lens
    }

    fn kind(&self) -> Option<MoveStyleKind> {
        self.move_style.as_ref().map(MoveStyle::kind)
    }

    fn wrong_model(&self, expected: &'static str) -> CameraError {
        CameraError::WrongCameraModel {
            expected,
            found: self.kind(),
        }
    }

    fn require_static(&self) -> Result<(), CameraError> {
        match &self.move_style {
            Some(MoveStyle::Static) => Ok(()),
            _ => Err(self.wrong_model("STATIC")),
        }
    }

    fn target(&self) -> Result<&TargetModel, CameraError> {
        match &self.move_style {
            Some(MoveStyle::Target(target)) => Ok(target),
            _ => Err(self.wrong_model("TARGET")),
        }
    }

    fn eye(&self) -> Result<&EyeModel, CameraError> {
        match &self.move_style {
            Some(MoveStyle::Eye(eye)) => Ok(eye),
            _ => Err(self.wrong_model("EYE")),
        }
    }

    fn hover(&self) -> Result<&HoverModel, CameraError> {
        match &self.move_style {
            Some(MoveStyle::Hover(hover)) => Ok(hover),
            _ => Err(self.wrong_model("HOVER")),
        }
    }

    /// Run `op` on the target model, then let an orthographic lens follow the new distance.
    fn update_target<T>(
        &mut self,
        pose: &mut Tsr,
        op: impl FnOnce(&mut TargetModel, &mut Tsr) -> Result<T, CameraError>,
    ) -> Result<T, CameraError> {
        let found = self.kind();
        let Some(MoveStyle::Target(target)) = &mut self.move_style else {
            return Err(CameraError::WrongCameraModel {
                expected: "TARGET",
                found,
            });
        };
        let out = op(target, pose)?;
        self.sync_lens(pose);
        Ok(out)
    }

    fn update_eye<T>(
        &mut self,
        pose: &mut Tsr,
        op: impl FnOnce(&mut EyeModel, &mut Tsr) -> Result<T, CameraError>,
    ) -> Result<T, CameraError> {
        let found = self.kind();
        let Some(MoveStyle::Eye(eye)) = &mut self.move_style else {
            return Err(CameraError::WrongCameraModel {
                expected: "EYE",
                found,
            });
        };
        op(eye, pose)
    }

    fn update_hover<T>(
        &mut self,
        pose: &mut Tsr,
        op: impl FnOnce(&mut HoverModel, &mut Tsr) -> Result<T, CameraError>,
    ) -> Result<T, CameraError> {
        let found = self.kind();
        let Some(MoveStyle::Hover(hover)) = &mut self.move_style else {
            return Err(CameraError::WrongCameraModel {
                expected: "HOVER",
                found,
            });
        };
        let out = op(hover, pose)?;
        self.sync_lens(pose);
        Ok(out)
    }

    fn pivot_distance(&self, pose: &Tsr) -> Option<f32> {
        match &self.move_style {
            Some(MoveStyle::Target(target)) => Some(target.distance(pose)),
            Some(MoveStyle::Hover(hover)) => Some(hover.distance(pose)),
            _ => None,
        }
    }

    fn sync_lens(&mut self, pose: &Tsr) {
        if let Some(distance) = self.pivot_distance(pose) {
            self.lens.follow_distance(distance);
        }
    }

    fn install(&mut self, pose: &Tsr, move_style: MoveStyle) {
        let kind = move_style.kind();
        self.move_style = Some(move_style);
        let distance = self.pivot_distance(pose);
        self.lens.init_ortho(distance);
        debug!("Installed {kind} camera move style");
    }

    // STATIC

    /// Install the STATIC model: move to `pos` and look at `look_at`, either kept when `None`.
    pub fn static_setup(
        &mut self,
        pose: &mut Tsr,
        params: &StaticParams,
    ) -> Result<(), CameraError> {
        self.place_static(pose, params.pos.unwrap_or(pose.translation), params.look_at);
        self.install(pose, MoveStyle::Static);
        Ok(())
    }

    fn place_static(&self, pose: &mut Tsr, pos: Vec3, look_at: Option<Vec3>) {
        pose.translation = pos;
        if let Some(look_at) = look_at {
            match angles::look_at_rotation(pos, look_at, self.vertical_axis) {
                Some(rotation) => pose.rotation = rotation,
                None => warn_once!("Static camera asked to look at its own position."),
            }
        }
    }

    /// Move a STATIC camera to `pos`, looking at `look_at` or keeping its orientation.
    pub fn static_set_look_at(
        &mut self,
        pose: &mut Tsr,
        pos: Vec3,
        look_at: Option<Vec3>,
    ) -> Result<(), CameraError> {
        self.require_static()?;
        self.place_static(pose, pos, look_at);
        Ok(())
    }

    /// Set the orientation of a STATIC camera. The quaternion is renormalized.
    pub fn static_set_rotation(
        &mut self,
        pose: &mut Tsr,
        rotation: Quat,
    ) -> Result<(), CameraError> {
        self.require_static()?;
        pose.set_rotation(rotation);
        Ok(())
    }

    /// The orientation of a STATIC camera.
    pub fn static_get_rotation(&self, pose: &Tsr) -> Result<Quat, CameraError> {
        self.require_static()?;
        Ok(pose.rotation)
    }

    // EYE

    /// Install the EYE model.
    pub fn eye_setup(&mut self, pose: &mut Tsr, params: &EyeParams) -> Result<(), CameraError> {
        let params = params.validate()?;
        let eye = EyeModel::setup(&params, pose, self.vertical_axis);
        self.install(pose, MoveStyle::Eye(eye));
        Ok(())
    }

    /// Move an EYE camera to `pos`, looking at `look_at` or keeping its orientation.
    pub fn eye_set_look_at(
        &mut self,
        pose: &mut Tsr,
        pos: Vec3,
        look_at: Option<Vec3>,
    ) -> Result<(), CameraError> {
        let axis = self.vertical_axis;
        self.update_eye(pose, |eye, pose| {
            eye.set_look_at(pose, pos, look_at, axis);
            Ok(())
        })
    }

    /// Replace or clear the elevation limits of an EYE camera.
    pub fn eye_set_vertical_limits(
        &mut self,
        pose: &mut Tsr,
        limits: Option<VerticalRotationLimits>,
    ) -> Result<(), CameraError> {
        self.update_eye(pose, |eye, pose| eye.set_vertical_limits(pose, limits))
    }

    /// Elevation limits of an EYE camera.
    pub fn eye_get_vertical_limits(
        &self,
        camera_space: bool,
    ) -> Result<Option<VerticalRotationLimits>, CameraError> {
        Ok(self.eye()?.vertical_limits(camera_space))
    }

    /// Replace or clear the azimuth limits of an EYE camera.
    pub fn eye_set_horizontal_limits(
        &mut self,
        pose: &mut Tsr,
        limits: Option<HorizontalRotationLimits>,
    ) -> Result<(), CameraError> {
        self.update_eye(pose, |eye, pose| eye.set_horizontal_limits(pose, limits))
    }

    /// Azimuth limits of an EYE camera.
    pub fn eye_get_horizontal_limits(
        &self,
        camera_space: bool,
    ) -> Result<Option<HorizontalRotationLimits>, CameraError> {
        Ok(self.eye()?.horizontal_limits(camera_space))
    }

    // TARGET

    /// Install the TARGET model.
    pub fn target_setup(
        &mut self,
        pose: &mut Tsr,
        params: &TargetParams,
    ) -> Result<(), CameraError> {
        let params = params.validate()?;
        let target = TargetModel::setup(&params, pose, self.vertical_axis);
        self.install(pose, MoveStyle::Target(target));
        Ok(())
    }

    /// Move a TARGET camera along its view axis to `distance` from the pivot.
    pub fn target_set_distance(&mut self, pose: &mut Tsr, distance: f32) -> Result<(), CameraError> {
        self.update_target(pose, |target, pose| {
            target.set_distance(pose, distance);
            Ok(())
        })
    }

    /// Distance from a TARGET camera to its pivot.
    pub fn target_get_distance(&self, pose: &Tsr) -> Result<f32, CameraError> {
        Ok(self.target()?.distance(pose))
    }

    /// Pan a TARGET camera and its pivot in screen space. Does nothing unless panning is enabled.
    pub fn target_pan_pivot(
        &mut self,
        pose: &mut Tsr,
        horizontal: f32,
        vertical: f32,
    ) -> Result<(), CameraError> {
        self.update_target(pose, |target, pose| {
            target.pan_pivot(pose, horizontal, vertical);
            Ok(())
        })
    }

    /// The pivot of a TARGET camera.
    pub fn target_get_pivot(&self) -> Result<Vec3, CameraError> {
        Ok(self.target()?.pivot())
    }

    /// Move a TARGET camera and its pivot, either kept when `None`, and look at the pivot.
    pub fn target_set_trans_pivot(
        &mut self,
        pose: &mut Tsr,
        translation: Option<Vec3>,
        pivot: Option<Vec3>,
    ) -> Result<(), CameraError> {
        let axis = self.vertical_axis;
        self.update_target(pose, |target, pose| {
            target.set_trans_pivot(pose, translation, pivot, axis);
            Ok(())
        })
    }

    /// Move the pivot of a TARGET camera. The camera moves in parallel.
    pub fn target_set_pivot_translation(
        &mut self,
        pose: &mut Tsr,
        pivot: Vec3,
    ) -> Result<(), CameraError> {
        self.update_target(pose, |target, pose| {
            target.move_pivot(pose, pivot);
            Ok(())
        })
    }

    /// Pivot a TARGET camera on `center` and back off until a sphere of `radius` fills the view.
    ///
    /// An orthographic camera keeps its distance and changes its scale instead.
    pub fn target_zoom_sphere(
        &mut self,
        pose: &mut Tsr,
        center: Vec3,
        radius: f32,
    ) -> Result<(), CameraError> {
        let axis = self.vertical_axis;
        let mut lens = self.lens;
        self.update_target(pose, |target, pose| {
            target.zoom_sphere(pose, &mut lens, center, radius, axis)
        })?;
        self.lens = lens;
        Ok(())
    }

    /// Replace or clear the distance limits of a TARGET camera.
    pub fn target_set_distance_limits(
        &mut self,
        pose: &mut Tsr,
        limits: Option<DistanceLimits>,
    ) -> Result<(), CameraError> {
        self.update_target(pose, |target, pose| target.set_distance_limits(pose, limits))
    }

    /// Distance limits of a TARGET camera.
    pub fn target_get_distance_limits(&self) -> Result<Option<DistanceLimits>, CameraError> {
        Ok(self.target()?.distance_limits())
    }

    /// Replace or clear the elevation limits of a TARGET camera.
    pub fn target_set_vertical_limits(
        &mut self,
        pose: &mut Tsr,
        limits: Option<VerticalRotationLimits>,
    ) -> Result<(), CameraError> {
        self.update_target(pose, |target, pose| target.set_vertical_limits(pose, limits))
    }

    /// Elevation limits of a TARGET camera.
    pub fn target_get_vertical_limits(
        &self,
        camera_space: bool,
    ) -> Result<Option<VerticalRotationLimits>, CameraError> {
        Ok(self.target()?.vertical_limits(camera_space))
    }

    /// Replace or clear the azimuth limits of a TARGET camera.
    pub fn target_set_horizontal_limits(
        &mut self,
        pose: &mut Tsr,
        limits: Option<HorizontalRotationLimits>,
    ) -> Result<(), CameraError> {
        self.update_target(pose, |target, pose| {
            target.set_horizontal_limits(pose, limits)
        })
    }

    /// Azimuth limits of a TARGET camera.
    pub fn target_get_horizontal_limits(
        &self,
        camera_space: bool,
    ) -> Result<Option<HorizontalRotationLimits>, CameraError> {
        Ok(self.target()?.horizontal_limits(camera_space))
    }

    /// Replace or clear the pivot height limits of a TARGET camera.
    pub fn target_set_pivot_limits(
        &mut self,
        pose: &mut Tsr,
        limits: Option<PivotLimits>,
    ) -> Result<(), CameraError> {
        self.update_target(pose, |target, pose| target.set_pivot_limits(pose, limits))
    }

    /// Pivot height limits of a TARGET camera.
    pub fn target_get_pivot_limits(&self) -> Result<Option<PivotLimits>, CameraError> {
        Ok(self.target()?.pivot_limits())
    }

    /// Enable or disable panning of a TARGET camera.
    pub fn target_switch_panning(&mut self, enable: bool) -> Result<(), CameraError> {
        let found = self.kind();
        match &mut self.move_style {
            Some(MoveStyle::Target(target)) => {
                target.switch_panning(enable);
                Ok(())
            }
            _ => Err(CameraError::WrongCameraModel {
                expected: "TARGET",
                found,
            }),
        }
    }

    // HOVER

    /// Install the HOVER model.
    pub fn hover_setup(&mut self, pose: &mut Tsr, params: &HoverParams) -> Result<(), CameraError> {
        let params = params.validate()?;
        let hover = HoverModel::setup(&params, pose);
        self.install(pose, MoveStyle::Hover(hover));
        Ok(())
    }

    /// Install the HOVER model with limits spanning windows around the given placement.
    pub fn hover_setup_rel(
        &mut self,
        pose: &mut Tsr,
        params: &HoverRelParams,
    ) -> Result<(), CameraError> {
        let hover = HoverModel::setup_rel(params, pose);
        self.install(pose, MoveStyle::Hover(hover));
        Ok(())
    }

    /// Move the pivot of a HOVER camera. The camera moves in parallel.
    pub fn hover_set_pivot_translation(
        &mut self,
        pose: &mut Tsr,
        pivot: Vec3,
    ) -> Result<(), CameraError> {
        self.update_hover(pose, |hover, pose| {
            hover.set_pivot_translation(pose, pivot);
            Ok(())
        })
    }

    /// The pivot of a HOVER camera.
    pub fn hover_get_pivot(&self) -> Result<Vec3, CameraError> {
        Ok(self.hover()?.pivot())
    }

    /// Distance from a HOVER camera to its pivot.
    pub fn hover_get_distance(&self, pose: &Tsr) -> Result<f32, CameraError> {
        Ok(self.hover()?.distance(pose))
    }

    /// Zoom a HOVER camera to `distance`, following its hover curve.
    pub fn hover_set_distance(&mut self, pose: &mut Tsr, distance: f32) -> Result<(), CameraError> {
        self.update_hover(pose, |hover, pose| {
            hover.set_distance(pose, distance);
            Ok(())
        })
    }

    /// Replace the elevation limits of a HOVER camera.
    pub fn hover_set_vertical_limits(
        &mut self,
        pose: &mut Tsr,
        limits: HoverAngleLimits,
    ) -> Result<(), CameraError> {
        self.update_hover(pose, |hover, pose| hover.set_angle_limits(pose, limits))
    }

    /// Elevation limits of a HOVER camera.
    pub fn hover_get_vertical_limits(&self) -> Result<HoverAngleLimits, CameraError> {
        Ok(self.hover()?.angle_limits())
    }

    /// Replace the distance limits of a HOVER camera.
    pub fn hover_set_distance_limits(
        &mut self,
        pose: &mut Tsr,
        limits: DistanceLimits,
    ) -> Result<(), CameraError> {
        self.update_hover(pose, |hover, pose| hover.set_distance_limits(pose, limits))
    }

    /// Distance limits of a HOVER camera.
    pub fn hover_get_distance_limits(&self) -> Result<DistanceLimits, CameraError> {
        Ok(self.hover()?.distance_limits())
    }

    /// Replace or clear the limits on the pivot's Y coordinate.
    pub fn hover_set_vert_trans_limits(
        &mut self,
        pose: &mut Tsr,
        limits: Option<TranslationLimits>,
    ) -> Result<(), CameraError> {
        self.update_hover(pose, |hover, pose| {
            hover.set_vertical_trans_limits(pose, limits)
        })
    }

    /// Limits on the pivot's Y coordinate.
    pub fn hover_get_vert_trans_limits(&self) -> Result<Option<TranslationLimits>, CameraError> {
        Ok(self.hover()?.vertical_trans_limits())
    }

    /// Replace or clear the limits on the pivot's X coordinate.
    pub fn hover_set_horiz_trans_limits(
        &mut self,
        pose: &mut Tsr,
        limits: Option<TranslationLimits>,
    ) -> Result<(), CameraError> {
        self.update_hover(pose, |hover, pose| {
            hover.set_horizontal_trans_limits(pose, limits)
        })
    }

    /// Limits on the pivot's X coordinate.
    pub fn hover_get_horiz_trans_limits(&self) -> Result<Option<TranslationLimits>, CameraError> {
        Ok(self.hover()?.horizontal_trans_limits())
    }

    /// Enable or disable rotation of a HOVER camera around its pivot.
    pub fn hover_switch_horiz_rotation(&mut self, enable: bool) -> Result<(), CameraError> {
        let found = self.kind();
        match &mut self.move_style {
            Some(MoveStyle::Hover(hover)) => {
                hover.switch_horiz_rotation(enable);
                Ok(())
            }
            _ => Err(CameraError::WrongCameraModel {
                expected: "HOVER",
                found,
            }),
        }
    }

    // Any model

    /// The installed movement model, `None` before the first setup.
    pub fn get_move_style(&self) -> Option<MoveStyleKind> {
        self.kind()
    }

    /// Move the camera to `translation`. TARGET and HOVER cameras carry their pivot along.
    pub fn set_translation(&mut self, pose: &mut Tsr, translation: Vec3) -> Result<(), CameraError> {
        let delta = translation - pose.translation;
        match &self.move_style {
            Some(MoveStyle::Target(target)) => {
                let pivot = target.pivot() + delta;
                self.target_set_pivot_translation(pose, pivot)
            }
            Some(MoveStyle::Hover(hover)) => {
                let pivot = hover.pivot() + delta;
                self.hover_set_pivot_translation(pose, pivot)
            }
            _ => {
                pose.translation = translation;
                Ok(())
            }
        }
    }

    /// The camera position.
    pub fn get_translation(&self, pose: &Tsr) -> Vec3 {
        pose.translation
    }

    /// Rotate a TARGET, EYE or HOVER camera by `(phi, theta)`, or to it when `absolute`.
    pub fn rotate_camera(
        &mut self,
        pose: &mut Tsr,
        phi: f32,
        theta: f32,
        absolute: bool,
    ) -> Result<(), CameraError> {
        match self.kind() {
            Some(MoveStyleKind::Target) => self.update_target(pose, |target, pose| {
                target.rotate(pose, phi, theta, absolute);
                Ok(())
            }),
            Some(MoveStyleKind::Eye) => self.update_eye(pose, |eye, pose| {
                eye.rotate(pose, phi, theta, absolute);
                Ok(())
            }),
            Some(MoveStyleKind::Hover) => self.update_hover(pose, |hover, pose| {
                hover.rotate(pose, phi, theta, absolute);
                Ok(())
            }),
            Some(MoveStyleKind::Static) | None => Err(self.wrong_model(ROTATING)),
        }
    }

    /// The `(phi, theta)` camera angles of the pose.
    pub fn get_camera_angles(&self, pose: &Tsr) -> (f32, f32) {
        angles::rotation_to_angles(pose.rotation)
    }

    /// The unit view direction of the pose.
    pub fn get_view_vector(&self, pose: &Tsr) -> Vec3 {
        math::quat_to_dir(pose.rotation, AXIS_MZ)
    }

    /// Whether the camera looks upward, or level.
    pub fn is_look_up(&self, pose: &Tsr) -> bool {
        self.get_view_vector(pose).z >= 0.0
    }

    /// Replace the velocities, clamped into their valid ranges.
    pub fn set_velocities(&mut self, velocity: Velocities) {
        self.velocity = velocity.clamped();
    }

    /// The velocities.
    pub fn get_velocities(&self) -> Velocities {
        self.velocity
    }

    /// Replace the vertical axis. A zero axis is ignored.
    ///
    /// The axis steers look-at during setup and [`CameraRig::correct_up`]. TARGET and HOVER
    /// orbits always keep world Z as their vertical, so the next rotation or limit enforcement
    /// on those models drops any roll the axis introduced.
    pub fn set_vertical_axis(&mut self, axis: Vec3) {
        match axis.try_normalize() {
            Some(axis) => self.vertical_axis = axis,
            None => warn_once!("Ignoring a zero camera vertical axis."),
        }
    }

    /// The vertical axis used for up correction and look-at. Orbits ignore it.
    pub fn get_vertical_axis(&self) -> Vec3 {
        self.vertical_axis
    }

    /// Roll the camera about its view axis so its up vector lines up with `axis`, or with the
    /// camera's vertical axis when `None`.
    pub fn correct_up(&self, pose: &mut Tsr, axis: Option<Vec3>, strict: bool) {
        let axis = axis.unwrap_or(self.vertical_axis);
        pose.rotation = angles::correct_up(pose.rotation, axis, strict);
    }

    /// Vertical field of view of a perspective camera.
    pub fn get_fov(&self) -> Result<f32, CameraError> {
        self.lens.fov()
    }

    /// Change the vertical field of view of a perspective camera.
    pub fn set_fov(&mut self, fov: f32) -> Result<(), CameraError> {
        self.lens.set_fov(fov)
    }

    /// View volume height of an orthographic camera.
    pub fn get_ortho_scale(&self) -> Result<f32, CameraError> {
        self.lens.ortho_scale()
    }

    /// Change the view volume height of an orthographic camera.
    ///
    /// On TARGET and HOVER cameras the scale keeps following the pivot distance afterwards.
    pub fn set_ortho_scale(&mut self, pose: &Tsr, scale: f32) -> Result<(), CameraError> {
        let distance = self.pivot_distance(pose);
        self.lens.set_ortho_scale(scale, distance)
    }

    /// Whether the camera has an orthographic lens.
    pub fn is_ortho_camera(&self) -> bool {
        self.lens.is_orthographic()
    }

    /// Whether the camera has distance limits. HOVER cameras always do.
    pub fn has_distance_limits(&self) -> bool {
        match &self.move_style {
            Some(MoveStyle::Target(target)) => target.distance_limits().is_some(),
            Some(MoveStyle::Hover(_)) => true,
            _ => false,
        }
    }

    /// Whether the camera has elevation limits. HOVER cameras always do.
    pub fn has_vertical_rot_limits(&self) -> bool {
        match &self.move_style {
            Some(MoveStyle::Target(target)) => target.has_vertical_limits(),
            Some(MoveStyle::Eye(eye)) => eye.has_vertical_limits(),
            Some(MoveStyle::Hover(_)) => true,
            _ => false,
        }
    }

    /// Whether the camera has azimuth limits.
    pub fn has_horizontal_rot_limits(&self) -> bool {
        match &self.move_style {
            Some(MoveStyle::Target(target)) => target.has_horizontal_limits(),
            Some(MoveStyle::Eye(eye)) => eye.has_horizontal_limits(),
            _ => false,
        }
    }

    /// Whether a HOVER camera limits its pivot's Y coordinate.
    pub fn has_vertical_trans_limits(&self) -> bool {
        self.hover()
            .is_ok_and(|hover| hover.vertical_trans_limits().is_some())
    }

    /// Whether a HOVER camera limits its pivot's X coordinate.
    pub fn has_horizontal_trans_limits(&self) -> bool {
        self.hover()
            .is_ok_and(|hover| hover.horizontal_trans_limits().is_some())
    }

    /// Distance to the pivot of a TARGET or HOVER camera.
    pub fn get_distance(&self, pose: &Tsr) -> Result<f32, CameraError> {
        self.pivot_distance(pose)
            .ok_or_else(|| self.wrong_model(ORBITING))
    }

    /// Pivot of a TARGET or HOVER camera.
    pub fn get_pivot(&self) -> Result<Vec3, CameraError> {
        match &self.move_style {
            Some(MoveStyle::Target(target)) => Ok(target.pivot()),
            Some(MoveStyle::Hover(hover)) => Ok(hover.pivot()),
            _ => Err(self.wrong_model(ORBITING)),
        }
    }

    /// Distance limits of a TARGET or HOVER camera.
    pub fn get_distance_limits(&self) -> Result<Option<DistanceLimits>, CameraError> {
        match &self.move_style {
            Some(MoveStyle::Target(target)) => Ok(target.distance_limits()),
            Some(MoveStyle::Hover(hover)) => Ok(Some(hover.distance_limits())),
            _ => Err(self.wrong_model(ORBITING)),
        }
    }
}
