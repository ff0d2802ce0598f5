//! The operation surface used by application code: [`CameraControl`] drives the
//! [`CameraRig`] of any [`Object3d`] and notifies the scene through [`SceneHooks`].
//!
//! Every mutating call runs on a staged copy of the rig and pose. Only a successful call is
//! written back, after which the physics hook runs if the pose moved (setups always report),
//! followed by the projection hook if the lens changed. A rejected call is logged and leaves the object untouched.

use bevy_ecs::entity::Entity;
use bevy_log::prelude::*;
use bevy_math::{Quat, Vec3};

use crate::{
    controller::{
        component::{CameraRig, MoveStyleKind},
        params::{EyeParams, HoverParams, HoverRelParams, StaticParams, TargetParams},
        velocity::Velocities,
    },
    error::CameraError,
    limits::{
        DistanceLimits, HorizontalRotationLimits, HoverAngleLimits, PivotLimits,
        TranslationLimits, VerticalRotationLimits,
    },
    tsr::Tsr,
};

/// A scene object with a pose, and a camera rig if it is a camera.
pub trait Object3d {
    /// The entity this object is known by to the scene hooks.
    fn entity(&self) -> Entity;
    /// The current pose.
    fn pose(&self) -> Tsr;
    /// Commit a new pose.
    fn set_pose(&mut self, pose: Tsr);
    /// The camera rig, `None` for objects that are not cameras.
    fn rig(&self) -> Option<&CameraRig>;
    /// The camera rig, `None` for objects that are not cameras.
    fn rig_mut(&mut self) -> Option<&mut CameraRig>;

    /// Whether this object is a camera.
    fn is_camera(&self) -> bool {
        self.rig().is_some()
    }
}

/// Collaborators notified after a camera operation is committed. Hooks cannot fail.
pub trait SceneHooks {
    /// The pose of `entity` changed.
    fn sync_transform(&mut self, entity: Entity);
    /// The lens of `entity` changed.
    fn update_projection(&mut self, entity: Entity);
    /// The lens of `entity`, a reflection camera, changed.
    fn update_projection_reflected(&mut self, entity: Entity);
}

impl SceneHooks for () {
    fn sync_transform(&mut self, _: Entity) {}
    fn update_projection(&mut self, _: Entity) {}
    fn update_projection_reflected(&mut self, _: Entity) {}
}

/// An owned [`Object3d`], for driving a camera without an ECS world.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraObject {
    /// Handle passed to the scene hooks.
    pub entity: Entity,
    /// Current pose.
    pub pose: Tsr,
    /// Camera rig, `None` for a plain object.
    pub rig: Option<CameraRig>,
}

impl CameraObject {
    /// A camera at the identity pose.
    pub fn camera(rig: CameraRig) -> Self {
        Self {
            entity: Entity::PLACEHOLDER,
            pose: Tsr::IDENTITY,
            rig: Some(rig),
        }
    }

    /// An object that is not a camera.
    pub fn plain(pose: Tsr) -> Self {
        Self {
            entity: Entity::PLACEHOLDER,
            pose,
            rig: None,
        }
    }

    /// Use the given entity handle.
    #[must_use = "with_entity returns a modified CameraObject"]
    pub fn with_entity(self, entity: Entity) -> Self {
        Self { entity, ..self }
    }
}

impl Object3d for CameraObject {
    fn entity(&self) -> Entity {
        self.entity
    }

    fn pose(&self) -> Tsr {
        self.pose
    }

    fn set_pose(&mut self, pose: Tsr) {
        self.pose = pose;
    }

    fn rig(&self) -> Option<&CameraRig> {
        self.rig.as_ref()
    }

    fn rig_mut(&mut self) -> Option<&mut CameraRig> {
        self.rig.as_mut()
    }
}

/// Runs camera operations against objects and reports to the scene hooks.
pub struct CameraControl<'h, H: SceneHooks> {
    hooks: &'h mut H,
}

impl<'h, H: SceneHooks> CameraControl<'h, H> {
    /// Control cameras, notifying `hooks` of committed changes.
    pub fn new(hooks: &'h mut H) -> Self {
        Self { hooks }
    }

    /// The scene hooks.
    pub fn hooks(&mut self) -> &mut H {
        self.hooks
    }

    fn mutate<O: Object3d, T>(
        &mut self,
        name: &'static str,
        object: &mut O,
        always_project: bool,
        op: impl FnOnce(&mut CameraRig, &mut Tsr) -> Result<T, CameraError>,
    ) -> Result<T, CameraError> {
        let result = self.commit(object, always_project, op);
        if let Err(err) = &result {
            error!("{name}(): {err}");
        }
        result
    }

    fn commit<O: Object3d, T>(
        &mut self,
        object: &mut O,
        always_project: bool,
        op: impl FnOnce(&mut CameraRig, &mut Tsr) -> Result<T, CameraError>,
    ) -> Result<T, CameraError> {
        let entity = object.entity();
        let original = object.pose();
        let mut pose = original;
        let current = object.rig().ok_or(CameraError::WrongCameraObject)?;
        let mut staged = current.clone();
        let out = op(&mut staged, &mut pose)?;

        let project = always_project || staged.lens() != current.lens();
        let reflected = staged.reflected;
        if let Some(rig) = object.rig_mut() {
            *rig = staged;
        }

        if always_project || pose != original {
            object.set_pose(pose);
            trace!("Committed camera pose {pose:?}");
            self.hooks.sync_transform(entity);
        }
        if project {
            if reflected {
                self.hooks.update_projection_reflected(entity);
            } else {
                self.hooks.update_projection(entity);
            }
        }
        Ok(out)
    }

    fn query<O: Object3d, T>(
        &self,
        name: &'static str,
        object: &O,
        op: impl FnOnce(&CameraRig, &Tsr) -> Result<T, CameraError>,
    ) -> Result<T, CameraError> {
        let result = object
            .rig()
            .ok_or(CameraError::WrongCameraObject)
            .and_then(|rig| op(rig, &object.pose()));
        if let Err(err) = &result {
            error!("{name}(): {err}");
        }
        result
    }

    // Setup

    /// See [`CameraRig::static_setup`].
    pub fn static_setup<O: Object3d>(
        &mut self,
        object: &mut O,
        params: &StaticParams,
    ) -> Result<(), CameraError> {
        self.mutate("static_setup", object, true, |rig, pose| {
            rig.static_setup(pose, params)
        })
    }

    /// See [`CameraRig::eye_setup`].
    pub fn eye_setup<O: Object3d>(
        &mut self,
        object: &mut O,
        params: &EyeParams,
    ) -> Result<(), CameraError> {
        self.mutate("eye_setup", object, true, |rig, pose| rig.eye_setup(pose, params))
    }

    /// See [`CameraRig::target_setup`].
    pub fn target_setup<O: Object3d>(
        &mut self,
        object: &mut O,
        params: &TargetParams,
    ) -> Result<(), CameraError> {
        self.mutate("target_setup", object, true, |rig, pose| {
            rig.target_setup(pose, params)
        })
    }

    /// See [`CameraRig::hover_setup`].
    pub fn hover_setup<O: Object3d>(
        &mut self,
        object: &mut O,
        params: &HoverParams,
    ) -> Result<(), CameraError> {
        self.mutate("hover_setup", object, true, |rig, pose| {
            rig.hover_setup(pose, params)
        })
    }

    /// See [`CameraRig::hover_setup_rel`].
    pub fn hover_setup_rel<O: Object3d>(
        &mut self,
        object: &mut O,
        params: &HoverRelParams,
    ) -> Result<(), CameraError> {
        self.mutate("hover_setup_rel", object, true, |rig, pose| {
            rig.hover_setup_rel(pose, params)
        })
    }

    // STATIC

    /// See [`CameraRig::static_set_look_at`].
    pub fn static_set_look_at<O: Object3d>(
        &mut self,
        object: &mut O,
        pos: Vec3,
        look_at: Option<Vec3>,
    ) -> Result<(), CameraError> {
        self.mutate("static_set_look_at", object, false, |rig, pose| {
            rig.static_set_look_at(pose, pos, look_at)
        })
    }

    /// See [`CameraRig::static_set_rotation`].
    pub fn static_set_rotation<O: Object3d>(
        &mut self,
        object: &mut O,
        rotation: Quat,
    ) -> Result<(), CameraError> {
        self.mutate("static_set_rotation", object, false, |rig, pose| {
            rig.static_set_rotation(pose, rotation)
        })
    }

    /// See [`CameraRig::static_get_rotation`].
    pub fn static_get_rotation<O: Object3d>(&self, object: &O) -> Result<Quat, CameraError> {
        self.query("static_get_rotation", object, |rig, pose| {
            rig.static_get_rotation(pose)
        })
    }

    // EYE

    /// See [`CameraRig::eye_set_look_at`].
    pub fn eye_set_look_at<O: Object3d>(
        &mut self,
        object: &mut O,
        pos: Vec3,
        look_at: Option<Vec3>,
    ) -> Result<(), CameraError> {
        self.mutate("eye_set_look_at", object, false, |rig, pose| {
            rig.eye_set_look_at(pose, pos, look_at)
        })
    }

    /// See [`CameraRig::eye_set_vertical_limits`].
    pub fn eye_set_vertical_limits<O: Object3d>(
        &mut self,
        object: &mut O,
        limits: Option<VerticalRotationLimits>,
    ) -> Result<(), CameraError> {
        self.mutate("eye_set_vertical_limits", object, false, |rig, pose| {
            rig.eye_set_vertical_limits(pose, limits)
        })
    }

    /// See [`CameraRig::eye_get_vertical_limits`].
    pub fn eye_get_vertical_limits<O: Object3d>(
        &self,
        object: &O,
        camera_space: bool,
    ) -> Result<Option<VerticalRotationLimits>, CameraError> {
        self.query("eye_get_vertical_limits", object, |rig, _| {
            rig.eye_get_vertical_limits(camera_space)
        })
    }

    /// See [`CameraRig::eye_set_horizontal_limits`].
    pub fn eye_set_horizontal_limits<O: Object3d>(
        &mut self,
        object: &mut O,
        limits: Option<HorizontalRotationLimits>,
    ) -> Result<(), CameraError> {
        self.mutate("eye_set_horizontal_limits", object, false, |rig, pose| {
            rig.eye_set_horizontal_limits(pose, limits)
        })
    }

    /// See [`CameraRig::eye_get_horizontal_limits`].
    pub fn eye_get_horizontal_limits<O: Object3d>(
        &self,
        object: &O,
        camera_space: bool,
    ) -> Result<Option<HorizontalRotationLimits>, CameraError> {
        self.query("eye_get_horizontal_limits", object, |rig, _| {
            rig.eye_get_horizontal_limits(camera_space)
        })
    }

    // TARGET

    /// See [`CameraRig::target_set_distance`].
    pub fn target_set_distance<O: Object3d>(
        &mut self,
        object: &mut O,
        distance: f32,
    ) -> Result<(), CameraError> {
        self.mutate("target_set_distance", object, false, |rig, pose| {
            rig.target_set_distance(pose, distance)
        })
    }

    /// See [`CameraRig::target_get_distance`].
    pub fn target_get_distance<O: Object3d>(&self, object: &O) -> Result<f32, CameraError> {
        self.query("target_get_distance", object, |rig, pose| {
            rig.target_get_distance(pose)
        })
    }

    /// See [`CameraRig::target_pan_pivot`].
    pub fn target_pan_pivot<O: Object3d>(
        &mut self,
        object: &mut O,
        horizontal: f32,
        vertical: f32,
    ) -> Result<(), CameraError> {
        self.mutate("target_pan_pivot", object, false, |rig, pose| {
            rig.target_pan_pivot(pose, horizontal, vertical)
        })
    }

    /// See [`CameraRig::target_get_pivot`].
    pub fn target_get_pivot<O: Object3d>(&self, object: &O) -> Result<Vec3, CameraError> {
        self.query("target_get_pivot", object, |rig, _| rig.target_get_pivot())
    }

    /// See [`CameraRig::target_set_trans_pivot`].
    pub fn target_set_trans_pivot<O: Object3d>(
        &mut self,
        object: &mut O,
        translation: Option<Vec3>,
        pivot: Option<Vec3>,
    ) -> Result<(), CameraError> {
        self.mutate("target_set_trans_pivot", object, false, |rig, pose| {
            rig.target_set_trans_pivot(pose, translation, pivot)
        })
    }

    /// See [`CameraRig::target_set_pivot_translation`].
    pub fn target_set_pivot_translation<O: Object3d>(
        &mut self,
        object: &mut O,
        pivot: Vec3,
    ) -> Result<(), CameraError> {
        self.mutate("target_set_pivot_translation", object, false, |rig, pose| {
            rig.target_set_pivot_translation(pose, pivot)
        })
    }

    /// See [`CameraRig::target_zoom_sphere`].
    pub fn target_zoom_sphere<O: Object3d>(
        &mut self,
        object: &mut O,
        center: Vec3,
        radius: f32,
    ) -> Result<(), CameraError> {
        self.mutate("target_zoom_sphere", object, false, |rig, pose| {
            rig.target_zoom_sphere(pose, center, radius)
        })
    }

    /// See [`CameraRig::target_set_distance_limits`].
    pub fn target_set_distance_limits<O: Object3d>(
        &mut self,
        object: &mut O,
        limits: Option<DistanceLimits>,
    ) -> Result<(), CameraError> {
        self.mutate("target_set_distance_limits", object, false, |rig, pose| {
            rig.target_set_distance_limits(pose, limits)
        })
    }

    /// See [`CameraRig::target_get_distance_limits`].
    pub fn target_get_distance_limits<O: Object3d>(
        &self,
        object: &O,
    ) -> Result<Option<DistanceLimits>, CameraError> {
        self.query("target_get_distance_limits", object, |rig, _| {
            rig.target_get_distance_limits()
        })
    }

    /// See [`CameraRig::target_set_vertical_limits`].
    pub fn target_set_vertical_limits<O: Object3d>(
        &mut self,
        object: &mut O,
        limits: Option<VerticalRotationLimits>,
    ) -> Result<(), CameraError> {
        self.mutate("target_set_vertical_limits", object, false, |rig, pose| {
            rig.target_set_vertical_limits(pose, limits)
        })
    }

    /// See [`CameraRig::target_get_vertical_limits`].
    pub fn target_get_vertical_limits<O: Object3d>(
        &self,
        object: &O,
        camera_space: bool,
    ) -> Result<Option<VerticalRotationLimits>, CameraError> {
        self.query("target_get_vertical_limits", object, |rig, _| {
            rig.target_get_vertical_limits(camera_space)
        })
    }

    /// See [`CameraRig::target_set_horizontal_limits`].
    pub fn target_set_horizontal_limits<O: Object3d>(
        &mut self,
        object: &mut O,
        limits: Option<HorizontalRotationLimits>,
    ) -> Result<(), CameraError> {
        self.mutate("target_set_horizontal_limits", object, false, |rig, pose| {
            rig.target_set_horizontal_limits(pose, limits)
        })
    }

    /// See [`CameraRig::target_get_horizontal_limits`].
    pub fn target_get_horizontal_limits<O: Object3d>(
        &self,
        object: &O,
        camera_space: bool,
    ) -> Result<Option<HorizontalRotationLimits>, CameraError> {
        self.query("target_get_horizontal_limits", object, |rig, _| {
            rig.target_get_horizontal_limits(camera_space)
        })
    }

    /// See [`CameraRig::target_set_pivot_limits`].
    pub fn target_set_pivot_limits<O: Object3d>(
        &mut self,
        object: &mut O,
        limits: Option<PivotLimits>,
    ) -> Result<(), CameraError> {
        self.mutate("target_set_pivot_limits", object, false, |rig, pose| {
            rig.target_set_pivot_limits(pose, limits)
        })
    }

    /// See [`CameraRig::target_get_pivot_limits`].
    pub fn target_get_pivot_limits<O: Object3d>(
        &self,
        object: &O,
    ) -> Result<Option<PivotLimits>, CameraError> {
        self.query("target_get_pivot_limits", object, |rig, _| {
            rig.target_get_pivot_limits()
        })
    }

    /// See [`CameraRig::target_switch_panning`].
    pub fn target_switch_panning<O: Object3d>(
        &mut self,
        object: &mut O,
        enable: bool,
    ) -> Result<(), CameraError> {
        self.mutate("target_switch_panning", object, false, |rig, _| {
            rig.target_switch_panning(enable)
        })
    }

    // HOVER

    /// See [`CameraRig::hover_set_pivot_translation`].
    pub fn hover_set_pivot_translation<O: Object3d>(
        &mut self,
        object: &mut O,
        pivot: Vec3,
    ) -> Result<(), CameraError> {
        self.mutate("hover_set_pivot_translation", object, false, |rig, pose| {
            rig.hover_set_pivot_translation(pose, pivot)
        })
    }

    /// See [`CameraRig::hover_get_pivot`].
    pub fn hover_get_pivot<O: Object3d>(&self, object: &O) -> Result<Vec3, CameraError> {
        self.query("hover_get_pivot", object, |rig, _| rig.hover_get_pivot())
    }

    /// See [`CameraRig::hover_get_distance`].
    pub fn hover_get_distance<O: Object3d>(&self, object: &O) -> Result<f32, CameraError> {
        self.query("hover_get_distance", object, |rig, pose| {
            rig.hover_get_distance(pose)
        })
    }

    /// See [`CameraRig::hover_set_distance`].
    pub fn hover_set_distance<O: Object3d>(
        &mut self,
        object: &mut O,
        distance: f32,
    ) -> Result<(), CameraError> {
        self.mutate("hover_set_distance", object, false, |rig, pose| {
            rig.hover_set_distance(pose, distance)
        })
    }

    /// See [`CameraRig::hover_set_vertical_limits`].
    pub fn hover_set_vertical_limits<O: Object3d>(
        &mut self,
        object: &mut O,
        limits: HoverAngleLimits,
    ) -> Result<(), CameraError> {
        self.mutate("hover_set_vertical_limits", object, false, |rig, pose| {
            rig.hover_set_vertical_limits(pose, limits)
        })
    }

    /// See [`CameraRig::hover_get_vertical_limits`].
    pub fn hover_get_vertical_limits<O: Object3d>(
        &self,
        object: &O,
    ) -> Result<HoverAngleLimits, CameraError> {
        self.query("hover_get_vertical_limits", object, |rig, _| {
            rig.hover_get_vertical_limits()
        })
    }

    /// See [`CameraRig::hover_set_distance_limits`].
    pub fn hover_set_distance_limits<O: Object3d>(
        &mut self,
        object: &mut O,
        limits: DistanceLimits,
    ) -> Result<(), CameraError> {
        self.mutate("hover_set_distance_limits", object, false, |rig, pose| {
            rig.hover_set_distance_limits(pose, limits)
        })
    }

    /// See [`CameraRig::hover_get_distance_limits`].
    pub fn hover_get_distance_limits<O: Object3d>(
        &self,
        object: &O,
    ) -> Result<DistanceLimits, CameraError> {
        self.query("hover_get_distance_limits", object, |rig, _| {
            rig.hover_get_distance_limits()
        })
    }

    /// See [`CameraRig::hover_set_vert_trans_limits`].
    pub fn hover_set_vert_trans_limits<O: Object3d>(
        &mut self,
        object: &mut O,
        limits: Option<TranslationLimits>,
    ) -> Result<(), CameraError> {
        self.mutate("hover_set_vert_trans_limits", object, false, |rig, pose| {
            rig.hover_set_vert_trans_limits(pose, limits)
        })
    }

    /// See [`CameraRig::hover_get_vert_trans_limits`].
    pub fn hover_get_vert_trans_limits<O: Object3d>(
        &self,
        object: &O,
    ) -> Result<Option<TranslationLimits>, CameraError> {
        self.query("hover_get_vert_trans_limits", object, |rig, _| {
            rig.hover_get_vert_trans_limits()
        })
    }

    /// See [`CameraRig::hover_set_horiz_trans_limits`].
    pub fn hover_set_horiz_trans_limits<O: Object3d>(
        &mut self,
        object: &mut O,
        limits: Option<TranslationLimits>,
    ) -> Result<(), CameraError> {
        self.mutate("hover_set_horiz_trans_limits", object, false, |rig, pose| {
            rig.hover_set_horiz_trans_limits(pose, limits)
        })
    }

    /// See [`CameraRig::hover_get_horiz_trans_limits`].
    pub fn hover_get_horiz_trans_limits<O: Object3d>(
        &self,
        object: &O,
    ) -> Result<Option<TranslationLimits>, CameraError> {
        self.query("hover_get_horiz_trans_limits", object, |rig, _| {
            rig.hover_get_horiz_trans_limits()
        })
    }

    /// See [`CameraRig::hover_switch_horiz_rotation`].
    pub fn hover_switch_horiz_rotation<O: Object3d>(
        &mut self,
        object: &mut O,
        enable: bool,
    ) -> Result<(), CameraError> {
        self.mutate("hover_switch_horiz_rotation", object, false, |rig, _| {
            rig.hover_switch_horiz_rotation(enable)
        })
    }

    // Any model

    /// See [`CameraRig::get_move_style`].
    pub fn get_move_style<O: Object3d>(
        &self,
        object: &O,
    ) -> Result<Option<MoveStyleKind>, CameraError> {
        self.query("get_move_style", object, |rig, _| Ok(rig.get_move_style()))
    }

    /// See [`CameraRig::set_translation`].
    pub fn set_translation<O: Object3d>(
        &mut self,
        object: &mut O,
        translation: Vec3,
    ) -> Result<(), CameraError> {
        self.mutate("set_translation", object, false, |rig, pose| {
            rig.set_translation(pose, translation)
        })
    }

    /// See [`CameraRig::get_translation`].
    pub fn get_translation<O: Object3d>(&self, object: &O) -> Result<Vec3, CameraError> {
        self.query("get_translation", object, |rig, pose| {
            Ok(rig.get_translation(pose))
        })
    }

    /// See [`CameraRig::rotate_camera`].
    pub fn rotate_camera<O: Object3d>(
        &mut self,
        object: &mut O,
        phi: f32,
        theta: f32,
        absolute: bool,
    ) -> Result<(), CameraError> {
        self.mutate("rotate_camera", object, false, |rig, pose| {
            rig.rotate_camera(pose, phi, theta, absolute)
        })
    }

    /// See [`CameraRig::get_camera_angles`].
    pub fn get_camera_angles<O: Object3d>(&self, object: &O) -> Result<(f32, f32), CameraError> {
        self.query("get_camera_angles", object, |rig, pose| {
            Ok(rig.get_camera_angles(pose))
        })
    }

    /// See [`CameraRig::get_view_vector`].
    pub fn get_view_vector<O: Object3d>(&self, object: &O) -> Result<Vec3, CameraError> {
        self.query("get_view_vector", object, |rig, pose| {
            Ok(rig.get_view_vector(pose))
        })
    }

    /// See [`CameraRig::is_look_up`].
    pub fn is_look_up<O: Object3d>(&self, object: &O) -> Result<bool, CameraError> {
        self.query("is_look_up", object, |rig, pose| Ok(rig.is_look_up(pose)))
    }

    /// See [`CameraRig::set_velocities`].
    pub fn set_velocities<O: Object3d>(
        &mut self,
        object: &mut O,
        velocity: Velocities,
    ) -> Result<(), CameraError> {
        self.mutate("set_velocities", object, false, |rig, _| {
            rig.set_velocities(velocity);
            Ok(())
        })
    }

    /// See [`CameraRig::get_velocities`].
    pub fn get_velocities<O: Object3d>(&self, object: &O) -> Result<Velocities, CameraError> {
        self.query("get_velocities", object, |rig, _| Ok(rig.get_velocities()))
    }

    /// See [`CameraRig::set_vertical_axis`].
    pub fn set_vertical_axis<O: Object3d>(
        &mut self,
        object: &mut O,
        axis: Vec3,
    ) -> Result<(), CameraError> {
        self.mutate("set_vertical_axis", object, false, |rig, _| {
            rig.set_vertical_axis(axis);
            Ok(())
        })
    }

    /// See [`CameraRig::get_vertical_axis`].
    pub fn get_vertical_axis<O: Object3d>(&self, object: &O) -> Result<Vec3, CameraError> {
        self.query("get_vertical_axis", object, |rig, _| {
            Ok(rig.get_vertical_axis())
        })
    }

    /// See [`CameraRig::correct_up`].
    pub fn correct_up<O: Object3d>(
        &mut self,
        object: &mut O,
        axis: Option<Vec3>,
        strict: bool,
    ) -> Result<(), CameraError> {
        self.mutate("correct_up", object, false, |rig, pose| {
            rig.correct_up(pose, axis, strict);
            Ok(())
        })
    }

    /// See [`CameraRig::get_fov`].
    pub fn get_fov<O: Object3d>(&self, object: &O) -> Result<f32, CameraError> {
        self.query("get_fov", object, |rig, _| rig.get_fov())
    }

    /// See [`CameraRig::set_fov`].
    pub fn set_fov<O: Object3d>(&mut self, object: &mut O, fov: f32) -> Result<(), CameraError> {
        self.mutate("set_fov", object, false, |rig, _| rig.set_fov(fov))
    }

    /// See [`CameraRig::get_ortho_scale`].
    pub fn get_ortho_scale<O: Object3d>(&self, object: &O) -> Result<f32, CameraError> {
        self.query("get_ortho_scale", object, |rig, _| rig.get_ortho_scale())
    }

    /// See [`CameraRig::set_ortho_scale`].
    pub fn set_ortho_scale<O: Object3d>(
        &mut self,
        object: &mut O,
        scale: f32,
    ) -> Result<(), CameraError> {
        self.mutate("set_ortho_scale", object, false, |rig, pose| {
            rig.set_ortho_scale(pose, scale)
        })
    }

    /// See [`CameraRig::is_ortho_camera`].
    pub fn is_ortho_camera<O: Object3d>(&self, object: &O) -> Result<bool, CameraError> {
        self.query("is_ortho_camera", object, |rig, _| Ok(rig.is_ortho_camera()))
    }

    /// See [`CameraRig::has_distance_limits`].
    pub fn has_distance_limits<O: Object3d>(&self, object: &O) -> Result<bool, CameraError> {
        self.query("has_distance_limits", object, |rig, _| {
            Ok(rig.has_distance_limits())
        })
    }

    /// See [`CameraRig::has_vertical_rot_limits`].
    pub fn has_vertical_rot_limits<O: Object3d>(&self, object: &O) -> Result<bool, CameraError> {
        self.query("has_vertical_rot_limits", object, |rig, _| {
            Ok(rig.has_vertical_rot_limits())
        })
    }

    /// See [`CameraRig::has_horizontal_rot_limits`].
    pub fn has_horizontal_rot_limits<O: Object3d>(
        &self,
        object: &O,
    ) -> Result<bool, CameraError> {
        self.query("has_horizontal_rot_limits", object, |rig, _| {
            Ok(rig.has_horizontal_rot_limits())
        })
    }

    /// See [`CameraRig::has_vertical_trans_limits`].
    pub fn has_vertical_trans_limits<O: Object3d>(
        &self,
        object: &O,
    ) -> Result<bool, CameraError> {
        self.query("has_vertical_trans_limits", object, |rig, _| {
            Ok(rig.has_vertical_trans_limits())
        })
    }

    /// See [`CameraRig::has_horizontal_trans_limits`].
    pub fn has_horizontal_trans_limits<O: Object3d>(
        &self,
        object: &O,
    ) -> Result<bool, CameraError> {
        self.query("has_horizontal_trans_limits", object, |rig, _| {
            Ok(rig.has_horizontal_trans_limits())
        })
    }

    /// See [`CameraRig::get_distance`].
    pub fn get_distance<O: Object3d>(&self, object: &O) -> Result<f32, CameraError> {
        self.query("get_distance", object, |rig, pose| rig.get_distance(pose))
    }

    /// See [`CameraRig::get_pivot`].
    pub fn get_pivot<O: Object3d>(&self, object: &O) -> Result<Vec3, CameraError> {
        self.query("get_pivot", object, |rig, _| rig.get_pivot())
    }

    /// See [`CameraRig::get_distance_limits`].
    pub fn get_distance_limits<O: Object3d>(
        &self,
        object: &O,
    ) -> Result<Option<DistanceLimits>, CameraError> {
        self.query("get_distance_limits", object, |rig, _| {
            rig.get_distance_limits()
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::controller::projection::Lens;

    use super::*;

    /// Records every hook call in order.
    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl SceneHooks for Recorder {
        fn sync_transform(&mut self, _: Entity) {
            self.calls.push("sync");
        }

        fn update_projection(&mut self, _: Entity) {
            self.calls.push("projection");
        }

        fn update_projection_reflected(&mut self, _: Entity) {
            self.calls.push("reflected");
        }
    }

    fn target_camera(control: &mut CameraControl<Recorder>, rig: CameraRig) -> CameraObject {
        let mut camera = CameraObject::camera(rig);
        control
            .target_setup(
                &mut camera,
                &TargetParams {
                    pos: Some(Vec3::new(0.0, -5.0, 0.0)),
                    pivot: Some(Vec3::ZERO),
                    ..Default::default()
                },
            )
            .unwrap();
        control.hooks().calls.clear();
        camera
    }

    #[test]
    fn setup_commits_and_fires_both_hooks() {
        let mut hooks = Recorder::default();
        let mut control = CameraControl::new(&mut hooks);
        let mut camera = CameraObject::camera(CameraRig::default());
        control
            .eye_setup(
                &mut camera,
                &EyeParams {
                    pos: Some(Vec3::new(1.0, 2.0, 3.0)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(camera.pose.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(control.hooks().calls, ["sync", "projection"]);
    }

    #[test]
    fn target_distance_respects_limits() {
        let mut hooks = Recorder::default();
        let mut control = CameraControl::new(&mut hooks);
        let mut camera = target_camera(&mut control, CameraRig::default());
        control
            .target_set_distance_limits(&mut camera, Some(DistanceLimits::new(2.0, 10.0)))
            .unwrap();
        control.target_set_distance(&mut camera, 100.0).unwrap();
        assert!((control.target_get_distance(&camera).unwrap() - 10.0).abs() < 1e-4);
        control.target_set_distance(&mut camera, -5.0).unwrap();
        assert!((control.get_distance(&camera).unwrap() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn relative_hover_setup_windows_the_distance() {
        let mut hooks = Recorder::default();
        let mut control = CameraControl::new(&mut hooks);
        let mut camera = CameraObject::camera(CameraRig::default());
        control
            .hover_setup_rel(
                &mut camera,
                &HoverRelParams {
                    pos: Some(Vec3::new(0.0, -6.0, 8.0)),
                    pivot: Vec3::ZERO,
                    dist_interval: 4.0,
                    t: 0.5,
                    ..Default::default()
                },
            )
            .unwrap();
        let limits = control.get_distance_limits(&camera).unwrap().unwrap();
        assert!((limits.min - 8.0).abs() < 1e-4);
        assert!((limits.max - 12.0).abs() < 1e-4);
        assert!((control.hover_get_distance(&camera).unwrap() - 10.0).abs() < 1e-4);

        // Looking along +Y, the azimuth reads back as a positive zero or just under 2π.
        let (phi, _) = control.get_camera_angles(&camera).unwrap();
        assert!(phi.is_sign_positive());
        assert!(phi.min(std::f32::consts::TAU - phi) < 1e-4);
    }

    #[test]
    fn switching_to_eye_drops_the_pivot() {
        let mut hooks = Recorder::default();
        let mut control = CameraControl::new(&mut hooks);
        let mut camera = target_camera(&mut control, CameraRig::default());
        control
            .target_set_distance_limits(&mut camera, Some(DistanceLimits::new(2.0, 10.0)))
            .unwrap();
        control.eye_setup(&mut camera, &EyeParams::default()).unwrap();

        assert_eq!(
            control.target_get_pivot(&camera),
            Err(CameraError::WrongCameraModel {
                expected: "TARGET",
                found: Some(MoveStyleKind::Eye)
            })
        );
        assert_eq!(control.has_distance_limits(&camera), Ok(false));
    }

    #[test]
    fn eye_rotation_stops_at_the_vertical_limit() {
        let mut hooks = Recorder::default();
        let mut control = CameraControl::new(&mut hooks);
        let mut camera = CameraObject::camera(CameraRig::default());
        control
            .eye_setup(
                &mut camera,
                &EyeParams {
                    look_at: Some(Vec3::Y),
                    vertical_limits: Some(VerticalRotationLimits::new(-0.5, 0.5)),
                    ..Default::default()
                },
            )
            .unwrap();
        control.rotate_camera(&mut camera, 0.0, 10.0, false).unwrap();
        let (_, theta) = control.get_camera_angles(&camera).unwrap();
        assert!((theta - 0.5).abs() < 1e-5);
    }

    #[test]
    fn rejected_operations_change_nothing() {
        let mut hooks = Recorder::default();
        let mut control = CameraControl::new(&mut hooks);
        let mut camera = target_camera(&mut control, CameraRig::default());
        let before = camera.clone();

        assert_eq!(
            control.target_set_distance_limits(&mut camera, Some(DistanceLimits::new(5.0, 1.0))),
            Err(CameraError::InvalidLimits(crate::error::LimitKind::Distance))
        );
        assert!(control.hover_set_distance(&mut camera, 3.0).is_err());
        assert!(control.set_ortho_scale(&mut camera, 3.0).is_err());
        assert_eq!(camera, before);
        assert!(control.hooks().calls.is_empty());
    }

    #[test]
    fn plain_objects_are_not_cameras() {
        let mut hooks = ();
        let mut control = CameraControl::new(&mut hooks);
        let mut object = CameraObject::plain(Tsr::from_parts(Vec3::ONE, 1.0, Quat::IDENTITY));
        assert!(!object.is_camera());
        assert_eq!(
            control.rotate_camera(&mut object, 1.0, 0.0, false),
            Err(CameraError::WrongCameraObject)
        );
        assert_eq!(
            control.get_pivot(&object),
            Err(CameraError::WrongCameraObject)
        );
        assert_eq!(object.pose.translation, Vec3::ONE);
    }

    #[test]
    fn lens_changes_fire_the_projection_hook() {
        let mut hooks = Recorder::default();
        let mut control = CameraControl::new(&mut hooks);
        let mut camera = target_camera(&mut control, CameraRig::default());

        control.target_set_distance(&mut camera, 3.0).unwrap();
        assert_eq!(control.hooks().calls, ["sync"]);

        control.hooks().calls.clear();
        control.set_fov(&mut camera, 0.5).unwrap();
        assert_eq!(control.hooks().calls, ["projection"]);

        let mut rig = CameraRig::default().with_lens(Lens::orthographic(4.0));
        rig.reflected = true;
        let mut mirror = target_camera(&mut control, rig);
        control.target_set_distance(&mut mirror, 10.0).unwrap();
        assert_eq!(control.hooks().calls, ["sync", "reflected"]);
        assert!((control.get_ortho_scale(&mirror).unwrap() - 8.0).abs() < 1e-4);
    }

    #[test]
    fn settings_that_keep_the_pose_skip_the_sync_hook() {
        let mut hooks = Recorder::default();
        let mut control = CameraControl::new(&mut hooks);
        let mut camera = target_camera(&mut control, CameraRig::default());
        let before = camera.pose;

        control.target_switch_panning(&mut camera, false).unwrap();
        control
            .set_velocities(
                &mut camera,
                Velocities {
                    trans: 2.0,
                    ..Default::default()
                },
            )
            .unwrap();
        control.set_vertical_axis(&mut camera, Vec3::X).unwrap();
        assert!(control.hooks().calls.is_empty());
        assert_eq!(camera.pose, before);
        assert_eq!(control.get_velocities(&camera).unwrap().trans, 2.0);

        // A setup that lands on the same pose still reports it.
        control
            .target_setup(
                &mut camera,
                &TargetParams {
                    pos: Some(Vec3::new(0.0, -5.0, 0.0)),
                    pivot: Some(Vec3::ZERO),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(control.hooks().calls, ["sync", "projection"]);
    }

    #[test]
    fn zoom_sphere_frames_the_object() {
        let mut hooks = Recorder::default();
        let mut control = CameraControl::new(&mut hooks);
        let mut camera = target_camera(&mut control, CameraRig::default());
        control
            .target_zoom_sphere(&mut camera, Vec3::new(4.0, 0.0, 0.0), 1.0)
            .unwrap();
        let fov = control.get_fov(&camera).unwrap();
        let distance = control.get_distance(&camera).unwrap();
        assert!((distance - 1.0 / (fov / 2.0).sin()).abs() < 1e-3);
        assert!(control
            .get_pivot(&camera)
            .unwrap()
            .distance(Vec3::new(4.0, 0.0, 0.0))
            < 1e-5);
        let view = control.get_view_vector(&camera).unwrap();
        let to_center = (Vec3::new(4.0, 0.0, 0.0) - camera.pose.translation).normalize();
        assert!(view.distance(to_center) < 1e-4);
    }
}
