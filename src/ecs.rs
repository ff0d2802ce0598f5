//! Bevy integration: camera entities as [`Object3d`]s, hooks as events, and the plugin that keeps
//! render projections in sync with each rig's [`Lens`](crate::controller::projection::Lens).

use bevy_app::prelude::*;
use bevy_ecs::{prelude::*, system::SystemParam};
use bevy_render::prelude::Projection;
use bevy_transform::prelude::*;

use crate::{
    api::{Object3d, SceneHooks},
    controller::{
        component::{CameraRig, MoveStyle, MoveStyleKind},
        eye::EyeModel,
        hover::HoverModel,
        projection::Lens,
        target::TargetModel,
        velocity::Velocities,
    },
    limits::{
        AngularLimits, DistanceLimits, HorizontalRotationLimits, HoverAngleLimits, PivotLimits,
        TranslationLimits, VerticalRotationLimits,
    },
    tsr::Tsr,
};

/// Registers the rig types and events, and copies changed lenses into render projections.
pub struct CameraRigPlugin;

impl Plugin for CameraRigPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PoseCommitted>()
            .add_event::<ProjectionChanged>()
            .add_systems(PostUpdate, apply_lens_changes)
            .register_type::<CameraRig>()
            .register_type::<MoveStyle>()
            .register_type::<MoveStyleKind>()
            .register_type::<TargetModel>()
            .register_type::<EyeModel>()
            .register_type::<HoverModel>()
            .register_type::<Lens>()
            .register_type::<Velocities>()
            .register_type::<Tsr>()
            .register_type::<AngularLimits>()
            .register_type::<DistanceLimits>()
            .register_type::<PivotLimits>()
            .register_type::<TranslationLimits>()
            .register_type::<HoverAngleLimits>()
            .register_type::<VerticalRotationLimits>()
            .register_type::<HorizontalRotationLimits>();
    }
}

/// A camera operation committed a new pose for `camera`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Event)]
pub struct PoseCommitted {
    /// The camera entity.
    pub camera: Entity,
}

/// A camera operation changed the lens of `camera`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Event)]
pub struct ProjectionChanged {
    /// The camera entity.
    pub camera: Entity,
    /// The camera renders a reflection.
    pub reflected: bool,
}

/// [`SceneHooks`] that turn every hook call into an event.
#[derive(SystemParam)]
pub struct RigEvents<'w> {
    committed: EventWriter<'w, PoseCommitted>,
    projection: EventWriter<'w, ProjectionChanged>,
}

impl SceneHooks for RigEvents<'_> {
    fn sync_transform(&mut self, camera: Entity) {
        self.committed.write(PoseCommitted { camera });
    }

    fn update_projection(&mut self, camera: Entity) {
        self.projection.write(ProjectionChanged {
            camera,
            reflected: false,
        });
    }

    fn update_projection_reflected(&mut self, camera: Entity) {
        self.projection.write(ProjectionChanged {
            camera,
            reflected: true,
        });
    }
}

/// An entity's [`Transform`] and optional [`CameraRig`], borrowed from a query.
///
/// ```
/// # use bevy_ecs::prelude::*;
/// # use bevy_transform::prelude::*;
/// # use bevy_rig_cam::prelude::*;
/// fn orbit(
///     mut cameras: Query<(Entity, &mut Transform, Option<&mut CameraRig>)>,
///     mut events: RigEvents,
/// ) {
///     let mut control = CameraControl::new(&mut events);
///     for (entity, transform, rig) in &mut cameras {
///         let mut camera = RigEntity::new(entity, transform, rig);
///         let _ = control.rotate_camera(&mut camera, 0.01, 0.0, false);
///     }
/// }
/// # bevy_ecs::system::assert_is_system(orbit);
/// ```
pub struct RigEntity<'a> {
    entity: Entity,
    transform: Mut<'a, Transform>,
    rig: Option<Mut<'a, CameraRig>>,
}

impl<'a> RigEntity<'a> {
    /// Wrap one query item.
    pub fn new(
        entity: Entity,
        transform: Mut<'a, Transform>,
        rig: Option<Mut<'a, CameraRig>>,
    ) -> Self {
        Self {
            entity,
            transform,
            rig,
        }
    }
}

impl Object3d for RigEntity<'_> {
    fn entity(&self) -> Entity {
        self.entity
    }

    fn pose(&self) -> Tsr {
        Tsr::from(*self.transform)
    }

    fn set_pose(&mut self, pose: Tsr) {
        *self.transform = pose.into();
    }

    fn rig(&self) -> Option<&CameraRig> {
        self.rig.as_deref()
    }

    fn rig_mut(&mut self) -> Option<&mut CameraRig> {
        self.rig.as_deref_mut()
    }
}

/// Copy the lens of every changed [`CameraRig`] into its [`Projection`].
pub fn apply_lens_changes(mut cameras: Query<(&CameraRig, &mut Projection), Changed<CameraRig>>) {
    for (rig, mut projection) in &mut cameras {
        rig.lens().apply_to(&mut projection);
    }
}
