//! Constrained camera movement for Bevy.
//!
//! A camera pose is a [`Tsr`](tsr::Tsr): translation, uniform scale and rotation. A
//! [`CameraRig`](controller::component::CameraRig) component runs one of four movement models
//! on that pose:
//!
//! - **STATIC**: moves only when told to.
//! - **TARGET**: orbits a pivot, with optional distance, rotation and pivot height limits.
//! - **EYE**: looks around from a fixed position, with optional rotation limits.
//! - **HOVER**: glides over a ground plane, zooming out as it tilts toward the ground.
//!
//! Operations go through [`CameraControl`](api::CameraControl). A rejected operation is logged
//! and changes nothing. A successful one commits the pose and notifies the
//! [`SceneHooks`](api::SceneHooks). Inside a Bevy app, [`CameraRigPlugin`](ecs::CameraRigPlugin)
//! turns the hooks into events and keeps render projections in sync.
//!
//! The world is Z-up. A camera looks along its local -Z axis with local +Y up, so the identity
//! rotation looks straight down.

#![warn(missing_docs)]

pub mod angles;
pub mod api;
pub mod controller;
pub mod ecs;
pub mod error;
pub mod limits;
pub mod math;
pub mod tsr;

/// Common imports.
pub mod prelude {
    pub use crate::{
        api::{CameraControl, CameraObject, Object3d, SceneHooks},
        controller::{
            component::{CameraRig, MoveStyle, MoveStyleKind},
            params::{EyeParams, HoverParams, HoverRelParams, StaticParams, TargetParams},
            projection::Lens,
            velocity::Velocities,
        },
        ecs::{CameraRigPlugin, PoseCommitted, ProjectionChanged, RigEntity, RigEvents},
        error::{CameraError, LimitKind},
        limits::{
            DistanceLimits, HorizontalRotationLimits, HoverAngleLimits, PivotLimits,
            TranslationLimits, VerticalRotationLimits,
        },
        tsr::Tsr,
    };
}
