//! The camera [`Lens`]: the projection values a camera operation can change.

use bevy_log::prelude::*;
use bevy_reflect::prelude::*;
use bevy_render::{
    camera::ScalingMode,
    prelude::{OrthographicProjection, PerspectiveProjection, Projection},
};

use crate::{error::CameraError, math::EPSILON};

/// Projection values owned by a [`CameraRig`](super::component::CameraRig).
///
/// The matrices themselves belong to the renderer. Whenever an operation changes the lens the
/// projection hook is fired so the renderer can rebuild them.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Lens {
    /// A perspective projection.
    Perspective {
        /// Vertical field of view, in radians.
        fov: f32,
    },
    /// An orthographic projection.
    Orthographic {
        /// Height of the view volume in world units.
        scale: f32,
        /// For target and hover cameras, the scale per unit of pivot distance, so zooming in
        /// and out changes the framing the way a perspective camera would.
        scale_per_distance: Option<f32>,
    },
}

impl Default for Lens {
    fn default() -> Self {
        Self::Perspective {
            fov: std::f32::consts::FRAC_PI_4,
        }
    }
}

impl Lens {
    /// An orthographic lens with a fixed scale.
    pub fn orthographic(scale: f32) -> Self {
        Self::Orthographic {
            scale,
            scale_per_distance: None,
        }
    }

    /// Whether this is an orthographic lens.
    pub fn is_orthographic(&self) -> bool {
        matches!(self, Self::Orthographic { .. })
    }

    /// The vertical field of view of a perspective lens.
    pub fn fov(&self) -> Result<f32, CameraError> {
        match self {
            Self::Perspective { fov } => Ok(*fov),
            Self::Orthographic { .. } => Err(CameraError::UnsupportedConversion(
                "field of view of an orthographic camera",
            )),
        }
    }

    /// Change the field of view of a perspective lens.
    pub fn set_fov(&mut self, new_fov: f32) -> Result<(), CameraError> {
        match self {
            Self::Perspective { fov } => {
                *fov = new_fov;
                Ok(())
            }
            Self::Orthographic { .. } => Err(CameraError::UnsupportedConversion(
                "field of view of an orthographic camera",
            )),
        }
    }

    /// The view volume height of an orthographic lens.
    pub fn ortho_scale(&self) -> Result<f32, CameraError> {
        match self {
            Self::Orthographic { scale, .. } => Ok(*scale),
            Self::Perspective { .. } => Err(CameraError::UnsupportedConversion(
                "ortho scale of a perspective camera",
            )),
        }
    }

    /// Change the scale of an orthographic lens.
    ///
    /// With a pivot `distance` the lens keeps following the zoom: later distance changes rescale
    /// it proportionally.
    pub fn set_ortho_scale(
        &mut self,
        new_scale: f32,
        distance: Option<f32>,
    ) -> Result<(), CameraError> {
        match self {
            Self::Orthographic {
                scale,
                scale_per_distance,
            } => {
                *scale = new_scale;
                *scale_per_distance = per_distance(new_scale, distance);
                Ok(())
            }
            Self::Perspective { .. } => Err(CameraError::UnsupportedConversion(
                "ortho scale of a perspective camera",
            )),
        }
    }

    /// Tie an orthographic lens to the given pivot distance, or untie it when there is none.
    pub(crate) fn init_ortho(&mut self, distance: Option<f32>) {
        if let Self::Orthographic {
            scale,
            scale_per_distance,
        } = self
        {
            *scale_per_distance = per_distance(*scale, distance);
        }
    }

    /// Rescale an orthographic lens that follows the pivot distance.
    pub(crate) fn follow_distance(&mut self, distance: f32) {
        if let Self::Orthographic {
            scale,
            scale_per_distance: Some(ratio),
        } = self
        {
            *scale = *ratio * distance;
        }
    }

    /// Write this lens into a render [`Projection`], keeping its other settings.
    pub fn apply_to(&self, projection: &mut Projection) {
        match (self, projection) {
            (Self::Perspective { fov }, Projection::Perspective(perspective)) => {
                perspective.fov = *fov;
            }
            (Self::Orthographic { scale, .. }, Projection::Orthographic(ortho)) => {
                ortho.scale = *scale;
            }
            (_, Projection::Custom(_)) => {
                warn_once!("Custom projections are not driven by the camera rig.");
            }
            (lens, projection) => *projection = lens.to_projection(),
        }
    }

    /// A fresh render [`Projection`] for this lens.
    pub fn to_projection(&self) -> Projection {
        match *self {
            Self::Perspective { fov } => Projection::Perspective(PerspectiveProjection {
                fov,
                ..Default::default()
            }),
            Self::Orthographic { scale, .. } => Projection::Orthographic(OrthographicProjection {
                scaling_mode: ScalingMode::FixedVertical {
                    viewport_height: 1.0,
                },
                scale,
                ..OrthographicProjection::default_3d()
            }),
        }
    }
}

fn per_distance(scale: f32, distance: Option<f32>) -> Option<f32> {
    distance
        .filter(|distance| *distance > EPSILON)
        .map(|distance| scale / distance)
}
