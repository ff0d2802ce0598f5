//! Errors reported by camera operations.

use std::fmt;

use thiserror::Error;

use crate::controller::component::MoveStyleKind;

/// The kind of limits object that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    /// [`DistanceLimits`](crate::limits::DistanceLimits).
    Distance,
    /// [`PivotLimits`](crate::limits::PivotLimits).
    Pivot,
    /// [`HoverAngleLimits`](crate::limits::HoverAngleLimits).
    HoverAngle,
    /// [`VerticalRotationLimits`](crate::limits::VerticalRotationLimits).
    VerticalRotation,
    /// [`HorizontalRotationLimits`](crate::limits::HorizontalRotationLimits).
    HorizontalRotation,
    /// Horizontal [`TranslationLimits`](crate::limits::TranslationLimits).
    HorizontalTranslation,
    /// Vertical [`TranslationLimits`](crate::limits::TranslationLimits).
    VerticalTranslation,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LimitKind::Distance => "distance",
            LimitKind::Pivot => "pivot",
            LimitKind::HoverAngle => "hover angle",
            LimitKind::VerticalRotation => "vertical rotation",
            LimitKind::HorizontalRotation => "horizontal rotation",
            LimitKind::HorizontalTranslation => "horizontal translation",
            LimitKind::VerticalTranslation => "vertical translation",
        };
        f.write_str(name)
    }
}

/// Why a camera operation was rejected.
///
/// Every error is detected before the camera is touched: a failed operation leaves the pose,
/// the movement model and its limits exactly as they were, and fires no hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CameraError {
    /// The object does not carry a [`CameraRig`](crate::controller::component::CameraRig).
    #[error("wrong camera object")]
    WrongCameraObject,
    /// The operation belongs to another movement model than the installed one.
    #[error("wrong camera move style: expected {expected}, found {}", display_kind(.found))]
    WrongCameraModel {
        /// The movement model(s) the operation supports.
        expected: &'static str,
        /// The installed movement model, `None` if no setup call ran yet.
        found: Option<MoveStyleKind>,
    },
    /// A limits object failed validation.
    #[error("wrong {0} limits object")]
    InvalidLimits(LimitKind),
    /// The camera's projection cannot answer the request.
    #[error("unsupported conversion: {0}")]
    UnsupportedConversion(&'static str),
}

fn display_kind(kind: &Option<MoveStyleKind>) -> String {
    kind.map_or_else(|| "none".to_string(), |kind| kind.to_string())
}
