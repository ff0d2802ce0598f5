//! The camera state machine: the [`CameraRig`](component::CameraRig) component and the movement
//! models it can run.

pub mod component;
pub mod eye;
pub mod hover;
pub mod params;
pub mod projection;
pub mod target;
pub mod velocity;
