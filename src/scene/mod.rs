//! Scene description, construction and per-frame motion

mod blueprint;
mod camera;
mod geometry;
mod graph;
mod material;
pub mod starfield;
mod variant;

pub use blueprint::{
    Fog, LightPalette, OverlayPart, Part, RingMount, RingPart, SceneBlueprint, StarfieldSpec, AMBIENT_COLOR,
    AMBIENT_INTENSITY, FILL_LIGHT_POSITION, KEY_LIGHT_POSITION, POINT_LIGHT_INTENSITY,
};
pub use camera::{PerspectiveCamera, CAMERA_DISTANCE, FAR_PLANE, FIELD_OF_VIEW_DEGREES, NEAR_PLANE};
pub use geometry::{Geometry, Shape, Topology};
pub use graph::{
    DrawItem, Lights, Mesh, PointLight, Ring, Scene, Transform, CORE_SPIN, GROUP_SPIN_X, GROUP_SPIN_Y,
    PARALLAX_EASING, PARALLAX_SCALE, RING_STEER, STARFIELD_SPIN,
};
pub use material::{Material, Shading};
pub use variant::{ParseVariantError, Variant};
