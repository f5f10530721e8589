//! AR Viewer Scene
//!
//! In-memory scene graph that implements [`arview_core::SceneEngine`],
//! plus the turntable camera and ray picking it relies on.
//!
//! # Module Structure
//!
//! ```text
//! arview-scene/
//! ├── animation.rs   # Linear transform tweens
//! ├── camera.rs      # Orbit camera, projection and screen rays
//! ├── graph.rs       # Scene graph with object and AR view spaces
//! └── picking.rs     # Ray-plane and ray-box tests
//! ```

pub mod animation;
pub mod camera;
pub mod graph;
pub mod picking;

pub use animation::TransformTween;
pub use camera::{OrbitCamera, Projection, screen_to_ray};
pub use graph::{SceneGraph, SceneNode};
pub use picking::{ray_aabb_intersection, ray_plane_intersection};
