//! AR Viewer Core
//!
//! Placement and manipulation engine for anchoring a loaded 3D object on
//! planes detected by an AR session.
//!
//! # Module Structure
//!
//! ```text
//! arview-core/
//! ├── anchor.rs      # Plane anchor snapshots and raycast hits
//! ├── bounds.rs      # Axis-aligned bounding boxes
//! ├── compose.rs     # World transform composition, default scale, scale detent
//! ├── config.rs      # Viewer configuration (RON)
//! ├── gesture.rs     # Gesture accumulation between frames
//! ├── haptics.rs     # Rate-limited haptic feedback
//! ├── mode.rs        # Viewer mode (object view / AR view)
//! ├── placement.rs   # Attachment and cumulative rotation/scale
//! ├── raycast.rs     # Raycast hit selection
//! ├── scene.rs       # 3D engine collaborator interface
//! ├── session.rs     # AR session collaborator interface
//! └── tracker.rs     # Plane anchor to proxy node mapping
//! ```

pub mod anchor;
pub mod bounds;
pub mod compose;
pub mod config;
pub mod constants;
pub mod gesture;
pub mod haptics;
pub mod mode;
pub mod placement;
pub mod raycast;
pub mod scene;
pub mod session;
pub mod tracker;

pub use anchor::{PlaneAlignment, PlaneAnchor, RaycastHit};
pub use bounds::BoundingBox;
pub use compose::{TransformComposer, default_scale, scale_detent_crossed};
pub use config::{
    AnimationConfig, CameraProfile, ConfigError, GestureConfig, HapticsConfig, LightingConfig,
    ObjectViewConfig, PlacementConfig, SunLightProfile, ViewProfile, ViewerConfig,
};
pub use gesture::{GestureAccumulator, GestureKind, GesturePhase, GestureState};
pub use haptics::{HapticEngine, HapticError, HapticFeedbackScheduler, TransientPattern};
pub use mode::ViewerMode;
pub use placement::{Attachment, PlacementState};
pub use raycast::{PlacementQuery, PlacementRaycaster};
pub use scene::{AssetNode, NodeId, SceneEngine, TransformAnimation};
pub use session::{
    ArFrame, ArSession, PlaneDetection, RaycastAlignment, RaycastTarget, SessionConfig,
    SessionError, SessionStatus,
};
pub use tracker::PlaneAnchorTracker;
