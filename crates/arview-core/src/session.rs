//! AR session collaborator interface.
//!
//! Tracking and plane detection happen outside the engine. The session is
//! consumed through [`ArSession`]; its callbacks (anchors, frames,
//! interruptions) are delivered as events by the application layer.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::anchor::{PlaneAlignment, RaycastHit};

/// Which plane orientations the session should detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaneDetection {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Default for PlaneDetection {
    fn default() -> Self {
        Self {
            horizontal: true,
            vertical: true,
        }
    }
}

/// World-tracking configuration passed to [`ArSession::run`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    pub plane_detection: PlaneDetection,
    /// Whether the session should generate environment textures
    pub environment_texturing: bool,
}

/// Geometry a raycast is allowed to hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaycastTarget {
    /// Planes the session has already detected, limited to their extent
    ExistingPlaneGeometry,
}

/// Plane orientations a raycast is allowed to hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaycastAlignment {
    Horizontal,
    Vertical,
    Any,
}

impl RaycastAlignment {
    /// Whether a plane with the given alignment passes this filter
    pub fn accepts(self, alignment: PlaneAlignment) -> bool {
        match self {
            RaycastAlignment::Any => true,
            RaycastAlignment::Horizontal => alignment == PlaneAlignment::Horizontal,
            RaycastAlignment::Vertical => alignment == PlaneAlignment::Vertical,
        }
    }
}

/// Per-frame tracking update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArFrame {
    /// Capture time in seconds
    pub timestamp: f64,
    /// World transform of the device camera
    pub camera_transform: Mat4,
}

impl ArFrame {
    pub fn camera_position(&self) -> Vec3 {
        self.camera_transform.w_axis.truncate()
    }
}

/// Running state of the session as seen by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Stopped,
    Running,
    Interrupted,
    Failed,
}

impl SessionStatus {
    pub fn is_running(self) -> bool {
        self == SessionStatus::Running
    }
}

/// Session errors reported by the collaborator
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    #[error("World tracking is not supported on this device")]
    Unsupported,
    #[error("Session failed: {0}")]
    Failed(String),
}

/// The AR session consumed by the viewer
pub trait ArSession {
    /// Start (or restart) tracking with the given configuration
    fn run(&mut self, config: &SessionConfig) -> Result<(), SessionError>;

    /// Pause tracking; anchors are kept by the session
    fn pause(&mut self);

    /// Cast a ray from a screen point into the tracked world.
    ///
    /// Hits are returned in no particular order.
    fn raycast(
        &self,
        screen_point: Vec2,
        target: RaycastTarget,
        alignment: RaycastAlignment,
    ) -> Vec<RaycastHit>;
}
