//! Viewer events and the serial queue they travel through
//!
//! Gesture recognizers, session callbacks, the asset loader and the renderer
//! run on their own dispatch contexts. They only ever push events; the
//! viewer drains the queue at the start of each update and is the single
//! writer of placement state.

use std::sync::Arc;

use glam::Vec2;
use parking_lot::Mutex;

use arview_core::{ArFrame, AssetNode, GesturePhase, PlaneAnchor, ViewerMode};

/// Everything that can happen to the viewer between two updates
#[derive(Debug, Clone)]
pub enum ViewerEvent {
    /// Switch between object view and AR view
    SetMode(ViewerMode),

    // Gesture recognizers (AR view)
    /// Incremental rotation, positive is counter-clockwise about the plane
    /// normal. Screen-space recognizers report the opposite sign, so the UI
    /// negates their value before posting.
    Rotation { phase: GesturePhase, rotation: f32 },
    /// Incremental pinch scale factor
    Pinch { phase: GesturePhase, scale: f32 },
    /// Long press used to drag the object
    LongPress { phase: GesturePhase, point: Vec2 },

    // Session callbacks
    AnchorsAdded(Vec<PlaneAnchor>),
    AnchorsUpdated(Vec<PlaneAnchor>),
    AnchorsRemoved(Vec<PlaneAnchor>),
    FrameUpdated(ArFrame),
    SessionFailed(String),
    SessionInterrupted,
    SessionInterruptionEnded,

    // Asset loading
    /// A fully built subtree handed over by the loader
    AssetReady(AssetNode),
    AssetFailed(String),
    /// The engine finished preparing the scene for rendering
    ScenePrepared,

    // Presentation
    ViewportResized(Vec2),
    /// Turntable orbit in screen points (object view)
    CameraOrbit { delta_x: f32, delta_y: f32 },
    /// Turntable pan in screen points (object view)
    CameraPan(Vec2),
    /// Turntable zoom steps (object view)
    CameraZoom(f32),
}

/// Thread-safe FIFO of [`ViewerEvent`]s
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Arc<Mutex<Vec<ViewerEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next update
    pub fn push(&self, event: ViewerEvent) {
        self.events.lock().push(event);
    }

    /// Take all pending events in arrival order
    pub fn drain(&self) -> Vec<ViewerEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let queue = EventQueue::new();
        queue.push(ViewerEvent::SetMode(ViewerMode::Ar));
        queue.push(ViewerEvent::SessionInterrupted);

        let events = queue.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ViewerEvent::SetMode(ViewerMode::Ar)));
        assert!(matches!(events[1], ViewerEvent::SessionInterrupted));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_push_from_other_thread() {
        let queue = EventQueue::new();
        let sender = queue.clone();
        std::thread::spawn(move || sender.push(ViewerEvent::ScenePrepared))
            .join()
            .unwrap();
        assert_eq!(queue.len(), 1);
    }
}
