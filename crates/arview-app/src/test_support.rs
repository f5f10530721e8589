//! Shared fixtures for viewer tests

use std::time::Duration;

use glam::{Mat4, Vec3};

use arview_core::{
    AssetNode, BoundingBox, HapticFeedbackScheduler, PlaneAlignment, PlaneAnchor, SceneEngine,
    TransientPattern, ViewerConfig, ViewerMode,
};
use arview_scene::{Projection, SceneGraph};

use crate::event::ViewerEvent;
use crate::sim::{LoggingHapticEngine, SimulatedSession};
use crate::viewer::AssetViewer;

pub type TestViewer = AssetViewer<SceneGraph, SimulatedSession>;

/// Device camera at the origin, tilted down towards the floor
pub fn device_camera() -> Mat4 {
    Mat4::from_rotation_x(-0.6)
}

/// A 2x2x2 cube centered at the origin
pub fn cube_asset() -> AssetNode {
    AssetNode::new("scene").with_child(
        AssetNode::new("cube").with_bounds(BoundingBox::new(Vec3::splat(-1.0), Vec3::ONE)),
    )
}

/// Large floor 1.5 units below the device
pub fn floor() -> PlaneAnchor {
    PlaneAnchor::new(
        PlaneAlignment::Horizontal,
        Mat4::from_translation(Vec3::new(0.0, -1.5, 0.0)),
        Vec3::new(10.0, 0.0, 10.0),
    )
}

pub fn viewer() -> TestViewer {
    let scene = SceneGraph::new();
    let mut session = SimulatedSession::new(scene.viewport_size(), Projection::default());
    session.set_camera(device_camera());
    let haptics = HapticFeedbackScheduler::new(
        Box::new(LoggingHapticEngine::default()),
        TransientPattern {
            duration: Duration::from_millis(200),
        },
        Duration::from_millis(500),
    );
    AssetViewer::new(ViewerConfig::default(), scene, session, haptics)
}

/// Viewer in object view with the cube loaded
pub fn loaded_viewer() -> TestViewer {
    let mut viewer = viewer();
    viewer.handle_event(ViewerEvent::AssetReady(cube_asset()));
    viewer.update();
    viewer
}

/// Enter AR, detect the floor and run one frame. Returns the floor anchor.
pub fn attach_to_floor(viewer: &mut TestViewer) -> PlaneAnchor {
    let anchor = viewer.session_mut().add_anchor(floor());
    let frame = viewer.session().frame(0.0);
    let events = viewer.events();
    events.push(ViewerEvent::SetMode(ViewerMode::Ar));
    events.push(ViewerEvent::AnchorsAdded(vec![anchor]));
    events.push(ViewerEvent::FrameUpdated(frame));
    viewer.update();
    anchor
}
