//! AR Viewer main entry point
//!
//! Runs a scripted session against the simulated AR hardware:
//! load an asset, enter AR, place it on the floor, manipulate it, lose the
//! floor, and return to the object view.
//!
//! Usage: `arview [config.ron]`

use std::time::Duration;

use glam::{Mat4, Vec2, Vec3};
use tracing::info;

use arview_app::{
    AssetError, AssetViewer, LoggingHapticEngine, SimulatedSession, ViewerEvent, spawn_loader,
};
use arview_core::{
    AssetNode, BoundingBox, GesturePhase, HapticFeedbackScheduler, PlaneAlignment, PlaneAnchor,
    SceneEngine, TransientPattern, ViewerConfig, ViewerMode,
};
use arview_scene::{Projection, SceneGraph};

/// Simulated frame interval
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arview_app=debug,arview_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AR Viewer");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            ViewerConfig::load(&path)?
        }
        None => ViewerConfig::default(),
    };

    // The AR view renders through the device lens
    let device_lens = Projection::default();
    let mut scene = SceneGraph::new();
    scene.set_projection(ViewerMode::Ar, device_lens);
    let mut session = SimulatedSession::new(scene.viewport_size(), device_lens);
    // Handheld device at chest height, looking down at the floor
    session.set_camera(
        Mat4::from_translation(Vec3::new(0.0, 1.4, 0.0)) * Mat4::from_rotation_x(-0.5),
    );
    let haptics = HapticFeedbackScheduler::new(
        Box::new(LoggingHapticEngine::default()),
        TransientPattern {
            duration: config.haptics.pulse(),
        },
        config.haptics.lockout(),
    );
    let mut viewer = AssetViewer::new(config, scene, session, haptics);
    let object_lens = viewer.object_camera().projection;
    viewer
        .scene_mut()
        .set_projection(ViewerMode::Object, object_lens);
    info!(
        "Long press starts a drag after {} ms",
        viewer.long_press_min_duration().as_millis()
    );
    let events = viewer.events();

    // Asset arrives from a worker thread
    spawn_loader(events.clone(), "chair", load_chair)
        .join()
        .map_err(|_| "asset loader panicked")?;
    run_frames(&mut viewer, 2);
    info!(
        "Object view ready: first frame rendered = {}",
        viewer.has_rendered_first_frame()
    );

    events.push(ViewerEvent::CameraOrbit {
        delta_x: 120.0,
        delta_y: -40.0,
    });
    events.push(ViewerEvent::CameraZoom(1.0));
    run_frames(&mut viewer, 1);

    // Switch to AR; the floor is detected a few frames later
    events.push(ViewerEvent::SetMode(ViewerMode::Ar));
    run_frames(&mut viewer, 3);
    let floor = viewer.session_mut().add_anchor(PlaneAnchor::new(
        PlaneAlignment::Horizontal,
        Mat4::IDENTITY,
        Vec3::new(8.0, 0.0, 8.0),
    ));
    events.push(ViewerEvent::AnchorsAdded(vec![floor]));
    run_frames(&mut viewer, 3);
    report(&viewer);

    // Two-finger rotate and pinch towards native scale
    events.push(ViewerEvent::Rotation {
        phase: GesturePhase::Began,
        rotation: 0.3,
    });
    events.push(ViewerEvent::Pinch {
        phase: GesturePhase::Began,
        scale: 1.2,
    });
    run_frames(&mut viewer, 1);
    events.push(ViewerEvent::Rotation {
        phase: GesturePhase::Changed,
        rotation: 0.2,
    });
    events.push(ViewerEvent::Pinch {
        phase: GesturePhase::Changed,
        scale: 1.5,
    });
    events.push(ViewerEvent::Rotation {
        phase: GesturePhase::Ended,
        rotation: 0.0,
    });
    run_frames(&mut viewer, 4);
    report(&viewer);

    // Drag the object closer
    let center = viewer.scene().viewport_size() * 0.5;
    events.push(ViewerEvent::LongPress {
        phase: GesturePhase::Began,
        point: center,
    });
    for step in 1..=5 {
        events.push(ViewerEvent::LongPress {
            phase: GesturePhase::Changed,
            point: center + Vec2::new(0.0, step as f32 * 40.0),
        });
        run_frames(&mut viewer, 1);
    }
    events.push(ViewerEvent::LongPress {
        phase: GesturePhase::Ended,
        point: center + Vec2::new(0.0, 200.0),
    });
    run_frames(&mut viewer, 1);
    report(&viewer);

    // Tracking loses the floor, then finds it again
    if let Some(lost) = viewer.session_mut().remove_anchor(floor.id) {
        events.push(ViewerEvent::AnchorsRemoved(vec![lost]));
    }
    run_frames(&mut viewer, 2);
    report(&viewer);
    let floor = viewer.session_mut().add_anchor(floor);
    events.push(ViewerEvent::AnchorsAdded(vec![floor]));
    run_frames(&mut viewer, 2);
    report(&viewer);

    events.push(ViewerEvent::SessionInterrupted);
    run_frames(&mut viewer, 2);
    events.push(ViewerEvent::SessionInterruptionEnded);
    run_frames(&mut viewer, 2);

    events.push(ViewerEvent::SetMode(ViewerMode::Object));
    run_frames(&mut viewer, 1);
    info!(
        "Back in object view, camera distance {:.2}",
        viewer.object_camera().distance
    );
    info!("Haptic pulses: {}", viewer.haptics().pulses_dispatched());

    viewer.shutdown();
    Ok(())
}

/// A chair-sized asset: seat, back and four legs
fn load_chair() -> Result<AssetNode, AssetError> {
    let leg = |x: f32, z: f32| {
        AssetNode::new("leg")
            .with_transform(Mat4::from_translation(Vec3::new(x, 0.22, z)))
            .with_bounds(BoundingBox::new(
                Vec3::new(-0.02, -0.22, -0.02),
                Vec3::new(0.02, 0.22, 0.02),
            ))
    };
    let chair = AssetNode::new("chair")
        .with_child(
            AssetNode::new("seat")
                .with_transform(Mat4::from_translation(Vec3::new(0.0, 0.46, 0.0)))
                .with_bounds(BoundingBox::new(
                    Vec3::new(-0.22, -0.02, -0.22),
                    Vec3::new(0.22, 0.02, 0.22),
                )),
        )
        .with_child(
            AssetNode::new("back")
                .with_transform(Mat4::from_translation(Vec3::new(0.0, 0.7, -0.2)))
                .with_bounds(BoundingBox::new(
                    Vec3::new(-0.22, -0.22, -0.02),
                    Vec3::new(0.22, 0.22, 0.02),
                )),
        )
        .with_child(leg(-0.2, -0.2))
        .with_child(leg(0.2, -0.2))
        .with_child(leg(-0.2, 0.2))
        .with_child(leg(0.2, 0.2));
    Ok(AssetNode::new("scene").with_child(chair))
}

/// Post a tracking frame per iteration, update, and advance tweens
fn run_frames(viewer: &mut AssetViewer<SceneGraph, SimulatedSession>, count: usize) {
    for i in 0..count {
        if viewer.current_mode() == ViewerMode::Ar {
            let frame = viewer.session().frame(i as f64 * FRAME.as_secs_f64());
            viewer.events().push(ViewerEvent::FrameUpdated(frame));
        }
        viewer.update();
        viewer.scene_mut().advance(FRAME);
    }
}

fn report(viewer: &AssetViewer<SceneGraph, SimulatedSession>) {
    let Some(placement) = viewer.placement() else {
        return;
    };
    match placement.world_anchor_point() {
        Some(point) => info!(
            "Placed at ({:.2}, {:.2}, {:.2}) rotation {:.2} rad, scale {:.2}",
            point.x, point.y, point.z, placement.cumulative_rotation, placement.cumulative_scale
        ),
        None => info!("Searching for a plane..."),
    }
}
