//! The asset viewer
//!
//! [`AssetViewer`] owns the placement engine and drives a [`SceneEngine`]
//! and an [`ArSession`]. Callers post [`ViewerEvent`]s from any thread and
//! call [`AssetViewer::update`] once per rendered frame:
//!
//! 1. pending events are applied in arrival order
//! 2. in AR view, gesture deltas are drained
//! 3. unanchored: a plane is searched from the screen center;
//!    anchored and dragging: the object follows the drag point
//! 4. the world transform is recomposed and applied with a short tween

use glam::Mat4;
use tracing::{debug, info, warn};

use arview_core::constants::ASSET_CONTAINER_NAME;
use arview_core::{
    ArSession, GesturePhase, GestureAccumulator, HapticFeedbackScheduler, NodeId, PlacementQuery,
    PlacementRaycaster, PlacementState, PlaneAnchor, PlaneAnchorTracker, RaycastHit, SceneEngine,
    SessionStatus, TransformComposer, ViewerConfig, ViewerMode, default_scale,
};
use arview_scene::{OrbitCamera, Projection};

use crate::event::{EventQueue, ViewerEvent};

/// Places a loaded asset in an object view or an AR view
pub struct AssetViewer<S: SceneEngine, A: ArSession> {
    pub(crate) config: ViewerConfig,
    pub(crate) scene: S,
    pub(crate) session: A,
    events: EventQueue,
    pub(crate) mode: ViewerMode,
    /// Parent of the loaded asset's nodes; the node that gets placed
    pub(crate) container: NodeId,
    asset_nodes: Vec<NodeId>,
    pub(crate) gestures: GestureAccumulator,
    /// Present only while in AR view
    pub(crate) placement: Option<PlacementState>,
    tracker: PlaneAnchorTracker,
    raycaster: PlacementRaycaster,
    composer: TransformComposer,
    haptics: HapticFeedbackScheduler,
    pub(crate) session_status: SessionStatus,
    pub(crate) object_camera: OrbitCamera,
    /// The container stays hidden until the first tracking frame after AR entry
    pub(crate) awaiting_first_frame: bool,
    has_rendered_first_frame: bool,
}

impl<S: SceneEngine, A: ArSession> AssetViewer<S, A> {
    /// Create a viewer in object view with an empty asset container
    pub fn new(
        config: ViewerConfig,
        mut scene: S,
        session: A,
        haptics: HapticFeedbackScheduler,
    ) -> Self {
        scene.configure_view(ViewerMode::Object, config.lighting.profile(ViewerMode::Object));
        scene.configure_view(ViewerMode::Ar, config.lighting.profile(ViewerMode::Ar));
        scene.set_view_hidden(ViewerMode::Object, false);
        scene.set_view_hidden(ViewerMode::Ar, true);

        let container = scene.create_node(ASSET_CONTAINER_NAME);
        scene.add_child(scene.root(ViewerMode::Object), container);

        let object_camera = OrbitCamera::new(Projection {
            fov: config.object_view.fov_degrees.to_radians(),
            ..Projection::default()
        });

        let mut viewer = Self {
            raycaster: PlacementRaycaster::new(config.placement.min_initial_distance),
            composer: TransformComposer::new(config.animation.transform_animation()),
            config,
            scene,
            session,
            events: EventQueue::new(),
            mode: ViewerMode::Object,
            container,
            asset_nodes: Vec::new(),
            gestures: GestureAccumulator::new(),
            placement: None,
            tracker: PlaneAnchorTracker::new(),
            haptics,
            session_status: SessionStatus::Stopped,
            object_camera,
            awaiting_first_frame: false,
            has_rendered_first_frame: false,
        };
        viewer.apply_object_camera();
        viewer
    }

    /// Queue shared with gesture recognizers, the session and loaders
    pub fn events(&self) -> EventQueue {
        self.events.clone()
    }

    pub fn current_mode(&self) -> ViewerMode {
        self.mode
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn session(&self) -> &A {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut A {
        &mut self.session
    }

    pub fn session_status(&self) -> SessionStatus {
        self.session_status
    }

    /// Placement state, present while in AR view
    pub fn placement(&self) -> Option<&PlacementState> {
        self.placement.as_ref()
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn tracker(&self) -> &PlaneAnchorTracker {
        &self.tracker
    }

    pub fn haptics(&self) -> &HapticFeedbackScheduler {
        &self.haptics
    }

    pub fn object_camera(&self) -> &OrbitCamera {
        &self.object_camera
    }

    /// Minimum press duration for the long-press recognizer driving the drag
    pub fn long_press_min_duration(&self) -> std::time::Duration {
        self.config.gestures.long_press_duration()
    }

    /// Whether the current asset has been prepared and shown at least once
    pub fn has_rendered_first_frame(&self) -> bool {
        self.has_rendered_first_frame
    }

    /// Proxy node for a plane anchor, created on first request
    pub fn node_for_anchor(&mut self, anchor: &PlaneAnchor) -> NodeId {
        let scene = &mut self.scene;
        self.tracker
            .node_for_anchor(anchor, |a| scene.create_plane_proxy(a))
    }

    /// Apply pending events, then run the per-frame placement update
    pub fn update(&mut self) {
        for event in self.events.drain() {
            self.handle_event(event);
        }
        self.update_placement();
    }

    /// Apply a single event immediately
    pub fn handle_event(&mut self, event: ViewerEvent) {
        match event {
            ViewerEvent::SetMode(mode) => self.set_mode(mode),
            ViewerEvent::Rotation { phase, rotation } => {
                if self.mode == ViewerMode::Ar {
                    self.gestures.on_rotation(phase, rotation);
                }
            }
            ViewerEvent::Pinch { phase, scale } => {
                if self.mode == ViewerMode::Ar {
                    self.gestures.on_pinch(phase, scale);
                }
            }
            ViewerEvent::LongPress { phase, point } => {
                if self.mode == ViewerMode::Ar {
                    let over_object = phase == GesturePhase::Began
                        && self.scene.hit_test(ViewerMode::Ar, point, self.container);
                    self.gestures.on_long_press(phase, point, over_object);
                }
            }
            ViewerEvent::AnchorsAdded(anchors) => self.tracker.anchors_added(&anchors),
            ViewerEvent::AnchorsUpdated(anchors) => {
                let scene = &mut self.scene;
                self.tracker
                    .anchors_updated(&anchors, self.placement.as_mut(), |node, anchor| {
                        scene.update_plane_proxy(node, anchor)
                    });
            }
            ViewerEvent::AnchorsRemoved(anchors) => {
                let dropped = self
                    .tracker
                    .anchors_removed(&anchors, self.placement.as_mut());
                for node in dropped {
                    self.scene.remove_node(node);
                }
            }
            ViewerEvent::FrameUpdated(frame) => {
                if self.mode != ViewerMode::Ar {
                    return;
                }
                let pov = self.scene.point_of_view(ViewerMode::Ar);
                self.scene
                    .set_world_transform(pov, frame.camera_transform, None);
                if self.awaiting_first_frame {
                    debug!("First tracking frame, revealing object");
                    self.scene.set_hidden(self.container, false);
                    self.awaiting_first_frame = false;
                }
            }
            ViewerEvent::SessionFailed(reason) => {
                warn!("AR session failed: {}", reason);
                self.session_status = SessionStatus::Failed;
            }
            ViewerEvent::SessionInterrupted => {
                if self.session_status.is_running() {
                    info!("AR session interrupted");
                    self.session_status = SessionStatus::Interrupted;
                }
            }
            ViewerEvent::SessionInterruptionEnded => {
                if self.session_status == SessionStatus::Interrupted {
                    info!("AR session interruption ended");
                    self.session_status = SessionStatus::Running;
                }
            }
            ViewerEvent::AssetReady(asset) => {
                self.remove_asset();
                for child in &asset.children {
                    let node = self.scene.instantiate(self.container, child);
                    self.asset_nodes.push(node);
                }
                info!("Asset '{}' handed over to the viewer", asset.name);
                self.has_rendered_first_frame = false;
                self.frame_object_camera();

                let events = self.events.clone();
                self.scene.prepare_for_render(
                    self.mode,
                    Box::new(move || events.push(ViewerEvent::ScenePrepared)),
                );
            }
            ViewerEvent::AssetFailed(reason) => {
                warn!("Asset failed to load: {}", reason);
            }
            ViewerEvent::ScenePrepared => {
                if !self.asset_nodes.is_empty() && !self.has_rendered_first_frame {
                    debug!("Scene prepared, showing asset");
                    self.has_rendered_first_frame = true;
                }
            }
            ViewerEvent::ViewportResized(size) => self.scene.set_viewport_size(size),
            ViewerEvent::CameraOrbit { delta_x, delta_y } => {
                if self.object_camera_enabled() {
                    let sensitivity = self.config.object_view.orbit_sensitivity;
                    self.object_camera
                        .orbit(-delta_x * sensitivity, delta_y * sensitivity);
                    self.apply_object_camera();
                }
            }
            ViewerEvent::CameraPan(delta) => {
                if self.object_camera_enabled() {
                    self.object_camera.pan(delta);
                    self.apply_object_camera();
                }
            }
            ViewerEvent::CameraZoom(steps) => {
                if self.object_camera_enabled() {
                    self.object_camera
                        .zoom(steps * self.config.object_view.zoom_sensitivity);
                    self.apply_object_camera();
                }
            }
        }
    }

    /// Stop the session before the viewer goes away
    pub fn shutdown(&mut self) {
        self.pause_session();
    }

    pub(crate) fn start_session(&mut self) {
        match self.session.run(&self.config.session) {
            Ok(()) => {
                info!("AR session started");
                self.session_status = SessionStatus::Running;
            }
            Err(e) => {
                warn!("Failed to start AR session: {}", e);
                self.session_status = SessionStatus::Failed;
            }
        }
    }

    pub(crate) fn pause_session(&mut self) {
        if self.session_status.is_running() {
            self.session.pause();
            info!("AR session paused");
        }
        self.session_status = SessionStatus::Stopped;
    }

    fn object_camera_enabled(&self) -> bool {
        self.mode == ViewerMode::Object
            && self
                .config
                .lighting
                .profile(ViewerMode::Object)
                .camera
                .allows_camera_control
    }

    /// Put the object-view camera in front of the container's bounding sphere
    pub(crate) fn frame_object_camera(&mut self) {
        let (center, radius) = self.scene.world_bounding_sphere(self.container);
        self.object_camera.frame(
            center,
            radius,
            self.config.object_view.camera_distance_factor,
        );
        self.apply_object_camera();
    }

    fn apply_object_camera(&mut self) {
        let pov = self.scene.point_of_view(ViewerMode::Object);
        self.scene
            .set_world_transform(pov, self.object_camera.world_transform(), None);
    }

    fn remove_asset(&mut self) {
        for node in self.asset_nodes.drain(..) {
            self.scene.remove_node(node);
        }
    }

    /// One frame of AR placement
    fn update_placement(&mut self) {
        if self.mode != ViewerMode::Ar || !self.session_status.is_running() {
            return;
        }
        let Some(placement) = self.placement.as_mut() else {
            return;
        };

        let gestures = self.gestures.drain();
        let ar_root = self.scene.root(ViewerMode::Ar);
        let camera_position = self
            .scene
            .world_transform(self.scene.point_of_view(ViewerMode::Ar))
            .w_axis
            .truncate();

        let was_attached = placement.is_attached();
        let hit = if was_attached {
            gestures.drag_point().and_then(|point| {
                self.raycaster.cast(
                    &self.session,
                    point,
                    camera_position,
                    PlacementQuery::Reposition,
                )
            })
        } else {
            let center = self.scene.viewport_size() * 0.5;
            self.raycaster
                .cast(&self.session, center, camera_position, PlacementQuery::Initial)
        };

        if let Some(hit) = hit {
            attach(
                &mut self.scene,
                &mut self.tracker,
                placement,
                self.container,
                ar_root,
                &hit,
                self.config.placement.reattach_max_world_size,
            );
        }

        if !placement.is_attached() {
            return;
        }

        if was_attached
            && placement.apply_gestures(&gestures, self.config.placement.scale_detent_tolerance)
        {
            debug!("Scale settled at native size");
            self.haptics.request_pulse();
        }

        let bounds = self.scene.bounding_box(self.container);
        if let Some(world) = self.composer.compose(placement, &bounds) {
            self.scene
                .set_world_transform(self.container, world, Some(self.composer.animation()));
        }
    }
}

/// Move the container into AR world space and pin it to a raycast hit
fn attach<S: SceneEngine>(
    scene: &mut S,
    tracker: &mut PlaneAnchorTracker,
    placement: &mut PlacementState,
    container: NodeId,
    ar_root: NodeId,
    hit: &RaycastHit,
    max_world_size: f32,
) {
    if scene.parent(container) != Some(ar_root) {
        // Keep the current pose while leaving the camera node
        let world = scene.world_transform(container);
        scene.add_child(ar_root, container);
        scene.set_pivot(container, Mat4::IDENTITY);
        scene.set_world_transform(container, world, None);
    }

    let scale = default_scale(&scene.bounding_box(container), max_world_size);
    tracker.node_for_anchor(&hit.anchor, |a| scene.create_plane_proxy(a));

    if !placement.is_attached() {
        info!(
            "Attached to {:?} plane {}",
            hit.alignment(),
            hit.anchor_id()
        );
    }
    placement.attach(hit.anchor, hit.point(), scale);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use approx::assert_relative_eq;
    use arview_core::SessionError;
    use glam::{Vec2, Vec3};

    #[test]
    fn test_new_viewer_starts_in_object_view() {
        let viewer = viewer();
        assert_eq!(viewer.current_mode(), ViewerMode::Object);
        assert!(viewer.placement().is_none());
        assert_eq!(
            viewer.scene().parent(viewer.container()),
            Some(viewer.scene().root(ViewerMode::Object))
        );
        assert!(viewer.scene().is_view_hidden(ViewerMode::Ar));
        assert!(viewer.scene().profile(ViewerMode::Ar).is_some());
    }

    #[test]
    fn test_asset_hand_off_reveals_after_prepare() {
        let mut viewer = viewer();
        viewer.events().push(ViewerEvent::AssetReady(cube_asset()));
        viewer.update();
        assert!(!viewer.has_rendered_first_frame());

        // Completion arrives through the queue
        viewer.update();
        assert!(viewer.has_rendered_first_frame());
        assert_relative_eq!(
            viewer.object_camera().distance,
            3.0_f32.sqrt() * 3.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_failed_asset_leaves_viewer_empty() {
        let mut viewer = viewer();
        viewer.handle_event(ViewerEvent::AssetFailed("corrupt".into()));
        viewer.update();
        assert!(!viewer.has_rendered_first_frame());
        assert_eq!(
            viewer.scene().bounding_box(viewer.container()),
            arview_core::BoundingBox::zero()
        );
    }

    #[test]
    fn test_initial_placement_rests_object_on_floor() {
        let mut viewer = loaded_viewer();
        let anchor = attach_to_floor(&mut viewer);

        let placement = viewer.placement().unwrap();
        assert_eq!(placement.current_anchor().map(|a| a.id), Some(anchor.id));
        assert_relative_eq!(placement.cumulative_scale, 0.75);

        let point = placement.world_anchor_point().unwrap();
        assert_relative_eq!(point.y, -1.5, epsilon = 1e-4);
        assert!(point.z < -0.5);

        // Base center of the cube sits on the hit point
        let world = viewer.scene().world_transform(viewer.container());
        let base = world.transform_point3(Vec3::new(0.0, -1.0, 0.0));
        assert!(base.abs_diff_eq(point, 1e-4));

        assert_eq!(
            viewer.scene().parent(viewer.container()),
            Some(viewer.scene().root(ViewerMode::Ar))
        );
        assert!(viewer.tracker().proxy(anchor.id).is_some());
        assert!(!viewer.scene().is_hidden(viewer.container()));
    }

    #[test]
    fn test_no_plane_keeps_searching() {
        let mut viewer = loaded_viewer();
        viewer.handle_event(ViewerEvent::SetMode(ViewerMode::Ar));
        let frame = viewer.session().frame(0.0);
        viewer.handle_event(ViewerEvent::FrameUpdated(frame));
        viewer.update();
        assert!(!viewer.placement().unwrap().is_attached());

        // The plane shows up later and is found on the next frame
        let anchor = viewer.session_mut().add_anchor(floor());
        viewer.events().push(ViewerEvent::AnchorsAdded(vec![anchor]));
        viewer.update();
        assert!(viewer.placement().unwrap().is_attached());
    }

    #[test]
    fn test_gestures_rotate_and_scale() {
        let mut viewer = loaded_viewer();
        attach_to_floor(&mut viewer);

        let events = viewer.events();
        events.push(ViewerEvent::Rotation {
            phase: GesturePhase::Began,
            rotation: 0.25,
        });
        events.push(ViewerEvent::Rotation {
            phase: GesturePhase::Changed,
            rotation: -0.1,
        });
        events.push(ViewerEvent::Pinch {
            phase: GesturePhase::Began,
            scale: 2.0,
        });
        viewer.update();

        let placement = viewer.placement().unwrap();
        assert_relative_eq!(placement.cumulative_rotation, 0.15, epsilon = 1e-6);
        assert_relative_eq!(placement.cumulative_scale, 1.5);

        // Deltas are consumed once
        viewer.update();
        let placement = viewer.placement().unwrap();
        assert_relative_eq!(placement.cumulative_rotation, 0.15, epsilon = 1e-6);
        assert_relative_eq!(placement.cumulative_scale, 1.5);
    }

    #[test]
    fn test_scale_detent_pulses_once() {
        let mut viewer = loaded_viewer();
        attach_to_floor(&mut viewer);

        viewer.events().push(ViewerEvent::Pinch {
            phase: GesturePhase::Began,
            scale: 1.3,
        });
        viewer.update();
        assert_eq!(viewer.haptics().pulses_dispatched(), 1);

        viewer.events().push(ViewerEvent::Pinch {
            phase: GesturePhase::Changed,
            scale: 1.02,
        });
        viewer.update();
        assert_eq!(viewer.haptics().pulses_dispatched(), 1);
    }

    #[test]
    fn test_drag_moves_object() {
        let mut viewer = loaded_viewer();
        attach_to_floor(&mut viewer);
        let before = viewer.placement().unwrap().world_anchor_point().unwrap();

        let center = viewer.scene().viewport_size() * 0.5;
        let events = viewer.events();
        events.push(ViewerEvent::LongPress {
            phase: GesturePhase::Began,
            point: center,
        });
        events.push(ViewerEvent::LongPress {
            phase: GesturePhase::Changed,
            point: Vec2::new(center.x, 700.0),
        });
        viewer.update();

        let after = viewer.placement().unwrap().world_anchor_point().unwrap();
        assert!(after.z > before.z);
        assert_relative_eq!(after.y, -1.5, epsilon = 1e-4);
        // Scale is kept when moving between points
        assert_relative_eq!(viewer.placement().unwrap().cumulative_scale, 0.75);
    }

    #[test]
    fn test_long_press_off_object_does_not_drag() {
        let mut viewer = loaded_viewer();
        attach_to_floor(&mut viewer);
        // Shrink the object so the left edge of the screen misses it
        viewer.events().push(ViewerEvent::Pinch {
            phase: GesturePhase::Began,
            scale: 0.2,
        });
        viewer.update();
        let before = viewer.placement().unwrap().world_anchor_point();

        let events = viewer.events();
        events.push(ViewerEvent::LongPress {
            phase: GesturePhase::Began,
            point: Vec2::new(5.0, 422.0),
        });
        events.push(ViewerEvent::LongPress {
            phase: GesturePhase::Changed,
            point: Vec2::new(195.0, 700.0),
        });
        viewer.update();
        assert_eq!(viewer.placement().unwrap().world_anchor_point(), before);
    }

    #[test]
    fn test_removing_current_anchor_detaches() {
        let mut viewer = loaded_viewer();
        let anchor = attach_to_floor(&mut viewer);
        let proxy = viewer.tracker().proxy(anchor.id).unwrap();
        let world = viewer.scene().world_transform(viewer.container());

        viewer.session_mut().remove_anchor(anchor.id);
        viewer
            .events()
            .push(ViewerEvent::AnchorsRemoved(vec![anchor]));
        viewer.update();

        assert!(!viewer.placement().unwrap().is_attached());
        assert!(viewer.tracker().proxy(anchor.id).is_none());
        assert!(!viewer.scene().contains(proxy));
        // The object stays where it was
        assert_eq!(viewer.scene().world_transform(viewer.container()), world);
    }

    #[test]
    fn test_removing_unrelated_anchor_changes_nothing() {
        let mut viewer = loaded_viewer();
        attach_to_floor(&mut viewer);
        let placement = viewer.placement().cloned();

        let wall = PlaneAnchor::new(
            arview_core::PlaneAlignment::Vertical,
            Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)),
            Vec3::new(2.0, 0.0, 2.0),
        );
        viewer.events().push(ViewerEvent::AnchorsRemoved(vec![wall]));
        viewer.update();
        assert_eq!(viewer.placement().cloned(), placement);
    }

    #[test]
    fn test_anchor_update_refreshes_proxy() {
        let mut viewer = loaded_viewer();
        let anchor = attach_to_floor(&mut viewer);
        let proxy = viewer.tracker().proxy(anchor.id).unwrap();

        let mut grown = anchor;
        grown.extent = Vec3::new(20.0, 0.0, 12.0);
        viewer.session_mut().update_anchor(grown);
        viewer
            .events()
            .push(ViewerEvent::AnchorsUpdated(vec![grown]));
        viewer.update();

        let geometry = viewer.scene().node(proxy).unwrap().geometry.unwrap();
        assert_relative_eq!(geometry.size().x, 20.0);
        assert_relative_eq!(geometry.size().z, 12.0);
        assert_eq!(
            viewer.placement().unwrap().current_anchor().map(|a| a.extent),
            Some(grown.extent)
        );
    }

    #[test]
    fn test_interruption_suspends_updates() {
        let mut viewer = loaded_viewer();
        attach_to_floor(&mut viewer);

        let events = viewer.events();
        events.push(ViewerEvent::SessionInterrupted);
        events.push(ViewerEvent::Rotation {
            phase: GesturePhase::Began,
            rotation: 0.5,
        });
        viewer.update();
        assert_eq!(viewer.session_status(), SessionStatus::Interrupted);
        assert_eq!(viewer.placement().unwrap().cumulative_rotation, 0.0);

        // Resumes from the existing placement
        events.push(ViewerEvent::SessionInterruptionEnded);
        viewer.update();
        assert_eq!(viewer.session_status(), SessionStatus::Running);
        let placement = viewer.placement().unwrap();
        assert!(placement.is_attached());
        assert_relative_eq!(placement.cumulative_rotation, 0.5);
    }

    #[test]
    fn test_session_failure_stops_placement() {
        let mut viewer = loaded_viewer();
        let anchor = attach_to_floor(&mut viewer);
        viewer
            .events()
            .push(ViewerEvent::SessionFailed("camera unavailable".into()));
        viewer.session_mut().remove_anchor(anchor.id);
        viewer.update();
        assert_eq!(viewer.session_status(), SessionStatus::Failed);

        // Failed is not resumed by an interruption ending
        viewer.handle_event(ViewerEvent::SessionInterruptionEnded);
        assert_eq!(viewer.session_status(), SessionStatus::Failed);
    }

    #[test]
    fn test_session_that_cannot_start() {
        let mut viewer = loaded_viewer();
        viewer.session_mut().fail_with(SessionError::Unsupported);
        attach_to_floor(&mut viewer);
        assert_eq!(viewer.session_status(), SessionStatus::Failed);
        assert!(!viewer.placement().unwrap().is_attached());
    }

    #[test]
    fn test_camera_events_only_in_object_view() {
        let mut viewer = loaded_viewer();
        viewer.handle_event(ViewerEvent::CameraOrbit {
            delta_x: 100.0,
            delta_y: 0.0,
        });
        let yaw = viewer.object_camera().yaw;
        assert!(yaw != 0.0);

        attach_to_floor(&mut viewer);
        viewer.handle_event(ViewerEvent::CameraZoom(1.0));
        viewer.handle_event(ViewerEvent::CameraOrbit {
            delta_x: 100.0,
            delta_y: 0.0,
        });
        assert_eq!(viewer.object_camera().yaw, yaw);
    }

    #[test]
    fn test_long_press_duration_follows_config() {
        let mut viewer = viewer();
        assert_eq!(viewer.long_press_min_duration().as_millis(), 50);

        viewer.config.gestures.long_press_min_duration = 0.5;
        assert_eq!(viewer.long_press_min_duration().as_millis(), 500);
    }

    #[test]
    fn test_shutdown_pauses_running_session() {
        let mut viewer = loaded_viewer();
        attach_to_floor(&mut viewer);
        assert!(viewer.session().is_running());
        viewer.shutdown();
        assert!(!viewer.session().is_running());
        assert_eq!(viewer.session_status(), SessionStatus::Stopped);
    }
}
