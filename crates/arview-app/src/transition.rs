//! Switching between object view and AR view
//!
//! Only the container node moves between the two view spaces. The hidden
//! view keeps its nodes and the anchor bookkeeping.

use glam::{Mat4, Vec3};
use tracing::info;

use arview_core::{ArSession, PlacementState, SceneEngine, ViewerMode, default_scale};

use crate::viewer::AssetViewer;

impl<S: SceneEngine, A: ArSession> AssetViewer<S, A> {
    /// Switch views. Undrained gesture deltas are discarded.
    pub fn set_mode(&mut self, mode: ViewerMode) {
        if mode == self.mode {
            return;
        }
        info!("Switching from {} view to {} view", self.mode, mode);
        self.gestures.reset();
        match mode {
            ViewerMode::Ar => self.enter_ar(),
            ViewerMode::Object => self.enter_object(),
        }
    }

    /// Carry the object in front of the AR camera and start searching for a
    /// plane. The object stays hidden until the first tracking frame.
    fn enter_ar(&mut self) {
        self.scene.set_view_hidden(ViewerMode::Object, true);
        self.scene.set_view_hidden(ViewerMode::Ar, false);

        let pov = self.scene.point_of_view(ViewerMode::Ar);
        self.scene.add_child(pov, self.container);
        self.scene.set_pivot(self.container, Mat4::IDENTITY);

        let bounds = self.scene.bounding_box(self.container);
        let scale = default_scale(&bounds, self.config.placement.ar_entry_max_world_size);
        let local = Mat4::from_translation(Vec3::new(
            0.0,
            0.0,
            -self.config.placement.ar_entry_offset,
        )) * Mat4::from_scale(Vec3::splat(scale))
            * Mat4::from_translation(-bounds.center());
        self.scene.set_transform(self.container, local);

        self.scene.set_hidden(self.container, true);
        self.awaiting_first_frame = true;
        self.placement = Some(PlacementState::new());
        self.mode = ViewerMode::Ar;

        self.start_session();
    }

    /// Put the object back at the origin of the static scene and frame it
    fn enter_object(&mut self) {
        self.pause_session();

        self.scene.set_view_hidden(ViewerMode::Ar, true);
        self.scene.set_view_hidden(ViewerMode::Object, false);

        let root = self.scene.root(ViewerMode::Object);
        self.scene.add_child(root, self.container);
        self.scene.set_pivot(self.container, Mat4::IDENTITY);
        self.scene.set_transform(self.container, Mat4::IDENTITY);
        self.scene.set_hidden(self.container, false);
        self.awaiting_first_frame = false;
        self.placement = None;
        self.mode = ViewerMode::Object;

        self.frame_object_camera();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ViewerEvent;
    use crate::test_support::*;
    use approx::assert_relative_eq;
    use arview_core::{GesturePhase, SessionStatus};

    #[test]
    fn test_enter_ar_carries_object_in_front_of_camera() {
        let mut viewer = loaded_viewer();
        viewer.set_mode(ViewerMode::Ar);

        let container = viewer.container();
        let scene = viewer.scene();
        assert_eq!(scene.parent(container), Some(scene.point_of_view(ViewerMode::Ar)));
        assert_eq!(scene.pivot(container), Mat4::IDENTITY);
        assert!(scene.is_hidden(container));
        assert!(scene.is_view_hidden(ViewerMode::Object));
        assert!(!scene.is_view_hidden(ViewerMode::Ar));

        // 2 unit cube fit into 0.3 units, half a unit ahead
        let (scale, _, translation) = scene.transform(container).to_scale_rotation_translation();
        assert_relative_eq!(scale.x, 0.15, epsilon = 1e-6);
        assert_relative_eq!(translation.z, -0.5, epsilon = 1e-6);

        let placement = viewer.placement().unwrap();
        assert!(!placement.is_attached());
        assert_eq!(viewer.session_status(), SessionStatus::Running);
        assert_eq!(viewer.session().run_count(), 1);
        let config = viewer.session().last_config().unwrap();
        assert!(config.plane_detection.horizontal && config.plane_detection.vertical);
        assert!(!config.environment_texturing);
    }

    #[test]
    fn test_first_frame_reveals_object() {
        let mut viewer = loaded_viewer();
        viewer.set_mode(ViewerMode::Ar);
        assert!(viewer.scene().is_hidden(viewer.container()));

        let frame = viewer.session().frame(0.0);
        viewer.handle_event(ViewerEvent::FrameUpdated(frame));
        assert!(!viewer.scene().is_hidden(viewer.container()));
    }

    #[test]
    fn test_round_trip_restores_object_view() {
        let mut viewer = loaded_viewer();
        attach_to_floor(&mut viewer);
        let events = viewer.events();
        events.push(ViewerEvent::Rotation {
            phase: GesturePhase::Began,
            rotation: 1.2,
        });
        events.push(ViewerEvent::Pinch {
            phase: GesturePhase::Began,
            scale: 0.4,
        });
        viewer.update();
        assert!(viewer.placement().unwrap().cumulative_rotation > 1.0);

        viewer.set_mode(ViewerMode::Object);

        let container = viewer.container();
        let scene = viewer.scene();
        assert_eq!(scene.parent(container), Some(scene.root(ViewerMode::Object)));
        assert_eq!(scene.pivot(container), Mat4::IDENTITY);
        assert_eq!(scene.transform(container), Mat4::IDENTITY);
        assert!(!scene.is_hidden(container));
        assert!(scene.is_view_hidden(ViewerMode::Ar));
        assert!(viewer.placement().is_none());
        assert!(!viewer.session().is_running());
        assert_eq!(viewer.session_status(), SessionStatus::Stopped);

        // Camera framed on the unscaled cube again
        assert_relative_eq!(
            viewer.object_camera().distance,
            3.0_f32.sqrt() * 3.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_reentering_ar_starts_fresh() {
        let mut viewer = loaded_viewer();
        attach_to_floor(&mut viewer);
        viewer.set_mode(ViewerMode::Object);
        viewer.set_mode(ViewerMode::Ar);

        let placement = viewer.placement().unwrap();
        assert!(!placement.is_attached());
        assert_eq!(placement.cumulative_rotation, 0.0);
        assert_eq!(viewer.session().run_count(), 2);
    }

    #[test]
    fn test_mode_switch_discards_pending_gestures() {
        let mut viewer = loaded_viewer();
        attach_to_floor(&mut viewer);
        viewer.handle_event(ViewerEvent::Rotation {
            phase: GesturePhase::Began,
            rotation: 0.7,
        });
        viewer.set_mode(ViewerMode::Object);
        assert!(viewer.gestures.peek().has_neutral_deltas());
    }

    #[test]
    fn test_same_mode_is_noop() {
        let mut viewer = loaded_viewer();
        viewer.set_mode(ViewerMode::Object);
        assert_eq!(viewer.session().run_count(), 0);
        assert_eq!(viewer.current_mode(), ViewerMode::Object);
    }
}
