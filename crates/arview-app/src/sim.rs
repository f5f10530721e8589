//! Simulated AR hardware
//!
//! [`SimulatedSession`] stands in for a tracking session: it holds a scripted
//! camera pose and a list of finite plane anchors, and answers raycasts by
//! intersecting the camera ray with those planes. [`LoggingHapticEngine`]
//! stands in for the feedback hardware.

use glam::{Mat4, Vec2, Vec3};
use tracing::{debug, info};
use uuid::Uuid;

use arview_core::{
    ArFrame, ArSession, HapticEngine, HapticError, PlaneAnchor, RaycastAlignment, RaycastHit,
    RaycastTarget, SessionConfig, SessionError, TransientPattern,
};
use arview_scene::{Projection, ray_plane_intersection, screen_to_ray};

/// Scripted tracking session
#[derive(Debug, Clone)]
pub struct SimulatedSession {
    camera: Mat4,
    projection: Projection,
    viewport: Vec2,
    anchors: Vec<PlaneAnchor>,
    running: bool,
    run_count: u32,
    last_config: Option<SessionConfig>,
    failure: Option<SessionError>,
}

impl SimulatedSession {
    /// Session whose camera sits at the origin looking down `-z`
    pub fn new(viewport: Vec2, projection: Projection) -> Self {
        Self {
            camera: Mat4::IDENTITY,
            projection,
            viewport,
            anchors: Vec::new(),
            running: false,
            run_count: 0,
            last_config: None,
            failure: None,
        }
    }

    /// Make every following `run` fail with `error`
    pub fn fail_with(&mut self, error: SessionError) {
        self.failure = Some(error);
    }

    pub fn set_camera(&mut self, camera: Mat4) {
        self.camera = camera;
    }

    pub fn camera(&self) -> Mat4 {
        self.camera
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    /// Tracking update for the current camera pose
    pub fn frame(&self, timestamp: f64) -> ArFrame {
        ArFrame {
            timestamp,
            camera_transform: self.camera,
        }
    }

    /// Start tracking a plane; returns the snapshot to report as added
    pub fn add_anchor(&mut self, anchor: PlaneAnchor) -> PlaneAnchor {
        self.anchors.push(anchor);
        anchor
    }

    /// Replace a tracked plane; returns the snapshot to report as updated
    pub fn update_anchor(&mut self, anchor: PlaneAnchor) -> Option<PlaneAnchor> {
        let slot = self.anchors.iter_mut().find(|a| a.id == anchor.id)?;
        *slot = anchor;
        Some(anchor)
    }

    /// Stop tracking a plane; returns the snapshot to report as removed
    pub fn remove_anchor(&mut self, id: Uuid) -> Option<PlaneAnchor> {
        let index = self.anchors.iter().position(|a| a.id == id)?;
        Some(self.anchors.remove(index))
    }

    pub fn anchors(&self) -> &[PlaneAnchor] {
        &self.anchors
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of successful `run` calls
    pub fn run_count(&self) -> u32 {
        self.run_count
    }

    /// Configuration of the last successful `run`
    pub fn last_config(&self) -> Option<&SessionConfig> {
        self.last_config.as_ref()
    }

    /// Hit on `anchor`'s finite extent along the ray, if any
    fn intersect(anchor: &PlaneAnchor, origin: Vec3, dir: Vec3) -> Option<RaycastHit> {
        let t = ray_plane_intersection(origin, dir, anchor.position(), anchor.normal())?;
        let point = origin + dir * t;

        let local = anchor.transform.inverse().transform_point3(point) - anchor.center;
        let half = anchor.extent * 0.5;
        if local.x.abs() > half.x || local.z.abs() > half.z {
            return None;
        }

        let mut world_transform = anchor.orientation();
        world_transform.w_axis = point.extend(1.0);
        Some(RaycastHit {
            anchor: *anchor,
            world_transform,
        })
    }
}

impl ArSession for SimulatedSession {
    fn run(&mut self, config: &SessionConfig) -> Result<(), SessionError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        info!(
            "Simulated session running (horizontal={}, vertical={})",
            config.plane_detection.horizontal, config.plane_detection.vertical
        );
        self.running = true;
        self.run_count += 1;
        self.last_config = Some(config.clone());
        Ok(())
    }

    fn pause(&mut self) {
        debug!("Simulated session paused");
        self.running = false;
    }

    fn raycast(
        &self,
        screen_point: Vec2,
        target: RaycastTarget,
        alignment: RaycastAlignment,
    ) -> Vec<RaycastHit> {
        match target {
            RaycastTarget::ExistingPlaneGeometry => {}
        }
        let (origin, dir) = screen_to_ray(
            self.camera,
            self.projection.matrix(self.viewport),
            screen_point,
            self.viewport,
        );
        self.anchors
            .iter()
            .filter(|a| alignment.accepts(a.alignment))
            .filter_map(|a| Self::intersect(a, origin, dir))
            .collect()
    }
}

/// Feedback "hardware" that logs each pulse
#[derive(Debug, Default)]
pub struct LoggingHapticEngine {
    pattern: Option<TransientPattern>,
}

impl HapticEngine for LoggingHapticEngine {
    fn prepare(&mut self, pattern: &TransientPattern) -> Result<(), HapticError> {
        self.pattern = Some(*pattern);
        Ok(())
    }

    fn play(&mut self) -> Result<(), HapticError> {
        let pattern = self
            .pattern
            .ok_or_else(|| HapticError::Pattern("no pattern prepared".into()))?;
        info!("Haptic pulse ({} ms)", pattern.duration.as_millis());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use arview_core::PlaneAlignment;

    fn viewport() -> Vec2 {
        Vec2::new(400.0, 400.0)
    }

    fn looking_down() -> SimulatedSession {
        let mut session = SimulatedSession::new(viewport(), Projection::default());
        session.set_camera(
            Mat4::from_translation(Vec3::new(0.0, 1.5, 0.0))
                * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2),
        );
        session
    }

    fn floor(size: f32) -> PlaneAnchor {
        PlaneAnchor::new(
            PlaneAlignment::Horizontal,
            Mat4::IDENTITY,
            Vec3::new(size, 0.0, size),
        )
    }

    #[test]
    fn test_raycast_hits_floor_under_camera() {
        let mut session = looking_down();
        let anchor = session.add_anchor(floor(2.0));

        let hits = session.raycast(
            viewport() * 0.5,
            RaycastTarget::ExistingPlaneGeometry,
            RaycastAlignment::Any,
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].anchor_id(), anchor.id);
        assert_relative_eq!(hits[0].point().y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(hits[0].point().x, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_raycast_respects_extent() {
        let mut session = looking_down();
        session.add_anchor(PlaneAnchor::new(
            PlaneAlignment::Horizontal,
            Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)),
            Vec3::new(1.0, 0.0, 1.0),
        ));
        let hits = session.raycast(
            viewport() * 0.5,
            RaycastTarget::ExistingPlaneGeometry,
            RaycastAlignment::Any,
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn test_raycast_alignment_filter() {
        let mut session = looking_down();
        session.add_anchor(floor(2.0));
        let hits = session.raycast(
            viewport() * 0.5,
            RaycastTarget::ExistingPlaneGeometry,
            RaycastAlignment::Vertical,
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn test_remove_anchor() {
        let mut session = looking_down();
        let anchor = session.add_anchor(floor(2.0));
        assert_eq!(session.remove_anchor(anchor.id).map(|a| a.id), Some(anchor.id));
        assert!(session.anchors().is_empty());
        assert!(session.remove_anchor(anchor.id).is_none());
    }

    #[test]
    fn test_run_failure() {
        let mut session = looking_down();
        session.fail_with(SessionError::Unsupported);
        assert!(session.run(&SessionConfig::default()).is_err());
        assert!(!session.is_running());
        assert_eq!(session.run_count(), 0);
    }
}
