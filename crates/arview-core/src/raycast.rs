//! Raycast hit selection for placement

use glam::{Vec2, Vec3};

use crate::anchor::RaycastHit;
use crate::session::{ArSession, RaycastAlignment, RaycastTarget};

/// Why a placement raycast is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementQuery {
    /// Searching for a first plane from the screen center
    Initial,
    /// Moving an already anchored object under the user's finger
    Reposition,
}

/// Casts placement rays and picks the hit to attach to
#[derive(Debug, Clone)]
pub struct PlacementRaycaster {
    min_initial_distance: f32,
}

impl PlacementRaycaster {
    /// `min_initial_distance` keeps an object from being pinned directly in
    /// front of the viewer on first placement.
    pub fn new(min_initial_distance: f32) -> Self {
        Self {
            min_initial_distance: min_initial_distance.max(0.0),
        }
    }

    pub fn min_initial_distance(&self) -> f32 {
        self.min_initial_distance
    }

    /// Query the session at `screen_point` and select a hit
    pub fn cast<S: ArSession + ?Sized>(
        &self,
        session: &S,
        screen_point: Vec2,
        camera_position: Vec3,
        query: PlacementQuery,
    ) -> Option<RaycastHit> {
        let hits = session.raycast(
            screen_point,
            RaycastTarget::ExistingPlaneGeometry,
            RaycastAlignment::Any,
        );
        self.select(hits, camera_position, query)
    }

    /// Rank hits by distance to the camera and pick one.
    ///
    /// Initial placement takes the nearest hit at or beyond the minimum
    /// distance; repositioning takes the nearest hit overall.
    pub fn select(
        &self,
        mut hits: Vec<RaycastHit>,
        camera_position: Vec3,
        query: PlacementQuery,
    ) -> Option<RaycastHit> {
        let distance_sq = |hit: &RaycastHit| camera_position.distance_squared(hit.point());
        hits.sort_by(|a, b| distance_sq(a).total_cmp(&distance_sq(b)));

        match query {
            PlacementQuery::Initial => {
                let min_sq = self.min_initial_distance * self.min_initial_distance;
                hits.into_iter().find(|hit| distance_sq(hit) >= min_sq)
            }
            PlacementQuery::Reposition => hits.into_iter().next(),
        }
    }
}
