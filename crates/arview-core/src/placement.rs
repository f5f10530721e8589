//! Placement state persisted across frames while in AR mode

use glam::Vec3;
use tracing::debug;

use crate::anchor::{PlaneAlignment, PlaneAnchor};
use crate::compose::scale_detent_crossed;
use crate::gesture::GestureState;

/// Whether the object is pinned to a plane.
///
/// The anchor and the world point are held together so one can never be set
/// without the other.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Attachment {
    #[default]
    Unattached,
    Attached {
        anchor: PlaneAnchor,
        /// World-space point the object is pinned to
        point: Vec3,
    },
}

impl Attachment {
    pub fn anchor(&self) -> Option<&PlaneAnchor> {
        match self {
            Attachment::Attached { anchor, .. } => Some(anchor),
            Attachment::Unattached => None,
        }
    }

    pub fn point(&self) -> Option<Vec3> {
        match self {
            Attachment::Attached { point, .. } => Some(*point),
            Attachment::Unattached => None,
        }
    }

    pub fn alignment(&self) -> Option<PlaneAlignment> {
        self.anchor().map(|a| a.alignment)
    }

    pub fn is_attached(&self) -> bool {
        matches!(self, Attachment::Attached { .. })
    }
}

/// User manipulation accumulated since the object last attached to a plane
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementState {
    /// Total rotation about the plane normal (radians)
    pub cumulative_rotation: f32,
    /// Total uniform scale
    pub cumulative_scale: f32,
    attachment: Attachment,
}

impl Default for PlacementState {
    fn default() -> Self {
        Self {
            cumulative_rotation: 0.0,
            cumulative_scale: 1.0,
            attachment: Attachment::Unattached,
        }
    }
}

impl PlacementState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attachment(&self) -> &Attachment {
        &self.attachment
    }

    pub fn current_anchor(&self) -> Option<&PlaneAnchor> {
        self.attachment.anchor()
    }

    pub fn world_anchor_point(&self) -> Option<Vec3> {
        self.attachment.point()
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_attached()
    }

    /// Pin the object to `point` on `anchor`.
    ///
    /// Coming from the unattached state the scale is reset to
    /// `default_scale`. Whenever the alignment differs from the previous
    /// anchor's (including having no previous anchor) the rotation resets,
    /// since the rotation axis changes meaning.
    pub fn attach(&mut self, anchor: PlaneAnchor, point: Vec3, default_scale: f32) {
        if !self.is_attached() {
            self.cumulative_scale = default_scale;
        }
        if self.attachment.alignment() != Some(anchor.alignment) {
            self.cumulative_rotation = 0.0;
        }
        debug!(
            "Attaching to {:?} anchor {} at {:?}",
            anchor.alignment, anchor.id, point
        );
        self.attachment = Attachment::Attached { anchor, point };
    }

    /// Drop the attachment; rotation and scale are kept until the next attach
    pub fn detach(&mut self) {
        self.attachment = Attachment::Unattached;
    }

    /// Replace the held anchor snapshot with a newer one from the session.
    ///
    /// Does nothing if `anchor` is not the held anchor. Returns true if the
    /// snapshot was refreshed.
    pub fn refresh_anchor(&mut self, anchor: &PlaneAnchor) -> bool {
        let Attachment::Attached { anchor: held, .. } = &mut self.attachment else {
            return false;
        };
        if held.id != anchor.id {
            return false;
        }
        if held.alignment != anchor.alignment {
            self.cumulative_rotation = 0.0;
        }
        *held = *anchor;
        true
    }

    /// Fold one frame of gesture deltas into the cumulative values.
    ///
    /// Returns true if the scale entered the detent band around native scale
    /// on this update.
    pub fn apply_gestures(&mut self, gestures: &GestureState, detent_tolerance: f32) -> bool {
        if gestures.rotation_delta != 0.0 {
            self.cumulative_rotation += gestures.rotation_delta;
        }
        if gestures.scale_factor_delta != 1.0 {
            let old_scale = self.cumulative_scale;
            self.cumulative_scale *= gestures.scale_factor_delta;
            return scale_detent_crossed(old_scale, self.cumulative_scale, detent_tolerance);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec2};

    fn anchor(alignment: PlaneAlignment) -> PlaneAnchor {
        PlaneAnchor::new(alignment, Mat4::IDENTITY, Vec3::ONE)
    }

    fn gestures(rotation: f32, scale: f32) -> GestureState {
        GestureState {
            rotation_delta: rotation,
            scale_factor_delta: scale,
            drag_is_active: false,
            drag_screen_point: Vec2::ZERO,
        }
    }

    #[test]
    fn test_attachment_is_both_or_neither() {
        let mut state = PlacementState::new();
        assert!(state.current_anchor().is_none());
        assert!(state.world_anchor_point().is_none());

        state.attach(anchor(PlaneAlignment::Horizontal), Vec3::X, 0.5);
        assert!(state.current_anchor().is_some());
        assert_eq!(state.world_anchor_point(), Some(Vec3::X));

        state.detach();
        assert!(state.current_anchor().is_none());
        assert!(state.world_anchor_point().is_none());
    }

    #[test]
    fn test_first_attach_applies_default_scale() {
        let mut state = PlacementState::new();
        state.attach(anchor(PlaneAlignment::Horizontal), Vec3::ZERO, 0.25);
        assert_eq!(state.cumulative_scale, 0.25);

        // Re-placement while attached keeps the user's scale
        state.cumulative_scale = 0.8;
        state.attach(anchor(PlaneAlignment::Horizontal), Vec3::Y, 0.25);
        assert_eq!(state.cumulative_scale, 0.8);
    }

    #[test]
    fn test_alignment_change_resets_rotation() {
        let mut state = PlacementState::new();
        state.attach(anchor(PlaneAlignment::Horizontal), Vec3::ZERO, 1.0);
        state.cumulative_rotation = 2.75;

        state.attach(anchor(PlaneAlignment::Vertical), Vec3::Z, 1.0);
        assert_eq!(state.cumulative_rotation, 0.0);
    }

    #[test]
    fn test_same_alignment_keeps_rotation() {
        let mut state = PlacementState::new();
        state.attach(anchor(PlaneAlignment::Horizontal), Vec3::ZERO, 1.0);
        state.cumulative_rotation = 1.25;

        state.attach(anchor(PlaneAlignment::Horizontal), Vec3::X, 1.0);
        assert_eq!(state.cumulative_rotation, 1.25);
    }

    #[test]
    fn test_refresh_only_touches_held_anchor() {
        let mut state = PlacementState::new();
        let held = anchor(PlaneAlignment::Horizontal);
        state.attach(held, Vec3::ZERO, 1.0);

        let other = anchor(PlaneAlignment::Horizontal);
        assert!(!state.refresh_anchor(&other));

        let mut moved = held;
        moved.transform = Mat4::from_translation(Vec3::Y);
        assert!(state.refresh_anchor(&moved));
        assert_eq!(state.current_anchor().unwrap().transform, moved.transform);
    }

    #[test]
    fn test_refresh_with_new_alignment_resets_rotation() {
        let mut state = PlacementState::new();
        let held = anchor(PlaneAlignment::Horizontal);
        state.attach(held, Vec3::ZERO, 1.0);
        state.cumulative_rotation = 1.5;

        let mut same = held;
        same.transform = Mat4::from_translation(Vec3::X);
        assert!(state.refresh_anchor(&same));
        assert_eq!(state.cumulative_rotation, 1.5);

        let mut reclassified = same;
        reclassified.alignment = PlaneAlignment::Vertical;
        assert!(state.refresh_anchor(&reclassified));
        assert_eq!(state.cumulative_rotation, 0.0);
        assert_eq!(
            state.attachment().alignment(),
            Some(PlaneAlignment::Vertical)
        );
    }

    #[test]
    fn test_apply_gestures_accumulates() {
        let mut state = PlacementState::new();
        state.attach(anchor(PlaneAlignment::Horizontal), Vec3::ZERO, 0.5);

        state.apply_gestures(&gestures(0.5, 2.0), 0.05);
        state.apply_gestures(&gestures(-0.25, 1.5), 0.05);
        assert_eq!(state.cumulative_rotation, 0.25);
        assert_eq!(state.cumulative_scale, 1.5);
    }

    #[test]
    fn test_detent_fires_once_on_entry() {
        let mut state = PlacementState::new();
        state.attach(anchor(PlaneAlignment::Horizontal), Vec3::ZERO, 1.10);

        assert!(state.apply_gestures(&gestures(0.0, 1.02 / 1.10), 0.05));
        assert!(!state.apply_gestures(&gestures(0.0, 0.98 / 1.02), 0.05));
    }

    #[test]
    fn test_neutral_gestures_never_trigger_detent() {
        let mut state = PlacementState::new();
        state.attach(anchor(PlaneAlignment::Horizontal), Vec3::ZERO, 1.0);
        assert!(!state.apply_gestures(&GestureState::default(), 0.05));
    }
}
