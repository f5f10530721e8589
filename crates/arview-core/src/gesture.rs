//! Gesture accumulation between frames.
//!
//! Recognizer callbacks can arrive several times between two rendered frames.
//! The accumulator folds them into a single [`GestureState`] which the frame
//! update drains exactly once.

use glam::Vec2;

/// Recognizer phase reported with each callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// Gesture recognizers installed on the AR view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Two-finger rotation
    Rotation,
    /// Two-finger pinch
    Pinch,
    /// Two-finger pan
    Pan,
    /// One-finger press-and-drag over the object
    LongPress,
}

impl GestureKind {
    /// Whether two recognizers may recognize at the same time.
    ///
    /// Any two distinct gestures out of rotation, pinch and pan combine.
    /// The long-press drag never needs to negotiate with the others.
    pub fn can_recognize_simultaneously(self, other: GestureKind) -> bool {
        self != other && self.is_transform_gesture() && other.is_transform_gesture()
    }

    fn is_transform_gesture(self) -> bool {
        matches!(
            self,
            GestureKind::Rotation | GestureKind::Pinch | GestureKind::Pan
        )
    }
}

/// Gesture input collected since the last drain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    /// Signed rotation accumulated since the last drain (radians)
    pub rotation_delta: f32,
    /// Multiplicative scale change since the last drain (1.0 = none)
    pub scale_factor_delta: f32,
    pub drag_is_active: bool,
    pub drag_screen_point: Vec2,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            rotation_delta: 0.0,
            scale_factor_delta: 1.0,
            drag_is_active: false,
            drag_screen_point: Vec2::ZERO,
        }
    }
}

impl GestureState {
    /// True when the rotation and scale deltas carry no change
    pub fn has_neutral_deltas(&self) -> bool {
        self.rotation_delta == 0.0 && self.scale_factor_delta == 1.0
    }

    /// Screen point of an active drag
    pub fn drag_point(&self) -> Option<Vec2> {
        self.drag_is_active.then_some(self.drag_screen_point)
    }
}

/// Folds recognizer callbacks into a [`GestureState`]
#[derive(Debug, Default)]
pub struct GestureAccumulator {
    state: GestureState,
}

impl GestureAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotation recognizer callback.
    ///
    /// `rotation` is the incremental rotation since the previous callback,
    /// already expressed in the placement's sign convention (counter-clockwise
    /// about the plane normal is positive).
    pub fn on_rotation(&mut self, phase: GesturePhase, rotation: f32) {
        match phase {
            GesturePhase::Began | GesturePhase::Changed if rotation.is_finite() => {
                self.state.rotation_delta += rotation;
            }
            _ => {}
        }
    }

    /// Pinch recognizer callback.
    ///
    /// `scale` is the incremental scale factor since the previous callback.
    /// Non-positive or non-finite factors are ignored.
    pub fn on_pinch(&mut self, phase: GesturePhase, scale: f32) {
        match phase {
            GesturePhase::Began | GesturePhase::Changed if scale.is_finite() && scale > 0.0 => {
                self.state.scale_factor_delta *= scale;
            }
            _ => {}
        }
    }

    /// Long-press recognizer callback.
    ///
    /// `over_object` is the result of hit testing `point` against the object
    /// subtree; it only matters when the press begins.
    pub fn on_long_press(&mut self, phase: GesturePhase, point: Vec2, over_object: bool) {
        match phase {
            GesturePhase::Began => {
                self.state.drag_is_active = over_object;
                if over_object {
                    self.state.drag_screen_point = point;
                }
            }
            GesturePhase::Changed => {
                if self.state.drag_is_active {
                    self.state.drag_screen_point = point;
                }
            }
            GesturePhase::Ended | GesturePhase::Cancelled => {
                self.state.drag_is_active = false;
            }
        }
    }

    /// Current state without consuming it
    pub fn peek(&self) -> &GestureState {
        &self.state
    }

    /// Take the accumulated deltas and reset them to neutral.
    ///
    /// The drag flag and point describe an ongoing touch rather than a delta,
    /// so they survive the drain.
    pub fn drain(&mut self) -> GestureState {
        let drained = self.state;
        self.state.rotation_delta = 0.0;
        self.state.scale_factor_delta = 1.0;
        drained
    }

    /// Discard everything, including an in-flight drag
    pub fn reset(&mut self) {
        self.state = GestureState::default();
    }
}
