//! Viewer mode

use std::fmt;

/// Which of the two views currently presents the object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewerMode {
    /// Static scene with a turntable camera
    #[default]
    Object,
    /// Live camera feed with the object anchored to detected planes
    Ar,
}

impl ViewerMode {
    /// The view that is hidden while this one is shown
    pub fn other(self) -> Self {
        match self {
            ViewerMode::Object => ViewerMode::Ar,
            ViewerMode::Ar => ViewerMode::Object,
        }
    }
}

impl fmt::Display for ViewerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerMode::Object => write!(f, "object"),
            ViewerMode::Ar => write!(f, "AR"),
        }
    }
}
