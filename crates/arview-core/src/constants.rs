//! Global constants for arview-core

/// Name of the node that holds the loaded asset's content
pub const ASSET_CONTAINER_NAME: &str = "AssetContainer";

/// Name of plane proxy nodes created for tracked anchors
pub const PLANE_PROXY_NAME: &str = "Plane";

/// Hits closer than this to the camera are ignored for initial placement (world units)
pub const MIN_INITIAL_PLACEMENT_DISTANCE: f32 = 0.5;

/// Largest world-space size of an object when AR mode is entered (world units)
pub const AR_ENTRY_MAX_WORLD_SIZE: f32 = 0.3;

/// Largest world-space size of an object when it attaches to a plane (world units)
pub const REATTACH_MAX_WORLD_SIZE: f32 = 1.5;

/// Distance in front of the AR camera at which an unanchored object floats
pub const AR_ENTRY_OFFSET: f32 = 0.5;

/// Half-width of the band around native scale that counts as the scale detent
pub const SCALE_DETENT_TOLERANCE: f32 = 0.05;

/// Minimum interval between two haptic pulses (milliseconds)
pub const HAPTIC_LOCKOUT_MS: u64 = 500;

/// Duration of the transient haptic pattern (milliseconds)
pub const HAPTIC_PULSE_MS: u64 = 200;

/// Duration of the linear transform animation (milliseconds)
pub const TRANSFORM_ANIMATION_MS: u64 = 50;

/// Object-view camera distance as a multiple of the bounding sphere radius
pub const OBJECT_VIEW_DISTANCE_FACTOR: f32 = 3.0;

/// Minimum press duration of the drag recognizer (seconds)
pub const LONG_PRESS_MIN_DURATION: f32 = 0.05;
