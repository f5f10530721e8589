//! Viewer configuration
//!
//! Tunables for placement, animation, haptics and the two view profiles.
//! Stored as RON; every section falls back to its defaults when missing.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::mode::ViewerMode;
use crate::session::SessionConfig;

/// Placement tunables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// Hits closer than this are ignored for initial placement
    pub min_initial_distance: f32,
    /// Size bound used for the default scale when entering AR mode
    pub ar_entry_max_world_size: f32,
    /// Size bound used for the default scale when attaching to a plane
    pub reattach_max_world_size: f32,
    /// Distance in front of the camera of an unanchored object
    pub ar_entry_offset: f32,
    /// Half-width of the native-scale detent band
    pub scale_detent_tolerance: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_initial_distance: MIN_INITIAL_PLACEMENT_DISTANCE,
            ar_entry_max_world_size: AR_ENTRY_MAX_WORLD_SIZE,
            reattach_max_world_size: REATTACH_MAX_WORLD_SIZE,
            ar_entry_offset: AR_ENTRY_OFFSET,
            scale_detent_tolerance: SCALE_DETENT_TOLERANCE,
        }
    }
}

/// Transform animation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    pub transform_animation_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            transform_animation_ms: TRANSFORM_ANIMATION_MS,
        }
    }
}

impl AnimationConfig {
    pub fn transform_animation(&self) -> Duration {
        Duration::from_millis(self.transform_animation_ms)
    }
}

/// Haptic feedback settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HapticsConfig {
    /// Minimum interval between two pulses
    pub lockout_ms: u64,
    /// Duration of the transient pattern
    pub pulse_ms: u64,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            lockout_ms: HAPTIC_LOCKOUT_MS,
            pulse_ms: HAPTIC_PULSE_MS,
        }
    }
}

impl HapticsConfig {
    pub fn lockout(&self) -> Duration {
        Duration::from_millis(self.lockout_ms)
    }

    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }
}

/// Gesture recognizer settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    /// Minimum press duration before a drag starts (seconds)
    pub long_press_min_duration: f32,
}

impl GestureConfig {
    /// Press duration a long press must reach before the UI reports it
    pub fn long_press_duration(&self) -> Duration {
        Duration::from_secs_f32(self.long_press_min_duration.max(0.0))
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_min_duration: LONG_PRESS_MIN_DURATION,
        }
    }
}

/// Object-view turntable camera settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObjectViewConfig {
    /// Camera distance as a multiple of the object's bounding sphere radius
    pub camera_distance_factor: f32,
    /// Field of view in degrees
    pub fov_degrees: f32,
    /// Orbit sensitivity (radians per screen point)
    pub orbit_sensitivity: f32,
    /// Zoom sensitivity multiplier
    pub zoom_sensitivity: f32,
}

impl Default for ObjectViewConfig {
    fn default() -> Self {
        Self {
            camera_distance_factor: OBJECT_VIEW_DISTANCE_FACTOR,
            fov_degrees: 60.0,
            orbit_sensitivity: 0.005,
            zoom_sensitivity: 0.1,
        }
    }
}

/// Camera behaviour of a view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraProfile {
    /// Whether the user can orbit the camera
    pub allows_camera_control: bool,
    pub wants_hdr: bool,
    pub exposure_adaptation: bool,
    pub exposure_offset: f32,
    pub minimum_exposure: f32,
    pub maximum_exposure: f32,
}

/// Directional "sun" light of a view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SunLightProfile {
    pub intensity: f32,
    /// Direction the light points towards
    pub direction: [f32; 3],
    pub casts_shadow: bool,
    pub shadow_map_size: u32,
    pub shadow_bias: f32,
    /// Render shadows in a deferred pass so plane proxies can catch them
    pub deferred_shadows: bool,
    /// Shadow color (RGBA)
    pub shadow_color: [f32; 4],
}

/// Camera and lighting settings applied to one view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewProfile {
    pub camera: CameraProfile,
    pub sun: SunLightProfile,
    /// Image-based lighting environment
    pub environment_map: String,
    pub environment_intensity: f32,
    /// MSAA sample count
    pub msaa_sample_count: u32,
}

impl ViewProfile {
    /// Turntable object view
    pub fn object() -> Self {
        Self {
            camera: CameraProfile {
                allows_camera_control: true,
                wants_hdr: true,
                exposure_adaptation: false,
                exposure_offset: 0.0,
                minimum_exposure: -15.0,
                maximum_exposure: 15.0,
            },
            sun: SunLightProfile {
                intensity: 400.0,
                direction: [-0.25, -1.0, -0.25],
                casts_shadow: true,
                shadow_map_size: 2048,
                shadow_bias: 2.0,
                deferred_shadows: false,
                shadow_color: [0.0, 0.0, 0.0, 0.5],
            },
            environment_map: "Neutral-small.hdr".to_string(),
            environment_intensity: 1.0,
            msaa_sample_count: 4,
        }
    }

    /// Camera-feed AR view
    pub fn ar() -> Self {
        let object = Self::object();
        Self {
            camera: CameraProfile {
                allows_camera_control: false,
                exposure_adaptation: true,
                exposure_offset: -1.0,
                minimum_exposure: -1.0,
                maximum_exposure: 3.0,
                ..object.camera
            },
            sun: SunLightProfile {
                deferred_shadows: true,
                shadow_color: [0.0, 0.0, 0.0, 0.2],
                ..object.sun
            },
            ..object
        }
    }
}

/// Lighting for both views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    pub object: ViewProfile,
    pub ar: ViewProfile,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            object: ViewProfile::object(),
            ar: ViewProfile::ar(),
        }
    }
}

impl LightingConfig {
    pub fn profile(&self, mode: ViewerMode) -> &ViewProfile {
        match mode {
            ViewerMode::Object => &self.object,
            ViewerMode::Ar => &self.ar,
        }
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ViewerConfig {
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub haptics: HapticsConfig,
    #[serde(default)]
    pub gestures: GestureConfig,
    #[serde(default)]
    pub object_view: ObjectViewConfig,
    #[serde(default)]
    pub lighting: LightingConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl ViewerConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_bytes()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Serialize configuration to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Load configuration from bytes
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, ConfigError> {
        let content =
            std::str::from_utf8(data).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
