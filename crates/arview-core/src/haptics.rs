//! Rate-limited haptic feedback

use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// Haptic engine errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum HapticError {
    #[error("Haptic feedback is not supported on this hardware")]
    Unsupported,
    #[error("Failed to start haptic engine: {0}")]
    EngineStart(String),
    #[error("Failed to create haptic pattern: {0}")]
    Pattern(String),
    #[error("Haptic playback failed: {0}")]
    Playback(String),
}

/// A single transient event played immediately
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransientPattern {
    pub duration: Duration,
}

/// Feedback hardware, prepared once and then played on demand
pub trait HapticEngine {
    /// Start the engine and load the pattern that [`HapticEngine::play`] will use
    fn prepare(&mut self, pattern: &TransientPattern) -> Result<(), HapticError>;

    /// Play the prepared pattern now
    fn play(&mut self) -> Result<(), HapticError>;
}

/// Fires the "settled" pulse, dropping requests that come too soon
pub struct HapticFeedbackScheduler {
    engine: Option<Box<dyn HapticEngine>>,
    lockout: Duration,
    last_pulse: Option<Instant>,
    pulses: u64,
}

impl HapticFeedbackScheduler {
    /// Prepare `engine` with `pattern`.
    ///
    /// If preparation fails the scheduler is created without an engine and
    /// every request becomes a no-op.
    pub fn new(
        mut engine: Box<dyn HapticEngine>,
        pattern: TransientPattern,
        lockout: Duration,
    ) -> Self {
        let engine = match engine.prepare(&pattern) {
            Ok(()) => Some(engine),
            Err(e) => {
                warn!("Failed to prepare haptic engine for playback: {}", e);
                None
            }
        };
        Self {
            engine,
            lockout,
            last_pulse: None,
            pulses: 0,
        }
    }

    /// A scheduler for hardware without haptics
    pub fn disabled(lockout: Duration) -> Self {
        Self {
            engine: None,
            lockout,
            last_pulse: None,
            pulses: 0,
        }
    }

    pub fn is_available(&self) -> bool {
        self.engine.is_some()
    }

    /// Number of pulses dispatched so far
    pub fn pulses_dispatched(&self) -> u64 {
        self.pulses
    }

    /// Request a pulse now. Returns true if one was dispatched.
    pub fn request_pulse(&mut self) -> bool {
        self.request_pulse_at(Instant::now())
    }

    /// Request a pulse at `now`.
    ///
    /// Dropped silently if the previous successful pulse was less than the
    /// lockout ago, or if no engine is available. A failed playback does not
    /// start a new lockout.
    pub fn request_pulse_at(&mut self, now: Instant) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        if let Some(last) = self.last_pulse
            && now.saturating_duration_since(last) < self.lockout
        {
            return false;
        }
        match engine.play() {
            Ok(()) => {
                self.last_pulse = Some(now);
                self.pulses += 1;
                true
            }
            Err(e) => {
                debug!("Haptic playback failed: {}", e);
                false
            }
        }
    }
}
