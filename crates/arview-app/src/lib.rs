//! AR Viewer Application
//!
//! Drives the placement engine from a serial event queue: mode transitions,
//! per-frame AR placement, session bookkeeping and asset hand-off.
//!
//! # Module Structure
//!
//! ```text
//! arview-app/
//! ├── asset.rs       # Background asset loading
//! ├── event.rs       # Viewer events and the serial queue
//! ├── sim.rs         # Simulated AR session and haptic engine
//! ├── transition.rs  # Object view / AR view transitions
//! └── viewer.rs      # AssetViewer and the per-frame update
//! ```

pub mod asset;
pub mod event;
pub mod sim;
pub mod transition;
pub mod viewer;

#[cfg(test)]
mod test_support;

pub use asset::{AssetError, spawn_loader};
pub use event::{EventQueue, ViewerEvent};
pub use sim::{LoggingHapticEngine, SimulatedSession};
pub use viewer::AssetViewer;
