//! Background asset loading
//!
//! Loaders build the whole subtree on a worker thread and hand it to the
//! viewer through the event queue. Nothing is shared with the viewer while
//! the build is in progress.

use std::thread::JoinHandle;

use tracing::{info, warn};

use arview_core::AssetNode;

use crate::event::{EventQueue, ViewerEvent};

/// Asset loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),
    #[error("Invalid asset: {0}")]
    Invalid(String),
    #[error("Asset has no content")]
    Empty,
}

/// Run `load` on a worker thread and post the result to `queue`
pub fn spawn_loader<F>(queue: EventQueue, name: impl Into<String>, load: F) -> JoinHandle<()>
where
    F: FnOnce() -> Result<AssetNode, AssetError> + Send + 'static,
{
    let name = name.into();
    std::thread::spawn(move || {
        let event = match load().and_then(validate) {
            Ok(asset) => {
                info!("Loaded asset '{}' ({} nodes)", name, asset.node_count());
                ViewerEvent::AssetReady(asset)
            }
            Err(e) => {
                warn!("Failed to load asset '{}': {}", name, e);
                ViewerEvent::AssetFailed(e.to_string())
            }
        };
        queue.push(event);
    })
}

/// The viewer places the root's children, so a root without any is useless
fn validate(asset: AssetNode) -> Result<AssetNode, AssetError> {
    if asset.children.is_empty() {
        return Err(AssetError::Empty);
    }
    Ok(asset)
}
