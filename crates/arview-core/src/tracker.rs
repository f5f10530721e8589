//! Plane anchor tracking.
//!
//! Keeps the mapping from session anchors to the proxy nodes that represent
//! them in the AR scene. Proxies are created lazily when the renderer first
//! asks for a node for an anchor.

use std::collections::HashMap;

use tracing::{debug, info};
use uuid::Uuid;

use crate::anchor::PlaneAnchor;
use crate::placement::PlacementState;
use crate::scene::NodeId;

/// Maps anchor IDs to proxy nodes
#[derive(Debug, Default)]
pub struct PlaneAnchorTracker {
    proxies: HashMap<Uuid, NodeId>,
}

impl PlaneAnchorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchors were added by the session. Proxies are not created here.
    pub fn anchors_added(&mut self, anchors: &[PlaneAnchor]) {
        debug!("Session added {} plane anchor(s)", anchors.len());
    }

    /// Proxy node for an anchor, creating it on first request
    pub fn node_for_anchor(
        &mut self,
        anchor: &PlaneAnchor,
        create: impl FnOnce(&PlaneAnchor) -> NodeId,
    ) -> NodeId {
        *self
            .proxies
            .entry(anchor.id)
            .or_insert_with(|| create(anchor))
    }

    /// Anchors were updated by the session.
    ///
    /// Existing proxies are refreshed through `refresh`, and the placement's
    /// anchor snapshot is replaced if it is one of the updated anchors.
    pub fn anchors_updated(
        &mut self,
        anchors: &[PlaneAnchor],
        mut placement: Option<&mut PlacementState>,
        mut refresh: impl FnMut(NodeId, &PlaneAnchor),
    ) {
        for anchor in anchors {
            if let Some(&node) = self.proxies.get(&anchor.id) {
                refresh(node, anchor);
            }
            if let Some(placement) = placement.as_deref_mut() {
                placement.refresh_anchor(anchor);
            }
        }
    }

    /// Anchors were removed by the session.
    ///
    /// Drops their proxies and returns the proxy nodes so the caller can
    /// remove them from the scene. If the placement's anchor is among them,
    /// the placement is detached; the object keeps its last transform.
    pub fn anchors_removed(
        &mut self,
        anchors: &[PlaneAnchor],
        mut placement: Option<&mut PlacementState>,
    ) -> Vec<NodeId> {
        let mut dropped = Vec::new();
        for anchor in anchors {
            if let Some(placement) = placement.as_deref_mut()
                && placement.current_anchor().is_some_and(|a| a.id == anchor.id)
            {
                info!("Anchor we were attached to went away. Will resume search for another plane...");
                placement.detach();
            }
            if let Some(node) = self.proxies.remove(&anchor.id) {
                dropped.push(node);
            }
        }
        dropped
    }

    /// Proxy node for an anchor, if one has been created
    pub fn proxy(&self, anchor_id: Uuid) -> Option<NodeId> {
        self.proxies.get(&anchor_id).copied()
    }

    /// Get the number of proxies.
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    /// Check if there are any proxies.
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }
}
