//! 3D engine collaborator interface.
//!
//! The engine never renders anything itself. It drives a scene graph owned
//! by an external 3D engine through [`SceneEngine`]: it controls the object
//! subtree's parent, pivot, transform and visibility, queries bounds and
//! hit tests, and asks for plane proxy nodes.

use std::time::Duration;

use glam::{Mat4, Vec2, Vec3};
use uuid::Uuid;

use crate::anchor::PlaneAnchor;
use crate::bounds::BoundingBox;
use crate::config::ViewProfile;
use crate::mode::ViewerMode;

/// Identifier of a node in the engine's scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Interpolation used when a transform change is animated (linear timing)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformAnimation {
    pub duration: Duration,
}

impl TransformAnimation {
    pub fn linear(duration: Duration) -> Self {
        Self { duration }
    }
}

/// A fully built, detached asset subtree produced by the asset loader.
///
/// Loaders build these off the render thread and hand over the finished
/// tree; the engine instantiates it in one step.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetNode {
    pub name: String,
    /// Transform relative to the parent node
    pub transform: Mat4,
    /// Geometry bounds in this node's local space, if it carries geometry
    pub bounds: Option<BoundingBox>,
    pub children: Vec<AssetNode>,
}

impl AssetNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Mat4::IDENTITY,
            bounds: None,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_child(mut self, child: AssetNode) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(AssetNode::node_count).sum::<usize>()
    }
}

/// The scene graph the viewer drives.
///
/// Each [`ViewerMode`] has its own view space: a root node and a
/// point-of-view (camera) node below it. A node's effective local matrix is
/// `transform * pivot⁻¹`.
pub trait SceneEngine {
    /// Root node of a view's scene
    fn root(&self, view: ViewerMode) -> NodeId;

    /// Camera node of a view
    fn point_of_view(&self, view: ViewerMode) -> NodeId;

    /// Apply camera and lighting settings to a view
    fn configure_view(&mut self, view: ViewerMode, profile: &ViewProfile);

    /// Show or hide an entire view
    fn set_view_hidden(&mut self, view: ViewerMode, hidden: bool);

    fn is_view_hidden(&self, view: ViewerMode) -> bool;

    /// Size of the presenting view in screen points
    fn viewport_size(&self) -> Vec2;

    fn set_viewport_size(&mut self, size: Vec2);

    /// Create a detached, empty node
    fn create_node(&mut self, name: &str) -> NodeId;

    /// Instantiate a loaded asset subtree below `parent`
    fn instantiate(&mut self, parent: NodeId, asset: &AssetNode) -> NodeId;

    /// Attach `child` under `parent`, detaching it from its previous parent
    fn add_child(&mut self, parent: NodeId, child: NodeId);

    /// Detach a node and destroy it together with its descendants
    fn remove_node(&mut self, node: NodeId);

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn set_pivot(&mut self, node: NodeId, pivot: Mat4);

    fn pivot(&self, node: NodeId) -> Mat4;

    /// Set the local transform immediately
    fn set_transform(&mut self, node: NodeId, transform: Mat4);

    fn transform(&self, node: NodeId) -> Mat4;

    /// Set the world transform, optionally tweening from the presented value
    fn set_world_transform(
        &mut self,
        node: NodeId,
        world: Mat4,
        animation: Option<TransformAnimation>,
    );

    fn world_transform(&self, node: NodeId) -> Mat4;

    /// Bounds of the node's subtree content in the node's own space
    fn bounding_box(&self, node: NodeId) -> BoundingBox;

    /// Bounding sphere of the node's subtree in world space, as `(center, radius)`
    fn world_bounding_sphere(&self, node: NodeId) -> (Vec3, f32);

    fn set_hidden(&mut self, node: NodeId, hidden: bool);

    fn is_hidden(&self, node: NodeId) -> bool;

    /// Whether a screen point in `view` lands on geometry under `root`
    fn hit_test(&self, view: ViewerMode, screen_point: Vec2, root: NodeId) -> bool;

    /// Create a shadow-catching proxy node for a plane anchor
    fn create_plane_proxy(&mut self, anchor: &PlaneAnchor) -> NodeId;

    /// Refresh a proxy's pose and extent from a newer anchor snapshot
    fn update_plane_proxy(&mut self, node: NodeId, anchor: &PlaneAnchor);

    /// Prepare a view's scene for rendering; `on_complete` runs once ready,
    /// possibly on another thread
    fn prepare_for_render(&mut self, view: ViewerMode, on_complete: Box<dyn FnOnce() + Send>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_builder() {
        let asset = AssetNode::new("root")
            .with_child(
                AssetNode::new("body")
                    .with_bounds(BoundingBox::new(Vec3::ZERO, Vec3::ONE))
                    .with_child(AssetNode::new("wheel")),
            )
            .with_child(AssetNode::new("light"));
        assert_eq!(asset.node_count(), 4);
        assert!(asset.bounds.is_none());
        assert!(asset.children[0].bounds.is_some());
    }
}
