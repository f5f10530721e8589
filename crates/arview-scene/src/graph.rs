//! In-memory scene graph
//!
//! [`SceneGraph`] keeps two view spaces, one per [`ViewerMode`], each with a
//! root node and a camera node. Nodes follow the usual parent/child model:
//!
//! ```text
//! local = transform * pivot⁻¹
//! world = parent_world * local
//! ```
//!
//! Animated transform changes are tracked as [`TransformTween`]s and only
//! affect the presented value; the model value is updated immediately.

use std::collections::HashMap;
use std::time::Duration;

use glam::{Mat4, Vec2, Vec3};
use tracing::{debug, warn};

use arview_core::constants::PLANE_PROXY_NAME;
use arview_core::{
    AssetNode, BoundingBox, NodeId, PlaneAnchor, SceneEngine, TransformAnimation, ViewProfile,
    ViewerMode,
};

use crate::animation::TransformTween;
use crate::camera::{Projection, screen_to_ray};
use crate::picking::ray_aabb_intersection;

/// Half thickness of a plane proxy's bounds
const PLANE_PROXY_HALF_THICKNESS: f32 = 0.0005;

/// A node in the scene graph
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Display name
    pub name: String,
    /// Parent node, `None` for roots and detached nodes
    pub parent: Option<NodeId>,
    /// Child nodes in insertion order
    pub children: Vec<NodeId>,
    /// Local transform (model value)
    pub transform: Mat4,
    /// Pivot; the effective local matrix is `transform * pivot⁻¹`
    pub pivot: Mat4,
    /// Hidden nodes hide their whole subtree
    pub hidden: bool,
    /// Geometry bounds in node space
    pub geometry: Option<BoundingBox>,
    /// Whether the geometry casts shadows
    pub casts_shadow: bool,
    /// Geometry only writes shadows into the alpha channel (shadow catcher)
    pub alpha_only: bool,
    tween: Option<TransformTween>,
}

impl SceneNode {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Mat4::IDENTITY,
            pivot: Mat4::IDENTITY,
            hidden: false,
            geometry: None,
            casts_shadow: true,
            alpha_only: false,
            tween: None,
        }
    }

    /// Effective local matrix of the model value
    pub fn local_matrix(&self) -> Mat4 {
        self.transform * self.pivot.inverse()
    }

    /// Local transform as currently presented, including a running tween
    pub fn presented_transform(&self) -> Mat4 {
        self.tween
            .as_ref()
            .map(TransformTween::current)
            .unwrap_or(self.transform)
    }
}

#[derive(Debug, Clone)]
struct ViewSpace {
    root: NodeId,
    point_of_view: NodeId,
    hidden: bool,
    profile: Option<ViewProfile>,
    projection: Projection,
    prepared: u32,
}

/// Scene graph with an object view and an AR view
#[derive(Debug)]
pub struct SceneGraph {
    nodes: HashMap<NodeId, SceneNode>,
    object_view: ViewSpace,
    ar_view: ViewSpace,
    viewport: Vec2,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph with both view spaces; the AR view starts hidden
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        let mut make_view = |root_name: &str, camera_name: &str, hidden: bool| {
            let root = NodeId::new();
            let point_of_view = NodeId::new();
            let mut root_node = SceneNode::new(root_name);
            root_node.children.push(point_of_view);
            let mut camera_node = SceneNode::new(camera_name);
            camera_node.parent = Some(root);
            nodes.insert(root, root_node);
            nodes.insert(point_of_view, camera_node);
            ViewSpace {
                root,
                point_of_view,
                hidden,
                profile: None,
                projection: Projection::default(),
                prepared: 0,
            }
        };
        let object_view = make_view("ObjectRoot", "ObjectCamera", false);
        let ar_view = make_view("ArRoot", "ArCamera", true);

        Self {
            nodes,
            object_view,
            ar_view,
            viewport: Vec2::new(390.0, 844.0),
        }
    }

    fn view(&self, view: ViewerMode) -> &ViewSpace {
        match view {
            ViewerMode::Object => &self.object_view,
            ViewerMode::Ar => &self.ar_view,
        }
    }

    fn view_mut(&mut self, view: ViewerMode) -> &mut ViewSpace {
        match view {
            ViewerMode::Object => &mut self.object_view,
            ViewerMode::Ar => &mut self.ar_view,
        }
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Number of live nodes, including roots and cameras
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes (never true for a constructed graph)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Children of a node
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Find the first node with the given name in a subtree (depth first)
    pub fn find_by_name(&self, root: NodeId, name: &str) -> Option<NodeId> {
        let node = self.nodes.get(&root)?;
        if node.name == name {
            return Some(root);
        }
        node.children
            .iter()
            .find_map(|child| self.find_by_name(*child, name))
    }

    /// Attach geometry bounds to a node
    pub fn set_geometry(&mut self, id: NodeId, bounds: Option<BoundingBox>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.geometry = bounds;
        }
    }

    /// Lens used by a view's camera
    pub fn projection(&self, view: ViewerMode) -> Projection {
        self.view(view).projection
    }

    /// Change a view's lens
    pub fn set_projection(&mut self, view: ViewerMode, projection: Projection) {
        self.view_mut(view).projection = projection;
    }

    /// Profile last applied to a view
    pub fn profile(&self, view: ViewerMode) -> Option<&ViewProfile> {
        self.view(view).profile.as_ref()
    }

    /// How many times a view has been prepared for rendering
    pub fn prepare_count(&self, view: ViewerMode) -> u32 {
        self.view(view).prepared
    }

    /// Whether `node` is `ancestor` or lies below it
    pub fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    /// Whether a node or any of its ancestors is hidden
    pub fn is_effectively_hidden(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            match self.nodes.get(&id) {
                Some(n) if n.hidden => return true,
                Some(n) => current = n.parent,
                None => return true,
            }
        }
        false
    }

    /// Local transform as currently presented
    pub fn presentation_transform(&self, id: NodeId) -> Mat4 {
        self.nodes
            .get(&id)
            .map(SceneNode::presented_transform)
            .unwrap_or(Mat4::IDENTITY)
    }

    /// Whether a node has a running transform tween
    pub fn is_animating(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.tween.is_some())
    }

    /// Advance running tweens by `dt`, dropping finished ones
    pub fn advance(&mut self, dt: Duration) {
        for node in self.nodes.values_mut() {
            if let Some(tween) = node.tween.as_mut() {
                tween.advance(dt);
                if tween.is_finished() {
                    node.tween = None;
                }
            }
        }
    }

    fn local_matrix(&self, id: NodeId) -> Mat4 {
        self.nodes
            .get(&id)
            .map(SceneNode::local_matrix)
            .unwrap_or(Mat4::IDENTITY)
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes.get_mut(&id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.retain(|c| *c != id);
        }
    }

    fn spawn(&mut self, parent: NodeId, asset: &AssetNode) -> NodeId {
        let id = NodeId::new();
        let mut node = SceneNode::new(asset.name.clone());
        node.transform = asset.transform;
        node.geometry = asset.bounds;
        node.parent = Some(parent);
        self.nodes.insert(id, node);
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.push(id);
        }
        for child in &asset.children {
            self.spawn(id, child);
        }
        id
    }

    /// Subtree bounds in the node's own space (empty if no geometry)
    fn subtree_bounds(&self, id: NodeId) -> BoundingBox {
        let Some(node) = self.nodes.get(&id) else {
            return BoundingBox::empty();
        };
        node.children
            .iter()
            .fold(node.geometry.unwrap_or_default(), |acc, child| {
                let local = self.local_matrix(*child);
                acc.union(&self.subtree_bounds(*child).transform(&local))
            })
    }

    fn collect_visible_geometry(&self, id: NodeId, out: &mut Vec<BoundingBox>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if node.hidden {
            return;
        }
        if let Some(bounds) = node.geometry {
            out.push(bounds.transform(&self.world_transform(id)));
        }
        for child in &node.children {
            self.collect_visible_geometry(*child, out);
        }
    }

    fn plane_proxy_bounds(anchor: &PlaneAnchor) -> BoundingBox {
        let half = Vec3::new(
            anchor.extent.x * 0.5,
            PLANE_PROXY_HALF_THICKNESS,
            anchor.extent.z * 0.5,
        );
        BoundingBox::new(-half, half)
    }
}

impl SceneEngine for SceneGraph {
    fn root(&self, view: ViewerMode) -> NodeId {
        self.view(view).root
    }

    fn point_of_view(&self, view: ViewerMode) -> NodeId {
        self.view(view).point_of_view
    }

    fn configure_view(&mut self, view: ViewerMode, profile: &ViewProfile) {
        debug!(
            "Configuring {} view: msaa={}, deferred_shadows={}",
            view, profile.msaa_sample_count, profile.sun.deferred_shadows
        );
        self.view_mut(view).profile = Some(profile.clone());
    }

    fn set_view_hidden(&mut self, view: ViewerMode, hidden: bool) {
        self.view_mut(view).hidden = hidden;
    }

    fn is_view_hidden(&self, view: ViewerMode) -> bool {
        self.view(view).hidden
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport = size;
    }

    fn create_node(&mut self, name: &str) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(id, SceneNode::new(name));
        id
    }

    fn instantiate(&mut self, parent: NodeId, asset: &AssetNode) -> NodeId {
        let id = self.spawn(parent, asset);
        debug!(
            "Instantiated '{}' ({} nodes)",
            asset.name,
            asset.node_count()
        );
        id
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) {
            warn!("add_child with unknown node");
            return;
        }
        if self.is_descendant(parent, child) {
            warn!("Refusing to attach a node below itself");
            return;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn remove_node(&mut self, node: NodeId) {
        self.detach(node);
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(removed) = self.nodes.remove(&id) {
                stack.extend(removed.children);
            }
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    fn set_pivot(&mut self, node: NodeId, pivot: Mat4) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.pivot = pivot;
        }
    }

    fn pivot(&self, node: NodeId) -> Mat4 {
        self.nodes
            .get(&node)
            .map(|n| n.pivot)
            .unwrap_or(Mat4::IDENTITY)
    }

    fn set_transform(&mut self, node: NodeId, transform: Mat4) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.transform = transform;
            n.tween = None;
        }
    }

    fn transform(&self, node: NodeId) -> Mat4 {
        self.nodes
            .get(&node)
            .map(|n| n.transform)
            .unwrap_or(Mat4::IDENTITY)
    }

    fn set_world_transform(
        &mut self,
        node: NodeId,
        world: Mat4,
        animation: Option<TransformAnimation>,
    ) {
        let parent_world = self
            .parent(node)
            .map(|p| self.world_transform(p))
            .unwrap_or(Mat4::IDENTITY);
        let Some(n) = self.nodes.get_mut(&node) else {
            return;
        };
        let transform = parent_world.inverse() * world * n.pivot;
        n.tween = match animation {
            Some(animation) if !animation.duration.is_zero() => Some(TransformTween::new(
                n.presented_transform(),
                transform,
                animation.duration,
            )),
            _ => None,
        };
        n.transform = transform;
    }

    fn world_transform(&self, node: NodeId) -> Mat4 {
        let mut world = Mat4::IDENTITY;
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(n) = self.nodes.get(&id) else {
                break;
            };
            world = n.local_matrix() * world;
            current = n.parent;
        }
        world
    }

    fn bounding_box(&self, node: NodeId) -> BoundingBox {
        let bounds = self.subtree_bounds(node);
        if bounds.is_valid() {
            bounds
        } else {
            BoundingBox::zero()
        }
    }

    fn world_bounding_sphere(&self, node: NodeId) -> (Vec3, f32) {
        self.bounding_box(node)
            .transform(&self.world_transform(node))
            .bounding_sphere()
    }

    fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.hidden = hidden;
        }
    }

    fn is_hidden(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.hidden)
    }

    fn hit_test(&self, view: ViewerMode, screen_point: Vec2, root: NodeId) -> bool {
        let space = self.view(view);
        if space.hidden || !self.is_descendant(root, space.root) {
            return false;
        }
        if self.is_effectively_hidden(root) {
            return false;
        }

        let camera_world = self.world_transform(space.point_of_view);
        let projection = space.projection.matrix(self.viewport);
        let (origin, dir) = screen_to_ray(camera_world, projection, screen_point, self.viewport);

        let mut boxes = Vec::new();
        self.collect_visible_geometry(root, &mut boxes);
        boxes
            .iter()
            .any(|b| ray_aabb_intersection(origin, dir, b).is_some())
    }

    fn create_plane_proxy(&mut self, anchor: &PlaneAnchor) -> NodeId {
        let root = self.ar_view.root;
        let id = self.create_node(PLANE_PROXY_NAME);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.transform = anchor.transform * Mat4::from_translation(anchor.center);
            node.geometry = Some(Self::plane_proxy_bounds(anchor));
            node.casts_shadow = false;
            node.alpha_only = true;
        }
        self.add_child(root, id);
        debug!("Created plane proxy for anchor {}", anchor.id);
        id
    }

    fn update_plane_proxy(&mut self, node: NodeId, anchor: &PlaneAnchor) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.transform = anchor.transform * Mat4::from_translation(anchor.center);
            n.geometry = Some(Self::plane_proxy_bounds(anchor));
        }
    }

    fn prepare_for_render(&mut self, view: ViewerMode, on_complete: Box<dyn FnOnce() + Send>) {
        self.view_mut(view).prepared += 1;
        on_complete();
    }
}
