//! Turntable camera and screen-space rays

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov: 60.0_f32.to_radians(),
            near: 0.01,
            far: 1000.0,
        }
    }
}

impl Projection {
    /// Projection matrix for a viewport of the given size
    pub fn matrix(&self, viewport: Vec2) -> Mat4 {
        let aspect = if viewport.y > 0.0 {
            viewport.x / viewport.y
        } else {
            1.0
        };
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }
}

/// Convert a screen point into a world-space ray `(origin, direction)`.
///
/// `camera_world` is the camera node's world transform; screen `y` grows
/// downwards.
pub fn screen_to_ray(
    camera_world: Mat4,
    projection: Mat4,
    screen: Vec2,
    viewport: Vec2,
) -> (Vec3, Vec3) {
    let size = viewport.max(Vec2::ONE);
    // Convert to normalized device coordinates
    let ndc_x = (2.0 * screen.x / size.x) - 1.0;
    let ndc_y = 1.0 - (2.0 * screen.y / size.y);

    let inv_proj = projection.inverse();

    // Near and far points in NDC
    let near_ndc = Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
    let far_ndc = Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

    // Transform to view space
    let near_view = inv_proj * near_ndc;
    let far_view = inv_proj * far_ndc;
    let near_view = near_view.truncate() / near_view.w;
    let far_view = far_view.truncate() / far_view.w;

    // Transform to world space
    let near_world = camera_world.transform_point3(near_view);
    let far_world = camera_world.transform_point3(far_view);

    (near_world, (far_world - near_world).normalize())
}

/// Y-up orbit camera used by the object view
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Point the camera orbits around
    pub target: Vec3,
    /// Lens parameters
    pub projection: Projection,
    /// Rotation about the world `y` axis (radians)
    pub yaw: f32,
    /// Elevation above the target's horizontal plane (radians)
    pub pitch: f32,
    /// Distance from the target
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Projection::default())
    }
}

impl OrbitCamera {
    /// Create a camera looking down `-z` at the origin
    pub fn new(projection: Projection) -> Self {
        Self {
            target: Vec3::ZERO,
            projection,
            yaw: 0.0,
            pitch: 0.0,
            distance: 5.0,
        }
    }

    /// Eye position derived from the orbit parameters
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch =
            (self.pitch + delta_pitch).clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    /// Pan the target in the camera's screen plane
    pub fn pan(&mut self, delta: Vec2) {
        let forward = (self.target - self.position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let pan_speed = self.distance * 0.002;
        self.target += (-right * delta.x + up * delta.y) * pan_speed;
    }

    /// Zoom the camera
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta)).clamp(0.01, 10000.0);
    }

    /// Place the camera on the `+z` side of a bounding sphere, `distance_factor`
    /// radii from its center, looking at the center
    pub fn frame(&mut self, center: Vec3, radius: f32, distance_factor: f32) {
        self.target = center;
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.distance = (radius * distance_factor).max(0.1);
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// World transform of the camera node
    pub fn world_transform(&self) -> Mat4 {
        self.view_matrix().inverse()
    }
}
