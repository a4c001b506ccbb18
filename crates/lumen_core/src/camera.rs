use glam::{Mat4, Quat, Vec2, Vec3};

/// Pitch stops just short of straight up/down so `look_at` keeps a valid basis.
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.001;

/// Orbits a target point; driven by pan (rotate) and scroll (zoom) input.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcballCamera {
    pub target: Vec3,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// x = pitch, y = yaw (radians).
    pub rotation: Vec2,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    pub rotate_sensitivity: f32,
    pub zoom_sensitivity: f32,
}

impl Default for ArcballCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 2.5,
            min_distance: 0.5,
            max_distance: 20.0,
            rotation: Vec2::ZERO,
            fov: 70.0f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
            rotate_sensitivity: 0.01,
            zoom_sensitivity: 0.1,
        }
    }
}

impl ArcballCamera {
    pub fn new(target: Vec3, distance: f32) -> Self {
        let mut camera = Self {
            target,
            ..Default::default()
        };
        camera.distance = distance.clamp(camera.min_distance, camera.max_distance);
        camera
    }

    /// Pan gesture: horizontal motion spins around Y, vertical tilts.
    pub fn rotate(&mut self, delta: Vec2) {
        self.rotation.y += delta.x * self.rotate_sensitivity;
        self.rotation.x += delta.y * self.rotate_sensitivity;
        self.rotation.x = self.rotation.x.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Scroll wheel: positive delta moves closer.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta * self.zoom_sensitivity)
            .clamp(self.min_distance, self.max_distance);
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.rotation.y) * Quat::from_rotation_x(-self.rotation.x)
    }

    /// World-space eye position; this is what goes into `FragmentUniforms`.
    pub fn position(&self) -> Vec3 {
        self.target + self.orientation() * Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }
}
