use glam::{Mat4, Vec2, Vec3};

/// Perspective camera that eases toward a pointer-derived target and
/// always looks at the scene origin.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl CameraRig {
    pub fn new(position: Vec3, fovy_degrees: f32, znear: f32, zfar: f32) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy_radians: fovy_degrees.to_radians(),
            znear,
            zfar,
        }
    }

    /// Exponential smoothing of the x/y position: `p += (goal - p) * factor`.
    /// The depth is left untouched and the camera is re-aimed at the origin.
    pub fn step_toward(&mut self, goal: Vec2, factor: f32) {
        let factor = factor.clamp(0.0, 1.0);
        self.position.x += (goal.x - self.position.x) * factor;
        self.position.y += (goal.y - self.position.y) * factor;
        self.target = Vec3::ZERO;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect.max(f32::EPSILON), self.znear, self.zfar)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}
