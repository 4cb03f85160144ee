/// Fixed perspective viewer looking down -Z at the origin.
use glam::{Mat4, Vec3};

/// Vertical field of view in degrees
pub const FOV_DEGREES: f32 = 50.0;

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_y: f32,
}

impl Default for Camera {
    fn default() -> Self {
        // Far enough back that the built-in square fills the view.
        Self {
            eye: Vec3::new(0.0, 0.0, 2.2),
            target: Vec3::ZERO,
            fov_y: FOV_DEGREES.to_radians(),
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection(&self, width: i32, height: i32) -> Mat4 {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        Mat4::perspective_rh_gl(self.fov_y, aspect, 0.1, 100.0)
    }

    /// Model-view-projection with an identity model matrix, column-major
    pub fn mvp(&self, width: i32, height: i32) -> [f32; 16] {
        (self.projection(width, height) * self.view()).to_cols_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(camera: &Camera, p: Vec3, width: i32, height: i32) -> Vec3 {
        let clip = Mat4::from_cols_array(&camera.mvp(width, height)) * p.extend(1.0);
        clip.truncate() / clip.w
    }

    #[test]
    fn origin_projects_to_centre() {
        let ndc = project(&Camera::default(), Vec3::ZERO, 800, 800);
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn unit_square_fits_the_square_viewport() {
        let ndc = project(&Camera::default(), Vec3::new(1.0, 1.0, 0.0), 800, 800);
        assert!(ndc.x > 0.9 && ndc.x <= 1.0, "{ndc:?}");
        assert!((ndc.x - ndc.y).abs() < 1e-5);
    }

    #[test]
    fn wide_viewport_squeezes_x() {
        let camera = Camera::default();
        let square = project(&camera, Vec3::X, 800, 800);
        let wide = project(&camera, Vec3::X, 1600, 800);
        assert!((wide.x * 2.0 - square.x).abs() < 1e-5);
    }

    #[test]
    fn zero_height_does_not_divide_by_zero() {
        let mvp = Camera::default().mvp(640, 0);
        assert!(mvp.iter().all(|v| v.is_finite()));
    }
}
