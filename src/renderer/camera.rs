use glam::{Mat4, Vec2, Vec3};

/// Orbit camera circling a fixed target. Position is derived from
/// yaw/pitch/distance, so dragging and zooming never drift off the
/// orbit sphere.
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,

    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,

    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    pub mouse_sensitivity: f32,
    pub zoom_speed: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,

            yaw: 90.0_f32.to_radians(),
            pitch: 0.0,
            distance: 5.0,

            fov: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,

            mouse_sensitivity: 0.002,
            zoom_speed: 0.5,
        }
    }
}

impl Camera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn process_mouse_movement(&mut self, delta: Vec2) {
        self.yaw += delta.x * self.mouse_sensitivity;
        self.pitch -= delta.y * self.mouse_sensitivity;

        let max_pitch = 89.0_f32.to_radians();
        self.pitch = self.pitch.clamp(-max_pitch, max_pitch);

        self.update_position();
    }

    pub fn process_scroll(&mut self, delta: f32) {
        self.distance = (self.distance - delta * self.zoom_speed).clamp(2.0, 30.0);
        self.update_position();
    }

    fn update_position(&mut self) {
        self.position = self.target
            + Vec3::new(
                self.distance * self.yaw.cos() * self.pitch.cos(),
                self.distance * self.pitch.sin(),
                self.distance * self.yaw.sin() * self.pitch.cos(),
            );
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_sits_on_positive_z() {
        let camera = Camera::default();
        assert!(camera.position.distance(Vec3::new(0.0, 0.0, 5.0)) < 1e-5);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn view_projection_is_projection_times_view() {
        let camera = Camera::default();
        let expected = camera.projection_matrix() * camera.view_matrix();
        assert!(camera.view_projection_matrix().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn resize_changes_the_projection() {
        let mut camera = Camera::default();
        let before = camera.projection_matrix();
        camera.set_aspect(800.0, 800.0);
        assert_eq!(camera.aspect, 1.0);
        assert!(!camera.projection_matrix().abs_diff_eq(before, 1e-6));
    }

    #[test]
    fn pitch_stays_clamped_under_large_drags() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(Vec2::new(0.0, -100_000.0));
        assert!(camera.pitch <= 89.0_f32.to_radians() + 1e-6);
        camera.process_mouse_movement(Vec2::new(0.0, 100_000.0));
        assert!(camera.pitch >= -(89.0_f32.to_radians() + 1e-6));
    }

    #[test]
    fn orbit_keeps_the_target_distance() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(Vec2::new(137.0, -42.0));
        let radius = camera.position.distance(camera.target);
        assert!((radius - camera.distance).abs() < 1e-4);
    }

    #[test]
    fn zoom_clamps_to_range() {
        let mut camera = Camera::default();
        camera.process_scroll(1_000.0);
        assert_eq!(camera.distance, 2.0);
        camera.process_scroll(-10_000.0);
        assert_eq!(camera.distance, 30.0);
    }
}
