use crate::algebra::Vec3;

/// Parallel-ray camera. Every pixel shares `direction`; origins are swept
/// over a square of side `size` centred on `origin`, spanning the y/z plane.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub origin: Vec3,
    pub direction: Vec3,
    pub size: f32,
}

impl Camera {
    /// `direction` is normalized here, so it must be non-zero.
    pub fn new(origin: Vec3, direction: Vec3, size: f32) -> Self {
        Self { origin, direction: direction.normalize(), size }
    }

    /// Ray origin for pixel (`x`, `y`) of a `resolution`² grid.
    pub fn ray_origin(&self, x: u32, y: u32, resolution: u32) -> Vec3 {
        let delimiter = resolution as f32 / self.size;
        let half = self.size * 0.5;
        Vec3(
            self.origin.0,
            self.origin.1 - half + x as f32 / delimiter,
            self.origin.2 - half + y as f32 / delimiter,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::approx_eq;

    #[test]
    fn corners_span_camera_size() {
        let cam = Camera::new(Vec3(100.0, 0.0, 0.0), Vec3(-2.0, 0.0, 0.0), 30.0);
        assert_eq!(cam.direction, Vec3(-1.0, 0.0, 0.0));
        assert!(approx_eq(cam.ray_origin(0, 0, 64), Vec3(100.0, -15.0, -15.0)));
        // one pixel short of the far edge
        let step = 30.0 / 64.0;
        assert!(approx_eq(cam.ray_origin(63, 63, 64), Vec3(100.0, 15.0 - step, 15.0 - step)));
        assert!(approx_eq(cam.ray_origin(32, 32, 64), Vec3(100.0, 0.0, 0.0)));
    }
}
