use crate::algebra::Color;

/// Surface response shared by every shape: a base color and the weight
/// given to the mirrored view when blending.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    /// 0 is fully matte, 1 is a perfect mirror.
    pub mirror: f32,
}

impl Material {
    pub fn new(color: Color, mirror: f32) -> Self {
        Self { color, mirror }
    }

    pub fn is_mirror(&self) -> bool {
        self.mirror > 0.0
    }

    /// Linear blend between the base color and `mirrored`.
    pub fn blend(&self, mirrored: Color) -> Color {
        self.color.scale(1.0 - self.mirror).add(mirrored.scale(self.mirror))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{approx_eq, Vec3};

    #[test]
    fn blend_weights_by_mirror() {
        let m = Material::new(Vec3(1.0, 0.0, 0.0), 0.25);
        let c = m.blend(Vec3(0.0, 0.0, 1.0));
        assert!(approx_eq(c, Vec3(0.75, 0.0, 0.25)));
        assert!(m.is_mirror());
        assert!(!Material::new(Vec3::ONE, 0.0).is_mirror());
    }
}
