use crate::algebra::{Color, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Point-like emitter whose strength only depends on the angle it makes
/// with the surface normal. No distance falloff.
#[derive(Clone, Copy, Debug)]
pub struct Bulb {
    pub center: Vec3,
    pub color: Color,
}

impl Bulb {
    pub fn new(center: Vec3, color: Color) -> Self {
        Self { center, color }
    }

    /// 1 at normal incidence, falling linearly to 0 at 90°.
    ///
    /// The angle is taken between the normal and the bulb-to-point vector.
    pub fn power(&self, point: Vec3, normal: Vec3) -> f32 {
        Self::falloff(point.sub(self.center).normalize(), normal)
    }

    /// Angular falloff for an already normalized bulb-to-point `incidence`.
    pub fn falloff(incidence: Vec3, normal: Vec3) -> f32 {
        let rad = incidence.dot(normal).clamp(-1.0, 1.0).acos();
        if rad.abs() > FRAC_PI_2 {
            return 0.0;
        }
        1.0 - rad.abs() / FRAC_PI_2
    }
}

#[derive(Clone, Debug)]
pub enum Light {
    Bulb(Bulb),
}

impl Light {
    pub fn power(&self, point: Vec3, normal: Vec3) -> f32 {
        match self {
            Self::Bulb(b) => b.power(point, normal),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Bulb(b) => b.color,
        }
    }

    pub fn center(&self) -> Vec3 {
        match self {
            Self::Bulb(b) => b.center,
        }
    }

    /// Unit bulb-to-`point` direction. Doubles as the occlusion probe
    /// direction, so callers normalize once per light and hit.
    ///
    /// Panics when `point` sits on the light's centre.
    pub fn incidence(&self, point: Vec3) -> Vec3 {
        point.sub(self.center()).normalize()
    }

    /// Power for an `incidence` obtained from [`Light::incidence`].
    pub fn falloff(&self, incidence: Vec3, normal: Vec3) -> f32 {
        match self {
            Self::Bulb(_) => Bulb::falloff(incidence, normal),
        }
    }
}

impl From<Bulb> for Light {
    fn from(b: Bulb) -> Self { Self::Bulb(b) }
}
