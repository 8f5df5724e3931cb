use crate::{algebra::Vec3, material::Material, sphere::Sphere};

/// Where a ray met a surface.
#[derive(Clone, Copy, Debug)]
pub struct Hit {
    pub point: Vec3,
    /// Outward unit normal at `point`; zero for a ray fired from a
    /// sphere's exact centre.
    pub normal: Vec3,
    /// Unit direction of the mirrored ray leaving `point`.
    pub reflection: Vec3,
}

/// Every surface the caster can intersect. New shapes become new variants;
/// callers only use `hit` and `material`.
#[derive(Clone, Debug)]
pub enum Object {
    Sphere(Sphere),
}

impl Object {
    pub fn hit(&self, ro: Vec3, rd: Vec3) -> Option<Hit> {
        match self {
            Self::Sphere(s) => s.hit(ro, rd),
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Self::Sphere(s) => &s.material,
        }
    }
}

impl From<Sphere> for Object {
    fn from(s: Sphere) -> Self { Self::Sphere(s) }
}
