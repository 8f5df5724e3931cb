//! src/sphere.rs
//! -------------
//! Analytic sphere, the only surface the tracer knows about.

use crate::{algebra::Vec3, material::Material, object::Hit};

#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub center   : Vec3,
    pub radius   : f32,
    pub material : Material,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self { center, radius, material }
    }

    /// Intersect a ray (ro + t·rd), `rd` unit length.
    /// A ray starting inside the sphere reports its own origin as the hit.
    pub fn hit(&self, ro: Vec3, rd: Vec3) -> Option<Hit> {
        let m = ro.sub(self.center);
        let b = rd.dot(m);
        let c = m.dot(m) - self.radius * self.radius;
        // origin outside and pointing away
        if c > 0.0 && b > 0.0 { return None; }

        let disc = b*b - c;
        if disc < 0.0 { return None; }

        let t       = (-b - disc.sqrt()).max(0.0);
        let point   = ro.add(rd.scale(t));
        // a ray fired from the exact centre has no radial normal: zero it,
        // which leaves the reflection along `rd` and lets no bulb light it
        let normal  = point.sub(self.center).try_normalize().unwrap_or(Vec3::ZERO);
        Some(Hit {
            point,
            normal,
            reflection: rd.reflect(normal),
        })
    }
}
