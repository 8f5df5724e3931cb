use serde::Deserialize;
use std::ops::AddAssign;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3(pub f32, pub f32, pub f32);

/// Colors share the vector type; components are r, g, b.
pub type Color = Vec3;

impl Vec3 {
    pub const ZERO: Self = Vec3(0.0, 0.0, 0.0);
    pub const ONE: Self = Vec3(1.0, 1.0, 1.0);

    pub fn add(self, v: Self) -> Self { Self(self.0+v.0, self.1+v.1, self.2+v.2) }
    pub fn sub(self, v: Self) -> Self { Self(self.0-v.0, self.1-v.1, self.2-v.2) }
    pub fn scale(self, f: f32) -> Self { Self(self.0*f, self.1*f, self.2*f) }
    /// Componentwise product, used to filter a color through another.
    pub fn mul(self, v: Self) -> Self { Self(self.0*v.0, self.1*v.1, self.2*v.2) }
    pub fn dot(self, v: Self) -> f32 { self.0*v.0 + self.1*v.1 + self.2*v.2 }
    pub fn length_squared(self) -> f32 { self.dot(self) }
    pub fn norm(self) -> f32 { self.length_squared().sqrt() }
    pub fn neg(self) -> Self { Self(-self.0,-self.1,-self.2) }
    pub fn is_finite(self) -> bool { self.0.is_finite() && self.1.is_finite() && self.2.is_finite() }

    /// Unit vector in the same direction.
    ///
    /// Panics on a zero-length or non-finite vector: every direction that
    /// reaches the tracer must be well defined.
    pub fn normalize(self) -> Self {
        let len = self.norm();
        assert!(
            len > 0.0 && len.is_finite(),
            "cannot normalize degenerate vector {self:?}"
        );
        self.scale(1.0/len)
    }

    /// `None` for vectors that cannot be normalized.
    pub fn try_normalize(self) -> Option<Self> {
        let len = self.norm();
        (len > 0.0 && len.is_finite()).then(|| self.scale(1.0/len))
    }

    /// Mirror `self` about the unit normal `n`.
    pub fn reflect(self, n: Self) -> Self { self.sub(n.scale(2.0*self.dot(n))) }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, v: Vec3) { *self = Vec3::add(*self, v); }
}

impl From<[f32; 3]> for Vec3 {
    fn from(a: [f32; 3]) -> Self { Vec3(a[0], a[1], a[2]) }
}

/* Custom helper so Serde turns a JSON array into Vec3 */
pub fn vec3_from_array<'de, D>(d: D) -> Result<Vec3, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let arr = <[f32; 3]>::deserialize(d)?;
    Ok(arr.into())
}

#[cfg(test)]
pub(crate) fn approx_eq(a: Vec3, b: Vec3) -> bool {
    const EPS: f32 = 1e-5;
    (a.0 - b.0).abs() < EPS && (a.1 - b.1).abs() < EPS && (a.2 - b.2).abs() < EPS
}
