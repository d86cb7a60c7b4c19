use serde::{Deserialize, Serialize};

/// A sampled coordinate. Equality is exact per component; no tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// `(a, b, c) -> (b, c, a)`.
    pub const fn cycled(self) -> Self {
        Self {
            x: self.y,
            y: self.z,
            z: self.x,
        }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Hashable identity consistent with `==` for finite values (`-0.0` and `0.0` share a key).
    pub fn key(&self) -> [u64; 3] {
        [bits(self.x), bits(self.y), bits(self.z)]
    }
}

fn bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox3 {
    pub min: Point3,
    pub max: Point3,
}

impl BBox3 {
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn include_point(&mut self, point: Point3) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn of_points(points: &[Point3]) -> Option<Self> {
        let mut bbox = Self::empty();
        for p in points {
            bbox.include_point(*p);
        }
        if bbox.is_empty() { None } else { Some(bbox) }
    }

    pub fn diag(&self) -> f64 {
        let dx = (self.max.x - self.min.x).max(0.0);
        let dy = (self.max.y - self.min.y).max(0.0);
        let dz = (self.max.z - self.min.z).max(0.0);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_zero_shares_key() {
        assert_eq!(
            Point3::new(0.0, 1.0, -0.0).key(),
            Point3::new(-0.0, 1.0, 0.0).key()
        );
        assert_ne!(Point3::new(0.0, 1.0, 2.0).key(), Point3::new(0.0, 2.0, 1.0).key());
    }

    #[test]
    fn bbox_of_empty_slice_is_none() {
        assert!(BBox3::of_points(&[]).is_none());
        let bbox = BBox3::of_points(&[Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0)])
            .expect("bbox");
        assert_eq!(5.0, bbox.diag());
    }
}
