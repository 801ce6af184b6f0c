use ilattice::glam::Vec3;

/// Axis-aligned bounding box of a mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Returns `None` for an empty point set.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self { min: first, max: first }, |aabb, p| Self {
            min: aabb.min.min(p),
            max: aabb.max.max(p),
        }))
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_points() {
        assert_eq!(Aabb::from_points(Vec::new()), None);

        let aabb = Aabb::from_points([Vec3::new(1.0, -2.0, 0.5), Vec3::new(-1.0, 4.0, 0.0)]).unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 0.5));
        assert_eq!(aabb.center(), Vec3::new(0.0, 1.0, 0.25));
    }
}
