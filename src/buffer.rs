use ilattice::glam::Vec3;

/// Triangles produced for one bucket, or accumulated across buckets.
///
/// `normals` is either empty or parallel to `vertices`. Triangle indices refer
/// to `vertices`; [`PolygonsData::append`] keeps them valid by offsetting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolygonsData {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Flat list of index triples.
    pub triangles: Vec<u32>,
}

impl PolygonsData {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len() / 3
    }

    #[inline]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Appends `other`, offsetting its indices past our vertices.
    pub fn append(&mut self, other: PolygonsData) {
        let offset = self.vertices.len() as u32;
        if self.has_normals() || other.has_normals() {
            // Keep `normals` parallel even if one side had none.
            self.normals.resize(self.vertices.len(), Vec3::ZERO);
            let mut normals = other.normals;
            normals.resize(other.vertices.len(), Vec3::ZERO);
            self.normals.extend(normals);
        }
        self.vertices.extend(other.vertices);
        self.triangles
            .extend(other.triangles.into_iter().map(|i| i + offset));
    }

    /// Sets every vertex normal to `normal`.
    pub fn fill_normals(&mut self, normal: Vec3) {
        self.normals.clear();
        self.normals.resize(self.vertices.len(), normal);
    }

    /// Flips every triangle whose geometric normal points away from `normal`.
    pub fn orient_towards(&mut self, normal: Vec3) {
        for tri in self.triangles.chunks_exact_mut(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| self.vertices[i as usize]);
            if (b - a).cross(c - a).dot(normal) < 0.0 {
                tri.swap(1, 2);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(z: f32) -> PolygonsData {
        PolygonsData {
            vertices: vec![
                Vec3::new(0.0, 0.0, z),
                Vec3::new(1.0, 0.0, z),
                Vec3::new(0.0, 1.0, z),
            ],
            normals: Vec::new(),
            triangles: vec![0, 1, 2],
        }
    }

    #[test]
    fn append_offsets_indices() {
        let mut data = triangle(0.0);
        let mut other = triangle(1.0);
        other.fill_normals(Vec3::Z);
        data.append(other);

        assert_eq!(data.triangles, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(data.normals.len(), data.vertices.len());
        assert_eq!(data.normals[0], Vec3::ZERO);
        assert_eq!(data.normals[5], Vec3::Z);
    }

    #[test]
    fn orientation_follows_normal() {
        let mut data = triangle(0.0);
        data.orient_towards(Vec3::NEG_Z);
        assert_eq!(data.triangles, vec![0, 2, 1]);
        data.orient_towards(Vec3::NEG_Z);
        assert_eq!(data.triangles, vec![0, 2, 1]);
    }
}
