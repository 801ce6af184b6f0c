use crate::MeshError;

use ilattice::glam::{UVec2, Vec2, Vec3};

/// How the sprite sheet is divided into equally sized sprites.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AtlasLayout {
    pub rows: u32,
    pub columns: u32,
}

impl Default for AtlasLayout {
    fn default() -> Self {
        Self {
            rows: 1,
            columns: 1,
        }
    }
}

/// Which sprite of the atlas the voxels were taken from. Row 0 is the top row.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SpriteIndex {
    pub row: u32,
    pub column: u32,
}

/// Everything mesh generation needs beyond the voxels themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshParams {
    /// Size of the whole texture in pixels.
    pub texture_size: UVec2,
    pub atlas: AtlasLayout,
    pub sprite: SpriteIndex,
    /// Origin of the mesh as a fraction of the sprite's size.
    pub pivot: Vec2,
    pub pixels_per_unit: f32,
    /// Weld coincident vertices and leave normals to the renderer.
    pub optimize_normals: bool,
    /// How far `v` moves per unit of depth.
    pub depth_v_shear: f32,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            texture_size: UVec2::ONE,
            atlas: AtlasLayout::default(),
            sprite: SpriteIndex::default(),
            pivot: Vec2::ZERO,
            pixels_per_unit: 1.0,
            optimize_normals: false,
            depth_v_shear: 0.0,
        }
    }
}

impl MeshParams {
    pub fn new(texture_size: UVec2) -> Self {
        Self {
            texture_size,
            ..Default::default()
        }
    }

    pub fn with_atlas(mut self, rows: u32, columns: u32) -> Self {
        self.atlas = AtlasLayout { rows, columns };
        self
    }

    pub fn with_sprite(mut self, row: u32, column: u32) -> Self {
        self.sprite = SpriteIndex { row, column };
        self
    }

    pub fn with_pivot(mut self, pivot: Vec2) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_pixels_per_unit(mut self, pixels_per_unit: f32) -> Self {
        self.pixels_per_unit = pixels_per_unit;
        self
    }

    pub fn with_optimize_normals(mut self, optimize_normals: bool) -> Self {
        self.optimize_normals = optimize_normals;
        self
    }

    pub fn with_depth_v_shear(mut self, depth_v_shear: f32) -> Self {
        self.depth_v_shear = depth_v_shear;
        self
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        let invalid = |msg: String| Err(MeshError::InvalidParams(msg));
        if self.texture_size.cmpeq(UVec2::ZERO).any() {
            return invalid(format!("texture_size must be non-zero (got {})", self.texture_size));
        }
        if self.atlas.rows == 0 || self.atlas.columns == 0 {
            return invalid("atlas must have at least one row and one column".into());
        }
        if self.sprite.row >= self.atlas.rows || self.sprite.column >= self.atlas.columns {
            return invalid(format!(
                "sprite ({}, {}) is outside the {}x{} atlas",
                self.sprite.row, self.sprite.column, self.atlas.rows, self.atlas.columns
            ));
        }
        if !self.pixels_per_unit.is_finite() || self.pixels_per_unit <= 0.0 {
            return invalid("pixels_per_unit must be finite and > 0".into());
        }
        if !self.pivot.is_finite() {
            return invalid("pivot must be finite".into());
        }
        if !self.depth_v_shear.is_finite() {
            return invalid("depth_v_shear must be finite".into());
        }
        Ok(())
    }

    /// Size of one sprite in pixels.
    #[inline]
    pub fn sprite_size(&self) -> Vec2 {
        self.texture_size.as_vec2() / Vec2::new(self.atlas.columns as f32, self.atlas.rows as f32)
    }

    /// Texture coordinate of a lattice point in sprite pixels.
    pub fn uv(&self, p: Vec3) -> Vec2 {
        let sprite = self.sprite_size();
        let rows_below = (self.atlas.rows - 1 - self.sprite.row) as f32;
        let pixel = Vec2::new(
            p.x + self.sprite.column as f32 * sprite.x,
            p.y + self.depth_v_shear * p.z + rows_below * sprite.y,
        );
        pixel / self.texture_size.as_vec2()
    }

    /// Final position of a lattice point in sprite pixels.
    pub fn place(&self, p: Vec3) -> Vec3 {
        let offset = self.pivot * self.sprite_size();
        (p - offset.extend(0.0)) / self.pixels_per_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atlas_uv() {
        let params = MeshParams::new(UVec2::splat(64))
            .with_atlas(2, 2)
            .with_sprite(0, 1);
        params.validate().unwrap();
        assert_eq!(params.uv(Vec3::ZERO), Vec2::new(0.5, 0.5));
        assert_eq!(params.uv(Vec3::new(32.0, 32.0, 5.0)), Vec2::ONE);

        let sheared = params.with_depth_v_shear(1.0);
        assert_eq!(sheared.uv(Vec3::new(0.0, 0.0, 16.0)), Vec2::new(0.5, 0.75));
    }

    #[test]
    fn placement_applies_pivot_and_scale() {
        let params = MeshParams::new(UVec2::new(16, 32))
            .with_pivot(Vec2::new(0.5, 0.0))
            .with_pixels_per_unit(8.0);
        assert_eq!(params.place(Vec3::new(8.0, 16.0, 4.0)), Vec3::new(0.0, 2.0, 0.5));
        assert_eq!(MeshParams::default().place(Vec3::ONE), Vec3::ONE);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let ok = MeshParams::new(UVec2::splat(16));
        assert!(ok.validate().is_ok());
        assert!(ok.clone().with_atlas(0, 1).validate().is_err());
        assert!(ok.clone().with_sprite(1, 0).validate().is_err());
        assert!(ok.clone().with_pixels_per_unit(0.0).validate().is_err());
        assert!(ok.clone().with_pivot(Vec2::NAN).validate().is_err());
        assert!(MeshParams::new(UVec2::new(0, 4)).validate().is_err());
    }
}
