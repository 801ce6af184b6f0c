use crate::TracedLayer;

use ilattice::glam::{IVec2, Vec2};

/// A layer's outlines as a triangulation problem.
///
/// The outer rectangle encloses the whole layer with a one-cell margin. Every
/// ring becomes a chain of constrained edges. Hole seeds mark regions that
/// must stay empty: every triangle reachable from a seed without crossing a
/// constrained edge is discarded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub outer: [Vec2; 4],
    pub rings: Vec<Vec<Vec2>>,
    pub holes: Vec<Vec2>,
}

impl Polygon {
    /// All points that become triangulation vertices.
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.outer
            .iter()
            .copied()
            .chain(self.rings.iter().flatten().copied())
    }
}

/// Returns `None` when the layer has no outlines.
pub fn build_polygon(layer: &TracedLayer) -> Option<Polygon> {
    if layer.loops.is_empty() {
        return None;
    }

    let size = layer.mask.size().as_ivec2();
    let (lo, hi) = (-Vec2::ONE, size.as_vec2() + Vec2::ONE);
    let outer = [lo, Vec2::new(hi.x, lo.y), hi, Vec2::new(lo.x, hi.y)];

    let rings = layer
        .loops
        .iter()
        .map(|ring| ring.iter().map(|p| p.as_vec2()).collect())
        .collect();

    // The margin cells are never walls, so they seed the region outside all
    // rings.
    let holes = (-1..=size.y)
        .flat_map(|y| (-1..=size.x).map(move |x| IVec2::new(x, y)))
        .filter(|cell| !layer.mask.is_wall(*cell))
        .map(|cell| cell.as_vec2() + Vec2::splat(0.5))
        .collect();

    Some(Polygon {
        outer,
        rings,
        holes,
    })
}
