use crate::{Polygon, TriangulationError};

use ilattice::glam::Vec2;
use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{ConstrainedDelaunayTriangulation, Point2, PositionInTriangulation, Triangulation as _};
use std::collections::VecDeque;

/// Triangles covering the filled region of a [`Polygon`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Triangulation {
    pub vertices: Vec<Vec2>,
    /// Counter-clockwise index triples into `vertices`.
    pub triangles: Vec<u32>,
}

impl Triangulation {
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len() / 3
    }
}

/// Turns a polygon with rings and hole seeds into triangles.
///
/// Implementations must use only the polygon's points as vertices and must not
/// produce triangles in regions reachable from a hole seed.
pub trait Triangulator {
    fn triangulate(&self, polygon: &Polygon) -> Result<Triangulation, TriangulationError>;
}

/// Constrained Delaunay triangulation without refinement.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstrainedDelaunay;

type Cdt = ConstrainedDelaunayTriangulation<Point2<f64>>;

impl Triangulator for ConstrainedDelaunay {
    fn triangulate(&self, polygon: &Polygon) -> Result<Triangulation, TriangulationError> {
        if polygon.rings.is_empty() {
            return Err(TriangulationError::EmptyPolygon);
        }

        let mut cdt = Cdt::new();
        for p in polygon.outer {
            insert(&mut cdt, p)?;
        }
        let mut rings = Vec::with_capacity(polygon.rings.len());
        for ring in polygon.rings.iter() {
            let handles = ring
                .iter()
                .map(|p| insert(&mut cdt, *p))
                .collect::<Result<Vec<_>, _>>()?;
            rings.push(handles);
        }

        for handles in rings.iter() {
            for (i, from) in handles.iter().enumerate() {
                let to = handles[(i + 1) % handles.len()];
                if *from == to {
                    continue;
                }
                if cdt.can_add_constraint(*from, to) {
                    cdt.add_constraint(*from, to);
                } else {
                    log::trace!("skipping constraint {from:?} -> {to:?}: crosses an existing one");
                }
            }
        }

        let eaten = eat_holes(&cdt, &polygon.holes);
        Ok(collect_faces(&cdt, &eaten))
    }
}

fn insert(cdt: &mut Cdt, p: Vec2) -> Result<FixedVertexHandle, TriangulationError> {
    cdt.insert(Point2::new(p.x as f64, p.y as f64))
        .map_err(|e| TriangulationError::Insertion {
            x: p.x,
            y: p.y,
            reason: format!("{e:?}"),
        })
}

/// Marks every face reachable from a seed without crossing a constraint.
fn eat_holes(cdt: &Cdt, holes: &[Vec2]) -> Vec<bool> {
    let mut eaten = vec![false; cdt.num_all_faces()];
    let mut queue: VecDeque<FixedFaceHandle<InnerTag>> = VecDeque::new();

    for seed in holes {
        let face = match cdt.locate(Point2::new(seed.x as f64, seed.y as f64)) {
            PositionInTriangulation::OnFace(face) => Some(face),
            PositionInTriangulation::OnEdge(edge) => {
                let edge = cdt.directed_edge(edge);
                if cdt.is_constraint_edge(edge.fix().as_undirected()) {
                    None
                } else {
                    edge.face().as_inner().map(|face| face.fix())
                }
            }
            _ => None,
        };
        let Some(face) = face else {
            log::trace!("skipping hole seed {seed} on the boundary");
            continue;
        };
        if !eaten[face.index()] {
            eaten[face.index()] = true;
            queue.push_back(face);
        }
    }

    while let Some(face) = queue.pop_front() {
        for edge in cdt.face(face).adjacent_edges() {
            if cdt.is_constraint_edge(edge.fix().as_undirected()) {
                continue;
            }
            let Some(next) = edge.rev().face().as_inner() else {
                continue;
            };
            let next = next.fix();
            if !eaten[next.index()] {
                eaten[next.index()] = true;
                queue.push_back(next);
            }
        }
    }
    eaten
}

fn collect_faces(cdt: &Cdt, eaten: &[bool]) -> Triangulation {
    let mut remap: Vec<Option<u32>> = vec![None; cdt.num_vertices()];
    let mut out = Triangulation::default();
    for face in cdt.inner_faces() {
        if eaten[face.fix().index()] {
            continue;
        }
        for vertex in face.vertices() {
            let slot = &mut remap[vertex.fix().index()];
            let index = match *slot {
                Some(index) => index,
                None => {
                    let index = out.vertices.len() as u32;
                    let p = vertex.position();
                    out.vertices.push(Vec2::new(p.x as f32, p.y as f32));
                    *slot = Some(index);
                    index
                }
            };
            out.triangles.push(index);
        }
    }
    out
}
