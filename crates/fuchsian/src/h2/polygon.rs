//! Geodesic polygons.
//!
//! Purpose
//! - Fundamental domains: the representation builds them, the mesh samples
//!   them, the triangulater cuts them into triangles.
//! - Containment and straightness questions are answered in the Klein model,
//!   where geodesics are straight chords and the polygon is a Euclidean one.
//!
//! Code cross-refs: `representation::IsomH2Representation::generate_polygon`,
//! `mesh::H2Mesh`, `triangulate::H2PolygonTriangulater`.

use std::f64::consts::{PI, TAU};

use crate::planar::mod_2pi;
use crate::triangulate::H2PolygonTriangulater;
use crate::Complex;

use super::arc::H2GeodesicArc;
use super::point::H2Point;
use super::triangle::H2Triangle;

/// Cyclic list of vertices joined by geodesic arcs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct H2Polygon {
    vertices: Vec<H2Point>,
}

/// Twice the signed area of the Euclidean triangle `(a, b, c)`; positive when counterclockwise.
#[inline]
pub(crate) fn klein_orientation(a: Complex, b: Complex, c: Complex) -> f64 {
    ((b - a).conj() * (c - a)).im
}

impl H2Polygon {
    #[inline]
    pub fn new(vertices: Vec<H2Point>) -> Self {
        Self { vertices }
    }

    #[inline]
    pub fn vertices(&self) -> &[H2Point] {
        &self.vertices
    }

    #[inline]
    pub fn nb_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex with cyclic indexing; `None` for an empty polygon.
    pub fn vertex(&self, k: isize) -> Option<H2Point> {
        let n = self.vertices.len();
        if n == 0 {
            return None;
        }
        Some(self.vertices[k.rem_euclid(n as isize) as usize])
    }

    pub fn add_vertex(&mut self, p: H2Point) {
        self.vertices.push(p);
    }

    pub fn sides(&self) -> Vec<H2GeodesicArc> {
        let n = self.vertices.len();
        (0..n)
            .map(|k| H2GeodesicArc::new(self.vertices[k], self.vertices[(k + 1) % n]))
            .collect()
    }

    pub fn vertices_in_klein_model(&self) -> Vec<Complex> {
        self.vertices.iter().map(H2Point::klein).collect()
    }

    /// Counterclockwise in the Klein model (shoelace sign).
    pub fn is_positively_oriented(&self) -> bool {
        let k = self.vertices_in_klein_model();
        let n = k.len();
        let twice_area: f64 = (0..n).map(|j| (k[j].conj() * k[(j + 1) % n]).im).sum();
        twice_area > 0.0
    }

    /// Interior angle at each vertex, in `[0, 2π)`.
    pub fn interior_angles(&self) -> Vec<f64> {
        let n = self.vertices.len();
        if n < 3 {
            return vec![0.0; n];
        }
        let positive = self.is_positively_oriented();
        (0..n)
            .map(|k| {
                let z = self.vertices[k].disk();
                let next = self.vertices[(k + 1) % n].disk();
                let prev = self.vertices[(k + n - 1) % n].disk();
                let u = (next - z) / (1.0 - z.conj() * next);
                let v = (prev - z) / (1.0 - z.conj() * prev);
                let a = mod_2pi((v * u.conj()).arg());
                if positive {
                    a
                } else {
                    mod_2pi(TAU - a)
                }
            })
            .collect()
    }

    pub fn is_convex(&self) -> bool {
        self.interior_angles().iter().all(|&a| a < PI)
    }

    /// Gauss–Bonnet: `(n − 2)π − Σ angles`.
    pub fn area(&self) -> f64 {
        let n = self.vertices.len() as f64;
        (n - 2.0) * PI - self.interior_angles().iter().sum::<f64>()
    }

    /// Even-odd ray casting on the Klein polygon.
    pub fn contains(&self, p: &H2Point) -> bool {
        let k = self.vertices_in_klein_model();
        let n = k.len();
        if n < 3 {
            return false;
        }
        let q = p.klein();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (k[i], k[j]);
            if (a.im > q.im) != (b.im > q.im) {
                let x = a.re + (q.im - a.im) * (b.re - a.re) / (b.im - a.im);
                if q.re < x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Union of the sides' bounding boxes in hyperboloid projection.
    pub fn extremal_coordinates_in_hyperboloid_projection(&self) -> (f64, f64, f64, f64) {
        self.sides().iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(x0, x1, y0, y1), side| {
                let (a0, a1, b0, b1) = side.extremal_coordinates_in_hyperboloid_projection();
                (x0.min(a0), x1.max(a1), y0.min(b0), y1.max(b1))
            },
        )
    }

    /// Triangles of a diagonal triangulation (see `H2PolygonTriangulater`).
    pub fn triangulate(&self) -> Vec<H2Triangle> {
        H2PolygonTriangulater::new(self).h2_triangles()
    }
}
