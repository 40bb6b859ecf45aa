//! Triangulation of geodesic polygons by internal diagonals.
//!
//! Purpose
//! - Split a (possibly non-convex) `H2Polygon` into `n − 2` triangles with
//!   `n − 3` diagonals, keeping track of which triangles sit on either side
//!   of each diagonal and which triangle carries each polygon side.
//!
//! Model
//! - Recursive: a subpolygon with three vertices is a triangle; otherwise the
//!   vertices are ranked by decreasing interior angle, and for each of them
//!   partners are tried from the most balanced split outwards. The first
//!   diagonal that crosses no side and whose midpoint lies inside the
//!   subpolygon is cut.
//! - Straightness questions are asked in the Klein model, where the
//!   diagonals and sides are Euclidean segments.
//!
//! Code cross-refs: `H2Polygon::triangulate`, `H2Polygon::interior_angles`.

use std::cmp::Ordering;

use tracing::warn;

use crate::cfg::KLEIN_EPS;
use crate::h2::{klein_orientation, H2Point, H2Polygon, H2Triangle};
use crate::Complex;

/// Diagonal between two polygon vertices and the triangles on each side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriangulationCut {
    pub vertex_index1: usize,
    pub vertex_index2: usize,
    /// Triangle on the left of `vertex_index1 → vertex_index2` (Klein model).
    pub left_triangle_index: usize,
    pub right_triangle_index: usize,
}

/// Triangle given by polygon vertex indices, stored in increasing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriangulationTriangle {
    vertex_indices: [usize; 3],
}

impl TriangulationTriangle {
    pub fn new(i1: usize, i2: usize, i3: usize) -> Self {
        let mut vertex_indices = [i1, i2, i3];
        vertex_indices.sort_unstable();
        Self { vertex_indices }
    }

    #[inline]
    pub fn vertices(&self) -> [usize; 3] {
        self.vertex_indices
    }

    #[inline]
    pub fn has_vertex(&self, i: usize) -> bool {
        self.vertex_indices.contains(&i)
    }

    fn third_vertex(&self, i: usize, j: usize) -> Option<usize> {
        self.vertex_indices
            .iter()
            .copied()
            .find(|&k| k != i && k != j)
    }
}

pub struct H2PolygonTriangulater<'a> {
    polygon: &'a H2Polygon,
    cuts: Vec<TriangulationCut>,
    triangles: Vec<TriangulationTriangle>,
    side_triangle_indices: Vec<usize>,
}

fn segments_cross(a: Complex, b: Complex, c: Complex, d: Complex) -> bool {
    let o1 = klein_orientation(a, b, c);
    let o2 = klein_orientation(a, b, d);
    let o3 = klein_orientation(c, d, a);
    let o4 = klein_orientation(c, d, b);
    let opposite = |x: f64, y: f64| (x > KLEIN_EPS && y < -KLEIN_EPS) || (x < -KLEIN_EPS && y > KLEIN_EPS);
    opposite(o1, o2) && opposite(o3, o4)
}

impl<'a> H2PolygonTriangulater<'a> {
    /// Triangulates immediately; polygons with fewer than 3 vertices give nothing.
    pub fn new(polygon: &'a H2Polygon) -> Self {
        let mut t = Self {
            polygon,
            cuts: Vec::new(),
            triangles: Vec::new(),
            side_triangle_indices: Vec::new(),
        };
        let n = polygon.nb_vertices();
        if n >= 3 {
            let indices: Vec<usize> = (0..n).collect();
            let mut diagonals = Vec::with_capacity(n - 3);
            t.triangulate_subpolygon(&indices, &mut diagonals);
            t.triangles.sort();
            t.complete_cuts_and_sides(&diagonals);
        }
        t
    }

    #[inline]
    pub fn polygon(&self) -> &H2Polygon {
        self.polygon
    }

    #[inline]
    pub fn triangles(&self) -> &[TriangulationTriangle] {
        &self.triangles
    }

    #[inline]
    pub fn cuts(&self) -> &[TriangulationCut] {
        &self.cuts
    }

    /// For each side `k → k + 1` of the polygon, the index of the triangle carrying it.
    #[inline]
    pub fn side_triangle_indices(&self) -> &[usize] {
        &self.side_triangle_indices
    }

    pub fn h2_triangles(&self) -> Vec<H2Triangle> {
        let v = self.polygon.vertices();
        self.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = t.vertices();
                H2Triangle::new(v[a], v[b], v[c])
            })
            .collect()
    }

    fn subpolygon(&self, indices: &[usize]) -> H2Polygon {
        let v = self.polygon.vertices();
        H2Polygon::new(indices.iter().map(|&i| v[i]).collect())
    }

    fn triangulate_subpolygon(&mut self, indices: &[usize], diagonals: &mut Vec<(usize, usize)>) {
        if indices.len() == 3 {
            self.triangles
                .push(TriangulationTriangle::new(indices[0], indices[1], indices[2]));
            return;
        }
        let (a, b) = self.find_cut_in_subpolygon(indices);
        diagonals.push((indices[a], indices[b]));
        let (first, second) = split_indices_list(indices, a, b);
        self.triangulate_subpolygon(&first, diagonals);
        self.triangulate_subpolygon(&second, diagonals);
    }

    /// Positions `(a, b)` with `a < b` of the cut in `indices`.
    fn find_cut_in_subpolygon(&self, indices: &[usize]) -> (usize, usize) {
        let m = indices.len();
        let sub = self.subpolygon(indices);
        let angles = sub.interior_angles();
        let klein = sub.vertices_in_klein_model();

        let mut ranked: Vec<usize> = (0..m).collect();
        ranked.sort_by(|&x, &y| angles[y].partial_cmp(&angles[x]).unwrap_or(Ordering::Equal));

        for &a in &ranked {
            let mut partners: Vec<usize> = (0..m)
                .filter(|&b| b != a && (b + 1) % m != a && (a + 1) % m != b)
                .collect();
            let half = m as f64 / 2.0;
            partners.sort_by(|&x, &y| {
                let bx = (((x + m - a) % m) as f64 - half).abs();
                let by = (((y + m - a) % m) as f64 - half).abs();
                bx.partial_cmp(&by).unwrap_or(Ordering::Equal)
            });
            for b in partners {
                if self.is_valid_cut(&sub, &klein, a, b) {
                    return (a.min(b), a.max(b));
                }
            }
        }
        warn!(nb_vertices = m, "no valid diagonal found, cutting at the first vertex");
        (0, 2)
    }

    fn is_valid_cut(&self, sub: &H2Polygon, klein: &[Complex], a: usize, b: usize) -> bool {
        let m = klein.len();
        let (ka, kb) = (klein[a], klein[b]);
        for s in 0..m {
            let t = (s + 1) % m;
            if s == a || s == b || t == a || t == b {
                continue;
            }
            if segments_cross(ka, kb, klein[s], klein[t]) {
                return false;
            }
        }
        sub.contains(&H2Point::from_klein((ka + kb) * 0.5))
    }

    fn triangle_with_edge(&self, i: usize, j: usize) -> impl Iterator<Item = usize> + '_ {
        self.triangles
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.has_vertex(i) && t.has_vertex(j))
            .map(|(k, _)| k)
    }

    fn complete_cuts_and_sides(&mut self, diagonals: &[(usize, usize)]) {
        let klein = self.polygon.vertices_in_klein_model();
        let mut cuts = Vec::with_capacity(diagonals.len());
        for &(i, j) in diagonals {
            let found: Vec<usize> = self.triangle_with_edge(i, j).collect();
            if found.len() != 2 {
                warn!(i, j, nb_triangles = found.len(), "diagonal is not shared by two triangles");
                continue;
            }
            let is_left = |k: usize| {
                self.triangles[k]
                    .third_vertex(i, j)
                    .map(|c| klein_orientation(klein[i], klein[j], klein[c]) > 0.0)
                    .unwrap_or(false)
            };
            let (left, right) = if is_left(found[0]) {
                (found[0], found[1])
            } else {
                (found[1], found[0])
            };
            cuts.push(TriangulationCut {
                vertex_index1: i,
                vertex_index2: j,
                left_triangle_index: left,
                right_triangle_index: right,
            });
        }
        let n = self.polygon.nb_vertices();
        let sides: Vec<usize> = (0..n)
            .filter_map(|k| self.triangle_with_edge(k, (k + 1) % n).next())
            .collect();
        self.cuts = cuts;
        self.side_triangle_indices = sides;
    }
}

/// Splits the cyclic list at positions `a < b` into the two sub-lists sharing the cut.
fn split_indices_list(indices: &[usize], a: usize, b: usize) -> (Vec<usize>, Vec<usize>) {
    let first = indices[a..=b].to_vec();
    let mut second = indices[b..].to_vec();
    second.extend_from_slice(&indices[..=a]);
    (first, second)
}
