//! Lattice mesh of a fundamental polygon with stitched boundary neighbors.
//!
//! Purpose
//! - Sample the fundamental polygon of a representation on a square lattice
//!   in hyperboloid-projection coordinates and give every inside point its
//!   four neighbors, so that functions on the surface can be discretized.
//! - Where a lattice neighbor falls outside the polygon, the neighbor on the
//!   surface is found by moving it back inside with one of the translates of
//!   the polygon around its vertices, then snapping to the closest lattice
//!   point.
//!
//! Construction (single pass in `H2Mesh::new`)
//! 1. polygon = `generate_polygon(cfg.polygon_precision)`, translates =
//!    `side_pairings_normalized_around_vertices()`.
//! 2. bounding box in hyperboloid projection, padded by `1.5·step` below.
//! 3. lattice of `nb_x × nb_y` points, row-major (`index = i + j·nb_x`).
//! 4. inside mask, then left/right/up/down links.
//!
//! Diagnostics
//! - Unresolved neighbors are logged with `warn!`; an inside point on the
//!   lattice edge is logged with `error!` (the padding is wrong). Both leave
//!   `MeshLink::Unresolved` in place and construction continues.
//! - A glued image with no inside lattice point close enough is recorded in
//!   `special_points`.
//!
//! Code cross-refs: `IsomH2Representation`, `buffer::H2Buffer::add_mesh`.

use tracing::{debug, error, warn};

use crate::cfg::MAX_MESH_POINTS;
use crate::error::{GeometryError, Result};
use crate::h2::{H2GeodesicArc, H2Isometry, H2Point, H2Polygon, H2Triangle};
use crate::representation::IsomH2Representation;
use crate::Complex;

/// Mesh construction parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshCfg {
    /// Lattice spacing in hyperboloid-projection coordinates.
    pub step: f64,
    /// Search iterations for the fundamental polygon.
    pub polygon_precision: usize,
}

impl Default for MeshCfg {
    fn default() -> Self {
        Self {
            step: 0.1,
            polygon_precision: 100,
        }
    }
}

/// Neighbor of a mesh point in one of the four lattice directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshLink {
    /// The point itself is outside the polygon.
    Outside,
    /// Lattice neighbor, inside the polygon.
    Interior(usize),
    /// Neighbor across a side: the lattice point closest to the image of
    /// the raw neighbor under `translates()[translate]`.
    Glued { index: usize, translate: usize },
    Unresolved,
}

impl MeshLink {
    /// Index of the neighboring mesh point, if resolved.
    pub fn index(&self) -> Option<usize> {
        match *self {
            MeshLink::Interior(i) | MeshLink::Glued { index: i, .. } => Some(i),
            MeshLink::Outside | MeshLink::Unresolved => None,
        }
    }

    #[inline]
    pub fn is_glued(&self) -> bool {
        matches!(self, MeshLink::Glued { .. })
    }
}

#[derive(Clone, Copy, Debug)]
enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Outcome of a closest-lattice-point query.
enum Located {
    OutOfBounds,
    OutsidePolygon,
    Found(usize),
    NoneClose(usize),
}

/// Lattice mesh of the fundamental polygon of a representation.
///
/// Borrows the representation, which must outlive the mesh.
#[derive(Clone, Debug)]
pub struct H2Mesh<'a> {
    representation: &'a IsomH2Representation,
    polygon: H2Polygon,
    translates: Vec<H2Isometry>,
    step: f64,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    nb_points_x: usize,
    nb_points_y: usize,
    mesh_points: Vec<Complex>,
    is_inside: Vec<bool>,
    left: Vec<MeshLink>,
    right: Vec<MeshLink>,
    up: Vec<MeshLink>,
    down: Vec<MeshLink>,
    special_points: Vec<usize>,
}

impl<'a> H2Mesh<'a> {
    /// Builds the mesh; fails on a non-positive step, on a step so small that
    /// the lattice exceeds `MAX_MESH_POINTS`, or on a representation without
    /// a closed-surface presentation.
    pub fn new(cfg: MeshCfg, representation: &'a IsomH2Representation) -> Result<Self> {
        if !(cfg.step.is_finite() && cfg.step > 0.0) {
            return Err(GeometryError::InvalidGeometry(format!(
                "mesh step must be positive, got {}",
                cfg.step
            )));
        }
        let step = cfg.step;
        let polygon = representation.generate_polygon(cfg.polygon_precision)?;
        let translates = representation.side_pairings_normalized_around_vertices()?;

        let (x_min, x_max, y_min, y_max) = polygon.extremal_coordinates_in_hyperboloid_projection();
        let x_min = x_min - 1.5 * step;
        let y_min = y_min - 1.5 * step;
        let span_x = ((x_max - x_min) / step).floor();
        let span_y = ((y_max - y_min) / step).floor();
        // NaN spans fail the comparison too
        if !((span_x + 3.0) * (span_y + 3.0) <= MAX_MESH_POINTS as f64) {
            return Err(GeometryError::InvalidGeometry(format!(
                "mesh step {} gives a lattice of {} x {} points, more than {}",
                step,
                span_x + 3.0,
                span_y + 3.0,
                MAX_MESH_POINTS
            )));
        }
        let nb_points_x = 3 + span_x as usize;
        let nb_points_y = 3 + span_y as usize;
        let x_max = x_min + (nb_points_x - 1) as f64 * step;
        let y_max = y_min + (nb_points_y - 1) as f64 * step;
        debug!(x_min, x_max, y_min, y_max, nb_points_x, nb_points_y, "mesh lattice");

        let n = nb_points_x * nb_points_y;
        let mut mesh_points = Vec::with_capacity(n);
        for j in 0..nb_points_y {
            for i in 0..nb_points_x {
                mesh_points.push(Complex::new(
                    x_min + i as f64 * step,
                    y_min + j as f64 * step,
                ));
            }
        }
        let is_inside = mesh_points
            .iter()
            .map(|z| polygon.contains(&H2Point::from_hyperboloid_projection(*z)))
            .collect();

        let mut mesh = Self {
            representation,
            polygon,
            translates,
            step,
            x_min,
            x_max,
            y_min,
            y_max,
            nb_points_x,
            nb_points_y,
            mesh_points,
            is_inside,
            left: vec![MeshLink::Unresolved; n],
            right: vec![MeshLink::Unresolved; n],
            up: vec![MeshLink::Unresolved; n],
            down: vec![MeshLink::Unresolved; n],
            special_points: Vec::new(),
        };
        for dir in Direction::ALL {
            mesh.fill_neighbors(dir);
        }
        debug!(
            nb_inside = mesh.is_inside.iter().filter(|b| **b).count(),
            glued = ?mesh.glued_counts(),
            nb_special = mesh.special_points.len(),
            "mesh built"
        );
        Ok(mesh)
    }

    /// Raw lattice neighbor of `i`, or `None` on the lattice edge.
    fn raw_neighbor(&self, i: usize, dir: Direction) -> Option<usize> {
        let nx = self.nb_points_x;
        match dir {
            Direction::Left => (i % nx != 0).then(|| i - 1),
            Direction::Right => (i % nx != nx - 1).then(|| i + 1),
            Direction::Up => (i < nx * (self.nb_points_y - 1)).then(|| i + nx),
            Direction::Down => (i >= nx).then(|| i - nx),
        }
    }

    fn fill_neighbors(&mut self, dir: Direction) {
        let links: Vec<MeshLink> = (0..self.mesh_points.len())
            .map(|i| self.resolve_neighbor(i, dir))
            .collect();
        match dir {
            Direction::Left => self.left = links,
            Direction::Right => self.right = links,
            Direction::Up => self.up = links,
            Direction::Down => self.down = links,
        }
    }

    fn resolve_neighbor(&mut self, i: usize, dir: Direction) -> MeshLink {
        if !self.is_inside[i] {
            return MeshLink::Outside;
        }
        let Some(raw) = self.raw_neighbor(i, dir) else {
            error!(index = i, direction = dir.name(), "point inside polygon is a mesh boundary point");
            return MeshLink::Unresolved;
        };
        if self.is_inside[raw] {
            return MeshLink::Interior(raw);
        }
        let p_in = H2Point::from_hyperboloid_projection(self.mesh_points[raw]);
        let found = self.translates.iter().enumerate().find_map(|(k, f)| {
            let p_out = *f * p_in;
            self.polygon.contains(&p_out).then_some((k, p_out))
        });
        let Some((translate, p_out)) = found else {
            warn!(index = i, direction = dir.name(), "no translate brings the neighbor inside");
            return MeshLink::Unresolved;
        };
        match self.locate(p_out.hyperboloid_projection()) {
            Located::Found(index) => MeshLink::Glued { index, translate },
            Located::NoneClose(cell) => {
                warn!(index = i, cell, direction = dir.name(), "no close inside mesh point");
                self.special_points.push(cell);
                MeshLink::Unresolved
            }
            Located::OutOfBounds | Located::OutsidePolygon => {
                warn!(index = i, direction = dir.name(), "glued image left the mesh");
                MeshLink::Unresolved
            }
        }
    }

    fn locate(&self, z: Complex) -> Located {
        if z.re < self.x_min || z.re > self.x_max || z.im < self.y_min || z.im > self.y_max {
            return Located::OutOfBounds;
        }
        if !self
            .polygon
            .contains(&H2Point::from_hyperboloid_projection(z))
        {
            return Located::OutsidePolygon;
        }
        let nx = self.nb_points_x;
        let n = self.mesh_points.len();
        let ix = ((z.re - self.x_min) / self.step) as usize;
        let iy = ((z.im - self.y_min) / self.step) as usize;
        let index = ix + nx * iy;

        let last_column = index % nx == nx - 1;
        let candidates = [
            Some(index),
            (!last_column).then(|| index + 1),
            Some(index + nx),
            (!last_column).then(|| index + nx + 1),
        ];
        let mut best = 2.0 * self.step * self.step;
        let mut output = None;
        for c in candidates.into_iter().flatten() {
            if c < n && self.is_inside[c] {
                let d = (z - self.mesh_points[c]).norm_sqr();
                if d < best {
                    best = d;
                    output = Some(c);
                }
            }
        }
        match output {
            Some(c) => Located::Found(c),
            None => Located::NoneClose(index),
        }
    }

    /// Inside lattice point within `√2·step` of `z` (hyperboloid projection).
    pub fn closest_mesh_index(&self, z: Complex) -> Option<usize> {
        match self.locate(z) {
            Located::Found(c) => Some(c),
            Located::OutOfBounds => {
                warn!(%z, "point is not within mesh boundaries");
                None
            }
            Located::OutsidePolygon => {
                warn!(%z, "point is not inside the polygon");
                None
            }
            Located::NoneClose(cell) => {
                warn!(%z, cell, "no inside mesh point close enough");
                None
            }
        }
    }

    #[inline]
    pub fn nb_points(&self) -> usize {
        self.mesh_points.len()
    }

    #[inline]
    pub fn nb_points_x(&self) -> usize {
        self.nb_points_x
    }

    #[inline]
    pub fn nb_points_y(&self) -> usize {
        self.nb_points_y
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// `(x_min, x_max, y_min, y_max)` of the lattice.
    #[inline]
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.x_max, self.y_min, self.y_max)
    }

    /// Lattice points in hyperboloid-projection coordinates, row-major.
    #[inline]
    pub fn mesh_points(&self) -> &[Complex] {
        &self.mesh_points
    }

    #[inline]
    pub fn inside_mask(&self) -> &[bool] {
        &self.is_inside
    }

    /// `false` out of bounds.
    #[inline]
    pub fn is_inside(&self, index: usize) -> bool {
        self.is_inside.get(index).copied().unwrap_or(false)
    }

    #[inline]
    pub fn left_neighbor(&self, index: usize) -> Option<MeshLink> {
        self.left.get(index).copied()
    }

    #[inline]
    pub fn right_neighbor(&self, index: usize) -> Option<MeshLink> {
        self.right.get(index).copied()
    }

    #[inline]
    pub fn up_neighbor(&self, index: usize) -> Option<MeshLink> {
        self.up.get(index).copied()
    }

    #[inline]
    pub fn down_neighbor(&self, index: usize) -> Option<MeshLink> {
        self.down.get(index).copied()
    }

    /// Lattice cells where a glued neighbor found no close inside point.
    #[inline]
    pub fn special_points(&self) -> &[usize] {
        &self.special_points
    }

    #[inline]
    pub fn polygon(&self) -> &H2Polygon {
        &self.polygon
    }

    #[inline]
    pub fn representation(&self) -> &'a IsomH2Representation {
        self.representation
    }

    /// Isometries referenced by `MeshLink::Glued::translate`.
    #[inline]
    pub fn translates(&self) -> &[H2Isometry] {
        &self.translates
    }

    pub fn point(&self, index: usize) -> Option<H2Point> {
        self.mesh_points
            .get(index)
            .map(|z| H2Point::from_hyperboloid_projection(*z))
    }

    /// Inside points as points of H².
    pub fn points(&self) -> Vec<H2Point> {
        self.mesh_points
            .iter()
            .zip(&self.is_inside)
            .filter(|(_, inside)| **inside)
            .map(|(z, _)| H2Point::from_hyperboloid_projection(*z))
            .collect()
    }

    pub fn sides(&self) -> Vec<H2GeodesicArc> {
        self.polygon.sides()
    }

    /// Triangles `(p, right(p), up(p))` over interior links.
    pub fn triangles_up(&self) -> Vec<H2Triangle> {
        let mut out = Vec::new();
        for i in 0..self.nb_points() {
            if let (MeshLink::Interior(r), MeshLink::Interior(u)) = (self.right[i], self.up[i]) {
                if let (Some(p), Some(pr), Some(pu)) = (self.point(i), self.point(r), self.point(u)) {
                    out.push(H2Triangle::new(p, pr, pu));
                }
            }
        }
        out
    }

    fn count_links(&self, pred: impl Fn(&MeshLink) -> bool) -> [usize; 4] {
        [&self.left, &self.right, &self.up, &self.down]
            .map(|links| links.iter().filter(|l| pred(l)).count())
    }

    /// Number of glued links, ordered left, right, up, down.
    pub fn glued_counts(&self) -> [usize; 4] {
        self.count_links(MeshLink::is_glued)
    }

    /// Number of unresolved links of inside points, ordered left, right, up, down.
    pub fn unresolved_counts(&self) -> [usize; 4] {
        self.count_links(|l| *l == MeshLink::Unresolved)
    }
}
