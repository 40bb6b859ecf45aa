//! Draw-ready primitive lists for an external renderer.
//!
//! Purpose
//! - `H2Buffer` collects geometric objects tagged with a color and a line
//!   width, plus the data of at most one mesh and its ghost translates.
//! - A `CanvasDelegate` reads the buffer and flattens it into
//!   `DrawCommand`s in disk coordinates: points, segments, circles and
//!   circle arcs. Rasterization is left to the caller.
//!
//! Mesh data is copied out of `H2Mesh` (`add_mesh`, `refresh_mesh`), so the
//! buffer does not borrow the mesh.
//!
//! Code cross-refs: `mesh::H2Mesh`, `representation::IsomH2Representation`.

mod delegate;
mod viewport;

pub use delegate::{
    make_delegate, CanvasDelegate, DelegateKind, H2Delegate, H2DelegateDomain, H2DelegateTarget,
};
pub use viewport::Viewport;

use crate::error::{GeometryError, Result};
use crate::h2::{H2Geodesic, H2GeodesicArc, H2Isometry, H2Point, H2Polygon, H2Triangle};
use crate::mesh::H2Mesh;
use crate::representation::IsomH2Representation;
use crate::Complex;

/// Default width of points.
pub const POINT_WIDTH: u32 = 3;
/// Default width of lines.
pub const LINE_WIDTH: u32 = 1;

/// RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GRAY: Color = Color::rgb(160, 160, 164);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// An object with its drawing style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Styled<T> {
    pub item: T,
    pub color: Color,
    pub width: u32,
}

impl<T> Styled<T> {
    #[inline]
    pub fn new(item: T, color: Color, width: u32) -> Self {
        Self { item, color, width }
    }
}

/// Primitive in disk coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Point {
        at: Complex,
        color: Color,
        width: u32,
    },
    Segment {
        from: Complex,
        to: Complex,
        color: Color,
        width: u32,
    },
    Circle {
        center: Complex,
        radius: f64,
        color: Color,
        width: u32,
    },
    /// The smaller arc of the circle between the two angles.
    Arc {
        center: Complex,
        radius: f64,
        angle1: f64,
        angle2: f64,
        color: Color,
        width: u32,
    },
}

/// Geometric objects waiting to be drawn.
#[derive(Clone, Debug, Default)]
pub struct H2Buffer {
    points: Vec<Styled<H2Point>>,
    geodesics: Vec<Styled<H2Geodesic>>,
    arcs: Vec<Styled<H2GeodesicArc>>,

    mesh_style: Option<(Color, u32)>,
    mesh_sides: Vec<H2GeodesicArc>,
    mesh_points: Vec<H2Point>,
    mesh_arcs: Vec<H2GeodesicArc>,

    translations_around_vertex: Vec<H2Isometry>,
    translations_around_vertices: Vec<H2Isometry>,
    translates_style: (Color, u32),
    side_translates: Vec<H2GeodesicArc>,
    mesh_points_translates: Vec<H2Point>,
    mesh_arcs_translates: Vec<H2GeodesicArc>,
}

impl H2Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the buffer, mesh data and translations included.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn add_point(&mut self, p: H2Point, color: Color, width: u32) {
        self.points.push(Styled::new(p, color, width));
    }

    pub fn add_points(&mut self, points: &[H2Point], color: Color, width: u32) {
        for p in points {
            self.add_point(*p, color, width);
        }
    }

    pub fn add_geodesic(&mut self, l: H2Geodesic, color: Color, width: u32) {
        self.geodesics.push(Styled::new(l, color, width));
    }

    pub fn add_geodesics(&mut self, geodesics: &[H2Geodesic], color: Color, width: u32) {
        for l in geodesics {
            self.add_geodesic(*l, color, width);
        }
    }

    pub fn add_arc(&mut self, arc: H2GeodesicArc, color: Color, width: u32) {
        self.arcs.push(Styled::new(arc, color, width));
    }

    pub fn add_arcs(&mut self, arcs: &[H2GeodesicArc], color: Color, width: u32) {
        for a in arcs {
            self.add_arc(*a, color, width);
        }
    }

    /// Sides in `color` with unit width; vertices in black with `width`.
    pub fn add_polygon(&mut self, polygon: &H2Polygon, color: Color, width: u32) {
        self.add_arcs(&polygon.sides(), color, LINE_WIDTH);
        self.add_points(polygon.vertices(), Color::BLACK, width);
    }

    pub fn add_polygons(&mut self, polygons: &[H2Polygon], color: Color, width: u32) {
        for p in polygons {
            self.add_polygon(p, color, width);
        }
    }

    /// Same styling as `add_polygon`.
    pub fn add_triangle(&mut self, triangle: &H2Triangle, color: Color, width: u32) {
        self.add_points(&triangle.points(), Color::BLACK, width);
        self.add_arcs(&triangle.sides(), color, LINE_WIDTH);
    }

    pub fn add_triangles(&mut self, triangles: &[H2Triangle], color: Color, width: u32) {
        for t in triangles {
            self.add_triangle(t, color, width);
        }
    }

    /// Adds the translation axis; isometries without one are skipped.
    pub fn add_isometry(&mut self, f: &H2Isometry, color: Color, width: u32) {
        if let Some(axis) = f.axis() {
            self.add_geodesic(axis, color, width);
        }
    }

    pub fn add_isometries(&mut self, isometries: &[H2Isometry], color: Color, width: u32) {
        for f in isometries {
            self.add_isometry(f, color, width);
        }
    }

    /// Axes of the generator images.
    pub fn add_representation(&mut self, rho: &IsomH2Representation, color: Color, width: u32) {
        self.add_isometries(rho.generator_images(), color, width);
    }

    /// Copies the sides, inside points and lattice triangles of `mesh`.
    pub fn add_mesh(&mut self, mesh: &H2Mesh<'_>, color: Color, width: u32) {
        self.mesh_style = Some((color, width));
        self.refresh_mesh(mesh);
    }

    /// Re-derives the mesh lists, keeping the mesh style.
    pub fn refresh_mesh(&mut self, mesh: &H2Mesh<'_>) {
        self.mesh_sides = mesh.sides();
        self.mesh_points = mesh.points();
        self.mesh_arcs = mesh
            .triangles_up()
            .iter()
            .flat_map(|t| t.sides())
            .collect();
        if self.mesh_style.is_none() {
            self.mesh_style = Some((Color::BLACK, LINE_WIDTH));
        }
    }

    /// Loads the polygon translates around one vertex and around all vertices.
    pub fn set_translations(&mut self, rho: &IsomH2Representation) -> Result<()> {
        self.translations_around_vertex = rho.side_pairings_normalized_around_vertex()?;
        self.translations_around_vertices = rho.side_pairings_normalized_around_vertices()?;
        Ok(())
    }

    /// Ghost copies of the mesh sides under the translates around all vertices.
    pub fn add_side_translates(&mut self, color: Color, width: u32) {
        let translations = std::mem::take(&mut self.translations_around_vertices);
        self.add_side_translates_by(&translations, color, width);
        self.translations_around_vertices = translations;
    }

    /// Ghost copies of the mesh sides under `translations`.
    pub fn add_side_translates_by(&mut self, translations: &[H2Isometry], color: Color, width: u32) {
        self.translates_style = (color, width);
        self.side_translates = translations
            .iter()
            .flat_map(|f| self.mesh_sides.iter().map(move |s| *f * *s))
            .collect();
    }

    /// Side translates, plus the mesh translated around one vertex or around
    /// all vertices; asking for both is an error.
    pub fn add_mesh_translates(
        &mut self,
        around_vertex: bool,
        around_vertices: bool,
        color: Color,
        width: u32,
    ) -> Result<()> {
        if around_vertex && around_vertices {
            return Err(GeometryError::InvalidGeometry(
                "mesh translates around one vertex and around all vertices are exclusive".into(),
            ));
        }
        self.add_side_translates(color, width);
        self.mesh_points_translates.clear();
        self.mesh_arcs_translates.clear();
        let translations = if around_vertex {
            &self.translations_around_vertex
        } else if around_vertices {
            &self.translations_around_vertices
        } else {
            return Ok(());
        };
        self.mesh_points_translates.reserve(translations.len() * self.mesh_points.len());
        self.mesh_arcs_translates.reserve(translations.len() * self.mesh_arcs.len());
        for f in translations {
            self.mesh_points_translates
                .extend(self.mesh_points.iter().map(|p| *f * *p));
            self.mesh_arcs_translates
                .extend(self.mesh_arcs.iter().map(|a| *f * *a));
        }
        Ok(())
    }

    #[inline]
    pub fn points(&self) -> &[Styled<H2Point>] {
        &self.points
    }

    #[inline]
    pub fn geodesics(&self) -> &[Styled<H2Geodesic>] {
        &self.geodesics
    }

    #[inline]
    pub fn arcs(&self) -> &[Styled<H2GeodesicArc>] {
        &self.arcs
    }

    /// `None` until a mesh is added.
    #[inline]
    pub fn mesh_style(&self) -> Option<(Color, u32)> {
        self.mesh_style
    }

    #[inline]
    pub fn mesh_sides(&self) -> &[H2GeodesicArc] {
        &self.mesh_sides
    }

    #[inline]
    pub fn mesh_points(&self) -> &[H2Point] {
        &self.mesh_points
    }

    /// Sides of the lattice triangles of the mesh.
    #[inline]
    pub fn mesh_arcs(&self) -> &[H2GeodesicArc] {
        &self.mesh_arcs
    }

    #[inline]
    pub fn translations_around_vertex(&self) -> &[H2Isometry] {
        &self.translations_around_vertex
    }

    #[inline]
    pub fn translations_around_vertices(&self) -> &[H2Isometry] {
        &self.translations_around_vertices
    }

    #[inline]
    pub fn translates_style(&self) -> (Color, u32) {
        self.translates_style
    }

    #[inline]
    pub fn side_translates(&self) -> &[H2GeodesicArc] {
        &self.side_translates
    }

    #[inline]
    pub fn mesh_points_translates(&self) -> &[H2Point] {
        &self.mesh_points_translates
    }

    #[inline]
    pub fn mesh_arcs_translates(&self) -> &[H2GeodesicArc] {
        &self.mesh_arcs_translates
    }
}
