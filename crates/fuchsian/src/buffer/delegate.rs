use crate::h2::{H2Geodesic, H2GeodesicArc, H2Isometry, H2Point};
use crate::Complex;

use super::{Color, DrawCommand, H2Buffer, Styled, Viewport, LINE_WIDTH};

/// Which delegate `make_delegate` builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DelegateKind {
    /// Plain buffer elements.
    H2,
    /// Buffer elements, the mesh and its translates.
    H2Domain,
    /// Mesh sides and their translates only.
    H2Target,
}

/// Turns a buffer into draw commands for one view.
pub trait CanvasDelegate {
    fn kind(&self) -> DelegateKind;

    fn viewport(&self) -> &Viewport;

    fn viewport_mut(&mut self) -> &mut Viewport;

    /// Draw commands for `buffer` after applying `mobius` to every element.
    fn redraw_buffer(&self, buffer: &H2Buffer, mobius: &H2Isometry) -> Vec<DrawCommand>;
}

/// Boxed delegate of the given kind over a `size_x × size_y` pixel window.
pub fn make_delegate(kind: DelegateKind, size_x: u32, size_y: u32) -> Box<dyn CanvasDelegate> {
    let viewport = Viewport::new(size_x, size_y);
    match kind {
        DelegateKind::H2 => Box::new(H2Delegate { viewport }),
        DelegateKind::H2Domain => Box::new(H2DelegateDomain { viewport }),
        DelegateKind::H2Target => Box::new(H2DelegateTarget { viewport }),
    }
}

/// Accumulates commands against one viewport.
struct Painter<'v> {
    viewport: &'v Viewport,
    mobius: H2Isometry,
    out: Vec<DrawCommand>,
}

impl<'v> Painter<'v> {
    fn new(viewport: &'v Viewport, mobius: &H2Isometry) -> Self {
        let mut painter = Self {
            viewport,
            mobius: *mobius,
            out: Vec::new(),
        };
        painter.out.push(DrawCommand::Circle {
            center: Complex::new(0.0, 0.0),
            radius: 1.0,
            color: Color::BLACK,
            width: LINE_WIDTH,
        });
        painter
    }

    fn point(&mut self, p: &H2Point, color: Color, width: u32) {
        self.out.push(DrawCommand::Point {
            at: (self.mobius * *p).disk(),
            color,
            width,
        });
    }

    fn segment(&mut self, from: Complex, to: Complex, color: Color, width: u32) {
        self.out.push(DrawCommand::Segment {
            from,
            to,
            color,
            width,
        });
    }

    fn geodesic(&mut self, l: &H2Geodesic, color: Color, width: u32) {
        let l = self.mobius * *l;
        match l.circle_and_angles() {
            Some((c, angle1, angle2)) if !self.viewport.is_almost_infinite_radius(c.radius) => {
                self.out.push(DrawCommand::Arc {
                    center: c.center,
                    radius: c.radius,
                    angle1,
                    angle2,
                    color,
                    width,
                });
            }
            _ => {
                let (z1, z2) = l.endpoints();
                self.segment(z1, z2, color, width);
            }
        }
    }

    fn arc(&mut self, a: &H2GeodesicArc, color: Color, width: u32) {
        let a = self.mobius * *a;
        let (z1, z2) = a.endpoints_in_disk_model();
        match a.circle_and_angles() {
            Some((c, angle1, angle2))
                if !self.viewport.is_almost_infinite_radius(c.radius)
                    && !self.viewport.is_almost_straight_arc(c.radius, z1, z2) =>
            {
                self.out.push(DrawCommand::Arc {
                    center: c.center,
                    radius: c.radius,
                    angle1,
                    angle2,
                    color,
                    width,
                });
            }
            _ => self.segment(z1, z2, color, width),
        }
    }

    fn styled_points(&mut self, points: &[Styled<H2Point>]) {
        for s in points {
            self.point(&s.item, s.color, s.width);
        }
    }

    fn styled_geodesics(&mut self, geodesics: &[Styled<H2Geodesic>]) {
        for s in geodesics {
            self.geodesic(&s.item, s.color, s.width);
        }
    }

    fn styled_arcs(&mut self, arcs: &[Styled<H2GeodesicArc>]) {
        for s in arcs {
            self.arc(&s.item, s.color, s.width);
        }
    }

    fn arcs(&mut self, arcs: &[H2GeodesicArc], color: Color, width: u32) {
        for a in arcs {
            self.arc(a, color, width);
        }
    }

    fn points(&mut self, points: &[H2Point], color: Color, width: u32) {
        for p in points {
            self.point(p, color, width);
        }
    }

    fn elements(&mut self, buffer: &H2Buffer) {
        self.styled_geodesics(buffer.geodesics());
        self.styled_arcs(buffer.arcs());
        self.styled_points(buffer.points());
    }

    fn side_translates(&mut self, buffer: &H2Buffer) {
        let (color, width) = buffer.translates_style();
        self.arcs(buffer.side_translates(), color, width);
    }
}

/// Draws the plain elements of a buffer.
#[derive(Clone, Debug)]
pub struct H2Delegate {
    viewport: Viewport,
}

impl H2Delegate {
    pub fn new(size_x: u32, size_y: u32) -> Self {
        Self {
            viewport: Viewport::new(size_x, size_y),
        }
    }
}

impl CanvasDelegate for H2Delegate {
    fn kind(&self) -> DelegateKind {
        DelegateKind::H2
    }

    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    fn redraw_buffer(&self, buffer: &H2Buffer, mobius: &H2Isometry) -> Vec<DrawCommand> {
        let mut painter = Painter::new(&self.viewport, mobius);
        painter.elements(buffer);
        painter.out
    }
}

/// Draws the domain of a mesh: translates first, then the mesh, then the
/// plain elements on top.
#[derive(Clone, Debug)]
pub struct H2DelegateDomain {
    viewport: Viewport,
}

impl H2DelegateDomain {
    pub fn new(size_x: u32, size_y: u32) -> Self {
        Self {
            viewport: Viewport::new(size_x, size_y),
        }
    }
}

impl CanvasDelegate for H2DelegateDomain {
    fn kind(&self) -> DelegateKind {
        DelegateKind::H2Domain
    }

    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    fn redraw_buffer(&self, buffer: &H2Buffer, mobius: &H2Isometry) -> Vec<DrawCommand> {
        let mut painter = Painter::new(&self.viewport, mobius);
        let (color, width) = buffer.translates_style();
        painter.arcs(buffer.mesh_arcs_translates(), color, width);
        painter.points(buffer.mesh_points_translates(), color, width);
        painter.side_translates(buffer);
        if let Some((color, width)) = buffer.mesh_style() {
            painter.arcs(buffer.mesh_arcs(), color, width);
            painter.points(buffer.mesh_points(), color, width);
            painter.arcs(buffer.mesh_sides(), Color::BLACK, width.max(LINE_WIDTH + 1));
        }
        painter.elements(buffer);
        painter.out
    }
}

/// Draws the target of a mesh map: its sides and their translates.
#[derive(Clone, Debug)]
pub struct H2DelegateTarget {
    viewport: Viewport,
}

impl H2DelegateTarget {
    pub fn new(size_x: u32, size_y: u32) -> Self {
        Self {
            viewport: Viewport::new(size_x, size_y),
        }
    }
}

impl CanvasDelegate for H2DelegateTarget {
    fn kind(&self) -> DelegateKind {
        DelegateKind::H2Target
    }

    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    fn redraw_buffer(&self, buffer: &H2Buffer, mobius: &H2Isometry) -> Vec<DrawCommand> {
        let mut painter = Painter::new(&self.viewport, mobius);
        painter.side_translates(buffer);
        if let Some((_, width)) = buffer.mesh_style() {
            painter.arcs(buffer.mesh_sides(), Color::BLACK, width.max(LINE_WIDTH + 1));
        }
        painter.out
    }
}
