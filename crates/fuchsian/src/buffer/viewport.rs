use crate::cfg::{ALMOST_INFINITE_RADIUS_PIXELS, ALMOST_STRAIGHT_PIXELS};
use crate::Complex;

/// Half-width of the default view, slightly larger than the unit disk.
const DEFAULT_HALF_EXTENT: f64 = 1.1;

/// Pixel window onto the complex plane.
///
/// Pixel `(0, 0)` is the top-left corner, at `(x_min, y_max)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    size_x: u32,
    size_y: u32,
    scale_x: f64,
    scale_y: f64,
    x_min: f64,
    y_max: f64,
}

impl Viewport {
    /// Viewport showing the closed unit disk with a small margin.
    pub fn new(size_x: u32, size_y: u32) -> Self {
        let mut v = Self {
            size_x: size_x.max(1),
            size_y: size_y.max(1),
            scale_x: 1.0,
            scale_y: 1.0,
            x_min: -DEFAULT_HALF_EXTENT,
            y_max: DEFAULT_HALF_EXTENT,
        };
        v.reset();
        v
    }

    pub fn reset(&mut self) {
        self.x_min = -DEFAULT_HALF_EXTENT;
        self.y_max = DEFAULT_HALF_EXTENT;
        self.scale_x = self.size_x as f64 / (2.0 * DEFAULT_HALF_EXTENT);
        self.scale_y = self.size_y as f64 / (2.0 * DEFAULT_HALF_EXTENT);
    }

    /// Changes the pixel size, keeping the top-left corner and the scale.
    pub fn resize(&mut self, size_x: u32, size_y: u32) {
        self.size_x = size_x.max(1);
        self.size_y = size_y.max(1);
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.size_x, self.size_y)
    }

    /// Pixels per unit length, horizontally and vertically.
    #[inline]
    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    #[inline]
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    #[inline]
    pub fn x_max(&self) -> f64 {
        self.x_min + self.size_x as f64 / self.scale_x
    }

    #[inline]
    pub fn y_min(&self) -> f64 {
        self.y_max - self.size_y as f64 / self.scale_y
    }

    #[inline]
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Zoom by `coeff` (> 1 magnifies) about the center of the window.
    pub fn zoom(&mut self, coeff: f64) {
        self.zoom_at(coeff, self.size_x as i32 / 2, self.size_y as i32 / 2);
    }

    /// Zoom by `coeff` keeping the point under pixel `(x, y)` fixed.
    pub fn zoom_at(&mut self, coeff: f64, x: i32, y: i32) {
        if !(coeff.is_finite() && coeff > 0.0) {
            return;
        }
        let z = self.pixel_to_complex(x, y);
        self.scale_x *= coeff;
        self.scale_y *= coeff;
        self.x_min = z.re - x as f64 / self.scale_x;
        self.y_max = z.im + y as f64 / self.scale_y;
    }

    /// Moves the picture by `(dx, dy)` pixels.
    pub fn shift(&mut self, dx: i32, dy: i32) {
        self.x_min -= dx as f64 / self.scale_x;
        self.y_max += dy as f64 / self.scale_y;
    }

    pub fn complex_to_pixel(&self, z: Complex) -> (i32, i32) {
        (
            ((z.re - self.x_min) * self.scale_x).round() as i32,
            ((self.y_max - z.im) * self.scale_y).round() as i32,
        )
    }

    pub fn pixel_to_complex(&self, x: i32, y: i32) -> Complex {
        Complex::new(
            self.x_min + x as f64 / self.scale_x,
            self.y_max - y as f64 / self.scale_y,
        )
    }

    /// Inside the visible rectangle.
    pub fn contains(&self, z: Complex) -> bool {
        z.re >= self.x_min && z.re <= self.x_max() && z.im >= self.y_min() && z.im <= self.y_max
    }

    pub fn is_almost_infinite_radius(&self, radius: f64) -> bool {
        !radius.is_finite() || radius * self.scale_x.max(self.scale_y) > ALMOST_INFINITE_RADIUS_PIXELS
    }

    /// Arc of the given circle between the endpoints deviates from the chord
    /// by less than half a pixel.
    pub fn is_almost_straight_arc(&self, radius: f64, endpoint1: Complex, endpoint2: Complex) -> bool {
        let half_chord = 0.5 * (endpoint1 - endpoint2).norm();
        if half_chord >= radius {
            return false;
        }
        let sagitta = radius - (radius * radius - half_chord * half_chord).sqrt();
        sagitta * self.scale_x.max(self.scale_y) < ALMOST_STRAIGHT_PIXELS
    }
}
