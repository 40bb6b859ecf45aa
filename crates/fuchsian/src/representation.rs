//! Representations of surface groups by disk isometries.
//!
//! Purpose
//! - `IsomH2Representation` assigns one `H2Isometry` to each generator of a
//!   `DiscreteGroup` and evaluates words on those images.
//! - For closed surface groups it builds the fundamental polygon seen from a
//!   base point (vertices `ρ(w)·p` over the partial products of the relator)
//!   and the isometries carrying that polygon around one or all of its
//!   vertices, which the mesh uses to stitch boundary neighbors.
//!
//! Model
//! - `regular(g)`: the regular `4g`-gon with all angles `2π/4g`, centered at
//!   the origin. The generator images are solved from the geometric side
//!   pairings of that polygon, block by block, so that the standard relator
//!   evaluates to the identity and the orbit of the first vertex under the
//!   partial products reproduces the polygon.
//! - `generate_polygon(precision)`: pattern search on the base point,
//!   minimizing `Σ (angle − 2π/n)²` over convex candidate polygons.
//!
//! Code cross-refs: `group::DiscreteGroup::{pairings_from_vertex, pairings_around_vertices}`,
//! `mesh::H2Mesh::new`.

use std::f64::consts::{PI, TAU};

use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::group::{DiscreteGroup, Word};
use crate::h2::{H2Isometry, H2Point, H2Polygon};
use crate::Complex;

/// Initial hyperbolic step of the base-point search.
const SEARCH_INITIAL_STEP: f64 = 0.1;

#[derive(Clone, Debug, PartialEq)]
pub struct IsomH2Representation {
    group: DiscreteGroup,
    generator_images: Vec<H2Isometry>,
    base_point: H2Point,
}

impl IsomH2Representation {
    /// Fails unless there is exactly one image per generator.
    pub fn new(group: DiscreteGroup, generator_images: Vec<H2Isometry>) -> Result<Self> {
        if group.nb_generators() != generator_images.len() {
            return Err(GeometryError::InvalidPresentation(format!(
                "{} generators but {} images",
                group.nb_generators(),
                generator_images.len()
            )));
        }
        Ok(Self {
            group,
            generator_images,
            base_point: H2Point::origin(),
        })
    }

    /// Regular representation of the closed surface of genus `genus ≥ 2`.
    pub fn regular(genus: usize) -> Result<Self> {
        if genus < 2 {
            return Err(GeometryError::InvalidGeometry(format!(
                "no hyperbolic structure on the closed surface of genus {}",
                genus
            )));
        }
        let n = 4 * genus;
        let nf = n as f64;
        let alpha = TAU / nf;
        let cosh_r = 1.0 / ((PI / nf).tan() * (0.5 * alpha).tan());
        let r = (0.5 * cosh_r.acosh()).tanh();
        let q: Vec<H2Point> = (0..n)
            .map(|k| H2Point::from_disk(Complex::from_polar(r, TAU * k as f64 / nf)))
            .collect();

        // pairs side k with side k + 2 of the same block
        let rot = H2Isometry::rotation(-2.0 * TAU / nf);
        let mut images = Vec::with_capacity(2 * genus);
        let mut prefix = H2Isometry::identity();
        for k in 0..genus {
            let side_a = H2Isometry::half_turn(&q[4 * k].midpoint(&q[4 * k + 1])) * rot;
            let side_b = H2Isometry::half_turn(&q[4 * k + 1].midpoint(&q[4 * k + 2])) * rot;
            let pa = prefix.inverse() * side_a * prefix;
            let pb = prefix.inverse() * side_b * prefix;
            let a = pa * pb * pa.inverse();
            let b = pa * pb.inverse() * pa.inverse() * pb * pa.inverse();
            prefix = prefix * a * b * a.inverse() * b.inverse();
            images.push(a);
            images.push(b);
        }

        let mut rho = Self::new(DiscreteGroup::from_surface_data(genus, 0), images)?;
        rho.base_point = q[0];
        debug!(genus, relator_error = rho.relator_error()?, "regular representation");
        Ok(rho)
    }

    #[inline]
    pub fn group(&self) -> &DiscreteGroup {
        &self.group
    }

    #[inline]
    pub fn generator_images(&self) -> &[H2Isometry] {
        &self.generator_images
    }

    #[inline]
    pub fn base_point(&self) -> H2Point {
        self.base_point
    }

    pub fn with_base_point(mut self, p: H2Point) -> Self {
        self.base_point = p;
        self
    }

    /// `f ρ f⁻¹`, with the base point moved by `f`.
    pub fn conjugate(&self, f: &H2Isometry) -> Self {
        let finv = f.inverse();
        Self {
            group: self.group.clone(),
            generator_images: self
                .generator_images
                .iter()
                .map(|g| *f * *g * finv)
                .collect(),
            base_point: *f * self.base_point,
        }
    }

    /// Image of a word; a letter naming no generator is an error.
    pub fn evaluate(&self, w: &Word) -> Result<H2Isometry> {
        w.letters().iter().try_fold(H2Isometry::identity(), |acc, l| {
            let g = self.generator_images.get(l.generator).ok_or_else(|| {
                GeometryError::InvalidPresentation(format!(
                    "letter uses generator {} of {}",
                    l.generator,
                    self.generator_images.len()
                ))
            })?;
            Ok(if l.exponent >= 0 { acc * *g } else { acc * g.inverse() })
        })
    }

    pub fn evaluate_all(&self, words: &[Word]) -> Result<Vec<H2Isometry>> {
        words.iter().map(|w| self.evaluate(w)).collect()
    }

    /// Largest `error()` over the relator images; 0 for an exact representation.
    pub fn relator_error(&self) -> Result<f64> {
        self.group
            .relations()
            .iter()
            .try_fold(0.0, |worst: f64, w| Ok(worst.max(self.evaluate(w)?.error())))
    }

    /// Polygon with vertices `ρ(w)·p` for `w` in the pairings from one vertex.
    pub fn generate_polygon_from_point(&self, p: &H2Point) -> Result<H2Polygon> {
        let words = self.group.pairings_from_vertex()?;
        let vertices = words
            .iter()
            .map(|w| Ok(self.evaluate(w)? * *p))
            .collect::<Result<Vec<_>>>()?;
        Ok(H2Polygon::new(vertices))
    }

    fn polygon_irregularity(&self, p: &H2Point) -> Result<f64> {
        let poly = self.generate_polygon_from_point(p)?;
        if !poly.is_convex() {
            return Ok(f64::INFINITY);
        }
        let target = TAU / poly.nb_vertices() as f64;
        let e: f64 = poly
            .interior_angles()
            .iter()
            .map(|a| (a - target) * (a - target))
            .sum();
        Ok(if e.is_nan() { f64::INFINITY } else { e })
    }

    /// Fundamental polygon from the best base point found in `precision` search steps.
    pub fn generate_polygon(&self, precision: usize) -> Result<H2Polygon> {
        let mut best = self.base_point;
        let mut best_value = self.polygon_irregularity(&best)?;
        let mut step = SEARCH_INITIAL_STEP;
        let directions = [
            Complex::new(1.0, 0.0),
            Complex::new(0.0, 1.0),
            Complex::new(-1.0, 0.0),
            Complex::new(0.0, -1.0),
        ];
        for _ in 0..precision {
            let back = H2Isometry::mapping_point_to_origin(&best).inverse();
            let mut improved = None;
            for d in directions {
                let candidate = back * H2Point::from_disk(d * (0.5 * step).tanh());
                let value = self.polygon_irregularity(&candidate)?;
                if value < improved.map_or(best_value, |(_, v)| v) {
                    improved = Some((candidate, value));
                }
            }
            match improved {
                Some((p, v)) => {
                    best = p;
                    best_value = v;
                }
                None => step *= 0.5,
            }
        }
        debug!(irregularity = best_value, base_point = %best, "generated polygon");
        self.generate_polygon_from_point(&best)
    }

    /// Images of the side pairings of the standard polygon.
    pub fn side_pairings(&self) -> Result<Vec<H2Isometry>> {
        self.evaluate_all(&self.group.side_pairings()?)
    }

    /// Isometries carrying the polygon around its first vertex.
    pub fn side_pairings_normalized_around_vertex(&self) -> Result<Vec<H2Isometry>> {
        self.evaluate_all(&self.group.pairings_around_vertex()?)
    }

    /// Isometries carrying the polygon around all of its vertices.
    pub fn side_pairings_normalized_around_vertices(&self) -> Result<Vec<H2Isometry>> {
        self.evaluate_all(&self.group.pairings_around_vertices()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::Letter;

    #[test]
    fn regular_relator_is_identity() {
        for genus in 2..=3 {
            let rho = IsomH2Representation::regular(genus).unwrap();
            assert_eq!(rho.generator_images().len(), 2 * genus);
            assert!(rho.relator_error().unwrap() < 1e-9);
            let rel = rho.evaluate(&rho.group().relations()[0]).unwrap();
            assert!(rel.almost_equal(&H2Isometry::identity()));
            for g in rho.generator_images() {
                assert!(g.is_hyperbolic());
            }
        }
        assert!(IsomH2Representation::regular(1).is_err());
    }

    #[test]
    fn regular_polygon_is_regular() {
        let rho = IsomH2Representation::regular(2).unwrap();
        let poly = rho.generate_polygon_from_point(&rho.base_point()).unwrap();
        assert_eq!(poly.nb_vertices(), 8);
        let r = rho.base_point().disk().norm();
        for (k, v) in poly.vertices().iter().enumerate() {
            let expected = Complex::from_polar(r, TAU * k as f64 / 8.0);
            assert!((v.disk() - expected).norm() < 1e-8);
        }
        let sum: f64 = poly.interior_angles().iter().sum();
        assert!((sum - TAU).abs() < 1e-8);
        assert!((poly.area() - 4.0 * PI).abs() < 1e-7);
    }

    #[test]
    fn generated_polygon_keeps_angle_sum() {
        let rho = IsomH2Representation::regular(2).unwrap();
        let start = H2Point::from_disk(rho.base_point().disk() * 0.9);
        let moved = rho.clone().with_base_point(start);
        let before = moved.generate_polygon_from_point(&start).unwrap();
        let after = moved.generate_polygon(40).unwrap();
        assert_eq!(after.nb_vertices(), 8);
        let sum: f64 = after.interior_angles().iter().sum();
        assert!((sum - TAU).abs() < 1e-7);
        let spread = |p: &H2Polygon| {
            p.interior_angles()
                .iter()
                .map(|a| (a - TAU / 8.0).powi(2))
                .sum::<f64>()
        };
        assert!(spread(&after) <= spread(&before));
        assert!(after.is_convex());
    }

    #[test]
    fn conjugation_moves_the_polygon() {
        let rho = IsomH2Representation::regular(2).unwrap();
        let f = H2Isometry::mapping_point_in_disk_normalized(Complex::new(0.0, 0.0), Complex::new(0.2, -0.1));
        let c = rho.conjugate(&f);
        assert!(c.relator_error().unwrap() < 1e-9);
        let p0 = rho.generate_polygon_from_point(&rho.base_point()).unwrap();
        let p1 = c.generate_polygon_from_point(&c.base_point()).unwrap();
        for (a, b) in p0.vertices().iter().zip(p1.vertices()) {
            assert!(((f * *a).disk() - b.disk()).norm() < 1e-9);
        }
    }

    #[test]
    fn side_pairings_and_translates() {
        let rho = IsomH2Representation::regular(2).unwrap();
        assert_eq!(rho.side_pairings().unwrap().len(), 8);
        assert_eq!(rho.side_pairings_normalized_around_vertex().unwrap().len(), 8);
        assert_eq!(rho.side_pairings_normalized_around_vertices().unwrap().len(), 48);
        // every translate around the first vertex fixes the vertex orbit
        let q0 = rho.base_point();
        let around = rho.side_pairings_normalized_around_vertex().unwrap();
        let poly = rho.generate_polygon_from_point(&q0).unwrap();
        for (k, f) in around.iter().enumerate() {
            assert!(((*f * poly.vertices()[k]).disk() - q0.disk()).norm() < 1e-8);
        }
    }

    #[test]
    fn unknown_generator_is_an_error() {
        let g = DiscreteGroup::new(vec!["a".to_string()], Vec::new());
        let rho = IsomH2Representation::new(g, vec![H2Isometry::rotation(0.3)]).unwrap();
        let ok = Word::new(vec![Letter::new(0, 1), Letter::new(0, -1)]);
        assert!(rho.evaluate(&ok).unwrap().almost_equal(&H2Isometry::identity()));
        let bad = Word::new(vec![Letter::new(0, 1), Letter::new(3, 1)]);
        assert!(matches!(
            rho.evaluate(&bad),
            Err(GeometryError::InvalidPresentation(_))
        ));
        assert!(rho.evaluate_all(&[ok, bad]).is_err());
    }

    #[test]
    fn mismatched_images_are_rejected() {
        let g = DiscreteGroup::from_surface_data(2, 0);
        assert!(matches!(
            IsomH2Representation::new(g, vec![H2Isometry::identity(); 3]),
            Err(GeometryError::InvalidPresentation(_))
        ));
    }
}
