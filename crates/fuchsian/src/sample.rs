//! Reproducible random points and isometries (replay tokens).
//!
//! Purpose
//! - Deterministic inputs for property tests and benches: a draw is fully
//!   identified by `(seed, index)`, so a failing case can be replayed alone.
//!
//! Model
//! - Points are uniform in a Euclidean disk of radius `max_radius < 1`.
//! - Isometries take `u` uniform on the unit circle and `a` as a point above.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::h2::{H2Isometry, H2Point};
use crate::Complex;

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

fn disk_sample<R: Rng>(rng: &mut R, max_radius: f64) -> Complex {
    let r = max_radius.clamp(0.0, 1.0 - 1e-12) * rng.gen::<f64>().sqrt();
    let theta = rng.gen::<f64>() * std::f64::consts::TAU;
    Complex::from_polar(r, theta)
}

/// Point with disk coordinate uniform in `|z| ≤ max_radius`.
pub fn random_point(tok: ReplayToken, max_radius: f64) -> H2Point {
    let mut rng = tok.to_std_rng();
    H2Point::from_disk(disk_sample(&mut rng, max_radius))
}

/// `n` points from one stream seeded by `tok`.
pub fn random_points(tok: ReplayToken, n: usize, max_radius: f64) -> Vec<H2Point> {
    let mut rng = tok.to_std_rng();
    (0..n)
        .map(|_| H2Point::from_disk(disk_sample(&mut rng, max_radius)))
        .collect()
}

/// Isometry `(u, a)` with `|a| ≤ max_radius`.
pub fn random_isometry(tok: ReplayToken, max_radius: f64) -> H2Isometry {
    let mut rng = tok.to_std_rng();
    let u = Complex::from_polar(1.0, rng.gen::<f64>() * std::f64::consts::TAU);
    let a = disk_sample(&mut rng, max_radius);
    H2Isometry::from_disk_coordinates(u, a)
}
