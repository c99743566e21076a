use ferrosim_common::lerp;
use rand::prelude::*;
use rand::seq::SliceRandom;

/// Deterministic smooth 2-D field sampled while generating initial conditions.
///
/// Implementations must be pure: the same coordinates always yield the same
/// value, nominally in `[-1, 1]`. Tests inject analytic fields through this
/// trait to pin down exact initial values.
pub trait NoiseField {
    fn sample(&self, x: f32, y: f32) -> f32;
}

/// Classic 2-D gradient noise over a seeded permutation table.
///
/// The table is shuffled once from an explicit seed, so two instances built
/// with the same seed are bit-identical samplers. No ambient RNG state.
pub struct GradientNoise {
    perm: [u8; 256],
}

impl GradientNoise {
    pub fn seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut perm = [0u8; 256];
        for (i, entry) in perm.iter_mut().enumerate() {
            *entry = i as u8;
        }
        perm.shuffle(&mut rng);
        Self { perm }
    }

    fn corner_hash(&self, x: i32, y: i32) -> u8 {
        let xi = (x & 255) as usize;
        let yi = (y & 255) as usize;
        self.perm[(self.perm[xi] as usize + yi) & 255]
    }

    /// Dot product of the offset with one of eight lattice gradients.
    fn grad(hash: u8, dx: f32, dy: f32) -> f32 {
        match hash & 7 {
            0 => dx + dy,
            1 => dx - dy,
            2 => -dx + dy,
            3 => -dx - dy,
            4 => dx,
            5 => -dx,
            6 => dy,
            _ => -dy,
        }
    }

    /// Quintic smoothstep, zero first and second derivatives at the lattice.
    fn fade(t: f32) -> f32 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }
}

impl NoiseField for GradientNoise {
    fn sample(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor();
        let y0 = y.floor();
        let xi = x0 as i32;
        let yi = y0 as i32;
        let dx = x - x0;
        let dy = y - y0;

        let u = Self::fade(dx);
        let v = Self::fade(dy);

        let n00 = Self::grad(self.corner_hash(xi, yi), dx, dy);
        let n10 = Self::grad(self.corner_hash(xi + 1, yi), dx - 1.0, dy);
        let n01 = Self::grad(self.corner_hash(xi, yi + 1), dx, dy - 1.0);
        let n11 = Self::grad(self.corner_hash(xi + 1, yi + 1), dx - 1.0, dy - 1.0);

        let nx0 = lerp(n00, n10, u);
        let nx1 = lerp(n01, n11, u);
        // Diagonal gradients reach magnitude sqrt(2); rescale into [-1, 1].
        lerp(nx0, nx1, v) * std::f32::consts::FRAC_1_SQRT_2
    }
}
