//! Seeded candidate generators for benchmarks and demos.
//!
//! Draws are addressed by a [`ReplayToken`], so any single output can be
//! regenerated without replaying the stream that produced it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic handle for one draw: the same token always yields the same
/// output, independent of call order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// SplitMix64 over seed and index, so neighboring indices decorrelate.
    fn stream(&self) -> u64 {
        let mut z = self.seed ^ self.index.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.stream())
    }
}

/// Shape of a sampled candidate cloud.
#[derive(Clone, Copy, Debug)]
pub struct FrontCfg {
    /// Candidates to draw.
    pub n_points: usize,
    /// Target coordinate sum of each candidate.
    pub radius: f64,
    /// Relative radial noise. Zero keeps every pair of candidates mutually
    /// non-dominated; larger values trade that for depth.
    pub jitter: f64,
}

impl Default for FrontCfg {
    fn default() -> Self {
        Self {
            n_points: 64,
            radius: 1.0,
            jitter: 0.1,
        }
    }
}

/// Draw candidates near the simplex `x_1 + .. + x_n = radius`.
pub fn draw_simplex_front(n_obj: usize, cfg: &FrontCfg, token: ReplayToken) -> Vec<Vec<f64>> {
    let mut rng = token.rng();
    (0..cfg.n_points)
        .map(|_| {
            let mut row: Vec<f64> = (0..n_obj).map(|_| rng.gen_range(1e-6..1.0)).collect();
            let sum: f64 = row.iter().sum();
            let scale = cfg.radius * (1.0 + cfg.jitter * rng.gen_range(-1.0..1.0)) / sum;
            for v in &mut row {
                *v *= scale;
            }
            row
        })
        .collect()
}

/// Uniform draws in the box `[0, scale)^n_obj`. Most of these end up
/// dominated, which is what archive stress tests want.
pub fn draw_uniform_box(
    n_obj: usize,
    n_points: usize,
    scale: f64,
    token: ReplayToken,
) -> Vec<Vec<f64>> {
    let mut rng = token.rng();
    (0..n_points)
        .map(|_| (0..n_obj).map(|_| rng.gen_range(0.0..scale)).collect())
        .collect()
}
