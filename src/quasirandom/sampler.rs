//! Sobol sequence generation and scaling to problem bounds.

use crate::error::{ConfigurationError, Result};
use crate::problem::MinimizationProblem;
use sobol_burley::sample;

/// Dimensions covered by one scrambled Sobol table.
const BLOCK_DIMENSIONS: usize = 256;

/// Points drawn from one scrambled Sobol sequence before switching seeds.
const BLOCK_POINTS: usize = 1 << 16;

/// Deterministic Sobol sampler.
///
/// The sequence is Owen-scrambled with a fixed `seed`, so a given
/// `(seed, skip, N, count)` always produces the same points. There is no
/// hidden randomness.
///
/// The underlying tables cover 256 dimensions and 2^16 points. Beyond
/// that, further blocks of dimensions and of points are drawn from the
/// same construction under derived seeds (padding), so any dimension and
/// any point count are accepted. Points inside the first block are the
/// plain scrambled Sobol sequence.
///
/// # Examples
///
/// ```
/// use u_multistart::quasirandom::SobolSampler;
///
/// let sampler = SobolSampler::default();
/// let a = sampler.unit_points(3, 16).unwrap();
/// let b = sampler.unit_points(3, 16).unwrap();
/// assert_eq!(a, b);
/// assert!(a.iter().flatten().all(|&u| (0.0..1.0).contains(&u)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SobolSampler {
    /// Scrambling seed. Different seeds give independent sequences.
    pub seed: u32,

    /// Number of leading sequence points to discard.
    pub skip: usize,
}

impl SobolSampler {
    pub fn new(seed: u32) -> Self {
        Self { seed, skip: 0 }
    }

    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Checks that points of dimension `dimension` can be produced.
    pub fn validate(&self, dimension: usize) -> Result<()> {
        if dimension == 0 {
            return Err(ConfigurationError::EmptyBounds);
        }
        Ok(())
    }

    /// Generates `count` points in `[0, 1)^dimension`.
    ///
    /// `count == 0` yields an empty sequence.
    pub fn unit_points(&self, dimension: usize, count: usize) -> Result<Vec<Vec<f64>>> {
        self.validate(dimension)?;
        let points = (0..count)
            .map(|k| self.unit_point(self.skip.saturating_add(k), dimension))
            .collect();
        Ok(points)
    }

    /// Generates `count` points scaled to the bounds of `problem`.
    pub fn scaled_points(
        &self,
        problem: &MinimizationProblem,
        count: usize,
    ) -> Result<Vec<Vec<f64>>> {
        let unit = self.unit_points(problem.dimension(), count)?;
        Ok(unit.iter().map(|u| problem.scale_unit(u)).collect())
    }

    fn unit_point(&self, index: usize, dimension: usize) -> Vec<f64> {
        let point_block = index / BLOCK_POINTS;
        let local_index = (index % BLOCK_POINTS) as u32;
        (0..dimension)
            .map(|dim| {
                let seed = block_seed(self.seed, point_block, dim / BLOCK_DIMENSIONS);
                let local_dim = (dim % BLOCK_DIMENSIONS) as u32;
                f64::from(sample(local_index, local_dim, seed))
            })
            .collect()
    }
}

/// Seed of a (point block, dimension block) pair; the first block keeps
/// the configured seed.
fn block_seed(seed: u32, point_block: usize, dim_block: usize) -> u32 {
    if point_block == 0 && dim_block == 0 {
        return seed;
    }
    // splitmix64 finalizer over the block coordinates.
    let mut h = u64::from(seed)
        ^ (point_block as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (dim_block as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    h ^= h >> 30;
    h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h ^= h >> 27;
    h = h.wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^= h >> 31;
    h as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_count_zero_is_empty() {
        let points = SobolSampler::default().unit_points(4, 0).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_dimension_zero_rejected() {
        let err = SobolSampler::default().unit_points(0, 10).unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyBounds);
    }

    #[test]
    fn test_dimension_beyond_one_table() {
        let points = SobolSampler::default().unit_points(300, 32).unwrap();
        assert_eq!(points.len(), 32);
        for p in &points {
            assert_eq!(p.len(), 300);
            assert!(p.iter().all(|&u| (0.0..1.0).contains(&u)));
        }
        // Padded dimensions are not copies of the first table.
        let first: Vec<f64> = points.iter().map(|p| p[0]).collect();
        let padded: Vec<f64> = points.iter().map(|p| p[256]).collect();
        assert_ne!(first, padded);

        // Padded dimensions are themselves stratified: one point per cell.
        let mut cells = [0usize; 32];
        for u in &padded {
            cells[(u * 32.0) as usize] += 1;
        }
        assert!(cells.iter().all(|&c| c == 1), "cells: {cells:?}");
    }

    #[test]
    fn test_points_beyond_one_block() {
        let sampler = SobolSampler::default();
        let points = sampler.unit_points(2, 70_000).unwrap();
        assert_eq!(points.len(), 70_000);
        assert!(points
            .iter()
            .flatten()
            .all(|&u| (0.0..1.0).contains(&u)));
        // The second block starts a fresh sequence rather than repeating
        // the first one.
        assert_ne!(points[0], points[BLOCK_POINTS]);
        assert_eq!(
            &points[BLOCK_POINTS..BLOCK_POINTS + 4],
            &sampler.with_skip(BLOCK_POINTS).unit_points(2, 4).unwrap()[..]
        );
    }

    #[test]
    fn test_block_seed() {
        assert_eq!(block_seed(7, 0, 0), 7);
        assert_ne!(block_seed(7, 1, 0), block_seed(7, 0, 1));
        assert_ne!(block_seed(7, 1, 0), block_seed(8, 1, 0));
        assert_eq!(block_seed(7, 2, 3), block_seed(7, 2, 3));
    }

    #[test]
    fn test_shape_and_range() {
        let points = SobolSampler::default().unit_points(5, 64).unwrap();
        assert_eq!(points.len(), 64);
        for p in &points {
            assert_eq!(p.len(), 5);
            assert!(p.iter().all(|&u| (0.0..1.0).contains(&u)));
        }
    }

    #[test]
    fn test_deterministic() {
        let sampler = SobolSampler::new(7).with_skip(3);
        assert_eq!(
            sampler.unit_points(3, 32).unwrap(),
            sampler.unit_points(3, 32).unwrap()
        );
    }

    #[test]
    fn test_skip_shifts_sequence() {
        let full = SobolSampler::default().unit_points(2, 10).unwrap();
        let skipped = SobolSampler::default().with_skip(4).unit_points(2, 6).unwrap();
        assert_eq!(&full[4..], &skipped[..]);
    }

    #[test]
    fn test_seed_changes_sequence() {
        let a = SobolSampler::new(1).unit_points(2, 8).unwrap();
        let b = SobolSampler::new(2).unit_points(2, 8).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_scaled_points_within_bounds() {
        let problem = MinimizationProblem::new(
            |_: &[f64]| 0.0,
            vec![-12.0, 0.1, 10.0],
            vec![12.0, 5.0, 10.5],
        )
        .unwrap();
        let points = SobolSampler::default().scaled_points(&problem, 100).unwrap();
        assert_eq!(points.len(), 100);
        assert!(points.iter().all(|p| problem.contains(p)));
    }

    /// Each of the 16 cells of a 1-D grid receives exactly one of the
    /// first 16 Sobol points (a (0,m,1)-net property that Owen scrambling
    /// preserves).
    #[test]
    fn test_one_point_per_cell() {
        let points = SobolSampler::new(3).unit_points(1, 16).unwrap();
        let mut cells = [0usize; 16];
        for p in &points {
            cells[(p[0] * 16.0) as usize] += 1;
        }
        assert!(cells.iter().all(|&c| c == 1), "cells: {cells:?}");
    }

    /// Largest empty cell count on a 2-D grid: Sobol leaves fewer gaps
    /// than pseudorandom sampling with the same budget.
    #[test]
    fn test_fewer_gaps_than_pseudorandom() {
        const GRID: usize = 8;
        const COUNT: usize = 64;

        let empty_cells = |points: &[Vec<f64>]| {
            let mut hit = [[false; GRID]; GRID];
            for p in points {
                let i = ((p[0] * GRID as f64) as usize).min(GRID - 1);
                let j = ((p[1] * GRID as f64) as usize).min(GRID - 1);
                hit[i][j] = true;
            }
            hit.iter().flatten().filter(|h| !**h).count()
        };

        let sobol = SobolSampler::default().unit_points(2, COUNT).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let random: Vec<Vec<f64>> = (0..COUNT)
            .map(|_| vec![rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)])
            .collect();

        let sobol_empty = empty_cells(&sobol);
        let random_empty = empty_cells(&random);
        assert!(
            sobol_empty < random_empty,
            "sobol left {sobol_empty} empty cells, random left {random_empty}"
        );
    }
}
