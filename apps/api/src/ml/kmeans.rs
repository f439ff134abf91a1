//! K-means over sparse TF-IDF vectors.
//!
//! Lloyd iterations with squared Euclidean distance, k-means++ seeding and
//! several independent initializations; the run with the lowest inertia is
//! kept. A single seeded PRNG drives every run, so fitting the same input
//! twice yields the same assignments.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::ml::sparse::SparseVector;
use crate::ml::FitError;

#[derive(Debug, Clone)]
pub struct KMeansConfig {
    pub k: usize,
    pub n_init: usize,
    pub max_iter: usize,
    /// Relative to the mean per-feature variance of the data.
    pub tol: f64,
    pub seed: u64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 5,
            n_init: 10,
            max_iter: 300,
            tol: 1e-4,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
struct Centroid {
    coords: Vec<f64>,
    sq_norm: f64,
}

impl Centroid {
    fn new(coords: Vec<f64>) -> Self {
        let sq_norm = coords.iter().map(|c| c * c).sum();
        Self { coords, sq_norm }
    }

    fn sq_distance(&self, point: &SparseVector, point_sq_norm: f64) -> f64 {
        (point_sq_norm - 2.0 * point.dot_dense(&self.coords) + self.sq_norm).max(0.0)
    }
}

/// A fitted k-means model: centroids plus the training assignments.
#[derive(Debug, Clone)]
pub struct KMeans {
    centroids: Vec<Centroid>,
    labels: Vec<usize>,
    inertia: f64,
}

struct Run {
    centroids: Vec<Centroid>,
    labels: Vec<usize>,
    inertia: f64,
}

impl KMeans {
    /// Partitions `points` (all of dimensionality `dim`) into `config.k` clusters.
    pub fn fit(points: &[SparseVector], dim: usize, config: &KMeansConfig) -> Result<Self, FitError> {
        if points.is_empty() {
            return Err(FitError::EmptyCorpus);
        }
        if config.k == 0 {
            return Err(FitError::InvalidClusterCount);
        }
        if config.k > points.len() {
            return Err(FitError::TooFewSamples {
                k: config.k,
                samples: points.len(),
            });
        }
        if let Some(index) = points.iter().filter_map(SparseVector::max_index).max() {
            if index >= dim {
                return Err(FitError::DimensionMismatch { index, dim });
            }
        }

        let sq_norms: Vec<f64> = points.iter().map(SparseVector::squared_norm).collect();
        let tol = config.tol * mean_variance(points, &sq_norms, dim);
        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut best: Option<Run> = None;
        for init in 0..config.n_init.max(1) {
            let run = run_lloyd(points, &sq_norms, dim, config.k, config.max_iter, tol, &mut rng);
            debug!("k-means init {init}: inertia {:.6}", run.inertia);
            if best.as_ref().map_or(true, |b| run.inertia < b.inertia) {
                best = Some(run);
            }
        }

        let best = best.ok_or(FitError::EmptyCorpus)?;
        Ok(Self {
            centroids: best.centroids,
            labels: best.labels,
            inertia: best.inertia,
        })
    }

    /// Index of the nearest centroid. Ties go to the lowest cluster id.
    pub fn predict(&self, point: &SparseVector) -> usize {
        nearest(&self.centroids, point, point.squared_norm()).0
    }

    /// Training assignments, index-aligned with the fitted points.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

fn nearest(centroids: &[Centroid], point: &SparseVector, sq_norm: f64) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (id, centroid) in centroids.iter().enumerate() {
        let dist = centroid.sq_distance(point, sq_norm);
        if dist < best.1 {
            best = (id, dist);
        }
    }
    best
}

fn assign(points: &[SparseVector], sq_norms: &[f64], centroids: &[Centroid]) -> (Vec<usize>, Vec<f64>) {
    points
        .iter()
        .zip(sq_norms)
        .map(|(p, &n)| nearest(centroids, p, n))
        .unzip()
}

fn run_lloyd(
    points: &[SparseVector],
    sq_norms: &[f64],
    dim: usize,
    k: usize,
    max_iter: usize,
    tol: f64,
    rng: &mut StdRng,
) -> Run {
    let mut centroids = seed_plus_plus(points, sq_norms, dim, k, rng);
    let mut labels: Vec<usize> = Vec::new();

    for _ in 0..max_iter {
        let (new_labels, distances) = assign(points, sq_norms, &centroids);
        if new_labels == labels {
            break;
        }
        labels = new_labels;

        let updated = recompute_centroids(points, &labels, &distances, dim, k);
        let shift: f64 = centroids
            .iter()
            .zip(&updated)
            .map(|(old, new)| {
                old.coords
                    .iter()
                    .zip(&new.coords)
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>()
            })
            .sum();
        centroids = updated;
        if shift <= tol {
            break;
        }
    }

    // Final labels always reflect the final centroids.
    let (labels, distances) = assign(points, sq_norms, &centroids);
    Run {
        centroids,
        labels,
        inertia: distances.iter().sum(),
    }
}

/// k-means++ seeding: first centre uniform, then proportional to squared
/// distance from the nearest chosen centre.
fn seed_plus_plus(
    points: &[SparseVector],
    sq_norms: &[f64],
    dim: usize,
    k: usize,
    rng: &mut StdRng,
) -> Vec<Centroid> {
    let n = points.len();
    let first = rng.gen_range(0..n);
    let mut centroids = vec![Centroid::new(points[first].to_dense(dim))];
    let mut closest: Vec<f64> = points
        .iter()
        .zip(sq_norms)
        .map(|(p, &norm)| centroids[0].sq_distance(p, norm))
        .collect();

    while centroids.len() < k {
        let next = match WeightedIndex::new(&closest) {
            Ok(dist) => dist.sample(rng),
            // Every point coincides with a chosen centre.
            Err(_) => rng.gen_range(0..n),
        };
        let centroid = Centroid::new(points[next].to_dense(dim));
        for ((d, p), &norm) in closest.iter_mut().zip(points).zip(sq_norms) {
            *d = d.min(centroid.sq_distance(p, norm));
        }
        centroids.push(centroid);
    }
    centroids
}

fn recompute_centroids(
    points: &[SparseVector],
    labels: &[usize],
    distances: &[f64],
    dim: usize,
    k: usize,
) -> Vec<Centroid> {
    let mut sums = vec![vec![0.0; dim]; k];
    let mut counts = vec![0usize; k];
    for (point, &label) in points.iter().zip(labels) {
        point.add_to_dense(&mut sums[label]);
        counts[label] += 1;
    }

    // Empty clusters take the points farthest from their current centre.
    let mut farthest: Vec<usize> = (0..points.len()).collect();
    farthest.sort_by(|&a, &b| distances[b].total_cmp(&distances[a]).then(a.cmp(&b)));
    let mut donors = farthest.into_iter();

    sums.into_iter()
        .zip(counts)
        .map(|(mut sum, count)| {
            if count == 0 {
                match donors.next() {
                    Some(idx) => return Centroid::new(points[idx].to_dense(dim)),
                    None => return Centroid::new(sum),
                }
            }
            for value in &mut sum {
                *value /= count as f64;
            }
            Centroid::new(sum)
        })
        .collect()
}

fn mean_variance(points: &[SparseVector], sq_norms: &[f64], dim: usize) -> f64 {
    if dim == 0 {
        return 0.0;
    }
    let n = points.len() as f64;
    let mut mean = vec![0.0; dim];
    for point in points {
        point.add_to_dense(&mut mean);
    }
    let mean_sq: f64 = mean.iter().map(|m| (m / n) * (m / n)).sum();
    let total_sq: f64 = sq_norms.iter().sum::<f64>() / n;
    ((total_sq - mean_sq) / dim as f64).max(0.0)
}
