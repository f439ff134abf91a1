/// A sparse feature vector: `(feature_index, weight)` pairs sorted by index,
/// with no explicit zeros.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Builds a vector from unsorted pairs. Zero weights are dropped and
    /// duplicate indices are summed.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_by_key(|(idx, _)| *idx);
        let mut entries: Vec<(usize, f64)> = Vec::with_capacity(pairs.len());
        for (idx, value) in pairs {
            if let Some((last, acc)) = entries.last_mut() {
                if *last == idx {
                    *acc += value;
                    continue;
                }
            }
            entries.push((idx, value));
        }
        entries.retain(|(_, v)| *v != 0.0);
        Self { entries }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    #[cfg(test)]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest feature index present, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.entries.last().map(|(idx, _)| *idx)
    }

    pub fn squared_norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum()
    }

    pub fn norm(&self) -> f64 {
        self.squared_norm().sqrt()
    }

    /// Scales the vector to unit L2 norm. The zero vector is left untouched.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, v) in &mut self.entries {
                *v /= norm;
            }
        }
    }

    /// Sparse-sparse dot product (merge join on sorted indices).
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_val) = self.entries[i];
            let (b_idx, b_val) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_val * b_val;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Dot product against a dense vector. Indices past its end count as zero.
    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(idx, v)| dense.get(*idx).map(|d| d * v))
            .sum()
    }

    /// Adds this vector into a dense accumulator.
    pub fn add_to_dense(&self, dense: &mut [f64]) {
        for (idx, v) in &self.entries {
            if let Some(slot) = dense.get_mut(*idx) {
                *slot += v;
            }
        }
    }

    pub fn to_dense(&self, dim: usize) -> Vec<f64> {
        let mut dense = vec![0.0; dim];
        self.add_to_dense(&mut dense);
        dense
    }
}

/// Cosine similarity. Returns 0.0 when either side is the zero vector.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    a.dot(b) / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_sorts_merges_and_drops_zeros() {
        let v = SparseVector::from_pairs(vec![(3, 1.0), (1, 2.0), (3, 0.5), (2, 0.0)]);
        assert_eq!(v.entries(), &[(1, 2.0), (3, 1.5)]);
    }

    #[test]
    fn test_dot_only_counts_shared_indices() {
        let a = SparseVector::from_pairs(vec![(0, 1.0), (2, 2.0)]);
        let b = SparseVector::from_pairs(vec![(2, 3.0), (5, 4.0)]);
        assert_eq!(a.dot(&b), 6.0);
    }

    #[test]
    fn test_l2_normalize_unit_norm() {
        let mut v = SparseVector::from_pairs(vec![(0, 3.0), (1, 4.0)]);
        v.l2_normalize();
        assert!((v.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_with_zero_vector_is_zero() {
        let a = SparseVector::from_pairs(vec![(0, 1.0)]);
        let zero = SparseVector::default();
        assert_eq!(cosine_similarity(&a, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_dot_dense_ignores_out_of_range() {
        let v = SparseVector::from_pairs(vec![(0, 2.0), (9, 5.0)]);
        assert_eq!(v.dot_dense(&[1.5, 0.0]), 3.0);
    }
}
