//! Similarity Kernels for the Note Graph
//!
//! This module implements the vector math underneath the note graph: cosine
//! similarity between two embeddings and the mapping of cosine scores onto the
//! unit interval used by MMR edge selection.
//!
//! ## Mathematical Foundation
//!
//! ### Cosine Similarity
//!
//! **Formula:**
//! ```text
//! cosine_similarity(A, B) = (A · B) / (||A|| * ||B||)
//! ```
//!
//! **Properties:**
//! - Range: [-1, 1] where 1 = identical direction, 0 = orthogonal, -1 = opposite direction
//! - Symmetric: cosine_similarity(A, B) = cosine_similarity(B, A)
//! - Scale invariant: cosine_similarity(kA, B) = cosine_similarity(A, B) for k > 0
//!
//! ### Relevance Normalization
//!
//! MMR subtracts a redundancy term from a relevance term. Both are mapped from
//! the cosine range onto [0, 1] first so the trade-off does not flip sign for
//! negatively correlated notes:
//! ```text
//! normalize_cosine(s) = (s + 1) / 2
//! ```
//!
//! ## Undefined Similarities
//!
//! A pair has no similarity when either embedding is missing, empty, of a
//! different length, of zero magnitude, or contains NaN/infinity. The kernel
//! reports which of these happened; graph construction treats all of them as
//! "no candidate".

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a cosine similarity cannot be computed
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimilarityError {
    #[error("Vector dimension mismatch: left has {left_dim} dimensions, right has {right_dim} dimensions")]
    DimensionMismatch { left_dim: usize, right_dim: usize },

    #[error("Empty vector provided: {vector_type}")]
    EmptyVector { vector_type: String },

    #[error("Missing vector: {vector_type}")]
    MissingVector { vector_type: String },

    #[error("Invalid vector: contains non-finite values")]
    InvalidVector,

    #[error("Zero vector magnitude detected")]
    ZeroMagnitude,
}

pub type SimilarityResult<T> = Result<T, SimilarityError>;

/// Core similarity algorithms used by the graph builder
pub struct SimilaritySearch;

impl SimilaritySearch {
    /// Calculate cosine similarity between two vectors
    ///
    /// Dot product and both squared magnitudes are accumulated in a single
    /// pass. The result is clamped into [-1, 1] since rounding can push it
    /// slightly outside.
    ///
    /// # Errors
    ///
    /// * `EmptyVector` - If either vector is empty
    /// * `DimensionMismatch` - If vectors have different dimensions
    /// * `InvalidVector` - If vectors contain NaN or infinite values
    /// * `ZeroMagnitude` - If either vector has zero magnitude
    ///
    /// # Example
    ///
    /// ```rust
    /// use notegraph::similarity_search::SimilaritySearch;
    ///
    /// let similarity = SimilaritySearch::cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
    /// assert!((similarity - 1.0).abs() < f32::EPSILON);
    /// ```
    pub fn cosine_similarity(vector_a: &[f32], vector_b: &[f32]) -> SimilarityResult<f32> {
        if vector_a.is_empty() {
            return Err(SimilarityError::EmptyVector {
                vector_type: "vector_a".to_string(),
            });
        }

        if vector_b.is_empty() {
            return Err(SimilarityError::EmptyVector {
                vector_type: "vector_b".to_string(),
            });
        }

        if vector_a.len() != vector_b.len() {
            return Err(SimilarityError::DimensionMismatch {
                left_dim: vector_a.len(),
                right_dim: vector_b.len(),
            });
        }

        let mut dot_product = 0.0f32;
        let mut sum_sq_a = 0.0f32;
        let mut sum_sq_b = 0.0f32;

        for (&a_val, &b_val) in vector_a.iter().zip(vector_b) {
            if !a_val.is_finite() || !b_val.is_finite() {
                return Err(SimilarityError::InvalidVector);
            }

            dot_product += a_val * b_val;
            sum_sq_a += a_val * a_val;
            sum_sq_b += b_val * b_val;
        }

        let magnitude_a = sum_sq_a.sqrt();
        let magnitude_b = sum_sq_b.sqrt();

        if magnitude_a == 0.0 || magnitude_b == 0.0 {
            return Err(SimilarityError::ZeroMagnitude);
        }

        let cosine_similarity = dot_product / (magnitude_a * magnitude_b);

        // Overflowing squares (very large components) surface here as NaN
        if !cosine_similarity.is_finite() {
            return Err(SimilarityError::InvalidVector);
        }

        Ok(cosine_similarity.clamp(-1.0, 1.0))
    }

    /// Cosine similarity between two optional embeddings
    ///
    /// A missing embedding on either side is reported as `MissingVector`.
    pub fn embedding_similarity(
        embedding_a: Option<&[f32]>,
        embedding_b: Option<&[f32]>,
    ) -> SimilarityResult<f32> {
        let vector_a = embedding_a.ok_or_else(|| SimilarityError::MissingVector {
            vector_type: "embedding_a".to_string(),
        })?;
        let vector_b = embedding_b.ok_or_else(|| SimilarityError::MissingVector {
            vector_type: "embedding_b".to_string(),
        })?;

        Self::cosine_similarity(vector_a, vector_b)
    }
}

/// Map a cosine similarity from [-1, 1] onto [0, 1]
#[inline]
pub fn normalize_cosine(similarity: f32) -> f32 {
    (similarity + 1.0) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical_vectors() {
        let vec_a = vec![1.0, 2.0, 3.0];
        let vec_b = vec![1.0, 2.0, 3.0];

        let result = SimilaritySearch::cosine_similarity(&vec_a, &vec_b).unwrap();

        // Identical vectors should have similarity of 1.0
        assert!((result - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal_vectors() {
        let result = SimilaritySearch::cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();

        assert!(result.abs() < f32::EPSILON);
    }

    #[test]
    fn test_cosine_similarity_opposite_vectors() {
        let result = SimilaritySearch::cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap();

        assert!((result + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_dimension_mismatch() {
        let result = SimilaritySearch::cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0]);

        assert!(matches!(result, Err(SimilarityError::DimensionMismatch { left_dim: 3, right_dim: 2 })));
    }

    #[test]
    fn test_cosine_similarity_empty_vector() {
        let result = SimilaritySearch::cosine_similarity(&[], &[1.0, 2.0]);

        assert!(matches!(result, Err(SimilarityError::EmptyVector { .. })));
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let result = SimilaritySearch::cosine_similarity(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]);

        assert!(matches!(result, Err(SimilarityError::ZeroMagnitude)));
    }

    #[test]
    fn test_cosine_similarity_invalid_values() {
        let result = SimilaritySearch::cosine_similarity(&[1.0, f32::NAN, 3.0], &[1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(SimilarityError::InvalidVector)));

        let result = SimilaritySearch::cosine_similarity(&[f32::INFINITY, 1.0], &[1.0, 2.0]);
        assert!(matches!(result, Err(SimilarityError::InvalidVector)));
    }

    #[test]
    fn test_embedding_similarity_missing() {
        let present = [1.0, 0.0];

        let result = SimilaritySearch::embedding_similarity(None, Some(&present));
        assert!(matches!(result, Err(SimilarityError::MissingVector { .. })));

        let result = SimilaritySearch::embedding_similarity(Some(&present), Some(&present)).unwrap();
        assert!((result - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_mathematical_properties() {
        let vec_a = vec![1.0, 2.0, 3.0];
        let vec_b = vec![4.0, 5.0, 6.0];

        // Test symmetry: sim(A, B) = sim(B, A)
        let sim_ab = SimilaritySearch::cosine_similarity(&vec_a, &vec_b).unwrap();
        let sim_ba = SimilaritySearch::cosine_similarity(&vec_b, &vec_a).unwrap();
        assert!((sim_ab - sim_ba).abs() < f32::EPSILON);

        // Test range: -1.0 <= similarity <= 1.0
        assert!((-1.0..=1.0).contains(&sim_ab));
    }

    #[test]
    fn test_normalize_cosine_range() {
        assert_eq!(normalize_cosine(-1.0), 0.0);
        assert_eq!(normalize_cosine(0.0), 0.5);
        assert_eq!(normalize_cosine(1.0), 1.0);

        for step in 0..=200 {
            let similarity = -1.0 + step as f32 * 0.01;
            let normalized = normalize_cosine(similarity.clamp(-1.0, 1.0));
            assert!((0.0..=1.0).contains(&normalized));
        }
    }
}
