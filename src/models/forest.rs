//! Decision trees and random forests
//!
//! Tree ensembles exported from training in struct-of-arrays form: one entry
//! per node, negative feature index marks a leaf. Classification leaves hold
//! per-class sample counts; regression leaves hold a single value.

use serde::{Deserialize, Serialize};

use super::ModelError;

/// A single decision tree in exported node-array form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNodes {
    /// Split feature per node; negative for leaves.
    pub feature: Vec<i32>,
    /// Split threshold per node (ignored at leaves).
    pub threshold: Vec<f64>,
    /// Left child index per node.
    pub left: Vec<i32>,
    /// Right child index per node.
    pub right: Vec<i32>,
    /// Leaf payload per node: class counts, or a single regression value.
    pub value: Vec<Vec<f64>>,
}

impl TreeNodes {
    /// Walk the tree for a feature vector and return the leaf payload.
    ///
    /// Split rule is `x[feature] <= threshold` goes left, matching the
    /// training-time library. Traversal is bounded by the node count so a
    /// malformed artifact cannot loop forever.
    pub fn leaf_for(&self, features: &[f64]) -> Result<&[f64], ModelError> {
        let mut node = 0usize;

        for _ in 0..=self.feature.len() {
            let feature = *self
                .feature
                .get(node)
                .ok_or_else(|| ModelError::Malformed(format!("node {node} out of bounds")))?;

            if feature < 0 {
                return self
                    .value
                    .get(node)
                    .map(Vec::as_slice)
                    .ok_or_else(|| ModelError::Malformed(format!("leaf {node} has no value")));
            }

            let idx = feature as usize;
            let x = *features.get(idx).ok_or(ModelError::DimensionMismatch {
                expected: idx + 1,
                got: features.len(),
            })?;

            let threshold = *self
                .threshold
                .get(node)
                .ok_or_else(|| ModelError::Malformed(format!("node {node} has no threshold")))?;
            let next = if x <= threshold {
                self.left.get(node)
            } else {
                self.right.get(node)
            };
            let next = *next
                .ok_or_else(|| ModelError::Malformed(format!("node {node} has no children")))?;
            if next < 0 {
                return Err(ModelError::Malformed(format!(
                    "node {node} points to invalid child"
                )));
            }
            node = next as usize;
        }

        Err(ModelError::Malformed("tree traversal did not terminate".to_string()))
    }

    /// Single-leaf tree, useful for tests.
    pub fn leaf(value: Vec<f64>) -> Self {
        Self {
            feature: vec![-2],
            threshold: vec![0.0],
            left: vec![-1],
            right: vec![-1],
            value: vec![value],
        }
    }
}

/// Random-forest classifier: averaged per-tree class distributions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestClassifier {
    pub n_classes: usize,
    pub trees: Vec<TreeNodes>,
}

impl ForestClassifier {
    /// Class probability distribution for a feature vector.
    ///
    /// Each tree votes with its leaf's normalized class counts; the forest
    /// probability is the mean over trees, matching `predict_proba` of the
    /// training-time library.
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::Malformed("forest has no trees".to_string()));
        }

        let mut probs = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let counts = tree.leaf_for(features)?;
            if counts.len() != self.n_classes {
                return Err(ModelError::Malformed(format!(
                    "leaf width {} does not match {} classes",
                    counts.len(),
                    self.n_classes
                )));
            }
            let total: f64 = counts.iter().sum();
            if total > 0.0 {
                for (p, &c) in probs.iter_mut().zip(counts) {
                    *p += c / total;
                }
            }
        }

        let n = self.trees.len() as f64;
        for p in &mut probs {
            *p /= n;
        }
        Ok(probs)
    }
}

/// Decision-tree regressor: scalar leaf values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeRegressor {
    pub tree: TreeNodes,
}

impl TreeRegressor {
    pub fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        let value = self.tree.leaf_for(features)?;
        value
            .first()
            .copied()
            .ok_or_else(|| ModelError::Malformed("regression leaf is empty".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A stump splitting on feature 0 at 5.0:
    /// left leaf favors class 0, right leaf favors class 1.
    fn stump() -> TreeNodes {
        TreeNodes {
            feature: vec![0, -2, -2],
            threshold: vec![5.0, 0.0, 0.0],
            left: vec![1, -1, -1],
            right: vec![2, -1, -1],
            value: vec![vec![0.0, 0.0], vec![8.0, 2.0], vec![1.0, 3.0]],
        }
    }

    #[test]
    fn test_leaf_traversal() {
        let tree = stump();
        assert_eq!(tree.leaf_for(&[3.0]).unwrap(), &[8.0, 2.0]);
        assert_eq!(tree.leaf_for(&[7.0]).unwrap(), &[1.0, 3.0]);
        // Boundary goes left.
        assert_eq!(tree.leaf_for(&[5.0]).unwrap(), &[8.0, 2.0]);
    }

    #[test]
    fn test_missing_feature_is_dimension_error() {
        let tree = stump();
        assert!(matches!(
            tree.leaf_for(&[]).unwrap_err(),
            ModelError::DimensionMismatch { .. }
        ));
    }

    #[test]
    fn test_forest_predict_proba() {
        let forest = ForestClassifier {
            n_classes: 2,
            trees: vec![stump(), TreeNodes::leaf(vec![1.0, 1.0])],
        };
        let probs = forest.predict_proba(&[3.0]).unwrap();
        // Tree 1: [0.8, 0.2]; tree 2: [0.5, 0.5]; mean: [0.65, 0.35].
        assert!((probs[0] - 0.65).abs() < 1e-12);
        assert!((probs[1] - 0.35).abs() < 1e-12);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_forest_is_error() {
        let forest = ForestClassifier {
            n_classes: 2,
            trees: Vec::new(),
        };
        assert!(forest.predict_proba(&[0.0]).is_err());
    }

    #[test]
    fn test_regressor() {
        let regressor = TreeRegressor {
            tree: TreeNodes {
                feature: vec![1, -2, -2],
                threshold: vec![100.0, 0.0, 0.0],
                left: vec![1, -1, -1],
                right: vec![2, -1, -1],
                value: vec![vec![0.0], vec![12.5], vec![80.0]],
            },
        };
        assert_eq!(regressor.predict(&[0.0, 50.0]).unwrap(), 12.5);
        assert_eq!(regressor.predict(&[0.0, 150.0]).unwrap(), 80.0);
    }

    #[test]
    fn test_cyclic_tree_terminates() {
        // Node 0 points back at itself; traversal must error, not hang.
        let tree = TreeNodes {
            feature: vec![0],
            threshold: vec![0.5],
            left: vec![0],
            right: vec![0],
            value: vec![vec![1.0]],
        };
        assert!(tree.leaf_for(&[0.0]).is_err());
    }
}
