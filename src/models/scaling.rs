//! Feature scalers
//!
//! Pre-fit scaler parameters exported from training. Both transforms mirror
//! the training-time library exactly, including the zero-range rule: a
//! feature with no spread passes through unscaled rather than dividing by
//! zero.

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Min-max scaler: `(x - data_min) / (data_max - data_min)` per feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub data_min: Vec<f64>,
    pub data_max: Vec<f64>,
}

impl MinMaxScaler {
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        if features.len() != self.data_min.len() || self.data_min.len() != self.data_max.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.data_min.len(),
                got: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.data_min.iter().zip(&self.data_max))
            .map(|(&x, (&lo, &hi))| {
                let range = hi - lo;
                if range == 0.0 {
                    x - lo
                } else {
                    (x - lo) / range
                }
            })
            .collect())
    }
}

/// Standard scaler: `(x - mean) / scale` per feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        if features.len() != self.mean.len() || self.mean.len() != self.scale.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.mean.len(),
                got: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&x, (&mean, &scale))| {
                if scale == 0.0 {
                    x - mean
                } else {
                    (x - mean) / scale
                }
            })
            .collect())
    }

    /// Identity scaler of the given width, useful for tests and passthrough
    /// pipelines.
    pub fn identity(width: usize) -> Self {
        Self {
            mean: vec![0.0; width],
            scale: vec![1.0; width],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minmax_transform() {
        let scaler = MinMaxScaler {
            data_min: vec![0.0, 10.0],
            data_max: vec![100.0, 20.0],
        };
        let out = scaler.transform(&[50.0, 15.0]).unwrap();
        assert_eq!(out, vec![0.5, 0.5]);
    }

    #[test]
    fn test_minmax_zero_range() {
        let scaler = MinMaxScaler {
            data_min: vec![5.0],
            data_max: vec![5.0],
        };
        let out = scaler.transform(&[7.0]).unwrap();
        assert_eq!(out, vec![2.0]);
    }

    #[test]
    fn test_standard_transform() {
        let scaler = StandardScaler {
            mean: vec![10.0],
            scale: vec![2.0],
        };
        let out = scaler.transform(&[14.0]).unwrap();
        assert_eq!(out, vec![2.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let scaler = StandardScaler::identity(3);
        let err = scaler.transform(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::DimensionMismatch { expected: 3, got: 1 }
        ));
    }

    #[test]
    fn test_identity_scaler() {
        let scaler = StandardScaler::identity(2);
        assert_eq!(scaler.transform(&[3.5, -1.0]).unwrap(), vec![3.5, -1.0]);
    }
}
