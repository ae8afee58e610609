//! Dense feed-forward classifier
//!
//! The disease model ships as a stack of dense layers exported from
//! training: ReLU between hidden layers, softmax over the final logits.
//! Inference is plain matrix math over shared, read-only weights, so the
//! model is safe to invoke from any number of concurrent requests.

use serde::{Deserialize, Serialize};

use super::ModelError;

/// A fully-connected layer. Weights are row-major: `weights[out][in]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
}

impl DenseLayer {
    fn forward(&self, input: &[f64]) -> Result<Vec<f64>, ModelError> {
        if self.weights.len() != self.bias.len() {
            return Err(ModelError::Malformed(
                "layer weight rows do not match bias length".to_string(),
            ));
        }

        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(row, &b)| {
                if row.len() != input.len() {
                    return Err(ModelError::DimensionMismatch {
                        expected: row.len(),
                        got: input.len(),
                    });
                }
                Ok(row.iter().zip(input).map(|(&w, &x)| w * x).sum::<f64>() + b)
            })
            .collect()
    }
}

/// Multi-layer perceptron classifier with a softmax head.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MlpClassifier {
    pub layers: Vec<DenseLayer>,
}

impl MlpClassifier {
    /// Class probabilities for an input vector.
    pub fn predict_proba(&self, input: &[f64]) -> Result<Vec<f64>, ModelError> {
        if self.layers.is_empty() {
            return Err(ModelError::Malformed("network has no layers".to_string()));
        }

        let last = self.layers.len() - 1;
        let mut activations = self.layers[0].forward(input)?;
        if last > 0 {
            relu(&mut activations);
            for (i, layer) in self.layers.iter().enumerate().skip(1) {
                activations = layer.forward(&activations)?;
                if i < last {
                    relu(&mut activations);
                }
            }
        }

        Ok(softmax(&activations))
    }
}

fn relu(values: &mut [f64]) {
    for v in values {
        if *v < 0.0 {
            *v = 0.0;
        }
    }
}

/// Numerically stable softmax.
fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|&e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0]);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
    }

    #[test]
    fn test_single_layer_network() {
        // Identity weights on two inputs; logits equal the input.
        let net = MlpClassifier {
            layers: vec![DenseLayer {
                weights: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
                bias: vec![0.0, 0.0],
            }],
        };
        let probs = net.predict_proba(&[0.0, 10.0]).unwrap();
        assert!(probs[1] > 0.99);
    }

    #[test]
    fn test_hidden_relu_clamps() {
        // Hidden layer produces a negative activation which ReLU removes,
        // so both output logits end up equal.
        let net = MlpClassifier {
            layers: vec![
                DenseLayer {
                    weights: vec![vec![-1.0]],
                    bias: vec![0.0],
                },
                DenseLayer {
                    weights: vec![vec![1.0], vec![-1.0]],
                    bias: vec![0.0, 0.0],
                },
            ],
        };
        let probs = net.predict_proba(&[5.0]).unwrap();
        assert!((probs[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_input_width_mismatch() {
        let net = MlpClassifier {
            layers: vec![DenseLayer {
                weights: vec![vec![1.0, 1.0]],
                bias: vec![0.0],
            }],
        };
        assert!(matches!(
            net.predict_proba(&[1.0]).unwrap_err(),
            ModelError::DimensionMismatch { .. }
        ));
    }
}
