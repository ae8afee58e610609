//! Categorical encoding
//!
//! One-hot encoding with the category vocabularies fixed at training time.
//! Unknown categories encode to all zeros (the training pipeline was fit
//! with unknown handling set to ignore), so a novel soil type or crop name
//! degrades the feature vector instead of failing the request.

use serde::{Deserialize, Serialize};

/// One-hot encoder for a single categorical column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    /// Category vocabulary in training order.
    pub categories: Vec<String>,
    /// Drop the first category (it encodes as all zeros).
    #[serde(default)]
    pub drop_first: bool,
}

impl OneHotEncoder {
    /// Number of columns this encoder contributes to the feature vector.
    pub fn width(&self) -> usize {
        if self.drop_first {
            self.categories.len().saturating_sub(1)
        } else {
            self.categories.len()
        }
    }

    /// Append the encoding of `value` to `out`.
    pub fn encode_into(&self, value: &str, out: &mut Vec<f64>) {
        let start = out.len();
        out.resize(start + self.width(), 0.0);

        if let Some(pos) = self.categories.iter().position(|c| c == value) {
            if self.drop_first {
                if pos > 0 {
                    out[start + pos - 1] = 1.0;
                }
            } else {
                out[start + pos] = 1.0;
            }
        }
    }
}
