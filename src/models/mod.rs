//! Model registry and artifact invocation
//!
//! Models are exported from training as JSON artifacts and loaded once at
//! startup into an immutable [`ModelRegistry`] owned by the application
//! state. A missing or unreadable artifact leaves its slot empty: the
//! feature degrades, the process does not crash, and dependent endpoints
//! answer with a "model not available" error.
//!
//! All model values are plain parameter data plus pure math, `Send + Sync`
//! by construction, so concurrent invocation from request tasks needs no
//! locking.

pub mod encoding;
pub mod forest;
pub mod image;
pub mod network;
pub mod scaling;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use self::encoding::OneHotEncoder;
use self::forest::{ForestClassifier, TreeRegressor};
use self::network::MlpClassifier;
use self::scaling::{MinMaxScaler, StandardScaler};

/// Errors produced while evaluating a model artifact.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("feature dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("malformed model artifact: {0}")]
    Malformed(String),

    #[error("image error: {0}")]
    Image(String),
}

/// Argmax over a probability vector: `(index, max probability)`.
pub fn argmax(probs: &[f64]) -> Option<(usize, f64)> {
    probs
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, &p)| (i, p))
}

/// Crop recommendation: min-max scale, then standard scale, then a forest
/// classifier over the seven soil/climate features. The scaling order is
/// fixed at training time and not commutative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropModel {
    pub minmax: MinMaxScaler,
    pub scaler: StandardScaler,
    pub forest: ForestClassifier,
    /// Training labels parallel to the probability columns.
    pub classes: Vec<u32>,
}

impl CropModel {
    /// Predict `(training label, confidence)` for a feature vector in the
    /// order `[N, P, K, temperature, humidity, ph, rainfall]`.
    pub fn predict(&self, features: &[f64; 7]) -> Result<(u32, f64), ModelError> {
        let scaled = self.minmax.transform(features)?;
        let scaled = self.scaler.transform(&scaled)?;
        let probs = self.forest.predict_proba(&scaled)?;

        let (idx, confidence) =
            argmax(&probs).ok_or_else(|| ModelError::Malformed("empty probabilities".to_string()))?;
        let label = *self
            .classes
            .get(idx)
            .ok_or_else(|| ModelError::Malformed(format!("no class label for column {idx}")))?;
        Ok((label, confidence))
    }
}

/// Disease detection: dense network over the flattened 225x225x3 pixel
/// tensor, three output classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseModel {
    pub network: MlpClassifier,
}

impl DiseaseModel {
    /// Predict `(class index, confidence)` for a preprocessed pixel tensor.
    pub fn predict(&self, pixels: &[f64]) -> Result<(usize, f64), ModelError> {
        let probs = self.network.predict_proba(pixels)?;
        argmax(&probs).ok_or_else(|| ModelError::Malformed("empty probabilities".to_string()))
    }
}

/// Crop yield regression: standard-scaled numerics plus one-hot encoded
/// Area and Item, fed to a regression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldModel {
    /// Scaler over `[Year, average_rain_fall_mm_per_year, pesticides_tonnes, avg_temp]`.
    pub scaler: StandardScaler,
    pub area_encoder: OneHotEncoder,
    pub item_encoder: OneHotEncoder,
    pub tree: TreeRegressor,
}

impl YieldModel {
    /// Assemble the transformed feature row: scaled numerics first, then
    /// the Area and Item encodings, matching the training-time column
    /// transformer.
    pub fn transform(
        &self,
        year: i64,
        rainfall: f64,
        pesticides: f64,
        avg_temp: f64,
        area: &str,
        item: &str,
    ) -> Result<Vec<f64>, ModelError> {
        let mut row = self
            .scaler
            .transform(&[year as f64, rainfall, pesticides, avg_temp])?;
        self.area_encoder.encode_into(area, &mut row);
        self.item_encoder.encode_into(item, &mut row);
        Ok(row)
    }

    pub fn predict(
        &self,
        year: i64,
        rainfall: f64,
        pesticides: f64,
        avg_temp: f64,
        area: &str,
        item: &str,
    ) -> Result<f64, ModelError> {
        let row = self.transform(year, rainfall, pesticides, avg_temp, area, item)?;
        self.tree.predict(&row)
    }
}

/// Input row for the fertilizer pipeline, using the exact training-time
/// field semantics (including the misspelled temperature column and the
/// humidity column whose name carries a trailing space on the wire).
#[derive(Debug, Clone)]
pub struct FertilizerInput {
    pub temperature: f64,
    pub humidity: f64,
    pub moisture: f64,
    pub soil_type: String,
    pub crop_type: String,
    pub nitrogen: f64,
    pub potassium: f64,
    pub phosphorous: f64,
}

/// Fertilizer classification pipeline: one-hot Soil Type and Crop Type,
/// passthrough numerics, standard scale over the whole row, forest
/// classifier with string class labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FertilizerModel {
    pub soil_encoder: OneHotEncoder,
    pub crop_encoder: OneHotEncoder,
    /// Scaler over the full encoded row.
    pub scaler: StandardScaler,
    pub forest: ForestClassifier,
    /// Fertilizer names parallel to the probability columns.
    pub classes: Vec<String>,
}

impl FertilizerModel {
    /// Encoded row: one-hot(Soil Type), one-hot(Crop Type), then the
    /// passthrough numerics in training column order.
    pub fn transform(&self, input: &FertilizerInput) -> Result<Vec<f64>, ModelError> {
        let mut row = Vec::with_capacity(self.soil_encoder.width() + self.crop_encoder.width() + 6);
        self.soil_encoder.encode_into(&input.soil_type, &mut row);
        self.crop_encoder.encode_into(&input.crop_type, &mut row);
        row.extend([
            input.temperature,
            input.humidity,
            input.moisture,
            input.nitrogen,
            input.potassium,
            input.phosphorous,
        ]);
        self.scaler.transform(&row)
    }

    /// Predict `(fertilizer name, confidence)`.
    pub fn predict(&self, input: &FertilizerInput) -> Result<(String, f64), ModelError> {
        let row = self.transform(input)?;
        let probs = self.forest.predict_proba(&row)?;
        let (idx, confidence) =
            argmax(&probs).ok_or_else(|| ModelError::Malformed("empty probabilities".to_string()))?;
        let name = self
            .classes
            .get(idx)
            .ok_or_else(|| ModelError::Malformed(format!("no class label for column {idx}")))?
            .clone();
        Ok((name, confidence))
    }
}

/// Immutable set of model capabilities loaded at startup.
///
/// Four typed slots instead of a string-keyed map: a misspelled model name
/// is a compile error here, not a runtime lookup miss.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    pub crop: Option<CropModel>,
    pub disease: Option<DiseaseModel>,
    pub crop_yield: Option<YieldModel>,
    pub fertilizer: Option<FertilizerModel>,
}

impl ModelRegistry {
    /// Registry with no capabilities, for tests and degraded startup.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every artifact found under `dir`. Best-effort: each failure is
    /// logged and skipped, never fatal.
    pub fn load(dir: &Path) -> Self {
        let registry = Self {
            crop: load_artifact(&dir.join("crop_model.json")),
            disease: load_artifact(&dir.join("disease_model.json")),
            crop_yield: load_artifact(&dir.join("yield_model.json")),
            fertilizer: load_artifact(&dir.join("fertilizer_model.json")),
        };

        let names = registry.loaded_names();
        info!("Loaded {} models: {:?}", names.len(), names);
        registry
    }

    /// Names of the available capabilities, for the banner endpoint.
    pub fn loaded_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.crop.is_some() {
            names.push("crop_recommendation");
        }
        if self.disease.is_some() {
            names.push("disease_detection");
        }
        if self.crop_yield.is_some() {
            names.push("crop_yield");
        }
        if self.fertilizer.is_some() {
            names.push("fertilizer");
        }
        names
    }
}

/// Read and parse one artifact; `None` (with a log line) on any failure.
fn load_artifact<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        warn!("Model artifact not found, skipping: {}", path.display());
        return None;
    }

    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(err) => {
            warn!("Failed to read {}: {}", path.display(), err);
            return None;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(model) => {
            info!("Loaded model artifact {}", path.display());
            Some(model)
        }
        Err(err) => {
            warn!("Failed to parse {}: {}", path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::forest::TreeNodes;
    use super::*;
    use std::io::Write;

    fn crop_model() -> CropModel {
        CropModel {
            minmax: MinMaxScaler {
                data_min: vec![0.0; 7],
                data_max: vec![1.0; 7],
            },
            scaler: StandardScaler::identity(7),
            forest: ForestClassifier {
                n_classes: 2,
                trees: vec![TreeNodes::leaf(vec![1.0, 3.0])],
            },
            classes: vec![1, 22],
        }
    }

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some((1, 0.7)));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_crop_model_predict() {
        let model = crop_model();
        let (label, confidence) = model.predict(&[0.0; 7]).unwrap();
        assert_eq!(label, 22);
        assert!((confidence - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_yield_model_row_layout() {
        let model = YieldModel {
            scaler: StandardScaler::identity(4),
            area_encoder: OneHotEncoder {
                categories: vec!["Albania".to_string(), "India".to_string()],
                drop_first: true,
            },
            item_encoder: OneHotEncoder {
                categories: vec!["Maize".to_string(), "Wheat".to_string()],
                drop_first: true,
            },
            tree: TreeRegressor {
                tree: TreeNodes::leaf(vec![42.5]),
            },
        };

        let row = model
            .transform(2020, 1200.0, 120.0, 25.0, "India", "Wheat")
            .unwrap();
        assert_eq!(row, vec![2020.0, 1200.0, 120.0, 25.0, 1.0, 1.0]);
        assert_eq!(
            model
                .predict(2020, 1200.0, 120.0, 25.0, "India", "Wheat")
                .unwrap(),
            42.5
        );
    }

    #[test]
    fn test_fertilizer_row_layout() {
        let model = FertilizerModel {
            soil_encoder: OneHotEncoder {
                categories: vec!["Loamy".to_string(), "Sandy".to_string()],
                drop_first: false,
            },
            crop_encoder: OneHotEncoder {
                categories: vec!["Paddy".to_string()],
                drop_first: false,
            },
            scaler: StandardScaler::identity(9),
            forest: ForestClassifier {
                n_classes: 2,
                trees: vec![TreeNodes::leaf(vec![9.0, 1.0])],
            },
            classes: vec!["Urea".to_string(), "DAP".to_string()],
        };

        let input = FertilizerInput {
            temperature: 26.0,
            humidity: 52.0,
            moisture: 38.0,
            soil_type: "Sandy".to_string(),
            crop_type: "Paddy".to_string(),
            nitrogen: 37.0,
            potassium: 0.0,
            phosphorous: 0.0,
        };

        let row = model.transform(&input).unwrap();
        assert_eq!(
            row,
            vec![0.0, 1.0, 1.0, 26.0, 52.0, 38.0, 37.0, 0.0, 0.0]
        );

        let (name, confidence) = model.predict(&input).unwrap();
        assert_eq!(name, "Urea");
        assert!((confidence - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_registry_load_missing_dir() {
        let registry = ModelRegistry::load(Path::new("/nonexistent/models"));
        assert!(registry.crop.is_none());
        assert!(registry.disease.is_none());
        assert!(registry.crop_yield.is_none());
        assert!(registry.fertilizer.is_none());
        assert!(registry.loaded_names().is_empty());
    }

    #[test]
    fn test_registry_load_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = serde_json::to_string(&crop_model()).unwrap();
        let mut file = std::fs::File::create(dir.path().join("crop_model.json")).unwrap();
        file.write_all(artifact.as_bytes()).unwrap();

        // A corrupt artifact must be skipped, not fatal.
        std::fs::write(dir.path().join("yield_model.json"), b"not json").unwrap();

        let registry = ModelRegistry::load(dir.path());
        assert!(registry.crop.is_some());
        assert!(registry.crop_yield.is_none());
        assert_eq!(registry.loaded_names(), vec!["crop_recommendation"]);
    }
}
