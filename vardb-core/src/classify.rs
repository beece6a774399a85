//! Request/response boundary around the sequence classifier.
//!
//! The classifier itself (model loading, k-mer tokenization, forward passes)
//! lives behind [SequenceClassifier]. This module validates what goes in and
//! shapes what comes out.
//!
//! This is a library-only boundary: the `vardb` binary ships no model, so no
//! subcommand calls [predict]. Embedders supply a [SequenceClassifier] and a
//! [LabelMap] and call it directly.
//!
//! ```
//! use vardb_core::classify::{
//!     ClassifyResult, LabelMap, PredictRequest, RawPrediction, SequenceClassifier, predict,
//! };
//!
//! struct Constant;
//!
//! impl SequenceClassifier for Constant {
//!     fn classify(&self, _: &PredictRequest) -> ClassifyResult<RawPrediction> {
//!         Ok(RawPrediction {
//!             class_index: 0,
//!             probabilities: vec![0.8, 0.2],
//!             attention_weights: vec![],
//!         })
//!     }
//! }
//!
//! let labels: LabelMap = vec![(0, "Cancer".to_string()), (1, "Metabolic".to_string())]
//!     .into_iter()
//!     .collect();
//! let request = PredictRequest::new("acgt", Some("17"), Some("brca1")).unwrap();
//!
//! let prediction = predict(&Constant, &labels, &request).unwrap();
//! assert_eq!(prediction.prediction_label, "Cancer");
//! assert_eq!(prediction.confidences[1].label, "Metabolic");
//! ```

use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::is_canonical_chromosome;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Invalid prediction request: {0}")]
    InvalidRequest(String),
    #[error("Class index {0} has no label")]
    UnknownClass(usize),
    #[error("Classifier failed: {0}")]
    ClassifierFailed(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type ClassifyResult<T> = std::result::Result<T, ClassifyError>;

///
/// A validated prediction request: an upper-cased nucleotide string plus
/// optional chromosome and gene covariates.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictRequest {
    pub sequence: String,
    pub chromosome: Option<String>,
    pub gene_info: Option<String>,
}

impl PredictRequest {
    pub fn new(
        sequence: &str,
        chromosome: Option<&str>,
        gene_info: Option<&str>,
    ) -> ClassifyResult<Self> {
        let sequence = sequence.trim().to_uppercase();
        if sequence.is_empty() {
            return Err(ClassifyError::InvalidRequest(
                "Sequence cannot be empty.".to_string(),
            ));
        }
        if !sequence.bytes().all(|b| matches!(b, b'A' | b'T' | b'C' | b'G')) {
            return Err(ClassifyError::InvalidRequest(
                "Sequence may only contain A, T, C, or G.".to_string(),
            ));
        }

        let chromosome = match chromosome {
            Some(chrom) => {
                let chrom = chrom.trim().to_uppercase();
                if !is_canonical_chromosome(&chrom) {
                    return Err(ClassifyError::InvalidRequest(format!(
                        "Chromosome must be one of 1-22 or X, got '{}'",
                        chrom
                    )));
                }
                Some(chrom)
            }
            None => None,
        };

        let gene_info = match gene_info {
            Some(gene) => {
                let gene = gene.trim().to_uppercase();
                if gene.is_empty() || !gene.bytes().all(|b| b.is_ascii_alphanumeric()) {
                    return Err(ClassifyError::InvalidRequest(
                        "Gene info must be alphabet or numeric.".to_string(),
                    ));
                }
                Some(gene)
            }
            None => None,
        };

        Ok(PredictRequest {
            sequence,
            chromosome,
            gene_info,
        })
    }
}

/// Untouched classifier output.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPrediction {
    pub class_index: usize,
    pub probabilities: Vec<f32>,
    pub attention_weights: Vec<f32>,
}

pub trait SequenceClassifier {
    fn classify(&self, request: &PredictRequest) -> ClassifyResult<RawPrediction>;
}

///
/// Class index to label mapping, stored as a JSON object keyed by the
/// stringified index: `{"0": "Cancer", "1": "Metabolic"}`.
///
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct LabelMap {
    labels: HashMap<String, String>,
}

impl LabelMap {
    pub fn label(&self, class_index: usize) -> Option<&str> {
        self.labels.get(&class_index.to_string()).map(String::as_str)
    }
}

impl TryFrom<&Path> for LabelMap {
    type Error = ClassifyError;

    fn try_from(path: &Path) -> ClassifyResult<Self> {
        let json = read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl FromIterator<(usize, String)> for LabelMap {
    fn from_iter<T: IntoIterator<Item = (usize, String)>>(iter: T) -> Self {
        LabelMap {
            labels: iter.into_iter().map(|(i, l)| (i.to_string(), l)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassConfidence {
    pub label: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub prediction_idx: usize,
    pub prediction_label: String,
    pub confidence: f32,
    pub confidences: Vec<ClassConfidence>,
    pub attention_weights: Vec<f32>,
}

impl Prediction {
    pub fn from_raw(raw: RawPrediction, labels: &LabelMap) -> ClassifyResult<Self> {
        let confidence = *raw
            .probabilities
            .get(raw.class_index)
            .ok_or(ClassifyError::UnknownClass(raw.class_index))?;

        let confidences = raw
            .probabilities
            .iter()
            .enumerate()
            .map(|(i, p)| {
                labels
                    .label(i)
                    .map(|label| ClassConfidence {
                        label: label.to_string(),
                        confidence: *p,
                    })
                    .ok_or(ClassifyError::UnknownClass(i))
            })
            .collect::<ClassifyResult<Vec<_>>>()?;

        let prediction_label = confidences[raw.class_index].label.clone();

        Ok(Prediction {
            prediction_idx: raw.class_index,
            prediction_label,
            confidence,
            confidences,
            attention_weights: raw.attention_weights,
        })
    }
}

///
/// Run a classifier on a validated request and label its output.
///
pub fn predict<C: SequenceClassifier + ?Sized>(
    classifier: &C,
    labels: &LabelMap,
    request: &PredictRequest,
) -> ClassifyResult<Prediction> {
    let raw = classifier.classify(request)?;
    Prediction::from_raw(raw, labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    struct FixedClassifier;

    impl SequenceClassifier for FixedClassifier {
        fn classify(&self, request: &PredictRequest) -> ClassifyResult<RawPrediction> {
            Ok(RawPrediction {
                class_index: 1,
                probabilities: vec![0.2, 0.7, 0.1],
                attention_weights: vec![1.0 / request.sequence.len() as f32; request.sequence.len()],
            })
        }
    }

    #[fixture]
    fn labels() -> LabelMap {
        vec![
            (0, "Cancer".to_string()),
            (1, "Metabolic".to_string()),
            (2, "Respiratory".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[rstest]
    fn test_request_is_normalized() {
        let request = PredictRequest::new("  acgt ", Some(" x"), Some("brca1")).unwrap();
        assert_eq!(request.sequence, "ACGT");
        assert_eq!(request.chromosome.as_deref(), Some("X"));
        assert_eq!(request.gene_info.as_deref(), Some("BRCA1"));
    }

    #[rstest]
    #[case("", None, None)]
    #[case("ACGN", None, None)]
    #[case("ACGT", Some("23"), None)]
    #[case("ACGT", Some("MT"), None)]
    #[case("ACGT", None, Some("BRCA1:672"))]
    fn test_invalid_requests(
        #[case] sequence: &str,
        #[case] chromosome: Option<&str>,
        #[case] gene: Option<&str>,
    ) {
        let result = PredictRequest::new(sequence, chromosome, gene);
        assert_eq!(matches!(result, Err(ClassifyError::InvalidRequest(_))), true);
    }

    #[rstest]
    fn test_predict_labels_output(labels: LabelMap) {
        let request = PredictRequest::new("ACGTAC", None, None).unwrap();
        let prediction = predict(&FixedClassifier, &labels, &request).unwrap();

        assert_eq!(prediction.prediction_idx, 1);
        assert_eq!(prediction.prediction_label, "Metabolic");
        assert_eq!(prediction.confidence, 0.7);
        assert_eq!(prediction.confidences.len(), 3);
        assert_eq!(prediction.confidences[2].label, "Respiratory");
        assert_eq!(prediction.attention_weights.len(), 6);
    }

    #[rstest]
    fn test_predict_through_boxed_classifier(labels: LabelMap) {
        let classifier: Box<dyn SequenceClassifier> = Box::new(FixedClassifier);
        let request = PredictRequest::new("ggcc", Some("2"), None).unwrap();

        let prediction = predict(classifier.as_ref(), &labels, &request).unwrap();
        assert_eq!(prediction.prediction_label, "Metabolic");
        assert_eq!(prediction.attention_weights, vec![0.25; 4]);
    }

    #[rstest]
    fn test_unlabeled_class_is_an_error() {
        let labels: LabelMap = vec![(0, "Cancer".to_string())].into_iter().collect();
        let raw = RawPrediction {
            class_index: 0,
            probabilities: vec![0.9, 0.1],
            attention_weights: vec![],
        };
        let result = Prediction::from_raw(raw, &labels);
        assert_eq!(matches!(result, Err(ClassifyError::UnknownClass(1))), true);
    }

    #[rstest]
    fn test_label_map_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label_map.json");
        std::fs::write(&path, r#"{"0": "Cancer", "1": "Metabolic"}"#).unwrap();

        let labels = LabelMap::try_from(path.as_path()).unwrap();
        assert_eq!(labels.label(1), Some("Metabolic"));
        assert_eq!(labels.label(2), None);
    }
}
