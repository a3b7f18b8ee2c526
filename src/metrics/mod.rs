//! Binary classification metrics

pub mod binary;
pub mod confusion;
pub mod probability;

pub use binary::{
    accuracy, classification_metrics_binary, f1_score, precision, recall, BinaryMetricsReport,
};
pub use confusion::{normalize_rows, ConfusionMatrix};
pub use probability::{
    classification_metrics_binary_prob, log_loss, roc_auc, ProbabilityMetricsReport, LOG_LOSS_EPS,
};

use serde::Serialize;

/// A single entry of a metrics report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Scalar(f64),
    Matrix(ConfusionMatrix),
}

impl MetricValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            MetricValue::Scalar(v) => Some(*v),
            MetricValue::Matrix(_) => None,
        }
    }
}
