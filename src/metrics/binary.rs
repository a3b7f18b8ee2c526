//! Label-based metrics for binary classification

use crate::error::{ensure_binary, ensure_paired, Result};
use crate::metrics::confusion::ConfusionMatrix;
use crate::metrics::MetricValue;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Report of label-based metrics.
///
/// - Accuracy: correct predictions over all predictions.
/// - Precision: TP / (TP + FP), the ability not to flag legitimate rows.
/// - Recall: TP / (TP + FN), the ability to find every fraud.
/// - F1: harmonic mean of precision and recall.
/// - Confusion matrix: row = true class, column = predicted class, so TN is
///   `[0][0]`, FP `[0][1]`, FN `[1][0]` and TP `[1][1]`.
///
/// A ratio whose denominator is zero (e.g. precision with no predicted
/// positives) is reported as 0.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryMetricsReport {
    #[serde(rename = "Accuracy")]
    pub accuracy: f64,
    #[serde(rename = "Precision")]
    pub precision: f64,
    #[serde(rename = "Recall")]
    pub recall: f64,
    #[serde(rename = "F1")]
    pub f1: f64,
    #[serde(rename = "Confusion Matrix")]
    pub confusion_matrix: ConfusionMatrix,
}

impl BinaryMetricsReport {
    /// Metric name to value mapping
    pub fn to_map(&self) -> BTreeMap<&'static str, MetricValue> {
        BTreeMap::from([
            ("Accuracy", MetricValue::Scalar(self.accuracy)),
            ("Precision", MetricValue::Scalar(self.precision)),
            ("Recall", MetricValue::Scalar(self.recall)),
            ("F1", MetricValue::Scalar(self.f1)),
            (
                "Confusion Matrix",
                MetricValue::Matrix(self.confusion_matrix.clone()),
            ),
        ])
    }
}

/// Compute accuracy, precision, recall, F1 and the confusion matrix.
///
/// # Errors
///
/// Fails if the sequences differ in length, are empty, or contain a label
/// other than 0 or 1.
pub fn classification_metrics_binary(y_true: &[u8], y_pred: &[u8]) -> Result<BinaryMetricsReport> {
    let cm = binary_confusion(y_true, y_pred)?;

    let report = BinaryMetricsReport {
        accuracy: accuracy_of(&cm),
        precision: precision_of(&cm),
        recall: recall_of(&cm),
        f1: f1_of(&cm),
        confusion_matrix: cm,
    };

    debug!(
        n = y_true.len(),
        accuracy = report.accuracy,
        precision = report.precision,
        recall = report.recall,
        f1 = report.f1,
        "Binary metrics computed"
    );
    Ok(report)
}

pub fn accuracy(y_true: &[u8], y_pred: &[u8]) -> Result<f64> {
    binary_confusion(y_true, y_pred).map(|cm| accuracy_of(&cm))
}

pub fn precision(y_true: &[u8], y_pred: &[u8]) -> Result<f64> {
    binary_confusion(y_true, y_pred).map(|cm| precision_of(&cm))
}

pub fn recall(y_true: &[u8], y_pred: &[u8]) -> Result<f64> {
    binary_confusion(y_true, y_pred).map(|cm| recall_of(&cm))
}

pub fn f1_score(y_true: &[u8], y_pred: &[u8]) -> Result<f64> {
    binary_confusion(y_true, y_pred).map(|cm| f1_of(&cm))
}

fn binary_confusion(y_true: &[u8], y_pred: &[u8]) -> Result<ConfusionMatrix> {
    ensure_paired(y_true.len(), y_pred.len())?;
    ensure_binary(y_true)?;
    ensure_binary(y_pred)?;
    ConfusionMatrix::from_labels(y_true, y_pred)
}

fn accuracy_of(cm: &ConfusionMatrix) -> f64 {
    cm.correct() as f64 / cm.total() as f64
}

fn precision_of(cm: &ConfusionMatrix) -> f64 {
    let tp = cm.true_positives();
    ratio_or_zero(tp, tp + cm.false_positives(), "precision")
}

fn recall_of(cm: &ConfusionMatrix) -> f64 {
    let tp = cm.true_positives();
    ratio_or_zero(tp, tp + cm.false_negatives(), "recall")
}

// 2PR / (P + R) rewritten over counts so it is defined whenever any
// positive was predicted or observed.
fn f1_of(cm: &ConfusionMatrix) -> f64 {
    let tp = cm.true_positives();
    ratio_or_zero(
        2 * tp,
        2 * tp + cm.false_positives() + cm.false_negatives(),
        "f1",
    )
}

fn ratio_or_zero(numerator: u64, denominator: u64, metric: &'static str) -> f64 {
    if denominator == 0 {
        warn!(metric, "Metric is ill-defined (zero denominator), reporting 0.0");
        return 0.0;
    }
    numerator as f64 / denominator as f64
}
