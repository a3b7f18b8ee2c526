//! Probability-based metrics for binary classification

use crate::error::{ensure_binary, ensure_paired, FraudUtilsError, Result};
use crate::metrics::MetricValue;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Probabilities are clamped to `[LOG_LOSS_EPS, 1 - LOG_LOSS_EPS]` before
/// taking logarithms.
pub const LOG_LOSS_EPS: f64 = f64::EPSILON;

/// Report of probability-based metrics.
///
/// - AUC: probability that a random fraud scores above a random legitimate
///   row. 1.0 is a perfect ranking, 0.5 is random guessing.
/// - Log loss: cross-entropy of the labels under the predicted
///   probabilities; confident mistakes are penalized heavily.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbabilityMetricsReport {
    #[serde(rename = "AUC")]
    pub auc: f64,
    #[serde(rename = "Log loss")]
    pub log_loss: f64,
}

impl ProbabilityMetricsReport {
    /// Metric name to value mapping
    pub fn to_map(&self) -> BTreeMap<&'static str, MetricValue> {
        BTreeMap::from([
            ("AUC", MetricValue::Scalar(self.auc)),
            ("Log loss", MetricValue::Scalar(self.log_loss)),
        ])
    }
}

/// Compute AUC and log loss from labels and predicted fraud probabilities.
///
/// # Errors
///
/// Fails on mismatched or empty input, non-binary labels, probabilities
/// outside `[0, 1]`, and with `UndefinedAuc` when only one class is present.
pub fn classification_metrics_binary_prob(
    y_true: &[u8],
    y_prob: &[f64],
) -> Result<ProbabilityMetricsReport> {
    validate_probabilities(y_true, y_prob)?;

    let report = ProbabilityMetricsReport {
        auc: auc_unchecked(y_true, y_prob)?,
        log_loss: log_loss_unchecked(y_true, y_prob),
    };

    debug!(
        n = y_true.len(),
        auc = report.auc,
        log_loss = report.log_loss,
        "Probability metrics computed"
    );
    Ok(report)
}

/// Area under the ROC curve via the Mann-Whitney rank statistic.
///
/// Tied scores get their mean rank, so a tied positive/negative pair counts
/// as half a win. Scores may be any finite values; only their order matters.
pub fn roc_auc(y_true: &[u8], scores: &[f64]) -> Result<f64> {
    ensure_paired(y_true.len(), scores.len())?;
    ensure_binary(y_true)?;
    if let Some((index, &value)) = scores.iter().enumerate().find(|(_, s)| !s.is_finite()) {
        return Err(FraudUtilsError::NonFiniteScore { index, value });
    }
    auc_unchecked(y_true, scores)
}

/// Rank-based AUC over labels and scores already checked for pairing,
/// binary labels and finiteness.
fn auc_unchecked(y_true: &[u8], scores: &[f64]) -> Result<f64> {
    let n_pos = y_true.iter().filter(|&&y| y == 1).count();
    let n_neg = y_true.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return Err(FraudUtilsError::UndefinedAuc);
    }

    let ranks = mid_ranks(scores);
    let pos_rank_sum: f64 = ranks
        .iter()
        .zip(y_true)
        .filter(|(_, &y)| y == 1)
        .map(|(r, _)| r)
        .sum();

    let n_pos = n_pos as f64;
    let n_neg = n_neg as f64;
    Ok((pos_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg))
}

/// Mean negative log-likelihood of the labels.
///
/// Probabilities are clamped away from exactly 0 and 1, so the result is
/// always finite.
pub fn log_loss(y_true: &[u8], y_prob: &[f64]) -> Result<f64> {
    validate_probabilities(y_true, y_prob)?;
    Ok(log_loss_unchecked(y_true, y_prob))
}

fn log_loss_unchecked(y_true: &[u8], y_prob: &[f64]) -> f64 {
    let total: f64 = y_true
        .iter()
        .zip(y_prob)
        .map(|(&y, &p)| {
            let p = p.clamp(LOG_LOSS_EPS, 1.0 - LOG_LOSS_EPS);
            if y == 1 {
                -p.ln()
            } else {
                -(1.0 - p).ln()
            }
        })
        .sum();

    total / y_true.len() as f64
}

fn validate_probabilities(y_true: &[u8], y_prob: &[f64]) -> Result<()> {
    ensure_paired(y_true.len(), y_prob.len())?;
    ensure_binary(y_true)?;
    match y_prob
        .iter()
        .enumerate()
        .find(|(_, p)| !(0.0..=1.0).contains(*p))
    {
        Some((index, &value)) => Err(FraudUtilsError::ProbabilityOutOfRange { index, value }),
        None => Ok(()),
    }
}

/// 1-based ranks with ties sharing their average rank
fn mid_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end hold ranks start+1..=end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}
