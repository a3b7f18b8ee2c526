//! Fraud Detection Demo Utilities
//!
//! Helpers around a fraud-detection demo: sampling rows from the transaction
//! and city datasets, stratified train/test splitting, binary classification
//! metrics, confusion matrix heatmaps, and pacing/liveness helpers for the
//! scoring service.

pub mod config;
pub mod data;
pub mod error;
pub mod liveness;
pub mod metrics;
pub mod pacing;
pub mod plot;
pub mod split;
pub mod threshold;
pub mod types;

pub use config::AppConfig;
pub use data::{select_random_row_cities, select_random_row_creditcard, Datasets};
pub use error::{FraudUtilsError, Result};
pub use liveness::{test_server_online, LivenessProbe};
pub use metrics::{
    classification_metrics_binary, classification_metrics_binary_prob, BinaryMetricsReport,
    ConfusionMatrix, ProbabilityMetricsReport,
};
pub use pacing::wait_random_time;
pub use plot::{plot_confusion_matrix, Colormap, ConfusionMatrixPlot};
pub use split::{split_train_test, TrainTestSplit};
pub use threshold::binarize_prediction;
pub use types::{City, DemoEvent, TransactionRecord};
