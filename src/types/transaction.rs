//! Transaction records from the credit-card fraud dataset

use serde::{Deserialize, Serialize};

/// One labelled transaction row.
///
/// The credit-card dataset carries anonymised numeric columns (`Time`,
/// `V1`..`V28`, `Amount`) and a binary `Class` label, so rows are kept as a
/// plain feature vector ordered like the table's `feature_names`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Feature values in column order
    pub features: Vec<f64>,
    /// Fraud label (1 = fraud, 0 = legitimate)
    pub label: u8,
}

impl TransactionRecord {
    pub fn new(features: Vec<f64>, label: u8) -> Self {
        Self { features, label }
    }

    /// Whether the row is labelled fraudulent
    pub fn is_fraud(&self) -> bool {
        self.label == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_serialization() {
        let tx = TransactionRecord::new(vec![0.0, -1.36, 149.62], 1);

        let json = serde_json::to_string(&tx).unwrap();
        let deserialized: TransactionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(tx, deserialized);
        assert!(deserialized.is_fraud());
    }
}
