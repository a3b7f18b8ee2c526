//! Immutable in-memory tables with uniform row sampling

use crate::error::{FraudUtilsError, Result};
use crate::types::{City, TransactionRecord};
use rand::Rng;

/// Read-only table of rows loaded once at startup.
#[derive(Debug, Clone)]
pub struct Table<T> {
    name: &'static str,
    columns: Vec<String>,
    rows: Vec<T>,
}

/// Credit-card transactions; `columns` holds the feature names.
pub type TransactionTable = Table<TransactionRecord>;

/// World cities with geocoordinates.
pub type CityTable = Table<City>;

impl<T> Table<T> {
    pub fn new(name: &'static str, columns: Vec<String>, rows: Vec<T>) -> Self {
        Self {
            name,
            columns,
            rows,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Draw exactly one row uniformly at random.
    ///
    /// Calls are independent, so repeated calls may return the same row.
    pub fn select_random_row<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T> {
        if self.rows.is_empty() {
            return Err(FraudUtilsError::EmptyTable(self.name));
        }
        Ok(&self.rows[rng.gen_range(0..self.rows.len())])
    }
}

impl TransactionTable {
    /// Split the table into a feature matrix and label vector
    pub fn features_and_labels(&self) -> (Vec<Vec<f64>>, Vec<u8>) {
        self.rows
            .iter()
            .map(|row| (row.features.clone(), row.label))
            .unzip()
    }

    /// Number of rows labelled fraudulent
    pub fn fraud_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_fraud()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_table() -> TransactionTable {
        Table::new(
            "transactions",
            vec!["Amount".to_string()],
            vec![
                TransactionRecord::new(vec![10.0], 0),
                TransactionRecord::new(vec![20.0], 1),
                TransactionRecord::new(vec![30.0], 0),
            ],
        )
    }

    #[test]
    fn test_select_random_row_returns_member() {
        let table = sample_table();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let row = table.select_random_row(&mut rng).unwrap();
            assert!(table.rows().contains(row));
        }
    }

    #[test]
    fn test_select_random_row_covers_all_rows() {
        let table = sample_table();
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 3];

        for _ in 0..200 {
            let row = table.select_random_row(&mut rng).unwrap();
            let idx = table.rows().iter().position(|r| r == row).unwrap();
            seen[idx] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_select_random_row_is_reproducible_with_seed() {
        let table = sample_table();
        let mut a = StdRng::seed_from_u64(3);
        let mut b = StdRng::seed_from_u64(3);

        for _ in 0..10 {
            assert_eq!(
                table.select_random_row(&mut a).unwrap(),
                table.select_random_row(&mut b).unwrap()
            );
        }
    }

    #[test]
    fn test_empty_table_fails() {
        let table: CityTable = Table::new("cities", Vec::new(), Vec::new());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            table.select_random_row(&mut rng),
            Err(FraudUtilsError::EmptyTable("cities"))
        ));
    }

    #[test]
    fn test_features_and_labels() {
        let table = sample_table();
        let (features, labels) = table.features_and_labels();
        assert_eq!(features, vec![vec![10.0], vec![20.0], vec![30.0]]);
        assert_eq!(labels, vec![0, 1, 0]);
        assert_eq!(table.fraud_count(), 1);
    }
}
