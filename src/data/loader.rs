//! CSV loaders for the transaction and city datasets

use crate::data::table::{CityTable, Table, TransactionTable};
use crate::error::{FraudUtilsError, Result};
use crate::types::{City, TransactionRecord};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Raw row of the world-cities CSV. Only the ASCII name, country and
/// coordinates are kept; the accented `city` column is ignored.
#[derive(Debug, Deserialize)]
struct CityRow {
    city_ascii: String,
    country: String,
    lat: f64,
    lng: f64,
}

/// Header names `CityRow` deserializes from
const CITY_COLUMNS: [&str; 4] = ["city_ascii", "country", "lat", "lng"];

impl From<CityRow> for City {
    fn from(row: CityRow) -> Self {
        Self {
            city: row.city_ascii,
            country: row.country,
            latitude: row.lat,
            longitude: row.lng,
        }
    }
}

/// Loader for the demo datasets
pub struct DatasetLoader {
    /// Name of the fraud label column in the transaction CSV
    label_column: String,
}

impl DatasetLoader {
    pub fn new(label_column: &str) -> Self {
        Self {
            label_column: label_column.to_string(),
        }
    }

    /// Load the transaction table from a CSV file
    pub fn load_transactions<P: AsRef<Path>>(&self, path: P) -> Result<TransactionTable> {
        let path = path.as_ref();
        info!(path = %path.display(), label_column = %self.label_column, "Loading transactions");

        let file = File::open(path).map_err(|e| load_error(path, e))?;
        let table = self.read_transactions(file, path)?;

        info!(
            rows = table.len(),
            features = table.columns().len(),
            frauds = table.fraud_count(),
            "Transactions loaded"
        );
        Ok(table)
    }

    /// Load the transaction table from any reader (e.g. in-memory CSV)
    pub fn transactions_from_reader<R: Read>(&self, reader: R) -> Result<TransactionTable> {
        self.read_transactions(reader, Path::new("<reader>"))
    }

    /// Load the city table from a CSV file
    pub fn load_cities<P: AsRef<Path>>(&self, path: P) -> Result<CityTable> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading cities");

        let file = File::open(path).map_err(|e| load_error(path, e))?;
        let table = read_cities(file, path)?;

        info!(rows = table.len(), "Cities loaded");
        Ok(table)
    }

    /// Load the city table from any reader
    pub fn cities_from_reader<R: Read>(&self, reader: R) -> Result<CityTable> {
        read_cities(reader, Path::new("<reader>"))
    }

    fn read_transactions<R: Read>(&self, reader: R, origin: &Path) -> Result<TransactionTable> {
        let mut csv = csv::Reader::from_reader(reader);

        let headers = csv.headers().map_err(|e| load_error(origin, e))?.clone();
        let label_idx = headers
            .iter()
            .position(|h| h.trim() == self.label_column)
            .ok_or_else(|| {
                load_error(
                    origin,
                    format!("missing label column '{}'", self.label_column),
                )
            })?;

        let feature_names: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != label_idx)
            .map(|(_, h)| h.trim().to_string())
            .collect();
        debug!(features = ?feature_names, "Transaction schema");

        let mut rows = Vec::new();
        for (line, record) in csv.records().enumerate() {
            let record = record.map_err(|e| load_error(origin, e))?;
            // header is line 1
            let line = line + 2;

            let mut features = Vec::with_capacity(feature_names.len());
            let mut label = None;
            for (i, field) in record.iter().enumerate() {
                let value: f64 = field.trim().parse().map_err(|_| {
                    load_error(
                        origin,
                        format!("line {}: non-numeric value '{}' in column {}", line, field, i),
                    )
                })?;
                if i == label_idx {
                    label = Some(parse_label(value).ok_or_else(|| {
                        load_error(origin, format!("line {}: label {} is not 0 or 1", line, value))
                    })?);
                } else {
                    features.push(value);
                }
            }

            let label = label
                .ok_or_else(|| load_error(origin, format!("line {}: missing label", line)))?;
            rows.push(TransactionRecord::new(features, label));
        }

        Ok(Table::new("transactions", feature_names, rows))
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new("Class")
    }
}

fn read_cities<R: Read>(reader: R, origin: &Path) -> Result<CityTable> {
    let mut csv = csv::Reader::from_reader(reader);

    let headers = csv.headers().map_err(|e| load_error(origin, e))?;
    let missing: Vec<&str> = CITY_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h.trim() == *col))
        .collect();
    if !missing.is_empty() {
        return Err(load_error(
            origin,
            format!("missing city columns: {}", missing.join(", ")),
        ));
    }

    let rows = csv
        .deserialize::<CityRow>()
        .map(|row| row.map(City::from).map_err(|e| load_error(origin, e)))
        .collect::<Result<Vec<_>>>()?;

    let columns = ["city", "country", "latitude", "longitude"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    Ok(Table::new("cities", columns, rows))
}

fn parse_label(value: f64) -> Option<u8> {
    if value == 0.0 {
        Some(0)
    } else if value == 1.0 {
        Some(1)
    } else {
        None
    }
}

fn load_error(path: &Path, reason: impl ToString) -> FraudUtilsError {
    FraudUtilsError::Load {
        path: PathBuf::from(path),
        reason: reason.to_string(),
    }
}
