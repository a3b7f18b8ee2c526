//! Process-wide read-only datasets and uniform row sampling

pub mod loader;
pub mod table;

pub use loader::DatasetLoader;
pub use table::{CityTable, Table, TransactionTable};

use crate::config::DataConfig;
use crate::error::{FraudUtilsError, Result};
use crate::types::{City, TransactionRecord};
use once_cell::sync::OnceCell;
use rand::Rng;
use std::sync::Arc;
use tracing::info;

static DATASETS: OnceCell<Datasets> = OnceCell::new();

/// Both demo tables, loaded once and shared read-only.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub transactions: Arc<TransactionTable>,
    pub cities: Arc<CityTable>,
}

impl Datasets {
    /// Load both tables from the configured files
    pub fn load(config: &DataConfig) -> Result<Self> {
        let loader = DatasetLoader::new(&config.label_column);
        let transactions = loader.load_transactions(&config.creditcard_path)?;
        let cities = loader.load_cities(&config.cities_path)?;

        Ok(Self {
            transactions: Arc::new(transactions),
            cities: Arc::new(cities),
        })
    }

    /// Initialize the process-wide tables. Later calls return the tables
    /// from the first successful load without touching the files again.
    /// Concurrent callers block until the single in-flight load finishes;
    /// a failed load leaves the tables unset so a later call can retry.
    pub fn init(config: &DataConfig) -> Result<&'static Datasets> {
        init_once(&DATASETS, || Self::load(config))
    }

    /// The process-wide tables, if `init` has succeeded
    pub fn global() -> Result<&'static Datasets> {
        DATASETS.get().ok_or(FraudUtilsError::DatasetsNotLoaded)
    }

    pub fn select_random_transaction<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<&TransactionRecord> {
        self.transactions.select_random_row(rng)
    }

    pub fn select_random_city<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&City> {
        self.cities.select_random_row(rng)
    }
}

fn init_once<F>(cell: &OnceCell<Datasets>, load: F) -> Result<&Datasets>
where
    F: FnOnce() -> Result<Datasets>,
{
    cell.get_or_try_init(|| {
        let datasets = load()?;
        info!(
            transactions = datasets.transactions.len(),
            cities = datasets.cities.len(),
            "Datasets initialized"
        );
        Ok(datasets)
    })
}

/// Sample one row from the process-wide transaction table
pub fn select_random_row_creditcard<R: Rng + ?Sized>(
    rng: &mut R,
) -> Result<&'static TransactionRecord> {
    Datasets::global()?.select_random_transaction(rng)
}

/// Sample one row from the process-wide city table
pub fn select_random_row_cities<R: Rng + ?Sized>(rng: &mut R) -> Result<&'static City> {
    Datasets::global()?.select_random_city(rng)
}
