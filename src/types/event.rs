//! Geo-annotated demo events built from sampled rows

use crate::types::{City, TransactionRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A synthetic demo event: one sampled transaction placed in one sampled city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoEvent {
    /// Unique event identifier
    pub event_id: String,

    /// Event generation timestamp
    pub timestamp: DateTime<Utc>,

    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Transaction features in table column order
    pub features: Vec<f64>,

    /// Ground-truth fraud label of the sampled row
    pub label: u8,
}

impl DemoEvent {
    /// Create a new event from a sampled transaction and city
    pub fn new(transaction: &TransactionRecord, city: &City) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            city: city.city.clone(),
            country: city.country.clone(),
            latitude: city.latitude,
            longitude: city.longitude,
            features: transaction.features.clone(),
            label: transaction.label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> City {
        City {
            city: "Paris".to_string(),
            country: "France".to_string(),
            latitude: 48.8566,
            longitude: 2.3522,
        }
    }

    #[test]
    fn test_demo_event_fields() {
        let tx = TransactionRecord::new(vec![1.0, 2.0], 0);
        let event = DemoEvent::new(&tx, &paris());

        assert_eq!(event.city, "Paris");
        assert_eq!(event.latitude, 48.8566);
        assert_eq!(event.features, vec![1.0, 2.0]);
        assert_eq!(event.label, 0);
        assert!(uuid::Uuid::parse_str(&event.event_id).is_ok());
    }

    #[test]
    fn test_demo_event_serialization() {
        let tx = TransactionRecord::new(vec![0.5], 1);
        let event = DemoEvent::new(&tx, &paris());

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: DemoEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event.event_id, deserialized.event_id);
        assert_eq!(event.country, deserialized.country);
        assert_eq!(event.label, deserialized.label);
    }

    #[test]
    fn test_event_ids_are_unique() {
        let tx = TransactionRecord::new(vec![], 0);
        let a = DemoEvent::new(&tx, &paris());
        let b = DemoEvent::new(&tx, &paris());
        assert_ne!(a.event_id, b.event_id);
    }
}
