//! City geocoordinates used to geo-annotate demo events

use serde::{Deserialize, Serialize};

/// One city record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// ASCII city name
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_serialization() {
        let city = City {
            city: "Tokyo".to_string(),
            country: "Japan".to_string(),
            latitude: 35.6897,
            longitude: 139.6922,
        };

        let json = serde_json::to_string(&city).unwrap();
        assert!(json.contains("\"latitude\":35.6897"));

        let deserialized: City = serde_json::from_str(&json).unwrap();
        assert_eq!(city, deserialized);
    }
}
