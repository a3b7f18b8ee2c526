//! Score binarization

/// Score above which a transaction is flagged as fraud
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Map each score to 1 if it is strictly above `threshold`, else 0.
pub fn binarize_prediction(scores: &[f64], threshold: f64) -> Vec<u8> {
    scores.iter().map(|&s| u8::from(s > threshold)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_maps_to_zero() {
        assert_eq!(binarize_prediction(&[0.1, 0.5, 0.9], DEFAULT_THRESHOLD), vec![0, 0, 1]);
    }

    #[test]
    fn test_custom_threshold() {
        assert_eq!(binarize_prediction(&[0.2, 0.61, 0.62, 1.0], 0.61), vec![0, 0, 1, 1]);
        assert_eq!(binarize_prediction(&[0.0, 0.01], 0.0), vec![0, 1]);
    }

    #[test]
    fn test_empty_and_nan() {
        assert!(binarize_prediction(&[], 0.5).is_empty());
        assert_eq!(binarize_prediction(&[f64::NAN], 0.5), vec![0]);
    }
}
