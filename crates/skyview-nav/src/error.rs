use thiserror::Error;

/// Rejected navigation parameters.
///
/// Only construction can fail; once a tracker or controller exists, every
/// input degrades to "no navigation" instead of an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavConfigError {
    #[error("total_views must be at least 1")]
    NoViews,

    #[error("initial view {index} is out of range for {total} views")]
    InitialViewOutOfRange { index: usize, total: usize },

    #[error("{field} must be a positive, finite number of pixels (got {value})")]
    InvalidDistance { field: &'static str, value: f64 },

    #[error("max_duration_ms must be greater than 0")]
    ZeroDuration,
}

impl NavConfigError {
    /// Name of the setting that caused the error, as it appears in config files.
    pub fn field(&self) -> &'static str {
        match self {
            NavConfigError::NoViews => "total_views",
            NavConfigError::InitialViewOutOfRange { .. } => "initial_view",
            NavConfigError::InvalidDistance { field, .. } => field,
            NavConfigError::ZeroDuration => "max_duration_ms",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_match_config_keys() {
        assert_eq!(NavConfigError::NoViews.field(), "total_views");
        assert_eq!(NavConfigError::ZeroDuration.field(), "max_duration_ms");
        let err = NavConfigError::InvalidDistance {
            field: "distance_threshold",
            value: -1.0,
        };
        assert_eq!(err.field(), "distance_threshold");
        assert!(err.to_string().contains("-1"));
    }
}
