//! Device-location boundary.
//!
//! The platform location workflow is an external collaborator; the pipeline
//! only needs "a coordinate or a failure".

use async_trait::async_trait;

use crate::types::Coordinate;

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Source of the device's current coordinate.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn current_location(&self) -> Result<Coordinate, LocationError>;
}

/// A fixed coordinate, for CLI use and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_location_returns_its_coordinate() {
        let source = FixedLocation(Coordinate::new(48.85, 2.35));
        let coord = source.current_location().await.unwrap();
        assert_eq!(coord.latitude, 48.85);
        assert_eq!(coord.longitude, 2.35);
    }

    #[test]
    fn location_error_display() {
        assert!(LocationError::PermissionDenied.to_string().contains("permission"));
        assert!(LocationError::Timeout.to_string().contains("timed out"));
    }
}
