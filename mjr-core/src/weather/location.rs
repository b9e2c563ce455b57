use super::Coordinates;

/// Why no position could be obtained. Each reason has its own message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Location access denied. Enable `share_location` in the [weather] config to see local weather.")]
    PermissionDenied,
    #[error("Location unavailable. Set `latitude` and `longitude` in the [weather] config.")]
    PositionUnavailable,
}

pub trait LocationProvider: Send + Sync {
    fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Position taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct ConfiguredLocation {
    pub coords: Option<Coordinates>,
    pub share_location: bool,
}

impl LocationProvider for ConfiguredLocation {
    fn locate(&self) -> Result<Coordinates, LocationError> {
        if !self.share_location {
            return Err(LocationError::PermissionDenied);
        }
        self.coords.ok_or(LocationError::PositionUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISBON: Coordinates = Coordinates {
        latitude: 38.72,
        longitude: -9.14,
    };

    #[test]
    fn denial_and_absence_are_distinct() {
        let denied = ConfiguredLocation {
            coords: Some(LISBON),
            share_location: false,
        };
        let missing = ConfiguredLocation {
            coords: None,
            share_location: true,
        };
        assert_eq!(denied.locate(), Err(LocationError::PermissionDenied));
        assert_eq!(missing.locate(), Err(LocationError::PositionUnavailable));
        assert_ne!(
            LocationError::PermissionDenied.to_string(),
            LocationError::PositionUnavailable.to_string()
        );
    }

    #[test]
    fn configured_coordinates_are_returned() {
        let here = ConfiguredLocation {
            coords: Some(LISBON),
            share_location: true,
        };
        assert_eq!(here.locate(), Ok(LISBON));
    }
}
