use crate::models::Coordinates;

/// Reverse geocoding supplied by the host application.
///
/// Implementations are best effort: any failure, timeout or unknown place
/// answers `None`, and callers fall back to their default.
pub trait CountryLocator {
    fn country_at(&self, coordinates: Coordinates) -> Option<String>;
}

/// Locator for hosts without geocoding; always unknown
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownLocator;

impl CountryLocator for UnknownLocator {
    fn country_at(&self, _coordinates: Coordinates) -> Option<String> {
        None
    }
}

impl<F> CountryLocator for F
where
    F: Fn(Coordinates) -> Option<String>,
{
    fn country_at(&self, coordinates: Coordinates) -> Option<String> {
        self(coordinates)
    }
}
