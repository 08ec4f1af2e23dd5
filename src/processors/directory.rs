use crate::error::{ProcessingError, Result};
use crate::models::{Coordinates, StationEntry};
use crate::processors::locator::CountryLocator;
use crate::readers::StationReader;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use tracing::warn;

/// Immutable station catalog used to pick which station to brief
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: Vec<StationEntry>,
}

impl StationDirectory {
    /// Duplicate codes keep their first entry.
    pub fn new(stations: Vec<StationEntry>) -> Self {
        let mut seen = HashSet::new();
        let stations = stations
            .into_iter()
            .filter(|station| {
                let first = seen.insert(station.code.clone());
                if !first {
                    warn!(code = %station.code, "duplicate station code ignored");
                }
                first
            })
            .collect();

        Self { stations }
    }

    pub fn load(path: &Path, reader: &StationReader) -> Result<Self> {
        Ok(Self::new(reader.read_stations(path)?))
    }

    pub fn stations(&self) -> &[StationEntry] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Sorted, distinct, non-empty country tags
    pub fn countries(&self) -> Vec<String> {
        self.stations
            .iter()
            .flat_map(|station| station.countries.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn stations_in_country<'a>(&'a self, country: &'a str) -> impl Iterator<Item = &'a StationEntry> + 'a {
        self.stations
            .iter()
            .filter(move |station| station.is_in_country(country))
    }

    pub fn find_by_code(&self, code: &str) -> Option<&StationEntry> {
        self.stations.iter().find(|station| station.code == code)
    }

    /// Lookup by display name (what a map marker reports when clicked)
    pub fn find_by_name(&self, name: &str) -> Option<&StationEntry> {
        self.stations.iter().find(|station| station.name == name)
    }

    pub fn require(&self, code: &str) -> Result<&StationEntry> {
        self.find_by_code(code)
            .ok_or_else(|| ProcessingError::StationNotFound {
                code: code.to_string(),
            })
    }

    /// Closest station by great-circle distance, with the distance in km
    pub fn nearest(&self, position: Coordinates) -> Option<(&StationEntry, f64)> {
        self.stations
            .iter()
            .map(|station| (station, station.coordinates.distance_km(&position)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Index into [`countries`](Self::countries) of the country at `position`,
    /// or 0 when the locator has no answer or the country has no stations.
    pub fn default_country_index<L>(&self, locator: &L, position: Option<Coordinates>) -> usize
    where
        L: CountryLocator + ?Sized,
    {
        let Some(located) = position.and_then(|p| locator.country_at(p)) else {
            return 0;
        };
        let located = located.trim().to_lowercase();

        self.countries()
            .iter()
            .position(|country| *country == located)
            .unwrap_or(0)
    }
}
