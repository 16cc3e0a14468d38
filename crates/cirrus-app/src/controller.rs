//! Screen controller: one sequential fetch chain per user action.
//!
//! Each action (search submit, locate, app start) resolves a location,
//! fetches its forecast, and normalizes it into a snapshot that replaces the
//! screen state wholesale. Errors are terminal for the cycle; the user
//! re-triggers the action to retry.

use cirrus_core::error::AppError;
use cirrus_core::fetch_state::{FetchState, FetchTracker};
use cirrus_store::kv::KeyValueStore;
use cirrus_store::lists::CityLists;
use cirrus_weather::client::CURRENT_LOCATION_NAME;
use cirrus_weather::{
    build_snapshot, LocationSource, ResolvedLocation, WeatherClient, WeatherError,
    WeatherSnapshot,
};

pub struct WeatherController<S: KeyValueStore> {
    client: WeatherClient,
    lists: CityLists<S>,
    tracker: FetchTracker<WeatherSnapshot>,
}

impl<S: KeyValueStore> WeatherController<S> {
    pub fn new(client: WeatherClient, lists: CityLists<S>) -> Self {
        Self {
            client,
            lists,
            tracker: FetchTracker::new(),
        }
    }

    /// Fetch weather for a typed city name.
    ///
    /// Blank input is ignored rather than sent to the resolver; the resolver
    /// requires a trimmed, non-empty name.
    pub async fn search(&mut self, city: &str) -> &FetchState<WeatherSnapshot> {
        let city = city.trim();
        if city.is_empty() {
            tracing::warn!("Ignoring search with empty city name");
            return self.tracker.state();
        }

        let ticket = self.tracker.begin();
        let result = self.run_search(city).await;
        self.finish(ticket, result);
        self.tracker.state()
    }

    /// Fetch weather for the device's current location.
    pub async fn locate(
        &mut self,
        source: &dyn LocationSource,
    ) -> &FetchState<WeatherSnapshot> {
        let ticket = self.tracker.begin();
        let result = self.run_locate(source).await;
        self.finish(ticket, result);
        self.tracker.state()
    }

    async fn run_search(&self, city: &str) -> Result<WeatherSnapshot, AppError> {
        let location = self
            .client
            .resolve_by_name(city)
            .await
            .map_err(|e| match e {
                WeatherError::CityNotFound(name) => AppError::CityNotFound(name),
                other => AppError::Fetch(other.to_string()),
            })?;

        self.record_recent(&location);

        self.fetch_and_build(&location)
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))
    }

    async fn run_locate(
        &self,
        source: &dyn LocationSource,
    ) -> Result<WeatherSnapshot, AppError> {
        let coordinate = source
            .current_location()
            .await
            .map_err(|e| AppError::Location(e.to_string()))?;

        let location = self
            .client
            .resolve_by_coordinates(coordinate)
            .await
            .map_err(|e| AppError::LocateFailed(e.to_string()))?;

        self.record_recent(&location);

        self.fetch_and_build(&location)
            .await
            .map_err(|e| AppError::LocateFailed(e.to_string()))
    }

    async fn fetch_and_build(
        &self,
        location: &ResolvedLocation,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let payload = self.client.fetch_forecast(location.coordinate).await?;
        build_snapshot(&payload, &location.name)
    }

    /// Record a successfully resolved city. The reverse-geocoding placeholder
    /// is not a city and stays out of the list; a store failure must not fail
    /// the fetch cycle.
    fn record_recent(&self, location: &ResolvedLocation) {
        if location.name == CURRENT_LOCATION_NAME {
            return;
        }
        if let Err(e) = self.lists.record_recent(&location.name) {
            tracing::warn!("Failed to record recent city '{}': {}", location.name, e);
        }
    }

    fn finish(&mut self, ticket: u64, result: Result<WeatherSnapshot, AppError>) {
        let result = result.map_err(|e| {
            tracing::error!("Fetch cycle failed: {}", e);
            e.user_message().to_string()
        });
        self.tracker.complete(ticket, result);
    }

    pub fn state(&self) -> &FetchState<WeatherSnapshot> {
        self.tracker.state()
    }

    pub fn lists(&self) -> &CityLists<S> {
        &self.lists
    }
}
