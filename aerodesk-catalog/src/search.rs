use std::sync::Arc;

use aerodesk_core::repository::FlightRepository;
use aerodesk_core::search::FlightSearchRequest;
use aerodesk_core::{CoreResult, Flight, FlightSearchCriteria};
use tracing::debug;

/// Conjunctive search over optional criteria, pushed down to the store.
/// Results carry no price ordering.
#[derive(Clone)]
pub struct SearchFilter {
    flights: Arc<dyn FlightRepository>,
}

impl SearchFilter {
    pub fn new(flights: Arc<dyn FlightRepository>) -> Self {
        Self { flights }
    }

    pub async fn search(&self, criteria: &FlightSearchCriteria) -> CoreResult<Vec<Flight>> {
        debug!(?criteria, "Searching flights");
        self.flights.search_flights(criteria).await
    }

    /// Parses raw caller input, then searches.
    pub async fn search_request(&self, req: FlightSearchRequest) -> CoreResult<Vec<Flight>> {
        let criteria = FlightSearchCriteria::from_request(req)?;
        self.search(&criteria).await
    }
}
