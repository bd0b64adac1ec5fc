use std::sync::Arc;

use aerodesk_core::inventory::check_draft;
use aerodesk_core::repository::FlightRepository;
use aerodesk_core::{Airline, CoreError, CoreResult, Flight, FlightDraft, FlightRecord};
use tracing::{info, warn};

/// Owns flight records: create, fetch, delete, listing and seat adjustment.
#[derive(Clone)]
pub struct FlightCatalog {
    flights: Arc<dyn FlightRepository>,
}

impl FlightCatalog {
    pub fn new(flights: Arc<dyn FlightRepository>) -> Self {
        Self { flights }
    }

    /// Attaches the draft to an already-resolved airline and persists it.
    pub async fn create(&self, draft: FlightDraft, airline: &Airline) -> CoreResult<Flight> {
        check_draft(&draft)?;
        let flight = self.flights.save(FlightRecord::insert(draft, airline)).await?;
        info!(flight_id = flight.id, airline_id = airline.id, "Saved new flight");
        Ok(flight)
    }

    pub async fn get(&self, id: i32) -> CoreResult<Flight> {
        info!(flight_id = id, "Looking up flight");
        self.flights
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::flight_not_found(id))
    }

    /// Full overwrite of an existing flight.
    pub async fn save(&self, flight: &Flight) -> CoreResult<Flight> {
        check_draft(&flight.fields())?;
        self.flights.save(flight.to_record()).await
    }

    pub async fn delete(&self, id: i32) -> CoreResult<()> {
        warn!(flight_id = id, "Deleting flight");
        if self.flights.delete_by_id(id).await? {
            Ok(())
        } else {
            Err(CoreError::flight_not_found(id))
        }
    }

    /// Every flight, cheapest first. Equal prices keep store order.
    pub async fn list_all_sorted_by_price(&self) -> CoreResult<Vec<Flight>> {
        info!("Listing all flights by price");
        let mut flights = self.flights.find_all().await?;
        flights.sort_by(|a, b| a.base_price.total_cmp(&b.base_price));
        Ok(flights)
    }

    /// Moves `delta` seats in (positive) or out (negative) of availability.
    pub async fn adjust_seats(&self, id: i32, delta: i32) -> CoreResult<Flight> {
        let flight = self
            .flights
            .adjust_available_seats(id, delta)
            .await?
            .ok_or_else(|| CoreError::flight_not_found(id))?;

        info!(
            flight_id = id,
            delta,
            available_seats = flight.available_seats,
            "Adjusted seat availability"
        );
        Ok(flight)
    }
}
