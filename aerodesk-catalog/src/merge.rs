use aerodesk_core::{Airline, CoreResult, Flight, FlightUpdate};
use tracing::info;

use crate::FlightCatalog;

/// Applies full-replace updates onto existing flights.
#[derive(Clone)]
pub struct UpdateMerger {
    catalog: FlightCatalog,
}

impl UpdateMerger {
    pub fn new(catalog: FlightCatalog) -> Self {
        Self { catalog }
    }

    /// Overwrites every mutable field and the airline; the id is kept.
    pub fn merge(existing: Flight, update: &FlightUpdate, airline: Airline) -> Flight {
        // Exhaustive so a new field cannot be silently skipped.
        let FlightUpdate {
            enterprise,
            base_price,
            source,
            destination,
            departure_date,
            departure_time,
            arrival_date,
            arrival_time,
            duration,
            total_seats,
            available_seats,
            class_name,
        } = update;

        Flight {
            id: existing.id,
            enterprise: enterprise.clone(),
            base_price: *base_price,
            source: source.clone(),
            destination: destination.clone(),
            departure_date: *departure_date,
            departure_time: *departure_time,
            arrival_date: *arrival_date,
            arrival_time: *arrival_time,
            duration: *duration,
            total_seats: *total_seats,
            available_seats: *available_seats,
            class_name: *class_name,
            airline,
        }
    }

    /// Merges and persists through the catalog, which re-checks seat counts.
    pub async fn apply(
        &self,
        existing: Flight,
        update: &FlightUpdate,
        airline: Airline,
    ) -> CoreResult<Flight> {
        let merged = Self::merge(existing, update, airline);
        let saved = self.catalog.save(&merged).await?;
        info!(flight_id = saved.id, airline_id = saved.airline.id, "Updated flight");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{draft, services};
    use aerodesk_core::{AirlineClass, CoreError};

    #[tokio::test]
    async fn test_apply_keeps_id_and_replaces_everything_else() {
        let s = services();
        let acme = s.registry.create("Acme").await.unwrap();
        let zen = s.registry.create("Zenith").await.unwrap();

        // Bring the id up to 7.
        let mut flight = None;
        for _ in 0..7 {
            flight = Some(
                s.catalog
                    .create(draft("NYC", "LON", 100.0, AirlineClass::Economy), &acme)
                    .await
                    .unwrap(),
            );
        }
        let existing = flight.unwrap();
        assert_eq!(existing.id, 7);

        let mut update = draft("SFO", "TYO", 1250.0, AirlineClass::FirstClass);
        update.enterprise = "Zenith Long Haul".into();
        update.total_seats = 12;
        update.available_seats = 3;

        let saved = s.merger.apply(existing, &update, zen.clone()).await.unwrap();
        assert_eq!(saved.id, 7);
        assert_eq!(saved.fields(), update);
        assert_eq!(saved.airline, zen);

        let reloaded = s.catalog.get(7).await.unwrap();
        assert_eq!(reloaded, saved);
        assert_eq!(s.registry.flights_of(zen.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_apply_copies_unchanged_fields_too() {
        let s = services();
        let acme = s.registry.create("Acme").await.unwrap();
        let existing = s
            .catalog
            .create(draft("NYC", "LON", 100.0, AirlineClass::Economy), &acme)
            .await
            .unwrap();

        let update = existing.fields();
        let saved = s.merger.apply(existing.clone(), &update, acme).await.unwrap();
        assert_eq!(saved, existing);
    }

    #[tokio::test]
    async fn test_apply_rejects_broken_seat_counts() {
        let s = services();
        let acme = s.registry.create("Acme").await.unwrap();
        let existing = s
            .catalog
            .create(draft("NYC", "LON", 100.0, AirlineClass::Economy), &acme)
            .await
            .unwrap();

        let mut update = existing.fields();
        update.available_seats = -2;

        let err = s.merger.apply(existing.clone(), &update, acme).await.unwrap_err();
        assert!(matches!(err, CoreError::InvariantViolation(_)));
        assert_eq!(s.catalog.get(existing.id).await.unwrap(), existing);
    }
}
