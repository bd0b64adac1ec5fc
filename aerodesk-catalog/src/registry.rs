use std::sync::Arc;

use aerodesk_core::repository::{AirlineRepository, FlightRepository};
use aerodesk_core::{Airline, CoreError, CoreResult, Flight, NewAirline};
use tracing::{info, warn};

/// Owns airline records and their flights.
#[derive(Clone)]
pub struct AirlineRegistry {
    airlines: Arc<dyn AirlineRepository>,
    flights: Arc<dyn FlightRepository>,
}

impl AirlineRegistry {
    pub fn new(airlines: Arc<dyn AirlineRepository>, flights: Arc<dyn FlightRepository>) -> Self {
        Self { airlines, flights }
    }

    pub async fn create(&self, name: &str) -> CoreResult<Airline> {
        let airline = self
            .airlines
            .save(NewAirline { name: name.to_string() })
            .await?;
        info!(airline_id = airline.id, name = %airline.name, "Registered airline");
        Ok(airline)
    }

    pub async fn get(&self, id: i32) -> CoreResult<Airline> {
        self.airlines
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::airline_not_found(id))
    }

    pub async fn list_all(&self) -> CoreResult<Vec<Airline>> {
        self.airlines.find_all().await
    }

    pub async fn rename(&self, id: i32, name: &str) -> CoreResult<Airline> {
        self.airlines
            .rename(id, name)
            .await?
            .ok_or_else(|| CoreError::airline_not_found(id))
    }

    /// The airline's owned flight collection.
    pub async fn flights_of(&self, id: i32) -> CoreResult<Vec<Flight>> {
        let airline = self.get(id).await?;
        self.flights.find_by_airline(airline.id).await
    }

    /// Deletes the airline together with every flight it owns. Returns the
    /// number of flights removed.
    pub async fn delete(&self, id: i32) -> CoreResult<u64> {
        let deleted = self
            .airlines
            .delete_with_flights(id)
            .await?
            .ok_or_else(|| CoreError::airline_not_found(id))?;

        warn!(airline_id = id, deleted_flights = deleted, "Deleted airline");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{draft, services};
    use aerodesk_core::{AirlineClass, EntityKind, FlightSearchCriteria};

    #[tokio::test]
    async fn test_create_get_list() {
        let s = services();
        let acme = s.registry.create("Acme").await.unwrap();
        let zen = s.registry.create("Zenith").await.unwrap();

        assert_eq!(s.registry.get(acme.id).await.unwrap().name, "Acme");
        let names: Vec<String> = s
            .registry
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Acme", "Zenith"]);

        let err = s.registry.get(zen.id + 10).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { kind: EntityKind::Airline, .. }));
    }

    #[tokio::test]
    async fn test_rename() {
        let s = services();
        let acme = s.registry.create("Acme").await.unwrap();
        let renamed = s.registry.rename(acme.id, "Acme Air").await.unwrap();
        assert_eq!(renamed.id, acme.id);
        assert_eq!(renamed.name, "Acme Air");
        assert!(s.registry.rename(404, "Nobody").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_owned_flights() {
        let s = services();
        let acme = s.registry.create("Acme").await.unwrap();
        let zen = s.registry.create("Zenith").await.unwrap();

        for price in [100.0, 200.0, 300.0, 400.0] {
            s.catalog
                .create(draft("NYC", "LON", price, AirlineClass::Economy), &acme)
                .await
                .unwrap();
        }
        let survivor = s
            .catalog
            .create(draft("NYC", "LON", 50.0, AirlineClass::Economy), &zen)
            .await
            .unwrap();
        assert_eq!(s.registry.flights_of(acme.id).await.unwrap().len(), 4);

        assert_eq!(s.registry.delete(acme.id).await.unwrap(), 4);

        // Nothing referencing the deleted airline is queryable any more.
        let remaining = s.catalog.list_all_sorted_by_price().await.unwrap();
        assert!(remaining.iter().all(|f| f.airline.id != acme.id));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, survivor.id);

        let by_name = FlightSearchCriteria::new(None, None, Some("Acme".into()), None);
        assert!(s.search.search(&by_name).await.unwrap().is_empty());
        assert!(s.registry.flights_of(acme.id).await.is_err());

        assert!(matches!(
            s.registry.delete(acme.id).await,
            Err(CoreError::NotFound { .. })
        ));
    }
}
