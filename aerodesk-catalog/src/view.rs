use aerodesk_core::{Flight, FlightView};

/// Flattens flights into presentation records.
pub struct FlightViewMapper;

impl FlightViewMapper {
    /// Copies every scalar field verbatim. The base price is not scaled by
    /// the fare-class multiplier.
    pub fn to_view(flight: &Flight) -> FlightView {
        FlightView {
            id: flight.id,
            enterprise: flight.enterprise.clone(),
            base_price: flight.base_price,
            source: flight.source.clone(),
            destination: flight.destination.clone(),
            departure_date: flight.departure_date,
            departure_time: flight.departure_time,
            arrival_date: flight.arrival_date,
            arrival_time: flight.arrival_time,
            duration: flight.duration,
            total_seats: flight.total_seats,
            available_seats: flight.available_seats,
            class_name: flight.class_name,
            airline_name: flight.airline.name.clone(),
        }
    }

    /// Absent input maps to absent output.
    pub fn to_view_opt(flight: Option<&Flight>) -> Option<FlightView> {
        flight.map(Self::to_view)
    }

    pub fn to_views(flights: &[Flight]) -> Vec<FlightView> {
        flights.iter().map(Self::to_view).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{draft, services};
    use aerodesk_core::AirlineClass;

    #[tokio::test]
    async fn test_view_flattens_airline_and_keeps_price() {
        let s = services();
        let acme = s.registry.create("Acme").await.unwrap();
        let flight = s
            .catalog
            .create(draft("NYC", "LON", 500.0, AirlineClass::Business), &acme)
            .await
            .unwrap();

        let view = FlightViewMapper::to_view(&flight);
        assert_eq!(view.base_price, 500.0);
        assert_eq!(view.airline_name, "Acme");
        assert_eq!(view.id, flight.id);
        assert_eq!(view.class_name, AirlineClass::Business);
        assert_eq!(view.departure_time, flight.departure_time);
        assert_eq!(view.available_seats, flight.available_seats);
    }

    #[test]
    fn test_none_maps_to_none() {
        assert!(FlightViewMapper::to_view_opt(None).is_none());
    }
}
