use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use aerodesk_core::inventory::apply_seat_delta;
use aerodesk_core::repository::{AirlineRepository, FlightRepository, UserRepository};
use aerodesk_core::{
    Airline, CoreError, CoreResult, Flight, FlightDraft, FlightRecord, FlightSearchCriteria,
    NewAirline, UserAccount,
};
use async_trait::async_trait;

#[derive(Default)]
struct MemoryState {
    next_airline_id: i32,
    next_flight_id: i32,
    next_user_id: i32,
    airlines: BTreeMap<i32, Airline>,
    // Flights keep only the airline id; names are resolved on read.
    flights: BTreeMap<i32, (FlightDraft, i32)>,
    users: BTreeMap<i32, UserAccount>,
}

impl MemoryState {
    fn hydrate(&self, id: i32) -> CoreResult<Option<Flight>> {
        let Some((fields, airline_id)) = self.flights.get(&id) else {
            return Ok(None);
        };
        let airline = self
            .airlines
            .get(airline_id)
            .cloned()
            .ok_or_else(|| CoreError::airline_not_found(*airline_id))?;

        Ok(Some(Flight::from_parts(id, fields.clone(), airline)))
    }

    fn hydrate_where<F>(&self, keep: F) -> CoreResult<Vec<Flight>>
    where
        F: Fn(&Flight) -> bool,
    {
        let mut flights = Vec::new();
        for id in self.flights.keys() {
            if let Some(flight) = self.hydrate(*id)? {
                if keep(&flight) {
                    flights.push(flight);
                }
            }
        }
        Ok(flights)
    }
}

/// In-process store backing every repository trait. All state sits behind
/// one mutex, so each call is a single atomic unit of work.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CoreResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| CoreError::store("memory store lock poisoned"))
    }
}

#[async_trait]
impl AirlineRepository for MemoryStore {
    async fn save(&self, airline: NewAirline) -> CoreResult<Airline> {
        let mut state = self.lock()?;
        state.next_airline_id += 1;
        let airline = Airline {
            id: state.next_airline_id,
            name: airline.name,
        };
        state.airlines.insert(airline.id, airline.clone());
        Ok(airline)
    }

    async fn rename(&self, id: i32, name: &str) -> CoreResult<Option<Airline>> {
        let mut state = self.lock()?;
        Ok(state.airlines.get_mut(&id).map(|airline| {
            airline.name = name.to_string();
            airline.clone()
        }))
    }

    async fn find_by_id(&self, id: i32) -> CoreResult<Option<Airline>> {
        Ok(self.lock()?.airlines.get(&id).cloned())
    }

    async fn find_all(&self) -> CoreResult<Vec<Airline>> {
        Ok(self.lock()?.airlines.values().cloned().collect())
    }

    async fn delete_with_flights(&self, id: i32) -> CoreResult<Option<u64>> {
        let mut state = self.lock()?;
        if !state.airlines.contains_key(&id) {
            return Ok(None);
        }

        let before = state.flights.len();
        state.flights.retain(|_, (_, airline_id)| *airline_id != id);
        let removed = (before - state.flights.len()) as u64;

        state.airlines.remove(&id);
        Ok(Some(removed))
    }
}

#[async_trait]
impl FlightRepository for MemoryStore {
    async fn save(&self, record: FlightRecord) -> CoreResult<Flight> {
        let mut state = self.lock()?;
        if !state.airlines.contains_key(&record.airline_id) {
            return Err(CoreError::airline_not_found(record.airline_id));
        }

        let id = match record.id {
            Some(id) if state.flights.contains_key(&id) => id,
            Some(id) => return Err(CoreError::flight_not_found(id)),
            None => {
                state.next_flight_id += 1;
                state.next_flight_id
            }
        };

        state.flights.insert(id, (record.fields, record.airline_id));
        state
            .hydrate(id)?
            .ok_or_else(|| CoreError::flight_not_found(id))
    }

    async fn find_by_id(&self, id: i32) -> CoreResult<Option<Flight>> {
        self.lock()?.hydrate(id)
    }

    async fn find_all(&self) -> CoreResult<Vec<Flight>> {
        self.lock()?.hydrate_where(|_| true)
    }

    async fn find_by_airline(&self, airline_id: i32) -> CoreResult<Vec<Flight>> {
        self.lock()?.hydrate_where(|f| f.airline.id == airline_id)
    }

    async fn delete_by_id(&self, id: i32) -> CoreResult<bool> {
        Ok(self.lock()?.flights.remove(&id).is_some())
    }

    async fn search_flights(&self, criteria: &FlightSearchCriteria) -> CoreResult<Vec<Flight>> {
        self.lock()?.hydrate_where(|f| criteria.matches(f))
    }

    async fn adjust_available_seats(&self, id: i32, delta: i32) -> CoreResult<Option<Flight>> {
        let mut state = self.lock()?;
        let Some((fields, _)) = state.flights.get_mut(&id) else {
            return Ok(None);
        };

        fields.available_seats = apply_seat_delta(fields.available_seats, fields.total_seats, delta)?;
        state.hydrate(id)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, username: &str, password_hash: &str) -> CoreResult<UserAccount> {
        let mut state = self.lock()?;
        if state.users.values().any(|u| u.username == username) {
            return Err(CoreError::Conflict(format!("Username already taken: {username}")));
        }

        state.next_user_id += 1;
        let user = UserAccount {
            id: state.next_user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> CoreResult<Option<UserAccount>> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerodesk_core::AirlineClass;
    use chrono::{NaiveDate, NaiveTime};

    fn draft(source: &str, price: f64) -> FlightDraft {
        FlightDraft {
            enterprise: "Ops".into(),
            base_price: price,
            source: source.into(),
            destination: "LON".into(),
            departure_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            departure_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            arrival_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            duration: 420,
            total_seats: 10,
            available_seats: 10,
            class_name: AirlineClass::Economy,
        }
    }

    #[tokio::test]
    async fn test_save_assigns_ids_and_hydrates_airline() {
        let store = MemoryStore::new();
        let airline = AirlineRepository::save(&store, NewAirline { name: "Acme".into() })
            .await
            .unwrap();

        let first = FlightRepository::save(&store, FlightRecord::insert(draft("NYC", 100.0), &airline))
            .await
            .unwrap();
        let second = FlightRepository::save(&store, FlightRecord::insert(draft("BOS", 90.0), &airline))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.airline.name, "Acme");

        // Renames show up on the next read.
        store.rename(airline.id, "Acme Air").await.unwrap();
        let reloaded = FlightRepository::find_by_id(&store, first.id).await.unwrap().unwrap();
        assert_eq!(reloaded.airline.name, "Acme Air");
    }

    #[tokio::test]
    async fn test_save_rejects_unknown_ids() {
        let store = MemoryStore::new();
        let airline = AirlineRepository::save(&store, NewAirline { name: "Acme".into() })
            .await
            .unwrap();

        let missing = FlightRecord { id: Some(99), fields: draft("NYC", 1.0), airline_id: airline.id };
        let err = FlightRepository::save(&store, missing).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { id: 99, .. }));

        let orphan = FlightRecord { id: None, fields: draft("NYC", 1.0), airline_id: 7 };
        let err = FlightRepository::save(&store, orphan).await.unwrap_err();
        assert_eq!(err.to_string(), "Airline not found by id: 7");
    }

    #[tokio::test]
    async fn test_delete_with_flights_only_touches_owner() {
        let store = MemoryStore::new();
        let acme = AirlineRepository::save(&store, NewAirline { name: "Acme".into() }).await.unwrap();
        let zen = AirlineRepository::save(&store, NewAirline { name: "Zenith".into() }).await.unwrap();

        for price in [10.0, 20.0, 30.0] {
            FlightRepository::save(&store, FlightRecord::insert(draft("NYC", price), &acme)).await.unwrap();
        }
        FlightRepository::save(&store, FlightRecord::insert(draft("NYC", 40.0), &zen)).await.unwrap();

        assert_eq!(store.delete_with_flights(acme.id).await.unwrap(), Some(3));
        assert!(store.find_by_airline(acme.id).await.unwrap().is_empty());
        assert_eq!(FlightRepository::find_all(&store).await.unwrap().len(), 1);
        assert_eq!(store.delete_with_flights(acme.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_adjust_seats_is_checked() {
        let store = MemoryStore::new();
        let airline = AirlineRepository::save(&store, NewAirline { name: "Acme".into() }).await.unwrap();
        let flight = FlightRepository::save(&store, FlightRecord::insert(draft("NYC", 10.0), &airline))
            .await
            .unwrap();

        let updated = store.adjust_available_seats(flight.id, -4).await.unwrap().unwrap();
        assert_eq!(updated.available_seats, 6);

        assert!(store.adjust_available_seats(flight.id, -7).await.is_err());
        let unchanged = FlightRepository::find_by_id(&store, flight.id).await.unwrap().unwrap();
        assert_eq!(unchanged.available_seats, 6);

        assert!(store.adjust_available_seats(404, -1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_usernames_are_unique() {
        let store = MemoryStore::new();
        store.create("alice", "hash").await.unwrap();
        let err = store.create("alice", "other").await.unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
        assert!(store.find_by_username("alice").await.unwrap().is_some());
        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }
}
