use async_trait::async_trait;

use crate::airline::{Airline, NewAirline};
use crate::flight::{Flight, FlightRecord};
use crate::search::FlightSearchCriteria;
use crate::user::UserAccount;
use crate::CoreResult;

/// Repository trait for airline data access
#[async_trait]
pub trait AirlineRepository: Send + Sync {
    async fn save(&self, airline: NewAirline) -> CoreResult<Airline>;

    /// Returns `None` when no airline has this id.
    async fn rename(&self, id: i32, name: &str) -> CoreResult<Option<Airline>>;

    async fn find_by_id(&self, id: i32) -> CoreResult<Option<Airline>>;

    async fn find_all(&self) -> CoreResult<Vec<Airline>>;

    /// Deletes every flight owned by the airline, then the airline itself,
    /// as one unit of work. Returns the number of flights removed, or
    /// `None` when the airline does not exist (nothing is deleted).
    async fn delete_with_flights(&self, id: i32) -> CoreResult<Option<u64>>;
}

/// Repository trait for flight data access
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Inserts when `record.id` is `None`, otherwise overwrites every field.
    async fn save(&self, record: FlightRecord) -> CoreResult<Flight>;

    async fn find_by_id(&self, id: i32) -> CoreResult<Option<Flight>>;

    /// All flights in store order (ascending id).
    async fn find_all(&self) -> CoreResult<Vec<Flight>>;

    async fn find_by_airline(&self, airline_id: i32) -> CoreResult<Vec<Flight>>;

    /// Returns false when no flight had this id.
    async fn delete_by_id(&self, id: i32) -> CoreResult<bool>;

    /// Push-down filter with wildcard-on-empty semantics.
    async fn search_flights(&self, criteria: &FlightSearchCriteria) -> CoreResult<Vec<Flight>>;

    /// Read-modify-write of the available seat count inside one unit of
    /// work. Results outside `[0, total_seats]` are rejected.
    async fn adjust_available_seats(&self, id: i32, delta: i32) -> CoreResult<Option<Flight>>;
}

/// Repository trait for login accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the username is taken.
    async fn create(&self, username: &str, password_hash: &str) -> CoreResult<UserAccount>;

    async fn find_by_username(&self, username: &str) -> CoreResult<Option<UserAccount>>;
}
