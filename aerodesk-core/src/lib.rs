pub mod airline;
pub mod fare_class;
pub mod flight;
pub mod inventory;
pub mod repository;
pub mod search;
pub mod user;

pub use airline::{Airline, NewAirline};
pub use fare_class::{AirlineClass, FareClassInfo};
pub use flight::{Flight, FlightDraft, FlightRecord, FlightUpdate, FlightView};
pub use search::FlightSearchCriteria;
pub use user::UserAccount;

use std::fmt;

/// Entity kinds that can be looked up by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Airline,
    Flight,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Airline => f.write_str("Airline"),
            EntityKind::Flight => f.write_str("Flight"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{kind} not found by id: {id}")]
    NotFound { kind: EntityKind, id: i32 },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CoreError {
    pub fn flight_not_found(id: i32) -> Self {
        CoreError::NotFound { kind: EntityKind::Flight, id }
    }

    pub fn airline_not_found(id: i32) -> Self {
        CoreError::NotFound { kind: EntityKind::Airline, id }
    }

    /// Wraps an infrastructure failure without interpreting it.
    pub fn store<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        CoreError::Store(err.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_kind_and_id() {
        let err = CoreError::flight_not_found(42);
        assert_eq!(err.to_string(), "Flight not found by id: 42");

        let err = CoreError::airline_not_found(3);
        assert_eq!(err.to_string(), "Airline not found by id: 3");
    }

    #[test]
    fn test_store_error_keeps_source() {
        let err = CoreError::store("connection reset");
        assert!(matches!(err, CoreError::Store(_)));
        assert_eq!(err.to_string(), "Store error: connection reset");
    }
}
