use serde::{Deserialize, Serialize};

/// An airline as stored. Its flights are a logical collection, loaded
/// through the flight repository rather than cached here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Airline {
    pub id: i32,
    pub name: String,
}

/// Registration payload; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAirline {
    pub name: String,
}
