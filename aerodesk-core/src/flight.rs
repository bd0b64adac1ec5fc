use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::airline::Airline;
use crate::fare_class::AirlineClass;

/// A scheduled flight with its owning airline resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flight {
    pub id: i32,
    pub enterprise: String,
    pub base_price: f64,
    pub source: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_date: NaiveDate,
    pub arrival_time: NaiveTime,
    /// Minutes in the air.
    pub duration: i32,
    pub total_seats: i32,
    pub available_seats: i32,
    pub class_name: AirlineClass,
    pub airline: Airline,
}

/// Every mutable field of a flight, as supplied on create or on a full update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightDraft {
    pub enterprise: String,
    pub base_price: f64,
    pub source: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_date: NaiveDate,
    pub arrival_time: NaiveTime,
    pub duration: i32,
    pub total_seats: i32,
    pub available_seats: i32,
    pub class_name: AirlineClass,
}

/// Update records carry the same fields as drafts; updates replace all of them.
pub type FlightUpdate = FlightDraft;

/// Row handed to a flight repository. `id: None` inserts, `Some` overwrites.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRecord {
    pub id: Option<i32>,
    pub fields: FlightDraft,
    pub airline_id: i32,
}

/// Flattened presentation record: the airline reference becomes its name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightView {
    pub id: i32,
    pub enterprise: String,
    pub base_price: f64,
    pub source: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_date: NaiveDate,
    pub arrival_time: NaiveTime,
    pub duration: i32,
    pub total_seats: i32,
    pub available_seats: i32,
    pub class_name: AirlineClass,
    pub airline_name: String,
}

impl Flight {
    pub fn from_parts(id: i32, fields: FlightDraft, airline: Airline) -> Self {
        let FlightDraft {
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
        } = fields;

        Self {
            id,
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
            airline,
        }
    }

    pub fn fields(&self) -> FlightDraft {
        FlightDraft {
            enterprise: self.enterprise.clone(),
            base_price: self.base_price,
            source: self.source.clone(),
            destination: self.destination.clone(),
            departure_date: self.departure_date,
            departure_time: self.departure_time,
            arrival_date: self.arrival_date,
            arrival_time: self.arrival_time,
            duration: self.duration,
            total_seats: self.total_seats,
            available_seats: self.available_seats,
            class_name: self.class_name,
        }
    }

    /// Record that overwrites this flight in place.
    pub fn to_record(&self) -> FlightRecord {
        FlightRecord {
            id: Some(self.id),
            fields: self.fields(),
            airline_id: self.airline.id,
        }
    }
}

impl FlightRecord {
    pub fn insert(fields: FlightDraft, airline: &Airline) -> Self {
        Self {
            id: None,
            fields,
            airline_id: airline.id,
        }
    }
}
