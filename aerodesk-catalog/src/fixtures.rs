use std::sync::Arc;

use aerodesk_core::{AirlineClass, FlightDraft};
use aerodesk_store::MemoryStore;
use chrono::{NaiveDate, NaiveTime};

use crate::{AirlineRegistry, FlightCatalog, SearchFilter, UpdateMerger};

pub(crate) struct Services {
    pub registry: AirlineRegistry,
    pub catalog: FlightCatalog,
    pub search: SearchFilter,
    pub merger: UpdateMerger,
}

pub(crate) fn services() -> Services {
    let store = Arc::new(MemoryStore::new());
    let catalog = FlightCatalog::new(store.clone());
    Services {
        registry: AirlineRegistry::new(store.clone(), store.clone()),
        search: SearchFilter::new(store),
        merger: UpdateMerger::new(catalog.clone()),
        catalog,
    }
}

pub(crate) fn draft(source: &str, destination: &str, price: f64, class_name: AirlineClass) -> FlightDraft {
    FlightDraft {
        enterprise: "Acme Operations".into(),
        base_price: price,
        source: source.into(),
        destination: destination.into(),
        departure_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        departure_time: NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
        arrival_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        arrival_time: NaiveTime::from_hms_opt(21, 45, 0).unwrap(),
        duration: 450,
        total_seats: 180,
        available_seats: 150,
        class_name,
    }
}
