use std::sync::Arc;

use aerodesk_catalog::{AirlineRegistry, FlightCatalog, SearchFilter, UpdateMerger};
use aerodesk_core::repository::{AirlineRepository, FlightRepository, UserRepository};
use aerodesk_store::{DbClient, MemoryStore, PgAirlineRepository, PgFlightRepository, PgUserRepository};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
    pub bcrypt_cost: u32,
}

#[derive(Clone)]
pub struct AppState {
    pub registry: AirlineRegistry,
    pub catalog: FlightCatalog,
    pub search: SearchFilter,
    pub merger: UpdateMerger,
    pub users: Arc<dyn UserRepository>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(
        airlines: Arc<dyn AirlineRepository>,
        flights: Arc<dyn FlightRepository>,
        users: Arc<dyn UserRepository>,
        auth: AuthConfig,
    ) -> Self {
        let catalog = FlightCatalog::new(flights.clone());
        Self {
            registry: AirlineRegistry::new(airlines, flights.clone()),
            search: SearchFilter::new(flights),
            merger: UpdateMerger::new(catalog.clone()),
            catalog,
            users,
            auth,
        }
    }

    pub fn postgres(db: &DbClient, auth: AuthConfig) -> Self {
        Self::new(
            Arc::new(PgAirlineRepository::new(db.pool.clone())),
            Arc::new(PgFlightRepository::new(db.pool.clone())),
            Arc::new(PgUserRepository::new(db.pool.clone())),
            auth,
        )
    }

    pub fn in_memory(auth: AuthConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store.clone(), store, auth)
    }
}
