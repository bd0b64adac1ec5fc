pub mod airline_repo;
pub mod app_config;
pub mod database;
pub mod flight_repo;
pub mod memory;
pub mod user_repo;

pub use airline_repo::PgAirlineRepository;
pub use database::DbClient;
pub use flight_repo::PgFlightRepository;
pub use memory::MemoryStore;
pub use user_repo::PgUserRepository;
