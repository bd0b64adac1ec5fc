pub mod catalog;
pub mod merge;
pub mod registry;
pub mod search;
pub mod view;

#[cfg(test)]
pub(crate) mod fixtures;

pub use catalog::FlightCatalog;
pub use merge::UpdateMerger;
pub use registry::AirlineRegistry;
pub use search::SearchFilter;
pub use view::FlightViewMapper;
