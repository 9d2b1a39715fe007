//! Client directory core: an in-memory query engine over client records and an
//! estimator for the distance between a property address and a fixed reference point.

pub mod config;
pub mod directory;
pub mod error;
pub mod geo;
pub mod models;
pub mod store;

pub use directory::{query_clients, ClientPage, Criteria, Stats};
pub use error::DirectoryError;
pub use geo::{estimate_distance, DistanceEstimator, DistanceSettings};
pub use models::{
    format_address, is_eligible_for_distance, AddressFragment, ClientRecord, ClientStatus,
    PersonType, PropertyRecord,
};
