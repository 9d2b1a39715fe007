mod address;
mod client;
mod property;

pub use address::{format_address, is_eligible_for_distance, AddressFragment};
pub use client::{ClientRecord, ClientStatus, PersonType};
pub use property::PropertyRecord;
