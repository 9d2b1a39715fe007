//! In-memory filtering, sorting and pagination of the client collection.

mod collation;
mod criteria;
mod query;

pub use collation::compare_names;
pub use criteria::{
    Criteria, PersonTypeFilter, SortDirection, SortKey, StatusFilter, DEFAULT_PAGE_SIZE,
};
pub use query::{compute_stats, query_clients, ClientPage, Stats};
