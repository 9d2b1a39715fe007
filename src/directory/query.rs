use tracing::debug;

use super::criteria::Criteria;
use crate::models::{ClientRecord, ClientStatus, PersonType};

/// Counts over the whole collection, independent of any criteria
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub individuals: usize,
    pub organizations: usize,
}

/// One page of matching clients
#[derive(Debug, Clone)]
pub struct ClientPage<'a> {
    pub page: Vec<&'a ClientRecord>,
    pub total_matching: usize,
    pub page_number: usize,
    pub page_size: usize,
    pub stats: Stats,
}

impl ClientPage<'_> {
    /// Number of pages the matching set spans
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total_matching.div_ceil(self.page_size)
    }
}

pub fn compute_stats(all: &[ClientRecord]) -> Stats {
    all.iter().fold(
        Stats {
            total: all.len(),
            ..Default::default()
        },
        |mut stats, client| {
            match client.status {
                ClientStatus::Active => stats.active += 1,
                ClientStatus::Inactive => stats.inactive += 1,
            }
            match client.person_type {
                PersonType::Individual => stats.individuals += 1,
                PersonType::Organization => stats.organizations += 1,
            }
            stats
        },
    )
}

/// Filter, sort and paginate the client collection.
///
/// Filters run in a fixed order (term, person type, status) before a stable sort, so
/// clients with equal keys keep their order from `all`. A page past the end is empty.
pub fn query_clients<'a>(all: &'a [ClientRecord], criteria: &Criteria) -> ClientPage<'a> {
    let mut matching: Vec<&ClientRecord> = all
        .iter()
        .filter(|client| criteria.matches_term(client))
        .filter(|client| criteria.person_type.accepts(client.person_type))
        .filter(|client| criteria.status.accepts(client.status))
        .collect();

    matching.sort_by(|a, b| criteria.compare(a, b));

    let total_matching = matching.len();
    let page_number = criteria.effective_page_number();
    let start = (page_number - 1).saturating_mul(criteria.page_size);

    let page: Vec<&ClientRecord> = matching
        .into_iter()
        .skip(start)
        .take(criteria.page_size)
        .collect();

    debug!(
        term = %criteria.term,
        total_matching,
        page_number,
        returned = page.len(),
        "queried clients"
    );

    ClientPage {
        page,
        total_matching,
        page_number,
        page_size: criteria.page_size,
        stats: compute_stats(all),
    }
}
