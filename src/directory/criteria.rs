use std::cmp::Ordering;

use clap::ValueEnum;

use super::collation::compare_names;
use crate::models::{ClientRecord, ClientStatus, PersonType};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PersonTypeFilter {
    #[default]
    All,
    Individual,
    Organization,
}

impl PersonTypeFilter {
    pub fn accepts(&self, person_type: PersonType) -> bool {
        match self {
            PersonTypeFilter::All => true,
            PersonTypeFilter::Individual => person_type == PersonType::Individual,
            PersonTypeFilter::Organization => person_type == PersonType::Organization,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn accepts(&self, status: ClientStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == ClientStatus::Active,
            StatusFilter::Inactive => status == ClientStatus::Inactive,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    #[default]
    Name,
    RegistrationDate,
    Status,
}

impl SortKey {
    /// Ascending order of two clients under this key
    pub fn compare(&self, a: &ClientRecord, b: &ClientRecord) -> Ordering {
        match self {
            SortKey::Name => compare_names(&a.legal_name, &b.legal_name),
            SortKey::RegistrationDate => a.registered_on.cmp(&b.registered_on),
            SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Filter, sort and page selection for one query
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    pub term: String,
    pub person_type: PersonTypeFilter,
    pub status: StatusFilter,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    /// 1-based; `0` is treated as `1`
    pub page_number: usize,
    pub page_size: usize,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            term: String::new(),
            person_type: PersonTypeFilter::All,
            status: StatusFilter::All,
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Ascending,
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Criteria {
    pub fn compare(&self, a: &ClientRecord, b: &ClientRecord) -> Ordering {
        let ordering = self.sort_key.compare(a, b);
        match self.sort_direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn effective_page_number(&self) -> usize {
        self.page_number.max(1)
    }

    /// Whether a client passes the term, person-type and status filters
    pub fn matches(&self, client: &ClientRecord) -> bool {
        self.matches_term(client)
            && self.person_type.accepts(client.person_type)
            && self.status.accepts(client.status)
    }

    pub fn matches_term(&self, client: &ClientRecord) -> bool {
        if self.term.is_empty() {
            return true;
        }

        if client.tax_id.contains(&self.term) {
            return true;
        }

        let needle = self.term.to_lowercase();
        [
            Some(&client.legal_name),
            client.trade_name.as_ref(),
            client.email.as_ref(),
            client.phone.as_ref(),
            client.mobile.as_ref(),
            client.municipality.as_ref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}
