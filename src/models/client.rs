use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::AddressFragment;

/// Legal nature of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonType {
    Individual,
    Organization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientStatus {
    Active,
    Inactive,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "Active",
            ClientStatus::Inactive => "Inactive",
        }
    }
}

/// A registered client of the directory.
///
/// `id` is only present once the persistence layer has saved the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(default)]
    pub id: Option<i32>,
    pub legal_name: String,
    #[serde(default)]
    pub trade_name: Option<String>,
    pub person_type: PersonType,
    pub tax_id: String,
    pub registered_on: NaiveDate,
    pub status: ClientStatus,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub region_code: Option<String>,
}

impl ClientRecord {
    /// Create an unsaved, active client with every optional field empty
    pub fn new(
        legal_name: impl Into<String>,
        tax_id: impl Into<String>,
        registered_on: NaiveDate,
        person_type: PersonType,
    ) -> Self {
        Self {
            id: None,
            legal_name: legal_name.into(),
            trade_name: None,
            person_type,
            tax_id: tax_id.into(),
            registered_on,
            status: ClientStatus::Active,
            phone: None,
            mobile: None,
            email: None,
            street: None,
            number: None,
            postal_code: None,
            district: None,
            municipality: None,
            region_code: None,
        }
    }

    pub fn address(&self) -> AddressFragment {
        AddressFragment {
            street: self.street.clone(),
            number: self.number.clone(),
            municipality: self.municipality.clone(),
            region_code: self.region_code.clone(),
            postal_code: self.postal_code.clone(),
        }
    }
}
