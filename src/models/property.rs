use serde::{Deserialize, Serialize};

use super::{AddressFragment, ClientRecord};
use crate::error::DirectoryError;

/// A property owned by a client.
///
/// `distance_km` is the rounded distance to the reference point, `0` until computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    #[serde(default)]
    pub id: Option<i32>,
    pub client_id: i32,
    pub name: String,
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
    #[serde(default)]
    pub distance_km: u32,
    #[serde(default)]
    pub notes: String,
}

impl PropertyRecord {
    /// Start a new property for a client that has already been saved
    pub fn for_client(client: &ClientRecord) -> Result<Self, DirectoryError> {
        let client_id = client
            .id
            .ok_or_else(|| DirectoryError::UnsavedClient(client.legal_name.clone()))?;

        Ok(Self {
            id: None,
            client_id,
            name: String::new(),
            street: None,
            number: None,
            postal_code: None,
            district: None,
            municipality: None,
            region_code: None,
            distance_km: 0,
            notes: String::new(),
        })
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonType;
    use chrono::NaiveDate;

    fn client() -> ClientRecord {
        let date = NaiveDate::from_ymd_opt(2022, 1, 15).unwrap();
        ClientRecord::new("Fazenda Boa Vista", "11222333000144", date, PersonType::Organization)
    }

    #[test]
    fn unsaved_client_cannot_own_property() {
        let err = PropertyRecord::for_client(&client()).unwrap_err();
        assert!(matches!(err, DirectoryError::UnsavedClient(name) if name == "Fazenda Boa Vista"));
    }

    #[test]
    fn saved_client_owns_new_property() {
        let mut owner = client();
        owner.id = Some(7);

        let property = PropertyRecord::for_client(&owner).unwrap();
        assert_eq!(property.client_id, 7);
        assert_eq!(property.distance_km, 0);
        assert!(property.id.is_none());
    }
}
