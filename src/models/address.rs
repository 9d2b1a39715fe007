use serde::{Deserialize, Serialize};

/// Partial postal address handed to the distance estimator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressFragment {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub region_code: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

impl AddressFragment {
    /// Region code with surrounding whitespace removed, if filled in
    pub fn region(&self) -> Option<&str> {
        filled(&self.region_code)
    }

    pub fn municipality(&self) -> Option<&str> {
        filled(&self.municipality)
    }
}

// Blank strings count as missing.
fn filled(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

/// Whether an address carries enough information to attempt geocoding.
///
/// True iff both municipality and region code are present and non-empty.
pub fn is_eligible_for_distance(address: &AddressFragment) -> bool {
    address.municipality().is_some() && address.region().is_some()
}

/// Join street, number, municipality and region code with `", "`, skipping absent parts
pub fn format_address(address: &AddressFragment) -> String {
    [
        &address.street,
        &address.number,
        &address.municipality,
        &address.region_code,
    ]
    .into_iter()
    .filter_map(|field| field.as_deref().filter(|value| !value.trim().is_empty()))
    .collect::<Vec<_>>()
    .join(", ")
}
