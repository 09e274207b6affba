use serde::{Deserialize, Serialize};

/// The address exchanged with the host application. Region fields hold
/// resolved display names (Title Cased), never ids. `full_address` is
/// derived; it is recomputed from the other fields on every build and is
/// never edited independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressValue {
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub village: String,
    #[serde(default)]
    pub detail_address: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub full_address: String,
}

impl AddressValue {
    /// Build a value with `full_address` derived from the parts.
    pub fn compose(
        province: String,
        city: String,
        district: String,
        village: String,
        detail_address: String,
        postal_code: String,
    ) -> Self {
        let full_address = join_full_address(&[
            &detail_address,
            &village,
            &district,
            &city,
            &province,
            &postal_code,
        ]);
        Self {
            province,
            city,
            district,
            village,
            detail_address,
            postal_code,
            full_address,
        }
    }
}

/// Comma-join the non-empty parts in the fixed order
/// [detail, village, district, city, province, postal code].
fn join_full_address(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
