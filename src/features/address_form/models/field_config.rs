use serde::{Deserialize, Serialize};

/// Host-supplied configuration for which of the five logical fields are
/// shown and which are mandatory. Required-ness here is advisory: the
/// host validates; the form only marks controls and renders the host's
/// error string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConfig {
    pub show_province: bool,
    pub show_city: bool,
    pub show_district: bool,
    pub show_village: bool,
    pub show_detail_address: bool,

    pub require_province: bool,
    pub require_city: bool,
    pub require_district: bool,
    pub require_village: bool,
    pub require_detail_address: bool,

    /// Legacy flag: forces detail address to be mandatory regardless of
    /// `require_detail_address`.
    pub required: bool,

    /// Disables every control at once.
    pub disabled: bool,

    /// Host-supplied validation error rendered under the detail-address
    /// field.
    pub detail_address_error: Option<String>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            show_province: true,
            show_city: true,
            show_district: true,
            show_village: true,
            show_detail_address: true,
            require_province: false,
            require_city: false,
            require_district: false,
            require_village: false,
            require_detail_address: false,
            required: false,
            disabled: false,
            detail_address_error: None,
        }
    }
}

impl FieldConfig {
    /// Effective mandatory-ness of the detail-address field.
    pub fn detail_address_required(&self) -> bool {
        self.require_detail_address || self.required
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_required_forces_detail_address() {
        let config = FieldConfig {
            required: true,
            ..FieldConfig::default()
        };
        assert!(config.detail_address_required());
        assert!(!config.require_detail_address);
    }
}
