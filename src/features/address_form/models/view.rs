use serde::Serialize;

/// Affordances for one form control, derived from the cascade state and
/// the host's `FieldConfig` on every `view()` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub visible: bool,
    pub enabled: bool,
    pub loading: bool,
    pub required: bool,
    /// Parent-specific "not yet available" hint, or the manual-entry
    /// prompt on the postal-code field.
    pub hint: Option<String>,
    /// Host-supplied validation error (detail-address field only).
    pub error: Option<String>,
}

/// Snapshot of every control's state for the host to render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub province: FieldView,
    pub city: FieldView,
    pub district: FieldView,
    pub village: FieldView,
    pub detail_address: FieldView,
    pub postal_code: FieldView,
}
