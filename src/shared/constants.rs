/// Hint shown on a level control while its parent is unselected.
pub const HINT_SELECT_PROVINCE_FIRST: &str = "Select a province first";
pub const HINT_SELECT_CITY_FIRST: &str = "Select a city/regency first";
pub const HINT_SELECT_DISTRICT_FIRST: &str = "Select a district first";

/// Shown under the postal-code field when every lookup attempt came back
/// empty for the chosen village.
pub const HINT_POSTAL_NOT_FOUND: &str = "Postal code not found, please fill it in manually";

/// User agent for outbound lookups.
pub const HTTP_USER_AGENT: &str = "AlamatCascade/1.0 (order-form address selector)";
