mod address_value;
mod field_config;
mod view;

pub use address_value::AddressValue;
pub use field_config::FieldConfig;
pub use view::{FieldView, FormView};
