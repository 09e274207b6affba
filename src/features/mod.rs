pub mod address_form;
pub mod postal_codes;
pub mod regions;
