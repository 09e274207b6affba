mod address_form_service;

pub use address_form_service::AddressFormService;
