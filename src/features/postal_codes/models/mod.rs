mod record;

pub use record::PostalCodeRecord;
