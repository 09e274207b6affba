mod kodepos_client;

pub use kodepos_client::{KodeposClient, PostalCodeSearch};
