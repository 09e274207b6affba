//! Postal code (kodepos) lookup feature.
//!
//! Search clients for the primary and fallback kodepos services and the
//! best-effort resolver that tries a declarative ladder of strategies
//! once a village is chosen. Lookup failure is never an error for the
//! host; the form degrades to manual entry.

pub mod clients;
pub mod models;
pub mod services;

pub use services::PostalResolverService;
