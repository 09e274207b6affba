mod postal_resolver_service;

pub use postal_resolver_service::{PostalResolverService, SearchStrategy};
