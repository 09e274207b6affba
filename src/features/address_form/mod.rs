//! The cascading address form feature.
//!
//! Four-level lazy-loaded selection (province, city/regency, district,
//! village) with:
//!
//! - a pure, effect-returning cascade state machine whose invariant is
//!   that selecting any level clears every descendant's selection and
//!   option list before anything else happens;
//! - staged reconciliation of an externally supplied, name-based
//!   `AddressValue` into the id-based selection (one level per pass,
//!   never echoed back as an emission);
//! - best-effort postal code resolution on explicit village choices;
//! - an outward emission of the complete resolved `AddressValue` after
//!   every settled user-driven change.

pub mod cascade;
pub mod models;
pub mod services;
pub mod sync;

pub use cascade::{AddressCascade, ChangeOrigin, Effect};
pub use models::{AddressValue, FieldConfig, FieldView, FormView};
pub use services::AddressFormService;
pub use sync::{SyncFingerprint, ValueSynchronizer};
