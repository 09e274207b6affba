//! Headless cascading address selector for Indonesian order forms.
//!
//! A merchant-facing form needs a four-level region picker (province,
//! city/regency, district, village) backed by an external directory,
//! reconciliation of previously saved addresses back into the picker,
//! and a best-effort postal code guess once a village is chosen. This
//! crate implements that component without any UI framework: the host
//! drives it with selection calls and renders the [`FormView`] snapshot,
//! and receives every settled [`AddressValue`] on a channel.
//!
//! ```no_run
//! use alamat_cascade::core::config::Config;
//! use alamat_cascade::{AddressFormService, FieldConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
//! let (mut form, mut values) =
//!     AddressFormService::from_config(&config, FieldConfig::default())?;
//! form.mount().await;
//! form.select_province(Some("51")).await;
//! while let Some(value) = values.recv().await {
//!     println!("{}", value.full_address);
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod features;
pub mod shared;

pub use features::address_form::{
    AddressCascade, AddressFormService, AddressValue, ChangeOrigin, Effect, FieldConfig,
    FieldView, FormView, SyncFingerprint, ValueSynchronizer,
};
pub use features::postal_codes::PostalResolverService;
pub use features::regions::clients::{RegionDirectory, WilayahApiClient};
pub use features::regions::models::{RegionLevel, RegionNode};
