use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::features::address_form::cascade::{AddressCascade, ChangeOrigin, Effect};
use crate::features::address_form::models::{AddressValue, FieldConfig, FormView};
use crate::features::address_form::sync::ValueSynchronizer;
use crate::features::postal_codes::clients::KodeposClient;
use crate::features::postal_codes::services::PostalResolverService;
use crate::features::regions::clients::{RegionDirectory, WilayahApiClient};
use crate::features::regions::models::RegionLevel;

/// Owns the cascade, the external data sources, and the outward
/// emission channel, and runs the effects the state machine requests.
///
/// All methods absorb external failure: a dead region directory means an
/// empty dropdown, a dead postal service means a blank code. Nothing
/// here returns an error to the host after construction.
pub struct AddressFormService {
    cascade: AddressCascade,
    synchronizer: ValueSynchronizer,
    regions: Arc<dyn RegionDirectory>,
    resolver: PostalResolverService,
    emissions: mpsc::UnboundedSender<AddressValue>,
}

impl AddressFormService {
    /// Wire up with explicit data sources. Returns the service and the
    /// receiver on which every settled `AddressValue` arrives.
    pub fn new(
        regions: Arc<dyn RegionDirectory>,
        resolver: PostalResolverService,
        config: FieldConfig,
    ) -> (Self, mpsc::UnboundedReceiver<AddressValue>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                cascade: AddressCascade::new(config),
                synchronizer: ValueSynchronizer::new(),
                regions,
                resolver,
                emissions: tx,
            },
            rx,
        )
    }

    /// Wire up against the configured live endpoints.
    pub fn from_config(
        config: &Config,
        field_config: FieldConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<AddressValue>)> {
        let regions = Arc::new(WilayahApiClient::new(&config.regions)?);
        let resolver = PostalResolverService::new(
            Arc::new(KodeposClient::new(config.postal.primary_base_url.clone())?),
            Arc::new(KodeposClient::new(config.postal.fallback_base_url.clone())?),
        );
        Ok(Self::new(regions, resolver, field_config))
    }

    /// Load the province list. Call once when the form mounts.
    pub async fn mount(&mut self) {
        let effects = self.cascade.load_provinces();
        self.run_effects(effects).await;
    }

    pub async fn select_province(&mut self, id: Option<&str>) {
        self.select(RegionLevel::Province, id).await;
    }

    pub async fn select_city(&mut self, id: Option<&str>) {
        self.select(RegionLevel::Regency, id).await;
    }

    pub async fn select_district(&mut self, id: Option<&str>) {
        self.select(RegionLevel::District, id).await;
    }

    pub async fn select_village(&mut self, id: Option<&str>) {
        self.select(RegionLevel::Village, id).await;
    }

    async fn select(&mut self, level: RegionLevel, id: Option<&str>) {
        let effects = self.cascade.select(level, id, ChangeOrigin::UserDriven);
        self.run_effects(effects).await;
    }

    pub async fn set_detail_address(&mut self, text: &str) {
        let effects = self.cascade.set_detail_address(text);
        self.run_effects(effects).await;
    }

    pub async fn set_postal_code(&mut self, code: &str) {
        let effects = self.cascade.set_postal_code(code);
        self.run_effects(effects).await;
    }

    /// Reconcile an externally supplied value (e.g. a saved order being
    /// edited) into the selection. Resolution is staged across the
    /// fetches it triggers and never produces emissions of its own.
    pub async fn sync_value(&mut self, incoming: &AddressValue) {
        let effects = self.synchronizer.reconcile(&mut self.cascade, incoming);
        self.run_effects(effects).await;
    }

    pub fn set_field_config(&mut self, config: FieldConfig) {
        self.cascade.set_config(config);
    }

    pub fn view(&self) -> FormView {
        self.cascade.view()
    }

    pub fn value(&self) -> AddressValue {
        self.cascade.value()
    }

    pub fn cascade(&self) -> &AddressCascade {
        &self.cascade
    }

    /// Drain the effect queue. Completed fetches may wake the
    /// synchronizer, whose next pass can enqueue further effects.
    async fn run_effects(&mut self, effects: Vec<Effect>) {
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Fetch {
                    level,
                    parent_id,
                    generation,
                } => {
                    let fetched = match &parent_id {
                        None => self.regions.provinces().await,
                        Some(parent) => self.regions.children(level, parent).await,
                    };
                    let nodes = match fetched {
                        Ok(nodes) => nodes,
                        Err(e) => {
                            // Degrade to an empty dropdown; the form
                            // stays usable.
                            tracing::warn!(
                                "Fetching {} list failed, leaving it empty: {}",
                                level.label(),
                                e
                            );
                            Vec::new()
                        }
                    };
                    queue.extend(self.cascade.complete_fetch(level, generation, nodes));
                    queue.extend(self.synchronizer.resume(&mut self.cascade));
                }
                Effect::ResolvePostal {
                    village,
                    district,
                    generation,
                } => {
                    let code = self.resolver.resolve(&village, &district).await;
                    queue.extend(self.cascade.apply_postal_result(generation, code));
                }
                Effect::Emit(value) => {
                    // A closed receiver just means the host unmounted.
                    let _ = self.emissions.send(value);
                }
            }
        }
    }
}
