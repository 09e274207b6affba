use crate::features::address_form::models::{AddressValue, FieldConfig, FieldView, FormView};
use crate::features::regions::models::{sort_by_name, RegionLevel, RegionNode};
use crate::shared::constants::{
    HINT_POSTAL_NOT_FOUND, HINT_SELECT_CITY_FIRST, HINT_SELECT_DISTRICT_FIRST,
    HINT_SELECT_PROVINCE_FIRST,
};

/// Whether the most recent mutation came from direct user interaction or
/// from reconciling an externally supplied value. A `SyncDriven`
/// transition is exactly one level deep, suppresses the outward emission
/// it would otherwise cause, and the mode reverts to `UserDriven` on the
/// next user-originated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    UserDriven,
    SyncDriven,
}

/// Side effects a state transition asks the driver to perform. Fetches
/// carry the parent id and a per-level generation token; the cascade
/// discards results whose generation no longer matches, so a stale fetch
/// can never populate a level that has since moved on.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch {
        level: RegionLevel,
        /// `None` only for the province fetch.
        parent_id: Option<String>,
        generation: u64,
    },
    ResolvePostal {
        village: String,
        district: String,
        generation: u64,
    },
    Emit(AddressValue),
}

/// Per-level lazy-loaded option list and selection.
/// Lifecycle: Empty (no parent) -> Loading -> Loaded(list) -> selected;
/// back to Empty whenever the parent leaves selection.
#[derive(Debug, Default)]
struct LevelSlot {
    options: Vec<RegionNode>,
    selected: Option<String>,
    loading: bool,
    generation: u64,
}

impl LevelSlot {
    /// Reset to Empty. Bumping the generation invalidates any in-flight
    /// fetch for this level.
    fn clear(&mut self) {
        self.options.clear();
        self.selected = None;
        self.loading = false;
        self.generation += 1;
    }

    fn selected_node(&self) -> Option<&RegionNode> {
        let id = self.selected.as_deref()?;
        self.options.iter().find(|n| n.id == id)
    }
}

/// The four-level cascade state machine. Pure and synchronous: every
/// operation returns the effects the driver must run, which makes the
/// clearing invariant, generation discard, and emission suppression
/// directly assertable.
pub struct AddressCascade {
    levels: [LevelSlot; 4],
    detail_address: String,
    postal_code: String,
    postal_loading: bool,
    postal_not_found: bool,
    postal_generation: u64,
    mode: ChangeOrigin,
    /// A staged external sync still has unresolved lower levels; their
    /// controls are reported disabled so the user cannot race the sync.
    sync_pending: bool,
    config: FieldConfig,
}

impl AddressCascade {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            levels: Default::default(),
            detail_address: String::new(),
            postal_code: String::new(),
            postal_loading: false,
            postal_not_found: false,
            postal_generation: 0,
            mode: ChangeOrigin::UserDriven,
            sync_pending: false,
            config,
        }
    }

    fn slot(&self, level: RegionLevel) -> &LevelSlot {
        &self.levels[level.depth()]
    }

    fn slot_mut(&mut self, level: RegionLevel) -> &mut LevelSlot {
        &mut self.levels[level.depth()]
    }

    // ==================== Accessors ====================

    pub fn mode(&self) -> ChangeOrigin {
        self.mode
    }

    pub fn sync_pending(&self) -> bool {
        self.sync_pending
    }

    pub fn options(&self, level: RegionLevel) -> &[RegionNode] {
        &self.slot(level).options
    }

    pub fn selected_id(&self, level: RegionLevel) -> Option<&str> {
        self.slot(level).selected.as_deref()
    }

    /// Raw fetched name of the current selection at `level`.
    pub fn selected_name(&self, level: RegionLevel) -> Option<&str> {
        self.slot(level).selected_node().map(|n| n.name.as_str())
    }

    pub fn is_loading(&self, level: RegionLevel) -> bool {
        self.slot(level).loading
    }

    pub fn detail_address(&self) -> &str {
        &self.detail_address
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn postal_loading(&self) -> bool {
        self.postal_loading
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: FieldConfig) {
        self.config = config;
    }

    // ==================== Operations ====================

    /// Kick off the province fetch. Invoked once at mount; calling again
    /// resets the whole cascade and re-fetches.
    pub fn load_provinces(&mut self) -> Vec<Effect> {
        for level in RegionLevel::ALL {
            self.slot_mut(level).clear();
        }
        let slot = self.slot_mut(RegionLevel::Province);
        slot.loading = true;
        vec![Effect::Fetch {
            level: RegionLevel::Province,
            parent_id: None,
            generation: slot.generation,
        }]
    }

    /// Select `id` at `level` (or clear it with `None`). Every
    /// descendant level's selection and option list is cleared before
    /// anything else happens; a non-empty selection then requests the
    /// child fetch, and an explicit (user-driven) village choice
    /// requests postal resolution.
    ///
    /// An id that is not in the level's loaded option list behaves as a
    /// clear.
    pub fn select(&mut self, level: RegionLevel, id: Option<&str>, origin: ChangeOrigin) -> Vec<Effect> {
        self.mode = origin;

        let id: Option<String> = id
            .filter(|i| !i.is_empty())
            .filter(|i| self.slot(level).options.iter().any(|n| n.id == *i))
            .map(String::from);

        for descendant in level.descendants() {
            self.slot_mut(descendant).clear();
        }
        self.slot_mut(level).selected = id.clone();

        // A village that is no longer selected has no postal lookup of
        // interest; invalidate any in-flight resolution.
        if self.selected_id(RegionLevel::Village).is_none() && self.postal_loading {
            self.postal_generation += 1;
            self.postal_loading = false;
        }

        // An explicit village choice starts a fresh postal lookup; the
        // previous code is stale for the new village and is cleared
        // before the emission below is built.
        let resolve_postal =
            level == RegionLevel::Village && origin == ChangeOrigin::UserDriven && id.is_some();
        if resolve_postal {
            self.postal_generation += 1;
            self.postal_loading = true;
            self.postal_not_found = false;
            self.postal_code.clear();
        }

        let mut effects = Vec::new();
        if origin == ChangeOrigin::UserDriven {
            effects.push(Effect::Emit(self.value()));
        }

        if let Some(ref selected) = id {
            if let Some(child) = level.child() {
                let child_slot = self.slot_mut(child);
                child_slot.loading = true;
                effects.push(Effect::Fetch {
                    level: child,
                    parent_id: Some(selected.clone()),
                    generation: child_slot.generation,
                });
            }
        }

        if resolve_postal {
            let village = self
                .slot(RegionLevel::Village)
                .selected_node()
                .map(|n| n.display_name())
                .unwrap_or_default();
            let district = self
                .slot(RegionLevel::District)
                .selected_node()
                .map(|n| n.display_name())
                .unwrap_or_default();
            effects.push(Effect::ResolvePostal {
                village,
                district,
                generation: self.postal_generation,
            });
        }

        effects
    }

    /// Apply a finished region fetch. Results from a superseded request
    /// (generation mismatch after the level or an ancestor changed) are
    /// discarded so the UI never shows children of an abandoned parent.
    pub fn complete_fetch(
        &mut self,
        level: RegionLevel,
        generation: u64,
        mut nodes: Vec<RegionNode>,
    ) -> Vec<Effect> {
        let slot = self.slot_mut(level);
        if slot.generation != generation {
            tracing::debug!(
                "Discarding stale {} fetch (generation {} != {})",
                level.label(),
                generation,
                slot.generation
            );
            return Vec::new();
        }
        sort_by_name(&mut nodes);
        slot.options = nodes;
        slot.loading = false;
        Vec::new()
    }

    /// Apply a finished postal resolution. Superseded results (a newer
    /// village selection bumped the generation) are discarded.
    pub fn apply_postal_result(&mut self, generation: u64, code: Option<String>) -> Vec<Effect> {
        if self.postal_generation != generation {
            tracing::debug!("Discarding stale postal resolution");
            return Vec::new();
        }
        self.postal_loading = false;
        match code {
            Some(code) => {
                self.postal_code = code;
                self.postal_not_found = false;
            }
            None => self.postal_not_found = true,
        }
        self.mode = ChangeOrigin::UserDriven;
        vec![Effect::Emit(self.value())]
    }

    /// Free-text detail address; emits on every change, including
    /// repeats of the same text.
    pub fn set_detail_address(&mut self, text: &str) -> Vec<Effect> {
        self.mode = ChangeOrigin::UserDriven;
        self.detail_address = text.to_string();
        vec![Effect::Emit(self.value())]
    }

    /// Manual postal-code entry; clears the not-found hint.
    pub fn set_postal_code(&mut self, code: &str) -> Vec<Effect> {
        self.mode = ChangeOrigin::UserDriven;
        self.postal_code = code.to_string();
        self.postal_not_found = false;
        vec![Effect::Emit(self.value())]
    }

    /// Adopt the free-text fields from an incoming external value
    /// without emitting (sync write, not a user edit).
    pub(crate) fn adopt_free_text(&mut self, detail_address: &str, postal_code: &str) {
        self.mode = ChangeOrigin::SyncDriven;
        self.detail_address = detail_address.to_string();
        if !postal_code.trim().is_empty() {
            self.postal_code = postal_code.to_string();
            self.postal_not_found = false;
        }
    }

    pub(crate) fn set_sync_pending(&mut self, pending: bool) {
        self.sync_pending = pending;
    }

    // ==================== Derived output ====================

    /// The complete address as currently selected, with `full_address`
    /// recomputed from the parts.
    pub fn value(&self) -> AddressValue {
        let display = |level: RegionLevel| {
            self.slot(level)
                .selected_node()
                .map(|n| n.display_name())
                .unwrap_or_default()
        };
        AddressValue::compose(
            display(RegionLevel::Province),
            display(RegionLevel::Regency),
            display(RegionLevel::District),
            display(RegionLevel::Village),
            self.detail_address.clone(),
            self.postal_code.clone(),
        )
    }

    /// Affordances snapshot for the host to render.
    pub fn view(&self) -> FormView {
        let level_view = |level: RegionLevel, visible: bool, required: bool| {
            let slot = self.slot(level);
            let parent_ready = match level.parent() {
                None => true,
                Some(parent) => self.slot(parent).selected.is_some(),
            };
            // While a staged sync is resolving, unselected levels stay
            // locked so the user cannot race the incoming value.
            let sync_blocked = self.sync_pending && slot.selected.is_none();
            let hint = if !parent_ready {
                Some(
                    match level {
                        RegionLevel::Province => "",
                        RegionLevel::Regency => HINT_SELECT_PROVINCE_FIRST,
                        RegionLevel::District => HINT_SELECT_CITY_FIRST,
                        RegionLevel::Village => HINT_SELECT_DISTRICT_FIRST,
                    }
                    .to_string(),
                )
                .filter(|h| !h.is_empty())
            } else {
                None
            };
            FieldView {
                visible,
                enabled: !self.config.disabled && parent_ready && !slot.loading && !sync_blocked,
                loading: slot.loading,
                required,
                hint,
                error: None,
            }
        };

        FormView {
            province: level_view(
                RegionLevel::Province,
                self.config.show_province,
                self.config.require_province,
            ),
            city: level_view(
                RegionLevel::Regency,
                self.config.show_city,
                self.config.require_city,
            ),
            district: level_view(
                RegionLevel::District,
                self.config.show_district,
                self.config.require_district,
            ),
            village: level_view(
                RegionLevel::Village,
                self.config.show_village,
                self.config.require_village,
            ),
            detail_address: FieldView {
                visible: self.config.show_detail_address,
                enabled: !self.config.disabled,
                loading: false,
                required: self.config.detail_address_required(),
                hint: None,
                error: self.config.detail_address_error.clone(),
            },
            postal_code: FieldView {
                visible: true,
                enabled: !self.config.disabled && !self.postal_loading,
                loading: self.postal_loading,
                required: false,
                hint: self
                    .postal_not_found
                    .then(|| HINT_POSTAL_NOT_FOUND.to_string()),
                error: None,
            },
        }
    }
}
