use crate::features::address_form::cascade::{AddressCascade, ChangeOrigin, Effect};
use crate::features::address_form::models::AddressValue;
use crate::features::regions::models::{RegionLevel, RegionNode};
use crate::shared::text::names_match;

/// Comparison key over the four region-name fields of an incoming value,
/// used to skip reconciliation when the host re-supplies an unchanged
/// value on an irrelevant re-render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFingerprint(String);

impl SyncFingerprint {
    pub fn of(value: &AddressValue) -> Self {
        let key = [
            &value.province,
            &value.city,
            &value.district,
            &value.village,
        ]
        .map(|name| name.trim().to_lowercase())
        .join("\u{1f}");
        Self(key)
    }
}

/// The names still being resolved into id-based selections.
#[derive(Debug, Clone)]
struct SyncTarget {
    names: [String; 4],
}

impl SyncTarget {
    fn of(value: &AddressValue) -> Self {
        Self {
            names: [
                value.province.clone(),
                value.city.clone(),
                value.district.clone(),
                value.village.clone(),
            ],
        }
    }

    fn name_at(&self, level: RegionLevel) -> &str {
        self.names[level.depth()].trim()
    }
}

/// Reconciles an externally supplied `AddressValue` into the cascade's
/// id-based selection. Resolution is staged: at most one level per pass,
/// because a child's option list does not exist until its parent is
/// selected and fetched. Sync-applied selections are tagged
/// `SyncDriven`, so they never echo back out as emissions.
#[derive(Default)]
pub struct ValueSynchronizer {
    last_fingerprint: Option<SyncFingerprint>,
    target: Option<SyncTarget>,
}

impl ValueSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry point for a (possibly re-supplied) external value. Does
    /// nothing when the fingerprint is unchanged; otherwise starts a new
    /// staged resolution and runs its first pass.
    pub fn reconcile(
        &mut self,
        cascade: &mut AddressCascade,
        incoming: &AddressValue,
    ) -> Vec<Effect> {
        let fingerprint = SyncFingerprint::of(incoming);
        if self.last_fingerprint.as_ref() == Some(&fingerprint) {
            return Vec::new();
        }
        self.last_fingerprint = Some(fingerprint);

        cascade.adopt_free_text(&incoming.detail_address, &incoming.postal_code);
        self.target = Some(SyncTarget::of(incoming));
        self.resume(cascade)
    }

    /// Run one resolution pass. The driver calls this again after every
    /// region fetch settles, until the target is fully resolved or a
    /// level fails to match.
    pub fn resume(&mut self, cascade: &mut AddressCascade) -> Vec<Effect> {
        let Some(target) = self.target.clone() else {
            return Vec::new();
        };

        for level in RegionLevel::ALL {
            let wanted = target.name_at(level);
            if wanted.is_empty() {
                // Nothing to resolve here, and deeper names cannot be
                // matched without their ancestor.
                self.finish(cascade);
                return Vec::new();
            }

            if let Some(current) = cascade.selected_name(level) {
                if names_match(current, wanted) {
                    continue;
                }
            }

            if cascade.is_loading(level) {
                // Options are on their way; resume on the next pass.
                cascade.set_sync_pending(true);
                return Vec::new();
            }

            return match find_match(cascade.options(level), wanted) {
                Some(id) => {
                    let deeper = level
                        .child()
                        .map(|child| !target.name_at(child).is_empty())
                        .unwrap_or(false);
                    let effects = cascade.select(level, Some(&id), ChangeOrigin::SyncDriven);
                    if deeper {
                        cascade.set_sync_pending(true);
                    } else {
                        self.finish(cascade);
                    }
                    effects
                }
                None => {
                    // The supplied name does not exist in the fetched
                    // list; halt here, descendants are never guessed.
                    tracing::debug!(
                        "External address sync: no {} named {:?}, stopping resolution",
                        level.label(),
                        wanted
                    );
                    self.finish(cascade);
                    Vec::new()
                }
            };
        }

        // Every level already matches the incoming value.
        self.finish(cascade);
        Vec::new()
    }

    fn finish(&mut self, cascade: &mut AddressCascade) {
        self.target = None;
        cascade.set_sync_pending(false);
    }
}

/// Case-insensitive, whitespace-trimmed lookup of `wanted` in an option
/// list. Accepts the raw fetched name or its Title Case form.
fn find_match(options: &[RegionNode], wanted: &str) -> Option<String> {
    options
        .iter()
        .find(|node| names_match(&node.name, wanted))
        .map(|node| node.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::address_form::models::FieldConfig;

    fn cascade_with_provinces() -> AddressCascade {
        let mut cascade = AddressCascade::new(FieldConfig::default());
        let effects = cascade.load_provinces();
        let generation = match &effects[0] {
            Effect::Fetch { generation, .. } => *generation,
            other => panic!("expected fetch, got {:?}", other),
        };
        cascade.complete_fetch(
            RegionLevel::Province,
            generation,
            vec![RegionNode::new("1", "Bali"), RegionNode::new("2", "Jawa Timur")],
        );
        cascade
    }

    fn incoming(province: &str, city: &str, district: &str, village: &str) -> AddressValue {
        AddressValue {
            province: province.to_string(),
            city: city.to_string(),
            district: district.to_string(),
            village: village.to_string(),
            ..AddressValue::default()
        }
    }

    fn child_fetch_generation(effects: &[Effect], level: RegionLevel) -> u64 {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Fetch {
                    level: l,
                    generation,
                    ..
                } if *l == level => Some(*generation),
                _ => None,
            })
            .expect("child fetch requested")
    }

    #[test]
    fn test_case_insensitive_match_selects_id() {
        let mut cascade = cascade_with_provinces();
        let mut synchronizer = ValueSynchronizer::new();

        synchronizer.reconcile(&mut cascade, &incoming("bali", "", "", ""));
        assert_eq!(cascade.selected_id(RegionLevel::Province), Some("1"));
        assert_eq!(cascade.mode(), ChangeOrigin::SyncDriven);
    }

    #[test]
    fn test_unchanged_fingerprint_is_a_no_op() {
        let mut cascade = cascade_with_provinces();
        let mut synchronizer = ValueSynchronizer::new();

        let value = incoming("Bali", "", "", "");
        synchronizer.reconcile(&mut cascade, &value);
        assert_eq!(cascade.selected_id(RegionLevel::Province), Some("1"));

        // User moves away; an identical incoming value must not fight
        // the edit.
        cascade.select(RegionLevel::Province, Some("2"), ChangeOrigin::UserDriven);
        let effects = synchronizer.reconcile(&mut cascade, &value);
        assert!(effects.is_empty());
        assert_eq!(cascade.selected_id(RegionLevel::Province), Some("2"));
    }

    #[test]
    fn test_detail_fields_adopted_without_emission() {
        let mut cascade = cascade_with_provinces();
        let mut synchronizer = ValueSynchronizer::new();

        let value = AddressValue {
            detail_address: "Jl. Raya No. 5".to_string(),
            postal_code: "80582".to_string(),
            ..incoming("Bali", "", "", "")
        };
        let effects = synchronizer.reconcile(&mut cascade, &value);
        assert!(!effects.iter().any(|e| matches!(e, Effect::Emit(_))));
        assert_eq!(cascade.detail_address(), "Jl. Raya No. 5");
        assert_eq!(cascade.postal_code(), "80582");
    }

    #[test]
    fn test_staged_resolution_one_level_per_pass() {
        let mut cascade = cascade_with_provinces();
        let mut synchronizer = ValueSynchronizer::new();

        let value = incoming("Bali", "Kabupaten Gianyar", "", "");
        let effects = synchronizer.reconcile(&mut cascade, &value);

        // First pass: province applied, regency deferred until its list
        // loads; descendants stay locked meanwhile.
        assert_eq!(cascade.selected_id(RegionLevel::Province), Some("1"));
        assert_eq!(cascade.selected_id(RegionLevel::Regency), None);
        assert!(cascade.sync_pending());

        let generation = child_fetch_generation(&effects, RegionLevel::Regency);
        cascade.complete_fetch(
            RegionLevel::Regency,
            generation,
            vec![
                RegionNode::new("11", "KABUPATEN GIANYAR"),
                RegionNode::new("12", "KABUPATEN BANGLI"),
            ],
        );

        // Second pass, as the driver runs it after the fetch settles.
        synchronizer.resume(&mut cascade);
        assert_eq!(cascade.selected_id(RegionLevel::Regency), Some("11"));
        assert!(!cascade.sync_pending());
    }

    #[test]
    fn test_no_match_halts_resolution() {
        let mut cascade = cascade_with_provinces();
        let mut synchronizer = ValueSynchronizer::new();

        let effects =
            synchronizer.reconcile(&mut cascade, &incoming("Sumatera Barat", "Padang", "", ""));
        assert!(effects.is_empty());
        assert_eq!(cascade.selected_id(RegionLevel::Province), None);
        assert!(!cascade.sync_pending());

        // A later resume does nothing; the target was dropped.
        assert!(synchronizer.resume(&mut cascade).is_empty());
    }

    #[test]
    fn test_resolution_waits_for_loading_list() {
        let mut cascade = AddressCascade::new(FieldConfig::default());
        cascade.load_provinces(); // fetch still in flight
        let mut synchronizer = ValueSynchronizer::new();

        let effects = synchronizer.reconcile(&mut cascade, &incoming("Bali", "", "", ""));
        assert!(effects.iter().all(|e| !matches!(e, Effect::Emit(_))));
        assert_eq!(cascade.selected_id(RegionLevel::Province), None);
        assert!(cascade.sync_pending());
    }

    #[test]
    fn test_sync_never_triggers_postal_resolution() {
        let mut cascade = cascade_with_provinces();
        let mut synchronizer = ValueSynchronizer::new();

        // Walk a full target down to the village.
        let value = incoming("Bali", "Kabupaten Gianyar", "Kecamatan Ubud", "Desa Sukawati");
        let mut effects = synchronizer.reconcile(&mut cascade, &value);
        let fixtures: [(RegionLevel, &str, &str); 3] = [
            (RegionLevel::Regency, "11", "KABUPATEN GIANYAR"),
            (RegionLevel::District, "111", "KECAMATAN UBUD"),
            (RegionLevel::Village, "1111", "DESA SUKAWATI"),
        ];
        for (level, id, name) in fixtures {
            let generation = child_fetch_generation(&effects, level);
            cascade.complete_fetch(level, generation, vec![RegionNode::new(id, name)]);
            effects = synchronizer.resume(&mut cascade);
        }

        assert_eq!(cascade.selected_id(RegionLevel::Village), Some("1111"));
        assert!(!cascade.postal_loading());
        assert!(!effects
            .iter()
            .any(|e| matches!(e, Effect::ResolvePostal { .. })));
    }
}
