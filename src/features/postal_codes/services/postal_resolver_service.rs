use std::sync::Arc;

use crate::features::postal_codes::clients::PostalCodeSearch;
use crate::features::postal_codes::models::PostalCodeRecord;
use crate::shared::text::{strip_district_prefix, strip_village_prefix};

/// One rung of the lookup ladder. Tried in declaration order,
/// short-circuiting on the first strategy that yields a usable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Primary service, `"<village> <district>"`, best-match selection.
    PrimaryCombined,
    /// Fallback service, same query, first usable result.
    FallbackCombined,
    /// Primary service again with the bare village name, preferring a
    /// result whose district field contains the target district.
    PrimaryBareVillage,
}

const LADDER: [SearchStrategy; 3] = [
    SearchStrategy::PrimaryCombined,
    SearchStrategy::FallbackCombined,
    SearchStrategy::PrimaryBareVillage,
];

/// Best-effort postal-code lookup for a chosen village. Never required
/// for submission: total failure resolves to `None` and the user fills
/// the code in manually.
pub struct PostalResolverService {
    primary: Arc<dyn PostalCodeSearch>,
    fallback: Arc<dyn PostalCodeSearch>,
}

impl PostalResolverService {
    pub fn new(primary: Arc<dyn PostalCodeSearch>, fallback: Arc<dyn PostalCodeSearch>) -> Self {
        Self { primary, fallback }
    }

    /// Resolve a postal code for `village` in `district` (display names,
    /// honorific prefixes still attached). Errors at each rung are
    /// absorbed independently so the next rung still runs.
    pub async fn resolve(&self, village: &str, district: &str) -> Option<String> {
        let village = strip_village_prefix(village);
        let district = strip_district_prefix(district);
        if village.is_empty() {
            return None;
        }

        for strategy in LADDER {
            let (service, query) = match strategy {
                SearchStrategy::PrimaryCombined => {
                    (&self.primary, format!("{} {}", village, district))
                }
                SearchStrategy::FallbackCombined => {
                    (&self.fallback, format!("{} {}", village, district))
                }
                SearchStrategy::PrimaryBareVillage => (&self.primary, village.clone()),
            };

            let records = match service.search(query.trim()).await {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!("Postal search step {:?} failed: {}", strategy, e);
                    continue;
                }
            };

            let code = match strategy {
                SearchStrategy::PrimaryCombined => pick_combined(&records, &village, &district),
                SearchStrategy::FallbackCombined => pick_first(&records),
                SearchStrategy::PrimaryBareVillage => pick_bare_village(&records, &district),
            };

            if let Some(code) = code {
                tracing::debug!(
                    "Resolved postal code {} for {} / {} via {:?}",
                    code,
                    village,
                    district,
                    strategy
                );
                return Some(code);
            }
        }

        tracing::debug!("No postal code found for {} / {}", village, district);
        None
    }
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Selection for the combined-query step: exact village+district match,
/// else substring match on village, else the first usable result.
fn pick_combined(records: &[PostalCodeRecord], village: &str, district: &str) -> Option<String> {
    let usable = || records.iter().filter(|r| r.has_code());

    if let Some(exact) = usable().find(|r| eq_ci(&r.village, village) && eq_ci(&r.district, district))
    {
        return Some(exact.code.clone());
    }
    if let Some(partial) = usable().find(|r| contains_ci(&r.village, village)) {
        return Some(partial.code.clone());
    }
    usable().next().map(|r| r.code.clone())
}

/// First result carrying a non-empty code.
fn pick_first(records: &[PostalCodeRecord]) -> Option<String> {
    records.iter().find(|r| r.has_code()).map(|r| r.code.clone())
}

/// Selection for the bare-village step: prefer a result whose district
/// contains the target district, else the first usable result.
fn pick_bare_village(records: &[PostalCodeRecord], district: &str) -> Option<String> {
    let usable = || records.iter().filter(|r| r.has_code());

    if let Some(matched) = usable().find(|r| contains_ci(&r.district, district)) {
        return Some(matched.code.clone());
    }
    usable().next().map(|r| r.code.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{AppError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn record(village: &str, district: &str, code: &str) -> PostalCodeRecord {
        PostalCodeRecord {
            village: village.to_string(),
            district: district.to_string(),
            city: String::new(),
            province: String::new(),
            code: code.to_string(),
        }
    }

    #[test]
    fn test_pick_combined_prefers_exact_match() {
        let records = vec![
            record("Sukawati Kaja", "Sukawati", "80581"),
            record("Sukawati", "Ubud", "80582"),
        ];
        assert_eq!(
            pick_combined(&records, "sukawati", "ubud"),
            Some("80582".to_string())
        );
    }

    #[test]
    fn test_pick_combined_falls_back_to_partial_then_first() {
        let records = vec![
            record("Batuan", "Sukawati", "80583"),
            record("Sukawati Kaja", "Gianyar", "80581"),
        ];
        // No exact match; "Sukawati Kaja" contains "Sukawati"
        assert_eq!(
            pick_combined(&records, "Sukawati", "Ubud"),
            Some("80581".to_string())
        );
        // Neither exact nor partial: first usable wins
        assert_eq!(
            pick_combined(&records, "Mas", "Ubud"),
            Some("80583".to_string())
        );
    }

    #[test]
    fn test_pickers_skip_empty_codes() {
        let records = vec![record("Sukawati", "Ubud", ""), record("Batuan", "Ubud", "80583")];
        assert_eq!(pick_first(&records), Some("80583".to_string()));
        assert_eq!(
            pick_combined(&records, "Sukawati", "Ubud"),
            Some("80583".to_string())
        );
    }

    #[test]
    fn test_pick_bare_village_prefers_district() {
        let records = vec![
            record("Sukawati", "Gianyar", "80581"),
            record("Sukawati", "Ubud", "80582"),
        ];
        assert_eq!(
            pick_bare_village(&records, "ubud"),
            Some("80582".to_string())
        );
        assert_eq!(
            pick_bare_village(&records, "tampaksiring"),
            Some("80581".to_string())
        );
    }

    /// Scripted search stub: pops the next outcome per call and records
    /// the queries it saw.
    struct ScriptedSearch {
        outcomes: Mutex<Vec<Result<Vec<PostalCodeRecord>>>>,
        queries: Mutex<Vec<String>>,
    }

    impl ScriptedSearch {
        fn new(outcomes: Vec<Result<Vec<PostalCodeRecord>>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PostalCodeSearch for ScriptedSearch {
        async fn search(&self, query: &str) -> Result<Vec<PostalCodeRecord>> {
            self.queries.lock().unwrap().push(query.to_string());
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.is_empty() {
                return Ok(Vec::new());
            }
            outcomes.remove(0)
        }
    }

    #[test]
    fn test_ladder_strips_prefixes_and_uses_fallback() {
        let primary = Arc::new(ScriptedSearch::new(vec![
            Err(AppError::ExternalServiceError("down".to_string())),
        ]));
        let fallback = Arc::new(ScriptedSearch::new(vec![Ok(vec![record(
            "Sukawati", "Ubud", "80582",
        )])]));

        let resolver = PostalResolverService::new(primary.clone(), fallback.clone());
        let code =
            tokio_test::block_on(resolver.resolve("Desa Sukawati", "Kecamatan Ubud"));

        assert_eq!(code, Some("80582".to_string()));
        assert_eq!(
            primary.queries.lock().unwrap().as_slice(),
            ["Sukawati Ubud"]
        );
        assert_eq!(
            fallback.queries.lock().unwrap().as_slice(),
            ["Sukawati Ubud"]
        );
    }

    #[test]
    fn test_ladder_bare_village_retry() {
        let primary = Arc::new(ScriptedSearch::new(vec![
            Ok(Vec::new()),
            Ok(vec![record("Mas", "Ubud", "80571")]),
        ]));
        let fallback = Arc::new(ScriptedSearch::new(vec![Ok(Vec::new())]));

        let resolver = PostalResolverService::new(primary.clone(), fallback);
        let code = tokio_test::block_on(resolver.resolve("Mas", "Ubud"));

        assert_eq!(code, Some("80571".to_string()));
        assert_eq!(
            primary.queries.lock().unwrap().as_slice(),
            ["Mas Ubud", "Mas"]
        );
    }

    #[test]
    fn test_all_steps_failing_is_none() {
        let down = || Err(AppError::ExternalServiceError("down".to_string()));
        let primary = Arc::new(ScriptedSearch::new(vec![down(), down()]));
        let fallback = Arc::new(ScriptedSearch::new(vec![down()]));

        let resolver = PostalResolverService::new(primary, fallback);
        assert_eq!(tokio_test::block_on(resolver.resolve("Mas", "Ubud")), None);
    }
}
