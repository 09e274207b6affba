use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Honorific prefixes the region directory carries on village names
    /// ("Desa Sukawati", "Kelurahan Ubud") but the postal index does not.
    static ref VILLAGE_PREFIX: Regex = Regex::new(r"(?i)^\s*(desa|kelurahan)\s+").unwrap();

    /// Same for district names ("Kecamatan Ubud").
    static ref DISTRICT_PREFIX: Regex = Regex::new(r"(?i)^\s*kecamatan\s+").unwrap();
}

/// Title Case transform used for all display names: lowercase the whole
/// string, then capitalize the first letter of each whitespace-delimited
/// token. "KOTA DENPASAR" -> "Kota Denpasar".
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip "Desa"/"Kelurahan" from a village name for postal search.
pub fn strip_village_prefix(name: &str) -> String {
    VILLAGE_PREFIX.replace(name, "").trim().to_string()
}

/// Strip "Kecamatan" from a district name for postal search.
pub fn strip_district_prefix(name: &str) -> String {
    DISTRICT_PREFIX.replace(name, "").trim().to_string()
}

/// Sort key for alphabetical region ordering. Region names are
/// Latin-script, so a case-folded key is equivalent to a locale-aware
/// comparison here.
pub fn sort_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Case-insensitive, whitespace-trimmed name equality. Because the Title
/// Case transform only changes letter case, this accepts both the raw
/// fetched name and its Title Case form against an incoming value.
pub fn names_match(fetched: &str, incoming: &str) -> bool {
    let fetched = fetched.trim();
    let incoming = incoming.trim();
    !incoming.is_empty() && fetched.to_lowercase() == incoming.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("KOTA DENPASAR"), "Kota Denpasar");
        assert_eq!(title_case("bali"), "Bali");
        assert_eq!(title_case("  daerah   istimewa  yogyakarta "), "Daerah Istimewa Yogyakarta");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_strip_village_prefix() {
        assert_eq!(strip_village_prefix("Desa Sukawati"), "Sukawati");
        assert_eq!(strip_village_prefix("KELURAHAN Ubud"), "Ubud");
        assert_eq!(strip_village_prefix("Sukawati"), "Sukawati");
        // Prefix only stripped as a standalone leading word
        assert_eq!(strip_village_prefix("Desakolot"), "Desakolot");
    }

    #[test]
    fn test_strip_district_prefix() {
        assert_eq!(strip_district_prefix("Kecamatan Ubud"), "Ubud");
        assert_eq!(strip_district_prefix("kecamatan sukawati"), "sukawati");
        assert_eq!(strip_district_prefix("Ubud"), "Ubud");
    }

    #[test]
    fn test_names_match() {
        assert!(names_match("Bali", "bali"));
        assert!(names_match("KOTA DENPASAR", "Kota Denpasar"));
        assert!(names_match(" Bali ", "BALI"));
        assert!(!names_match("Bali", "Ball"));
        assert!(!names_match("Bali", ""));
    }
}
