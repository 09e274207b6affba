use serde::Deserialize;

/// One ranked result from a postal-code search service. Fields the
/// service omits deserialize to empty strings; `code` is normalized to a
/// string because the services disagree on whether it is numeric.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PostalCodeRecord {
    #[serde(default)]
    pub village: String,
    #[serde(default)]
    pub district: String,
    #[serde(default, alias = "regency")]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default, deserialize_with = "de_code")]
    pub code: String,
}

impl PostalCodeRecord {
    pub fn has_code(&self) -> bool {
        !self.code.trim().is_empty()
    }
}

/// Accept the postal code as either a JSON number or a string.
fn de_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CodeField {
        Number(i64),
        Text(String),
    }

    Ok(match Option::<CodeField>::deserialize(deserializer)? {
        Some(CodeField::Number(n)) => n.to_string(),
        Some(CodeField::Text(s)) => s,
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_code_deserializes_to_string() {
        let record: PostalCodeRecord = serde_json::from_str(
            r#"{"village":"Sukawati","district":"Sukawati","regency":"Gianyar","province":"Bali","code":80582}"#,
        )
        .unwrap();
        assert_eq!(record.code, "80582");
        assert_eq!(record.city, "Gianyar");
        assert!(record.has_code());
    }

    #[test]
    fn test_missing_fields_default_empty() {
        let record: PostalCodeRecord = serde_json::from_str(r#"{"village":"Ubud"}"#).unwrap();
        assert_eq!(record.district, "");
        assert!(!record.has_code());
    }

    #[test]
    fn test_string_code() {
        let record: PostalCodeRecord =
            serde_json::from_str(r#"{"code":"80582"}"#).unwrap();
        assert_eq!(record.code, "80582");
    }
}
