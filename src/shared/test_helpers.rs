#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Arc, Mutex};

#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use crate::core::error::{AppError, Result};
#[cfg(test)]
use crate::features::postal_codes::clients::PostalCodeSearch;
#[cfg(test)]
use crate::features::postal_codes::models::PostalCodeRecord;
#[cfg(test)]
use crate::features::regions::clients::RegionDirectory;
#[cfg(test)]
use crate::features::regions::models::{RegionLevel, RegionNode};

/// In-memory region directory with a small Bali hierarchy.
#[cfg(test)]
pub struct FixtureDirectory {
    provinces: Vec<RegionNode>,
    children: HashMap<(RegionLevel, String), Vec<RegionNode>>,
}

#[cfg(test)]
impl FixtureDirectory {
    pub fn bali() -> Self {
        let mut children = HashMap::new();
        children.insert(
            (RegionLevel::Regency, "1".to_string()),
            vec![
                RegionNode::new("11", "KABUPATEN GIANYAR"),
                RegionNode::new("12", "KABUPATEN BANGLI"),
            ],
        );
        children.insert(
            (RegionLevel::District, "11".to_string()),
            vec![
                RegionNode::new("111", "KECAMATAN UBUD"),
                RegionNode::new("112", "KECAMATAN SUKAWATI"),
            ],
        );
        children.insert(
            (RegionLevel::Village, "111".to_string()),
            vec![
                RegionNode::new("1111", "DESA SUKAWATI"),
                RegionNode::new("1112", "DESA MAS"),
            ],
        );
        Self {
            provinces: vec![
                RegionNode::new("1", "BALI"),
                RegionNode::new("2", "JAWA TIMUR"),
            ],
            children,
        }
    }
}

#[cfg(test)]
#[async_trait]
impl RegionDirectory for FixtureDirectory {
    async fn provinces(&self) -> Result<Vec<RegionNode>> {
        Ok(self.provinces.clone())
    }

    async fn children(&self, level: RegionLevel, parent_id: &str) -> Result<Vec<RegionNode>> {
        Ok(self
            .children
            .get(&(level, parent_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

/// Postal search stub that always returns the same records and remembers
/// the queries it saw.
#[cfg(test)]
pub struct ScriptedPostal {
    records: Vec<PostalCodeRecord>,
    queries: Mutex<Vec<String>>,
}

#[cfg(test)]
impl ScriptedPostal {
    pub fn with_records(records: Vec<PostalCodeRecord>) -> Arc<Self> {
        Arc::new(Self {
            records,
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl PostalCodeSearch for ScriptedPostal {
    async fn search(&self, query: &str) -> Result<Vec<PostalCodeRecord>> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.records.clone())
    }
}

#[cfg(test)]
struct FailingPostal;

#[cfg(test)]
#[async_trait]
impl PostalCodeSearch for FailingPostal {
    async fn search(&self, _query: &str) -> Result<Vec<PostalCodeRecord>> {
        Err(AppError::ExternalServiceError(
            "postal service down".to_string(),
        ))
    }
}

/// A postal search whose every call fails with a transport error.
#[cfg(test)]
pub fn failing_postal_search() -> Arc<dyn PostalCodeSearch> {
    Arc::new(FailingPostal)
}
