use serde::{Deserialize, Serialize};

use crate::shared::text;

/// One entry of a level's option list as fetched from the region
/// directory. `id` is unique within its level and parent; `name` is not
/// guaranteed unique. Never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionNode {
    pub id: String,
    pub name: String,
}

impl RegionNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Display name: the directory serves names in inconsistent casing
    /// (often ALL CAPS), so everything shown or emitted is Title Cased.
    pub fn display_name(&self) -> String {
        text::title_case(&self.name)
    }
}

/// Alphabetical ordering for option lists, applied after every fetch.
pub fn sort_by_name(nodes: &mut [RegionNode]) {
    nodes.sort_by_key(|n| text::sort_key(&n.name));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_by_name_case_insensitive() {
        let mut nodes = vec![
            RegionNode::new("3", "ubud"),
            RegionNode::new("1", "BANGLI"),
            RegionNode::new("2", "Gianyar"),
        ];
        sort_by_name(&mut nodes);
        let names: Vec<_> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(names, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(RegionNode::new("1", "KABUPATEN GIANYAR").display_name(), "Kabupaten Gianyar");
    }
}
