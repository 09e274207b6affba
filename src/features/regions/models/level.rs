use serde::{Deserialize, Serialize};

/// The four-tier Indonesian administrative hierarchy used for address
/// entry: province (provinsi), city/regency (kabupaten/kota), district
/// (kecamatan), village (kelurahan/desa).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionLevel {
    Province,
    Regency,
    District,
    Village,
}

impl RegionLevel {
    /// Top-to-bottom iteration order.
    pub const ALL: [RegionLevel; 4] = [
        RegionLevel::Province,
        RegionLevel::Regency,
        RegionLevel::District,
        RegionLevel::Village,
    ];

    /// Zero-based depth, provinces at 0.
    pub fn depth(self) -> usize {
        match self {
            RegionLevel::Province => 0,
            RegionLevel::Regency => 1,
            RegionLevel::District => 2,
            RegionLevel::Village => 3,
        }
    }

    pub fn from_depth(depth: usize) -> Option<RegionLevel> {
        RegionLevel::ALL.get(depth).copied()
    }

    pub fn parent(self) -> Option<RegionLevel> {
        match self {
            RegionLevel::Province => None,
            RegionLevel::Regency => Some(RegionLevel::Province),
            RegionLevel::District => Some(RegionLevel::Regency),
            RegionLevel::Village => Some(RegionLevel::District),
        }
    }

    pub fn child(self) -> Option<RegionLevel> {
        match self {
            RegionLevel::Province => Some(RegionLevel::Regency),
            RegionLevel::Regency => Some(RegionLevel::District),
            RegionLevel::District => Some(RegionLevel::Village),
            RegionLevel::Village => None,
        }
    }

    /// Every level strictly below `self`, top-down.
    pub fn descendants(self) -> impl Iterator<Item = RegionLevel> {
        RegionLevel::ALL.into_iter().skip(self.depth() + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            RegionLevel::Province => "province",
            RegionLevel::Regency => "city/regency",
            RegionLevel::District => "district",
            RegionLevel::Village => "village",
        }
    }
}
