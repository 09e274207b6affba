mod level;
mod node;

pub use level::RegionLevel;
pub use node::{sort_by_name, RegionNode};
