mod wilayah_api_client;

pub use wilayah_api_client::{RegionDirectory, WilayahApiClient};
