use std::env;

/// Top-level configuration for the external services the address form
/// talks to. Every field has a working default, so `from_env` only fails
/// when an override is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub regions: RegionApiConfig,
    pub postal: PostalApiConfig,
}

/// Endpoint for the hierarchical region directory (static JSON API:
/// `/provinces.json`, `/regencies/{id}.json`, `/districts/{id}.json`,
/// `/villages/{id}.json`).
#[derive(Debug, Clone)]
pub struct RegionApiConfig {
    pub base_url: String,
}

/// Endpoints for the postal-code search services. Primary and fallback
/// share the same request/response shape.
#[derive(Debug, Clone)]
pub struct PostalApiConfig {
    pub primary_base_url: String,
    pub fallback_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            regions: RegionApiConfig::from_env()?,
            postal: PostalApiConfig::from_env()?,
        })
    }
}

impl RegionApiConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(RegionApiConfig {
            base_url: env_or(
                "REGION_API_BASE_URL",
                "https://www.emsifa.com/api-wilayah-indonesia/api",
            ),
        })
    }
}

impl PostalApiConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(PostalApiConfig {
            primary_base_url: env_or("POSTAL_API_BASE_URL", "https://kodepos.vercel.app"),
            fallback_base_url: env_or(
                "POSTAL_API_FALLBACK_BASE_URL",
                "https://alamat.thecloudalert.com/api",
            ),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    // Trailing slashes break naive path joins downstream
    value.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = RegionApiConfig {
            base_url: env_or("ALAMAT_TEST_UNSET_KEY", "https://example.com/api/"),
        };
        assert_eq!(config.base_url, "https://example.com/api");
    }
}
