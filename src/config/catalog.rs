//! Catalog seed configuration

use serde::Deserialize;
use std::path::Path;

use super::error::ValidationError;

/// Where development mode reads its course catalog from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// YAML seed loaded into the in-memory stores when no database is configured
    pub seed_path: Option<String>,
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.seed_path {
            Some(path) if !Path::new(path).is_file() => {
                Err(ValidationError::SeedFileMissing(path.clone()))
            }
            _ => Ok(()),
        }
    }
}
