use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_REGION_ID: &str = "vinnytsia";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    /// Page control that switches the schedule to this region. Opaque to the parser.
    #[serde(default)]
    pub selector: Option<String>,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read region registry {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid region registry {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("region registry {0} is empty")]
    Empty(String),
    #[error("unknown region `{id}` (known: {known})")]
    UnknownRegion { id: String, known: String },
}

#[derive(Debug, Clone)]
pub struct RegionRegistry {
    regions: Vec<Region>,
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self {
            regions: vec![Region {
                id: DEFAULT_REGION_ID.to_string(),
                name: "Вінницька область".to_string(),
                selector: None,
            }],
        }
    }
}

impl RegionRegistry {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Reads a JSON array of regions.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: display.clone(),
            source,
        })?;
        let regions: Vec<Region> =
            serde_json::from_str(&raw).map_err(|source| RegistryError::Parse {
                path: display.clone(),
                source,
            })?;
        if regions.is_empty() {
            return Err(RegistryError::Empty(display));
        }
        Ok(Self { regions })
    }

    pub fn find(&self, id: &str) -> Result<&Region, RegistryError> {
        self.regions
            .iter()
            .find(|region| region.id == id)
            .ok_or_else(|| RegistryError::UnknownRegion {
                id: id.to_string(),
                known: self
                    .regions
                    .iter()
                    .map(|region| region.id.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }
}
