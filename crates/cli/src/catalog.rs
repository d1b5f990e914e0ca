//! Product lines the factory knows how to launch.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DEPLOYMENT_TYPE: &str = "kubernetes";

/// Launch configuration for one product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    /// Catalog key; also used as the ledger product id and the working directory name.
    pub key: String,
    pub name: String,
    pub description: String,
    /// Built-in template id rendered for this line.
    pub template: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub pricing_min: f64,
    pub pricing_max: f64,
    pub target_mrr: f64,
    pub github_repo: String,
    #[serde(default = "default_deployment_type")]
    pub deployment_type: String,
}

fn default_deployment_type() -> String {
    DEFAULT_DEPLOYMENT_TYPE.to_string()
}

impl ProductLine {
    pub fn mesh_messenger() -> Self {
        Self {
            key: "mesh-messenger".to_string(),
            name: "Zero-Human Mesh Messenger".to_string(),
            description: "AI-powered offline mesh communication network".to_string(),
            template: "mesh-messenger".to_string(),
            tech_stack: ["Python", "FastAPI", "React Native", "Bluetooth/WiFi Direct"]
                .into_iter()
                .map(String::from)
                .collect(),
            pricing_min: 9.0,
            pricing_max: 99.0,
            target_mrr: 14_500.0,
            github_repo: "mesh-messenger".to_string(),
            deployment_type: default_deployment_type(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "product")]
    products: Vec<ProductLine>,
}

/// Product lines keyed by [`ProductLine::key`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    lines: BTreeMap<String, ProductLine>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The lines shipped with the binary.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        catalog.insert(ProductLine::mesh_messenger());
        catalog
    }

    /// Parse `[[product]]` tables.
    pub fn from_toml_str(s: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(s)?;
        let mut catalog = Self::empty();
        for line in file.products {
            catalog.insert(line);
        }
        Ok(catalog)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    /// Insert or replace a line.
    pub fn insert(&mut self, line: ProductLine) {
        self.lines.insert(line.key.clone(), line);
    }

    /// Add every line of `other`, replacing lines with the same key.
    pub fn merge(&mut self, other: Catalog) {
        self.lines.extend(other.lines);
    }

    pub fn get(&self, key: &str) -> Option<&ProductLine> {
        self.lines.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.lines.keys().map(String::as_str)
    }
}
