//! Read-only business configuration catalog.
//!
//! The user-facing status catalog and product list that UI collaborators
//! render. The core consumes this as reference data and never writes it.
//! Note the catalog's status ids are a separate vocabulary from the order
//! workflow statuses: the task-sync mapping does not consult the catalog,
//! and a catalog id it does not know falls through to `pending`.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the catalog file inside the data directory.
pub const CATALOG_FILE: &str = "catalog.toml";

/// One entry of the user-facing status catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDef {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// One sellable product type with its base price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub base_price: f64,
}

/// The business catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    pub statuses: Vec<StatusDef>,
    pub product_types: Vec<ProductType>,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        let status = |id: &str, label: &str| StatusDef {
            id: id.to_string(),
            label: label.to_string(),
            color: None,
        };
        let product = |id: &str, label: &str, base_price: f64| ProductType {
            id: id.to_string(),
            label: label.to_string(),
            base_price,
        };
        Self {
            statuses: vec![
                status("quote", "Quote"),
                status("confirmed", "Confirmed"),
                status("in_progress", "In Progress"),
                status("ready", "Ready"),
                status("shipped", "Shipped"),
                status("completed", "Completed"),
            ],
            product_types: vec![
                product("business-cards", "Business Cards", 45.0),
                product("flyers", "Flyers", 80.0),
                product("banners", "Banners", 120.0),
                product("stickers", "Stickers", 35.0),
            ],
        }
    }
}

impl BusinessConfig {
    /// Load the catalog from `path`, falling back to the compiled-in
    /// defaults when the file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "invalid catalog file, using defaults");
                Self::default()
            }
        }
    }

    /// Look up a catalog status by id.
    pub fn status(&self, id: &str) -> Option<&StatusDef> {
        self.statuses.iter().find(|s| s.id == id)
    }
}
