//! RON content loader

use crate::error::{Error, Result};
use crate::schema::{PurchaseDef, ResourceDef, StartingResource};
use idleworks_core::{ActionKey, DefId, RuntimeConfig};
use indexmap::IndexMap;
use ron::extensions::Extensions;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse RON, allowing optional sections to be written without `Some(...)`
fn parse<T: DeserializeOwned>(content: &str) -> Result<T> {
    let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
    Ok(options.from_str(content)?)
}

/// Loaded, not yet resolved, content definitions
#[derive(Debug, Default)]
pub struct GameDefs {
    /// Resource definitions by ID
    pub resources: IndexMap<DefId, ResourceDef>,
    /// Purchase definitions by action key
    pub purchases: IndexMap<ActionKey, PurchaseDef>,
    /// Starting balances by resource ID
    pub starting_resources: IndexMap<DefId, f64>,
    /// Runtime settings, if any file declared them
    pub settings: Option<RuntimeConfig>,
}

impl GameDefs {
    /// Create empty definitions
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a resource definition
    pub fn get_resource(&self, id: &DefId) -> Option<&ResourceDef> {
        self.resources.get(id)
    }

    /// Get a purchase definition
    pub fn get_purchase(&self, key: &ActionKey) -> Option<&PurchaseDef> {
        self.purchases.get(key)
    }
}

/// Sections a content file may contain; all are optional
#[derive(Deserialize)]
struct ContentFile {
    #[serde(default)]
    resources: Vec<ResourceDef>,
    #[serde(default)]
    purchases: Vec<PurchaseDef>,
    #[serde(default)]
    starting_resources: Vec<StartingResource>,
    #[serde(default)]
    settings: Option<RuntimeConfig>,
}

/// Loader for RON content files
pub struct Loader {
    defs: GameDefs,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            defs: GameDefs::new(),
        }
    }

    /// Load a single RON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loading content file");
        self.load_str(&content)
    }

    /// Load every section found in a RON string
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let file: ContentFile = parse(content)?;
        for resource in file.resources {
            self.add_resource(resource)?;
        }
        for purchase in file.purchases {
            self.add_purchase(purchase)?;
        }
        for starting in file.starting_resources {
            self.add_starting_resource(starting)?;
        }
        if let Some(settings) = file.settings {
            if self.defs.settings.is_some() {
                return Err(Error::DuplicateDefinition("settings".to_string()));
            }
            self.defs.settings = Some(settings);
        }
        Ok(())
    }

    /// Load resources from a RON string holding a `resources` list
    pub fn load_resources_str(&mut self, content: &str) -> Result<()> {
        #[derive(Deserialize)]
        struct ResourceFile {
            resources: Vec<ResourceDef>,
        }

        let file: ResourceFile = parse(content)?;
        for resource in file.resources {
            self.add_resource(resource)?;
        }
        Ok(())
    }

    /// Load purchases from a RON string holding a `purchases` list
    pub fn load_purchases_str(&mut self, content: &str) -> Result<()> {
        #[derive(Deserialize)]
        struct PurchaseFile {
            purchases: Vec<PurchaseDef>,
        }

        let file: PurchaseFile = parse(content)?;
        for purchase in file.purchases {
            self.add_purchase(purchase)?;
        }
        Ok(())
    }

    fn add_resource(&mut self, resource: ResourceDef) -> Result<()> {
        if resource.id.is_empty() {
            return Err(Error::MissingField("resources.id".to_string()));
        }
        let id = resource.id.clone();
        if self.defs.resources.contains_key(&id) {
            return Err(Error::DuplicateDefinition(id.to_string()));
        }
        self.defs.resources.insert(id, resource);
        Ok(())
    }

    fn add_purchase(&mut self, purchase: PurchaseDef) -> Result<()> {
        let key = purchase.key();
        if key.category.as_str().contains('_') {
            return Err(Error::InvalidSchema(format!(
                "category `{}` must not contain `_`",
                key.category
            )));
        }
        if !key.is_valid() {
            return Err(Error::MissingField(format!(
                "purchases.category/action in `{}`",
                key
            )));
        }
        if purchase.costs.is_empty() {
            return Err(Error::InvalidSchema(format!("{} has no costs", key)));
        }
        if self.defs.purchases.contains_key(&key) {
            return Err(Error::DuplicateDefinition(key.to_string()));
        }
        self.defs.purchases.insert(key, purchase);
        Ok(())
    }

    fn add_starting_resource(&mut self, starting: StartingResource) -> Result<()> {
        if !starting.amount.is_finite() || starting.amount < 0.0 {
            return Err(Error::InvalidSchema(format!(
                "starting amount of {} must be a non-negative number, got {}",
                starting.resource, starting.amount
            )));
        }
        if self.defs.starting_resources.contains_key(&starting.resource) {
            return Err(Error::DuplicateDefinition(format!(
                "starting_resources.{}",
                starting.resource
            )));
        }
        self.defs
            .starting_resources
            .insert(starting.resource, starting.amount);
        Ok(())
    }

    /// Load all RON files from a directory, recursively, in name order
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        for file_path in entries {
            if file_path.is_dir() {
                self.load_directory(&file_path)?;
            } else if file_path.extension().is_some_and(|e| e == "ron") {
                self.load_file(&file_path)?;
            }
        }

        Ok(())
    }

    /// Finish loading and return the definitions
    pub fn finish(self) -> GameDefs {
        self.defs
    }

    /// Get the current definitions (for inspection during loading)
    pub fn defs(&self) -> &GameDefs {
        &self.defs
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_resources() {
        let content = r#"
        (
            resources: [
                (id: "gold", name: "Gold"),
                (id: "wood", name: "Wood", description: "Logs"),
            ]
        )
        "#;

        let mut loader = Loader::new();
        loader.load_resources_str(content).unwrap();

        let defs = loader.finish();
        assert!(defs.get_resource(&DefId::new("gold")).is_some());
        assert!(defs.get_resource(&DefId::new("wood")).is_some());
    }

    #[test]
    fn test_load_mixed_sections() {
        let content = r#"
        (
            resources: [(id: "gold", name: "Gold")],
            purchases: [
                (
                    category: "farm",
                    action: "wheat",
                    produces: "gold",
                    costs: [(resource: "gold", base_cost: 10.0)],
                ),
            ],
            starting_resources: [(resource: "gold", amount: 300.0)],
            settings: (tick_interval: 0.25),
        )
        "#;

        let mut loader = Loader::new();
        loader.load_str(content).unwrap();
        let defs = loader.finish();

        assert_eq!(defs.resources.len(), 1);
        assert!(defs
            .get_purchase(&ActionKey::new("farm", "wheat"))
            .is_some());
        assert_eq!(defs.starting_resources[&DefId::new("gold")], 300.0);
        let settings = defs.settings.unwrap();
        assert_eq!(settings.tick_interval, 0.25);
        assert_eq!(settings.global_multiplier, 1.0);
    }

    #[test]
    fn test_duplicates_are_rejected() {
        let mut loader = Loader::new();
        loader
            .load_str(r#"(resources: [(id: "gold", name: "Gold")])"#)
            .unwrap();
        let err = loader
            .load_str(r#"(resources: [(id: "gold", name: "Gold")])"#)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition(_)));

        loader.load_str("(settings: (tick_interval: 0.5))").unwrap();
        assert!(matches!(
            loader.load_str("(settings: (global_multiplier: 2.0))"),
            Err(Error::DuplicateDefinition(_))
        ));
    }

    #[test]
    fn test_purchase_without_costs_is_rejected() {
        let content = r#"
        (
            purchases: [(category: "farm", action: "wheat", produces: "gold")],
        )
        "#;
        let mut loader = Loader::new();
        assert!(matches!(
            loader.load_purchases_str(content),
            Err(Error::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_underscore_in_category_is_rejected() {
        let content = r#"
        (
            purchases: [(
                category: "old_farm",
                action: "wheat",
                produces: "gold",
                costs: [(resource: "gold", base_cost: 10.0)],
            )],
        )
        "#;
        let mut loader = Loader::new();
        assert!(matches!(
            loader.load_purchases_str(content),
            Err(Error::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_negative_starting_amount_is_rejected() {
        let mut loader = Loader::new();
        let result = loader.load_str(r#"(starting_resources: [(resource: "gold", amount: -1.0)])"#);
        assert!(matches!(result, Err(Error::InvalidSchema(_))));
    }

    #[test]
    fn test_parse_error() {
        let mut loader = Loader::new();
        assert!(matches!(loader.load_str("(resources: ["), Err(Error::Ron(_))));
    }

    #[test]
    fn test_missing_directory() {
        let mut loader = Loader::new();
        assert!(matches!(
            loader.load_directory("/definitely/not/here"),
            Err(Error::Io(_))
        ));
    }
}
