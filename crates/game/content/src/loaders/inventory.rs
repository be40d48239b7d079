//! Player inventory snapshot loader.

use std::path::Path;

use game_core::Inventory;

use crate::loaders::{LoadResult, read_file};

/// Loader for inventory snapshots stored as JSON.
///
/// The snapshot is a list of items tagged by `kind`:
///
/// ```json
/// [
///   { "kind": "consumable", "variant": "extra_life", "quantity": 2 },
///   { "kind": "permanent", "variant": "golden_bridge" }
/// ]
/// ```
pub struct InventoryLoader;

impl InventoryLoader {
    pub fn load(path: &Path) -> LoadResult<Inventory> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid inventory {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Inventory> {
        serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse inventory JSON: {}", e))
    }

    /// Loads `path` when given, otherwise an empty inventory.
    pub fn load_or_empty(path: Option<&Path>) -> LoadResult<Inventory> {
        path.map_or_else(|| Ok(Inventory::default()), Self::load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{InventoryItem, ItemVariant};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_tagged_items() {
        let inventory = InventoryLoader::parse(
            r#"[
                { "kind": "consumable", "variant": "extra_life", "quantity": 2 },
                { "kind": "permanent", "variant": "golden_bridge" }
            ]"#,
        )
        .unwrap();

        assert_eq!(
            inventory.items(),
            &[
                InventoryItem::consumable("extra_life", 2),
                InventoryItem::permanent("golden_bridge"),
            ]
        );
        assert_eq!(inventory.quantity_of(&ItemVariant::from("extra_life")), Some(2));
        assert_eq!(inventory.quantity_of(&ItemVariant::from("golden_bridge")), None);
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(InventoryLoader::parse(r#"[{ "kind": "rental", "variant": "x" }]"#).is_err());
    }

    #[test]
    fn absent_path_is_empty() {
        let inventory = InventoryLoader::load_or_empty(None).unwrap();
        assert!(inventory.items().is_empty());
    }

    #[test]
    fn load_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{ "kind": "consumable", "variant": "shield", "quantity": 1 }}]"#).unwrap();
        let inventory = InventoryLoader::load_or_empty(Some(file.path())).unwrap();
        assert_eq!(inventory.quantity_of(&ItemVariant::from("shield")), Some(1));
    }
}
