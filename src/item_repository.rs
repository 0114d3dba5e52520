use crate::api_model::Item;
use crate::api_model::ItemPatch;
use crate::constants;
use crate::error::Error;
use crate::error::Result;
use log::debug;
use serde_json::Map;
use serde_json::Value;
use warp::http::StatusCode;

/// Volatile, insertion-ordered store of items. Nothing survives a restart.
///
/// Ids are NOT guaranteed unique. `create` assigns `len() + 1`
/// without looking at existing ids, so after a delete the next created item
/// can reuse an id that is still taken. `update_by_id` may also move an item
/// onto an arbitrary id. Lookups therefore always act on the first match,
/// and deletes remove every match.
#[derive(Debug, Default)]
pub struct ItemRepository {
    items: Vec<Item>,
}

pub fn item_not_found() -> Error {
    Error {
        code: StatusCode::NOT_FOUND,
        msg: constants::ITEM_NOT_FOUND.to_string(),
    }
}

impl ItemRepository {
    pub fn new() -> ItemRepository {
        ItemRepository::default()
    }

    pub fn list(&self) -> &[Item] {
        &self.items
    }

    pub fn get_by_id(&self, id: i64) -> Result<&Item> {
        debug!("Getting item {}", id);
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(item_not_found)
    }

    /// Store a new item and return a copy of it. Any `id` in the payload is discarded.
    pub fn create(&mut self, mut payload: Map<String, Value>) -> Item {
        payload.remove("id");
        // Known defect kept on purpose: count-based, collides after deletions.
        let id = self.items.len() as i64 + 1;
        debug!("Creating item {}", id);
        let item = Item {
            id,
            fields: payload,
        };
        self.items.push(item.clone());
        item
    }

    /// Shallow-merge `patch` into the first item with this `id`.
    pub fn update_by_id(&mut self, id: i64, patch: ItemPatch) -> Result<&Item> {
        debug!("Updating item {}", id);
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(item_not_found)?;
        if let Some(new_id) = patch.id {
            item.id = new_id;
        }
        item.fields.extend(patch.fields);
        Ok(item)
    }

    /// Remove every item with this `id`, returning how many were removed.
    pub fn delete_by_id(&mut self, id: i64) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = before - self.items.len();
        debug!("Deleted {} item(s) with id {}", removed, id);
        removed
    }
}
