use crate::api_model::Item;
use crate::api_model::ItemPatch;
use crate::error::Result;
use crate::item_repository::item_not_found;
use crate::item_repository::ItemRepository;
use log::debug;
use serde_json::Map;
use serde_json::Value;
use std::sync::Mutex;
use std::sync::MutexGuard;

// Every function below holds the lock for exactly one repository operation
// and hands back owned copies, so nothing outside keeps a reference into the store.

/// Get project version as seen by Cargo.
pub fn get_project_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Parse an `:id` path segment the way the HTTP API promises:
/// base-10, optional sign, leading whitespace skipped, trailing garbage ignored.
/// Returns `None` if there are no digits at all, which matches no item.
pub fn parse_id(segment: &str) -> Option<i64> {
    let s = segment.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

pub fn get_all_items(repo: &Mutex<ItemRepository>) -> Vec<Item> {
    lock(repo).list().to_vec()
}

pub fn get_item(repo: &Mutex<ItemRepository>, id: Option<i64>) -> Result<Item> {
    let id = id.ok_or_else(item_not_found)?;
    lock(repo).get_by_id(id).map(Item::clone)
}

pub fn create_item(repo: &Mutex<ItemRepository>, payload: Map<String, Value>) -> Item {
    lock(repo).create(payload)
}

pub fn update_item(repo: &Mutex<ItemRepository>, id: Option<i64>, patch: ItemPatch) -> Result<Item> {
    let id = id.ok_or_else(item_not_found)?;
    lock(repo).update_by_id(id, patch).map(Item::clone)
}

/// Always succeeds, whether or not anything matched.
pub fn delete_item(repo: &Mutex<ItemRepository>, id: Option<i64>) {
    match id {
        Some(id) => {
            lock(repo).delete_by_id(id);
        }
        None => debug!("Ignoring delete of a non-numeric id"),
    }
}

/// Repository operations never panic half-way through a mutation,
/// so a poisoned lock still guards a consistent collection.
fn lock(repo: &Mutex<ItemRepository>) -> MutexGuard<'_, ItemRepository> {
    repo.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
