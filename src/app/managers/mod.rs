pub mod account;
pub mod favorites;
pub mod history;
pub mod reservations;

pub use account::AccountManager;
pub use favorites::FavoriteManager;
pub use history::HistoryManager;
pub use reservations::ReservationManager;

/// List payload of a response: a bare array, or the array under `key`.
pub(crate) fn list_items(body: serde_json::Value, key: &str) -> Vec<serde_json::Value> {
    match body {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove(key) {
            Some(serde_json::Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Paging headers understood by the list endpoints.
pub(crate) fn paging_headers(limit: u32, offset: u32) -> [(String, String); 2] {
    [
        ("x-data-limit".to_string(), limit.to_string()),
        ("x-data-offset".to_string(), offset.to_string()),
    ]
}
