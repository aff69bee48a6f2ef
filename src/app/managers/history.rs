use crate::app::managers::{list_items, paging_headers};
use crate::core::requester::ResilientRequester;
use crate::domain::model::RequestIntent;
use crate::utils::error::Result;
use std::sync::Arc;

pub const HISTORY_PATH: &str = "/api/history";

pub struct HistoryManager {
    requester: Arc<ResilientRequester>,
}

impl HistoryManager {
    pub fn new(requester: Arc<ResilientRequester>) -> Self {
        Self { requester }
    }

    /// Latest history entries. Defaults to the first 20; `extra_headers` override paging.
    pub async fn list(&self, extra_headers: &[(String, String)]) -> Result<Vec<serde_json::Value>> {
        let mut intent = RequestIntent::get(HISTORY_PATH);
        for (name, value) in paging_headers(20, 0) {
            intent = intent.with_header(name, value);
        }
        for (name, value) in extra_headers {
            intent = intent.with_header(name.clone(), value.clone());
        }

        let body = self
            .requester
            .execute(&intent)
            .await
            .into_result(HISTORY_PATH)?;
        let entries = list_items(body, "history");
        tracing::info!("History retrieved: {} entries", entries.len());
        Ok(entries)
    }
}
