use crate::core::requester::ResilientRequester;
use crate::domain::model::RequestIntent;
use crate::utils::error::Result;
use std::sync::Arc;

pub const ACCOUNT_PATH: &str = "/api/account/0";

pub struct AccountManager {
    requester: Arc<ResilientRequester>,
}

impl AccountManager {
    pub fn new(requester: Arc<ResilientRequester>) -> Self {
        Self { requester }
    }

    pub async fn get_account(&self) -> Result<serde_json::Value> {
        let account = self
            .requester
            .execute(&RequestIntent::get(ACCOUNT_PATH))
            .await
            .into_result(ACCOUNT_PATH)
            .inspect_err(|e| tracing::error!("Account information could not be retrieved: {}", e))?;

        tracing::info!("Account details retrieved");
        Ok(account)
    }
}
