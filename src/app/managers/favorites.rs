use crate::app::managers::{list_items, paging_headers};
use crate::core::plate::PlateNormalizer;
use crate::core::requester::ResilientRequester;
use crate::domain::model::RequestIntent;
use crate::utils::error::Result;
use std::sync::Arc;

pub const FAVORITE_PATH: &str = "/api/favorite";

pub struct FavoriteManager {
    requester: Arc<ResilientRequester>,
}

impl FavoriteManager {
    pub fn new(requester: Arc<ResilientRequester>) -> Self {
        Self { requester }
    }

    pub async fn list(&self) -> Result<Vec<serde_json::Value>> {
        let mut intent = RequestIntent::get(FAVORITE_PATH);
        for (name, value) in paging_headers(100, 0) {
            intent = intent.with_header(name, value);
        }

        let body = self
            .requester
            .execute(&intent)
            .await
            .into_result(FAVORITE_PATH)?;
        let favorites = list_items(body, "favorites");
        tracing::info!("Favorites retrieved: {}", favorites.len());
        Ok(favorites)
    }

    pub async fn add(&self, name: &str, plate_raw: &str) -> Result<serde_json::Value> {
        let plate = PlateNormalizer::validate(plate_raw)?;
        let body = serde_json::json!({ "name": name, "license_plate": plate });

        let result = self
            .requester
            .execute(&RequestIntent::post(FAVORITE_PATH, body))
            .await
            .into_result(FAVORITE_PATH)?;
        tracing::info!("Favorite added for {}", plate);
        Ok(result)
    }

    pub async fn update(&self, id: u64, name: &str, plate_raw: &str) -> Result<serde_json::Value> {
        let plate = PlateNormalizer::validate(plate_raw)?;
        let path = format!("{}/{}", FAVORITE_PATH, id);
        let body = serde_json::json!({ "name": name, "license_plate": plate });

        let result = self
            .requester
            .execute(&RequestIntent::patch(&path, body))
            .await
            .into_result(&path)?;
        tracing::info!("Favorite {} updated", id);
        Ok(result)
    }

    pub async fn remove(&self, id: u64) -> Result<serde_json::Value> {
        let path = format!("{}/{}", FAVORITE_PATH, id);
        let result = self
            .requester
            .execute(&RequestIntent::delete(&path))
            .await
            .into_result(&path)?;
        tracing::info!("Favorite {} deleted", id);
        Ok(result)
    }
}
