use crate::core::overlap::{parse_reservations, RESERVATION_PATH};
use crate::core::requester::ResilientRequester;
use crate::core::workflow::ReservationWorkflow;
use crate::domain::model::{RequestIntent, Reservation};
use crate::utils::error::Result;
use std::sync::Arc;

pub struct ReservationManager {
    requester: Arc<ResilientRequester>,
    workflow: Arc<ReservationWorkflow>,
}

impl ReservationManager {
    pub fn new(requester: Arc<ResilientRequester>, workflow: Arc<ReservationWorkflow>) -> Self {
        Self {
            requester,
            workflow,
        }
    }

    pub async fn list(&self) -> Result<Vec<Reservation>> {
        let body = self
            .requester
            .execute(&RequestIntent::get(RESERVATION_PATH))
            .await
            .into_result(RESERVATION_PATH)?;
        let reservations = parse_reservations(&body);
        tracing::info!("Reservations retrieved: {}", reservations.len());
        Ok(reservations)
    }

    pub async fn get(&self, id: u64) -> Result<serde_json::Value> {
        let path = format!("{}/{}", RESERVATION_PATH, id);
        self.requester
            .execute(&RequestIntent::get(&path))
            .await
            .into_result(&path)
    }

    pub async fn create(
        &self,
        name: &str,
        plate_raw: &str,
        start_raw: &str,
        end_raw: &str,
    ) -> Result<serde_json::Value> {
        self.workflow
            .create_reservation(name, plate_raw, start_raw, end_raw)
            .await
            .inspect_err(|e| tracing::error!("Failed to add reservation: {}", e))
    }

    pub async fn extend(&self, id: u64, new_end_raw: &str) -> Result<serde_json::Value> {
        self.workflow
            .extend_reservation(id, new_end_raw)
            .await
            .inspect_err(|e| tracing::error!("Failed to update reservation {}: {}", id, e))
    }

    pub async fn remove(&self, id: u64) -> Result<serde_json::Value> {
        let path = format!("{}/{}", RESERVATION_PATH, id);
        let result = self
            .requester
            .execute(&RequestIntent::delete(&path))
            .await
            .into_result(&path)?;
        tracing::info!("Reservation {} deleted", id);
        Ok(result)
    }
}
