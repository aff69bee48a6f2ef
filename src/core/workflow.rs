use crate::core::overlap::{OverlapGuard, RESERVATION_PATH};
use crate::core::plate::PlateNormalizer;
use crate::core::requester::ResilientRequester;
use crate::core::time::TimeValidator;
use crate::domain::model::{RequestIntent, RequestOutcome, Timestamp};
use crate::utils::error::{ParkingError, Result};
use chrono::Utc;
use std::sync::Arc;

/// Invariant-checked mutation paths. All input validation happens before the first request.
pub struct ReservationWorkflow {
    requester: Arc<ResilientRequester>,
    guard: OverlapGuard,
}

impl ReservationWorkflow {
    pub fn new(requester: Arc<ResilientRequester>) -> Self {
        Self {
            guard: OverlapGuard::new(requester.clone()),
            requester,
        }
    }

    pub async fn create_reservation(
        &self,
        name: &str,
        plate_raw: &str,
        start_raw: &str,
        end_raw: &str,
    ) -> Result<serde_json::Value> {
        self.create_reservation_at(name, plate_raw, start_raw, end_raw, Utc::now().fixed_offset())
            .await
    }

    /// Same as [`Self::create_reservation`] with an explicit "now" for the future-start check.
    pub async fn create_reservation_at(
        &self,
        name: &str,
        plate_raw: &str,
        start_raw: &str,
        end_raw: &str,
        now: Timestamp,
    ) -> Result<serde_json::Value> {
        let plate = PlateNormalizer::validate(plate_raw)?;
        let range = TimeValidator::future_range(start_raw, end_raw, now)?;

        // Advisory only: the list read and the create below are separate backend calls.
        if self.guard.has_overlap(&plate, &range).await? {
            tracing::error!(
                "Overlapping reservation exists for {} ({} - {})",
                plate,
                start_raw,
                end_raw
            );
            return Err(ParkingError::OverlappingReservation {
                plate: plate.to_string(),
                start: start_raw.to_string(),
                end: end_raw.to_string(),
            });
        }

        let body = serde_json::json!({
            "name": name,
            "license_plate": plate,
            "start_time": start_raw,
            "end_time": end_raw,
        });
        let result = self
            .requester
            .execute(&RequestIntent::post(RESERVATION_PATH, body))
            .await
            .into_result(RESERVATION_PATH)?;

        match result.get("reservation_id").or_else(|| result.get("id")) {
            Some(id) => tracing::info!("Reservation added: {}", id),
            None => tracing::warn!("Reservation created but response carries no id"),
        }
        Ok(result)
    }

    /// Moves the end of reservation `id`. The new end only has to lie after the existing start.
    pub async fn extend_reservation(&self, id: u64, new_end_raw: &str) -> Result<serde_json::Value> {
        let new_end = TimeValidator::parse(new_end_raw)?;
        let path = format!("{}/{}", RESERVATION_PATH, id);

        let existing = match self.requester.execute(&RequestIntent::get(&path)).await {
            RequestOutcome::Rejected { status: 404, .. } => {
                return Err(ParkingError::ReservationNotFound { id: id.to_string() })
            }
            outcome => outcome.into_result(&path)?,
        };

        let start_raw = existing
            .get("start_time")
            .or_else(|| existing.pointer("/reservation/start_time"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| ParkingError::MissingField {
                field: "start_time".to_string(),
            })?;
        let start = TimeValidator::parse(start_raw)?;

        if new_end <= start {
            return Err(ParkingError::InvalidTimeRange {
                start: start_raw.to_string(),
                end: new_end_raw.to_string(),
            });
        }

        let result = self
            .requester
            .execute(&RequestIntent::patch(
                &path,
                serde_json::json!({ "end_time": new_end_raw }),
            ))
            .await
            .into_result(&path)?;

        tracing::info!("Reservation {} extended to {}", id, new_end_raw);
        Ok(result)
    }
}
