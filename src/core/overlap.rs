use crate::core::plate::PlateNormalizer;
use crate::core::requester::ResilientRequester;
use crate::core::time::TimeValidator;
use crate::domain::model::{LicensePlate, RequestIntent, Reservation, TimeRange};
use crate::utils::error::Result;
use std::sync::Arc;

pub const RESERVATION_PATH: &str = "/api/reservation";

/// Reads the reservation list from a response body, either `{"reservations": [...]}` or a bare
/// array. Entries that are not reservation objects are dropped with a warning.
pub fn parse_reservations(body: &serde_json::Value) -> Vec<Reservation> {
    let items: &[serde_json::Value] = match body {
        serde_json::Value::Array(items) => items.as_slice(),
        serde_json::Value::Object(map) => match map.get("reservations") {
            Some(serde_json::Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    items
        .iter()
        .filter_map(
            |item| match serde_json::from_value::<Reservation>(item.clone()) {
                Ok(reservation) => Some(reservation),
                Err(e) => {
                    tracing::warn!("Dropping unreadable reservation entry {}: {}", item, e);
                    None
                }
            },
        )
        .collect()
}

/// First reservation of `plate` whose range intersects `candidate`. Reservations whose times do
/// not parse into an ordered range are skipped.
pub fn find_overlap<'a>(
    plate: &LicensePlate,
    candidate: &TimeRange,
    reservations: &'a [Reservation],
) -> Option<&'a Reservation> {
    reservations
        .iter()
        .filter(|r| {
            r.license_plate
                .as_deref()
                .is_some_and(|stored| PlateNormalizer::normalize(stored) == plate.as_str())
        })
        .find(|r| {
            let (Some(start), Some(end)) = (r.start_time.as_deref(), r.end_time.as_deref()) else {
                tracing::debug!("Skipping reservation {} in overlap check: no time range", r.id);
                return false;
            };
            match TimeValidator::range(start, end) {
                Ok(existing) => candidate.overlaps(&existing),
                Err(e) => {
                    tracing::debug!("Skipping reservation {} in overlap check: {}", r.id, e);
                    false
                }
            }
        })
}

/// Point-in-time overlap check against the backend's reservation list. Nothing here stops a
/// concurrent writer from creating a conflicting reservation after the check.
pub struct OverlapGuard {
    requester: Arc<ResilientRequester>,
}

impl OverlapGuard {
    pub fn new(requester: Arc<ResilientRequester>) -> Self {
        Self { requester }
    }

    pub async fn has_overlap(&self, plate: &LicensePlate, candidate: &TimeRange) -> Result<bool> {
        let body = self
            .requester
            .execute(&RequestIntent::get(RESERVATION_PATH))
            .await
            .into_result(RESERVATION_PATH)?;

        let reservations = parse_reservations(&body);
        match find_overlap(plate, candidate, &reservations) {
            Some(existing) => {
                tracing::info!(
                    "Found overlapping reservation for license plate {}: {} - {}",
                    plate,
                    existing.start_time.as_deref().unwrap_or_default(),
                    existing.end_time.as_deref().unwrap_or_default()
                );
                Ok(true)
            }
            None => {
                tracing::debug!(
                    "No overlap for {} among {} reservations",
                    plate,
                    reservations.len()
                );
                Ok(false)
            }
        }
    }
}
