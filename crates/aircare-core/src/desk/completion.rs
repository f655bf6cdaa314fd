//! Service record follow-up for completed bookings.

use log::{info, warn};

use super::ServiceDesk;
use crate::{
    lifecycle::{completion_record, RecordOutcome},
    models::Booking,
};

impl ServiceDesk {
    /// Writes the service record for a booking that just reached
    /// `completed`, unless one already exists.
    ///
    /// Never fails: any error is logged and handed back as
    /// [`RecordOutcome::Failed`] so the committed status change stands.
    pub(crate) async fn record_completion(&self, booking: Booking) -> RecordOutcome {
        let booking_id = booking.id;
        let outcome = self
            .with_db(move |db| {
                let created =
                    db.create_service_record_once(booking.id, || completion_record(&booking))?;
                Ok(created.map_or(RecordOutcome::AlreadyRecorded, RecordOutcome::Created))
            })
            .await;

        match outcome {
            Ok(RecordOutcome::Created(record)) => {
                info!(
                    "Created service record {} for completed booking {booking_id}; next due {}",
                    record.id,
                    record
                        .next_due_date
                        .map_or_else(|| "unset".to_string(), |d| d.to_string())
                );
                RecordOutcome::Created(record)
            }
            Ok(other) => other,
            Err(e) => {
                warn!("Failed to create service record for booking {booking_id}: {e}");
                RecordOutcome::Failed {
                    reason: format!("Service record was not created: {e}"),
                }
            }
        }
    }
}
