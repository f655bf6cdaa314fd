//! Availability operations for the ServiceDesk.

use log::debug;

use super::ServiceDesk;
use crate::{
    availability::Availability,
    display::Calendar,
    error::Result,
    params::AvailabilityRange,
};

impl ServiceDesk {
    /// Per-date slot counts for `[start_date, end_date]`.
    ///
    /// Cancelled bookings do not count and dates with nothing counted are
    /// absent. The result is informational and never blocks a booking.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - malformed date
    /// * `InvalidRange` - end date before start date
    pub async fn get_availability(&self, params: &AvailabilityRange) -> Result<Availability> {
        let (start, end) = params.validate()?;
        debug!("Aggregating slot availability from {start} to {end}");

        let rows = self.with_db(move |db| db.slot_rows(start, end)).await?;
        Ok(Availability::aggregate(rows))
    }

    /// Day-by-day calendar for the range, flagging past and full days.
    pub async fn availability_calendar(&self, params: &AvailabilityRange) -> Result<Calendar> {
        let (start, end) = params.validate()?;
        let availability = self.get_availability(params).await?;
        Ok(Calendar(availability.calendar(start, end, self.today())))
    }
}
