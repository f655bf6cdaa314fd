//! Service record operations for the ServiceDesk.

use log::debug;

use super::ServiceDesk;
use crate::{
    display::ServiceRecords,
    error::Result,
    models::ServiceRecord,
    params::{CreateServiceRecord, Id, ListServiceRecords},
};

impl ServiceDesk {
    /// Records a service performed on a unit.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - malformed date, status text or cost
    /// * `InvalidStatus` - unknown service record status
    /// * `NotFound` - the unit, technician or booking does not exist
    pub async fn create_service_record(
        &self,
        params: &CreateServiceRecord,
    ) -> Result<ServiceRecord> {
        let record = params.validate()?;
        debug!(
            "Recording {} service on unit {}",
            record.status, record.aircon_unit_id
        );
        self.with_db(move |db| db.create_service_record(&record))
            .await
    }

    pub async fn get_service_record(&self, params: &Id) -> Result<Option<ServiceRecord>> {
        let id = params.id;
        self.with_db(move |db| db.get_service_record(id)).await
    }

    /// Service history, optionally narrowed to one unit or one booking.
    pub async fn list_service_records(
        &self,
        params: &ListServiceRecords,
    ) -> Result<ServiceRecords> {
        let unit_id = params.aircon_unit_id;
        let booking_id = params.booking_id;
        let records = self
            .with_db(move |db| db.list_service_records(unit_id, booking_id))
            .await?;
        Ok(ServiceRecords(records))
    }
}
