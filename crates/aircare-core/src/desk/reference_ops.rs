//! Customer, aircon unit and technician operations for the ServiceDesk.

use log::debug;

use super::ServiceDesk;
use crate::{
    display::{AirconUnits, Customers, Technicians},
    error::{Result, ServiceError},
    models::{AirconUnit, Customer, Technician},
    params::{
        CreateAirconUnit, CreateCustomer, CreateTechnician, Id, ListAirconUnits, ListTechnicians,
        SetTechnicianActive,
    },
};

impl ServiceDesk {
    pub async fn create_customer(&self, params: &CreateCustomer) -> Result<Customer> {
        params.validate()?;
        let params = params.clone();
        debug!("Registering customer '{}'", params.name);

        self.with_db(move |db| {
            db.create_customer(
                params.name.trim(),
                params.email.as_deref(),
                params.phone.trim(),
                params.address.as_deref(),
            )
        })
        .await
    }

    pub async fn get_customer(&self, params: &Id) -> Result<Option<Customer>> {
        let id = params.id;
        self.with_db(move |db| db.get_customer(id)).await
    }

    pub async fn list_customers(&self) -> Result<Customers> {
        let customers = self.with_db(|db| db.list_customers()).await?;
        Ok(Customers(customers))
    }

    /// Registers a unit to an existing customer.
    ///
    /// # Errors
    ///
    /// * `NotFound` - the customer does not exist
    /// * `InvalidInput` - missing brand or model, malformed installation date
    pub async fn create_aircon_unit(&self, params: &CreateAirconUnit) -> Result<AirconUnit> {
        let installation_date = params.validate()?;
        let params = params.clone();
        debug!(
            "Registering {} {} for customer {}",
            params.brand, params.model, params.customer_id
        );

        self.with_db(move |db| {
            db.create_aircon_unit(
                params.customer_id,
                params.brand.trim(),
                params.model.trim(),
                params.serial_number.as_deref(),
                installation_date,
                params.location.as_deref(),
            )
        })
        .await
    }

    pub async fn get_aircon_unit(&self, params: &Id) -> Result<Option<AirconUnit>> {
        let id = params.id;
        self.with_db(move |db| db.get_aircon_unit(id)).await
    }

    pub async fn list_aircon_units(&self, params: &ListAirconUnits) -> Result<AirconUnits> {
        let customer_id = params.customer_id;
        let units = self
            .with_db(move |db| db.list_aircon_units(customer_id))
            .await?;
        Ok(AirconUnits(units))
    }

    pub async fn create_technician(&self, params: &CreateTechnician) -> Result<Technician> {
        params.validate()?;
        let params = params.clone();
        debug!("Registering technician '{}'", params.name);

        self.with_db(move |db| {
            db.create_technician(
                params.name.trim(),
                params.phone.trim(),
                params.email.as_deref(),
                params.specialization.as_deref(),
            )
        })
        .await
    }

    pub async fn get_technician(&self, params: &Id) -> Result<Option<Technician>> {
        let id = params.id;
        self.with_db(move |db| db.get_technician(id)).await
    }

    pub async fn list_technicians(&self, params: &ListTechnicians) -> Result<Technicians> {
        let active_only = params.active_only;
        let technicians = self
            .with_db(move |db| db.list_technicians(active_only))
            .await?;
        Ok(Technicians(technicians))
    }

    /// Activates or deactivates a technician.
    ///
    /// # Errors
    ///
    /// * `NotFound` - the technician does not exist
    pub async fn set_technician_active(&self, params: &SetTechnicianActive) -> Result<Technician> {
        let id = params.id;
        let active = params.active;
        self.with_db(move |db| db.set_technician_active(id, active))
            .await?
            .ok_or_else(|| ServiceError::not_found("Technician", id))
    }
}
