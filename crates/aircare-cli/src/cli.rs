//! Command execution for the terminal front end.
//!
//! Each handler checks the caller's role against the access policy, calls
//! the desk, and renders the result's markdown.

use aircare_core::{
    params::{Id, ListBookings, ListTechnicians, SetTechnicianActive},
    policy::{authorize, Action, Resource},
    CreateResult, DeleteResult, OperationStatus, Role, ServiceDesk, UpdateResult,
};
use anyhow::{bail, Context, Result};
use log::{debug, warn};

use crate::{
    args::{
        AssignmentCommands, AvailabilityCommands, BookingCommands, CustomerCommands,
        RecordCommands, TechnicianCommands, UnitCommands,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    desk: ServiceDesk,
    renderer: TerminalRenderer,
    role: Role,
}

impl Cli {
    pub fn new(desk: ServiceDesk, renderer: TerminalRenderer, role: Role) -> Self {
        Self {
            desk,
            renderer,
            role,
        }
    }

    fn authorize(&self, resource: Resource, action: Action) -> Result<()> {
        debug!("authorize {} {:?} {:?}", self.role, action, resource);
        Ok(authorize(self.role, resource, action)?)
    }

    fn show(&self, markdown: impl ToString) {
        self.renderer.render(&markdown.to_string());
    }

    pub async fn handle_customer_command(&self, command: CustomerCommands) -> Result<()> {
        match command {
            CustomerCommands::Create(args) => {
                self.authorize(Resource::Customers, Action::Create)?;
                let customer = self
                    .desk
                    .create_customer(&args.into())
                    .await
                    .context("Failed to create customer")?;
                self.show(CreateResult::new(customer));
            }
            CustomerCommands::List => {
                self.authorize(Resource::Customers, Action::Read)?;
                let customers = self
                    .desk
                    .list_customers()
                    .await
                    .context("Failed to list customers")?;
                self.show(customers);
            }
            CustomerCommands::Show(args) => {
                self.authorize(Resource::Customers, Action::Read)?;
                let id = args.id;
                match self.desk.get_customer(&args.into()).await? {
                    Some(customer) => self.show(customer),
                    None => bail!("Customer with ID {id} not found"),
                }
            }
        }
        Ok(())
    }

    pub async fn handle_unit_command(&self, command: UnitCommands) -> Result<()> {
        match command {
            UnitCommands::Create(args) => {
                self.authorize(Resource::AirconUnits, Action::Create)?;
                let unit = self
                    .desk
                    .create_aircon_unit(&args.into())
                    .await
                    .context("Failed to register aircon unit")?;
                self.show(CreateResult::new(unit));
            }
            UnitCommands::List(args) => {
                self.authorize(Resource::AirconUnits, Action::Read)?;
                let units = self
                    .desk
                    .list_aircon_units(&args.into())
                    .await
                    .context("Failed to list aircon units")?;
                self.show(units);
            }
            UnitCommands::Show(args) => {
                self.authorize(Resource::AirconUnits, Action::Read)?;
                let id = args.id;
                match self.desk.get_aircon_unit(&args.into()).await? {
                    Some(unit) => self.show(unit),
                    None => bail!("Aircon unit with ID {id} not found"),
                }
            }
        }
        Ok(())
    }

    pub async fn handle_technician_command(&self, command: TechnicianCommands) -> Result<()> {
        match command {
            TechnicianCommands::Create(args) => {
                self.authorize(Resource::Technicians, Action::Create)?;
                let technician = self
                    .desk
                    .create_technician(&args.into())
                    .await
                    .context("Failed to create technician")?;
                self.show(CreateResult::new(technician));
            }
            TechnicianCommands::List(args) => {
                self.authorize(Resource::Technicians, Action::Read)?;
                let technicians = self
                    .desk
                    .list_technicians(&ListTechnicians::from(args))
                    .await
                    .context("Failed to list technicians")?;
                self.show(technicians);
            }
            TechnicianCommands::Show(args) => {
                self.authorize(Resource::Technicians, Action::Read)?;
                let id = args.id;
                match self.desk.get_technician(&args.into()).await? {
                    Some(technician) => self.show(technician),
                    None => bail!("Technician with ID {id} not found"),
                }
            }
            TechnicianCommands::Deactivate(args) => self.set_active(args.id, false).await?,
            TechnicianCommands::Activate(args) => self.set_active(args.id, true).await?,
        }
        Ok(())
    }

    async fn set_active(&self, id: u64, active: bool) -> Result<()> {
        self.authorize(Resource::Technicians, Action::Update)?;
        let technician = self
            .desk
            .set_technician_active(&SetTechnicianActive { id, active })
            .await
            .context("Failed to update technician")?;
        let change = if active { "Activated" } else { "Deactivated" };
        self.show(UpdateResult::with_changes(
            technician,
            vec![change.to_string()],
        ));
        Ok(())
    }

    pub async fn handle_booking_command(&self, command: BookingCommands) -> Result<()> {
        match command {
            BookingCommands::Create(args) => {
                self.authorize(Resource::Bookings, Action::Create)?;
                let booking = self
                    .desk
                    .create_booking(&args.into())
                    .await
                    .context("Failed to create booking")?;
                self.show(CreateResult::new(booking));
            }
            BookingCommands::List(args) => {
                self.authorize(Resource::Bookings, Action::Read)?;
                let bookings = self
                    .desk
                    .list_bookings(&args.into())
                    .await
                    .context("Failed to list bookings")?;
                self.show(bookings);
            }
            BookingCommands::Show(args) => {
                self.authorize(Resource::Bookings, Action::Read)?;
                let id = args.id;
                match self.desk.get_booking(&args.into()).await? {
                    Some(booking) => self.show(booking),
                    None => bail!("Booking with ID {id} not found"),
                }
            }
            BookingCommands::Update(args) => {
                self.authorize(Resource::Bookings, Action::Update)?;
                let (booking, changes) = self
                    .desk
                    .update_booking(&args.into())
                    .await
                    .context("Failed to update booking")?;
                self.show(UpdateResult::with_changes(booking, changes));
            }
            BookingCommands::Status(args) => {
                self.authorize(Resource::Bookings, Action::UpdateStatus)?;
                let change = self
                    .desk
                    .update_booking_status(&args.into())
                    .await
                    .context("Failed to update booking status")?;
                if let Some(warning) = change.warning() {
                    warn!("{warning}");
                }
                self.show(change);
            }
            BookingCommands::Delete(args) => {
                self.authorize(Resource::Bookings, Action::Delete)?;
                let id = args.id;
                match self
                    .desk
                    .delete_booking(&args.into())
                    .await
                    .context("Failed to delete booking")?
                {
                    Some(booking) => self.show(DeleteResult::new(booking)),
                    None => self.show(OperationStatus::not_found("Booking", id)),
                }
            }
        }
        Ok(())
    }

    pub async fn handle_assignment_command(&self, command: AssignmentCommands) -> Result<()> {
        match command {
            AssignmentCommands::Create(args) => {
                self.authorize(Resource::Assignments, Action::Create)?;
                let assignment = self
                    .desk
                    .assign_technician(&args.into())
                    .await
                    .context("Failed to assign technician")?;
                self.show(CreateResult::new(assignment));
            }
            AssignmentCommands::List(args) => {
                self.authorize(Resource::Assignments, Action::Read)?;
                let assignments = self
                    .desk
                    .list_assignments(&args.into())
                    .await
                    .context("Failed to list assignments")?;
                self.show(assignments);
            }
            AssignmentCommands::Show(args) => {
                self.authorize(Resource::Assignments, Action::Read)?;
                let id = Id { id: args.id };
                let assignment = if args.booking {
                    self.desk.get_assignment_by_booking(&id).await?
                } else {
                    self.desk.get_assignment(&id).await?
                };
                match assignment {
                    Some(assignment) => self.show(assignment),
                    None if args.booking => bail!("Booking {} has no assignment", args.id),
                    None => bail!("Assignment with ID {} not found", args.id),
                }
            }
            AssignmentCommands::Update(args) => {
                self.authorize(Resource::Assignments, Action::Update)?;
                let (assignment, changes) = self
                    .desk
                    .update_assignment(&args.into())
                    .await
                    .context("Failed to update assignment")?;
                self.show(UpdateResult::with_changes(assignment, changes));
            }
            AssignmentCommands::Status(args) => {
                self.authorize(Resource::Assignments, Action::UpdateStatus)?;
                let change = self
                    .desk
                    .update_assignment_status(&args.into())
                    .await
                    .context("Failed to update assignment status")?;
                if let Some(warning) = change.warning() {
                    warn!("{warning}");
                }
                self.show(change);
            }
            AssignmentCommands::Delete(args) => {
                self.authorize(Resource::Assignments, Action::Delete)?;
                let id = args.id;
                match self
                    .desk
                    .delete_assignment(&args.into())
                    .await
                    .context("Failed to delete assignment")?
                {
                    Some(assignment) => self.show(DeleteResult::new(assignment)),
                    None => self.show(OperationStatus::not_found("Assignment", id)),
                }
            }
        }
        Ok(())
    }

    pub async fn handle_record_command(&self, command: RecordCommands) -> Result<()> {
        match command {
            RecordCommands::Create(args) => {
                self.authorize(Resource::ServiceRecords, Action::Create)?;
                let record = self
                    .desk
                    .create_service_record(&args.into())
                    .await
                    .context("Failed to create service record")?;
                self.show(CreateResult::new(record));
            }
            RecordCommands::List(args) => {
                self.authorize(Resource::ServiceRecords, Action::Read)?;
                let records = self
                    .desk
                    .list_service_records(&args.into())
                    .await
                    .context("Failed to list service records")?;
                self.show(records);
            }
            RecordCommands::Show(args) => {
                self.authorize(Resource::ServiceRecords, Action::Read)?;
                let id = args.id;
                match self.desk.get_service_record(&args.into()).await? {
                    Some(record) => self.show(record),
                    None => bail!("Service record with ID {id} not found"),
                }
            }
        }
        Ok(())
    }

    pub async fn handle_availability_command(&self, command: AvailabilityCommands) -> Result<()> {
        self.authorize(Resource::Availability, Action::Read)?;
        match command {
            AvailabilityCommands::Slots(args) => {
                let availability = self
                    .desk
                    .get_availability(&(&args).into())
                    .await
                    .context("Failed to load availability")?;
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&availability)?);
                } else {
                    self.show(availability);
                }
            }
            AvailabilityCommands::Calendar(args) => {
                let calendar = self
                    .desk
                    .availability_calendar(&(&args).into())
                    .await
                    .context("Failed to build calendar")?;
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&calendar.0)?);
                } else {
                    self.show(calendar);
                }
            }
        }
        Ok(())
    }

    /// Default view with no subcommand: what is waiting on the desk.
    pub async fn pending_bookings(&self) -> Result<()> {
        self.authorize(Resource::Bookings, Action::Read)?;
        let bookings = self
            .desk
            .list_bookings(&ListBookings {
                status: Some("pending".to_string()),
                ..Default::default()
            })
            .await
            .context("Failed to list bookings")?;
        self.show(format!("# Pending bookings\n\n{bookings}"));
        Ok(())
    }
}
