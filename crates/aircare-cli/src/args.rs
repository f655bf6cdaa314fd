//! Command-line interface definitions using clap
//!
//! Every subcommand has an argument struct carrying the clap attributes and a
//! `From` conversion into the matching core parameter type, so the core stays
//! free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → ServiceDesk
//! ```

use std::{fmt, path::PathBuf};

use aircare_core::{params::*, Role};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use jiff::civil::Date;

/// Booking desk for aircon servicing
///
/// Customers book service visits into morning, afternoon or evening slots,
/// admins assign technicians, and completed visits leave a service record on
/// the unit with the date its next service falls due. Runs either as a
/// command-line tool or as an MCP (Model Context Protocol) server on stdio.
#[derive(Parser)]
#[command(version, about, name = "aircare")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/aircare/aircare.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Role the commands run as
    #[arg(long, global = true, value_enum, default_value_t = RoleArg::Admin)]
    pub role: RoleArg,

    /// How long to wait for a locked database, in milliseconds
    #[arg(long, global = true, default_value_t = 5000)]
    pub busy_timeout: u64,

    /// Treat this date as today when checking for past dates
    #[arg(long, global = true, hide = true)]
    pub today: Option<Date>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage customers
    #[command(alias = "c")]
    Customer {
        #[command(subcommand)]
        command: CustomerCommands,
    },
    /// Manage aircon units
    #[command(alias = "u")]
    Unit {
        #[command(subcommand)]
        command: UnitCommands,
    },
    /// Manage technicians
    #[command(alias = "t")]
    Technician {
        #[command(subcommand)]
        command: TechnicianCommands,
    },
    /// Manage service bookings
    #[command(alias = "b")]
    Booking {
        #[command(subcommand)]
        command: BookingCommands,
    },
    /// Manage technician assignments
    #[command(alias = "a")]
    Assignment {
        #[command(subcommand)]
        command: AssignmentCommands,
    },
    /// Manage service records
    #[command(alias = "r")]
    Record {
        #[command(subcommand)]
        command: RecordCommands,
    },
    /// Show slot occupancy
    #[command(alias = "av")]
    Availability {
        #[command(subcommand)]
        command: AvailabilityCommands,
    },
    /// Start the MCP server
    Serve,
}

// ============================================================================
// Value enums
// ============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Admin,
    Technician,
    Customer,
}

impl From<RoleArg> for Role {
    fn from(val: RoleArg) -> Self {
        match val {
            RoleArg::Admin => Role::Admin,
            RoleArg::Technician => Role::Technician,
            RoleArg::Customer => Role::Customer,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SlotArg {
    Morning,
    Afternoon,
    Evening,
}

impl fmt::Display for SlotArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotArg::Morning => write!(f, "morning"),
            SlotArg::Afternoon => write!(f, "afternoon"),
            SlotArg::Evening => write!(f, "evening"),
        }
    }
}

/// Booking status as typed on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BookingStatusArg {
    Pending,
    Confirmed,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl fmt::Display for BookingStatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatusArg::Pending => write!(f, "pending"),
            BookingStatusArg::Confirmed => write!(f, "confirmed"),
            BookingStatusArg::Assigned => write!(f, "assigned"),
            BookingStatusArg::InProgress => write!(f, "in_progress"),
            BookingStatusArg::Completed => write!(f, "completed"),
            BookingStatusArg::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AssignmentStatusArg {
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl fmt::Display for AssignmentStatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentStatusArg::Assigned => write!(f, "assigned"),
            AssignmentStatusArg::InProgress => write!(f, "in_progress"),
            AssignmentStatusArg::Completed => write!(f, "completed"),
            AssignmentStatusArg::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Any command that only needs an ID
#[derive(ClapArgs)]
pub struct IdArgs {
    #[arg(help = "Unique identifier of the record")]
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

// ============================================================================
// Customers, units and technicians
// ============================================================================

#[derive(ClapArgs)]
pub struct CreateCustomerArgs {
    /// Customer name
    pub name: String,
    #[arg(short, long, help = "Contact phone number")]
    pub phone: String,
    #[arg(short, long)]
    pub email: Option<String>,
    #[arg(short, long, help = "Home address used as the default service address")]
    pub address: Option<String>,
}

impl From<CreateCustomerArgs> for CreateCustomer {
    fn from(val: CreateCustomerArgs) -> Self {
        CreateCustomer {
            name: val.name,
            email: val.email,
            phone: val.phone,
            address: val.address,
        }
    }
}

#[derive(Subcommand)]
pub enum CustomerCommands {
    /// Register a customer
    #[command(alias = "c")]
    Create(CreateCustomerArgs),
    /// List customers
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show one customer
    #[command(alias = "s")]
    Show(IdArgs),
}

#[derive(ClapArgs)]
pub struct CreateUnitArgs {
    #[arg(help = "Customer who owns the unit")]
    pub customer_id: u64,
    pub brand: String,
    pub model: String,
    #[arg(long)]
    pub serial: Option<String>,
    #[arg(long, help = "Installation date (YYYY-MM-DD)")]
    pub installed: Option<String>,
    #[arg(short, long, help = "Where the unit is installed, e.g. 'Master bedroom'")]
    pub location: Option<String>,
}

impl From<CreateUnitArgs> for CreateAirconUnit {
    fn from(val: CreateUnitArgs) -> Self {
        CreateAirconUnit {
            customer_id: val.customer_id,
            brand: val.brand,
            model: val.model,
            serial_number: val.serial,
            installation_date: val.installed,
            location: val.location,
        }
    }
}

#[derive(ClapArgs)]
pub struct ListUnitsArgs {
    #[arg(long, help = "Only units owned by this customer")]
    pub customer: Option<u64>,
}

impl From<ListUnitsArgs> for ListAirconUnits {
    fn from(val: ListUnitsArgs) -> Self {
        ListAirconUnits {
            customer_id: val.customer,
        }
    }
}

#[derive(Subcommand)]
pub enum UnitCommands {
    /// Register an aircon unit to a customer
    #[command(alias = "c")]
    Create(CreateUnitArgs),
    /// List aircon units
    #[command(aliases = ["l", "ls"])]
    List(ListUnitsArgs),
    /// Show one aircon unit
    #[command(alias = "s")]
    Show(IdArgs),
}

#[derive(ClapArgs)]
pub struct CreateTechnicianArgs {
    pub name: String,
    #[arg(short, long)]
    pub phone: String,
    #[arg(short, long)]
    pub email: Option<String>,
    #[arg(short, long, help = "Skills, e.g. 'inverter systems'")]
    pub specialization: Option<String>,
}

impl From<CreateTechnicianArgs> for CreateTechnician {
    fn from(val: CreateTechnicianArgs) -> Self {
        CreateTechnician {
            name: val.name,
            phone: val.phone,
            email: val.email,
            specialization: val.specialization,
        }
    }
}

#[derive(ClapArgs)]
pub struct ListTechniciansArgs {
    #[arg(long, help = "Hide deactivated technicians")]
    pub active: bool,
}

impl From<ListTechniciansArgs> for ListTechnicians {
    fn from(val: ListTechniciansArgs) -> Self {
        ListTechnicians {
            active_only: val.active,
        }
    }
}

#[derive(Subcommand)]
pub enum TechnicianCommands {
    /// Add a technician
    #[command(alias = "c")]
    Create(CreateTechnicianArgs),
    /// List technicians
    #[command(aliases = ["l", "ls"])]
    List(ListTechniciansArgs),
    /// Show one technician
    #[command(alias = "s")]
    Show(IdArgs),
    /// Take a technician off the roster
    Deactivate(IdArgs),
    /// Put a technician back on the roster
    Activate(IdArgs),
}

// ============================================================================
// Bookings
// ============================================================================

/// Book a service visit
#[derive(ClapArgs)]
pub struct CreateBookingArgs {
    #[arg(help = "Customer the visit is for")]
    pub customer_id: u64,
    #[arg(help = "maintenance, repair, installation or inspection")]
    pub service_type: String,
    #[arg(help = "Preferred date (YYYY-MM-DD), today or later")]
    pub date: String,
    #[arg(value_enum)]
    pub slot: SlotArg,
    #[arg(long, help = "Address the technician should visit")]
    pub address: String,
    #[arg(long, help = "Phone number to reach on the day")]
    pub phone: String,
    #[arg(long, help = "Registered unit to service")]
    pub unit: Option<u64>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long, help = "Brand of an unregistered unit")]
    pub brand: Option<String>,
    #[arg(long, help = "Model of an unregistered unit")]
    pub model: Option<String>,
    #[arg(short, long, help = "What is wrong with the unit")]
    pub issue: Option<String>,
}

impl From<CreateBookingArgs> for CreateBooking {
    fn from(val: CreateBookingArgs) -> Self {
        CreateBooking {
            customer_id: val.customer_id,
            aircon_unit_id: val.unit,
            service_type: val.service_type,
            preferred_date: val.date,
            preferred_time: val.slot.to_string(),
            service_address: val.address,
            postal_code: val.postal_code,
            contact_phone: val.phone,
            aircon_brand: val.brand,
            aircon_model: val.model,
            issue_description: val.issue,
        }
    }
}

#[derive(ClapArgs)]
pub struct ListBookingsArgs {
    #[arg(long)]
    pub customer: Option<u64>,
    #[arg(long)]
    pub technician: Option<u64>,
    #[arg(long, value_enum)]
    pub status: Option<BookingStatusArg>,
    #[arg(long)]
    pub service_type: Option<String>,
    #[arg(long, help = "Earliest preferred date (YYYY-MM-DD)")]
    pub from: Option<String>,
    #[arg(long, help = "Latest preferred date (YYYY-MM-DD)")]
    pub to: Option<String>,
}

impl From<ListBookingsArgs> for ListBookings {
    fn from(val: ListBookingsArgs) -> Self {
        ListBookings {
            customer_id: val.customer,
            technician_id: val.technician,
            status: val.status.map(|s| s.to_string()),
            service_type: val.service_type,
            start_date: val.from,
            end_date: val.to,
        }
    }
}

#[derive(ClapArgs)]
pub struct UpdateBookingArgs {
    pub id: u64,
    #[arg(long)]
    pub unit: Option<u64>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long, value_enum)]
    pub slot: Option<SlotArg>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(short, long)]
    pub issue: Option<String>,
    #[arg(long)]
    pub technician: Option<u64>,
}

impl From<UpdateBookingArgs> for UpdateBooking {
    fn from(val: UpdateBookingArgs) -> Self {
        UpdateBooking {
            id: val.id,
            aircon_unit_id: val.unit,
            preferred_date: val.date,
            preferred_time: val.slot.map(|s| s.to_string()),
            service_address: val.address,
            postal_code: val.postal_code,
            contact_phone: val.phone,
            aircon_brand: val.brand,
            aircon_model: val.model,
            issue_description: val.issue,
            technician_id: val.technician,
        }
    }
}

/// Move a booking to a new status
///
/// Any status may follow any other. Setting `completed` also writes a service
/// record for the booking's unit unless one already exists.
#[derive(ClapArgs)]
pub struct BookingStatusArgs {
    pub id: u64,
    #[arg(value_enum)]
    pub status: BookingStatusArg,
}

impl From<BookingStatusArgs> for UpdateBookingStatus {
    fn from(val: BookingStatusArgs) -> Self {
        UpdateBookingStatus {
            id: val.id,
            status: val.status.to_string(),
        }
    }
}

#[derive(ClapArgs)]
pub struct DeleteBookingArgs {
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteBookingArgs> for DeleteBooking {
    fn from(val: DeleteBookingArgs) -> Self {
        DeleteBooking {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum BookingCommands {
    /// Book a service visit
    #[command(alias = "c")]
    Create(CreateBookingArgs),
    /// List bookings, newest first
    #[command(aliases = ["l", "ls"])]
    List(ListBookingsArgs),
    /// Show one booking
    #[command(alias = "s")]
    Show(IdArgs),
    /// Edit booking details
    #[command(alias = "u")]
    Update(UpdateBookingArgs),
    /// Move a booking to a new status
    #[command(alias = "st")]
    Status(BookingStatusArgs),
    /// Delete a booking and its assignment
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteBookingArgs),
}

// ============================================================================
// Assignments
// ============================================================================

#[derive(ClapArgs)]
pub struct AssignArgs {
    pub booking_id: u64,
    pub technician_id: u64,
    #[arg(long, help = "Visit date (YYYY-MM-DD)")]
    pub date: Option<String>,
    #[arg(long, help = "Visit time, e.g. 09:30")]
    pub time: Option<String>,
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl From<AssignArgs> for AssignTechnician {
    fn from(val: AssignArgs) -> Self {
        AssignTechnician {
            booking_id: val.booking_id,
            technician_id: val.technician_id,
            scheduled_date: val.date,
            scheduled_time: val.time,
            notes: val.notes,
        }
    }
}

#[derive(ClapArgs)]
pub struct ListAssignmentsArgs {
    #[arg(long)]
    pub technician: Option<u64>,
    #[arg(long, value_enum)]
    pub status: Option<AssignmentStatusArg>,
    #[arg(long, help = "Scheduled date (YYYY-MM-DD)")]
    pub date: Option<String>,
}

impl From<ListAssignmentsArgs> for ListAssignments {
    fn from(val: ListAssignmentsArgs) -> Self {
        ListAssignments {
            technician_id: val.technician,
            status: val.status.map(|s| s.to_string()),
            date: val.date,
        }
    }
}

#[derive(ClapArgs)]
pub struct ShowAssignmentArgs {
    pub id: u64,
    /// Treat the ID as a booking ID
    #[arg(long)]
    pub booking: bool,
}

#[derive(ClapArgs)]
pub struct UpdateAssignmentArgs {
    pub id: u64,
    #[arg(long, help = "Reassign to another technician")]
    pub technician: Option<u64>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long, help = "Date the work was finished (YYYY-MM-DD)")]
    pub completed_on: Option<String>,
    #[arg(long, help = "Amount charged, e.g. 120.50")]
    pub cost: Option<String>,
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl From<UpdateAssignmentArgs> for UpdateAssignment {
    fn from(val: UpdateAssignmentArgs) -> Self {
        UpdateAssignment {
            id: val.id,
            technician_id: val.technician,
            scheduled_date: val.date,
            scheduled_time: val.time,
            completion_date: val.completed_on,
            actual_cost: val.cost,
            notes: val.notes,
        }
    }
}

#[derive(ClapArgs)]
pub struct AssignmentStatusArgs {
    pub id: u64,
    #[arg(value_enum)]
    pub status: AssignmentStatusArg,
}

impl From<AssignmentStatusArgs> for UpdateAssignmentStatus {
    fn from(val: AssignmentStatusArgs) -> Self {
        UpdateAssignmentStatus {
            id: val.id,
            status: val.status.to_string(),
        }
    }
}

#[derive(Subcommand)]
pub enum AssignmentCommands {
    /// Assign a technician to a booking
    #[command(alias = "c")]
    Create(AssignArgs),
    /// List assignments
    #[command(aliases = ["l", "ls"])]
    List(ListAssignmentsArgs),
    /// Show one assignment
    #[command(alias = "s")]
    Show(ShowAssignmentArgs),
    /// Edit scheduling, cost or notes
    #[command(alias = "u")]
    Update(UpdateAssignmentArgs),
    /// Move an assignment to a new status
    #[command(alias = "st")]
    Status(AssignmentStatusArgs),
    /// Remove an assignment
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

// ============================================================================
// Service records and availability
// ============================================================================

#[derive(ClapArgs)]
pub struct CreateRecordArgs {
    pub unit_id: u64,
    #[arg(help = "Service date (YYYY-MM-DD)")]
    pub date: String,
    pub description: String,
    #[arg(long)]
    pub booking: Option<u64>,
    #[arg(long)]
    pub technician: Option<u64>,
    #[arg(long, help = "Next service due date (YYYY-MM-DD)")]
    pub next_due: Option<String>,
    #[arg(long, help = "Completed, Pending, Scheduled or 'In Progress'")]
    pub status: Option<String>,
    #[arg(long)]
    pub cost: Option<String>,
}

impl From<CreateRecordArgs> for CreateServiceRecord {
    fn from(val: CreateRecordArgs) -> Self {
        CreateServiceRecord {
            aircon_unit_id: val.unit_id,
            booking_id: val.booking,
            service_date: val.date,
            description: val.description,
            technician_id: val.technician,
            next_due_date: val.next_due,
            status: val.status,
            cost: val.cost,
        }
    }
}

#[derive(ClapArgs)]
pub struct ListRecordsArgs {
    #[arg(long)]
    pub unit: Option<u64>,
    #[arg(long)]
    pub booking: Option<u64>,
}

impl From<ListRecordsArgs> for ListServiceRecords {
    fn from(val: ListRecordsArgs) -> Self {
        ListServiceRecords {
            aircon_unit_id: val.unit,
            booking_id: val.booking,
        }
    }
}

#[derive(Subcommand)]
pub enum RecordCommands {
    /// Log a service record by hand
    #[command(alias = "c")]
    Create(CreateRecordArgs),
    /// List service history, most recent first
    #[command(aliases = ["l", "ls"])]
    List(ListRecordsArgs),
    /// Show one service record
    #[command(alias = "s")]
    Show(IdArgs),
}

#[derive(ClapArgs)]
pub struct RangeArgs {
    #[arg(help = "First date (YYYY-MM-DD)")]
    pub start: String,
    #[arg(help = "Last date (YYYY-MM-DD), inclusive")]
    pub end: String,
    /// Print the raw date → slot count map as JSON
    #[arg(long)]
    pub json: bool,
}

impl From<&RangeArgs> for AvailabilityRange {
    fn from(val: &RangeArgs) -> Self {
        AvailabilityRange {
            start_date: val.start.clone(),
            end_date: val.end.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum AvailabilityCommands {
    /// Booked slot counts for dates that have bookings
    #[command(alias = "s")]
    Slots(RangeArgs),
    /// Every day of the range with open/full/past flags
    #[command(alias = "cal")]
    Calendar(RangeArgs),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_status_args_use_wire_names() {
        assert_eq!(BookingStatusArg::InProgress.to_string(), "in_progress");
        assert_eq!(AssignmentStatusArg::Cancelled.to_string(), "cancelled");
        assert_eq!(SlotArg::Afternoon.to_string(), "afternoon");
    }

    #[test]
    fn test_parse_booking_create() {
        let args = Args::parse_from([
            "aircare",
            "--role",
            "customer",
            "booking",
            "create",
            "3",
            "repair",
            "2025-04-01",
            "evening",
            "--address",
            "9 Bedok North",
            "--phone",
            "+65 9000 0000",
        ]);
        assert_eq!(args.role, RoleArg::Customer);

        let Some(Commands::Booking {
            command: BookingCommands::Create(create),
        }) = args.command
        else {
            panic!("expected booking create");
        };
        let params = CreateBooking::from(create);
        assert_eq!(params.customer_id, 3);
        assert_eq!(params.preferred_time, "evening");
        assert_eq!(params.aircon_unit_id, None);
    }
}
