//! MCP server implementation for Aircare
//!
//! Exposes the service desk to AI assistants over the Model Context Protocol.
//! Every tool runs under the role the server was started with.

use std::future::Future;

use aircare_core::{Role, ServiceDesk};
use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;
pub mod prompts;

pub use handlers::{
    AssignTechnician, AvailabilityRange, CreateAirconUnit, CreateBooking, CreateCustomer,
    CreateServiceRecord, CreateTechnician, DeleteBooking, Id, ListAirconUnits, ListAssignments,
    ListBookings, ListServiceRecords, ListTechnicians, McpResult, SetTechnicianActive,
    UpdateAssignment, UpdateAssignmentStatus, UpdateBooking, UpdateBookingStatus,
};

/// MCP server for Aircare
#[derive(Clone)]
pub struct AircareMcpServer {
    desk: ServiceDesk,
    role: Role,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl AircareMcpServer {
    pub fn new(desk: ServiceDesk, role: Role) -> Self {
        Self {
            desk,
            role,
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.desk.clone(), self.role)
    }

    #[tool(
        name = "create_customer",
        description = "Register a customer. Requires name and phone; email and address are optional. The address is used as the default service address for their bookings."
    )]
    async fn create_customer(&self, params: Parameters<CreateCustomer>) -> McpResult {
        self.handlers().create_customer(params).await
    }

    #[tool(
        name = "list_customers",
        description = "List all registered customers with their contact details and IDs."
    )]
    async fn list_customers(&self) -> McpResult {
        self.handlers().list_customers().await
    }

    #[tool(name = "get_customer", description = "Show one customer by ID.")]
    async fn get_customer(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().get_customer(params).await
    }

    #[tool(
        name = "create_aircon_unit",
        description = "Register an aircon unit to an existing customer. Requires customer_id, brand and model; serial_number, installation_date (YYYY-MM-DD) and location are optional."
    )]
    async fn create_aircon_unit(&self, params: Parameters<CreateAirconUnit>) -> McpResult {
        self.handlers().create_aircon_unit(params).await
    }

    #[tool(
        name = "list_aircon_units",
        description = "List aircon units, optionally only those owned by customer_id."
    )]
    async fn list_aircon_units(&self, params: Parameters<ListAirconUnits>) -> McpResult {
        self.handlers().list_aircon_units(params).await
    }

    #[tool(name = "get_aircon_unit", description = "Show one aircon unit by ID.")]
    async fn get_aircon_unit(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().get_aircon_unit(params).await
    }

    #[tool(
        name = "create_technician",
        description = "Add a technician to the roster. Requires name and phone; email and specialization are optional. New technicians are active."
    )]
    async fn create_technician(&self, params: Parameters<CreateTechnician>) -> McpResult {
        self.handlers().create_technician(params).await
    }

    #[tool(
        name = "list_technicians",
        description = "List technicians. Set active_only=true to hide deactivated technicians."
    )]
    async fn list_technicians(&self, params: Parameters<ListTechnicians>) -> McpResult {
        self.handlers().list_technicians(params).await
    }

    #[tool(
        name = "set_technician_active",
        description = "Activate or deactivate a technician. Deactivated technicians keep their history but drop off the active roster."
    )]
    async fn set_technician_active(&self, params: Parameters<SetTechnicianActive>) -> McpResult {
        self.handlers().set_technician_active(params).await
    }

    #[tool(
        name = "create_booking",
        description = "Book a service visit. Requires customer_id, service_type (maintenance, repair, installation, inspection), preferred_date (YYYY-MM-DD, today or later), preferred_time (morning, afternoon, evening), service_address and contact_phone. Link aircon_unit_id for a registered unit owned by the customer, or give aircon_brand/aircon_model for an unregistered one. New bookings are 'pending'."
    )]
    async fn create_booking(&self, params: Parameters<CreateBooking>) -> McpResult {
        self.handlers().create_booking(params).await
    }

    #[tool(
        name = "list_bookings",
        description = "List bookings, newest first. Filter by customer_id, technician_id, status, service_type, start_date and end_date (inclusive range on the preferred date)."
    )]
    async fn list_bookings(&self, params: Parameters<ListBookings>) -> McpResult {
        self.handlers().list_bookings(params).await
    }

    #[tool(name = "get_booking", description = "Show one booking by ID.")]
    async fn get_booking(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().get_booking(params).await
    }

    #[tool(
        name = "update_booking",
        description = "Edit booking details: date, time slot, address, phone, unit link, aircon details, issue description or technician. At least one field is required. Status is changed with update_booking_status instead."
    )]
    async fn update_booking(&self, params: Parameters<UpdateBooking>) -> McpResult {
        self.handlers().update_booking(params).await
    }

    #[tool(
        name = "update_booking_status",
        description = "Set a booking's status: pending, confirmed, assigned, in_progress, completed or cancelled. Any status may follow any other. Setting 'completed' writes a service record for the linked unit with its next due date, once per booking. If the record cannot be written the status still changes and the result carries a warning."
    )]
    async fn update_booking_status(&self, params: Parameters<UpdateBookingStatus>) -> McpResult {
        self.handlers().update_booking_status(params).await
    }

    #[tool(
        name = "delete_booking",
        description = "Permanently delete a booking and its assignment. Service records keep their history with the booking link cleared. Requires confirmed=true."
    )]
    async fn delete_booking(&self, params: Parameters<DeleteBooking>) -> McpResult {
        self.handlers().delete_booking(params).await
    }

    #[tool(
        name = "assign_technician",
        description = "Assign a technician to a booking. A booking has at most one assignment; a second one is rejected. The booking moves to 'assigned' and records the technician. scheduled_date, scheduled_time and notes are optional."
    )]
    async fn assign_technician(&self, params: Parameters<AssignTechnician>) -> McpResult {
        self.handlers().assign_technician(params).await
    }

    #[tool(
        name = "list_assignments",
        description = "List assignments. Filter by technician_id, status (assigned, in_progress, completed, cancelled) and scheduled date."
    )]
    async fn list_assignments(&self, params: Parameters<ListAssignments>) -> McpResult {
        self.handlers().list_assignments(params).await
    }

    #[tool(name = "get_assignment", description = "Show one assignment by ID.")]
    async fn get_assignment(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().get_assignment(params).await
    }

    #[tool(
        name = "get_assignment_by_booking",
        description = "Show the assignment of a booking, given the booking ID."
    )]
    async fn get_assignment_by_booking(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().get_assignment_by_booking(params).await
    }

    #[tool(
        name = "update_assignment",
        description = "Edit an assignment: reassign technician_id (the booking follows), scheduled_date, scheduled_time, completion_date, actual_cost (decimal string) or notes."
    )]
    async fn update_assignment(&self, params: Parameters<UpdateAssignment>) -> McpResult {
        self.handlers().update_assignment(params).await
    }

    #[tool(
        name = "update_assignment_status",
        description = "Set an assignment's status: assigned, in_progress, completed or cancelled. 'completed' also completes the booking and writes its service record, exactly as update_booking_status does."
    )]
    async fn update_assignment_status(
        &self,
        params: Parameters<UpdateAssignmentStatus>,
    ) -> McpResult {
        self.handlers().update_assignment_status(params).await
    }

    #[tool(
        name = "delete_assignment",
        description = "Remove an assignment. The booking keeps its status and technician."
    )]
    async fn delete_assignment(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_assignment(params).await
    }

    #[tool(
        name = "create_service_record",
        description = "Log a service record by hand for an aircon unit. Requires aircon_unit_id, service_date and description; booking_id, technician_id, next_due_date, status (Completed, Pending, Scheduled, In Progress) and cost are optional."
    )]
    async fn create_service_record(&self, params: Parameters<CreateServiceRecord>) -> McpResult {
        self.handlers().create_service_record(params).await
    }

    #[tool(
        name = "list_service_records",
        description = "Service history, most recent first. Filter by aircon_unit_id or booking_id."
    )]
    async fn list_service_records(&self, params: Parameters<ListServiceRecords>) -> McpResult {
        self.handlers().list_service_records(params).await
    }

    #[tool(name = "get_service_record", description = "Show one service record by ID.")]
    async fn get_service_record(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().get_service_record(params).await
    }

    #[tool(
        name = "get_availability",
        description = "Booked slot counts between start_date and end_date (inclusive). Only dates with at least one non-cancelled booking appear; a missing date is fully open. Returns a markdown table followed by the JSON map date -> {morning, afternoon, evening}."
    )]
    async fn get_availability(&self, params: Parameters<AvailabilityRange>) -> McpResult {
        self.handlers().get_availability(params).await
    }

    #[tool(
        name = "availability_calendar",
        description = "Every day between start_date and end_date with its slot counts, marked past, open or full. Each slot takes one booking per day."
    )]
    async fn availability_calendar(&self, params: Parameters<AvailabilityRange>) -> McpResult {
        self.handlers().availability_calendar(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for AircareMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "aircare".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(format!(
                r#"Aircare runs the booking desk of an aircon servicing company. You are acting as the '{}' role.

## Core Concepts
- **Customers** own **aircon units**.
- **Bookings** request a visit on a date in a morning, afternoon or evening slot. Status: pending → confirmed → assigned → in_progress → completed, or cancelled.
- **Assignments** put one technician on a booking.
- **Service records** are the unit's history. Completing a booking writes one automatically with the next due date: maintenance +3 months, repair and inspection +6 months, installation +1 month.

## Workflow
1. Check `availability_calendar` and book with `create_booking`.
2. Confirm with `update_booking_status`, then `assign_technician`.
3. Track the visit with `update_assignment_status`; `completed` closes the booking and writes the record.
4. Review history with `list_service_records`.

Use the `schedule_service` and `technician_day` prompts for guided flows."#,
                self.role
            )),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.handlers().list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.handlers().get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: AircareMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Aircare MCP server on stdio as {}", server.role);
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use aircare_core::ServiceDeskBuilder;
    use tempfile::TempDir;

    use super::*;

    async fn server(role: Role) -> (TempDir, AircareMcpServer) {
        let temp_dir = TempDir::new().unwrap();
        let desk = ServiceDeskBuilder::new()
            .with_database_path(Some(temp_dir.path().join("mcp.db")))
            .build()
            .await
            .unwrap();
        (temp_dir, AircareMcpServer::new(desk, role))
    }

    #[tokio::test]
    async fn test_router_lists_every_tool() {
        let (_temp_dir, server) = server(Role::Admin).await;
        let names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();

        assert_eq!(names.len(), 27);
        for name in [
            "create_booking",
            "update_booking_status",
            "assign_technician",
            "update_assignment_status",
            "get_availability",
            "availability_calendar",
            "list_service_records",
        ] {
            assert!(names.iter().any(|n| n == name), "missing tool {name}");
        }
    }

    #[tokio::test]
    async fn test_instructions_name_role() {
        let (_temp_dir, server) = server(Role::Technician).await;
        let info = server.get_info();
        assert!(info
            .instructions
            .unwrap()
            .contains("acting as the 'technician' role"));
    }
}
