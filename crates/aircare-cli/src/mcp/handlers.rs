//! MCP tool handlers implementation

use aircare_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    params as core,
    policy::{authorize, Action, Resource},
    Role, ServiceDesk,
};
use log::{debug, warn};
use rmcp::{
    handler::server::tool::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    service::RequestContext,
    ErrorData, RoleServer,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{
    errors::{not_found, to_mcp_error},
    prompts::get_prompt_templates,
};

// ============================================================================
// Generic Parameter Wrapper Implementation
// ============================================================================
//
// Core parameter types already derive Deserialize and, with the `schema`
// feature, JsonSchema. The transparent wrapper gives them a single MCP-facing
// type without repeating each field list here.

/// Generic MCP wrapper for core parameter types with serde integration
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreateCustomer = McpParams<core::CreateCustomer>;
pub type CreateAirconUnit = McpParams<core::CreateAirconUnit>;
pub type ListAirconUnits = McpParams<core::ListAirconUnits>;
pub type CreateTechnician = McpParams<core::CreateTechnician>;
pub type ListTechnicians = McpParams<core::ListTechnicians>;
pub type SetTechnicianActive = McpParams<core::SetTechnicianActive>;
pub type CreateBooking = McpParams<core::CreateBooking>;
pub type ListBookings = McpParams<core::ListBookings>;
pub type UpdateBooking = McpParams<core::UpdateBooking>;
pub type UpdateBookingStatus = McpParams<core::UpdateBookingStatus>;
pub type DeleteBooking = McpParams<core::DeleteBooking>;
pub type AssignTechnician = McpParams<core::AssignTechnician>;
pub type ListAssignments = McpParams<core::ListAssignments>;
pub type UpdateAssignment = McpParams<core::UpdateAssignment>;
pub type UpdateAssignmentStatus = McpParams<core::UpdateAssignmentStatus>;
pub type CreateServiceRecord = McpParams<core::CreateServiceRecord>;
pub type ListServiceRecords = McpParams<core::ListServiceRecords>;
pub type AvailabilityRange = McpParams<core::AvailabilityRange>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(markdown: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        markdown.to_string(),
    )]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    desk: ServiceDesk,
    role: Role,
}

impl McpHandlers {
    pub fn new(desk: ServiceDesk, role: Role) -> Self {
        Self { desk, role }
    }

    fn authorize(&self, resource: Resource, action: Action) -> Result<(), ErrorData> {
        authorize(self.role, resource, action).map_err(|e| to_mcp_error("Not permitted", &e))
    }

    // ------------------------------------------------------------------
    // Customers, units, technicians
    // ------------------------------------------------------------------

    pub async fn create_customer(
        &self,
        Parameters(params): Parameters<CreateCustomer>,
    ) -> McpResult {
        debug!("create_customer: {:?}", params);
        self.authorize(Resource::Customers, Action::Create)?;

        let customer = self
            .desk
            .create_customer(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create customer", &e))?;
        text(CreateResult::new(customer))
    }

    pub async fn list_customers(&self) -> McpResult {
        debug!("list_customers");
        self.authorize(Resource::Customers, Action::Read)?;

        let customers = self
            .desk
            .list_customers()
            .await
            .map_err(|e| to_mcp_error("Failed to list customers", &e))?;
        text(format!("# Customers\n\n{customers}"))
    }

    pub async fn get_customer(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("get_customer: {:?}", params);
        self.authorize(Resource::Customers, Action::Read)?;

        let id = params.as_ref().id;
        let customer = self
            .desk
            .get_customer(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get customer", &e))?
            .ok_or_else(|| not_found("Customer", id))?;
        text(customer)
    }

    pub async fn create_aircon_unit(
        &self,
        Parameters(params): Parameters<CreateAirconUnit>,
    ) -> McpResult {
        debug!("create_aircon_unit: {:?}", params);
        self.authorize(Resource::AirconUnits, Action::Create)?;

        let unit = self
            .desk
            .create_aircon_unit(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to register aircon unit", &e))?;
        text(CreateResult::new(unit))
    }

    pub async fn list_aircon_units(
        &self,
        Parameters(params): Parameters<ListAirconUnits>,
    ) -> McpResult {
        debug!("list_aircon_units: {:?}", params);
        self.authorize(Resource::AirconUnits, Action::Read)?;

        let units = self
            .desk
            .list_aircon_units(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list aircon units", &e))?;
        text(format!("# Aircon units\n\n{units}"))
    }

    pub async fn get_aircon_unit(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("get_aircon_unit: {:?}", params);
        self.authorize(Resource::AirconUnits, Action::Read)?;

        let id = params.as_ref().id;
        let unit = self
            .desk
            .get_aircon_unit(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get aircon unit", &e))?
            .ok_or_else(|| not_found("Aircon unit", id))?;
        text(unit)
    }

    pub async fn create_technician(
        &self,
        Parameters(params): Parameters<CreateTechnician>,
    ) -> McpResult {
        debug!("create_technician: {:?}", params);
        self.authorize(Resource::Technicians, Action::Create)?;

        let technician = self
            .desk
            .create_technician(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create technician", &e))?;
        text(CreateResult::new(technician))
    }

    pub async fn list_technicians(
        &self,
        Parameters(params): Parameters<ListTechnicians>,
    ) -> McpResult {
        debug!("list_technicians: {:?}", params);
        self.authorize(Resource::Technicians, Action::Read)?;

        let technicians = self
            .desk
            .list_technicians(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list technicians", &e))?;
        text(format!("# Technicians\n\n{technicians}"))
    }

    pub async fn set_technician_active(
        &self,
        Parameters(params): Parameters<SetTechnicianActive>,
    ) -> McpResult {
        debug!("set_technician_active: {:?}", params);
        self.authorize(Resource::Technicians, Action::Update)?;

        let technician = self
            .desk
            .set_technician_active(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update technician", &e))?;
        let change = if params.as_ref().active {
            "Activated"
        } else {
            "Deactivated"
        };
        text(UpdateResult::with_changes(
            technician,
            vec![change.to_string()],
        ))
    }

    // ------------------------------------------------------------------
    // Bookings
    // ------------------------------------------------------------------

    pub async fn create_booking(&self, Parameters(params): Parameters<CreateBooking>) -> McpResult {
        debug!("create_booking: {:?}", params);
        self.authorize(Resource::Bookings, Action::Create)?;

        let booking = self
            .desk
            .create_booking(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create booking", &e))?;
        text(CreateResult::new(booking))
    }

    pub async fn list_bookings(&self, Parameters(params): Parameters<ListBookings>) -> McpResult {
        debug!("list_bookings: {:?}", params);
        self.authorize(Resource::Bookings, Action::Read)?;

        let bookings = self
            .desk
            .list_bookings(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list bookings", &e))?;
        text(format!("# Bookings\n\n{bookings}"))
    }

    pub async fn get_booking(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("get_booking: {:?}", params);
        self.authorize(Resource::Bookings, Action::Read)?;

        let id = params.as_ref().id;
        let booking = self
            .desk
            .get_booking(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get booking", &e))?
            .ok_or_else(|| not_found("Booking", id))?;
        text(booking)
    }

    pub async fn update_booking(&self, Parameters(params): Parameters<UpdateBooking>) -> McpResult {
        debug!("update_booking: {:?}", params);
        self.authorize(Resource::Bookings, Action::Update)?;

        let (booking, changes) = self
            .desk
            .update_booking(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update booking", &e))?;
        text(UpdateResult::with_changes(booking, changes))
    }

    pub async fn update_booking_status(
        &self,
        Parameters(params): Parameters<UpdateBookingStatus>,
    ) -> McpResult {
        debug!("update_booking_status: {:?}", params);
        self.authorize(Resource::Bookings, Action::UpdateStatus)?;

        let change = self
            .desk
            .update_booking_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update booking status", &e))?;
        if let Some(warning) = change.warning() {
            warn!("update_booking_status: {warning}");
        }
        text(change)
    }

    pub async fn delete_booking(&self, Parameters(params): Parameters<DeleteBooking>) -> McpResult {
        debug!("delete_booking: {:?}", params);
        self.authorize(Resource::Bookings, Action::Delete)?;

        let id = params.as_ref().id;
        match self
            .desk
            .delete_booking(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete booking", &e))?
        {
            Some(booking) => text(DeleteResult::new(booking)),
            None => text(OperationStatus::not_found("Booking", id)),
        }
    }

    // ------------------------------------------------------------------
    // Assignments
    // ------------------------------------------------------------------

    pub async fn assign_technician(
        &self,
        Parameters(params): Parameters<AssignTechnician>,
    ) -> McpResult {
        debug!("assign_technician: {:?}", params);
        self.authorize(Resource::Assignments, Action::Create)?;

        let assignment = self
            .desk
            .assign_technician(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to assign technician", &e))?;
        text(CreateResult::new(assignment))
    }

    pub async fn list_assignments(
        &self,
        Parameters(params): Parameters<ListAssignments>,
    ) -> McpResult {
        debug!("list_assignments: {:?}", params);
        self.authorize(Resource::Assignments, Action::Read)?;

        let assignments = self
            .desk
            .list_assignments(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list assignments", &e))?;
        text(format!("# Assignments\n\n{assignments}"))
    }

    pub async fn get_assignment(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("get_assignment: {:?}", params);
        self.authorize(Resource::Assignments, Action::Read)?;

        let id = params.as_ref().id;
        let assignment = self
            .desk
            .get_assignment(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get assignment", &e))?
            .ok_or_else(|| not_found("Assignment", id))?;
        text(assignment)
    }

    pub async fn get_assignment_by_booking(
        &self,
        Parameters(params): Parameters<Id>,
    ) -> McpResult {
        debug!("get_assignment_by_booking: {:?}", params);
        self.authorize(Resource::Assignments, Action::Read)?;

        let id = params.as_ref().id;
        match self
            .desk
            .get_assignment_by_booking(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get assignment", &e))?
        {
            Some(assignment) => text(assignment),
            None => text(OperationStatus::failure(format!(
                "Booking {id} has no assignment"
            ))),
        }
    }

    pub async fn update_assignment(
        &self,
        Parameters(params): Parameters<UpdateAssignment>,
    ) -> McpResult {
        debug!("update_assignment: {:?}", params);
        self.authorize(Resource::Assignments, Action::Update)?;

        let (assignment, changes) = self
            .desk
            .update_assignment(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update assignment", &e))?;
        text(UpdateResult::with_changes(assignment, changes))
    }

    pub async fn update_assignment_status(
        &self,
        Parameters(params): Parameters<UpdateAssignmentStatus>,
    ) -> McpResult {
        debug!("update_assignment_status: {:?}", params);
        self.authorize(Resource::Assignments, Action::UpdateStatus)?;

        let change = self
            .desk
            .update_assignment_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update assignment status", &e))?;
        if let Some(warning) = change.warning() {
            warn!("update_assignment_status: {warning}");
        }
        text(change)
    }

    pub async fn delete_assignment(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_assignment: {:?}", params);
        self.authorize(Resource::Assignments, Action::Delete)?;

        let id = params.as_ref().id;
        match self
            .desk
            .delete_assignment(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete assignment", &e))?
        {
            Some(assignment) => text(DeleteResult::new(assignment)),
            None => text(OperationStatus::not_found("Assignment", id)),
        }
    }

    // ------------------------------------------------------------------
    // Service records and availability
    // ------------------------------------------------------------------

    pub async fn create_service_record(
        &self,
        Parameters(params): Parameters<CreateServiceRecord>,
    ) -> McpResult {
        debug!("create_service_record: {:?}", params);
        self.authorize(Resource::ServiceRecords, Action::Create)?;

        let record = self
            .desk
            .create_service_record(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create service record", &e))?;
        text(CreateResult::new(record))
    }

    pub async fn list_service_records(
        &self,
        Parameters(params): Parameters<ListServiceRecords>,
    ) -> McpResult {
        debug!("list_service_records: {:?}", params);
        self.authorize(Resource::ServiceRecords, Action::Read)?;

        let records = self
            .desk
            .list_service_records(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list service records", &e))?;
        text(format!("# Service history\n\n{records}"))
    }

    pub async fn get_service_record(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("get_service_record: {:?}", params);
        self.authorize(Resource::ServiceRecords, Action::Read)?;

        let id = params.as_ref().id;
        let record = self
            .desk
            .get_service_record(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get service record", &e))?
            .ok_or_else(|| not_found("Service record", id))?;
        text(record)
    }

    /// Markdown table plus the raw `date → {morning, afternoon, evening}` map.
    pub async fn get_availability(
        &self,
        Parameters(params): Parameters<AvailabilityRange>,
    ) -> McpResult {
        debug!("get_availability: {:?}", params);
        self.authorize(Resource::Availability, Action::Read)?;

        let availability = self
            .desk
            .get_availability(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to load availability", &e))?;
        let json = serde_json::to_string(&availability).map_err(|e| {
            ErrorData::internal_error(format!("Failed to encode availability: {e}"), None)
        })?;

        Ok(CallToolResult::success(vec![
            Content::text(availability.to_string()),
            Content::text(json),
        ]))
    }

    pub async fn availability_calendar(
        &self,
        Parameters(params): Parameters<AvailabilityRange>,
    ) -> McpResult {
        debug!("availability_calendar: {:?}", params);
        self.authorize(Resource::Availability, Action::Read)?;

        let calendar = self
            .desk
            .availability_calendar(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to build calendar", &e))?;
        text(calendar)
    }

    // ------------------------------------------------------------------
    // Prompts
    // ------------------------------------------------------------------

    /// List all available prompts
    pub async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        debug!("list_prompts");

        let prompts = get_prompt_templates()
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    /// Get a specific prompt by name and apply arguments
    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        debug!("get_prompt: {}", request.name);

        let templates = get_prompt_templates();
        let template = templates
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| ErrorData::invalid_params("Prompt not found", None))?;

        let arguments = request.arguments.as_ref();
        let prompt_text = template
            .render(|name| {
                arguments
                    .and_then(|args| args.get(name))
                    .and_then(|value| value.as_str())
                    .map(String::from)
            })
            .map_err(|missing| {
                ErrorData::invalid_params(
                    format!("Required argument '{missing}' is missing"),
                    None,
                )
            })?;

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}
