//! Prompt templates for MCP server

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

impl PromptTemplate {
    /// Fill `{name}` placeholders from `lookup`.
    ///
    /// Optional arguments without a value are replaced with "not given".
    /// Returns the name of the first required argument that has no value.
    pub fn render<F>(&self, lookup: F) -> Result<String, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut text = self.template.clone();
        for arg in &self.arguments {
            let value = match lookup(&arg.name) {
                Some(value) => value,
                None if arg.required => return Err(arg.name.clone()),
                None => "not given".to_string(),
            };
            text = text.replace(&format!("{{{}}}", arg.name), &value);
        }
        Ok(text)
    }
}

fn arg(name: &str, description: &str, required: bool) -> PromptTemplateArg {
    PromptTemplateArg {
        name: name.to_string(),
        description: description.to_string(),
        required,
    }
}

/// Predefined prompts for working the service desk
pub fn get_prompt_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            name: "schedule_service".to_string(),
            description: "Book a service visit for a customer into an open slot".to_string(),
            template: r#"You are the booking assistant for an aircon servicing company.

# Request
- Customer ID: {customer_id}
- Service type: {service_type}
- Preferred date: {preferred_date}

# Step 1: Know the customer
Use `list_aircon_units` with the customer ID to see which units they have on
file. A booking linked to a registered unit gets a service record when the
visit is completed; prefer linking one when the customer names a unit.

# Step 2: Find an open slot
Use `availability_calendar` over the two weeks around the preferred date.
Each slot (morning, afternoon, evening) takes one booking per day. Days marked
`full` have no slot left and days marked `past` cannot be booked.

# Step 3: Book
Use `create_booking` with the customer ID, service type, the chosen date and
slot, the service address and a contact phone. Include an issue description
for repairs.

# Step 4: Confirm
Show the customer the booking ID, date and slot. The booking starts as
`pending`; an admin confirms it and assigns a technician later."#
                .to_string(),
            arguments: vec![
                arg("customer_id", "ID of the customer booking the visit", true),
                arg(
                    "service_type",
                    "maintenance, repair, installation or inspection",
                    true,
                ),
                arg("preferred_date", "Date the customer would like (YYYY-MM-DD)", false),
            ],
        },
        PromptTemplate {
            name: "technician_day".to_string(),
            description: "Walk a technician through their assignments for one day".to_string(),
            template: r#"You are dispatching technician {technician_id} for {date}.

# Step 1: Load the day
Use `list_assignments` with technician_id={technician_id} and date={date}.
For each assignment use `get_booking` with its booking ID to read the address,
contact phone and issue description.

# Step 2: Work each visit
- When the technician arrives, use `update_assignment_status` with
  `in_progress`.
- Record the amount charged and any notes with `update_assignment`.
- When the work is done, use `update_assignment_status` with `completed`.
  The booking is completed with it and a service record is written for the
  unit with its next due date. If the result carries a warning, tell the
  technician the record has to be logged by hand with `create_service_record`.

# Step 3: Wrap up
List what was completed and any visit that is still open."#
                .to_string(),
            arguments: vec![
                arg("technician_id", "ID of the technician", true),
                arg("date", "Day to dispatch (YYYY-MM-DD)", true),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_have_unique_names() {
        let templates = get_prompt_templates();
        let mut names: Vec<_> = templates.iter().map(|t| t.name.as_str()).collect();
        names.dedup();
        assert_eq!(names.len(), templates.len());
    }

    #[test]
    fn test_render_fills_placeholders() {
        let templates = get_prompt_templates();
        let schedule = &templates[0];

        let text = schedule
            .render(|name| match name {
                "customer_id" => Some("7".to_string()),
                "service_type" => Some("repair".to_string()),
                _ => None,
            })
            .unwrap();
        assert!(text.contains("- Customer ID: 7"));
        assert!(text.contains("- Preferred date: not given"));
        assert!(!text.contains("{service_type}"));
    }

    #[test]
    fn test_render_requires_arguments() {
        let templates = get_prompt_templates();
        let result = templates[1].render(|name| (name == "date").then(|| "2025-03-04".to_string()));
        assert_eq!(result, Err("technician_id".to_string()));
    }
}
