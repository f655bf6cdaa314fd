//! Display implementations for domain models.
//!
//! Every model renders as markdown: a heading with the identifier, a bullet
//! list of metadata, and free text as a trailing paragraph.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{
    AirconUnit, AssignmentStatus, Booking, BookingAssignment, BookingStatus, Customer,
    ServiceRecord, ServiceRecordStatus, Technician,
};

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ServiceRecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## Booking #{} ({})",
            self.id,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        writeln!(f, "- **Service**: {}", self.service_type)?;
        writeln!(
            f,
            "- **When**: {} ({})",
            self.preferred_date, self.preferred_time
        )?;
        writeln!(f, "- **Customer**: {}", self.customer_id)?;
        match self.aircon_unit_id {
            Some(unit) => writeln!(f, "- **Unit**: {unit}")?,
            None => {
                let described: Vec<&str> = [
                    self.aircon_brand.as_deref(),
                    self.aircon_model.as_deref(),
                ]
                .into_iter()
                .flatten()
                .collect();
                if !described.is_empty() {
                    writeln!(f, "- **Unit**: {} (not on file)", described.join(" "))?;
                }
            }
        }
        match &self.postal_code {
            Some(postal) => writeln!(f, "- **Address**: {} {postal}", self.service_address)?,
            None => writeln!(f, "- **Address**: {}", self.service_address)?,
        }
        writeln!(f, "- **Contact**: {}", self.contact_phone)?;
        if let Some(technician) = self.technician_id {
            writeln!(f, "- **Technician**: {technician}")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;

        if let Some(issue) = &self.issue_description {
            writeln!(f)?;
            writeln!(f, "{issue}")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for BookingAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## Assignment #{} ({})",
            self.id,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        writeln!(f, "- **Booking**: {}", self.booking_id)?;
        writeln!(f, "- **Technician**: {}", self.technician_id)?;
        match (self.scheduled_date, &self.scheduled_time) {
            (Some(date), Some(time)) => writeln!(f, "- **Scheduled**: {date} {time}")?,
            (Some(date), None) => writeln!(f, "- **Scheduled**: {date}")?,
            (None, Some(time)) => writeln!(f, "- **Scheduled**: {time}")?,
            (None, None) => {}
        }
        if let Some(date) = self.completion_date {
            writeln!(f, "- **Completed**: {date}")?;
        }
        if let Some(cost) = self.actual_cost {
            writeln!(f, "- **Actual cost**: {cost}")?;
        }
        writeln!(f, "- **Assigned**: {}", LocalDateTime(&self.assigned_date))?;

        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for ServiceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## Service record #{} ({})",
            self.id, self.status
        )?;
        writeln!(f)?;

        writeln!(f, "- **Unit**: {}", self.aircon_unit_id)?;
        if let Some(booking) = self.booking_id {
            writeln!(f, "- **Booking**: {booking}")?;
        }
        writeln!(f, "- **Serviced**: {}", self.service_date)?;
        if let Some(technician) = self.technician_id {
            writeln!(f, "- **Technician**: {technician}")?;
        }
        if let Some(due) = self.next_due_date {
            writeln!(f, "- **Next due**: {due}")?;
        }
        writeln!(f, "- **Cost**: {}", self.cost)?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Phone**: {}", self.phone)?;
        if let Some(email) = &self.email {
            writeln!(f, "- **Email**: {email}")?;
        }
        if let Some(address) = &self.address {
            writeln!(f, "- **Address**: {address}")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for AirconUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} {} (ID: {})", self.brand, self.model, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Customer**: {}", self.customer_id)?;
        if let Some(serial) = &self.serial_number {
            writeln!(f, "- **Serial**: {serial}")?;
        }
        if let Some(location) = &self.location {
            writeln!(f, "- **Location**: {location}")?;
        }
        if let Some(installed) = self.installation_date {
            writeln!(f, "- **Installed**: {installed}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Technician {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.active { "" } else { " (inactive)" };
        writeln!(f, "## {} (ID: {}){marker}", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Phone**: {}", self.phone)?;
        if let Some(email) = &self.email {
            writeln!(f, "- **Email**: {email}")?;
        }
        if let Some(specialization) = &self.specialization {
            writeln!(f, "- **Specialization**: {specialization}")?;
        }
        writeln!(f)
    }
}
