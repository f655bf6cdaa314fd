//! Role-based access policy.
//!
//! Every front-end operation names the resource and action it touches and is
//! checked against the caller's role before it reaches the desk.

use std::{fmt, str::FromStr};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Admin,
    Technician,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Technician => "technician",
            Role::Customer => "customer",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "technician" => Ok(Role::Technician),
            "customer" => Ok(Role::Customer),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Customers,
    AirconUnits,
    Technicians,
    Bookings,
    Assignments,
    ServiceRecords,
    Availability,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Customers => "customers",
            Resource::AirconUnits => "aircon units",
            Resource::Technicians => "technicians",
            Resource::Bookings => "bookings",
            Resource::Assignments => "assignments",
            Resource::ServiceRecords => "service records",
            Resource::Availability => "availability",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Read,
    Update,
    /// Status transitions, kept apart from field edits
    UpdateStatus,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::UpdateStatus => "change the status of",
            Action::Delete => "delete",
        }
    }
}

/// Whether `role` may perform `action` on `resource`.
///
/// Admins may do everything. Technicians work their assignments: they read
/// bookings, move bookings and assignments through their statuses, and log
/// service records. Customers book visits, look at availability and read
/// their units and records.
///
/// ```rust
/// use aircare_core::policy::{allows, Action, Resource, Role};
///
/// assert!(allows(Role::Customer, Resource::Bookings, Action::Create));
/// assert!(!allows(Role::Customer, Resource::Assignments, Action::Create));
/// assert!(allows(Role::Technician, Resource::Assignments, Action::UpdateStatus));
/// ```
pub fn allows(role: Role, resource: Resource, action: Action) -> bool {
    use Action::*;
    use Resource::*;

    match role {
        Role::Admin => true,
        Role::Technician => match resource {
            Bookings | Assignments => matches!(action, Read | UpdateStatus),
            ServiceRecords => matches!(action, Read | Create),
            Customers | AirconUnits | Technicians | Availability => action == Read,
        },
        Role::Customer => match resource {
            Bookings => matches!(action, Read | Create),
            Availability | AirconUnits | ServiceRecords | Technicians => action == Read,
            Customers | Assignments => false,
        },
    }
}

/// Fail with `PermissionDenied` unless the role is allowed.
pub fn authorize(role: Role, resource: Resource, action: Action) -> Result<()> {
    if allows(role, resource, action) {
        Ok(())
    } else {
        Err(ServiceError::PermissionDenied {
            role: role.to_string(),
            action: action.as_str().to_string(),
            resource: resource.as_str().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESOURCES: [Resource; 7] = [
        Resource::Customers,
        Resource::AirconUnits,
        Resource::Technicians,
        Resource::Bookings,
        Resource::Assignments,
        Resource::ServiceRecords,
        Resource::Availability,
    ];

    const ACTIONS: [Action; 5] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::UpdateStatus,
        Action::Delete,
    ];

    #[test]
    fn test_admin_allowed_everything() {
        for resource in RESOURCES {
            for action in ACTIONS {
                assert!(allows(Role::Admin, resource, action));
            }
        }
    }

    #[test]
    fn test_only_admin_deletes() {
        for resource in RESOURCES {
            assert!(!allows(Role::Technician, resource, Action::Delete));
            assert!(!allows(Role::Customer, resource, Action::Delete));
        }
    }

    #[test]
    fn test_technician_permissions() {
        assert!(allows(Role::Technician, Resource::Bookings, Action::UpdateStatus));
        assert!(!allows(Role::Technician, Resource::Bookings, Action::Create));
        assert!(!allows(Role::Technician, Resource::Assignments, Action::Create));
        assert!(allows(Role::Technician, Resource::ServiceRecords, Action::Create));
    }

    #[test]
    fn test_customer_permissions() {
        assert!(allows(Role::Customer, Resource::Availability, Action::Read));
        assert!(!allows(Role::Customer, Resource::Bookings, Action::UpdateStatus));
        assert!(!allows(Role::Customer, Resource::Customers, Action::Read));
    }

    #[test]
    fn test_authorize_error() {
        match authorize(Role::Customer, Resource::Bookings, Action::Delete) {
            Err(ServiceError::PermissionDenied {
                role,
                action,
                resource,
            }) => {
                assert_eq!(role, "customer");
                assert_eq!(action, "delete");
                assert_eq!(resource, "bookings");
            }
            other => panic!("Expected PermissionDenied, got {other:?}"),
        }
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Technician".parse::<Role>(), Ok(Role::Technician));
        assert!("manager".parse::<Role>().is_err());
    }
}
