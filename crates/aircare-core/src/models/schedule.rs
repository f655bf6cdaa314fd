//! Service types and daily time slots.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kind of visit a customer books.
///
/// Rows written by older clients may carry values outside the four known
/// kinds; those are preserved as [`ServiceType::Other`] so they can still be
/// read, scheduled and completed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServiceType {
    Maintenance,
    Repair,
    Installation,
    Inspection,
    Other(String),
}

impl ServiceType {
    pub const KNOWN: [ServiceType; 4] = [
        ServiceType::Maintenance,
        ServiceType::Repair,
        ServiceType::Installation,
        ServiceType::Inspection,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ServiceType::Maintenance => "maintenance",
            ServiceType::Repair => "repair",
            ServiceType::Installation => "installation",
            ServiceType::Inspection => "inspection",
            ServiceType::Other(value) => value,
        }
    }

    /// Whether the value is one of the four bookable service types.
    pub fn is_known(&self) -> bool {
        !matches!(self, ServiceType::Other(_))
    }

    /// Months until the next visit is due after this service.
    ///
    /// ```rust
    /// use aircare_core::models::ServiceType;
    ///
    /// assert_eq!(ServiceType::Maintenance.follow_up_months(), 3);
    /// assert_eq!(ServiceType::Installation.follow_up_months(), 1);
    /// assert_eq!(ServiceType::Other("cleaning".into()).follow_up_months(), 3);
    /// ```
    pub fn follow_up_months(&self) -> i64 {
        match self {
            ServiceType::Maintenance => 3,
            ServiceType::Repair => 6,
            ServiceType::Installation => 1,
            ServiceType::Inspection => 6,
            ServiceType::Other(_) => 3,
        }
    }
}

impl From<&str> for ServiceType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "maintenance" => ServiceType::Maintenance,
            "repair" => ServiceType::Repair,
            "installation" => ServiceType::Installation,
            "inspection" => ServiceType::Inspection,
            _ => ServiceType::Other(s.to_string()),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ServiceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ServiceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ServiceType::from(raw.as_str()))
    }
}

/// One of the three fixed daily scheduling windows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
        }
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(TimeSlot::Morning),
            "afternoon" => Ok(TimeSlot::Afternoon),
            "evening" => Ok(TimeSlot::Evening),
            _ => Err(format!("Invalid time slot: {s}")),
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
