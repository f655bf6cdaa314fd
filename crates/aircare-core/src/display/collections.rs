//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper renders its items with their own `Display` implementation and
//! prints a single "No ... found." line when empty.

use std::{fmt, ops::Index};

use serde::Serialize;

use crate::{
    availability::{Availability, CalendarDay},
    models::{AirconUnit, Booking, BookingAssignment, Customer, ServiceRecord, Technician},
};

macro_rules! collection {
    ($(#[$meta:meta])* $name:ident, $item:ty, $empty:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub Vec<$item>);

        impl $name {
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_empty() {
                    writeln!(f, $empty)
                } else {
                    for item in &self.0 {
                        write!(f, "{item}")?;
                    }
                    Ok(())
                }
            }
        }
    };
}

collection!(
    /// Bookings, in the order the query returned them.
    Bookings,
    Booking,
    "No bookings found."
);
collection!(Assignments, BookingAssignment, "No assignments found.");
collection!(
    /// Service history entries, most recent first.
    ServiceRecords,
    ServiceRecord,
    "No service records found."
);
collection!(Customers, Customer, "No customers found.");
collection!(AirconUnits, AirconUnit, "No aircon units found.");
collection!(Technicians, Technician, "No technicians found.");

/// Day-by-day booking calendar.
///
/// Renders as a markdown table with one row per day and a marker for days
/// that are past or fully booked.
///
/// ```rust
/// use aircare_core::{availability::Availability, display::Calendar};
/// use jiff::civil::date;
///
/// let days =
///     Availability::default().calendar(date(2025, 3, 1), date(2025, 3, 2), date(2025, 3, 2));
/// let output = Calendar(days).to_string();
/// assert!(output.contains("| 2025-03-01 | 0 | 0 | 0 | past |"));
/// assert!(output.contains("| 2025-03-02 | 0 | 0 | 0 | open |"));
/// ```
#[derive(Debug, Clone)]
pub struct Calendar(pub Vec<CalendarDay>);

impl Calendar {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Days still offered for booking.
    pub fn bookable_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.0.iter().filter(|day| day.bookable())
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No days in range.");
        }

        writeln!(f, "| Date | Morning | Afternoon | Evening | |")?;
        writeln!(f, "|:-|:-:|:-:|:-:|:-|")?;
        for day in &self.0 {
            let marker = if day.past {
                "past"
            } else if day.available {
                "open"
            } else {
                "full"
            };
            writeln!(
                f,
                "| {} | {} | {} | {} | {marker} |",
                day.date, day.counts.morning, day.counts.afternoon, day.counts.evening
            )?;
        }
        Ok(())
    }
}

/// Booked dates only; dates without an entry are fully open.
impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No bookings in range.");
        }

        writeln!(f, "| Date | Morning | Afternoon | Evening |")?;
        writeln!(f, "|:-|:-:|:-:|:-:|")?;
        for (date, counts) in self.iter() {
            writeln!(
                f,
                "| {date} | {} | {} | {} |",
                counts.morning, counts.afternoon, counts.evening
            )?;
        }
        Ok(())
    }
}
