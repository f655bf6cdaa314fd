//! Slot occupancy aggregation for the booking calendar.
//!
//! Counts are informational. Nothing here blocks a booking; the one booking
//! per slot per day capacity is a calendar convention layered on top of the
//! raw counts.

use std::{collections::BTreeMap, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::{BookingStatus, TimeSlot};

/// Bookings a single slot holds before the calendar shows it as taken.
pub const SLOT_CAPACITY: u32 = 1;

/// Number of bookings occupying each slot of one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCounts {
    pub morning: u32,
    pub afternoon: u32,
    pub evening: u32,
}

impl SlotCounts {
    pub fn get(&self, slot: TimeSlot) -> u32 {
        match slot {
            TimeSlot::Morning => self.morning,
            TimeSlot::Afternoon => self.afternoon,
            TimeSlot::Evening => self.evening,
        }
    }

    fn increment(&mut self, slot: TimeSlot) {
        match slot {
            TimeSlot::Morning => self.morning += 1,
            TimeSlot::Afternoon => self.afternoon += 1,
            TimeSlot::Evening => self.evening += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.morning + self.afternoon + self.evening
    }

    /// Whether at least one slot is below `capacity`.
    pub fn has_opening(&self, capacity: u32) -> bool {
        TimeSlot::ALL.iter().any(|slot| self.get(*slot) < capacity)
    }
}

/// The stored columns of a booking that availability looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRow {
    /// Preferred date as stored, `YYYY-MM-DD`
    pub preferred_date: String,
    /// Preferred slot as stored, matched case-insensitively
    pub preferred_time: String,
    pub status: String,
}

/// Occupancy per date, keyed by `YYYY-MM-DD`.
///
/// A date with no counted bookings has no entry; callers treat a missing key
/// as a fully open day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Availability(BTreeMap<String, SlotCounts>);

impl Availability {
    /// Aggregate booking rows into per-date slot counts.
    ///
    /// Cancelled bookings are skipped. A date gets an entry once any
    /// non-cancelled booking falls on it; the booking then counts toward
    /// whichever slot its preferred time names.
    ///
    /// ```rust
    /// use aircare_core::availability::{Availability, SlotRow};
    ///
    /// let row = |date: &str, time: &str, status: &str| SlotRow {
    ///     preferred_date: date.to_string(),
    ///     preferred_time: time.to_string(),
    ///     status: status.to_string(),
    /// };
    /// let availability = Availability::aggregate(vec![
    ///     row("2025-03-04", "MORNING", "pending"),
    ///     row("2025-03-04", "evening", "confirmed"),
    ///     row("2025-03-05", "morning", "cancelled"),
    /// ]);
    ///
    /// let day = availability.get_key("2025-03-04").unwrap();
    /// assert_eq!((day.morning, day.afternoon, day.evening), (1, 0, 1));
    /// assert!(availability.get_key("2025-03-05").is_none());
    /// ```
    pub fn aggregate<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = SlotRow>,
    {
        let mut days: BTreeMap<String, SlotCounts> = BTreeMap::new();
        for row in rows {
            if matches!(
                BookingStatus::from_str(&row.status),
                Ok(BookingStatus::Cancelled)
            ) {
                continue;
            }
            let counts = days.entry(row.preferred_date).or_default();
            if let Ok(slot) = TimeSlot::from_str(&row.preferred_time) {
                counts.increment(slot);
            }
        }
        Self(days)
    }

    pub fn get(&self, date: Date) -> Option<&SlotCounts> {
        self.get_key(&date.to_string())
    }

    pub fn get_key(&self, key: &str) -> Option<&SlotCounts> {
        self.0.get(key)
    }

    /// Counts for a date, zero when nothing is booked.
    pub fn counts(&self, date: Date) -> SlotCounts {
        self.get(date).copied().unwrap_or_default()
    }

    /// Whether any slot on `date` is still below capacity.
    pub fn is_available(&self, date: Date) -> bool {
        self.counts(date).has_opening(SLOT_CAPACITY)
    }

    pub fn is_slot_available(&self, date: Date, slot: TimeSlot) -> bool {
        self.counts(date).get(slot) < SLOT_CAPACITY
    }

    /// One entry per day of `[start, end]`, including fully open days.
    pub fn calendar(&self, start: Date, end: Date, today: Date) -> Vec<CalendarDay> {
        let mut days = Vec::new();
        for date in start.series(jiff::Span::new().days(1)) {
            if date > end {
                break;
            }
            days.push(CalendarDay {
                date,
                counts: self.counts(date),
                past: date < today,
                available: self.is_available(date),
            });
        }
        days
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SlotCounts)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single calendar cell as the booking calendar presents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: Date,
    pub counts: SlotCounts,
    /// Earlier than today; not offered for booking
    pub past: bool,
    /// At least one slot is below capacity
    pub available: bool,
}

impl CalendarDay {
    /// Whether the calendar offers this day for self-booking.
    pub fn bookable(&self) -> bool {
        self.available && !self.past
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn row(date: &str, time: &str, status: &str) -> SlotRow {
        SlotRow {
            preferred_date: date.to_string(),
            preferred_time: time.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_aggregate_counts_slots_per_day() {
        let availability = Availability::aggregate(vec![
            row("2025-03-10", "morning", "pending"),
            row("2025-03-10", "morning", "confirmed"),
            row("2025-03-10", "Afternoon", "assigned"),
            row("2025-03-11", "evening", "completed"),
        ]);

        assert_eq!(availability.len(), 2);
        assert_eq!(
            availability.counts(date(2025, 3, 10)),
            SlotCounts {
                morning: 2,
                afternoon: 1,
                evening: 0
            }
        );
        assert_eq!(availability.counts(date(2025, 3, 11)).evening, 1);
    }

    #[test]
    fn test_aggregate_skips_cancelled() {
        let availability = Availability::aggregate(vec![
            row("2025-03-10", "morning", "cancelled"),
            row("2025-03-10", "afternoon", "CANCELLED"),
        ]);

        assert!(availability.is_empty());
        assert!(availability.get(date(2025, 3, 10)).is_none());
    }

    #[test]
    fn test_aggregate_unknown_slot_keeps_day_without_count() {
        let availability = Availability::aggregate(vec![row("2025-03-12", "noon", "pending")]);

        assert_eq!(
            availability.get(date(2025, 3, 12)),
            Some(&SlotCounts::default())
        );
    }

    #[test]
    fn test_availability_policy() {
        let availability = Availability::aggregate(vec![
            row("2025-03-10", "morning", "pending"),
            row("2025-03-10", "afternoon", "pending"),
            row("2025-03-10", "evening", "pending"),
            row("2025-03-11", "morning", "pending"),
        ]);

        assert!(!availability.is_available(date(2025, 3, 10)));
        assert!(availability.is_available(date(2025, 3, 11)));
        assert!(!availability.is_slot_available(date(2025, 3, 11), TimeSlot::Morning));
        assert!(availability.is_slot_available(date(2025, 3, 11), TimeSlot::Evening));
        // Missing key means fully open
        assert!(availability.is_available(date(2025, 3, 12)));
    }

    #[test]
    fn test_calendar_marks_past_and_full_days() {
        let availability = Availability::aggregate(vec![
            row("2025-03-02", "morning", "pending"),
            row("2025-03-02", "afternoon", "pending"),
            row("2025-03-02", "evening", "pending"),
        ]);

        let days = availability.calendar(date(2025, 3, 1), date(2025, 3, 3), date(2025, 3, 2));
        assert_eq!(days.len(), 3);

        assert!(days[0].past);
        assert!(!days[0].bookable());

        assert!(!days[1].past);
        assert!(!days[1].available);
        assert_eq!(days[1].counts.total(), 3);

        assert!(days[2].bookable());
    }

    #[test]
    fn test_serializes_as_date_map() {
        let availability = Availability::aggregate(vec![row("2025-03-10", "evening", "pending")]);
        let json = serde_json::to_value(&availability).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "2025-03-10": { "morning": 0, "afternoon": 0, "evening": 1 }
            })
        );
    }
}
