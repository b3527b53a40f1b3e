//! Booking overlap rule.
//!
//! Two bookings for the same drone on the same date conflict when their time
//! windows intersect. Windows are closed intervals: a booking ending at 10:00
//! and another starting at 10:00 share an instant and therefore conflict.
//! A missing bound stretches to the start or end of the day, so an all-day
//! booking is simply the window `[00:00, 23:59]`.

use serde::Serialize;
use std::fmt;

use crate::error::ValidationError;
use crate::time::TimeOfDay;

/// Message returned to callers when a proposal is rejected.
pub const CONFLICT_MESSAGE: &str =
    "Cannot book drone: There is an overlapping booking for this time period";

/// The time bounds of a booking as stored. Either bound may be absent.
///
/// Only [`BookingWindow::new`] builds one outside this crate, so a window
/// never ends before it starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BookingWindow {
    pub(crate) from: Option<TimeOfDay>,
    pub(crate) to: Option<TimeOfDay>,
}

impl BookingWindow {
    /// Build a window, rejecting one that ends before it starts.
    pub fn new(from: Option<TimeOfDay>, to: Option<TimeOfDay>) -> Result<Self, ValidationError> {
        let window = Self { from, to };
        if window.start() > window.end() {
            return Err(ValidationError::InvertedWindow {
                from: window.start().to_string(),
                to: window.end().to_string(),
            });
        }
        Ok(window)
    }

    pub fn all_day() -> Self {
        Self::default()
    }

    /// Start time as given, `None` when open.
    pub fn booked_from(&self) -> Option<TimeOfDay> {
        self.from
    }

    /// End time as given, `None` when open.
    pub fn booked_to(&self) -> Option<TimeOfDay> {
        self.to
    }

    pub fn is_all_day(&self) -> bool {
        self.start() == TimeOfDay::START_OF_DAY && self.end() == TimeOfDay::END_OF_DAY
    }

    /// Effective start used for comparison.
    pub fn start(&self) -> TimeOfDay {
        self.from.unwrap_or(TimeOfDay::START_OF_DAY)
    }

    /// Effective end used for comparison.
    pub fn end(&self) -> TimeOfDay {
        self.to.unwrap_or(TimeOfDay::END_OF_DAY)
    }

    /// Closed-interval intersection test. Symmetric in its arguments.
    pub fn overlaps(&self, other: &BookingWindow) -> bool {
        self.start() <= other.end() && other.start() <= self.end()
    }
}

impl fmt::Display for BookingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from.is_none() && self.to.is_none() {
            return f.write_str("all day");
        }
        write!(f, "{} - {}", self.start(), self.end())
    }
}

/// Return the first existing window that the proposed window overlaps.
pub fn find_conflict<'a, I>(proposed: &BookingWindow, existing: I) -> Option<&'a BookingWindow>
where
    I: IntoIterator<Item = &'a BookingWindow>,
{
    existing.into_iter().find(|window| proposed.overlaps(window))
}
