//! Core data models for the booking system.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::conflict::BookingWindow;
use crate::error::ValidationError;
use crate::time::TimeOfDay;

/// Date format used on the wire and in storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A registered user who can make bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email_address: Option<String>,
}

/// A bookable drone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drone {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
}

/// A committed reservation of a drone by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub drone_id: i64,
    pub booked_on: NaiveDate,
    pub booked_from: Option<TimeOfDay>,
    pub booked_to: Option<TimeOfDay>,
}

impl Booking {
    pub fn window(&self) -> BookingWindow {
        BookingWindow {
            from: self.booked_from,
            to: self.booked_to,
        }
    }
}

/// A booking joined with the names of its user and drone, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedBooking {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub drone_id: i64,
    pub drone_name: String,
    pub booked_on: NaiveDate,
    pub booked_from: Option<TimeOfDay>,
    pub booked_to: Option<TimeOfDay>,
}

/// Optional narrowing of a booking listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingFilter {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub drone_id: Option<i64>,
}

impl BookingFilter {
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            drone_id: None,
        }
    }

    pub fn for_drone(drone_id: i64) -> Self {
        Self {
            user_id: None,
            drone_id: Some(drone_id),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDroneRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// A booking proposal as submitted by a caller, before parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub drone_id: Option<i64>,
    #[serde(default)]
    pub booked_on: String,
    #[serde(default)]
    pub booked_from: Option<String>,
    #[serde(default)]
    pub booked_to: Option<String>,
}

/// A parsed, well-formed booking proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposedBooking {
    pub user_id: i64,
    pub drone_id: i64,
    pub booked_on: NaiveDate,
    pub window: BookingWindow,
}

impl ProposedBooking {
    pub fn new(user_id: i64, drone_id: i64, booked_on: NaiveDate, window: BookingWindow) -> Self {
        Self {
            user_id,
            drone_id,
            booked_on,
            window,
        }
    }
}

impl TryFrom<&BookingRequest> for ProposedBooking {
    type Error = ValidationError;

    fn try_from(req: &BookingRequest) -> Result<Self, Self::Error> {
        let user_id = req.user_id.ok_or(ValidationError::MissingField("user_id"))?;
        let drone_id = req.drone_id.ok_or(ValidationError::MissingField("drone_id"))?;
        let booked_on = parse_date(&req.booked_on)?;
        let from = TimeOfDay::parse_optional(req.booked_from.as_deref())?;
        let to = TimeOfDay::parse_optional(req.booked_to.as_deref())?;
        Ok(Self {
            user_id,
            drone_id,
            booked_on,
            window: BookingWindow::new(from, to)?,
        })
    }
}

/// Parse a "YYYY-MM-DD" date. Single-digit months and days are rejected.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField("booked_on"));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_FORMAT).to_string() == value)
        .ok_or_else(|| ValidationError::InvalidDate(value.to_string()))
}

/// Trim a required text field, rejecting absent or blank values.
pub fn required_text(
    field: &'static str,
    value: Option<&str>,
) -> Result<String, ValidationError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Trim an optional text field, mapping blank values to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
