//! Blocking HTTP client for the booking server.

use anyhow::{bail, Result};
use booking_core::{
    Booking, BookingFilter, BookingRequest, CreateDroneRequest, CreateUserRequest, Drone,
    EnrichedBooking, User,
};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

pub struct BookingClient {
    base_url: String,
    client: Client,
}

impl BookingClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        send(self.client.get(self.url("/users")))
    }

    pub fn add_user(&self, req: &CreateUserRequest) -> Result<User> {
        send(self.client.post(self.url("/users")).json(req))
    }

    pub fn list_drones(&self) -> Result<Vec<Drone>> {
        send(self.client.get(self.url("/drones")))
    }

    pub fn add_drone(&self, req: &CreateDroneRequest) -> Result<Drone> {
        send(self.client.post(self.url("/drones")).json(req))
    }

    pub fn list_bookings(&self, filter: BookingFilter) -> Result<Vec<EnrichedBooking>> {
        let path = match (filter.user_id, filter.drone_id) {
            (Some(user_id), None) => format!("/bookings/user/{}", user_id),
            (None, Some(drone_id)) => format!("/bookings/drone/{}", drone_id),
            _ => "/bookings".to_string(),
        };
        let mut request = self.client.get(self.url(&path));
        if filter.user_id.is_some() && filter.drone_id.is_some() {
            request = request.query(&filter);
        }
        send(request)
    }

    /// Propose a booking. A conflict comes back as an error carrying the
    /// server's message.
    pub fn book(&self, req: &BookingRequest) -> Result<Booking> {
        send(self.client.post(self.url("/bookings")).json(req))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send()?;
    let status = response.status();
    if status.is_success() {
        return Ok(response.json()?);
    }

    let body = response.text().unwrap_or_default();
    bail!("{} ({})", error_message(&body), status)
}

/// Pull the `error` field out of a JSON error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
