//! Plain-text rendering of listings.

use booking_core::{Booking, Drone, EnrichedBooking, User};

pub fn user_line(user: &User) -> String {
    format!(
        "{:>4}  {} ({})",
        user.id,
        user.name,
        user.email_address.as_deref().unwrap_or("No email")
    )
}

pub fn drone_line(drone: &Drone) -> String {
    format!(
        "{:>4}  {} ({})",
        drone.id,
        drone.name,
        drone.location.as_deref().unwrap_or("Location unknown")
    )
}

pub fn booking_line(booking: &EnrichedBooking) -> String {
    format!(
        "{:>4}  {:<20} {:<20} {}  {} - {}",
        booking.id,
        booking.user_name,
        booking.drone_name,
        booking.booked_on,
        booking.booked_from.map(|t| t.to_string()).unwrap_or_default(),
        booking.booked_to.map(|t| t.to_string()).unwrap_or_default(),
    )
}

pub fn created_booking(booking: &Booking) -> String {
    format!(
        "Booked drone {} for user {} on {} ({}) as booking {}",
        booking.drone_id,
        booking.user_id,
        booking.booked_on,
        booking.window(),
        booking.id
    )
}
