pub mod conflict;
pub mod error;
pub mod models;
pub mod time;

pub use conflict::{find_conflict, BookingWindow, CONFLICT_MESSAGE};
pub use error::ValidationError;
pub use models::{
    Booking, BookingFilter, BookingRequest, CreateDroneRequest, CreateUserRequest, Drone,
    EnrichedBooking, ProposedBooking, User,
};
pub use time::TimeOfDay;
